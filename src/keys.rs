//! Derivation of on-disk filenames from logical cache keys.
//!
//! Keys are arbitrary byte sequences; filenames must be filesystem-safe
//! and fixed-length. Hashing the key with SHA-256 and rendering the
//! digest as lowercase hex satisfies both, and makes crafting a
//! colliding key infeasible.

use sha2::{Digest, Sha256};

/// Length in characters of every encoded filename (hex of a 256-bit digest).
pub const ENCODED_LEN: usize = 64;

/// Derive the on-disk filename for a logical key.
///
/// Pure and deterministic: the same key bytes always produce the same
/// filename, within one process and across runs. Any input is valid,
/// including the empty key.
pub fn encode_key(key: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_deterministic() {
        let a = encode_key(b"some key");
        let b = encode_key(b"some key");
        assert_eq!(a, b, "same key must produce the same filename");
    }

    #[test]
    fn test_encode_known_vectors() {
        // SHA-256 test vectors, so the encoding is stable across runs
        // and processes.
        assert_eq!(
            encode_key(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            encode_key(b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_encode_fixed_length_and_charset() {
        for key in [&b""[..], b"a", b"a longer key with spaces / and : colons"] {
            let name = encode_key(key);
            assert_eq!(name.len(), ENCODED_LEN);
            assert!(name
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_encode_distinct_keys() {
        assert_ne!(encode_key(b"key1"), encode_key(b"key2"));
        assert_ne!(encode_key(b"key"), encode_key(b"key "));
    }
}
