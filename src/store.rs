//! Disk-backed key/value storage engine.
//!
//! Each entry lives in its own file named by the hash of its key. A
//! write takes the exclusive lock for that filename and replaces the
//! file content in one create-or-truncate write, so a concurrent
//! reader holding the shared lock never observes a partial write.

use crate::config::{CacheBuilder, CacheConfig};
use crate::errors::{CacheError, Result};
use crate::keys::encode_key;
use crate::locks::LockRegistry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Snapshot of cache telemetry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Root directory of the cache
    pub directory: PathBuf,
    /// Count of successful writes since creation or the last purge.
    /// Best-effort: repeated writes to the same key each count, so this
    /// can exceed the number of distinct files on disk.
    pub items: u64,
}

/// Disk-backed key/value cache.
///
/// Values are opaque byte payloads, one file per entry under the root
/// directory. Safe for concurrent use from multiple threads within one
/// process; multi-process coordination is not provided.
pub struct Cache {
    directory: PathBuf,
    items: AtomicU64,
    locks: LockRegistry,
}

impl Cache {
    /// Create a cache rooted at `config.directory`, creating the
    /// directory (and parents) if absent.
    ///
    /// Fails if the path exists as a non-directory or cannot be
    /// created; no usable instance exists in that case.
    pub fn new(config: CacheConfig) -> Result<Self> {
        if config.directory.exists() && !config.directory.is_dir() {
            return Err(CacheError::InvalidDirectory {
                path: config.directory,
                reason: "path exists and is not a directory".to_string(),
            });
        }

        fs::create_dir_all(&config.directory)
            .map_err(|e| CacheError::io(&config.directory, "create cache directory", e))?;

        debug!(directory = %config.directory.display(), "cache initialized");

        Ok(Self {
            directory: config.directory,
            items: AtomicU64::new(0),
            locks: LockRegistry::new(config.lock_strategy),
        })
    }

    /// Start building a cache.
    pub fn builder() -> CacheBuilder {
        CacheBuilder::new()
    }

    /// Store `data` under `key`, replacing any previous value.
    ///
    /// The write holds the exclusive lock for the key's filename for
    /// its whole duration. On success the item counter increments by
    /// one; on failure it does not, and the on-disk state of this key
    /// is undefined until a retried put succeeds.
    pub fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        let name = encode_key(key.as_bytes());
        let path = self.directory.join(&name);

        let _guard = self.locks.exclusive(&name);
        fs::write(&path, data).map_err(|e| CacheError::io(&path, "write cache entry", e))?;

        self.items.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Fetch the value stored under `key`, or `None` on a miss.
    ///
    /// A file that cannot be opened is a miss. A file that opens but
    /// fails mid-read is logged and also reported as a miss; the two
    /// cases are deliberately not distinguished at this interface.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let name = encode_key(key.as_bytes());
        let path = self.directory.join(&name);

        let _guard = self.locks.shared(&name);
        let mut file = fs::File::open(&path).ok()?;

        let mut data = Vec::new();
        if let Err(e) = file.read_to_end(&mut data) {
            warn!(
                path = %path.display(),
                error = %e,
                "failed to read cache entry, treating as a miss"
            );
            return None;
        }

        Some(data)
    }

    /// Remove every entry by deleting and recreating the root
    /// directory, and reset the item counter to zero.
    ///
    /// Takes no per-key locks: this is a whole-cache operation and is
    /// not atomic relative to concurrent `put`/`get`. A missing root
    /// directory is tolerated. On failure the instance may be left
    /// without its root directory.
    pub fn purge(&self) -> Result<()> {
        match fs::remove_dir_all(&self.directory) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(CacheError::io(&self.directory, "remove cache directory", e)),
        }

        fs::create_dir_all(&self.directory)
            .map_err(|e| CacheError::io(&self.directory, "recreate cache directory", e))?;

        self.items.store(0, Ordering::Relaxed);
        debug!(directory = %self.directory.display(), "cache purged");
        Ok(())
    }

    /// Snapshot the root directory path and the item counter.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            directory: self.directory.clone(),
            items: self.items.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("directory", &self.directory)
            .field("items", &self.items.load(Ordering::Relaxed))
            .finish()
    }
}
