//! Disk-backed key/value cache for offloading a working set to disk.
//!
//! This crate provides a small storage engine with:
//! - One file per entry, named by the SHA-256 of its key
//! - Per-key readers/writer locking so unrelated keys never contend
//! - Opaque byte payloads with byte-exact roundtrips
//! - Best-effort write telemetry via [`Cache::stats`]
//!
//! ```no_run
//! use diskcache::{Cache, CacheConfig};
//!
//! # fn main() -> diskcache::Result<()> {
//! let cache = Cache::new(CacheConfig::new("tmp"))?;
//! cache.put("user:42", b"payload")?;
//! assert_eq!(cache.get("user:42").as_deref(), Some(&b"payload"[..]));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod keys;
pub mod locks;
pub mod store;

pub use config::{CacheBuilder, CacheConfig};
pub use errors::{CacheError, Result};
pub use keys::encode_key;
pub use locks::{ExclusiveGuard, LockRegistry, LockStrategy, SharedGuard};
pub use store::{Cache, CacheStats};
