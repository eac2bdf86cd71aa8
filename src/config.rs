//! Cache construction configuration.

use crate::errors::{CacheError, Result};
use crate::locks::LockStrategy;
use crate::store::Cache;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a cache instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Root directory under which all entries are stored
    pub directory: PathBuf,
    /// Locking strategy for concurrent access
    #[serde(default)]
    pub lock_strategy: LockStrategy,
}

impl CacheConfig {
    /// Configuration for `directory` with the default per-key locking.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            lock_strategy: LockStrategy::default(),
        }
    }
}

/// Builder for [`Cache`].
#[derive(Debug, Default)]
pub struct CacheBuilder {
    directory: Option<PathBuf>,
    lock_strategy: LockStrategy,
}

impl CacheBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root directory.
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Set the locking strategy.
    pub fn lock_strategy(mut self, strategy: LockStrategy) -> Self {
        self.lock_strategy = strategy;
        self
    }

    /// Build the cache, creating its root directory.
    pub fn build(self) -> Result<Cache> {
        let directory = self
            .directory
            .ok_or_else(|| CacheError::configuration("cache directory not specified"))?;

        Cache::new(CacheConfig {
            directory,
            lock_strategy: self.lock_strategy,
        })
    }
}
