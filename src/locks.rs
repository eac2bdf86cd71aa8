//! Per-name shared/exclusive locking for cache entries.
//!
//! The registry hands out RAII guards keyed by derived filename: any
//! number of shared holders or exactly one exclusive holder per name,
//! with holders of different names never contending. Lock state is
//! materialized lazily on first use and reclaimed once the last holder
//! releases it, so the table stays bounded for unbounded key spaces.

use dashmap::DashMap;
use parking_lot::lock_api::{ArcRwLockReadGuard, ArcRwLockWriteGuard};
use parking_lot::{RawRwLock, RwLock};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Locking strategy chosen at cache construction time.
///
/// `PerKey` lets writers on distinct keys proceed in parallel at the
/// cost of maintaining a lock table. `Global` uses one process-wide
/// readers/writer lock for every name: simpler, still correct, but all
/// writers serialize against all readers regardless of key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockStrategy {
    #[default]
    PerKey,
    Global,
}

type Slot = Arc<RwLock<()>>;

/// Registry of per-name readers/writer locks.
pub struct LockRegistry {
    table: Table,
}

enum Table {
    PerKey(DashMap<String, Slot>),
    Global(Slot),
}

impl LockRegistry {
    pub fn new(strategy: LockStrategy) -> Self {
        let table = match strategy {
            LockStrategy::PerKey => Table::PerKey(DashMap::new()),
            LockStrategy::Global => Table::Global(Arc::new(RwLock::new(()))),
        };
        Self { table }
    }

    /// Acquire a shared (read) guard for `name`, blocking until no
    /// exclusive holder remains.
    pub fn shared(&self, name: &str) -> SharedGuard<'_> {
        let slot = self.slot(name);
        SharedGuard {
            registry: self,
            name: name.to_string(),
            guard: Some(slot.read_arc()),
        }
    }

    /// Acquire an exclusive (write) guard for `name`, blocking until
    /// all other holders release it.
    pub fn exclusive(&self, name: &str) -> ExclusiveGuard<'_> {
        let slot = self.slot(name);
        ExclusiveGuard {
            registry: self,
            name: name.to_string(),
            guard: Some(slot.write_arc()),
        }
    }

    fn slot(&self, name: &str) -> Slot {
        match &self.table {
            // The clone happens while the entry's shard lock is held,
            // so reclaim() cannot drop the slot out from under us.
            Table::PerKey(map) => map
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(RwLock::new(())))
                .clone(),
            Table::Global(slot) => Arc::clone(slot),
        }
    }

    fn reclaim(&self, name: &str) {
        if let Table::PerKey(map) = &self.table {
            // A waiter clones the slot before blocking on it, so a
            // strong count of one means the map holds the only
            // reference and the slot can be removed.
            map.remove_if(name, |_, slot| Arc::strong_count(slot) == 1);
        }
    }

    #[cfg(test)]
    fn slot_count(&self) -> usize {
        match &self.table {
            Table::PerKey(map) => map.len(),
            Table::Global(_) => 0,
        }
    }
}

impl std::fmt::Debug for LockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let strategy = match &self.table {
            Table::PerKey(_) => LockStrategy::PerKey,
            Table::Global(_) => LockStrategy::Global,
        };
        f.debug_struct("LockRegistry")
            .field("strategy", &strategy)
            .finish()
    }
}

/// RAII guard for shared access to one name.
#[must_use = "the lock is released when the guard is dropped"]
pub struct SharedGuard<'a> {
    registry: &'a LockRegistry,
    name: String,
    guard: Option<ArcRwLockReadGuard<RawRwLock, ()>>,
}

impl Drop for SharedGuard<'_> {
    fn drop(&mut self) {
        // Release the lock before reclaiming so the count check sees
        // the guard's Arc gone.
        self.guard.take();
        self.registry.reclaim(&self.name);
    }
}

/// RAII guard for exclusive access to one name.
#[must_use = "the lock is released when the guard is dropped"]
pub struct ExclusiveGuard<'a> {
    registry: &'a LockRegistry,
    name: String,
    guard: Option<ArcRwLockWriteGuard<RawRwLock, ()>>,
}

impl Drop for ExclusiveGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        self.registry.reclaim(&self.name);
    }
}
