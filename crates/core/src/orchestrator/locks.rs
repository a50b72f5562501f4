//! Per-task lock registry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Mutex as AsyncMutex;

use crate::task::TaskId;

/// Hands out one async mutex per task id.
///
/// Two callers asking for the same id get the same lock instance for as long
/// as the entry exists. The registry's own mutex only guards the map and is
/// never held while a task lock is awaited. Entries are evicted once their
/// task completes, so the map only holds tasks that can still change.
#[derive(Debug, Default)]
pub struct TaskLocks {
    locks: Mutex<HashMap<TaskId, Arc<AsyncMutex<()>>>>,
}

impl TaskLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for `id`, creating it on first use.
    pub fn lock_for(&self, id: TaskId) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(id).or_default())
    }

    /// Drop the registry entry for `id`.
    ///
    /// Holders of the old lock keep it; later callers get a fresh one.
    pub fn evict(&self, id: TaskId) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.remove(&id);
    }

    /// Number of ids with a live entry.
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
