//! In-memory task store. Task state lives for the process lifetime only.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{Task, TaskId, TaskStore, TaskStoreError};

/// Task store backed by a `HashMap` behind a `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: RwLock<HashMap<TaskId, Task>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tasks.
    pub fn len(&self) -> usize {
        self.tasks.read().map(|tasks| tasks.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TaskStore for InMemoryTaskStore {
    fn save(&self, task: Task) -> Result<(), TaskStoreError> {
        let mut tasks = self
            .tasks
            .write()
            .map_err(|e| TaskStoreError::Backend(e.to_string()))?;
        tasks.insert(task.id, task);
        Ok(())
    }

    fn get(&self, id: TaskId) -> Result<Task, TaskStoreError> {
        let tasks = self
            .tasks
            .read()
            .map_err(|e| TaskStoreError::Backend(e.to_string()))?;
        tasks.get(&id).cloned().ok_or(TaskStoreError::NotFound(id))
    }
}
