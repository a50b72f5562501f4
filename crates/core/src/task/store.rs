//! Task storage trait and errors.

use thiserror::Error;

use super::{Task, TaskId};

/// Error type for task storage operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskStoreError {
    /// No task with this id has been saved.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Backend failure.
    #[error("task storage error: {0}")]
    Backend(String),
}

/// Keyed storage for task records.
///
/// Implementations only need `save` and `get` to be individually atomic;
/// ordering between concurrent mutators of one task is the orchestrator's job.
pub trait TaskStore: Send + Sync {
    /// Insert or replace a task by id.
    fn save(&self, task: Task) -> Result<(), TaskStoreError>;

    /// Get a snapshot of a task by id.
    fn get(&self, id: TaskId) -> Result<Task, TaskStoreError>;
}
