//! Orchestrator result and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::task::{FileStatus, TaskId, TaskStatus, TaskStoreError};

/// Errors that abort an orchestrator call.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("too many active tasks (max {max})")]
    AdmissionRejected { max: u64 },

    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("task {task_id} already holds {max} files")]
    FileLimitExceeded { task_id: TaskId, max: usize },

    #[error("task {task_id} cannot be processed in status {status}")]
    AlreadyProcessed { task_id: TaskId, status: TaskStatus },

    #[error("archive for task {0} is not ready")]
    ArchiveNotReady(TaskId),

    #[error("work queue is closed, task {0} was not queued")]
    QueueClosed(TaskId),

    #[error(transparent)]
    Store(TaskStoreError),
}

impl From<TaskStoreError> for OrchestratorError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::NotFound(id) => OrchestratorError::TaskNotFound(id),
            other => OrchestratorError::Store(other),
        }
    }
}

/// Why a file was refused at attach time. The file is still recorded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FileRejection {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("url is not reachable: {0}")]
    NotReachable(String),
}

impl FileRejection {
    /// Terminal file status recorded for this rejection.
    pub fn status(&self) -> FileStatus {
        match self {
            FileRejection::InvalidUrl(_) => FileStatus::InvalidUrl,
            FileRejection::UnsupportedType(_) => FileStatus::NotSupportedType,
            FileRejection::NotReachable(_) => FileStatus::NotReachable,
        }
    }
}

/// Outcome of attaching one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedFile {
    pub status: FileStatus,
    pub rejection: Option<FileRejection>,
    /// True if this attachment filled the task and queued it for processing.
    pub queued: bool,
}

/// Client view of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusView {
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_url: Option<String>,
}

/// What happened while processing one task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    pub downloaded: usize,
    pub failed: usize,
    /// Files rejected at attach time and left untouched.
    pub skipped: usize,
    pub archived: bool,
}
