//! Core task data types.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a task. Assigned monotonically, never reused within a process.
pub type TaskId = u64;

/// Lifecycle of a task. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created and collecting files.
    Accepted,
    /// Picked up by a worker; downloads are running.
    InProgress,
    /// Downloads settled and archiving attempted.
    Completed,
}

impl TaskStatus {
    /// Returns the status name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Accepted => "accepted",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Returns true if moving from `self` to `next` is a legal single step.
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        matches!(
            (self, next),
            (TaskStatus::Accepted, TaskStatus::InProgress)
                | (TaskStatus::InProgress, TaskStatus::Completed)
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single file reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Passed validation, waiting for download.
    Accepted,
    /// Downloaded into the task directory.
    Completed,
    /// Download failed.
    Failed,
    /// URL could not be parsed as an absolute http(s) URL.
    InvalidUrl,
    /// Reachability probe did not answer with a 2xx status.
    NotReachable,
    /// Extension is not in the allowed set.
    NotSupportedType,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Accepted => "accepted",
            FileStatus::Completed => "completed",
            FileStatus::Failed => "failed",
            FileStatus::InvalidUrl => "invalid_url",
            FileStatus::NotReachable => "not_reachable",
            FileStatus::NotSupportedType => "not_supported_type",
        }
    }

    /// Returns true if the file is waiting to be downloaded.
    pub fn is_pending(&self) -> bool {
        matches!(self, FileStatus::Accepted)
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One download reference within a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub status: FileStatus,
    pub url: String,
}

impl File {
    pub fn new(url: impl Into<String>, status: FileStatus) -> Self {
        Self {
            status,
            url: url.into(),
        }
    }
}

/// A batch of remote files that ends up in one archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub status: TaskStatus,
    /// Files in attach order.
    pub files: Vec<File>,
    /// Where the archive is written.
    pub archive_path: PathBuf,
    /// Where clients fetch the archive once the task is completed.
    pub archive_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a fresh accepted task with room for `max_files` files.
    pub fn new(
        id: TaskId,
        max_files: usize,
        archive_path: PathBuf,
        archive_url: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: TaskStatus::Accepted,
            files: Vec::with_capacity(max_files),
            archive_path,
            archive_url: archive_url.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// File name of the archive for a task id.
    pub fn archive_file_name(id: TaskId) -> String {
        format!("task-{}.zip", id)
    }

    /// Name of the per-task download directory.
    pub fn download_dir_name(id: TaskId) -> String {
        format!("task-{}", id)
    }

    /// Parse a task id back out of an archive file name (`task-<id>.zip`).
    pub fn id_from_archive_file_name(name: &str) -> Option<TaskId> {
        name.strip_prefix("task-")?
            .strip_suffix(".zip")?
            .parse()
            .ok()
    }

    /// Number of files that are still waiting for download.
    pub fn pending_files(&self) -> usize {
        self.files.iter().filter(|f| f.status.is_pending()).count()
    }

    /// Move to `next` if the transition is legal. Returns false otherwise.
    pub fn advance(&mut self, next: TaskStatus) -> bool {
        if !self.status.can_transition_to(next) {
            return false;
        }
        self.status = next;
        self.updated_at = Utc::now();
        true
    }
}
