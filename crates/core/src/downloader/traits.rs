//! Trait definitions for the downloader module.

use std::path::PathBuf;

use async_trait::async_trait;

use super::error::DownloadError;
use crate::task::TaskId;

/// Fetches one remote file into the directory of the task it belongs to.
///
/// Implementations must create any directories they need and must not share
/// mutable state between concurrent calls: a task's files are downloaded in
/// parallel.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Download `url` for `task_id`. Returns the path of the written file.
    async fn download_file(&self, url: &str, task_id: TaskId) -> Result<PathBuf, DownloadError>;
}
