//! Mock downloader for testing.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::downloader::{DownloadError, Downloader};
use crate::task::{Task, TaskId};

/// A recorded download for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedDownload {
    pub url: String,
    pub task_id: TaskId,
    pub success: bool,
}

/// Mock implementation of the Downloader trait.
///
/// Provides controllable behavior for testing:
/// - Fail or panic for specific URLs
/// - Simulate download time
/// - Track the peak number of concurrent downloads
/// - Optionally write real files so an archiver has something to pack
#[derive(Debug, Default)]
pub struct MockDownloader {
    output_dir: Option<PathBuf>,
    downloads: Arc<RwLock<Vec<RecordedDownload>>>,
    failing: Arc<RwLock<HashSet<String>>>,
    panicking: Arc<RwLock<HashSet<String>>>,
    download_duration_ms: Arc<RwLock<u64>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// Decrements the in-flight counter even if the download panics.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockDownloader {
    /// Create a mock that returns paths without writing anything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that writes each download below `dir/task-<id>/`.
    pub fn with_output_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    /// Make downloads of `url` fail.
    pub async fn fail_url(&self, url: impl Into<String>) {
        self.failing.write().await.insert(url.into());
    }

    /// Make downloads of `url` panic.
    pub async fn panic_on(&self, url: impl Into<String>) {
        self.panicking.write().await.insert(url.into());
    }

    /// Set the simulated download duration.
    pub async fn set_download_duration(&self, duration: Duration) {
        *self.download_duration_ms.write().await = duration.as_millis() as u64;
    }

    /// Get all recorded downloads.
    pub async fn recorded_downloads(&self) -> Vec<RecordedDownload> {
        self.downloads.read().await.clone()
    }

    /// Number of downloads attempted.
    pub async fn download_count(&self) -> usize {
        self.downloads.read().await.len()
    }

    /// Highest number of downloads that ran at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn file_name(url: &str) -> String {
        url.rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("unnamed_download")
            .to_string()
    }
}

#[async_trait]
impl Downloader for MockDownloader {
    async fn download_file(&self, url: &str, task_id: TaskId) -> Result<PathBuf, DownloadError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _in_flight = InFlight(&self.in_flight);

        let duration_ms = *self.download_duration_ms.read().await;
        if duration_ms > 0 {
            tokio::time::sleep(Duration::from_millis(duration_ms)).await;
        }

        if self.panicking.read().await.contains(url) {
            panic!("mock download panic for {}", url);
        }

        let success = !self.failing.read().await.contains(url);
        self.downloads.write().await.push(RecordedDownload {
            url: url.to_string(),
            task_id,
            success,
        });

        if !success {
            return Err(DownloadError::UnexpectedStatus {
                url: url.to_string(),
                status: 500,
            });
        }

        let relative = PathBuf::from(Task::download_dir_name(task_id)).join(Self::file_name(url));
        let Some(root) = &self.output_dir else {
            return Ok(relative);
        };

        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|source| {
                DownloadError::DirectoryCreationFailed {
                    path: parent.to_path_buf(),
                    source,
                }
            })?;
        }
        tokio::fs::write(&path, format!("contents of {}", url))
            .await
            .map_err(|source| DownloadError::WriteFailed {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}
