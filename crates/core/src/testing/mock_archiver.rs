//! Mock archiver for testing.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::archiver::{ArchiveError, Archiver};

/// A recorded archive request for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedArchive {
    pub source_dir: PathBuf,
    pub destination: PathBuf,
    pub success: bool,
}

/// Mock implementation of the Archiver trait.
///
/// Writes nothing. Can be told to fail or to panic.
#[derive(Debug, Default)]
pub struct MockArchiver {
    archives: Arc<RwLock<Vec<RecordedArchive>>>,
    fail: Arc<RwLock<bool>>,
    panic: Arc<RwLock<bool>>,
}

impl MockArchiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every archive request fail.
    pub async fn set_fail(&self, fail: bool) {
        *self.fail.write().await = fail;
    }

    /// Make every archive request panic.
    pub async fn set_panic(&self, panic: bool) {
        *self.panic.write().await = panic;
    }

    /// Get all recorded archive requests.
    pub async fn recorded_archives(&self) -> Vec<RecordedArchive> {
        self.archives.read().await.clone()
    }

    pub async fn archive_count(&self) -> usize {
        self.archives.read().await.len()
    }
}

#[async_trait]
impl Archiver for MockArchiver {
    async fn archive_directory(
        &self,
        source_dir: &Path,
        destination: &Path,
    ) -> Result<(), ArchiveError> {
        if *self.panic.read().await {
            panic!("mock archiver panic for {}", destination.display());
        }

        let success = !*self.fail.read().await;
        self.archives.write().await.push(RecordedArchive {
            source_dir: source_dir.to_path_buf(),
            destination: destination.to_path_buf(),
            success,
        });

        if success {
            Ok(())
        } else {
            Err(ArchiveError::Aborted("mock failure".to_string()))
        }
    }
}
