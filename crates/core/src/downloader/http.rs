//! HTTP downloader implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::{Client, Url};
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, warn};

use super::error::DownloadError;
use super::traits::Downloader;
use crate::task::{Task, TaskId};

const FALLBACK_FILE_NAME: &str = "unnamed_download";

/// Downloads files with a plain GET request.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: Client,
    download_dir: PathBuf,
}

impl HttpDownloader {
    /// Creates a downloader writing below `download_dir`.
    ///
    /// The client's timeout bounds each download.
    pub fn new(client: Client, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            download_dir: download_dir.into(),
        }
    }

    /// Directory holding the files of one task.
    pub fn task_dir(&self, task_id: TaskId) -> PathBuf {
        self.download_dir.join(Task::download_dir_name(task_id))
    }

    /// Unique on-disk name for a URL: `<uuid>_<last path segment>`.
    fn file_name_for(url: &Url) -> String {
        let base = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_FILE_NAME);

        format!("{}_{}", uuid::Uuid::new_v4(), base)
    }

    async fn write_body(
        mut response: reqwest::Response,
        url: &str,
        path: &Path,
    ) -> Result<u64, DownloadError> {
        let write_err = |source| DownloadError::WriteFailed {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).await.map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        let mut written = 0u64;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| DownloadError::request_failed(url, e))?
        {
            writer.write_all(&chunk).await.map_err(write_err)?;
            written += chunk.len() as u64;
        }

        writer.flush().await.map_err(write_err)?;
        Ok(written)
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download_file(&self, url: &str, task_id: TaskId) -> Result<PathBuf, DownloadError> {
        let parsed = Url::parse(url).map_err(|e| DownloadError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let dir = self.task_dir(task_id);
        fs::create_dir_all(&dir)
            .await
            .map_err(|source| DownloadError::DirectoryCreationFailed {
                path: dir.clone(),
                source,
            })?;

        let response = self
            .client
            .get(parsed.clone())
            .send()
            .await
            .map_err(|e| DownloadError::request_failed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let path = dir.join(Self::file_name_for(&parsed));
        let written = match Self::write_body(response, url, &path).await {
            Ok(written) => written,
            Err(e) => {
                // Only complete downloads may reach the archive.
                if let Err(remove_err) = fs::remove_file(&path).await {
                    if remove_err.kind() != std::io::ErrorKind::NotFound {
                        warn!(task_id, path = %path.display(), error = %remove_err, "Failed to remove partial download");
                    }
                }
                return Err(e);
            }
        };

        debug!(task_id, url, bytes = written, path = %path.display(), "Downloaded file");
        Ok(path)
    }
}
