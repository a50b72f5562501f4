//! Downloader module for fetching remote files into a task's directory.
//!
//! The orchestrator only depends on the [`Downloader`] trait. [`HttpDownloader`]
//! is the production implementation: it streams the response body of a GET
//! request to `<download_dir>/task-<id>/<uuid>_<name>`.

mod error;
mod http;
mod traits;

pub use error::DownloadError;
pub use http::HttpDownloader;
pub use traits::Downloader;
