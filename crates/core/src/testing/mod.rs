//! Testing utilities and mock collaborators.
//!
//! The mocks never touch the network. They record what they were asked to do
//! and can be told to fail, stall, or panic for specific URLs.
//!
//! # Example
//!
//! ```rust,ignore
//! use zipper_core::testing::{MockArchiver, MockDownloader, MockUrlValidator};
//!
//! let downloader = MockDownloader::new();
//! downloader.fail_url("https://example.com/broken.pdf").await;
//!
//! let validator = MockUrlValidator::new();
//! validator.set_unreachable("https://example.com/gone.pdf").await;
//! ```

mod mock_archiver;
mod mock_downloader;
mod mock_validator;

pub use mock_archiver::{MockArchiver, RecordedArchive};
pub use mock_downloader::{MockDownloader, RecordedDownload};
pub use mock_validator::MockUrlValidator;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::config::Config;

    /// URL of a file that passes syntactic validation.
    pub fn file_url(name: &str) -> String {
        format!("https://files.example.com/{}", name)
    }

    /// Configuration rooted in `root`, with the given limits.
    pub fn config_in(
        root: &std::path::Path,
        max_active_tasks: u64,
        max_files_per_task: usize,
    ) -> Config {
        let mut config = Config::default();
        config.tasks.max_active_tasks = max_active_tasks;
        config.tasks.max_files_per_task = max_files_per_task;
        config.storage.download_dir = root.join("downloads");
        config.storage.archive_dir = root.join("archives");
        config
    }
}
