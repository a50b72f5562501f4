//! Error types for the archiver module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Reading the source directory or one of its files failed.
    #[error("Failed to read {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creating or writing the archive file failed.
    #[error("Failed to write archive {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archive encoder rejected an entry.
    #[error("Failed to encode archive {path}: {reason}")]
    EncodingFailed { path: PathBuf, reason: String },

    /// The blocking archive job did not finish.
    #[error("Archive job aborted: {0}")]
    Aborted(String),
}
