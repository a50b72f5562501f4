//! Trait definitions for the archiver module.

use std::path::Path;

use async_trait::async_trait;

use super::error::ArchiveError;

/// Packages the files of a directory into one archive.
#[async_trait]
pub trait Archiver: Send + Sync {
    /// Archive every regular file in `source_dir` into `destination`.
    async fn archive_directory(
        &self,
        source_dir: &Path,
        destination: &Path,
    ) -> Result<(), ArchiveError>;
}
