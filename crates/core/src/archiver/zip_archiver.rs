//! Zip archiver implementation.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::error::ArchiveError;
use super::traits::Archiver;

/// Writes deflate-compressed zip archives.
///
/// Only the top level regular files of the source directory are packed, in
/// file name order. A missing source directory produces an empty archive so a
/// task whose downloads all failed still gets a fetchable result.
#[derive(Debug, Clone, Default)]
pub struct ZipArchiver;

impl ZipArchiver {
    pub fn new() -> Self {
        Self
    }

    fn collect_files(source_dir: &Path) -> Result<Vec<PathBuf>, ArchiveError> {
        let read_err = |source| ArchiveError::ReadFailed {
            path: source_dir.to_path_buf(),
            source,
        };

        let entries = match fs::read_dir(source_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(read_err(e)),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(read_err)?;
            let file_type = entry.file_type().map_err(read_err)?;
            if file_type.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    fn write_archive(source_dir: &Path, destination: &Path) -> Result<usize, ArchiveError> {
        let files = Self::collect_files(source_dir)?;

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ArchiveError::WriteFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        Self::pack_files(&files, destination)?;
        Ok(files.len())
    }

    /// Pack `files` into `destination` through a `.zip.part` file that is
    /// renamed on success and removed on any failure.
    fn pack_files(files: &[PathBuf], destination: &Path) -> Result<(), ArchiveError> {
        let partial = destination.with_extension("zip.part");

        let result = Self::write_entries(files, &partial, destination).and_then(|()| {
            fs::rename(&partial, destination).map_err(|source| ArchiveError::WriteFailed {
                path: destination.to_path_buf(),
                source,
            })
        });

        if result.is_err() {
            if let Err(e) = fs::remove_file(&partial) {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!(path = %partial.display(), error = %e, "Failed to remove partial archive");
                }
            }
        }
        result
    }

    fn write_entries(
        files: &[PathBuf],
        partial: &Path,
        destination: &Path,
    ) -> Result<(), ArchiveError> {
        let write_err = |source| ArchiveError::WriteFailed {
            path: partial.to_path_buf(),
            source,
        };
        let encode_err = |e: zip::result::ZipError| ArchiveError::EncodingFailed {
            path: destination.to_path_buf(),
            reason: e.to_string(),
        };

        let out = File::create(partial).map_err(write_err)?;
        let mut zip = ZipWriter::new(BufWriter::new(out));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for path in files {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            zip.start_file(name, options).map_err(encode_err)?;

            let mut input = File::open(path).map_err(|source| ArchiveError::ReadFailed {
                path: path.clone(),
                source,
            })?;
            io::copy(&mut input, &mut zip).map_err(write_err)?;
        }

        let mut writer = zip.finish().map_err(encode_err)?;
        writer.flush().map_err(write_err)?;
        Ok(())
    }
}

#[async_trait]
impl Archiver for ZipArchiver {
    async fn archive_directory(
        &self,
        source_dir: &Path,
        destination: &Path,
    ) -> Result<(), ArchiveError> {
        let source = source_dir.to_path_buf();
        let dest = destination.to_path_buf();

        let entries = tokio::task::spawn_blocking(move || Self::write_archive(&source, &dest))
            .await
            .map_err(|e| ArchiveError::Aborted(e.to_string()))??;

        debug!(
            source = %source_dir.display(),
            destination = %destination.display(),
            entries,
            "Archive written"
        );
        Ok(())
    }
}
