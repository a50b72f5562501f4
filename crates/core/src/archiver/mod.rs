//! Archiver module for packaging a task's downloads into a single archive.

mod error;
mod traits;
mod zip_archiver;

pub use error::ArchiveError;
pub use traits::Archiver;
pub use zip_archiver::ZipArchiver;
