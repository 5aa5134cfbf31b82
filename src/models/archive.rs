//! Per-folder archive record

use std::path::{Path, PathBuf};

/// Extension shared by every archive the pipeline writes
pub const ARCHIVE_EXTENSION: &str = "zip";

/// One archived source folder
///
/// Records live only for the duration of a run: the archive stage produces
/// them and the collection stage consumes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRecord {
    /// The folder that was archived
    pub source_path: PathBuf,

    /// File name of the archive, e.g. `Documents.zip`
    pub archive_file_name: String,
}

impl ArchiveRecord {
    /// Create a record for a folder whose trailing segment is `folder_name`
    pub fn new(source_path: impl Into<PathBuf>, folder_name: &str) -> Self {
        Self {
            source_path: source_path.into(),
            archive_file_name: archive_file_name(folder_name),
        }
    }

    /// Where this archive sits inside `dir`
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.archive_file_name)
    }
}

/// Append the archive extension to a base name
pub fn archive_file_name(base: &str) -> String {
    format!("{}.{}", base, ARCHIVE_EXTENSION)
}
