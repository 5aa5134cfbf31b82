//! Backup bundle model
//!
//! A bundle starts life as a directory under the home folder, is compressed
//! into a sibling archive, and only the archive survives the run.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use super::archive::archive_file_name;

/// Format used to prefix the final archive name; sorts chronologically
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d@%H-%M-%S";

/// The aggregate of all per-folder archives from one run
#[derive(Debug, Clone)]
pub struct BackupBundle {
    /// Transient directory: `<home>/<bundle_name>`
    pub folder_path: PathBuf,

    /// Compressed bundle: `<home>/<bundle_name>.zip`
    pub compressed_path: PathBuf,

    /// Bundle name the paths were built from
    pub name: String,

    /// When the run started; embedded in the final file name
    pub created_at: DateTime<Local>,
}

impl BackupBundle {
    /// Describe the bundle for `home` without touching the filesystem
    pub fn new(home: &Path, name: &str, created_at: DateTime<Local>) -> Self {
        Self {
            folder_path: home.join(name),
            compressed_path: home.join(archive_file_name(name)),
            name: name.to_string(),
            created_at,
        }
    }

    /// Sortable timestamp string for this bundle
    pub fn timestamp(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Final file name: `<timestamp>-<bundle_name>.zip`
    pub fn timestamped_file_name(&self) -> String {
        format!("{}-{}", self.timestamp(), archive_file_name(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bundle_paths() {
        let created_at = Local.with_ymd_and_hms(2025, 3, 7, 14, 5, 9).unwrap();
        let bundle = BackupBundle::new(Path::new("/home/user"), "D6-Backup", created_at);

        assert_eq!(bundle.folder_path, PathBuf::from("/home/user/D6-Backup"));
        assert_eq!(bundle.compressed_path, PathBuf::from("/home/user/D6-Backup.zip"));
        assert_eq!(bundle.timestamp(), "2025-03-07@14-05-09");
        assert_eq!(
            bundle.timestamped_file_name(),
            "2025-03-07@14-05-09-D6-Backup.zip"
        );
    }

    #[test]
    fn test_timestamps_sort_chronologically() {
        let earlier = Local.with_ymd_and_hms(2025, 9, 30, 23, 59, 59).unwrap();
        let later = Local.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        let a = BackupBundle::new(Path::new("/h"), "B", earlier).timestamped_file_name();
        let b = BackupBundle::new(Path::new("/h"), "B", later).timestamped_file_name();
        assert!(a < b);
    }
}
