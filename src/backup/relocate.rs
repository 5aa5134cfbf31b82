//! Moving files and relocating the finished bundle

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::prompt::Confirm;
use crate::error::{BackupError, BackupResult};
use crate::models::BackupBundle;

/// Where the bundle ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    /// Final path of the timestamped archive
    pub path: PathBuf,
    /// Whether it was moved to the configured destination
    pub relocated: bool,
}

/// Move a file, refusing to replace an existing one
///
/// Falls back to copy-then-delete when a plain rename fails, which is what
/// happens when `to` is on another filesystem.
pub fn move_file(from: &Path, to: &Path) -> BackupResult<()> {
    if to.exists() {
        return Err(BackupError::Io(format!(
            "Refusing to overwrite {}",
            to.display()
        )));
    }

    if let Err(rename_err) = fs::rename(from, to) {
        debug!(error = %rename_err, "rename failed, copying instead");
        fs::copy(from, to).map_err(|e| {
            BackupError::Io(format!(
                "Failed to move {} to {}: {} ({})",
                from.display(),
                to.display(),
                rename_err,
                e
            ))
        })?;
        fs::remove_file(from).map_err(|e| {
            BackupError::Io(format!("Failed to remove {}: {}", from.display(), e))
        })?;
    }

    Ok(())
}

/// Give the compressed bundle its timestamped name, optionally elsewhere
///
/// With no destination the archive is renamed in place. With a destination
/// the operator is asked first; on "no" the archive is renamed in place and
/// the destination is not touched.
pub fn relocate_bundle(
    bundle: &BackupBundle,
    destination: Option<&Path>,
    prompt: &mut dyn Confirm,
) -> BackupResult<Relocation> {
    let home = bundle.compressed_path.parent().ok_or_else(|| {
        BackupError::Io(format!(
            "{} has no parent folder",
            bundle.compressed_path.display()
        ))
    })?;

    let target_dir = match destination {
        Some(dest) => {
            let question = format!("Would you like to move this Backup to '{}'?", dest.display());
            if prompt.confirm(&question)? {
                if !dest.is_dir() {
                    return Err(BackupError::Io(format!(
                        "Destination {} is not a directory",
                        dest.display()
                    )));
                }
                Some(dest)
            } else {
                None
            }
        }
        None => None,
    };

    let relocated = target_dir.is_some();
    let path = target_dir
        .unwrap_or(home)
        .join(bundle.timestamped_file_name());

    move_file(&bundle.compressed_path, &path)?;
    info!(path = %path.display(), relocated, "bundle stored");

    Ok(Relocation { path, relocated })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::prompt::FixedAnswer;
    use chrono::{Local, TimeZone};
    use tempfile::TempDir;

    fn bundle_in(home: &Path) -> BackupBundle {
        let created_at = Local.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let bundle = BackupBundle::new(home, "D6-Backup", created_at);
        fs::write(&bundle.compressed_path, b"zip").unwrap();
        bundle
    }

    #[test]
    fn test_rename_in_place_without_destination() {
        let home = TempDir::new().unwrap();
        let bundle = bundle_in(home.path());

        let result = relocate_bundle(&bundle, None, &mut FixedAnswer(true)).unwrap();

        assert!(!result.relocated);
        assert_eq!(
            result.path,
            home.path().join("2025-01-02@03-04-05-D6-Backup.zip")
        );
        assert!(result.path.exists());
        assert!(!bundle.compressed_path.exists());
    }

    #[test]
    fn test_declined_leaves_destination_untouched() {
        let home = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let bundle = bundle_in(home.path());

        let result =
            relocate_bundle(&bundle, Some(dest.path()), &mut FixedAnswer(false)).unwrap();

        assert!(!result.relocated);
        assert_eq!(result.path.parent().unwrap(), home.path());
        assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_confirmed_moves_to_destination() {
        let home = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let bundle = bundle_in(home.path());

        let result = relocate_bundle(&bundle, Some(dest.path()), &mut FixedAnswer(true)).unwrap();

        assert!(result.relocated);
        assert_eq!(
            result.path,
            dest.path().join("2025-01-02@03-04-05-D6-Backup.zip")
        );
        assert_eq!(fs::read(&result.path).unwrap(), b"zip");
        assert!(!bundle.compressed_path.exists());
    }

    #[test]
    fn test_confirmed_missing_destination_fails() {
        let home = TempDir::new().unwrap();
        let bundle = bundle_in(home.path());
        let missing = home.path().join("nowhere");

        let err = relocate_bundle(&bundle, Some(&missing), &mut FixedAnswer(true)).unwrap_err();

        assert!(matches!(err, BackupError::Io(_)));
        assert!(bundle.compressed_path.exists());
    }

    #[test]
    fn test_move_file_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("a");
        let to = dir.path().join("b");
        fs::write(&from, b"new").unwrap();
        fs::write(&to, b"old").unwrap();

        assert!(move_file(&from, &to).is_err());
        assert_eq!(fs::read(&to).unwrap(), b"old");
        assert!(from.exists());
    }
}
