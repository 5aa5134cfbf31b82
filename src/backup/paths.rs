//! Source path splitting
//!
//! Every source folder is split into the directory that contains it and its
//! trailing segment. The first source's parent becomes the home folder; each
//! source's segment names its archive.
//!
//! Only trailing segments made purely of letters are accepted. Names with
//! digits, spaces or punctuation are rejected rather than guessed at.

use std::path::{Component, Path, PathBuf};

use crate::error::{BackupError, BackupResult};

/// Split an absolute folder path into `(parent, trailing segment)`
///
/// Trailing separators are ignored, so `/home/user/Documents/` and
/// `/home/user/Documents` both split into `/home/user` and `Documents`.
pub fn split_source_path(path: &Path) -> BackupResult<(PathBuf, String)> {
    let shown = path.display().to_string();

    if !path.is_absolute() {
        return Err(BackupError::path_derivation(shown, "path is not absolute"));
    }

    let segment = match path.components().next_back() {
        Some(Component::Normal(name)) => name
            .to_str()
            .ok_or_else(|| BackupError::path_derivation(&shown, "segment is not valid UTF-8"))?,
        _ => {
            return Err(BackupError::path_derivation(
                shown,
                "path has no trailing folder name",
            ))
        }
    };

    if !is_letter_segment(segment) {
        return Err(BackupError::path_derivation(
            shown,
            format!("folder name '{}' must contain only letters", segment),
        ));
    }

    let parent = path
        .parent()
        .ok_or_else(|| BackupError::path_derivation(&shown, "path has no parent folder"))?;

    Ok((parent.to_path_buf(), segment.to_string()))
}

/// Derive the home folder from the first configured source folder
pub fn derive_home_folder(source_folders: &[PathBuf]) -> BackupResult<PathBuf> {
    let first = source_folders.first().ok_or_else(BackupError::no_locations)?;
    split_source_path(first).map(|(home, _)| home)
}

/// The trailing segment of a source folder, used to name its archive
pub fn folder_name(path: &Path) -> BackupResult<String> {
    split_source_path(path).map(|(_, name)| name)
}

fn is_letter_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(char::is_alphabetic)
}
