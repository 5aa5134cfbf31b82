//! Loads a [`BackupConfig`] from the plain-text configuration files
//!
//! `folders.txt` holds one absolute folder path per line; blank lines are
//! ignored. `move_to.txt` holds a single destination line; an empty file
//! means the bundle is never relocated.

use std::fs;
use std::path::{Path, PathBuf};

use super::paths::BackupPaths;
use super::settings::Settings;
use crate::error::{BackupError, BackupResult};
use crate::models::BackupConfig;

/// Overrides supplied on the command line
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub bundle_name: Option<String>,
    pub destination: Option<PathBuf>,
}

/// Parse the contents of `folders.txt`
pub fn parse_folder_list(contents: &str) -> Vec<PathBuf> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Parse the contents of `move_to.txt`
pub fn parse_destination(contents: &str) -> Option<PathBuf> {
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

/// Build the configuration for one run
///
/// Destination precedence: command line, then `destination_override` from
/// settings, then `move_to.txt`.
pub fn load_backup_config(
    paths: &BackupPaths,
    settings: &Settings,
    overrides: &ConfigOverrides,
) -> BackupResult<BackupConfig> {
    let folders = read_text(&paths.folders_file(), true)?;
    let source_folders = parse_folder_list(&folders);

    let destination = match overrides
        .destination
        .clone()
        .or_else(|| settings.destination_override.clone())
    {
        Some(dest) => Some(dest),
        None => parse_destination(&read_text(&paths.move_to_file(), false)?),
    };

    let bundle_name = overrides
        .bundle_name
        .clone()
        .unwrap_or_else(|| settings.bundle_name.clone());

    BackupConfig::new(source_folders, destination, bundle_name)
}

fn read_text(path: &Path, required: bool) -> BackupResult<String> {
    if !path.exists() {
        if required {
            return Err(BackupError::Config(format!(
                "{} not found; run 'bundle-backup init' and list the folders to back up",
                path.display()
            )));
        }
        return Ok(String::new());
    }

    fs::read_to_string(path)
        .map_err(|e| BackupError::Io(format!("Failed to read {}: {}", path.display(), e)))
}
