//! Path management for bundle-backup
//!
//! Resolves where the folder list, destination file and settings live.
//!
//! ## Path Resolution Order
//!
//! 1. An explicit directory (the `--config-dir` flag)
//! 2. `BUNDLE_BACKUP_DIR` environment variable (if set)
//! 3. The platform config directory (`~/.config/bundle-backup` on Linux)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::BackupError;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "BUNDLE_BACKUP_DIR";

/// Manages all paths used by bundle-backup
#[derive(Debug, Clone)]
pub struct BackupPaths {
    /// Base directory holding the configuration files
    base_dir: PathBuf,
}

impl BackupPaths {
    /// Create a new BackupPaths instance from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no platform config directory can be determined.
    pub fn new() -> Result<Self, BackupError> {
        let base_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Resolve paths, preferring an explicit directory when one is given
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, BackupError> {
        match explicit {
            Some(dir) => Ok(Self::with_base_dir(dir.to_path_buf())),
            None => Self::new(),
        }
    }

    /// Create BackupPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the list of folders to back up
    pub fn folders_file(&self) -> PathBuf {
        self.base_dir.join("folders.txt")
    }

    /// Get the path to the optional relocation destination
    pub fn move_to_file(&self) -> PathBuf {
        self.base_dir.join("move_to.txt")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), BackupError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BackupError::Io(format!("Failed to create config directory: {}", e)))
    }

    /// Check if the folder list has been created
    pub fn is_initialized(&self) -> bool {
        self.folders_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, BackupError> {
    ProjectDirs::from("", "", "bundle-backup")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| BackupError::Config("Could not determine a config directory".into()))
}
