//! Backup configuration model
//!
//! An explicit value handed to the pipeline at construction time. Loading it
//! from disk is the job of [`crate::config::loader`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{BackupError, BackupResult};

/// Everything one backup run needs to know
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Folders to archive, in the order they were configured
    pub source_folders: Vec<PathBuf>,

    /// Where to offer to move the finished bundle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,

    /// Name of the bundle folder and archive
    pub bundle_name: String,
}

impl BackupConfig {
    /// Create a new configuration
    ///
    /// Blank source entries are dropped and an empty destination is treated
    /// as no destination. The folder list itself is checked later by the
    /// pipeline so that an empty list fails as the first stage of a run.
    pub fn new(
        source_folders: Vec<PathBuf>,
        destination: Option<PathBuf>,
        bundle_name: impl Into<String>,
    ) -> BackupResult<Self> {
        let bundle_name = bundle_name.into();
        validate_bundle_name(&bundle_name)?;

        let source_folders = source_folders
            .into_iter()
            .filter(|p| !p.as_os_str().to_string_lossy().trim().is_empty())
            .collect();
        let destination = destination.filter(|p| !p.as_os_str().is_empty());

        Ok(Self {
            source_folders,
            destination,
            bundle_name,
        })
    }

    /// Whether the run will ask about relocating the bundle
    pub fn has_destination(&self) -> bool {
        self.destination.is_some()
    }
}

/// The bundle name becomes a file name, so it must be one plain segment
fn validate_bundle_name(name: &str) -> BackupResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BackupError::Config("bundle name must not be empty".into()));
    }
    if trimmed != name || trimmed == "." || trimmed == ".." {
        return Err(BackupError::Config(format!(
            "invalid bundle name '{}'",
            name
        )));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(BackupError::Config(format!(
            "bundle name '{}' must not contain path separators",
            name
        )));
    }
    Ok(())
}
