//! Custom error types for bundle-backup
//!
//! This module defines the error hierarchy for the backup pipeline using
//! thiserror. Every variant is fatal: the pipeline stops on the first error
//! and leaves the filesystem as it is for the operator to inspect.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for backup operations
#[derive(Error, Debug)]
pub enum BackupError {
    /// Configuration-related errors (including an empty folder list)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The home folder could not be derived from a source path
    #[error("Cannot derive folder name from '{path}': {reason}")]
    PathDerivation { path: String, reason: String },

    /// A configured source folder is missing or unreadable
    #[error("Source folder unavailable: {path}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    /// A stale bundle folder from an earlier run is still present
    #[error("The backup folder '{}' already exists", path.display())]
    BundleAlreadyExists { path: PathBuf },

    /// An archive produced earlier in the run has disappeared
    #[error("Archive missing: {}", path.display())]
    ArchiveMissing { path: PathBuf },

    /// Two source folders would produce the same archive name
    #[error("Duplicate archive name '{name}' (from {})", source_path.display())]
    DuplicateArchive { name: String, source_path: PathBuf },

    /// Zip reading/writing errors
    #[error("Archive error: {0}")]
    Archive(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Prompt errors (stdin closed, terminal unavailable)
    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl BackupError {
    /// The error raised when no source folders survive blank stripping
    pub fn no_locations() -> Self {
        Self::Config("no backup locations specified".into())
    }

    /// Create a path derivation error
    pub fn path_derivation(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PathDerivation {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a source unavailable error
    pub fn source_unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a stale bundle folder error
    pub fn is_bundle_exists(&self) -> bool {
        matches!(self, Self::BundleAlreadyExists { .. })
    }

    /// Check if this is a source unavailable error
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for BackupError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BackupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<zip::result::ZipError> for BackupError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}

impl From<walkdir::Error> for BackupError {
    fn from(err: walkdir::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for backup operations
pub type BackupResult<T> = Result<T, BackupError>;
