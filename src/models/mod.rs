//! Core data models for bundle-backup
//!
//! This module contains the values that flow through one backup run: the
//! configuration, one record per archived folder, and the bundle itself.

pub mod archive;
pub mod backup_config;
pub mod bundle;

pub use archive::{ArchiveRecord, ARCHIVE_EXTENSION};
pub use backup_config::BackupConfig;
pub use bundle::BackupBundle;
