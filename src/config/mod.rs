//! Configuration module for bundle-backup
//!
//! This module provides configuration management including:
//! - Config directory resolution
//! - User settings persistence
//! - Loading the folder list and destination into a [`BackupConfig`]
//!
//! [`BackupConfig`]: crate::models::BackupConfig

pub mod loader;
pub mod paths;
pub mod settings;

pub use loader::{load_backup_config, parse_destination, parse_folder_list, ConfigOverrides};
pub use paths::BackupPaths;
pub use settings::Settings;
