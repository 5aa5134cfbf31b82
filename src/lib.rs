//! bundle-backup - zip a list of folders into one dated backup bundle
//!
//! Each configured folder is archived on its own, the archives are gathered
//! into a bundle folder, and the bundle is archived and given a timestamped
//! name. The finished archive can optionally be moved to a second location
//! after a yes/no confirmation.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Config directory, settings and the folder list loader
//! - `error`: Custom error types
//! - `models`: The configuration, archive record and bundle values
//! - `backup`: The pipeline and its stages
//! - `cli`: Command handlers for the binary
//! - `logging`: tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use bundle_backup::backup::{BackupPipeline, LinePrompt};
//! use bundle_backup::config::{load_backup_config, BackupPaths, ConfigOverrides, Settings};
//!
//! let paths = BackupPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let config = load_backup_config(&paths, &settings, &ConfigOverrides::default())?;
//! BackupPipeline::new(config).run(&mut LinePrompt::stdio())?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;

pub use error::{BackupError, BackupResult};
