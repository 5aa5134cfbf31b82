//! Backup system for bundle-backup
//!
//! Zips each configured folder, gathers the archives into one bundle, zips
//! the bundle and gives it a timestamped name.
//!
//! # Architecture
//!
//! - `BackupPipeline`: runs the stages in order over a `BackupConfig`
//! - `archiver`: zip writing and reading
//! - `paths`: splitting source folders into home folder and folder name
//! - `prompt`: the yes/no question gating relocation
//! - `relocate`: moving files and the final rename
//!
//! # Layout
//!
//! For sources `/home/user/Documents/` and `/home/user/Pictures/` and the
//! bundle name `D6-Backup`, a run produces
//! `/home/user/<timestamp>-D6-Backup.zip` holding `Documents.zip` and
//! `Pictures.zip`.
//!
//! # Example
//!
//! ```rust,ignore
//! use bundle_backup::backup::{BackupPipeline, FixedAnswer};
//! use bundle_backup::models::BackupConfig;
//!
//! let config = BackupConfig::new(folders, None, "D6-Backup")?;
//! let report = BackupPipeline::new(config).run(&mut FixedAnswer(false))?;
//! println!("Backup stored at {}", report.bundle_path.display());
//! ```

pub mod archiver;
pub mod paths;
mod pipeline;
pub mod prompt;
pub mod relocate;

pub use archiver::{list_entries, zip_directory, ArchiveEntry, ArchiveSummary};
pub use paths::{derive_home_folder, folder_name, split_source_path};
pub use pipeline::{BackupPipeline, BackupReport, PreflightReport};
pub use prompt::{Confirm, FixedAnswer, LinePrompt};
pub use relocate::Relocation;
