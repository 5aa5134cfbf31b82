//! The backup pipeline
//!
//! Runs the stages of a backup strictly in order:
//!
//! 1. validate the configuration
//! 2. derive the home folder from the first source
//! 3. zip every source folder into the home folder
//! 4. create the bundle folder
//! 5. move the per-folder archives into it
//! 6. zip the bundle folder
//! 7. remove the uncompressed bundle folder
//! 8. rename (and optionally relocate) the bundle archive
//!
//! The first failing stage ends the run. Nothing is rolled back: archives
//! already written or moved stay where they are.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{info, info_span};

use super::archiver::zip_directory;
use super::paths::{derive_home_folder, folder_name};
use super::prompt::Confirm;
use super::relocate::{move_file, relocate_bundle, Relocation};
use crate::error::{BackupError, BackupResult};
use crate::models::{ArchiveRecord, BackupBundle, BackupConfig};

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct BackupReport {
    pub home_folder: PathBuf,
    pub archives: Vec<ArchiveRecord>,
    pub bundle_path: PathBuf,
    pub relocated: bool,
}

/// Result of checking a configuration without changing anything
#[derive(Debug, Clone)]
pub struct PreflightReport {
    pub home_folder: PathBuf,
    /// `(source, archive name)` for every configured folder
    pub sources: Vec<(PathBuf, String)>,
    /// A stale bundle folder or archive that would block a run
    pub stale_bundle: Option<PathBuf>,
}

/// Orchestrates one backup run over an explicit configuration
pub struct BackupPipeline {
    config: BackupConfig,
}

impl BackupPipeline {
    /// Create a new BackupPipeline
    pub fn new(config: BackupConfig) -> Self {
        Self { config }
    }

    /// The configuration this pipeline runs with
    pub fn config(&self) -> &BackupConfig {
        &self.config
    }

    /// Run every stage, timestamping the bundle with the current local time
    pub fn run(&self, prompt: &mut dyn Confirm) -> BackupResult<BackupReport> {
        self.run_at(prompt, Local::now())
    }

    /// Run every stage with an explicit bundle timestamp
    pub fn run_at(
        &self,
        prompt: &mut dyn Confirm,
        now: DateTime<Local>,
    ) -> BackupResult<BackupReport> {
        let span = info_span!("backup", bundle = %self.config.bundle_name);
        let _guard = span.enter();

        self.validate_configuration()?;
        let home = self.derive_home_folder()?;
        let bundle = BackupBundle::new(&home, &self.config.bundle_name, now);

        // Leftovers of an earlier run must survive: stop before writing anything
        if let Some(path) = stale_bundle(&bundle) {
            return Err(BackupError::BundleAlreadyExists { path });
        }

        let archives = self.archive_locations(&home)?;
        self.create_bundle_folder(&bundle)?;
        self.move_archives_into_bundle(&archives, &home, &bundle)?;
        self.compress_bundle_folder(&bundle)?;
        self.remove_uncompressed_bundle(&bundle)?;

        let Relocation { path, relocated } = self.relocate_bundle(&bundle, prompt)?;

        Ok(BackupReport {
            home_folder: home,
            archives,
            bundle_path: path,
            relocated,
        })
    }

    /// Fail with a configuration error if no source folders are listed
    ///
    /// `BackupConfig::new` already drops blank entries, but the fields are
    /// public, so a config built as a struct literal is filtered here too.
    pub fn validate_configuration(&self) -> BackupResult<()> {
        let any = self
            .config
            .source_folders
            .iter()
            .any(|p| !p.as_os_str().to_string_lossy().trim().is_empty());

        if any {
            Ok(())
        } else {
            Err(BackupError::no_locations())
        }
    }

    /// The parent of the first source folder
    pub fn derive_home_folder(&self) -> BackupResult<PathBuf> {
        derive_home_folder(&self.config.source_folders)
    }

    /// Zip each source folder into `home/<folder name>.zip`, in order
    pub fn archive_locations(&self, home: &Path) -> BackupResult<Vec<ArchiveRecord>> {
        let mut records = Vec::with_capacity(self.config.source_folders.len());
        let mut seen = HashSet::new();

        for source in &self.config.source_folders {
            let name = folder_name(source)?;
            let record = ArchiveRecord::new(source, &name);

            if !seen.insert(record.archive_file_name.clone()) {
                return Err(BackupError::DuplicateArchive {
                    name: record.archive_file_name,
                    source_path: source.clone(),
                });
            }

            info!("Zipping {}...", source.display());
            let summary = zip_directory(source, &record.path_in(home))?;
            info!(
                files = summary.files,
                bytes = summary.bytes,
                "Zipped {}",
                record.archive_file_name
            );

            records.push(record);
        }

        Ok(records)
    }

    /// Create the empty bundle folder, refusing to reuse a stale one
    pub fn create_bundle_folder(&self, bundle: &BackupBundle) -> BackupResult<()> {
        // An un-renamed archive from an earlier run blocks compression
        if bundle.compressed_path.exists() {
            return Err(BackupError::BundleAlreadyExists {
                path: bundle.compressed_path.clone(),
            });
        }

        match fs::create_dir(&bundle.folder_path) {
            Ok(()) => {
                info!("Created {}", bundle.folder_path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(BackupError::BundleAlreadyExists {
                    path: bundle.folder_path.clone(),
                })
            }
            Err(e) => Err(BackupError::Io(format!(
                "Failed to create {}: {}",
                bundle.folder_path.display(),
                e
            ))),
        }
    }

    /// Move every per-folder archive from `home` into the bundle folder
    pub fn move_archives_into_bundle(
        &self,
        records: &[ArchiveRecord],
        home: &Path,
        bundle: &BackupBundle,
    ) -> BackupResult<()> {
        for record in records {
            let from = record.path_in(home);
            if !from.is_file() {
                return Err(BackupError::ArchiveMissing { path: from });
            }

            info!("Moving {}...", record.archive_file_name);
            move_file(&from, &record.path_in(&bundle.folder_path))?;
        }
        Ok(())
    }

    /// Zip the bundle folder into `home/<bundle name>.zip`
    pub fn compress_bundle_folder(&self, bundle: &BackupBundle) -> BackupResult<PathBuf> {
        info!("Zipping {}...", bundle.name);
        zip_directory(&bundle.folder_path, &bundle.compressed_path)?;
        Ok(bundle.compressed_path.clone())
    }

    /// Delete the uncompressed bundle folder and everything in it
    pub fn remove_uncompressed_bundle(&self, bundle: &BackupBundle) -> BackupResult<()> {
        info!("Removing unzipped backup folder...");
        fs::remove_dir_all(&bundle.folder_path).map_err(|e| {
            BackupError::Io(format!(
                "Failed to remove {}: {}",
                bundle.folder_path.display(),
                e
            ))
        })
    }

    /// Give the bundle its timestamped name, asking before relocating it
    pub fn relocate_bundle(
        &self,
        bundle: &BackupBundle,
        prompt: &mut dyn Confirm,
    ) -> BackupResult<Relocation> {
        relocate_bundle(bundle, self.config.destination.as_deref(), prompt)
    }

    /// Check everything a run depends on without writing anything
    pub fn preflight(&self) -> BackupResult<PreflightReport> {
        self.validate_configuration()?;
        let home = self.derive_home_folder()?;

        let mut sources = Vec::with_capacity(self.config.source_folders.len());
        for source in &self.config.source_folders {
            let name = folder_name(source)?;
            fs::read_dir(source).map_err(|e| BackupError::source_unavailable(source, e))?;
            sources.push((source.clone(), ArchiveRecord::new(source, &name).archive_file_name));
        }

        let bundle = BackupBundle::new(&home, &self.config.bundle_name, Local::now());

        Ok(PreflightReport {
            home_folder: home,
            sources,
            stale_bundle: stale_bundle(&bundle),
        })
    }
}

/// A bundle folder or un-renamed bundle archive left by an earlier run
fn stale_bundle(bundle: &BackupBundle) -> Option<PathBuf> {
    [&bundle.folder_path, &bundle.compressed_path]
        .into_iter()
        .find(|p| p.exists())
        .cloned()
}
