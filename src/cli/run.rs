//! Run and check commands
//!
//! `run` executes the whole pipeline; `check` performs the same validation
//! without writing anything.

use std::path::PathBuf;

use clap::Args;

use crate::backup::{BackupPipeline, Confirm, FixedAnswer, LinePrompt};
use crate::config::{load_backup_config, BackupPaths, ConfigOverrides, Settings};
use crate::error::{BackupError, BackupResult};

/// Options shared by `run` and `check`
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// Name of the bundle folder and archive
    #[arg(short, long)]
    pub bundle_name: Option<String>,

    /// Offer to move the finished bundle here instead of the configured destination
    #[arg(short, long)]
    pub destination: Option<PathBuf>,
}

impl ConfigArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bundle_name: self.bundle_name.clone(),
            destination: self.destination.clone(),
        }
    }
}

/// Options for a backup run
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Move the bundle to the destination without asking
    #[arg(short, long, conflicts_with = "no")]
    pub yes: bool,

    /// Keep the bundle in the home folder without asking
    #[arg(short, long)]
    pub no: bool,
}

impl RunArgs {
    fn prompt(&self) -> Box<dyn Confirm> {
        if self.yes {
            Box::new(FixedAnswer(true))
        } else if self.no {
            Box::new(FixedAnswer(false))
        } else {
            Box::new(LinePrompt::stdio())
        }
    }
}

/// Handle the run command
pub fn handle_run_command(
    paths: &BackupPaths,
    settings: &Settings,
    args: RunArgs,
) -> BackupResult<()> {
    let config = load_backup_config(paths, settings, &args.config.overrides())?;
    let pipeline = BackupPipeline::new(config);

    println!("Starting backup...");
    println!();

    let mut prompt = args.prompt();
    let report = pipeline.run(prompt.as_mut())?;

    println!();
    println!("Archived {} folder(s):", report.archives.len());
    for record in &report.archives {
        println!(
            "  {} -> {}",
            record.source_path.display(),
            record.archive_file_name
        );
    }
    println!("Backup: {}", report.bundle_path.display());
    if report.relocated {
        println!("(moved to the configured destination)");
    }
    println!();
    println!("Backup Completed!");

    Ok(())
}

/// Handle the check command
pub fn handle_check_command(
    paths: &BackupPaths,
    settings: &Settings,
    args: ConfigArgs,
) -> BackupResult<()> {
    let config = load_backup_config(paths, settings, &args.overrides())?;
    let pipeline = BackupPipeline::new(config);
    let report = pipeline.preflight()?;
    let config = pipeline.config();

    println!("Backup Check");
    println!("============");
    println!("Home folder: {}", report.home_folder.display());
    println!("Bundle name: {}", config.bundle_name);
    match &config.destination {
        Some(dest) => println!("Destination: {} (asked before moving)", dest.display()),
        None => println!("Destination: none (bundle stays in the home folder)"),
    }
    println!();
    println!("Folders:");
    for (source, archive) in &report.sources {
        println!("  {} -> {}", source.display(), archive);
    }
    println!();

    if let Some(stale) = report.stale_bundle {
        return Err(BackupError::BundleAlreadyExists { path: stale });
    }

    println!("All {} folder(s) are readable.", report.sources.len());
    Ok(())
}
