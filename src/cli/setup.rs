//! Init and config commands

use std::fs;
use std::path::Path;

use crate::config::{BackupPaths, Settings};
use crate::error::{BackupError, BackupResult};

/// Create the config directory and any missing configuration files
pub fn handle_init_command(paths: &BackupPaths, settings: &Settings) -> BackupResult<()> {
    println!("Initializing bundle-backup at: {}", paths.base_dir().display());
    paths.ensure_directories()?;

    create_if_missing(&paths.folders_file(), "")?;
    create_if_missing(&paths.move_to_file(), "")?;
    if !paths.settings_file().exists() {
        settings.save(paths)?;
        println!("  created {}", paths.settings_file().display());
    }

    println!("Initialization complete!");
    println!();
    println!(
        "List one absolute folder path per line in {}",
        paths.folders_file().display()
    );
    println!(
        "Optionally put a destination folder in {}",
        paths.move_to_file().display()
    );
    Ok(())
}

/// Print resolved paths and settings
pub fn handle_config_command(paths: &BackupPaths, settings: &Settings) -> BackupResult<()> {
    println!("bundle-backup Configuration");
    println!("===========================");
    println!("Config directory: {}", paths.base_dir().display());
    println!("Folder list:      {}", describe(&paths.folders_file()));
    println!("Destination file: {}", describe(&paths.move_to_file()));
    println!("Settings file:    {}", describe(&paths.settings_file()));
    println!();
    println!("Settings:");
    println!("  Bundle name: {}", settings.bundle_name);
    println!("  Log level:   {}", settings.log_level);
    match &settings.destination_override {
        Some(dest) => println!("  Destination override: {}", dest.display()),
        None => println!("  Destination override: none"),
    }
    Ok(())
}

fn create_if_missing(path: &Path, contents: &str) -> BackupResult<()> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, contents)
        .map_err(|e| BackupError::Io(format!("Failed to create {}: {}", path.display(), e)))?;
    println!("  created {}", path.display());
    Ok(())
}

fn describe(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (missing)", path.display())
    }
}
