//! Inspect command
//!
//! Lists what a bundle (or a per-folder archive) contains.

use std::path::Path;

use crate::backup::list_entries;
use crate::error::BackupResult;

/// Handle the inspect command
pub fn handle_inspect_command(archive: &Path) -> BackupResult<()> {
    let entries = list_entries(archive)?;
    let metadata = std::fs::metadata(archive)?;

    println!("Archive Details");
    println!("===============");
    println!("File: {}", archive.display());
    println!("Size: {}", format_size(metadata.len()));
    println!();

    if entries.is_empty() {
        println!("The archive is empty.");
        return Ok(());
    }

    let mut total = 0;
    for entry in entries.iter().filter(|e| !e.is_dir) {
        total += entry.size;
        println!("  {:>10}  {}", format_size(entry.size), entry.name);
    }

    println!();
    println!(
        "Total: {} file(s), {} uncompressed",
        entries.iter().filter(|e| !e.is_dir).count(),
        format_size(total)
    );
    Ok(())
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
