//! Zip archive creation and inspection
//!
//! Archives hold the recursive contents of one directory, with entry names
//! relative to that directory and `/` as the separator.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, ErrorKind};
use std::path::{Component, Path};

use chrono::{DateTime, Datelike, Local, Timelike};
use tracing::{debug, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{BackupError, BackupResult};

/// Counts gathered while writing an archive
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub files: usize,
    pub directories: usize,
    pub bytes: u64,
}

/// One entry read back from an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub size: u64,
    pub is_dir: bool,
}

/// Zip the recursive contents of `source` into `archive_path`
///
/// A missing or unreadable `source` fails with `SourceUnavailable` before the
/// archive file is created. An existing `archive_path` is never replaced.
/// Symbolic links are skipped.
pub fn zip_directory(source: &Path, archive_path: &Path) -> BackupResult<ArchiveSummary> {
    ensure_readable_dir(source)?;

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(archive_path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => {
                BackupError::Io(format!("Refusing to overwrite {}", archive_path.display()))
            }
            _ => BackupError::Io(format!("Failed to create {}: {}", archive_path.display(), e)),
        })?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let mut summary = ArchiveSummary::default();

    let walker = WalkDir::new(source)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| BackupError::source_unavailable(source, e))?;
        let path = entry.path();

        // The archive may live inside the tree being walked
        if path == archive_path {
            continue;
        }

        let relative = path
            .strip_prefix(source)
            .map_err(|e| BackupError::Archive(format!("{}: {}", path.display(), e)))?;
        let name = entry_name(relative)?;
        let metadata = entry
            .metadata()
            .map_err(|e| BackupError::source_unavailable(path, e))?;

        if entry.file_type().is_dir() {
            zip.add_directory(format!("{}/", name), entry_options(&metadata))?;
            summary.directories += 1;
        } else if entry.file_type().is_file() {
            debug!(entry = %name, size = metadata.len(), "adding file");
            let options = entry_options(&metadata).large_file(metadata.len() >= u32::MAX as u64);
            zip.start_file(name, options)?;
            let mut input = File::open(path).map_err(|e| BackupError::source_unavailable(path, e))?;
            summary.bytes += io::copy(&mut input, &mut zip)?;
            summary.files += 1;
        } else {
            warn!(path = %path.display(), "skipping non-regular file");
        }
    }

    zip.finish()?;
    Ok(summary)
}

/// List the entries of an archive in stored order
pub fn list_entries(archive_path: &Path) -> BackupResult<Vec<ArchiveEntry>> {
    let file = File::open(archive_path).map_err(|e| {
        BackupError::Io(format!("Failed to open {}: {}", archive_path.display(), e))
    })?;
    let mut archive = ZipArchive::new(file)?;

    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        entries.push(ArchiveEntry {
            name: entry.name().to_string(),
            size: entry.size(),
            is_dir: entry.is_dir(),
        });
    }

    Ok(entries)
}

fn ensure_readable_dir(source: &Path) -> BackupResult<()> {
    let metadata = fs::metadata(source).map_err(|e| BackupError::source_unavailable(source, e))?;
    if !metadata.is_dir() {
        return Err(BackupError::source_unavailable(source, "not a directory"));
    }
    fs::read_dir(source).map_err(|e| BackupError::source_unavailable(source, e))?;
    Ok(())
}

fn entry_name(relative: &Path) -> BackupResult<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str().ok_or_else(|| {
                BackupError::Archive(format!("non UTF-8 file name: {}", relative.display()))
            })?),
            other => {
                return Err(BackupError::Archive(format!(
                    "unexpected path component {:?} in {}",
                    other,
                    relative.display()
                )))
            }
        }
    }
    Ok(parts.join("/"))
}

fn entry_options(metadata: &fs::Metadata) -> SimpleFileOptions {
    let mut options =
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    if let Some(modified) = modification_time(metadata) {
        options = options.last_modified_time(modified);
    }

    #[cfg(unix)]
    let options = {
        use std::os::unix::fs::PermissionsExt;
        options.unix_permissions(metadata.permissions().mode())
    };
    #[cfg(not(unix))]
    let _ = metadata;

    options
}

/// Local modification time in zip form; `None` outside the 1980-2107 range
fn modification_time(metadata: &fs::Metadata) -> Option<zip::DateTime> {
    let modified: DateTime<Local> = metadata.modified().ok()?.into();
    zip::DateTime::from_date_and_time(
        u16::try_from(modified.year()).ok()?,
        modified.month() as u8,
        modified.day() as u8,
        modified.hour() as u8,
        modified.minute() as u8,
        modified.second() as u8,
    )
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;
    use std::io::Read;
    use std::time::SystemTime;
    use tempfile::TempDir;

    fn read_files(archive_path: &Path) -> BTreeMap<String, Vec<u8>> {
        let mut archive = ZipArchive::new(File::open(archive_path).unwrap()).unwrap();
        let mut files = BTreeMap::new();
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).unwrap();
            if entry.is_dir() {
                continue;
            }
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes).unwrap();
            files.insert(entry.name().to_string(), bytes);
        }
        files
    }

    #[test]
    fn test_round_trip_preserves_tree() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("Documents");
        fs::create_dir_all(source.join("taxes/2024")).unwrap();
        fs::create_dir_all(source.join("empty")).unwrap();
        fs::write(source.join("readme.txt"), b"hello").unwrap();
        fs::write(source.join("taxes/2024/return.pdf"), vec![7u8; 4096]).unwrap();
        let stamp = Local.with_ymd_and_hms(2023, 4, 5, 6, 7, 8).unwrap();
        File::options()
            .write(true)
            .open(source.join("readme.txt"))
            .unwrap()
            .set_modified(SystemTime::from(stamp))
            .unwrap();

        let archive_path = temp.path().join("Documents.zip");
        let summary = zip_directory(&source, &archive_path).unwrap();
        assert_eq!(summary.files, 2);
        assert_eq!(summary.directories, 3);
        assert_eq!(summary.bytes, 5 + 4096);

        let files = read_files(&archive_path);
        let mut expected = BTreeMap::new();
        expected.insert("readme.txt".to_string(), b"hello".to_vec());
        expected.insert("taxes/2024/return.pdf".to_string(), vec![7u8; 4096]);
        assert_eq!(files, expected);

        let entries = list_entries(&archive_path).unwrap();
        assert!(entries.iter().any(|e| e.is_dir && e.name == "empty/"));

        let mut archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        let readme = archive.by_name("readme.txt").unwrap();
        let stored: Option<zip::DateTime> = readme.last_modified().into();
        let stored = stored.unwrap();
        assert_eq!(
            (stored.year(), stored.month(), stored.day()),
            (2023, 4, 5)
        );
        assert_eq!(
            (stored.hour(), stored.minute(), stored.second()),
            (6, 7, 8)
        );
    }

    #[test]
    fn test_existing_archive_is_not_replaced() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("Pictures");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("cat.jpg"), b"meow").unwrap();
        let archive_path = temp.path().join("Pictures.zip");
        fs::write(&archive_path, b"first-run").unwrap();

        let err = zip_directory(&source, &archive_path).unwrap_err();

        assert!(matches!(err, BackupError::Io(_)));
        assert_eq!(fs::read(&archive_path).unwrap(), b"first-run");
    }

    #[test]
    fn test_missing_source_creates_nothing() {
        let temp = TempDir::new().unwrap();
        let archive_path = temp.path().join("Missing.zip");

        let err = zip_directory(&temp.path().join("Missing"), &archive_path).unwrap_err();
        assert!(err.is_source_unavailable());
        assert!(!archive_path.exists());
    }

    #[test]
    fn test_file_source_is_unavailable() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("Notes");
        fs::write(&file, b"not a folder").unwrap();

        let err = zip_directory(&file, &temp.path().join("Notes.zip")).unwrap_err();
        assert!(err.is_source_unavailable());
    }

    #[test]
    fn test_archive_inside_source_is_skipped() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), b"a").unwrap();
        let archive_path = temp.path().join("self.zip");

        zip_directory(temp.path(), &archive_path).unwrap();

        let names: Vec<_> = list_entries(&archive_path)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["a.txt".to_string()]);
    }

    #[test]
    fn test_empty_directory_produces_valid_archive() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("Empty");
        fs::create_dir(&source).unwrap();
        let archive_path = temp.path().join("Empty.zip");

        let summary = zip_directory(&source, &archive_path).unwrap();
        assert_eq!(summary, ArchiveSummary::default());
        assert!(list_entries(&archive_path).unwrap().is_empty());
    }
}
