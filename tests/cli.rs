//! End-to-end tests driving the bundle-backup binary

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Fixture {
    _root: TempDir,
    config_dir: PathBuf,
    home: PathBuf,
}

impl Fixture {
    /// A config dir plus a home folder holding the given source folders
    fn new(folders: &[&str]) -> Self {
        let root = TempDir::new().unwrap();
        let config_dir = root.path().join("config");
        let home = root.path().join("home");
        fs::create_dir_all(&config_dir).unwrap();
        fs::create_dir_all(&home).unwrap();

        let mut list = String::new();
        for name in folders {
            let dir = home.join(name);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("data.txt"), name.as_bytes()).unwrap();
            list.push_str(&format!("{}/\n\n", dir.display()));
        }
        fs::write(config_dir.join("folders.txt"), list).unwrap();

        Self {
            _root: root,
            config_dir,
            home,
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("bundle-backup").unwrap();
        cmd.env_remove("RUST_LOG")
            .env_remove("BUNDLE_BACKUP_DIR")
            .arg("--config-dir")
            .arg(&self.config_dir);
        cmd
    }

    fn set_destination(&self, dest: &Path) {
        fs::write(
            self.config_dir.join("move_to.txt"),
            format!("{}\n", dest.display()),
        )
        .unwrap();
    }
}

fn bundles_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .filter(|name| name.ends_with("-D6-Backup.zip"))
        .collect();
    names.sort();
    names
}

#[test]
fn init_creates_configuration_files() {
    let root = TempDir::new().unwrap();
    let config_dir = root.path().join("fresh");

    Command::cargo_bin("bundle-backup")
        .unwrap()
        .arg("--config-dir")
        .arg(&config_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(config_dir.join("folders.txt").exists());
    assert!(config_dir.join("move_to.txt").exists());
    assert!(config_dir.join("config.json").exists());
}

#[test]
fn run_with_empty_folder_list_fails() {
    let fixture = Fixture::new(&[]);

    fixture
        .cmd()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no backup locations specified"));
}

#[test]
fn run_without_destination_renames_in_place() {
    let fixture = Fixture::new(&["Documents", "Pictures"]);

    fixture
        .cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup Completed!"));

    let bundles = bundles_in(&fixture.home);
    assert_eq!(bundles.len(), 1);
    assert!(!fixture.home.join("D6-Backup").exists());
    assert!(!fixture.home.join("D6-Backup.zip").exists());

    fixture
        .cmd()
        .arg("inspect")
        .arg(fixture.home.join(&bundles[0]))
        .assert()
        .success()
        .stdout(predicate::str::contains("Documents.zip"))
        .stdout(predicate::str::contains("Pictures.zip"));
}

#[test]
fn stale_bundle_folder_exits_with_instruction() {
    let fixture = Fixture::new(&["Documents"]);
    fs::create_dir(fixture.home.join("D6-Backup")).unwrap();

    fixture
        .cmd()
        .arg("run")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Please delete it and re-run"));

    assert!(fixture.home.join("D6-Backup").exists());
    assert!(bundles_in(&fixture.home).is_empty());
}

#[test]
fn confirmed_relocation_moves_bundle() {
    let fixture = Fixture::new(&["Notes"]);
    let dest = TempDir::new().unwrap();
    fixture.set_destination(dest.path());

    fixture
        .cmd()
        .arg("run")
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Would you like to move this Backup"));

    assert_eq!(bundles_in(dest.path()).len(), 1);
    assert!(bundles_in(&fixture.home).is_empty());
    assert!(!fixture.home.join("D6-Backup.zip").exists());
}

#[test]
fn declined_relocation_keeps_bundle_home() {
    let fixture = Fixture::new(&["Notes"]);
    let dest = TempDir::new().unwrap();
    fixture.set_destination(dest.path());

    fixture.cmd().args(["run", "--no"]).assert().success();

    assert_eq!(bundles_in(&fixture.home).len(), 1);
    assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 0);
}

#[test]
fn custom_bundle_name_is_used() {
    let fixture = Fixture::new(&["Notes"]);

    fixture
        .cmd()
        .args(["run", "--bundle-name", "Laptop"])
        .assert()
        .success();

    let names: Vec<String> = fs::read_dir(&fixture.home)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .filter(|name| name.ends_with("-Laptop.zip"))
        .collect();
    assert_eq!(names.len(), 1);
}

#[test]
fn check_reports_missing_source() {
    let fixture = Fixture::new(&["Documents"]);
    let missing = fixture.home.join("Missing");
    let list = fs::read_to_string(fixture.config_dir.join("folders.txt")).unwrap();
    fs::write(
        fixture.config_dir.join("folders.txt"),
        format!("{}{}/\n", list, missing.display()),
    )
    .unwrap();

    fixture
        .cmd()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Source folder unavailable"));

    assert!(!fixture.home.join("Documents.zip").exists());
}

#[test]
fn check_passes_for_valid_configuration() {
    let fixture = Fixture::new(&["Documents", "Pictures"]);

    fixture
        .cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("All 2 folder(s) are readable."));
}

#[test]
fn check_rejects_answer_flags() {
    let fixture = Fixture::new(&["Documents"]);

    for flag in ["--yes", "--no"] {
        fixture
            .cmd()
            .args(["check", flag])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unexpected argument"));
    }

    fixture
        .cmd()
        .args(["check", "--bundle-name", "Laptop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bundle name: Laptop"));
}
