//! End-to-end tests for the albumdl binary.
//!
//! The config directory is isolated per test via XDG_CONFIG_HOME.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn seed_config(config_home: &Path, with_child: bool) {
    let app_dir = config_home.join("albumdl");
    fs::create_dir_all(&app_dir).unwrap();
    let children = if with_child {
        r#"[{"child_id": 42, "center": 7, "cls": 9, "name": "Mina"}]"#
    } else {
        "[]"
    };
    fs::write(
        app_dir.join("config.json"),
        format!(r#"{{"download_dir": "/tmp/albums", "children": {children}}}"#),
    )
    .unwrap();
}

fn seed_snapshot(config_home: &Path, child_id: u64, body: &str) {
    let data_dir = config_home
        .join("albumdl")
        .join("children")
        .join(child_id.to_string());
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("list.json"), body).unwrap();
}

#[test]
fn test_help_shows_subcommands() {
    Command::cargo_bin("albumdl")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("download"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("albumdl")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("albumdl"));
}

#[test]
fn test_fetch_without_session_fails() {
    let temp = TempDir::new().unwrap();
    seed_config(temp.path(), true);

    Command::cargo_bin("albumdl")
        .unwrap()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("fetch")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no stored session"));
}

#[test]
fn test_download_without_profiles_fails() {
    let temp = TempDir::new().unwrap();
    seed_config(temp.path(), false);

    Command::cargo_bin("albumdl")
        .unwrap()
        .env("XDG_CONFIG_HOME", temp.path())
        .args(["download", "--dry-run"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no stored child profiles"));
}

#[test]
fn test_download_invalid_index_fails() {
    let temp = TempDir::new().unwrap();
    seed_config(temp.path(), true);

    Command::cargo_bin("albumdl")
        .unwrap()
        .env("XDG_CONFIG_HOME", temp.path())
        .args(["download", "--dry-run", "-n", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid child index"));
}

#[test]
fn test_download_dry_run_prints_resolved_paths() {
    let temp = TempDir::new().unwrap();
    seed_config(temp.path(), true);
    seed_snapshot(
        temp.path(),
        42,
        r#"{"results": [{
            "created": "2024-03-15T10:00:00Z",
            "attached_images": [{"original": "https://cdn.example.com/i0.jpg"}],
            "attached_video": {"high": "https://cdn.example.com/v.mp4"}
        }]}"#,
    );
    let out_dir = temp.path().join("out");

    Command::cargo_bin("albumdl")
        .unwrap()
        .env("XDG_CONFIG_HOME", temp.path())
        .args(["-q", "download", "--dry-run", "-o"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mina/2024/03/15/2024-03-15-0.jpg"))
        .stdout(predicate::str::contains("Mina/2024/03/15/2024-03-15.mp4"));
}

#[test]
fn test_list_reports_snapshot_stats() {
    let temp = TempDir::new().unwrap();
    seed_config(temp.path(), true);
    seed_snapshot(
        temp.path(),
        42,
        r#"{"results": [{
            "created": "2024-03-15T10:00:00Z",
            "attached_images": [{"original": "https://cdn.example.com/i0.jpg"}]
        }]}"#,
    );

    Command::cargo_bin("albumdl")
        .unwrap()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mina (child=42)"))
        .stdout(predicate::str::contains("1 entries, 1 media items"));
}

#[test]
fn test_list_reports_missing_snapshot() {
    let temp = TempDir::new().unwrap();
    seed_config(temp.path(), true);

    Command::cargo_bin("albumdl")
        .unwrap()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("no catalog snapshot"));
}

#[test]
fn test_config_show_displays_settings() {
    let temp = TempDir::new().unwrap();
    seed_config(temp.path(), true);

    Command::cargo_bin("albumdl")
        .unwrap()
        .env("XDG_CONFIG_HOME", temp.path())
        .args(["config", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/albums"));
}

#[test]
fn test_config_sets_download_dir() {
    let temp = TempDir::new().unwrap();
    seed_config(temp.path(), true);

    Command::cargo_bin("albumdl")
        .unwrap()
        .env("XDG_CONFIG_HOME", temp.path())
        .args(["config", "-d", "/data/albums"])
        .assert()
        .success();

    let saved = fs::read_to_string(temp.path().join("albumdl").join("config.json")).unwrap();
    assert!(saved.contains("/data/albums"));
}
