//! End-to-end tests for the `vocab` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vocab_deck::Config;

/// Config pointing at a closed port and a scratch store
fn setup() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = Config::default();
    config.remote.endpoint = "http://127.0.0.1:9/exec".into();
    config.remote.read_timeout_secs = 2;
    config.remote.write_timeout_secs = 2;
    config.remote.delete_timeout_secs = 2;
    config.store.path = dir.path().join("data");

    let path = dir.path().join("config.toml");
    config.save(Some(&path)).expect("save config");
    (dir, path)
}

fn vocab(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vocab").expect("binary");
    cmd.arg("--config").arg(config).env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_help() {
    Command::cargo_bin("vocab")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("vocabulary"));
}

/// Fresh store reports nothing pending
#[test]
fn test_status_on_empty_store() {
    let (_dir, config) = setup();
    vocab(&config)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("pending changes: 0"))
        .stdout(predicate::str::contains("admin mode: false"));
}

/// Writes are refused without admin mode
#[test]
fn test_add_requires_admin() {
    let (_dir, config) = setup();
    vocab(&config)
        .args(["add", "Ephemeral", "-m", "lasting a very short time"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires Admin Mode"));

    vocab(&config)
        .args(["queue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No pending changes"));
}

/// Unreachable endpoint: the word is cached and queued
#[test]
fn test_add_while_endpoint_down_is_queued() {
    let (_dir, config) = setup();
    vocab(&config).args(["admin", "on"]).assert().success();

    vocab(&config)
        .args(["add", "Ephemeral", "-m", "lasting a very short time", "--pos", "Adjective"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ephemeral"))
        .stderr(predicate::str::contains("will sync"));

    vocab(&config)
        .args(["status", "ephemeral"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pending"));

    vocab(&config)
        .arg("queue")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("Ephemeral"));

    vocab(&config)
        .args(["list", "--filter", "adjective"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lasting a very short time"));

    vocab(&config)
        .args(["add", "EPHEMERAL"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

/// Offline mode never touches the network and still queues
#[test]
fn test_offline_flag_queues_delete() {
    let (_dir, config) = setup();
    vocab(&config).args(["admin", "on"]).assert().success();
    vocab(&config)
        .args(["--offline", "add", "Transient", "-m", "passing"])
        .assert()
        .success();

    vocab(&config)
        .args(["--offline", "delete", "transient", "--yes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Delete queued"));

    vocab(&config)
        .args(["--offline", "sync"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 changes pending"));

    vocab(&config)
        .args(["queue", "--clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dropped 2"));
}

#[test]
fn test_quiz_needs_four_words() {
    let (_dir, config) = setup();
    vocab(&config)
        .args(["--offline", "quiz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 4 words"));
}

#[test]
fn test_settings_theme_and_config() {
    let (_dir, config) = setup();

    vocab(&config).args(["settings", "audioEnabled", "off"]).assert().success();
    vocab(&config)
        .args(["settings", "audioEnabled"])
        .assert()
        .success()
        .stdout(predicate::str::contains("off"));
    vocab(&config)
        .args(["settings", "loudness", "on"])
        .assert()
        .failure();

    vocab(&config).args(["theme", "dark"]).assert().success();
    vocab(&config)
        .args(["theme", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dark"));
    vocab(&config)
        .args(["settings", "darkMode"])
        .assert()
        .success()
        .stdout(predicate::str::contains("on"));

    vocab(&config)
        .args(["config", "quiz.default_questions", "5"])
        .assert()
        .success();
    vocab(&config)
        .args(["config", "quiz.default_questions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5"));
}

#[test]
fn test_materials_catalog() {
    let (_dir, config) = setup();
    vocab(&config)
        .arg("materials")
        .assert()
        .success()
        .stdout(predicate::str::contains("vocabulary"));

    vocab(&config)
        .args(["materials", "english"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wren & Martin Grammar"));

    vocab(&config)
        .args(["materials", "physics"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category"));
}

/// The word of the day falls back to a built-in entry
#[test]
fn test_wotd_fallback() {
    let (_dir, config) = setup();
    vocab(&config)
        .args(["--offline", "wotd"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome"));
}
