//! CLI integration smoke tests.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("cusdex")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_config_show_prints_defaults() {
    Command::cargo_bin("cusdex")
        .unwrap()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("generateContent"))
        .stdout(predicate::str::contains("timeout_secs"));
}

#[test]
fn test_config_get_known_key() {
    Command::cargo_bin("cusdex")
        .unwrap()
        .args(["config", "get", "model.timeout_secs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("30"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cusdex.json");

    Command::cargo_bin("cusdex")
        .unwrap()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();

    Command::cargo_bin("cusdex")
        .unwrap()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_process_requires_api_key() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("cusdex")
        .unwrap()
        .current_dir(dir.path())
        .args(["process", "whatever.pdf"])
        .env_remove("GOOGLE_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GOOGLE_API_KEY"));
}

#[test]
fn test_process_missing_file_fails() {
    Command::cargo_bin("cusdex")
        .unwrap()
        .args(["process", "definitely-missing.pdf"])
        .env("GOOGLE_API_KEY", "test-key")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
