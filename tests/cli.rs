//! Command-line behaviour that does not need a terminal.

use assert_cmd::Command;
use predicates::prelude::*;

fn h5pad() -> Command {
    Command::cargo_bin("h5pad").expect("h5pad binary is built")
}

#[test]
fn help_lists_options() {
    h5pad()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--log"))
        .stdout(predicate::str::contains("--log-filter"))
        .stdout(predicate::str::contains("--max-pages"))
        .stdout(predicate::str::contains("--theme"));
}

#[test]
fn missing_file_fails_with_message() {
    h5pad()
        .arg("/no/such/file.h5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found: /no/such/file.h5"));
}

#[test]
fn directory_is_not_a_file() {
    let dir = tempfile::tempdir().unwrap();
    h5pad()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn log_file_is_created_before_validation() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("h5pad.log");
    h5pad()
        .arg("--log")
        .arg(&log)
        .arg("/no/such/file.h5")
        .assert()
        .failure();
    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("Starting h5pad"));
}

#[test]
fn unknown_theme_is_rejected() {
    h5pad()
        .args(["--theme", "purple"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("purple"));
}
