//! The `valentine` binary's offline subcommand

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use super::common::fixtures::write_split_png;

#[test]
fn test_key_subcommand_writes_output() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    write_split_png(&input, 4, 2);

    Command::cargo_bin("valentine")
        .expect("binary is built")
        .arg("--data-dir")
        .arg(dir.path().join("data"))
        .arg("key")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("keyed 4 pixels"));

    assert!(output.exists());
    assert!(dir.path().join("data/logs/valentine.log").exists());
}

#[test]
fn test_key_subcommand_reports_bad_input() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    Command::cargo_bin("valentine")
        .expect("binary is built")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("key")
        .arg(dir.path().join("missing.png"))
        .arg(dir.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to key"));
}
