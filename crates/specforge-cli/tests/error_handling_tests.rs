//! Tests for error handling, exit codes and suggestions.

use std::fs;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn specforge(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("specforge");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_error_missing_input_directory() {
    let temp = TempDir::new().unwrap();
    specforge(&temp)
        .arg("generate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No schema documents"))
        .stderr(predicate::str::contains("Suggestions:"))
        .stderr(predicate::str::contains("--input"));
}

#[test]
fn test_error_empty_input_directory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("openapi")).unwrap();
    fs::write(temp.path().join("openapi/README.md"), "not a schema").unwrap();

    specforge(&temp).arg("list").assert().code(1);
}

#[test]
fn test_error_malformed_document() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("openapi")).unwrap();
    fs::write(temp.path().join("openapi/broken.yaml"), "paths: [unclosed").unwrap();

    specforge(&temp)
        .args(["generate", "-o", "out"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("broken.yaml"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_error_unknown_target() {
    let temp = TempDir::new().unwrap();
    specforge(&temp)
        .args(["generate", "--target", "python"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("python"));
}

#[test]
fn test_error_quiet_and_verbose() {
    let temp = TempDir::new().unwrap();
    specforge(&temp)
        .args(["-q", "-v", "list"])
        .assert()
        .code(2);
}

#[test]
fn test_error_output_root_is_a_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("out"), "").unwrap();

    specforge(&temp)
        .args(["generate", "--output", "out"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_error_config_init_refuses_overwrite() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("specforge.toml"), "").unwrap();

    specforge(&temp)
        .args(["config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_malformed_config_falls_back_to_defaults() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("specforge.toml"), "[output\nroot = ").unwrap();

    specforge(&temp)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("root = \"output\""))
        .stderr(predicate::str::contains("ignoring unreadable configuration"));
}

#[test]
fn test_verbose_error_shows_causes() {
    let temp = TempDir::new().unwrap();
    specforge(&temp)
        .args(["-v", "generate"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--verbose").not());
}
