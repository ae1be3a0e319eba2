//! CLI end-to-end tests for the phimhub binary.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[allow(deprecated)]
fn phimhub_cmd() -> Command {
    Command::cargo_bin("phimhub").unwrap()
}

#[test]
fn test_cli_no_args_shows_help() {
    phimhub_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    phimhub_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("phimhub"))
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_cli_version_flag() {
    phimhub_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("phimhub"));
}

#[test]
fn test_cli_version_command() {
    phimhub_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_validate_defaults() {
    phimhub_cmd()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("using defaults"))
        .stdout(predicate::str::contains("https://ophim1.com"));
}

#[test]
fn test_cli_validate_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("phimhub.toml");
    fs::write(
        &path,
        r#"
[server]
port = 8088
requests_per_minute = 120

[upstream]
base_url = "https://ophim17.cc"
"#,
    )
    .unwrap();

    phimhub_cmd()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("0.0.0.0:8088"))
        .stdout(predicate::str::contains("https://ophim17.cc"))
        .stdout(predicate::str::contains("120/min"));
}

#[test]
fn test_cli_validate_global_config_flag() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[server]\nport = 9001\n").unwrap();

    phimhub_cmd()
        .arg("--config")
        .arg(&path)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("9001"));
}

#[test]
fn test_cli_validate_reports_warnings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("phimhub.toml");
    fs::write(&path, "[images]\ncdn_base_url = \"https://img.ophim.live/\"\n").unwrap();

    phimhub_cmd()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("trailing slash"));
}

#[test]
fn test_cli_validate_invalid_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[server\nport = ").unwrap();

    phimhub_cmd().arg("validate").arg(&path).assert().failure();
}

#[test]
fn test_cli_validate_rejects_port_zero() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("phimhub.toml");
    fs::write(&path, "[server]\nport = 0\n").unwrap();

    phimhub_cmd()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("port"));
}

#[test]
fn test_cli_validate_missing_file() {
    phimhub_cmd()
        .arg("validate")
        .arg("/nonexistent/phimhub.toml")
        .assert()
        .failure();
}

#[test]
fn test_cli_start_with_missing_config_fails() {
    phimhub_cmd()
        .arg("--config")
        .arg("/nonexistent/phimhub.toml")
        .arg("start")
        .assert()
        .failure();
}
