// Author: Eshan Roy
// SPDX-License-Identifier: MIT

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CONFIG: &str = r#"
[rules.create]
email = "required|email"
name = "required|max:{:limits.name}"
iban = "nullable|iban"

[rules.update]
email = "sometimes|email"

[error_codes]
"email.email" = 4001
"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn validata() -> Command {
    Command::cargo_bin("validata").unwrap()
}

#[test]
fn test_check_valid_data() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "validata.toml", CONFIG);
    let data = write(
        dir.path(),
        "user.json",
        r#"{"email": "john@example.com", "name": "john", "limits": {"name": 10}}"#,
    );

    validata()
        .arg("--config")
        .arg(&config)
        .arg("check")
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid (create)"));
}

#[test]
fn test_check_invalid_data() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "validata.toml", CONFIG);
    let data = write(
        dir.path(),
        "user.json",
        r#"{"email": "nope", "name": "johnny", "limits": {"name": 3}, "iban": "GB00WEST12345698765432"}"#,
    );

    validata()
        .arg("--config")
        .arg(&config)
        .arg("check")
        .arg("--data")
        .arg(&data)
        .assert()
        .failure()
        .stdout(predicate::str::contains("The email must be a valid email address."))
        .stdout(predicate::str::contains("The name may not be greater than 3 characters."))
        .stdout(predicate::str::contains("The iban must be a valid IBAN."));
}

#[test]
fn test_check_group() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "validata.toml", CONFIG);
    let data = write(dir.path(), "user.json", "{}");

    validata()
        .arg("--config")
        .arg(&config)
        .args(["check", "--group", "update", "--data"])
        .arg(&data)
        .assert()
        .success();

    validata()
        .arg("--config")
        .arg(&config)
        .args(["check", "--group", "delete", "--data"])
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Group [delete] not found"));
}

#[test]
fn test_check_json_output() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "validata.toml", CONFIG);
    let data = write(dir.path(), "user.json", r#"{"email": "john@example.com"}"#);

    let output = validata()
        .arg("--config")
        .arg(&config)
        .args(["--format", "json", "check", "--data"])
        .arg(&data)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["passed"], false);
    assert_eq!(json["group"], "create");
    assert_eq!(
        json["errors"]["name"][0],
        "The name field is required."
    );
}

#[test]
fn test_check_strict_status_code() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "validata.toml", CONFIG);
    let data = write(dir.path(), "user.json", r#"{"email": "nope", "name": "jo"}"#);

    let output = validata()
        .arg("--config")
        .arg(&config)
        .args(["--format", "json", "check", "--strict", "--data"])
        .arg(&data)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status_code"], 4001);
    assert_eq!(
        json["message"],
        "Multiple validation rules failed. See \"errors\" for more details."
    );
}

#[test]
fn test_check_invalid_json() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "validata.toml", CONFIG);
    let data = write(dir.path(), "user.json", "{email");

    validata()
        .arg("--config")
        .arg(&config)
        .arg("check")
        .arg("--data")
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse data"));
}

#[test]
fn test_expand() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "validata.toml", CONFIG);
    let data = write(dir.path(), "user.json", r#"{"limits": {"name": 12}}"#);

    validata()
        .arg("--config")
        .arg(&config)
        .arg("expand")
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("required|max:12"));

    validata()
        .arg("--config")
        .arg(&config)
        .arg("expand")
        .assert()
        .success()
        .stdout(predicate::str::contains("required|max:null"));
}

#[test]
fn test_rules_lists_pattern_validators() {
    validata()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("iban"))
        .stdout(predicate::str::contains("hexcolor"))
        .stdout(predicate::str::contains("required"));
}

#[test]
fn test_init() {
    let dir = TempDir::new().unwrap();

    validata()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created validata.toml"));
    assert!(dir.path().join("validata.toml").exists());

    validata()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    validata()
        .current_dir(dir.path())
        .args(["init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_version() {
    validata()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("validata "));
}
