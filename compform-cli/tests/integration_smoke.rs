//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn compform() -> Command {
    let mut cmd = Command::cargo_bin("compform").unwrap();
    cmd.env_remove("COMPFORM_CONFIG")
        .env_remove("COMPFORM_CHAR_DELAY_MS")
        .env_remove("COMPFORM_SETTLE_DELAY_MS")
        .env_remove("COMPFORM_SUBMIT_DELAY_MS")
        .env_remove("RUST_LOG");
    cmd
}

// === Catalog Tests ===

#[test]
fn test_presets_lists_all_presets() {
    compform()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("Prism Mock"))
        .stdout(predicate::str::contains("Ballerina"))
        .stdout(predicate::str::contains("Python"));
}

#[test]
fn test_fields_lists_choices() {
    compform()
        .arg("fields")
        .assert()
        .success()
        .stdout(predicate::str::contains("organization"))
        .stdout(predicate::str::contains("choreo-marketplace"))
        .stdout(predicate::str::contains("dev-prod"));
}

// === Autofill Tests ===

#[test]
fn test_instant_autofill_prints_submission() {
    let tmp = TempDir::new().unwrap();
    compform()
        .arg("--config")
        .arg(tmp.path().join("config.toml"))
        .arg("autofill")
        .arg("--instant")
        .assert()
        .success()
        .stdout(predicate::str::contains("Component Created"))
        .stdout(predicate::str::contains("\"organization\": \"hanzjk\""))
        .stdout(predicate::str::contains("\"displayName\": \"Greeting Service\""))
        .stdout(predicate::str::contains("\"buildPreset\": \"Go\""))
        .stdout(predicate::str::contains("[9/9] Create Component"));
}

#[test]
fn test_autofill_help() {
    compform()
        .arg("autofill")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skip all tour delays"));
}

// === Config Tests ===

#[test]
fn test_config_path_honors_flag() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("custom.toml");
    compform()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_config_show_reads_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[tour]\nchar_delay_ms = 7\n").unwrap();

    compform()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("char_delay_ms = 7"))
        .stdout(predicate::str::contains("settle_delay_ms = 500"));
}

#[test]
fn test_config_show_rejects_bad_toml() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[tour\n").unwrap();

    compform()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn test_env_override_replaces_file_value() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[tour]\nsettle_delay_ms = 900\n").unwrap();

    compform()
        .env("COMPFORM_SETTLE_DELAY_MS", "7")
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("settle_delay_ms = 7"))
        .stdout(predicate::str::contains("char_delay_ms = 50"));
}

#[test]
fn test_env_override_rejects_non_numeric() {
    let tmp = TempDir::new().unwrap();

    compform()
        .env("COMPFORM_CHAR_DELAY_MS", "fast")
        .arg("--config")
        .arg(tmp.path().join("config.toml"))
        .arg("config")
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("COMPFORM_CHAR_DELAY_MS"))
        .stderr(predicate::str::contains("'fast'"));
}

// === Help Tests ===

#[test]
fn test_top_level_help() {
    compform()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("form"))
        .stdout(predicate::str::contains("autofill"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_completions_bash() {
    compform()
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("compform"));
}
