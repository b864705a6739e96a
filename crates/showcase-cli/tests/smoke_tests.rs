//! Smoke tests for the showcase CLI
//!
//! These tests run the real binary end to end.

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the showcase binary
fn showcase() -> Command {
    let mut cmd = Command::cargo_bin("showcase").expect("showcase binary should exist");
    cmd.env_remove("SHOWCASE_CONFIG").env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    showcase()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_help_lists_commands() {
    showcase()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("simulate"))
        .stdout(predicate::str::contains("click"))
        .stdout(predicate::str::contains("palette"));
}

#[test]
fn test_unknown_subcommand_fails() {
    showcase().arg("dance").assert().failure();
}

// ============================================================================
// Simulate
// ============================================================================

#[test]
fn test_simulate_glow_text() {
    showcase()
        .args(["--color", "never", "simulate", "--effect", "glow", "--duration", "300"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Simulating glow on animated-box"))
        .stdout(predicate::str::contains("reverse"))
        .stdout(predicate::str::contains("completed at 300 ms"));
}

#[test]
fn test_simulate_json_repeat() {
    let output = showcase()
        .args(["simulate", "--effect", "shake", "--duration", "100", "--repeat", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["dispatched"].as_array().unwrap().len(), 2);
    assert_eq!(report["end_ms"], 700);
    assert_eq!(report["request"]["type"], "shake");
}

#[test]
fn test_simulate_missing_element_fails() {
    showcase()
        .args(["simulate", "--element", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Element not found: ghost"));
}

#[test]
fn test_simulate_empty_effect_fails() {
    showcase()
        .args(["simulate", "--effect", " "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
}

// ============================================================================
// Click, counter, palette
// ============================================================================

#[test]
fn test_click_counter_button() {
    showcase()
        .args(["--color", "never", "click", "btn-counter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Counter updated to: 1"));
}

#[test]
fn test_click_box_json() {
    let output = showcase()
        .args(["click", "animated-box", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let effect = report["dispatched"][0]["effect"].as_str().unwrap();
    assert!(["shake", "glow", "rainbow"].contains(&effect));
}

#[test]
fn test_counter_sequence() {
    showcase()
        .args(["counter", "--initial", "5", "--times", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6 7 8"));
}

#[test]
fn test_palette_lists_colors() {
    showcase()
        .args(["--color", "never", "palette", "--draws", "3", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#ff6b6b"))
        .stdout(predicate::str::contains("#6c5ce7"));
}

#[test]
fn test_palette_seed_is_reproducible() {
    let run = || {
        showcase()
            .args(["-q", "palette", "--draws", "8", "--seed", "99"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };
    assert_eq!(run(), run());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_defaults_yaml() {
    showcase()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("overlap_policy: independent"))
        .stdout(predicate::str::contains("repeat_delay_ms: 500"));
}

#[test]
fn test_config_file_applies() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("showcase.yaml");
    fs::write(&path, "seed: 31\ntiming:\n  repeat_delay_ms: 50\n").unwrap();

    showcase()
        .args(["config", "--json", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"seed\": 31"))
        .stdout(predicate::str::contains("\"repeat_delay_ms\": 50"));
}

#[test]
fn test_config_file_drives_simulation() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("showcase.json");
    fs::write(&path, r#"{"timing": {"repeat_delay_ms": 10}}"#).unwrap();

    let output = showcase()
        .args(["simulate", "--effect", "glow", "--duration", "20", "--repeat", "--json"])
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["dispatched"][1]["dispatched_at_ms"], 30);
}

#[test]
fn test_config_default_duration_drives_simulation() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("showcase.yaml");
    fs::write(&path, "timing:\n  default_duration_ms: 40\n").unwrap();

    let output = showcase()
        .args(["simulate", "--effect", "glow", "--json", "--config"])
        .arg(&path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["duration_ms"], 40);
    assert_eq!(report["dispatched"][0]["reversal_at_ms"], 40);
}

#[test]
fn test_missing_config_file_fails() {
    showcase()
        .args(["config", "--config", "/no/such/showcase.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_bad_config_extension_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("showcase.toml");
    fs::write(&path, "seed = 1").unwrap();

    showcase()
        .arg("config")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
