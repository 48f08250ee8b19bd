//! Basic CLI E2E tests.
//!
//! Each test points the CLI at its own temporary config directory.

use assert_cmd::Command;
use chrono::{Duration, Local};
use predicates::prelude::*;
use tempfile::TempDir;

fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("focusflow").unwrap();
    cmd.env("FOCUSFLOW_CONFIG_DIR", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

/// An end time two hours from now, so plans never collide with the clock.
fn end_in_two_hours() -> String {
    (Local::now() + Duration::hours(2)).format("%H:%M").to_string()
}

#[test]
fn test_plan_table() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["plan", "--end", &end_in_two_hours(), "--breaks", "2", "--break-minutes", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("work-0"))
        .stdout(predicate::str::contains("break-1"))
        .stdout(predicate::str::contains("work-2"))
        .stdout(predicate::str::contains("2 breaks"));
}

#[test]
fn test_plan_json_is_contiguous() {
    let dir = TempDir::new().unwrap();
    let output = cli(&dir)
        .args(["plan", "--end", &end_in_two_hours(), "--breaks", "3", "--break-minutes", "5", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let segments: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let segments = segments.as_array().unwrap();
    assert_eq!(segments.len(), 7);
    assert_eq!(segments[0]["kind"], "work");
    assert_eq!(segments[6]["kind"], "work");
    for pair in segments.windows(2) {
        assert_eq!(pair[0]["end_time"], pair[1]["start_time"]);
    }
    let total: u64 = segments
        .iter()
        .map(|s| s["duration_minutes"].as_u64().unwrap())
        .sum();
    assert!((119..=120).contains(&total), "total was {total}");
}

#[test]
fn test_plan_pomodoro() {
    let dir = TempDir::new().unwrap();
    let output = cli(&dir)
        .args(["plan", "--end", &end_in_two_hours(), "--pomodoro", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let segments: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let first = &segments.as_array().unwrap()[0];
    assert_eq!(first["duration_minutes"], 25);
    assert_eq!(first["id"], "work-0");
}

#[test]
fn test_plan_insufficient_time() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["plan", "--breaks", "100", "--break-minutes", "60"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not enough time"));
}

#[test]
fn test_plan_rejects_bad_end_time() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["plan", "--end", "25:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid end time"));
}

#[test]
fn test_plan_uses_config_defaults() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["config", "set", "session.break_count", "0"])
        .assert()
        .success();
    let output = cli(&dir)
        .args(["plan", "--end", &end_in_two_hours(), "--json"])
        .output()
        .unwrap();
    let segments: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(segments.as_array().unwrap().len(), 1);
}

#[test]
fn test_config_get_set_roundtrip() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["config", "get", "session.target_end_time"])
        .assert()
        .success()
        .stdout("21:00\n");
    cli(&dir)
        .args(["config", "set", "session.target_end_time", "18:45"])
        .assert()
        .success();
    cli(&dir)
        .args(["config", "get", "session.target_end_time"])
        .assert()
        .success()
        .stdout("18:45\n");
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["config", "set", "session.colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown config key"));
    cli(&dir)
        .args(["config", "get", "session.colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown config key: session.colour"));
}

#[test]
fn test_config_list_and_reset() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["config", "set", "notifications.bell", "false"])
        .assert()
        .success();
    cli(&dir)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bell = false"));
    cli(&dir).args(["config", "reset"]).assert().success();
    cli(&dir)
        .args(["config", "get", "notifications.bell"])
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn test_run_stops_on_command() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["run", "--end", &end_in_two_hours(), "--breaks", "1", "--break-minutes", "5", "--json"])
        .write_stdin("status\nstop\n")
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\":\"SessionStarted\""))
        .stdout(predicate::str::contains("StateSnapshot"))
        .stdout(predicate::str::contains("\"type\":\"SessionStopped\""));
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("focusflow"));
}
