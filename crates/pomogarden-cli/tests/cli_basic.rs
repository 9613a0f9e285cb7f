//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and verify
//! outputs.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_pomogarden-cli"))
        .args(args)
        .env("POMOGARDEN_DATA_DIR", data_dir)
        .env("POMOGARDEN_LOG", "off")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_success(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\n{stderr}");
    stdout
}

fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("event line is JSON"))
        .collect()
}

fn garden_json(data_dir: &Path) -> serde_json::Value {
    let out = run_cli_success(data_dir, &["garden", "show", "--json"]);
    serde_json::from_str(&out).unwrap()
}

#[test]
fn test_first_run_shows_fresh_garden() {
    let dir = TempDir::new().unwrap();
    let report = garden_json(dir.path());
    assert_eq!(report["restored"], false);
    assert_eq!(report["progress"], 0);
    assert_eq!(report["key"], "farmData");
    assert_eq!(report["garden"].as_array().unwrap().len(), 6);
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_simulated_work_session_grows_garden() {
    let dir = TempDir::new().unwrap();
    let out = run_cli_success(
        dir.path(),
        &["simulate", "--ticks", "6", "--work-secs", "5", "--break-secs", "2"],
    );
    let events = json_lines(&out);
    let types: Vec<&str> = events.iter().map(|e| e["type"].as_str().unwrap()).collect();
    assert_eq!(
        types,
        vec!["SessionStarted", "SessionCompleted", "GardenGrew", "StateSnapshot"]
    );
    let snapshot = events.last().unwrap();
    assert_eq!(snapshot["session_type"], "break");
    assert_eq!(snapshot["display"], "00:02");
    assert_eq!(snapshot["running"], false);

    let report = garden_json(dir.path());
    assert_eq!(report["restored"], true);
    assert_eq!(report["progress"], 1);
}

#[test]
fn test_simulation_stops_at_completion_without_auto_start() {
    let dir = TempDir::new().unwrap();
    let out = run_cli_success(
        dir.path(),
        &["simulate", "--ticks", "50", "--work-secs", "1", "--break-secs", "1"],
    );
    let grew = json_lines(&out)
        .iter()
        .filter(|e| e["type"] == "GardenGrew")
        .count();
    assert_eq!(grew, 1);
}

#[test]
fn test_auto_start_cycles_sessions() {
    let dir = TempDir::new().unwrap();
    // Each work+break cycle takes (1+1) + (1+1) ticks.
    run_cli_success(
        dir.path(),
        &[
            "simulate",
            "--ticks",
            "12",
            "--work-secs",
            "1",
            "--break-secs",
            "1",
            "--auto-start",
        ],
    );
    assert_eq!(garden_json(dir.path())["progress"], 3);
}

#[test]
fn test_flat_profile_counts_plants() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["config", "set", "garden.profile", "flat"]);
    run_cli_success(
        dir.path(),
        &["simulate", "--ticks", "1", "--work-secs", "0"],
    );
    run_cli_success(
        dir.path(),
        &["simulate", "--ticks", "1", "--work-secs", "0"],
    );

    let report = garden_json(dir.path());
    assert_eq!(report["key"], "plantCount");
    assert_eq!(report["garden"], 2);

    let text = run_cli_success(dir.path(), &["garden", "show"]);
    assert!(text.contains("Plants grown: 2"));
}

#[test]
fn test_garden_reset() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["simulate", "--ticks", "1", "--work-secs", "0"]);
    assert_eq!(garden_json(dir.path())["progress"], 1);

    let out = run_cli_success(dir.path(), &["garden", "reset"]);
    assert!(out.contains("garden reset"));
    assert_eq!(garden_json(dir.path())["progress"], 0);
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let out = run_cli_success(dir.path(), &["config", "get", "timer.work_secs"]);
    assert_eq!(out.trim(), "1500");

    run_cli_success(dir.path(), &["config", "set", "timer.work_secs", "60"]);
    let out = run_cli_success(dir.path(), &["config", "get", "timer.work_secs"]);
    assert_eq!(out.trim(), "60");

    run_cli_success(dir.path(), &["config", "reset"]);
    let out = run_cli_success(dir.path(), &["config", "get", "timer.work_secs"]);
    assert_eq!(out.trim(), "1500");
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "garden.colour", "green"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));

    let (_, _, code) = run_cli(dir.path(), &["config", "get", "garden.colour"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_set_refuses_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let original = "[timer]\nwork_secs = 60\n[garden]\nsize = 0\n";
    std::fs::write(&path, original).unwrap();

    let (stdout, stderr, code) = run_cli(dir.path(), &["config", "set", "log.level", "debug"]);
    assert_ne!(code, 0);
    assert!(!stdout.contains("ok"));
    assert!(stderr.contains("config reset"), "{stderr}");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);

    run_cli_success(dir.path(), &["config", "reset"]);
    let out = run_cli_success(dir.path(), &["config", "get", "garden.size"]);
    assert_eq!(out.trim(), "6");
}

#[test]
fn test_malformed_garden_falls_back_silently() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["config", "set", "garden.storage_key", "plantCount"]);
    // A flat count stored under the key a staged garden now reads from.
    run_cli_success(dir.path(), &["config", "set", "garden.profile", "flat"]);
    run_cli_success(dir.path(), &["simulate", "--ticks", "1", "--work-secs", "0"]);
    run_cli_success(dir.path(), &["config", "set", "garden.profile", "staged"]);

    let report = garden_json(dir.path());
    assert_eq!(report["restored"], false);
    assert_eq!(report["progress"], 0);
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    let out = run_cli_success(dir.path(), &["completions", "bash"]);
    assert!(out.contains("pomogarden-cli"));
}

#[test]
fn test_run_grows_garden_from_keyboard() {
    let dir = TempDir::new().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_pomogarden-cli"))
        .args(["run", "--work-secs", "1", "--break-secs", "1"])
        .env("POMOGARDEN_DATA_DIR", dir.path())
        .env("POMOGARDEN_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn run");

    let mut stdin = child.stdin.take().unwrap();
    writeln!(stdin, "s").unwrap();
    // Work takes two ticks: one to reach 00:00, one to complete.
    thread::sleep(Duration::from_millis(3500));
    writeln!(stdin, "g").unwrap();
    writeln!(stdin, "q").unwrap();
    drop(stdin);

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Plot 1 grew into a seed"), "{stdout}");
    assert!(stdout.contains("Break"), "{stdout}");

    assert_eq!(garden_json(dir.path())["progress"], 1);
}

#[test]
fn test_run_exits_when_stdin_closes() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_pomogarden-cli"))
        .arg("run")
        .env("POMOGARDEN_DATA_DIR", dir.path())
        .env("POMOGARDEN_LOG", "off")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Your Garden"));
    assert!(stdout.contains("Work Session 25:00  (stopped)"));
}
