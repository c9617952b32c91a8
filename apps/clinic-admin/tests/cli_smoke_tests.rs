//! CLI smoke tests for the clinic-admin binary
//!
//! Every run points at a closed local port, so answers come from the seeded
//! fallback store.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Helper to run the clinic-admin binary with given arguments
fn run_clinic_admin(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_clinic-admin"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute clinic-admin")
}

/// Write a config that keeps everything inside `dir` and disables simulated latency.
fn write_config(dir: &Path, base_url: &str) -> PathBuf {
    let home = dir.join("home").to_string_lossy().replace('\\', "/");
    let yaml = format!(
        r#"
home_dir: "{home}"
logging:
  default:
    console_level: "off"
    file: ""
modules:
  clinic_admin:
    base_url: "{base_url}"
    fallback_delay_ms: 0
    page_size: 2
"#
    );
    let path = dir.join("config.yaml");
    fs::write(&path, yaml).unwrap();
    path
}

fn offline_config() -> (TempDir, String) {
    let tmp = TempDir::new().unwrap();
    let cfg = write_config(tmp.path(), "http://127.0.0.1:9/api");
    let cfg = cfg.to_string_lossy().to_string();
    (tmp, cfg)
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_cli_help_command() {
    let output = run_clinic_admin(&["--help"]);
    assert!(output.status.success(), "Help command should succeed");

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    for cmd in ["users", "exams", "staff", "stats", "trends", "session", "check"] {
        assert!(stdout.contains(cmd), "Should list '{}' subcommand", cmd);
    }
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--base-url"));
}

#[test]
fn test_cli_version_command() {
    let output = run_clinic_admin(&["--version"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("clinic-admin"));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_clinic_admin(&["invalid-command"]);
    assert!(!output.status.success(), "Invalid command should fail");
}

#[test]
fn test_cli_invalid_role_is_rejected() {
    let (_tmp, cfg) = offline_config();
    let output = run_clinic_admin(&["--config", &cfg, "users", "--role", "pasien"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_check_passes_for_valid_config() {
    let (_tmp, cfg) = offline_config();
    let output = run_clinic_admin(&["--config", &cfg, "check"]);

    assert!(output.status.success(), "{:?}", output);
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Configuration check passed"));
    assert!(stdout.contains("127.0.0.1:9"));
}

#[test]
fn test_cli_check_fails_for_bad_base_url() {
    let (_tmp, cfg) = offline_config();
    let output = run_clinic_admin(&["--config", &cfg, "--base-url", "not a url", "check"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_unknown_module_key_fails() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.yaml");
    let home = tmp.path().join("home").to_string_lossy().replace('\\', "/");
    fs::write(
        &path,
        format!("home_dir: \"{home}\"\nmodules:\n  clinic_admin:\n    base_uri: \"http://x\"\n"),
    )
    .unwrap();

    let output = run_clinic_admin(&["--config", &path.to_string_lossy(), "check"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_print_config() {
    let (_tmp, cfg) = offline_config();
    let output = run_clinic_admin(&["--config", &cfg, "--print-config"]);

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("clinic_admin"));
    assert!(stdout.contains("fallback_delay_ms"));
}

#[test]
fn test_cli_stats_from_fallback_store() {
    let (_tmp, cfg) = offline_config();
    let output = run_clinic_admin(&["--config", &cfg, "stats"]);

    assert!(output.status.success(), "{:?}", output);
    let stdout = stdout_of(&output);
    assert!(stdout.contains("total users:         5"));
    assert!(stdout.contains("  patients:          2"));
    assert!(stdout.contains("total examinations:  3"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("remote service unavailable"));
}

#[test]
fn test_cli_default_command_is_stats() {
    let (_tmp, cfg) = offline_config();
    let output = run_clinic_admin(&["--config", &cfg]);

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("total users:"));
}

#[test]
fn test_cli_users_filtered_and_paged() {
    let (_tmp, cfg) = offline_config();

    let output = run_clinic_admin(&["--config", &cfg, "users", "--role", "patient"]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Alice Johnson"));
    assert!(stdout.contains("Bob Brown"));
    assert!(!stdout.contains("Dr. John Smith"));
    assert!(stdout.contains("page 1/1 (2 total)"));

    let output = run_clinic_admin(&["--config", &cfg, "users", "--page", "3"]);
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Dr. Emily Davis"));
    assert!(stdout.contains("page 3/3 (5 total)"));
}

#[test]
fn test_cli_staff_view() {
    let (_tmp, cfg) = offline_config();
    let output = run_clinic_admin(&["--config", &cfg, "staff", "2"]);

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Patients of staff 2:"));
    assert!(stdout.contains("Alice Johnson"));
    assert!(stdout.contains("Unassigned patients: 0"));
}

#[test]
fn test_cli_session_show_and_clear() {
    let (tmp, cfg) = offline_config();

    let output = run_clinic_admin(&["--config", &cfg, "session", "show"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("not signed in"));

    let session_file = tmp.path().join("home").join("session.json");
    fs::write(
        &session_file,
        r#"{"id":"3","email":"alice@patient.example","role":"patient","name":"Alice Johnson"}"#,
    )
    .unwrap();

    let output = run_clinic_admin(&["--config", &cfg, "session", "show"]);
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Alice Johnson"));
    assert!(stdout.contains("role=patient"));

    let output = run_clinic_admin(&["--config", &cfg, "session", "clear"]);
    assert!(output.status.success());
    assert!(!session_file.exists());

    // Clearing twice is fine.
    let output = run_clinic_admin(&["--config", &cfg, "session", "clear"]);
    assert!(output.status.success());
}

#[test]
fn test_cli_malformed_session_file_fails() {
    let (tmp, cfg) = offline_config();
    let home = tmp.path().join("home");
    fs::create_dir_all(&home).unwrap();
    fs::write(home.join("session.json"), "not json").unwrap();

    let output = run_clinic_admin(&["--config", &cfg, "session", "show"]);
    assert!(!output.status.success());
}
