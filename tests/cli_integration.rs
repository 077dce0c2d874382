//! Integration tests for the relaynote CLI.
//!
//! The ignored tests require a running relaynote service.
//! Skip with: cargo test --test cli_integration -- --ignored

use std::process::Command;

#[test]
fn test_version_command() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--", "version"])
        .output()
        .expect("Failed to run command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Relaynote"), "Unexpected output: {}", stdout);
}

#[test]
fn test_latest_command_against_unreachable_service() {
    // Nothing listens on this port; the command must fail cleanly.
    let output = Command::new("cargo")
        .args([
            "run",
            "--quiet",
            "--",
            "latest",
            "--url",
            "http://127.0.0.1:1",
        ])
        .output()
        .expect("Failed to run command");

    assert!(!output.status.success());
}

#[test]
#[ignore] // Requires a running relaynote service at the default port
fn test_latest_before_any_webhook_reports_not_ready() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--", "latest"])
        .output()
        .expect("Failed to run command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not ready"), "Unexpected stderr: {}", stderr);
}

#[test]
#[ignore] // Requires a running relaynote service with a configured directory
fn test_share_command() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--", "share", "--text", "integration test"])
        .output()
        .expect("Failed to run command");

    assert!(output.status.success(), "Command failed: {:?}", output);
}
