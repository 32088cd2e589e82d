//! End-to-end tests for the mdsbom-action binary.
//!
//! The environment is cleared for every invocation so inputs from the host runner
//! never leak into a test.

use std::process::{Command, Output};

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mdsbom-action"));
    cmd.env_clear()
        .env("RUNNER_TEMP", std::env::temp_dir())
        .env("RUST_LOG", "off");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("valid UTF-8")
}

#[test]
fn test_inputs_json_resolves_environment() {
    let output = bin()
        .args(["inputs", "--output", "json"])
        .env("INPUT_WORKSPACE", "ACME")
        .env("INPUT_MAYHEM-TOKEN", "tok123")
        .output()
        .expect("binary runs");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("parse");
    assert_eq!(json["workspace_id"], "acme");
    assert_eq!(json["auth_token"], "***");
    assert_eq!(json["service_base_url"], "https://app.mayhem.security");
    assert_eq!(json["scan_command"], "grype");
    assert!(json["validation_error"].is_null());
}

#[test]
fn test_inputs_text_reports_invalid_configuration() {
    let output = bin().arg("inputs").output().expect("binary runs");

    assert!(output.status.success(), "inputs only reports, it never fails");
    let text = stdout(&output);
    assert!(text.contains("Workspace:        (unset)"));
    assert!(text.contains("Invalid:"));
}

#[test]
fn test_render_redacts_token_by_default() {
    let output = bin()
        .arg("render")
        .env("INPUT_WORKSPACE", "acme")
        .env("INPUT_MAYHEM-TOKEN", "tok123")
        .output()
        .expect("binary runs");

    assert!(output.status.success());
    let script = stdout(&output);
    assert!(script.starts_with("set -xe\n"));
    assert!(script.contains("sudo dpkg -i mdsbom.deb"));
    assert!(script.contains("mdsbom login https://app.mayhem.security '***'"));
    assert!(!script.contains("tok123"));
}

#[test]
fn test_render_show_secrets_includes_token() {
    let output = bin()
        .args(["render", "--show-secrets", "--artifact", "/tmp/pkg.deb"])
        .env("INPUT_MAYHEM-TOKEN", "tok123")
        .env("INPUT_MAYHEM-URL", "https://mayhem.example.com/")
        .output()
        .expect("binary runs");

    assert!(output.status.success());
    let script = stdout(&output);
    assert!(script.contains("sudo dpkg -i /tmp/pkg.deb"));
    assert!(script.contains("mdsbom login https://mayhem.example.com/ tok123"));
}

#[test]
fn test_run_fails_job_when_download_fails() {
    let output = bin()
        .env("INPUT_MAYHEM-URL", "http://127.0.0.1:1")
        .env("INPUT_MAYHEM-TOKEN", "tok123")
        .env("INPUT_WORKSPACE", "acme")
        .output()
        .expect("binary runs");

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("::add-mask::tok123"));
    assert!(text.contains("mdsbom action failed with:"));
    assert!(text.contains("::error::"));
    assert!(!text.contains("Exit code:"), "no script ran");
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let output = bin().arg("--no-such-flag").output().expect("binary runs");
    assert_eq!(output.status.code(), Some(2));
}
