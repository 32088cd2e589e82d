//! Integration tests for run configuration resolution.
//!
//! Resolves complete input sets the way the action receives them.

use std::collections::HashMap;

use mdsbom_core::config::{DEFAULT_SCAN_COMMAND, DEFAULT_SERVICE_URL};
use mdsbom_core::{InputSource, RunConfig};

fn inputs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

/// Inputs as a workflow typically passes them: token, workspace, image.
#[test]
fn test_typical_workflow_inputs() {
    let config = RunConfig::resolve(&inputs(&[
        ("mayhem-token", "tok123"),
        ("workspace", "ACME"),
        ("image", "repo/img:tag"),
    ]));

    assert_eq!(config.auth_token(), "tok123");
    assert_eq!(config.workspace_id(), "acme");
    assert_eq!(config.image_ref(), "repo/img:tag");
    assert_eq!(config.service_base_url(), DEFAULT_SERVICE_URL);
    assert_eq!(config.scan_command(), DEFAULT_SCAN_COMMAND);
    assert_eq!(config.sarif_output_path(), "");
    assert!(!config.fail_on_defects());
}

/// Runners pass every declared input, using empty strings for unset ones.
#[test]
fn test_declared_but_empty_inputs_use_defaults() {
    let all_empty = inputs(&[
        ("mayhem-url", ""),
        ("mayhem-token", ""),
        ("sarif-output", ""),
        ("fail-on-defects", ""),
        ("workspace", ""),
        ("image", ""),
        ("command", ""),
    ]);

    assert_eq!(RunConfig::resolve(&all_empty), RunConfig::default());
}

#[test]
fn test_custom_input_source() {
    struct Fixed;

    impl InputSource for Fixed {
        fn raw_input(&self, name: &str) -> Option<String> {
            match name {
                "workspace" => Some(" Red-Team ".to_owned()),
                "mayhem-url" => Some("http://localhost:8080".to_owned()),
                _ => None,
            }
        }
    }

    let config = RunConfig::resolve(&Fixed);
    assert_eq!(config.workspace_id(), "red-team");
    assert_eq!(config.service_base_url(), "http://localhost:8080");
}

#[test]
fn test_resolved_config_serializes_redacted() {
    let config = RunConfig::resolve(&inputs(&[("mayhem-token", "tok123")]));
    let json = serde_json::to_value(config.redacted()).expect("serialize");
    assert_eq!(json["auth_token"], "***");
    assert_eq!(json["scan_command"], "grype");
}
