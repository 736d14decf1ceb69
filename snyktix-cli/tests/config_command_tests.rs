//! Integration tests for `snyktix config` command.
//!
//! Tests config validation and display functionality with real TOML files.

use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use snyktix_cli::cli::{ConfigAction, ConfigArgs, OutputFormat};
use snyktix_cli::commands::config::{REDACTED, execute, show_report, validation_report};
use snyktix_cli::output::OutputWriter;

const FULL_CONFIG: &str = r#"
[general]
log_level = "debug"
log_format = "json"

[snyk]
org_id = "org-1"
api_token = "super-secret-token"
endpoint = "https://snyk.io/api"
rest_endpoint = "https://api.snyk.io"
timeout_secs = 60

[filter]
severity = "medium"
issue_type = "vuln"
priority_score_threshold = 500
maturity = ["mature", "proof-of-concept"]
"#;

fn write_config(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("should write config");
    path
}

#[tokio::test]
#[serial]
async fn test_config_validate_valid_toml() {
    // Given: A valid config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = write_config(&temp_dir, "snyktix.toml", FULL_CONFIG);

    // When: Validating
    let report = validation_report(&config_path).await;

    // Then: Should be valid
    assert!(report.valid, "valid config should validate: {:?}", report.errors);
    assert!(report.errors.is_empty());
}

#[tokio::test]
#[serial]
async fn test_config_validate_malformed_toml() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = write_config(&temp_dir, "bad.toml", "[general\nlog_level = \"info\"\n");

    let report = validation_report(&config_path).await;

    assert!(!report.valid, "malformed TOML should be invalid");
    assert_eq!(report.errors.len(), 1);
}

#[tokio::test]
#[serial]
async fn test_config_validate_missing_file() {
    let config_path = std::path::PathBuf::from("/nonexistent/snyktix.toml");

    let report = validation_report(&config_path).await;

    assert!(!report.valid, "missing file should be invalid");
    assert!(report.errors[0].contains("not found"));
}

#[tokio::test]
#[serial]
async fn test_config_validate_invalid_severity() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = write_config(&temp_dir, "snyktix.toml", "[filter]\nseverity = \"urgent\"\n");

    let report = validation_report(&config_path).await;

    assert!(!report.valid);
    assert!(report.errors[0].contains("filter.severity"));
}

#[tokio::test]
#[serial]
async fn test_config_validate_empty_file_uses_defaults() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = write_config(&temp_dir, "empty.toml", "");

    let report = validation_report(&config_path).await;

    assert!(report.valid, "empty config should use defaults");
}

#[tokio::test]
#[serial]
async fn test_config_show_full_config_redacts_token() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = write_config(&temp_dir, "snyktix.toml", FULL_CONFIG);

    let report = show_report(&config_path, None)
        .await
        .expect("show should succeed");

    assert!(report.section.is_none());
    assert!(report.config_toml.contains("org-1"));
    assert!(report.config_toml.contains(REDACTED));
    assert!(
        !report.config_toml.contains("super-secret-token"),
        "api token must never be displayed"
    );
}

#[tokio::test]
#[serial]
async fn test_config_show_section() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = write_config(&temp_dir, "snyktix.toml", FULL_CONFIG);

    let report = show_report(&config_path, Some("filter"))
        .await
        .expect("show should succeed");

    assert_eq!(report.section.as_deref(), Some("filter"));
    assert!(report.config_toml.contains("medium"));
    assert!(!report.config_toml.contains("org-1"));
}

#[tokio::test]
#[serial]
async fn test_config_show_unknown_section() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = write_config(&temp_dir, "snyktix.toml", FULL_CONFIG);

    let result = show_report(&config_path, Some("ebpf")).await;

    let err = result.err().expect("unknown section should fail");
    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().contains("unknown section"));
}

#[tokio::test]
#[serial]
async fn test_config_show_missing_file_uses_defaults() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("absent.toml");

    let report = show_report(&config_path, Some("snyk"))
        .await
        .expect("missing file falls back to defaults");

    assert!(report.config_toml.contains("https://snyk.io/api"));
    assert!(!report.config_toml.contains(REDACTED), "empty token stays empty");
}

#[tokio::test]
#[serial]
async fn test_config_show_redacts_env_token() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = write_config(&temp_dir, "snyktix.toml", "[snyk]\norg_id = \"org-1\"\n");

    // SAFETY: env mutation is confined to #[serial] tests.
    unsafe { std::env::set_var("SNYKTIX_SNYK_API_TOKEN", "env-secret") };
    let report = show_report(&config_path, Some("snyk")).await;
    unsafe { std::env::remove_var("SNYKTIX_SNYK_API_TOKEN") };

    let report = report.expect("show should succeed");
    assert!(report.config_toml.contains(REDACTED));
    assert!(!report.config_toml.contains("env-secret"));
}

#[tokio::test]
#[serial]
async fn test_config_validate_command_writes_json_report() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = write_config(&temp_dir, "snyktix.toml", FULL_CONFIG);

    let mut writer = OutputWriter::new(OutputFormat::Json, Vec::new());
    let args = ConfigArgs {
        action: ConfigAction::Validate,
    };
    execute(args, &config_path, &mut writer)
        .await
        .expect("valid config should pass");

    let output = String::from_utf8(writer.into_inner()).expect("valid UTF-8");
    let report: serde_json::Value = serde_json::from_str(&output).expect("json report");
    assert_eq!(report["valid"], true);
    assert_eq!(report["errors"], serde_json::json!([]));
}

#[tokio::test]
#[serial]
async fn test_config_validate_command_fails_after_writing_report() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = write_config(&temp_dir, "snyktix.toml", "[general]\nlog_level = \"loud\"\n");

    let mut writer = OutputWriter::new(OutputFormat::Text, Vec::new());
    let args = ConfigArgs {
        action: ConfigAction::Validate,
    };
    let err = execute(args, &config_path, &mut writer)
        .await
        .expect_err("invalid log level must fail");
    assert_eq!(err.exit_code(), 2);

    let output = String::from_utf8(writer.into_inner()).expect("valid UTF-8");
    assert!(output.contains("INVALID"));
    assert!(output.contains("general.log_level"));
}
