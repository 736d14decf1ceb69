//! snyktix.toml 통합 설정 테스트
//!
//! - snyktix.toml.example 파싱 테스트
//! - 부분 설정 (일부 섹션만) 로딩 테스트
//! - 환경변수 우선순위 테스트
//! - 빈 파일 / 잘못된 형식 에러 테스트

use snyktix_core::config::SnyktixConfig;
use snyktix_core::error::{ConfigError, SnyktixError};

// =============================================================================
// snyktix.toml.example 파싱 테스트
// =============================================================================

#[test]
fn example_config_parses_successfully() {
    let content = include_str!("../../../snyktix.toml.example");
    let config = SnyktixConfig::parse(content).expect("example config should parse");

    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.general.log_format, "pretty");
    assert_eq!(config.snyk.endpoint, "https://snyk.io/api");
    assert_eq!(config.filter.severity, "high");
}

#[test]
fn example_config_passes_validation() {
    let content = include_str!("../../../snyktix.toml.example");
    let config = SnyktixConfig::parse(content).expect("should parse");
    config
        .validate()
        .expect("example config should pass validation");
}

#[test]
fn example_config_matches_code_defaults() {
    let content = include_str!("../../../snyktix.toml.example");
    let example = SnyktixConfig::parse(content).expect("should parse");
    let defaults = SnyktixConfig::default();

    assert_eq!(example.general.log_level, defaults.general.log_level);
    assert_eq!(example.general.log_format, defaults.general.log_format);
    assert_eq!(example.snyk.endpoint, defaults.snyk.endpoint);
    assert_eq!(example.snyk.rest_endpoint, defaults.snyk.rest_endpoint);
    assert_eq!(example.snyk.rest_api_version, defaults.snyk.rest_api_version);
    assert_eq!(example.snyk.timeout_secs, defaults.snyk.timeout_secs);
    assert_eq!(example.filter.severity, defaults.filter.severity);
    assert_eq!(example.filter.issue_type, defaults.filter.issue_type);
    assert_eq!(
        example.filter.priority_score_threshold,
        defaults.filter.priority_score_threshold
    );
    assert_eq!(example.filter.maturity, defaults.filter.maturity);
}

// =============================================================================
// 부분 설정 테스트
// =============================================================================

#[test]
fn partial_config_filter_only() {
    let toml = r#"
[filter]
severity = "low"
priority_score_threshold = 600
"#;
    let config = SnyktixConfig::parse(toml).expect("should parse");
    assert_eq!(config.filter.severity, "low");
    assert_eq!(config.filter.priority_score_threshold, 600);
    assert_eq!(config.filter.issue_type, "all");
    assert_eq!(config.snyk.rest_endpoint, "https://api.snyk.io");
    config.validate().expect("should validate");
}

#[test]
fn partial_config_snyk_only() {
    let toml = r#"
[snyk]
org_id = "b8c0f1d2"
endpoint = "http://localhost:8080/api"
"#;
    let config = SnyktixConfig::parse(toml).expect("should parse");
    assert_eq!(config.snyk.org_id, "b8c0f1d2");
    assert_eq!(config.snyk.endpoint, "http://localhost:8080/api");
    assert_eq!(config.filter.severity, "high");
    config.validate().expect("should validate");
}

// =============================================================================
// 환경변수 오버라이드 테스트
// =============================================================================

#[test]
#[serial_test::serial]
fn env_override_takes_precedence_over_toml() {
    let toml = r#"
[snyk]
api_token = "from-file"
"#;

    let original = std::env::var("SNYKTIX_SNYK_API_TOKEN").ok();
    // SAFETY: serial_test로 직렬화되어 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var("SNYKTIX_SNYK_API_TOKEN", "from-env");
    }

    let mut config = SnyktixConfig::parse(toml).expect("should parse");
    config.apply_env_overrides();
    let result = config.snyk.api_token.clone();

    // SAFETY: 테스트 정리
    unsafe {
        match original {
            Some(val) => std::env::set_var("SNYKTIX_SNYK_API_TOKEN", val),
            None => std::env::remove_var("SNYKTIX_SNYK_API_TOKEN"),
        }
    }

    assert_eq!(result, "from-env");
}

#[test]
#[serial_test::serial]
fn env_override_csv_for_maturity() {
    let original = std::env::var("SNYKTIX_FILTER_MATURITY").ok();
    // SAFETY: serial_test로 직렬화되어 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var("SNYKTIX_FILTER_MATURITY", "mature, proof-of-concept");
    }

    let mut config = SnyktixConfig::parse("").expect("should parse");
    config.apply_env_overrides();
    let result = config.filter.maturity.clone();

    // SAFETY: 테스트 정리
    unsafe {
        match original {
            Some(val) => std::env::set_var("SNYKTIX_FILTER_MATURITY", val),
            None => std::env::remove_var("SNYKTIX_FILTER_MATURITY"),
        }
    }

    assert_eq!(result, vec!["mature", "proof-of-concept"]);
}

#[test]
#[serial_test::serial]
fn env_override_numeric_field() {
    let original = std::env::var("SNYKTIX_FILTER_PRIORITY_SCORE_THRESHOLD").ok();
    // SAFETY: serial_test로 직렬화되어 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var("SNYKTIX_FILTER_PRIORITY_SCORE_THRESHOLD", "750");
    }

    let mut config = SnyktixConfig::parse("").expect("should parse");
    config.apply_env_overrides();
    let result = config.filter.priority_score_threshold;

    // SAFETY: 테스트 정리
    unsafe {
        match original {
            Some(val) => std::env::set_var("SNYKTIX_FILTER_PRIORITY_SCORE_THRESHOLD", val),
            None => std::env::remove_var("SNYKTIX_FILTER_PRIORITY_SCORE_THRESHOLD"),
        }
    }

    assert_eq!(result, 750);
}

#[tokio::test]
#[serial_test::serial]
async fn load_rejects_invalid_env_override() {
    let temp_dir = tempfile::tempdir().expect("should create temp dir");
    let path = temp_dir.path().join("snyktix.toml");
    std::fs::write(&path, "[filter]\nseverity = \"low\"\n").expect("should write");

    let original = std::env::var("SNYKTIX_FILTER_SEVERITY").ok();
    // SAFETY: serial_test로 직렬화되어 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var("SNYKTIX_FILTER_SEVERITY", "urgent");
    }

    let result = SnyktixConfig::load(&path).await;

    // SAFETY: 테스트 정리
    unsafe {
        match original {
            Some(val) => std::env::set_var("SNYKTIX_FILTER_SEVERITY", val),
            None => std::env::remove_var("SNYKTIX_FILTER_SEVERITY"),
        }
    }

    let err = result.expect_err("env override should be validated");
    assert!(matches!(
        err,
        SnyktixError::Config(ConfigError::InvalidValue { .. })
    ));
}

// =============================================================================
// 에러 케이스
// =============================================================================

#[test]
fn whitespace_only_parses_with_defaults() {
    let config = SnyktixConfig::parse("   \n\n  ").expect("should parse");
    assert_eq!(config.filter.severity, "high");
}

#[test]
fn malformed_toml_returns_parse_error() {
    let err = SnyktixConfig::parse("[filter\nseverity = \"low\"").unwrap_err();
    assert!(matches!(
        err,
        SnyktixError::Config(ConfigError::ParseFailed { .. })
    ));
}

#[test]
fn wrong_type_for_numeric_field() {
    let toml = r#"
[filter]
priority_score_threshold = "high"
"#;
    assert!(SnyktixConfig::parse(toml).is_err());
}

#[test]
fn unknown_section_is_ignored() {
    let toml = r#"
[jira]
project_key = "SEC"

[filter]
severity = "critical"
"#;
    let config = SnyktixConfig::parse(toml).expect("unknown sections should be ignored");
    assert_eq!(config.filter.severity, "critical");
}

#[tokio::test]
async fn from_file_nonexistent_returns_file_not_found() {
    let err = SnyktixConfig::from_file("/nonexistent/snyktix.toml")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SnyktixError::Config(ConfigError::FileNotFound { .. })
    ));
}

#[tokio::test]
#[serial_test::serial]
async fn load_example_config_from_disk() {
    let temp_dir = tempfile::tempdir().expect("should create temp dir");
    let path = temp_dir.path().join("snyktix.toml");
    std::fs::write(&path, include_str!("../../../snyktix.toml.example")).expect("should write");

    let config = SnyktixConfig::load(&path).await.expect("should load");
    assert_eq!(config.snyk.timeout_secs, 30);
}
