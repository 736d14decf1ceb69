//! 설정 관리 -- snyktix.toml 파싱 및 런타임 설정
//!
//! [`SnyktixConfig`]는 모든 구성 요소의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`SNYKTIX_SNYK_API_TOKEN=...` 형식)
//! 3. 설정 파일 (`snyktix.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), snyktix_core::error::SnyktixError> {
//! use snyktix_core::config::SnyktixConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = SnyktixConfig::load("snyktix.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = SnyktixConfig::parse("[filter]\nseverity = \"medium\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, SnyktixError};
use crate::types::{ExploitMaturity, IssueKind, Severity};

/// 우선순위 점수 상한 (Snyk priority score 범위)
pub const MAX_PRIORITY_SCORE: u32 = 1000;

/// HTTP 타임아웃 상한 (초)
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// snyktix 통합 설정
///
/// `snyktix.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnyktixConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// Snyk API 접속 설정
    #[serde(default)]
    pub snyk: SnykConfig,
    /// 이슈 필터 설정
    #[serde(default)]
    pub filter: FilterConfig,
}

impl SnyktixConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SnyktixError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 파일이 없으면 기본값에서 시작하는 `load` 변형입니다.
    ///
    /// CLI처럼 설정 파일이 선택 사항인 호출자를 위한 것입니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SnyktixError> {
        let mut config = match Self::from_file(path).await {
            Ok(config) => config,
            Err(SnyktixError::Config(ConfigError::FileNotFound { .. })) => Self::default(),
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, SnyktixError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SnyktixError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                SnyktixError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, SnyktixError> {
        toml::from_str(toml_str).map_err(|e| {
            SnyktixError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `SNYKTIX_{SECTION}_{FIELD}`
    /// 예: `SNYKTIX_SNYK_ORG_ID=1234`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "SNYKTIX_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "SNYKTIX_GENERAL_LOG_FORMAT");

        // Snyk
        override_string(&mut self.snyk.org_id, "SNYKTIX_SNYK_ORG_ID");
        override_string(&mut self.snyk.api_token, "SNYKTIX_SNYK_API_TOKEN");
        override_string(&mut self.snyk.endpoint, "SNYKTIX_SNYK_ENDPOINT");
        override_string(&mut self.snyk.rest_endpoint, "SNYKTIX_SNYK_REST_ENDPOINT");
        override_string(
            &mut self.snyk.rest_api_version,
            "SNYKTIX_SNYK_REST_API_VERSION",
        );
        override_u64(&mut self.snyk.timeout_secs, "SNYKTIX_SNYK_TIMEOUT_SECS");

        // Filter
        override_string(&mut self.filter.severity, "SNYKTIX_FILTER_SEVERITY");
        override_string(&mut self.filter.issue_type, "SNYKTIX_FILTER_ISSUE_TYPE");
        override_u32(
            &mut self.filter.priority_score_threshold,
            "SNYKTIX_FILTER_PRIORITY_SCORE_THRESHOLD",
        );
        override_csv(&mut self.filter.maturity, "SNYKTIX_FILTER_MATURITY");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), SnyktixError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(invalid(
                "general.log_level",
                format!("must be one of: {}", valid_levels.join(", ")),
            ));
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(invalid(
                "general.log_format",
                format!("must be one of: {}", valid_formats.join(", ")),
            ));
        }

        // 엔드포인트 검증
        for (field, value) in [
            ("snyk.endpoint", &self.snyk.endpoint),
            ("snyk.rest_endpoint", &self.snyk.rest_endpoint),
        ] {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(invalid(field, "must be an http(s) URL".to_owned()));
            }
        }

        if self.snyk.rest_api_version.trim().is_empty() {
            return Err(invalid(
                "snyk.rest_api_version",
                "must not be empty".to_owned(),
            ));
        }

        if self.snyk.timeout_secs == 0 || self.snyk.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(invalid(
                "snyk.timeout_secs",
                format!("must be 1-{MAX_TIMEOUT_SECS}"),
            ));
        }

        // 필터 검증
        if Severity::from_str_loose(&self.filter.severity).is_none() {
            return Err(invalid(
                "filter.severity",
                "must be one of: critical, high, medium, low".to_owned(),
            ));
        }

        let issue_type = self.filter.issue_type.trim();
        if !(issue_type.is_empty()
            || issue_type.eq_ignore_ascii_case("all")
            || matches!(
                IssueKind::from_str_loose(issue_type),
                Some(IssueKind::Vuln | IssueKind::License | IssueKind::Configuration)
            ))
        {
            return Err(invalid(
                "filter.issue_type",
                "must be one of: all, vuln, license, configuration".to_owned(),
            ));
        }

        if self.filter.priority_score_threshold > MAX_PRIORITY_SCORE {
            return Err(invalid(
                "filter.priority_score_threshold",
                format!("must be 0-{MAX_PRIORITY_SCORE}"),
            ));
        }

        for level in &self.filter.maturity {
            if !level.trim().is_empty() && ExploitMaturity::parse(level).is_none() {
                return Err(invalid(
                    "filter.maturity",
                    format!(
                        "'{level}' is not a valid maturity level, must be one of: no-data, no-known-exploit, proof-of-concept, mature"
                    ),
                ));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: String) -> SnyktixError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason,
    }
    .into()
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// Snyk API 접속 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnykConfig {
    /// 조직 ID
    pub org_id: String,
    /// API 토큰
    pub api_token: String,
    /// v1 API 기본 URL (aggregated-issues, paths)
    pub endpoint: String,
    /// REST(v3) API 기본 URL (code 이슈)
    pub rest_endpoint: String,
    /// REST API `version` 쿼리 값
    pub rest_api_version: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for SnykConfig {
    fn default() -> Self {
        Self {
            org_id: String::new(),
            api_token: String::new(),
            endpoint: "https://snyk.io/api".to_owned(),
            rest_endpoint: "https://api.snyk.io".to_owned(),
            rest_api_version: "2021-08-20~experimental".to_owned(),
            timeout_secs: 30,
        }
    }
}

/// 이슈 필터 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// 심각도 임계값 (critical, high, medium, low)
    pub severity: String,
    /// 이슈 종류 (all, vuln, license, configuration)
    pub issue_type: String,
    /// 최소 우선순위 점수 (0이면 하한 없음)
    pub priority_score_threshold: u32,
    /// 익스플로잇 성숙도 필터 (비어 있으면 필터 없음)
    pub maturity: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            severity: "high".to_owned(),
            issue_type: "all".to_owned(),
            priority_score_threshold: 0,
            maturity: Vec::new(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_u32(target: &mut u32, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u32>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u32 from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
    }
}
