//! 이슈 수집기 설정
//!
//! [`CollectorConfig`]는 core의 [`SnykConfig`]를 기반으로
//! 수집기 전용 설정(페이지 상한 등)을 더합니다.
//!
//! # 사용 예시
//! ```
//! use snyktix_core::config::SnykConfig;
//! use snyktix_issue_collector::CollectorConfig;
//!
//! let snyk = SnykConfig {
//!     org_id: "my-org".to_owned(),
//!     ..SnykConfig::default()
//! };
//! let config = CollectorConfig::from_core(&snyk);
//! assert!(config.validate().is_ok());
//! ```

use snyktix_core::config::{MAX_TIMEOUT_SECS, SnykConfig};

use crate::endpoints::SnykEndpoints;
use crate::error::IssueCollectorError;

/// severity 하나당 따라갈 수 있는 최대 페이지 수 기본값
pub const DEFAULT_MAX_PAGES: usize = 1000;

/// 페이지 수 설정 상한
const MAX_PAGES_LIMIT: usize = 100_000;

/// 이슈 수집기 설정
#[derive(Debug, Clone, PartialEq)]
pub struct CollectorConfig {
    /// Snyk 조직 ID
    pub org_id: String,
    /// API 토큰
    pub api_token: String,
    /// API 기본 URL 묶음
    pub endpoints: SnykEndpoints,
    /// HTTP 요청 타임아웃 (초)
    pub timeout_secs: u64,

    // --- 확장 설정 (core에 없는 추가 필드) ---
    /// severity 하나당 code 이슈 목록 최대 페이지 수
    pub max_pages: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self::from_core(&SnykConfig::default())
    }
}

impl CollectorConfig {
    /// core의 `SnykConfig`에서 수집기 설정을 생성합니다.
    pub fn from_core(core: &SnykConfig) -> Self {
        Self {
            org_id: core.org_id.clone(),
            api_token: core.api_token.clone(),
            endpoints: SnykEndpoints::from_core(core),
            timeout_secs: core.timeout_secs,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// 설정값의 유효성을 검증합니다.
    ///
    /// API 토큰은 실제 HTTP 클라이언트를 만들 때 검사합니다.
    pub fn validate(&self) -> Result<(), IssueCollectorError> {
        if self.org_id.trim().is_empty() {
            return Err(IssueCollectorError::config("org_id", "must not be empty"));
        }

        self.endpoints.validate()?;

        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(IssueCollectorError::config(
                "timeout_secs",
                format!("must be 1-{MAX_TIMEOUT_SECS}"),
            ));
        }

        if self.max_pages == 0 || self.max_pages > MAX_PAGES_LIMIT {
            return Err(IssueCollectorError::config(
                "max_pages",
                format!("must be 1-{MAX_PAGES_LIMIT}"),
            ));
        }

        Ok(())
    }
}

/// 수집기 설정 빌더
#[derive(Default)]
pub struct CollectorConfigBuilder {
    config: CollectorConfig,
}

impl CollectorConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 조직 ID를 설정합니다.
    pub fn org_id(mut self, org_id: impl Into<String>) -> Self {
        self.config.org_id = org_id.into();
        self
    }

    /// API 토큰을 설정합니다.
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.config.api_token = token.into();
        self
    }

    /// API 기본 URL 묶음을 설정합니다.
    pub fn endpoints(mut self, endpoints: SnykEndpoints) -> Self {
        self.config.endpoints = endpoints;
        self
    }

    /// HTTP 타임아웃(초)을 설정합니다.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// 페이지 상한을 설정합니다.
    pub fn max_pages(mut self, max: usize) -> Self {
        self.config.max_pages = max;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    pub fn build(self) -> Result<CollectorConfig, IssueCollectorError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
