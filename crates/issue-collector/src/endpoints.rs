//! Snyk API URL 구성
//!
//! v1 API(aggregated-issues, paths)와 REST API(code 이슈)는 서로 다른 기본 URL을
//! 사용합니다. 두 URL 모두 생성 시점에 주입되므로 테스트에서 스텁 서버로 교체할 수 있습니다.

use snyktix_core::config::SnykConfig;
use snyktix_core::types::Severity;
use url::Url;

use crate::error::IssueCollectorError;

/// Snyk API 기본 URL 묶음
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnykEndpoints {
    api_base: String,
    rest_base: String,
    rest_version: String,
}

impl SnykEndpoints {
    /// 새 엔드포인트 묶음을 생성합니다. 끝의 `/`는 제거됩니다.
    pub fn new(
        api_base: impl Into<String>,
        rest_base: impl Into<String>,
        rest_version: impl Into<String>,
    ) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_owned(),
            rest_base: rest_base.into().trim_end_matches('/').to_owned(),
            rest_version: rest_version.into(),
        }
    }

    /// core의 `SnykConfig`에서 엔드포인트를 생성합니다.
    pub fn from_core(config: &SnykConfig) -> Self {
        Self::new(
            config.endpoint.clone(),
            config.rest_endpoint.clone(),
            config.rest_api_version.clone(),
        )
    }

    /// v1 API 기본 URL
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// REST API 기본 URL
    pub fn rest_base(&self) -> &str {
        &self.rest_base
    }

    /// REST API `version` 값
    pub fn rest_version(&self) -> &str {
        &self.rest_version
    }

    /// 기본 URL이 http(s) URL인지 검증합니다.
    pub fn validate(&self) -> Result<(), IssueCollectorError> {
        for (field, value) in [("endpoint", &self.api_base), ("rest_endpoint", &self.rest_base)] {
            let parsed = Url::parse(value)
                .map_err(|e| IssueCollectorError::config(field, format!("'{value}': {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(IssueCollectorError::config(
                    field,
                    format!("'{value}' must use http or https"),
                ));
            }
        }
        if self.rest_version.trim().is_empty() {
            return Err(IssueCollectorError::config(
                "rest_api_version",
                "must not be empty",
            ));
        }
        Ok(())
    }

    /// `POST /v1/org/{org}/project/{project}/aggregated-issues`
    pub fn aggregated_issues(&self, org_id: &str, project_id: &str) -> String {
        format!(
            "{}/v1/org/{org_id}/project/{project_id}/aggregated-issues",
            self.api_base
        )
    }

    /// `GET /v1/org/{org}/project/{project}/issue/{id}/paths`
    pub fn issue_paths(&self, org_id: &str, project_id: &str, issue_id: &str) -> String {
        format!(
            "{}/v1/org/{org_id}/project/{project_id}/issue/{issue_id}/paths",
            self.api_base
        )
    }

    /// `GET /v3/orgs/{org}/issues?project_id=&severity=&version=`
    pub fn code_issues(
        &self,
        org_id: &str,
        project_id: &str,
        severity: Severity,
    ) -> Result<String, IssueCollectorError> {
        self.rest_url(
            &format!("/v3/orgs/{org_id}/issues"),
            &[
                ("project_id", project_id),
                ("severity", severity.as_str()),
                ("version", self.rest_version.as_str()),
            ],
        )
    }

    /// `GET /v3/orgs/{org}/issues/detail/code/{id}?project_id=&version=`
    pub fn code_issue_detail(
        &self,
        org_id: &str,
        project_id: &str,
        issue_id: &str,
    ) -> Result<String, IssueCollectorError> {
        self.rest_url(
            &format!("/v3/orgs/{org_id}/issues/detail/code/{issue_id}"),
            &[("project_id", project_id), ("version", self.rest_version.as_str())],
        )
    }

    /// `links.next` 값을 요청 가능한 URL로 변환합니다.
    ///
    /// 절대 URL은 그대로 사용하고, 상대 경로는 REST 기본 URL 뒤에 붙입니다.
    pub fn resolve_next(&self, next: &str) -> String {
        if next.starts_with("http://") || next.starts_with("https://") {
            next.to_owned()
        } else if next.starts_with('/') {
            format!("{}{next}", self.rest_base)
        } else {
            format!("{}/{next}", self.rest_base)
        }
    }

    fn rest_url(&self, path: &str, params: &[(&str, &str)]) -> Result<String, IssueCollectorError> {
        let url = Url::parse_with_params(&format!("{}{path}", self.rest_base), params)
            .map_err(|e| IssueCollectorError::config("rest_endpoint", format!("{e}")))?;
        Ok(url.into())
    }
}

impl Default for SnykEndpoints {
    fn default() -> Self {
        Self::from_core(&SnykConfig::default())
    }
}
