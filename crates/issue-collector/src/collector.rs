//! 이슈 수집기 -- 필터 전송, 분류, 보강을 묶는 진입점
//!
//! [`IssueCollector`]는 프로젝트 하나에 대해 다음을 순서대로 수행합니다.
//!
//! 1. [`IssueQuery`]를 필터 JSON으로 직렬화해 aggregated-issues에 POST
//! 2. 응답을 [`ProjectClassification`]으로 분류
//! 3. 오픈소스 경로 보강 또는 code 이슈 상세 보강 (configuration은 빈 결과)
//!
//! 모든 요청은 순차적으로 await 됩니다.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::classify::{AggregatedIssues, ProjectClassification};
use crate::client::{ReqwestSnykClient, SnykApi};
use crate::code;
use crate::config::CollectorConfig;
use crate::endpoints::SnykEndpoints;
use crate::error::{IssueCollectorError, RequestContext, SnykError};
use crate::filter::IssueQuery;
use crate::open_source;
use crate::tickets::TicketIndex;
use crate::types::{IssueSet, ProjectIssues};

/// Snyk 이슈 수집기
pub struct IssueCollector<C: SnykApi> {
    client: C,
    config: CollectorConfig,
}

impl IssueCollector<ReqwestSnykClient> {
    /// 설정으로부터 reqwest 기반 수집기를 생성합니다.
    ///
    /// 네트워크 호출 전에 설정과 API 토큰을 검증합니다.
    pub fn connect(config: CollectorConfig) -> Result<Self, IssueCollectorError> {
        config.validate()?;
        let client =
            ReqwestSnykClient::new(&config.api_token, Duration::from_secs(config.timeout_secs))
                .map_err(|e| match e {
                    SnykError::ClientBuild(reason) => IssueCollectorError::config("api_token", reason),
                    other => IssueCollectorError::config("api_token", other.to_string()),
                })?;
        Ok(Self { client, config })
    }
}

impl<C: SnykApi> IssueCollector<C> {
    /// 주어진 클라이언트로 수집기를 생성합니다.
    pub fn new(client: C, config: CollectorConfig) -> Result<Self, IssueCollectorError> {
        config.validate()?;
        Ok(Self { client, config })
    }

    /// 수집기 설정
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// 내부 클라이언트
    pub fn client(&self) -> &C {
        &self.client
    }

    /// 프로젝트 하나의 티켓 없는 이슈를 수집합니다.
    ///
    /// # Errors
    ///
    /// - 프로젝트 ID가 비어 있으면 `Config`
    /// - API 호출 실패, 404 포함 (code 목록 조회의 404는 제외) 시 `Api`
    /// - 응답 디코딩 실패 시 `Json` 또는 `UnexpectedResponse`
    pub async fn collect(
        &self,
        project_id: &str,
        query: &IssueQuery,
        tickets: &TicketIndex,
    ) -> Result<IssueSet, IssueCollectorError> {
        if project_id.trim().is_empty() {
            return Err(IssueCollectorError::config("project_id", "must not be empty"));
        }

        let scope = ProjectScope {
            client: &self.client,
            endpoints: &self.config.endpoints,
            org_id: &self.config.org_id,
            project_id,
            tickets,
            max_pages: self.config.max_pages,
        };

        let body = serde_json::to_vec(&query.to_filter()).map_err(|e| IssueCollectorError::Json {
            operation: "aggregated issues filter",
            context: scope.api_context(None),
            reason: e.to_string(),
        })?;

        let url = scope.endpoints.aggregated_issues(scope.org_id, project_id);
        debug!(org_id = %scope.org_id, project_id, url = %url, "requesting aggregated issues");
        let response = self
            .client
            .post(&url, body)
            .await
            .map_err(|source| IssueCollectorError::Api {
                operation: "aggregated issues",
                context: scope.api_context(None),
                source,
            })?;
        let aggregated =
            AggregatedIssues::from_slice(&response).map_err(|e| IssueCollectorError::Json {
                operation: "aggregated issues",
                context: scope.api_context(None),
                reason: e.to_string(),
            })?;

        let issues = match aggregated.classify() {
            ProjectClassification::Configuration => {
                info!(
                    project_id,
                    "configuration (IaC) projects are not supported, skipping project"
                );
                IssueSet::new()
            }
            ProjectClassification::Code => {
                debug!(project_id, "no aggregated issues, collecting code issues");
                code::collect_code_issues(&scope, &query.severities()).await?
            }
            ProjectClassification::OpenSource => {
                debug!(
                    project_id,
                    issues = aggregated.len(),
                    "collecting open source issue paths"
                );
                open_source::collect_open_source_issues(&scope, &aggregated).await?
            }
        };

        info!(
            org_id = %scope.org_id,
            project_id,
            issues = issues.len(),
            "collected issues without tickets"
        );
        Ok(issues)
    }

    /// 여러 프로젝트를 순서대로 수집합니다.
    ///
    /// 첫 번째 치명적 에러에서 중단합니다.
    pub async fn collect_many<S: AsRef<str>>(
        &self,
        project_ids: &[S],
        query: &IssueQuery,
        tickets: &TicketIndex,
    ) -> Result<Vec<ProjectIssues>, IssueCollectorError> {
        let mut results = Vec::with_capacity(project_ids.len());
        for project_id in project_ids {
            let project_id = project_id.as_ref();
            let issues = self.collect(project_id, query, tickets).await?;
            results.push(ProjectIssues {
                project_id: project_id.to_owned(),
                issues,
            });
        }
        Ok(results)
    }
}

/// 한 프로젝트 수집에 필요한 공유 상태
pub(crate) struct ProjectScope<'a, C: SnykApi> {
    pub client: &'a C,
    pub endpoints: &'a SnykEndpoints,
    pub org_id: &'a str,
    pub project_id: &'a str,
    pub tickets: &'a TicketIndex,
    pub max_pages: usize,
}

impl<C: SnykApi> ProjectScope<'_, C> {
    /// v1 API 요청 맥락
    pub fn api_context(&self, issue_id: Option<&str>) -> RequestContext {
        self.context(self.endpoints.api_base(), issue_id)
    }

    /// REST API 요청 맥락
    pub fn rest_context(&self, issue_id: Option<&str>) -> RequestContext {
        self.context(self.endpoints.rest_base(), issue_id)
    }

    fn context(&self, endpoint: &str, issue_id: Option<&str>) -> RequestContext {
        RequestContext {
            endpoint: endpoint.to_owned(),
            org_id: self.org_id.to_owned(),
            project_id: self.project_id.to_owned(),
            issue_id: issue_id.map(str::to_owned),
        }
    }
}

/// 응답 본문을 디코딩합니다. 실패 시 요청 맥락을 담은 `Json` 에러를 반환합니다.
pub(crate) fn decode<T: DeserializeOwned>(
    body: &[u8],
    operation: &'static str,
    context: impl FnOnce() -> RequestContext,
) -> Result<T, IssueCollectorError> {
    serde_json::from_slice(body).map_err(|e| IssueCollectorError::Json {
        operation,
        context: context(),
        reason: e.to_string(),
    })
}
