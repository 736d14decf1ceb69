//! Snyk Code 이슈 수집
//!
//! REST API는 누적 심각도 필터를 지원하지 않으므로 임계값이 포함하는
//! 심각도마다 따로 조회하고 결과를 하나의 집합에 합칩니다.
//! 같은 ID가 다시 나오면 나중 값이 덮어씁니다.
//!
//! 목록은 `links.next`가 없거나 빌 때까지 따라갑니다. 목록 조회의 404는
//! 빈 페이지로 보고 해당 심각도의 조회를 끝내며, 상세 조회의 404는 치명적입니다.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use snyktix_core::types::{IssueKind, Severity};

use crate::client::SnykApi;
use crate::collector::{ProjectScope, decode};
use crate::error::IssueCollectorError;
use crate::types::{EnrichedIssue, IssueSet};

/// code 이슈 목록 페이지
#[derive(Debug, Default, Deserialize)]
struct CodeIssuePage {
    #[serde(default)]
    data: Option<Vec<CodeIssueItem>>,
    #[serde(default)]
    links: Option<PageLinks>,
}

#[derive(Debug, Deserialize)]
struct CodeIssueItem {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    attributes: Option<CodeIssueAttributes>,
}

#[derive(Debug, Deserialize)]
struct CodeIssueAttributes {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageLinks {
    #[serde(default)]
    next: Option<String>,
}

impl CodeIssuePage {
    fn next_link(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|links| links.next.as_deref())
            .filter(|next| !next.is_empty())
    }
}

impl CodeIssueItem {
    fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    fn title(&self) -> &str {
        self.attributes
            .as_ref()
            .and_then(|attributes| attributes.title.as_deref())
            .unwrap_or_default()
    }
}

/// 주어진 심각도마다 code 이슈를 조회하고 상세 정보로 보강합니다.
pub(crate) async fn collect_code_issues<C: SnykApi>(
    scope: &ProjectScope<'_, C>,
    severities: &[Severity],
) -> Result<IssueSet, IssueCollectorError> {
    let mut issues = IssueSet::new();

    for &severity in severities {
        let first = scope
            .endpoints
            .code_issues(scope.org_id, scope.project_id, severity)?;
        let mut next_url = Some(first);
        let mut pages = 0usize;

        while let Some(url) = next_url.take() {
            if pages >= scope.max_pages {
                return Err(IssueCollectorError::PaginationLimit {
                    context: scope.rest_context(None),
                    limit: scope.max_pages,
                });
            }
            pages += 1;

            debug!(
                project_id = scope.project_id,
                severity = %severity,
                page = pages,
                url = %url,
                "requesting code issue page"
            );
            let body = match scope.client.get(&url).await {
                Ok(body) => body,
                Err(e) if e.is_not_found() => {
                    debug!(severity = %severity, url = %url, "code issue page not found, treating as empty");
                    break;
                }
                Err(source) => {
                    return Err(IssueCollectorError::Api {
                        operation: "code issues",
                        context: scope.rest_context(None),
                        source,
                    });
                }
            };
            let page: CodeIssuePage = decode(&body, "code issues", || scope.rest_context(None))?;

            for item in page.data.iter().flatten() {
                let Some(issue_id) = item.id() else {
                    continue;
                };
                if let Some(ticket) = scope.tickets.ticket_for(issue_id) {
                    debug!(issue_id, ticket, "issue already has a ticket, skipping");
                    continue;
                }

                let record = fetch_detail(scope, issue_id, item.title()).await?;
                issues.insert(EnrichedIssue {
                    id: issue_id.to_owned(),
                    kind: IssueKind::Code,
                    severity: Some(severity),
                    title: item.title().to_owned(),
                    record,
                });
            }

            next_url = page.next_link().map(|next| scope.endpoints.resolve_next(next));
        }
    }

    Ok(issues)
}

/// 상세 정보를 조회하고 최상위 `title`을 설정합니다.
async fn fetch_detail<C: SnykApi>(
    scope: &ProjectScope<'_, C>,
    issue_id: &str,
    title: &str,
) -> Result<Value, IssueCollectorError> {
    let url = scope
        .endpoints
        .code_issue_detail(scope.org_id, scope.project_id, issue_id)?;
    debug!(project_id = scope.project_id, issue_id, url = %url, "requesting code issue detail");

    let body = scope
        .client
        .get(&url)
        .await
        .map_err(|source| IssueCollectorError::Api {
            operation: "code issue detail",
            context: scope.rest_context(Some(issue_id)),
            source,
        })?;

    let mut detail: Value = decode(&body, "code issue detail", || {
        scope.rest_context(Some(issue_id))
    })?;
    let Some(fields) = detail.as_object_mut() else {
        return Err(IssueCollectorError::UnexpectedResponse {
            operation: "code issue detail",
            context: scope.rest_context(Some(issue_id)),
            reason: "detail is not a JSON object".to_owned(),
        });
    };
    fields.insert("title".to_owned(), Value::String(title.to_owned()));
    Ok(detail)
}
