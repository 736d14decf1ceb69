//! 오픈소스/라이선스 이슈 경로 보강
//!
//! 티켓이 없는 이슈마다 paths 엔드포인트를 호출하고, 응답의 `paths`를
//! 이슈 레코드의 `from` 필드에 넣습니다. 레코드는 매번 해당 이슈 원소의
//! 새 복사본에서 만들어집니다.

use serde_json::Value;
use tracing::debug;

use crate::classify::{self, AggregatedIssues};
use crate::client::SnykApi;
use crate::collector::{ProjectScope, decode};
use crate::error::IssueCollectorError;
use crate::types::{EnrichedIssue, IssueSet};

/// 보강 대상 오픈소스/라이선스 이슈를 모두 수집합니다.
pub(crate) async fn collect_open_source_issues<C: SnykApi>(
    scope: &ProjectScope<'_, C>,
    aggregated: &AggregatedIssues,
) -> Result<IssueSet, IssueCollectorError> {
    let mut issues = IssueSet::new();

    for (kind, issue) in aggregated.enrichable() {
        let Some(issue_id) = classify::issue_id(issue) else {
            continue;
        };
        if let Some(ticket) = scope.tickets.ticket_for(issue_id) {
            debug!(issue_id, ticket, "issue already has a ticket, skipping");
            continue;
        }

        let from = fetch_paths(scope, issue_id).await?;

        let mut record = issue.clone();
        if let Some(fields) = record.as_object_mut() {
            fields.insert("from".to_owned(), from);
        }

        issues.insert(EnrichedIssue {
            id: issue_id.to_owned(),
            kind,
            severity: classify::issue_severity(issue),
            title: classify::issue_title(issue),
            record,
        });
    }

    Ok(issues)
}

/// 이슈의 의존성 경로를 조회합니다. 응답에 `paths`가 없으면 `null`입니다.
async fn fetch_paths<C: SnykApi>(
    scope: &ProjectScope<'_, C>,
    issue_id: &str,
) -> Result<Value, IssueCollectorError> {
    let url = scope
        .endpoints
        .issue_paths(scope.org_id, scope.project_id, issue_id);
    debug!(project_id = scope.project_id, issue_id, url = %url, "requesting issue paths");

    let body = scope
        .client
        .get(&url)
        .await
        .map_err(|source| IssueCollectorError::Api {
            operation: "issue paths",
            context: scope.api_context(Some(issue_id)),
            source,
        })?;

    let mut response: Value = decode(&body, "issue paths", || {
        scope.api_context(Some(issue_id))
    })?;
    Ok(response
        .get_mut("paths")
        .map(Value::take)
        .unwrap_or(Value::Null))
}
