//! 통합 테스트 -- code 이슈 페이지 순회
//!
//! `links.next` 추적, 404 허용, 페이지 상한을 공개 API로 검증합니다.

mod common;

use common::*;
use serde_json::json;
use snyktix_core::Severity;
use snyktix_issue_collector::{
    CollectorConfig, IssueCollector, IssueCollectorError, IssueQuery, TicketIndex,
};

fn critical_query() -> IssueQuery {
    IssueQuery::builder().severity("critical").build().unwrap()
}

fn code_project(api: TestSnykApi) -> TestSnykApi {
    api.json(aggregated_url(PROJECT), json!({"issues": []}))
}

#[tokio::test]
async fn follows_next_links_until_absent() {
    let page2 = "/v3/orgs/org-1/issues?project_id=proj-1&severity=critical&starting_after=c1";
    let page3 = format!("{REST_BASE}/v3/orgs/org-1/issues?starting_after=c2");
    let api = code_project(TestSnykApi::new())
        .json(
            code_list_url(Severity::Critical),
            json!({"data": [{"id": "c1", "attributes": {"title": "one"}}],
                   "links": {"next": page2}}),
        )
        .json(
            format!("{REST_BASE}{page2}"),
            json!({"data": [{"id": "c2", "attributes": {"title": "two"}}],
                   "links": {"next": page3}}),
        )
        .json(
            page3.clone(),
            json!({"data": [{"id": "c3", "attributes": {"title": "three"}}]}),
        )
        .json(code_detail_url("c1"), json!({}))
        .json(code_detail_url("c2"), json!({}))
        .json(code_detail_url("c3"), json!({}));

    let collector = IssueCollector::new(api.clone(), collector_config()).unwrap();
    let issues = collector
        .collect(PROJECT, &critical_query(), &TicketIndex::new())
        .await
        .unwrap();

    assert_eq!(issues.ids().collect::<Vec<_>>(), vec!["c1", "c2", "c3"]);
    assert_eq!(issues.get("c3").unwrap().record["title"], "three");
    // aggregated + 3 pages + 3 details
    assert_eq!(api.requests().await.len(), 7);
}

#[tokio::test]
async fn listing_not_found_is_tolerated() {
    let api = code_project(TestSnykApi::new()).not_found(code_list_url(Severity::Critical));

    let collector = IssueCollector::new(api, collector_config()).unwrap();
    let issues = collector
        .collect(PROJECT, &critical_query(), &TicketIndex::new())
        .await
        .unwrap();

    assert!(issues.is_empty());
}

#[tokio::test]
async fn page_limit_stops_runaway_pagination() {
    let api = code_project(TestSnykApi::new()).json(
        code_list_url(Severity::Critical),
        json!({"data": [], "links": {"next": code_list_url(Severity::Critical)}}),
    );
    let config = CollectorConfig {
        max_pages: 4,
        ..collector_config()
    };

    let collector = IssueCollector::new(api.clone(), config).unwrap();
    let err = collector
        .collect(PROJECT, &critical_query(), &TicketIndex::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IssueCollectorError::PaginationLimit { limit: 4, .. }
    ));
    // aggregated + 4 pages
    assert_eq!(api.requests().await.len(), 5);
}

#[tokio::test]
async fn repeated_id_across_severities_keeps_latest() {
    let query = IssueQuery::builder().severity("high").build().unwrap();
    let api = code_project(TestSnykApi::new())
        .json(
            code_list_url(Severity::Critical),
            json!({"data": [{"id": "dup", "attributes": {"title": "from critical"}}]}),
        )
        .json(
            code_list_url(Severity::High),
            json!({"data": [{"id": "dup", "attributes": {"title": "from high"}}]}),
        )
        .json(code_detail_url("dup"), json!({"id": "dup"}));

    let collector = IssueCollector::new(api, collector_config()).unwrap();
    let issues = collector
        .collect(PROJECT, &query, &TicketIndex::new())
        .await
        .unwrap();

    assert_eq!(issues.len(), 1);
    let dup = issues.get("dup").unwrap();
    assert_eq!(dup.record["title"], "from high");
    assert_eq!(dup.severity, Some(Severity::High));
}
