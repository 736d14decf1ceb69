//! 통합 테스트 공용 mock 및 fixture
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use snyktix_issue_collector::{CollectorConfig, SnykApi, SnykEndpoints, SnykError};
use tokio::sync::Mutex;

pub const ORG: &str = "org-1";
pub const PROJECT: &str = "proj-1";
pub const API_BASE: &str = "http://snyk.test/api";
pub const REST_BASE: &str = "http://snyk.test";
pub const REST_VERSION: &str = "2021-08-20";

#[derive(Clone)]
enum Canned {
    Json(Value),
    NotFound,
    Status(u16),
}

/// URL별 고정 응답을 반환하고 받은 요청을 기록하는 Snyk API
#[derive(Clone, Default)]
pub struct TestSnykApi {
    responses: HashMap<String, Canned>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl TestSnykApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, url: impl Into<String>, body: Value) -> Self {
        self.responses.insert(url.into(), Canned::Json(body));
        self
    }

    pub fn not_found(mut self, url: impl Into<String>) -> Self {
        self.responses.insert(url.into(), Canned::NotFound);
        self
    }

    pub fn status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses.insert(url.into(), Canned::Status(status));
        self
    }

    /// 기록된 `(method, url)` 목록
    pub async fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().await.clone()
    }

    async fn respond(&self, method: &str, url: &str) -> Result<Vec<u8>, SnykError> {
        self.requests
            .lock()
            .await
            .push((method.to_owned(), url.to_owned()));
        match self.responses.get(url) {
            Some(Canned::Json(body)) => Ok(body.to_string().into_bytes()),
            Some(Canned::NotFound) => Err(SnykError::NotFound {
                url: url.to_owned(),
            }),
            Some(Canned::Status(status)) => Err(SnykError::Status {
                url: url.to_owned(),
                status: *status,
                body: "test failure".to_owned(),
            }),
            None => Err(SnykError::Transport {
                url: url.to_owned(),
                reason: "no canned response".to_owned(),
            }),
        }
    }
}

impl SnykApi for TestSnykApi {
    async fn get(&self, url: &str) -> Result<Vec<u8>, SnykError> {
        self.respond("GET", url).await
    }

    async fn post(&self, url: &str, _body: Vec<u8>) -> Result<Vec<u8>, SnykError> {
        self.respond("POST", url).await
    }
}

pub fn endpoints() -> SnykEndpoints {
    SnykEndpoints::new(API_BASE, REST_BASE, REST_VERSION)
}

pub fn collector_config() -> CollectorConfig {
    CollectorConfig {
        org_id: ORG.to_owned(),
        api_token: "test-token".to_owned(),
        endpoints: endpoints(),
        ..CollectorConfig::default()
    }
}

pub fn aggregated_url(project_id: &str) -> String {
    endpoints().aggregated_issues(ORG, project_id)
}

pub fn paths_url(project_id: &str, issue_id: &str) -> String {
    endpoints().issue_paths(ORG, project_id, issue_id)
}

pub fn code_list_url(severity: snyktix_core::Severity) -> String {
    endpoints()
        .code_issues(ORG, PROJECT, severity)
        .expect("valid code list url")
}

pub fn code_detail_url(issue_id: &str) -> String {
    endpoints()
        .code_issue_detail(ORG, PROJECT, issue_id)
        .expect("valid code detail url")
}
