//! Snyk HTTP API abstraction for testability.
//!
//! The [`SnykApi`] trait covers the two HTTP verbs the collector needs, allowing
//! production code to use [`ReqwestSnykClient`] while tests use `MockSnykApi`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  IssueCollector  │
//! └────────┬─────────┘
//!          │
//!          ▼
//!     ┌─────────┐
//!     │ SnykApi │ (trait)
//!     └─────────┘
//!       │     │
//!       ▼     ▼
//!  ┌───────┐ ┌──────┐
//!  │reqwest│ │ Mock │
//!  └───┬───┘ └──────┘
//!      │
//!      ▼
//!   Snyk API
//! ```
//!
//! Response bodies are returned as raw bytes; decoding is left to the caller so
//! that JSON errors can be reported with the request context.

use std::future::Future;
use std::time::Duration;

use crate::error::SnykError;

/// Maximum number of response body characters kept in error messages.
const ERROR_BODY_LIMIT: usize = 500;

/// Trait abstracting Snyk HTTP calls.
///
/// Every request is authenticated with the organization token. The trait is
/// `Send + Sync + 'static` so a client can be shared across async tasks.
///
/// # Error Handling
///
/// - **404 responses**: [`SnykError::NotFound`]
/// - **Other non-2xx responses**: [`SnykError::Status`]
/// - **Connection errors and timeouts**: [`SnykError::Transport`]
pub trait SnykApi: Send + Sync + 'static {
    /// Sends a `GET` request and returns the response body.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, SnykError>> + Send;

    /// Sends a `POST` request with a JSON body and returns the response body.
    fn post(
        &self,
        url: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<Vec<u8>, SnykError>> + Send;
}

/// Production Snyk client built on `reqwest`.
///
/// Sends `Authorization: token <api token>` on every request and applies a
/// per-request timeout.
pub struct ReqwestSnykClient {
    http: reqwest::Client,
    auth_header: String,
}

impl ReqwestSnykClient {
    /// Builds a client for the given API token.
    ///
    /// # Errors
    ///
    /// Returns [`SnykError::ClientBuild`] if the token is empty or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(api_token: &str, timeout: Duration) -> Result<Self, SnykError> {
        let token = api_token.trim();
        if token.is_empty() {
            return Err(SnykError::ClientBuild("api token is empty".to_owned()));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("snyktix/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SnykError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            auth_header: format!("token {token}"),
        })
    }

    async fn send(&self, url: &str, request: reqwest::RequestBuilder) -> Result<Vec<u8>, SnykError> {
        let response = request
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .map_err(|e| SnykError::Transport {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SnykError::NotFound {
                url: url.to_owned(),
            });
        }

        let body = response.bytes().await.map_err(|e| SnykError::Transport {
            url: url.to_owned(),
            reason: format!("failed to read response body: {e}"),
        })?;

        if !status.is_success() {
            return Err(SnykError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body)
                    .chars()
                    .take(ERROR_BODY_LIMIT)
                    .collect(),
            });
        }

        Ok(body.to_vec())
    }
}

impl SnykApi for ReqwestSnykClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, SnykError> {
        self.send(url, self.http.get(url)).await
    }

    async fn post(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, SnykError> {
        let request = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        self.send(url, request).await
    }
}

/// 테스트용 Mock Snyk 클라이언트
///
/// URL별로 미리 등록한 응답을 반환하고, 받은 요청을 순서대로 기록합니다.
/// 등록되지 않은 URL은 `Transport` 에러를 반환합니다.
#[cfg(test)]
#[derive(Default)]
pub struct MockSnykApi {
    responses: std::collections::HashMap<String, MockResponse>,
    requests: std::sync::Mutex<Vec<RecordedRequest>>,
}

#[cfg(test)]
#[derive(Clone)]
enum MockResponse {
    Body(Vec<u8>),
    NotFound,
    Status(u16),
}

/// Mock이 받은 요청
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

#[cfg(test)]
impl MockSnykApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// URL에 대한 JSON 응답을 등록합니다.
    pub fn with_json(mut self, url: impl Into<String>, body: serde_json::Value) -> Self {
        self.responses
            .insert(url.into(), MockResponse::Body(body.to_string().into_bytes()));
        self
    }

    /// URL에 대한 원시 응답 본문을 등록합니다.
    pub fn with_raw(mut self, url: impl Into<String>, body: &str) -> Self {
        self.responses
            .insert(url.into(), MockResponse::Body(body.as_bytes().to_vec()));
        self
    }

    /// URL이 404를 반환하도록 설정합니다.
    pub fn with_not_found(mut self, url: impl Into<String>) -> Self {
        self.responses.insert(url.into(), MockResponse::NotFound);
        self
    }

    /// URL이 주어진 상태 코드를 반환하도록 설정합니다.
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses
            .insert(url.into(), MockResponse::Status(status));
        self
    }

    /// 기록된 요청 목록을 반환합니다.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn respond(
        &self,
        method: &'static str,
        url: &str,
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>, SnykError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                method,
                url: url.to_owned(),
                body: body.and_then(|b| serde_json::from_slice(b).ok()),
            });
        }
        match self.responses.get(url) {
            Some(MockResponse::Body(body)) => Ok(body.clone()),
            Some(MockResponse::NotFound) => Err(SnykError::NotFound {
                url: url.to_owned(),
            }),
            Some(MockResponse::Status(status)) => Err(SnykError::Status {
                url: url.to_owned(),
                status: *status,
                body: "mock failure".to_owned(),
            }),
            None => Err(SnykError::Transport {
                url: url.to_owned(),
                reason: "no mock response registered".to_owned(),
            }),
        }
    }
}

#[cfg(test)]
impl SnykApi for MockSnykApi {
    async fn get(&self, url: &str) -> Result<Vec<u8>, SnykError> {
        self.respond("GET", url, None)
    }

    async fn post(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, SnykError> {
        self.respond("POST", url, Some(&body))
    }
}
