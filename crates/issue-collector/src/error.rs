//! 이슈 수집기 에러 타입
//!
//! [`IssueCollectorError`]는 필터 검증부터 API 호출, 응답 파싱까지
//! 수집 과정에서 발생하는 모든 에러를 나타냅니다.
//! `From<IssueCollectorError> for SnyktixError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **설정**: `Config` (네트워크 호출 전에 발생)
//! - **API 호출**: `Api` (전송 실패, 비정상 상태 코드)
//! - **응답 파싱**: `Json`, `UnexpectedResponse`
//! - **페이지 순회**: `PaginationLimit`
//! - **티켓 인덱스**: `Io`, `TicketIndex`

use std::fmt;

use snyktix_core::error::{ApiError, ConfigError, ParseError, SnyktixError};

/// Snyk HTTP 호출 자체의 실패
#[derive(Debug, thiserror::Error)]
pub enum SnykError {
    /// 404 응답
    #[error("not found: {url}")]
    NotFound {
        /// 요청 URL
        url: String,
    },

    /// 404 이외의 비정상 상태 코드
    #[error("unexpected status {status} from {url}: {body}")]
    Status {
        /// 요청 URL
        url: String,
        /// HTTP 상태 코드
        status: u16,
        /// 응답 본문 (앞부분만)
        body: String,
    },

    /// 연결, 타임아웃 등 전송 실패
    #[error("request to {url} failed: {reason}")]
    Transport {
        /// 요청 URL
        url: String,
        /// 실패 사유
        reason: String,
    },

    /// HTTP 클라이언트 생성 실패
    #[error("http client build failed: {0}")]
    ClientBuild(String),
}

impl SnykError {
    /// 404 응답인지 반환합니다.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// 에러 메시지에 포함되는 요청 맥락
///
/// 치명적 에러가 발생했을 때 어느 엔드포인트, 조직, 프로젝트, 이슈에서
/// 실패했는지 보여줍니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// API 기본 URL
    pub endpoint: String,
    /// 조직 ID
    pub org_id: String,
    /// 프로젝트 ID
    pub project_id: String,
    /// 이슈 ID (있을 경우)
    pub issue_id: Option<String>,
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "endpoint {} org {} project {}",
            self.endpoint, self.org_id, self.project_id
        )?;
        if let Some(issue_id) = &self.issue_id {
            write!(f, " issue {issue_id}")?;
        }
        Ok(())
    }
}

/// 이슈 수집기 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum IssueCollectorError {
    /// 설정/필터 값 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// Snyk API 호출 실패
    #[error("could not get {operation} from {context}: {source}")]
    Api {
        /// 수행 중이던 작업
        operation: &'static str,
        /// 요청 맥락
        context: RequestContext,
        /// 원본 에러
        source: SnykError,
    },

    /// 응답 JSON 디코딩 실패
    #[error("invalid json in {operation} from {context}: {reason}")]
    Json {
        /// 수행 중이던 작업
        operation: &'static str,
        /// 요청 맥락
        context: RequestContext,
        /// 디코딩 실패 사유
        reason: String,
    },

    /// JSON은 유효하지만 구조가 예상과 다름
    #[error("unexpected {operation} response from {context}: {reason}")]
    UnexpectedResponse {
        /// 수행 중이던 작업
        operation: &'static str,
        /// 요청 맥락
        context: RequestContext,
        /// 사유
        reason: String,
    },

    /// 페이지 수 상한 초과
    #[error("pagination limit of {limit} pages exceeded for {context}")]
    PaginationLimit {
        /// 요청 맥락
        context: RequestContext,
        /// 최대 페이지 수
        limit: usize,
    },

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 티켓 인덱스 파일 파싱 실패
    #[error("ticket index parse error: {path}: {reason}")]
    TicketIndex {
        /// 파일 경로
        path: String,
        /// 파싱 실패 사유
        reason: String,
    },
}

impl IssueCollectorError {
    /// 설정 에러를 생성합니다.
    pub(crate) fn config(field: &str, reason: impl Into<String>) -> Self {
        Self::Config {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }
}

impl From<IssueCollectorError> for SnyktixError {
    fn from(err: IssueCollectorError) -> Self {
        match err {
            IssueCollectorError::Config { field, reason } => {
                SnyktixError::Config(ConfigError::InvalidValue { field, reason })
            }
            IssueCollectorError::Api {
                operation,
                context,
                source,
            } => {
                let msg = format!("could not get {operation} from {context}: {source}");
                if source.is_not_found() {
                    SnyktixError::Api(ApiError::NotFound(msg))
                } else {
                    SnyktixError::Api(ApiError::RequestFailed(msg))
                }
            }
            err @ IssueCollectorError::Json { .. } => {
                SnyktixError::Parse(ParseError::Json(err.to_string()))
            }
            err @ (IssueCollectorError::UnexpectedResponse { .. }
            | IssueCollectorError::TicketIndex { .. }) => {
                SnyktixError::Parse(ParseError::UnexpectedShape(err.to_string()))
            }
            err @ IssueCollectorError::PaginationLimit { .. } => {
                SnyktixError::Api(ApiError::RequestFailed(err.to_string()))
            }
            IssueCollectorError::Io { source, .. } => SnyktixError::Io(source),
        }
    }
}
