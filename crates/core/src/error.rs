//! 에러 타입 -- 도메인별 에러 정의

/// snyktix 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum SnyktixError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Snyk API 호출 에러
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// 응답/입력 파싱 에러
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Snyk API 호출 에러
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 요청 대상 리소스 없음 (404)
    #[error("not found: {0}")]
    NotFound(String),

    /// 요청 실패 (전송 실패 또는 비정상 상태 코드)
    #[error("request failed: {0}")]
    RequestFailed(String),
}

/// 파싱 에러
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// JSON 디코딩 실패
    #[error("invalid json: {0}")]
    Json(String),

    /// 예상하지 못한 응답 구조
    #[error("unexpected shape: {0}")]
    UnexpectedShape(String),
}
