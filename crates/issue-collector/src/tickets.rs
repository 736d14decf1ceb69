//! 티켓 인덱스 -- 이미 티켓이 있는 이슈 ID 집합
//!
//! 호출자가 제공하는 `issue id -> ticket key` 매핑입니다.
//! 수집 과정에서는 읽기 전용 제외 집합으로만 사용됩니다.

use std::collections::HashMap;
use std::path::Path;

use crate::error::IssueCollectorError;

/// 이미 티켓이 생성된 이슈 목록
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketIndex {
    tickets: HashMap<String, String>,
}

impl TicketIndex {
    /// 빈 인덱스를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON 객체 파일(`{"ISSUE-ID": "TICKET-KEY"}`)에서 인덱스를 로드합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, IssueCollectorError> {
        let path = path.as_ref();
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| IssueCollectorError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
        Self::parse(&content).map_err(|e| IssueCollectorError::TicketIndex {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// JSON 문자열에서 인덱스를 파싱합니다.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let tickets: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { tickets })
    }

    /// 해당 이슈에 티켓이 있는지 반환합니다.
    pub fn contains(&self, issue_id: &str) -> bool {
        self.tickets.contains_key(issue_id)
    }

    /// 이슈의 티켓 키를 반환합니다.
    pub fn ticket_for(&self, issue_id: &str) -> Option<&str> {
        self.tickets.get(issue_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TicketIndex {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            tickets: iter
                .into_iter()
                .map(|(issue, ticket)| (issue.into(), ticket.into()))
                .collect(),
        }
    }
}
