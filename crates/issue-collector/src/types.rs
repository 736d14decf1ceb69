//! 도메인 타입 -- 보강된 이슈와 결과 집합

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, Serializer};
use serde_json::Value;

use snyktix_core::types::{IssueKind, Severity};

/// 경로 또는 상세 정보로 보강된 단일 이슈
///
/// `record`는 Snyk 응답 원본에 보강 필드(`from` 또는 `title`)를 더한 JSON이며,
/// 티켓 생성 단계가 그대로 소비합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedIssue {
    /// 이슈 ID (프로젝트 내에서 유일)
    pub id: String,
    /// 이슈 종류
    pub kind: IssueKind,
    /// 심각도 (응답에 있을 경우)
    pub severity: Option<Severity>,
    /// 제목
    pub title: String,
    /// 보강된 이슈 레코드
    pub record: Value,
}

impl EnrichedIssue {
    /// 오픈소스/라이선스 레코드의 `from` 필드(의존성 경로)를 반환합니다.
    pub fn paths(&self) -> Option<&Value> {
        self.record.get("from")
    }
}

impl fmt::Display for EnrichedIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Some(severity) => write!(f, "[{}] {} {}: {}", severity, self.kind, self.id, self.title),
            None => write!(f, "{} {}: {}", self.kind, self.id, self.title),
        }
    }
}

/// 수집 결과 -- 이슈 ID에서 보강된 이슈로의 매핑
///
/// 같은 ID가 다시 삽입되면 나중 값이 앞의 값을 덮어씁니다.
/// 직렬화하면 `{issue_id: record}` 형태의 JSON 객체가 됩니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueSet {
    issues: BTreeMap<String, EnrichedIssue>,
}

impl IssueSet {
    /// 빈 결과 집합을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 이슈를 삽입합니다. 같은 ID의 이전 값이 있으면 반환합니다.
    pub fn insert(&mut self, issue: EnrichedIssue) -> Option<EnrichedIssue> {
        self.issues.insert(issue.id.clone(), issue)
    }

    pub fn get(&self, id: &str) -> Option<&EnrichedIssue> {
        self.issues.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.issues.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// ID 순으로 이슈를 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = &EnrichedIssue> {
        self.issues.values()
    }

    /// ID 목록을 반환합니다.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.issues.keys().map(String::as_str)
    }
}

impl Serialize for IssueSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.issues.iter().map(|(id, issue)| (id, &issue.record)))
    }
}

/// 한 프로젝트의 수집 결과
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectIssues {
    /// 프로젝트 ID
    pub project_id: String,
    /// 티켓이 없는 이슈
    pub issues: IssueSet,
}
