//! aggregated-issues 응답 분류
//!
//! 응답의 첫 번째 이슈 종류를 보고 프로젝트를 세 가지 중 하나로 분류합니다.
//!
//! | 응답 | 분류 | 처리 |
//! |------|------|------|
//! | 이슈 없음 | [`ProjectClassification::Code`] | v3 code 이슈 조회 |
//! | 첫 이슈가 `configuration` | [`ProjectClassification::Configuration`] | 빈 결과 |
//! | 그 외 | [`ProjectClassification::OpenSource`] | 경로 보강 |
//!
//! aggregated-issues 엔드포인트는 code 이슈를 반환하지 않으므로
//! 빈 응답은 code 프로젝트로 간주합니다.

use serde::Deserialize;
use serde_json::Value;

use snyktix_core::types::{IssueKind, Severity};

/// aggregated-issues 응답 본문
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AggregatedIssues {
    #[serde(default)]
    issues: Option<IssuesField>,
}

/// `issues` 필드는 평면 배열이거나 `licenses`를 담은 객체입니다.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum IssuesField {
    Flat(Vec<Value>),
    Nested {
        #[serde(default)]
        licenses: Vec<Value>,
    },
}

impl AggregatedIssues {
    /// JSON 본문을 파싱합니다.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// 평면 `issues` 배열의 원소
    pub fn flat(&self) -> &[Value] {
        match &self.issues {
            Some(IssuesField::Flat(issues)) => issues,
            _ => &[],
        }
    }

    /// 중첩된 `issues.licenses` 배열의 원소
    pub fn nested_licenses(&self) -> &[Value] {
        match &self.issues {
            Some(IssuesField::Nested { licenses }) => licenses,
            _ => &[],
        }
    }

    /// 응답에 담긴 전체 이슈 수
    pub fn len(&self) -> usize {
        self.flat().len() + self.nested_licenses().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 첫 번째 이슈의 `issueType`
    pub fn first_issue_type(&self) -> Option<&str> {
        self.flat()
            .first()
            .and_then(|issue| issue.get("issueType"))
            .and_then(Value::as_str)
    }

    /// 보강 대상 원소를 종류와 함께 반환합니다.
    ///
    /// 평면 배열에서는 `vuln` 원소만 취합니다. 라이선스는 중첩된
    /// `issues.licenses` 배열에서만 오며, 그 원소는 모두 라이선스로 취급합니다.
    pub fn enrichable(&self) -> impl Iterator<Item = (IssueKind, &Value)> {
        let flat = self
            .flat()
            .iter()
            .filter(|issue| {
                issue.get("issueType").and_then(Value::as_str) == Some(IssueKind::Vuln.as_str())
            })
            .map(|issue| (IssueKind::Vuln, issue));
        let nested = self
            .nested_licenses()
            .iter()
            .map(|issue| (IssueKind::License, issue));
        flat.chain(nested)
    }

    /// 분류 결과를 반환합니다.
    pub fn classify(&self) -> ProjectClassification {
        if self.first_issue_type() == Some(IssueKind::Configuration.as_str()) {
            ProjectClassification::Configuration
        } else if self.is_empty() {
            ProjectClassification::Code
        } else {
            ProjectClassification::OpenSource
        }
    }
}

/// 프로젝트 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectClassification {
    /// IaC 프로젝트 (지원하지 않음)
    Configuration,
    /// Snyk Code 프로젝트
    Code,
    /// 오픈소스 의존성 및 라이선스 프로젝트
    OpenSource,
}

/// 이슈 원소의 `id` (비어 있으면 `None`)
pub(crate) fn issue_id(issue: &Value) -> Option<&str> {
    issue
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}

/// aggregated 이슈의 제목 (`issueData.title`, 없으면 `title`)
pub(crate) fn issue_title(issue: &Value) -> String {
    issue
        .pointer("/issueData/title")
        .or_else(|| issue.get("title"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// aggregated 이슈의 심각도 (`issueData.severity`, 없으면 `severity`)
pub(crate) fn issue_severity(issue: &Value) -> Option<Severity> {
    issue
        .pointer("/issueData/severity")
        .or_else(|| issue.get("severity"))
        .and_then(Value::as_str)
        .and_then(Severity::from_str_loose)
}
