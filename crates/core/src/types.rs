//! 도메인 타입 -- 시스템 전역에서 사용되는 공통 타입
//!
//! Snyk 이슈의 심각도, 종류, 익스플로잇 성숙도를 정의합니다.
//! 필터 빌더, 수집기, CLI 모두 이 타입들을 통해 값을 주고받습니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 심각도 레벨
///
/// Snyk가 보고하는 이슈 심각도입니다.
/// `Ord` 구현으로 심각도 비교가 가능합니다 (`Low < Medium < High < Critical`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// 낮은 심각도
    #[default]
    Low,
    /// 중간 심각도
    Medium,
    /// 높은 심각도
    High,
    /// 치명적 -- 즉시 대응 필요
    Critical,
}

impl Severity {
    /// 높은 순서로 나열한 전체 심각도
    pub const DESCENDING: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// 문자열에서 심각도를 파싱합니다.
    ///
    /// 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    /// API에서 사용하는 소문자 이름을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// 이 임계값이 포함하는 심각도 목록을 반환합니다 (critical부터).
    ///
    /// 임계값은 누적입니다: `Medium`은 critical, high, medium을 포함하고 low는 제외합니다.
    pub fn at_or_above(self) -> Vec<Severity> {
        Self::DESCENDING
            .iter()
            .copied()
            .filter(|s| *s >= self)
            .collect()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 이슈 종류
///
/// aggregated-issues 응답의 `issueType` 값과 code 이슈를 구분합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// 오픈소스 의존성 취약점
    Vuln,
    /// 라이선스 정책 위반
    License,
    /// 정적 분석(Snyk Code) 이슈
    Code,
    /// IaC 설정 이슈 (지원하지 않음)
    Configuration,
}

impl IssueKind {
    /// 문자열에서 이슈 종류를 파싱합니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "vuln" => Some(Self::Vuln),
            "license" => Some(Self::License),
            "code" => Some(Self::Code),
            "configuration" => Some(Self::Configuration),
            _ => None,
        }
    }

    /// API에서 사용하는 이름을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vuln => "vuln",
            Self::License => "license",
            Self::Code => "code",
            Self::Configuration => "configuration",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 익스플로잇 성숙도
///
/// 공개된 익스플로잇의 존재 여부에 따른 분류입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExploitMaturity {
    /// 정보 없음
    NoData,
    /// 알려진 익스플로잇 없음
    NoKnownExploit,
    /// 개념 증명 코드 존재
    ProofOfConcept,
    /// 실제 공격에 사용 가능한 익스플로잇 존재
    Mature,
}

impl ExploitMaturity {
    /// 허용되는 전체 값 (에러 메시지용)
    pub const ALL: [ExploitMaturity; 4] = [
        ExploitMaturity::NoData,
        ExploitMaturity::NoKnownExploit,
        ExploitMaturity::ProofOfConcept,
        ExploitMaturity::Mature,
    ];

    /// 정확한 API 이름에서 성숙도를 파싱합니다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "no-data" => Some(Self::NoData),
            "no-known-exploit" => Some(Self::NoKnownExploit),
            "proof-of-concept" => Some(Self::ProofOfConcept),
            "mature" => Some(Self::Mature),
            _ => None,
        }
    }

    /// API에서 사용하는 이름을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoData => "no-data",
            Self::NoKnownExploit => "no-known-exploit",
            Self::ProofOfConcept => "proof-of-concept",
            Self::Mature => "mature",
        }
    }
}

impl fmt::Display for ExploitMaturity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
