//! 필터 빌더 -- 사용자 옵션을 Snyk aggregated-issues 요청 본문으로 변환
//!
//! 사용자 옵션(문자열)은 [`IssueQueryBuilder::build`]에서 한 번만 검증되어
//! 타입이 있는 [`IssueQuery`]가 됩니다. 이후 단계는 검증된 값만 사용합니다.
//!
//! # 사용 예시
//!
//! ```
//! use snyktix_issue_collector::IssueQuery;
//!
//! let query = IssueQuery::builder()
//!     .severity("medium")
//!     .maturity(vec!["mature".to_owned()])
//!     .priority_score_threshold(500)
//!     .build()
//!     .unwrap();
//!
//! let body = serde_json::to_value(query.to_filter()).unwrap();
//! assert_eq!(body["filters"]["severities"][2], "medium");
//! assert_eq!(body["filters"]["priority"]["score"]["min"], 500);
//! ```

use serde::Serialize;

use snyktix_core::config::{FilterConfig, MAX_PRIORITY_SCORE};
use snyktix_core::types::{ExploitMaturity, IssueKind, Severity};

use crate::error::IssueCollectorError;

/// 이슈 종류 필터
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueTypeFilter {
    /// 취약점과 라이선스 모두
    #[default]
    All,
    /// 특정 종류만
    Only(IssueKind),
}

impl IssueTypeFilter {
    /// 문자열에서 필터를 파싱합니다. 빈 문자열과 `all`은 전체를 의미합니다.
    pub fn parse(s: &str) -> Result<Self, IssueCollectorError> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        match IssueKind::from_str_loose(trimmed) {
            Some(kind @ (IssueKind::Vuln | IssueKind::License | IssueKind::Configuration)) => {
                Ok(Self::Only(kind))
            }
            _ => Err(IssueCollectorError::config(
                "issue_type",
                format!("'{s}' is not a valid issue type, must be one of: all, vuln, license, configuration"),
            )),
        }
    }

    /// 요청 본문의 `types` 값을 반환합니다.
    pub fn kinds(&self) -> Vec<IssueKind> {
        match self {
            Self::All => vec![IssueKind::Vuln, IssueKind::License],
            Self::Only(kind) => vec![*kind],
        }
    }
}

/// 검증된 이슈 조회 조건
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    severity_threshold: Severity,
    issue_types: IssueTypeFilter,
    maturity: Vec<ExploitMaturity>,
    min_priority_score: u32,
}

impl IssueQuery {
    /// 빌더를 생성합니다.
    pub fn builder() -> IssueQueryBuilder {
        IssueQueryBuilder::new()
    }

    /// core의 `FilterConfig`에서 조회 조건을 생성합니다.
    pub fn from_filter_config(config: &FilterConfig) -> Result<Self, IssueCollectorError> {
        IssueQueryBuilder::new()
            .severity(config.severity.clone())
            .issue_type(config.issue_type.clone())
            .maturity(config.maturity.clone())
            .priority_score_threshold(config.priority_score_threshold)
            .build()
    }

    /// 심각도 임계값
    pub fn severity_threshold(&self) -> Severity {
        self.severity_threshold
    }

    /// 임계값 이상의 심각도 목록 (critical부터)
    pub fn severities(&self) -> Vec<Severity> {
        self.severity_threshold.at_or_above()
    }

    /// 이슈 종류 필터
    pub fn issue_types(&self) -> IssueTypeFilter {
        self.issue_types
    }

    /// 익스플로잇 성숙도 필터
    pub fn maturity(&self) -> &[ExploitMaturity] {
        &self.maturity
    }

    /// 최소 우선순위 점수 (0이면 하한 없음)
    pub fn min_priority_score(&self) -> u32 {
        self.min_priority_score
    }

    /// aggregated-issues 요청 본문을 생성합니다.
    pub fn to_filter(&self) -> IssuesFilter {
        IssuesFilter {
            filters: Filter {
                severities: self.severities(),
                exploit_maturity: self.maturity.clone(),
                priority: Priority {
                    score: ScoreRange {
                        min: self.min_priority_score,
                        max: MAX_PRIORITY_SCORE,
                    },
                },
                types: self.issue_types.kinds(),
                ignored: false,
                patched: false,
            },
        }
    }
}

/// [`IssueQuery`] 빌더
///
/// 문자열 옵션을 받아 `build()`에서 한꺼번에 검증합니다.
#[derive(Debug, Clone)]
pub struct IssueQueryBuilder {
    severity: String,
    issue_type: String,
    maturity: Vec<String>,
    priority_score_threshold: u32,
}

impl Default for IssueQueryBuilder {
    fn default() -> Self {
        Self {
            severity: "high".to_owned(),
            issue_type: "all".to_owned(),
            maturity: Vec::new(),
            priority_score_threshold: 0,
        }
    }
}

impl IssueQueryBuilder {
    /// 기본값(high, all)을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 심각도 임계값을 설정합니다.
    pub fn severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = severity.into();
        self
    }

    /// 이슈 종류를 설정합니다.
    pub fn issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = issue_type.into();
        self
    }

    /// 익스플로잇 성숙도 목록을 설정합니다.
    pub fn maturity(mut self, maturity: Vec<String>) -> Self {
        self.maturity = maturity;
        self
    }

    /// 최소 우선순위 점수를 설정합니다.
    pub fn priority_score_threshold(mut self, score: u32) -> Self {
        self.priority_score_threshold = score;
        self
    }

    /// 옵션을 검증하고 [`IssueQuery`]를 생성합니다.
    pub fn build(self) -> Result<IssueQuery, IssueCollectorError> {
        let severity_threshold = Severity::from_str_loose(&self.severity).ok_or_else(|| {
            IssueCollectorError::config(
                "severity",
                format!(
                    "unexpected severity threshold '{}', must be one of: critical, high, medium, low",
                    self.severity
                ),
            )
        })?;

        let issue_types = IssueTypeFilter::parse(&self.issue_type)?;
        let maturity = parse_maturity_levels(&self.maturity)?;

        if self.priority_score_threshold > MAX_PRIORITY_SCORE {
            return Err(IssueCollectorError::config(
                "priority_score_threshold",
                format!("must be 0-{MAX_PRIORITY_SCORE}"),
            ));
        }

        Ok(IssueQuery {
            severity_threshold,
            issue_types,
            maturity,
            min_priority_score: self.priority_score_threshold,
        })
    }
}

/// 성숙도 문자열 목록을 검증합니다.
///
/// 빈 항목은 무시하고, 중복은 한 번만 유지합니다.
pub fn parse_maturity_levels<S: AsRef<str>>(
    levels: &[S],
) -> Result<Vec<ExploitMaturity>, IssueCollectorError> {
    let mut parsed = Vec::with_capacity(levels.len());
    for level in levels {
        let level = level.as_ref().trim();
        if level.is_empty() {
            continue;
        }
        let maturity = ExploitMaturity::parse(level).ok_or_else(|| {
            IssueCollectorError::config(
                "maturity",
                format!(
                    "{level} is not a valid maturity level, must be one of: no-data, no-known-exploit, proof-of-concept, mature"
                ),
            )
        })?;
        if !parsed.contains(&maturity) {
            parsed.push(maturity);
        }
    }
    Ok(parsed)
}

/// aggregated-issues 요청 본문 (최상위)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuesFilter {
    /// 필터
    pub filters: Filter,
}

/// 심각도, 종류, 우선순위, 성숙도 필터
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub severities: Vec<Severity>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exploit_maturity: Vec<ExploitMaturity>,
    pub priority: Priority,
    pub types: Vec<IssueKind>,
    pub ignored: bool,
    pub patched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Priority {
    pub score: ScoreRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreRange {
    pub min: u32,
    pub max: u32,
}
