//! Business-facing results: domain, KPIs, risk and recommendations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessDomain {
    Sales,
    Finance,
    Marketing,
    Operations,
    Generic,
}

impl BusinessDomain {
    /// Candidate domains in tie-break order.
    pub const DETECTABLE: [BusinessDomain; 4] = [
        BusinessDomain::Sales,
        BusinessDomain::Finance,
        BusinessDomain::Marketing,
        BusinessDomain::Operations,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BusinessDomain::Sales => "sales",
            BusinessDomain::Finance => "finance",
            BusinessDomain::Marketing => "marketing",
            BusinessDomain::Operations => "operations",
            BusinessDomain::Generic => "generic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainScore {
    pub domain: BusinessDomain,
    pub score: usize,
    pub matched_columns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiUnit {
    Currency,
    Ratio,
    Count,
    Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub id: String,
    pub label: String,
    pub value: f64,
    pub unit: KpiUnit,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskKind {
    DataQuality,
    Concentration,
    Volatility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.6 {
            RiskLevel::High
        } else if score >= 0.3 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    pub kind: RiskKind,
    pub score: f64,
    pub level: RiskLevel,
    pub subject: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub overall: f64,
    pub level: RiskLevel,
    pub components: Vec<RiskScore>,
}

/// Business reading of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessContext {
    pub domain: BusinessDomain,
    pub domain_scores: Vec<DomainScore>,
    pub kpis: Vec<Kpi>,
    pub risk: RiskAssessment,
}

/// Three-step scale shared by impact, effort, priority and ROI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn score(self) -> u8 {
        match self {
            Level::Low => 1,
            Level::Medium => 2,
            Level::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    DataQuality,
    Risk,
    Growth,
    Efficiency,
    Strategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub category: RecommendationCategory,
    pub priority: Level,
    pub impact: Level,
    pub effort: Level,
    pub roi: Level,
    pub action: String,
    pub rationale: String,
    pub columns: Vec<String>,
}

impl Recommendation {
    /// Impact score times ease score, in `1..=9`.
    pub fn priority_score(&self) -> u8 {
        let ease = 4 - self.effort.score();
        self.impact.score() * ease
    }
}
