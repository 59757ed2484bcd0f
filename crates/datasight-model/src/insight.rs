//! Statistical insight records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Distribution,
    Correlation,
    Outlier,
    Trend,
    Cluster,
}

impl InsightKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InsightKind::Distribution => "distribution",
            InsightKind::Correlation => "correlation",
            InsightKind::Outlier => "outlier",
            InsightKind::Trend => "trend",
            InsightKind::Cluster => "cluster",
        }
    }
}

/// Labels that route an insight to business interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessTag {
    DataQuality,
    Risk,
    Opportunity,
    Growth,
    Decline,
    Segmentation,
    Relationship,
    Volatility,
    Skew,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierMethod {
    #[default]
    Iqr,
    Zscore,
}

impl OutlierMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            OutlierMethod::Iqr => "iqr",
            OutlierMethod::Zscore => "zscore",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkewClass {
    Symmetric,
    RightSkewed,
    LeftSkewed,
}

/// Effect-size band for a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationBand {
    Negligible,
    Small,
    Moderate,
    Strong,
    VeryStrong,
}

impl CorrelationBand {
    /// Band for the absolute coefficient.
    pub fn from_coefficient(r: f64) -> Self {
        let magnitude = r.abs();
        if magnitude < 0.1 {
            CorrelationBand::Negligible
        } else if magnitude < 0.3 {
            CorrelationBand::Small
        } else if magnitude < 0.5 {
            CorrelationBand::Moderate
        } else if magnitude <= 0.7 {
            CorrelationBand::Strong
        } else {
            CorrelationBand::VeryStrong
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CorrelationBand::Negligible => "negligible",
            CorrelationBand::Small => "small",
            CorrelationBand::Moderate => "moderate",
            CorrelationBand::Strong => "strong",
            CorrelationBand::VeryStrong => "very strong",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationDirection {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Flat,
}

impl TrendDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Flat => "flat",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Hour => "hour",
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Year => "year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub next_value: f64,
    /// Naive extrapolations are always reported as low confidence.
    pub confidence: ConfidenceLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodValue {
    pub period: NaiveDateTime,
    pub value: f64,
}

/// Kind-specific evidence carried by an insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InsightEvidence {
    Distribution {
        mean: f64,
        median: f64,
        std: f64,
        skewness: f64,
        kurtosis: f64,
        skew: SkewClass,
        heavy_tailed: bool,
    },
    Correlation {
        coefficient: f64,
        band: CorrelationBand,
        direction: CorrelationDirection,
        significant: bool,
        sample_size: usize,
        sampled: bool,
    },
    Outlier {
        method: OutlierMethod,
        count: usize,
        proportion: f64,
        lower_bound: f64,
        upper_bound: f64,
        impact: ImpactLevel,
    },
    Trend {
        datetime_column: String,
        granularity: Granularity,
        direction: TrendDirection,
        strength: f64,
        slope: f64,
        r_squared: f64,
        periods: Vec<PeriodValue>,
        forecast: Forecast,
    },
    Cluster {
        k: usize,
        sizes: Vec<usize>,
        inertia: f64,
        explained_variance: f64,
        centroids: Vec<Vec<f64>>,
        sampled: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRecord {
    pub kind: InsightKind,
    pub columns: Vec<String>,
    pub headline: String,
    pub evidence: InsightEvidence,
    pub confidence: f64,
    pub business_tags: Vec<BusinessTag>,
}

impl InsightRecord {
    pub fn involves(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub column: Option<String>,
    pub message: String,
    pub penalty: f64,
}

/// Dataset-wide data quality assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityReport {
    pub score: f64,
    pub completeness: f64,
    pub duplicate_rows: usize,
    pub issues: Vec<QualityIssue>,
}
