//! Column-level types produced by the classifier.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Semantic type assigned to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Numeric,
    Categorical,
    Datetime,
    Boolean,
    Text,
    Unknown,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Categorical => "categorical",
            ColumnType::Datetime => "datetime",
            ColumnType::Boolean => "boolean",
            ColumnType::Text => "text",
            ColumnType::Unknown => "unknown",
        }
    }

    /// Parse a type name as accepted by override requests.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "numeric" | "number" => Some(ColumnType::Numeric),
            "categorical" | "category" => Some(ColumnType::Categorical),
            "datetime" | "date" => Some(ColumnType::Datetime),
            "boolean" | "bool" => Some(ColumnType::Boolean),
            "text" | "string" => Some(ColumnType::Text),
            "unknown" => Some(ColumnType::Unknown),
            _ => None,
        }
    }

    /// Types whose levels can be counted and compared as groups.
    pub fn is_discrete(self) -> bool {
        matches!(self, ColumnType::Categorical | ColumnType::Boolean)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-candidate scores recorded while classifying a column.
///
/// Each ratio is computed over non-missing values, so the record explains
/// why a column landed where it did and what an override would discard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeEvidence {
    /// Share of values drawn from a single recognized boolean pair.
    pub boolean: f64,
    /// Share of values that coerce to finite numbers.
    pub numeric: f64,
    /// Share of values that parse as dates inside the plausible year range.
    pub datetime: f64,
    /// `1 - unique_ratio`, zero when the level cap is exceeded.
    pub categorical: f64,
    /// Unique ratio of the non-missing values.
    pub text: f64,
    /// Values look like compact `YYYYMMDD` day stamps.
    pub date_serial_artifact: bool,
    pub distinct_tokens: usize,
}

impl TypeEvidence {
    pub fn score_for(&self, column_type: ColumnType) -> f64 {
        match column_type {
            ColumnType::Boolean => self.boolean,
            ColumnType::Numeric => self.numeric,
            ColumnType::Datetime => self.datetime,
            ColumnType::Categorical => self.categorical,
            ColumnType::Text => self.text,
            ColumnType::Unknown => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub top: String,
    pub top_count: usize,
    /// Most frequent levels, count descending then value ascending.
    pub distribution: Vec<LevelCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatetimeSummary {
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
    pub span_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSummary {
    pub mean_length: f64,
    pub max_length: usize,
}

/// Type-specific descriptive statistics attached to a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
    Datetime(DatetimeSummary),
    Text(TextSummary),
    None,
}

/// Everything known about one column after classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub column_type: ColumnType,
    pub row_count: usize,
    pub missing_count: usize,
    /// Distinct non-missing values.
    pub cardinality: usize,
    pub summary: ColumnSummary,
    /// `None` once the type has been set by an override.
    pub evidence: Option<TypeEvidence>,
    pub overridden: bool,
    pub sample_values: Vec<String>,
}

impl ColumnProfile {
    pub fn non_missing(&self) -> usize {
        self.row_count.saturating_sub(self.missing_count)
    }

    pub fn missing_ratio(&self) -> f64 {
        if self.row_count == 0 {
            1.0
        } else {
            self.missing_count as f64 / self.row_count as f64
        }
    }

    pub fn numeric_summary(&self) -> Option<&NumericSummary> {
        match &self.summary {
            ColumnSummary::Numeric(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn categorical_summary(&self) -> Option<&CategoricalSummary> {
        match &self.summary {
            ColumnSummary::Categorical(summary) => Some(summary),
            _ => None,
        }
    }
}

/// Classification diagnostics for one column, used to drive manual overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDiagnostic {
    pub name: String,
    pub chosen: ColumnType,
    pub evidence: TypeEvidence,
    /// Candidate types ordered by evidence score, strongest first.
    pub ranked: Vec<(ColumnType, f64)>,
}
