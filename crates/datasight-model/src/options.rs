//! Configuration options for an analysis run.
//!
//! All thresholds live here and are passed by reference into each stage.
//! Defaults are heuristic and meant to be tuned against representative data.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::insight::OutlierMethod;
use crate::result::NarrativeMode;

/// Thresholds for the column type classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierOptions {
    /// Share of non-missing values that must coerce to numbers.
    pub numeric_match_ratio: f64,
    /// Share of non-missing values that must parse as plausible dates.
    pub datetime_match_ratio: f64,
    pub min_year: i32,
    pub max_year: i32,
    /// Unique ratio below which a column may be categorical.
    pub categorical_unique_ratio: f64,
    pub max_categories: usize,
    /// Longest value still treated as a discrete token.
    pub max_category_length: usize,
    /// Number of example values kept on each profile.
    pub sample_values: usize,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            numeric_match_ratio: 0.95,
            datetime_match_ratio: 0.90,
            min_year: 1900,
            max_year: 2100,
            categorical_unique_ratio: 0.5,
            max_categories: 50,
            max_category_length: 64,
            sample_values: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Row count above which point-based charts give way to binned ones.
    pub size_threshold: usize,
    pub max_recommendations: usize,
    pub max_pie_slices: usize,
    pub max_stacked_levels: usize,
    /// Levels shown by categorical charts.
    pub top_n: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            size_threshold: 1_000,
            max_recommendations: 25,
            max_pie_slices: 12,
            max_stacked_levels: 20,
            top_n: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightOptions {
    pub outlier_method: OutlierMethod,
    pub zscore_threshold: f64,
    pub iqr_multiplier: f64,
    /// Outlier share above which impact is high.
    pub outlier_high_impact: f64,
    /// Outlier share above which impact is moderate.
    pub outlier_moderate_impact: f64,
    pub confidence_level: f64,
    /// Smallest |r| reported as a correlation insight.
    pub min_correlation: f64,
    /// Restrict numeric analysis to these columns (empty means all).
    pub target_columns: Vec<String>,
    pub sampling_threshold: usize,
    pub sample_size: usize,
    pub sample_seed: u64,
    pub cluster_min_rows: usize,
    pub cluster_max_k: usize,
    pub max_trend_targets: usize,
    /// Normalized slope below which a trend is flat.
    pub flat_trend_threshold: f64,
}

impl Default for InsightOptions {
    fn default() -> Self {
        Self {
            outlier_method: OutlierMethod::Iqr,
            zscore_threshold: 3.0,
            iqr_multiplier: 1.5,
            outlier_high_impact: 0.05,
            outlier_moderate_impact: 0.01,
            confidence_level: 0.95,
            min_correlation: 0.3,
            target_columns: Vec::new(),
            sampling_threshold: 100_000,
            sample_size: 10_000,
            sample_seed: 42,
            cluster_min_rows: 30,
            cluster_max_k: 6,
            max_trend_targets: 3,
            flat_trend_threshold: 0.005,
        }
    }
}

impl InsightOptions {
    /// True when `column` is in scope for numeric analysis.
    pub fn targets(&self, column: &str) -> bool {
        self.target_columns.is_empty() || self.target_columns.iter().any(|name| name == column)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessOptions {
    /// Keyword hits needed before a domain is assigned.
    pub domain_min_matches: usize,
    /// Jaro-Winkler similarity accepted as a keyword match.
    pub fuzzy_match_threshold: f64,
    pub max_recommendations: usize,
    /// Datasets with fewer rows trigger the small-sample recommendation.
    pub small_sample_rows: usize,
}

impl Default for BusinessOptions {
    fn default() -> Self {
        Self {
            domain_min_matches: 2,
            fuzzy_match_threshold: 0.92,
            max_recommendations: 10,
            small_sample_rows: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeOptions {
    pub enabled: bool,
    pub mode: NarrativeMode,
    pub timeout_ms: u64,
    pub model: String,
    /// Falls back to `OLLAMA_BASE_URL`, then the local default.
    pub base_url: Option<String>,
    pub temperature: f64,
    /// Shorter responses are treated as failures.
    pub min_response_chars: usize,
}

impl Default for NarrativeOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: NarrativeMode::Summarize,
            timeout_ms: 30_000,
            model: "llama3.1:8b".to_string(),
            base_url: None,
            temperature: 0.3,
            min_response_chars: 50,
        }
    }
}

/// Options controlling a full analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    pub classifier: ClassifierOptions,
    pub charts: ChartOptions,
    pub insights: InsightOptions,
    pub business: BusinessOptions,
    pub narrative: NarrativeOptions,
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from TOML; missing keys keep their defaults.
    pub fn from_toml_str(input: &str) -> std::result::Result<Self, ConfigError> {
        let options: Self =
            toml::from_str(input).map_err(|err| ConfigError::Parse(err.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read options: {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("parse options: {}", path.display()))
    }

    #[must_use]
    pub fn with_outlier_method(mut self, method: OutlierMethod) -> Self {
        self.insights.outlier_method = method;
        self
    }

    #[must_use]
    pub fn with_target_columns(mut self, columns: Vec<String>) -> Self {
        self.insights.target_columns = columns;
        self
    }

    #[must_use]
    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.insights.confidence_level = level;
        self
    }

    #[must_use]
    pub fn with_sampling(mut self, threshold: usize, sample_size: usize, seed: u64) -> Self {
        self.insights.sampling_threshold = threshold;
        self.insights.sample_size = sample_size;
        self.insights.sample_seed = seed;
        self
    }

    #[must_use]
    pub fn with_chart_size_threshold(mut self, rows: usize) -> Self {
        self.charts.size_threshold = rows;
        self
    }

    #[must_use]
    pub fn with_narrative(mut self, narrative: NarrativeOptions) -> Self {
        self.narrative = narrative;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let classifier = &self.classifier;
        ConfigError::check_range(
            "classifier.numeric_match_ratio",
            classifier.numeric_match_ratio,
            0.5,
            1.0,
        )?;
        ConfigError::check_range(
            "classifier.datetime_match_ratio",
            classifier.datetime_match_ratio,
            0.5,
            1.0,
        )?;
        ConfigError::check_range(
            "classifier.categorical_unique_ratio",
            classifier.categorical_unique_ratio,
            0.0,
            1.0,
        )?;
        if classifier.min_year > classifier.max_year {
            return Err(ConfigError::OutOfRange {
                field: "classifier.min_year",
                value: f64::from(classifier.min_year),
                min: f64::from(i32::MIN),
                max: f64::from(classifier.max_year),
            });
        }
        ConfigError::check_min("classifier.max_categories", classifier.max_categories, 2)?;

        let insights = &self.insights;
        ConfigError::check_range("insights.zscore_threshold", insights.zscore_threshold, 0.5, 10.0)?;
        ConfigError::check_range("insights.iqr_multiplier", insights.iqr_multiplier, 0.5, 10.0)?;
        ConfigError::check_range(
            "insights.confidence_level",
            insights.confidence_level,
            0.5,
            0.999,
        )?;
        ConfigError::check_range("insights.min_correlation", insights.min_correlation, 0.0, 1.0)?;
        ConfigError::check_min("insights.sample_size", insights.sample_size, 10)?;
        ConfigError::check_min("insights.cluster_min_rows", insights.cluster_min_rows, 6)?;
        ConfigError::check_min("insights.cluster_max_k", insights.cluster_max_k, 2)?;

        ConfigError::check_min(
            "charts.max_recommendations",
            self.charts.max_recommendations,
            1,
        )?;
        ConfigError::check_range(
            "business.fuzzy_match_threshold",
            self.business.fuzzy_match_threshold,
            0.0,
            1.0,
        )?;
        Ok(())
    }
}
