use serde::{Deserialize, Serialize};

use crate::business::{BusinessContext, Recommendation};
use crate::chart::ChartRecommendation;
use crate::column::ColumnProfile;
use crate::insight::{DataQualityReport, InsightRecord};

/// Shape of the analyzed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub source_id: Option<String>,
    pub rows: usize,
    pub columns: usize,
    /// Row count used by sampled computations, when sampling kicked in.
    pub sample_size: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeMode {
    #[default]
    Summarize,
    RefineRecommendations,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NarrativeSource {
    Enhanced { engine: String },
    Template,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub mode: NarrativeMode,
    pub source: NarrativeSource,
    pub text: String,
    pub key_findings: Vec<String>,
}

/// Complete output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub dataset: DatasetSummary,
    pub column_profiles: Vec<ColumnProfile>,
    pub chart_recommendations: Vec<ChartRecommendation>,
    /// Best chart per insight angle.
    pub auto_charts: Vec<ChartRecommendation>,
    pub insights: Vec<InsightRecord>,
    pub data_quality: DataQualityReport,
    pub business: BusinessContext,
    pub recommendations: Vec<Recommendation>,
    pub narrative: Option<Narrative>,
    /// Set when the narrative came from the fallback template.
    pub degraded: bool,
}

impl AnalysisResult {
    pub fn profile(&self, name: &str) -> Option<&ColumnProfile> {
        self.column_profiles
            .iter()
            .find(|profile| profile.name == name)
    }
}
