use std::fmt::Write as _;

use datasight_model::{AnalysisResult, NarrativeSource};

use crate::business::{render_business, render_recommendations};
use crate::charts::render_charts;
use crate::insights::{render_insights, render_quality};
use crate::profiles::render_profiles;

/// Full text report for one analysis run.
pub fn render_summary(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let dataset = &result.dataset;
    let _ = writeln!(
        out,
        "Dataset: {}",
        dataset.source_id.as_deref().unwrap_or("(unnamed)")
    );
    let _ = writeln!(out, "Rows: {}  Columns: {}", dataset.rows, dataset.columns);
    if let Some(sample) = dataset.sample_size {
        let _ = writeln!(out, "Sampled rows: {sample}");
    }

    let _ = writeln!(out, "\nColumns:\n{}", render_profiles(&result.column_profiles));
    let _ = writeln!(out, "\nData quality:\n{}", render_quality(&result.data_quality));
    if !result.auto_charts.is_empty() {
        let _ = writeln!(out, "\nBest chart per angle:\n{}", render_charts(&result.auto_charts));
    }
    if !result.chart_recommendations.is_empty() {
        let _ = writeln!(
            out,
            "\nChart recommendations:\n{}",
            render_charts(&result.chart_recommendations)
        );
    }
    if !result.insights.is_empty() {
        let _ = writeln!(out, "\nInsights:\n{}", render_insights(&result.insights));
    }
    let _ = writeln!(out, "\nBusiness context:\n{}", render_business(&result.business));
    if !result.recommendations.is_empty() {
        let _ = writeln!(
            out,
            "\nRecommendations:\n{}",
            render_recommendations(&result.recommendations)
        );
    }
    if let Some(narrative) = &result.narrative {
        let source = match &narrative.source {
            NarrativeSource::Enhanced { engine } => engine.as_str(),
            NarrativeSource::Template => "template",
        };
        let _ = writeln!(out, "\nNarrative ({source}):\n{}", narrative.text);
    }
    if result.degraded {
        out.push_str("\nNote: narrative enhancement was unavailable; template text shown.\n");
    }
    out
}
