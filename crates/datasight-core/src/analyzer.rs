//! The analysis pipeline.
//!
//! Classification feeds the chart engine and the insight engine, whose output
//! feeds business synthesis. Every stage reads the same [`AnalysisOptions`],
//! and only a structurally invalid table aborts a run.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use datasight_business::BusinessSynthesizer;
use datasight_charts::ChartEngine;
use datasight_classify::{apply_overrides, classify_table_with_overrides, diagnose_table};
use datasight_ingest::{Table, read_csv_table, table_from_dataframe};
use datasight_model::{
    AnalysisOptions, AnalysisResult, ChartRecommendation, ColumnDiagnostic, ColumnProfile,
    ColumnType, DatasetSummary, Result,
};
use datasight_narrative::{CancelToken, NarrativeEnhancer, OllamaEnhancer, narrate};
use datasight_stats::{InsightEngine, assess_quality};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, trace, warn};

use crate::cache::ResultCache;
use crate::fingerprint::fingerprint;
use crate::logging::redact_value;

/// Explicit column types keyed by column name.
pub type Overrides = BTreeMap<String, ColumnType>;

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    options: AnalysisOptions,
}

impl Analyzer {
    /// Validate `options` and build an analyzer around them.
    pub fn new(options: AnalysisOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Evidence scores for every column, to help choose overrides.
    pub fn diagnose(&self, table: &Table) -> Result<Vec<ColumnDiagnostic>> {
        table.ensure_analyzable()?;
        Ok(diagnose_table(table, &self.options.classifier))
    }

    pub fn analyze(&self, table: &Table) -> Result<AnalysisResult> {
        self.analyze_with_overrides(table, &Overrides::new())
    }

    /// Full analysis with caller-chosen types for some columns.
    ///
    /// Override names that match no column are logged and ignored.
    pub fn analyze_with_overrides(
        &self,
        table: &Table,
        overrides: &Overrides,
    ) -> Result<AnalysisResult> {
        table.ensure_analyzable()?;
        let span = info_span!(
            "analyze",
            rows = table.row_count(),
            columns = table.column_count(),
            overrides = overrides.len()
        );
        let _guard = span.enter();
        let profiles = classify_table_with_overrides(table, overrides, &self.options.classifier);
        Ok(self.assemble(table, profiles))
    }

    /// Apply overrides on top of a previous result and recompute everything
    /// downstream of classification.
    ///
    /// Profiles of columns without an override are reused as they are. When
    /// `previous` was computed for a different column layout the table is
    /// classified from scratch.
    pub fn reanalyze(
        &self,
        table: &Table,
        previous: &AnalysisResult,
        overrides: &Overrides,
    ) -> Result<AnalysisResult> {
        table.ensure_analyzable()?;
        if !same_layout(table, &previous.column_profiles) {
            warn!("previous result does not match the table; classifying again");
            return self.analyze_with_overrides(table, overrides);
        }
        let span = info_span!(
            "reanalyze",
            rows = table.row_count(),
            overrides = overrides.len()
        );
        let _guard = span.enter();
        let profiles = apply_overrides(
            table,
            &previous.column_profiles,
            overrides,
            &self.options.classifier,
        );
        Ok(self.assemble(table, profiles))
    }

    /// Analysis through `cache`, keyed by table content, options and overrides.
    pub fn analyze_cached(
        &self,
        cache: &ResultCache,
        table: &Table,
        overrides: &Overrides,
    ) -> Result<Arc<AnalysisResult>> {
        let key = fingerprint(table, &self.options, overrides);
        debug!(fingerprint = %key, "looking up cached analysis");
        cache.get_or_compute(key, || self.analyze_with_overrides(table, overrides))
    }

    pub fn analyze_csv(&self, path: &Path) -> anyhow::Result<AnalysisResult> {
        let table = read_csv_table(path)?;
        Ok(self.analyze(&table)?)
    }

    pub fn analyze_frame(&self, frame: &DataFrame) -> Result<AnalysisResult> {
        let table = table_from_dataframe(frame)?;
        self.analyze(&table)
    }

    /// Chart recommendations restricted to `columns`, reusing the profiles
    /// of an earlier result.
    pub fn recommend_charts(
        &self,
        result: &AnalysisResult,
        columns: &[String],
    ) -> Vec<ChartRecommendation> {
        ChartEngine::new(&self.options.charts).recommend_for(&result.column_profiles, columns)
    }

    /// The configured Ollama enhancer, when narratives are enabled.
    pub fn narrative_enhancer(&self) -> Option<OllamaEnhancer> {
        if !self.options.narrative.enabled {
            return None;
        }
        match OllamaEnhancer::new(&self.options.narrative) {
            Ok(enhancer) => Some(enhancer),
            Err(err) => {
                warn!(error = %err, "narrative enhancer unavailable");
                None
            }
        }
    }

    /// Attach a narrative; only `narrative` and `degraded` change.
    pub async fn narrate(
        &self,
        result: &mut AnalysisResult,
        enhancer: Option<&dyn NarrativeEnhancer>,
        cancel: &CancelToken,
    ) {
        narrate(result, enhancer, &self.options.narrative, cancel).await;
    }

    /// Structured analysis followed by the narrative boundary.
    ///
    /// The analysis itself runs synchronously; the enhancer call is the only
    /// await point.
    pub async fn analyze_with_narrative(
        &self,
        table: &Table,
        overrides: &Overrides,
        enhancer: Option<&dyn NarrativeEnhancer>,
        cancel: &CancelToken,
    ) -> Result<AnalysisResult> {
        let mut result = self.analyze_with_overrides(table, overrides)?;
        self.narrate(&mut result, enhancer, cancel).await;
        Ok(result)
    }

    fn assemble(&self, table: &Table, profiles: Vec<ColumnProfile>) -> AnalysisResult {
        let started = Instant::now();
        for profile in &profiles {
            trace!(
                column = %profile.name,
                column_type = %profile.column_type,
                first_value = redact_value(profile.sample_values.first().map_or("", String::as_str)),
                "profiled column"
            );
        }

        let charts = ChartEngine::new(&self.options.charts);
        let ranked = charts.rank_all(&profiles);
        let auto_charts = datasight_charts::best_per_angle(&ranked);
        let mut chart_recommendations = ranked;
        chart_recommendations.truncate(self.options.charts.max_recommendations);

        let run = InsightEngine::new(&self.options.insights).run(table, &profiles);
        let data_quality = assess_quality(table, &profiles);
        let business = BusinessSynthesizer::new(&self.options.business).synthesize(
            table,
            &profiles,
            &run.insights,
            &data_quality,
        );

        info!(
            charts = chart_recommendations.len(),
            insights = run.insights.len(),
            recommendations = business.recommendations.len(),
            quality = data_quality.score,
            domain = business.context.domain.as_str(),
            duration_ms = started.elapsed().as_millis() as u64,
            "analysis complete"
        );

        AnalysisResult {
            dataset: DatasetSummary {
                source_id: table.source_id.clone(),
                rows: table.row_count(),
                columns: table.column_count(),
                sample_size: run.sample_size,
            },
            column_profiles: profiles,
            chart_recommendations,
            auto_charts,
            insights: run.insights,
            data_quality,
            business: business.context,
            recommendations: business.recommendations,
            narrative: None,
            degraded: false,
        }
    }
}

fn same_layout(table: &Table, profiles: &[ColumnProfile]) -> bool {
    profiles.len() == table.column_count()
        && table
            .columns()
            .iter()
            .zip(profiles)
            .all(|(column, profile)| {
                column.name == profile.name && column.len() == profile.row_count
            })
}
