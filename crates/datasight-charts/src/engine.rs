//! Ranking of chart recommendations.

use std::cmp::Ordering;

use datasight_model::{
    ChartOptions, ChartParams, ChartRecommendation, ChartType, ColumnProfile, InsightAngle,
};
use tracing::{debug, info_span};

use crate::gate::{Candidate, candidates};
use crate::score::{score_candidate, sturges_bins, usable_rows};

/// Scores and ranks chart types for a set of column profiles.
#[derive(Debug, Clone, Copy)]
pub struct ChartEngine<'a> {
    options: &'a ChartOptions,
}

impl<'a> ChartEngine<'a> {
    pub fn new(options: &'a ChartOptions) -> Self {
        Self { options }
    }

    /// Ranked recommendations over every profile, capped at `max_recommendations`.
    pub fn recommend(&self, profiles: &[ColumnProfile]) -> Vec<ChartRecommendation> {
        let mut ranked = self.rank_all(profiles);
        ranked.truncate(self.options.max_recommendations);
        ranked
    }

    /// Ranked recommendations restricted to the named columns.
    ///
    /// Names that match no profile are ignored.
    pub fn recommend_for(
        &self,
        profiles: &[ColumnProfile],
        columns: &[String],
    ) -> Vec<ChartRecommendation> {
        let subset: Vec<ColumnProfile> = profiles
            .iter()
            .filter(|profile| columns.contains(&profile.name))
            .cloned()
            .collect();
        self.recommend(&subset)
    }

    /// The single best recommendation per insight angle.
    ///
    /// Angles appear in the order distribution, comparison, relationship,
    /// composition, trend; angles with no passing chart are skipped.
    pub fn auto_generate_best(&self, profiles: &[ColumnProfile]) -> Vec<ChartRecommendation> {
        best_per_angle(&self.rank_all(profiles))
    }

    /// Every gate-passing recommendation in ranked order, uncapped.
    pub fn rank_all(&self, profiles: &[ColumnProfile]) -> Vec<ChartRecommendation> {
        let total_rows = profiles
            .iter()
            .map(|profile| profile.row_count)
            .max()
            .unwrap_or(0);
        let span = info_span!("recommend_charts", columns = profiles.len(), rows = total_rows);
        let _guard = span.enter();

        let mut ranked: Vec<ChartRecommendation> = candidates(profiles, self.options)
            .into_iter()
            .map(|candidate| self.recommendation(candidate, total_rows))
            .collect();
        ranked.sort_by(compare_recommendations);
        debug!(candidates = ranked.len(), "ranked chart candidates");
        ranked
    }

    fn recommendation(&self, candidate: Candidate<'_>, total_rows: usize) -> ChartRecommendation {
        let (score, breakdown, rationale) = score_candidate(&candidate, total_rows, self.options);
        let params = self.params(&candidate);
        ChartRecommendation {
            chart_type: candidate.chart_type,
            angle: candidate.chart_type.angle(),
            bindings: candidate.bindings,
            score,
            breakdown,
            rationale,
            params,
        }
    }

    fn params(&self, candidate: &Candidate<'_>) -> ChartParams {
        match candidate.chart_type {
            ChartType::Histogram => ChartParams {
                bins: Some(sturges_bins(usable_rows(candidate))),
                top_n: None,
            },
            ChartType::BarChart
            | ChartType::PieChart
            | ChartType::GroupedBar
            | ChartType::ViolinPlot
            | ChartType::StackedBar => {
                let levels = candidate
                    .profiles
                    .iter()
                    .filter(|profile| profile.column_type.is_discrete())
                    .map(|profile| profile.cardinality)
                    .max()
                    .unwrap_or(0);
                ChartParams {
                    bins: None,
                    top_n: Some(levels.min(self.options.top_n)),
                }
            }
            _ => ChartParams::default(),
        }
    }
}

/// Score descending, then chart-type order, then bound column names.
pub fn compare_recommendations(a: &ChartRecommendation, b: &ChartRecommendation) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.chart_type.rank().cmp(&b.chart_type.rank()))
        .then_with(|| a.columns().cmp(b.columns()))
}

/// Pick the first recommendation of each angle from an already ranked list.
pub fn best_per_angle(ranked: &[ChartRecommendation]) -> Vec<ChartRecommendation> {
    InsightAngle::ALL
        .iter()
        .filter_map(|angle| ranked.iter().find(|rec| rec.angle == *angle).cloned())
        .collect()
}
