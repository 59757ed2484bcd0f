//! Business context synthesis over a classified table and its insights.

use datasight_ingest::Table;
use datasight_model::{
    BusinessContext, BusinessOptions, ColumnProfile, DataQualityReport, InsightRecord,
    Recommendation,
};
use tracing::{debug, info_span};

use crate::domain::detect_domain;
use crate::kpi::{ColumnFinder, compute_kpis};
use crate::recommend::recommend;
use crate::risk::assess_risk;

/// Business context plus the ranked recommendations derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessOutcome {
    pub context: BusinessContext,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Copy)]
pub struct BusinessSynthesizer<'a> {
    options: &'a BusinessOptions,
}

impl<'a> BusinessSynthesizer<'a> {
    pub fn new(options: &'a BusinessOptions) -> Self {
        Self { options }
    }

    pub fn synthesize(
        &self,
        table: &Table,
        profiles: &[ColumnProfile],
        insights: &[InsightRecord],
        quality: &DataQualityReport,
    ) -> BusinessOutcome {
        let span = info_span!("synthesize_business", columns = profiles.len());
        let _guard = span.enter();

        let (domain, domain_scores) = detect_domain(profiles, self.options);
        debug!(domain = domain.as_str(), "detected business domain");

        let finder = ColumnFinder::new(table, profiles, self.options.fuzzy_match_threshold);
        let kpis = compute_kpis(&finder, domain, insights, quality.completeness);
        let risk = assess_risk(&finder, profiles, domain, quality, insights);
        let recommendations = recommend(
            profiles,
            insights,
            quality,
            &risk,
            table.row_count(),
            self.options,
        );
        debug!(
            kpis = kpis.len(),
            risk = risk.overall,
            recommendations = recommendations.len(),
            "synthesized business context"
        );

        BusinessOutcome {
            context: BusinessContext {
                domain,
                domain_scores,
                kpis,
                risk,
            },
            recommendations,
        }
    }
}
