//! Risk scoring: data quality, concentration and volatility.
//!
//! Every component lies in `[0, 1]` and is bucketed low below 0.3, medium
//! below 0.6 and high above. The overall score is the highest component.

use std::collections::HashMap;

use datasight_model::{
    BusinessDomain, ColumnProfile, DataQualityReport, InsightEvidence, InsightRecord, RiskAssessment,
    RiskKind, RiskLevel, RiskScore,
};
use datasight_stats::coefficient_of_variation;

use crate::kpi::ColumnFinder;

fn component(kind: RiskKind, score: f64, subject: Option<String>) -> RiskScore {
    let score = score.clamp(0.0, 1.0);
    RiskScore {
        kind,
        score,
        level: RiskLevel::from_score(score),
        subject,
    }
}

/// Normalized Gini coefficient of a set of counts.
///
/// 0 when every level is equally common, approaching 1 as one level takes
/// everything. Fewer than two levels give `None`.
pub fn normalized_gini(counts: &[usize]) -> Option<f64> {
    let n = counts.len();
    if n < 2 {
        return None;
    }
    let total: usize = counts.iter().sum();
    if total == 0 {
        return None;
    }
    let mut sorted = counts.to_vec();
    sorted.sort_unstable();
    // G = sum((2i - n - 1) * x_i) / (n * sum(x)), i is 1-based over ascending values.
    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(idx, count)| (2.0 * (idx + 1) as f64 - n as f64 - 1.0) * *count as f64)
        .sum();
    let gini = weighted / (n as f64 * total as f64);
    Some((gini * n as f64 / (n - 1) as f64).clamp(0.0, 1.0))
}

/// Missing share plus mean outlier proportion across numeric columns.
pub fn data_quality_risk(
    quality: &DataQualityReport,
    insights: &[InsightRecord],
    numeric_columns: usize,
) -> RiskScore {
    let missing = 1.0 - quality.completeness;
    let outlier_total: f64 = insights
        .iter()
        .filter_map(|record| match record.evidence {
            InsightEvidence::Outlier { proportion, .. } => Some(proportion),
            _ => None,
        })
        .sum();
    let outliers = if numeric_columns == 0 {
        0.0
    } else {
        outlier_total / numeric_columns as f64
    };
    component(RiskKind::DataQuality, missing + outliers, None)
}

/// Concentration of the most concentrated discrete column.
pub fn concentration_risk(finder: &ColumnFinder<'_>, profiles: &[ColumnProfile]) -> Option<RiskScore> {
    profiles
        .iter()
        .filter(|profile| profile.column_type.is_discrete())
        .filter_map(|profile| {
            let counts = level_counts(finder, &profile.name);
            normalized_gini(&counts).map(|gini| (profile, gini))
        })
        .fold(None, |best: Option<(&ColumnProfile, f64)>, (profile, gini)| match best {
            Some((_, top)) if top >= gini => best,
            _ => Some((profile, gini)),
        })
        .map(|(profile, gini)| {
            component(RiskKind::Concentration, gini, Some(profile.name.clone()))
        })
}

fn level_counts(finder: &ColumnFinder<'_>, name: &str) -> Vec<usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    if let Some(column) = finder.column(name) {
        for value in column.values() {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    counts.into_values().collect()
}

/// Coefficient of variation of the key metric mapped onto `cv / (1 + cv)`.
pub fn volatility_risk(finder: &ColumnFinder<'_>, domain: BusinessDomain) -> Option<RiskScore> {
    let key = finder.key_metric(domain)?;
    let cv = coefficient_of_variation(&finder.values(&key.name))?;
    Some(component(
        RiskKind::Volatility,
        cv / (1.0 + cv),
        Some(key.name.clone()),
    ))
}

pub fn assess_risk(
    finder: &ColumnFinder<'_>,
    profiles: &[ColumnProfile],
    domain: BusinessDomain,
    quality: &DataQualityReport,
    insights: &[InsightRecord],
) -> RiskAssessment {
    let numeric_columns = profiles
        .iter()
        .filter(|profile| profile.numeric_summary().is_some())
        .count();
    let mut components = vec![data_quality_risk(quality, insights, numeric_columns)];
    components.extend(concentration_risk(finder, profiles));
    components.extend(volatility_risk(finder, domain));
    let overall = components
        .iter()
        .map(|risk| risk.score)
        .fold(0.0, f64::max);
    RiskAssessment {
        overall,
        level: RiskLevel::from_score(overall),
        components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gini_of_even_counts_is_zero() {
        let gini = normalized_gini(&[25, 25, 25, 25]).expect("gini");
        assert!(gini.abs() < 1e-9);
    }

    #[test]
    fn gini_of_one_dominant_level_is_one() {
        let gini = normalized_gini(&[0, 0, 100]).expect("gini");
        assert!((gini - 1.0).abs() < 1e-9);
    }

    #[test]
    fn gini_needs_two_levels() {
        assert_eq!(normalized_gini(&[10]), None);
    }
}
