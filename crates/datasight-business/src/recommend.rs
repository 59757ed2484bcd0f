//! Recommendation templates triggered by insight conditions.

use std::cmp::Reverse;
use std::collections::HashSet;

use datasight_model::{
    BusinessOptions, ColumnProfile, CorrelationBand, DataQualityReport, ImpactLevel,
    InsightEvidence, InsightRecord, Level, Recommendation, RecommendationCategory, RiskAssessment,
    RiskKind, RiskLevel, SkewClass, TrendDirection,
};

/// Quality score below which a dataset-wide cleanup is suggested.
const QUALITY_FLOOR: f64 = 80.0;
/// Missing share that earns a per-column recommendation.
const MISSING_TRIGGER: f64 = 0.05;
const VOLATILE_CV: f64 = 0.5;
const SKEW_TRIGGER: f64 = 1.0;

/// Priority from `impact × ease`, where ease is the inverse of effort.
pub fn priority(impact: Level, effort: Level) -> Level {
    let score = impact.score() * (4 - effort.score());
    if score >= 6 {
        Level::High
    } else if score >= 3 {
        Level::Medium
    } else {
        Level::Low
    }
}

/// ROI from `impact − effort`.
pub fn roi(impact: Level, effort: Level) -> Level {
    match impact.score().cmp(&effort.score()) {
        std::cmp::Ordering::Greater => Level::High,
        std::cmp::Ordering::Equal => Level::Medium,
        std::cmp::Ordering::Less => Level::Low,
    }
}

struct Draft {
    title: String,
    category: RecommendationCategory,
    impact: Level,
    effort: Level,
    action: String,
    rationale: String,
    columns: Vec<String>,
}

impl Draft {
    fn finish(self) -> Recommendation {
        Recommendation {
            title: self.title,
            category: self.category,
            priority: priority(self.impact, self.effort),
            impact: self.impact,
            effort: self.effort,
            roi: roi(self.impact, self.effort),
            action: self.action,
            rationale: self.rationale,
            columns: self.columns,
        }
    }
}

fn missing_data(profiles: &[ColumnProfile], out: &mut Vec<Draft>) {
    for profile in profiles {
        let ratio = profile.missing_ratio();
        if profile.row_count == 0 || ratio <= MISSING_TRIGGER {
            continue;
        }
        let impact = if ratio > 0.3 {
            Level::High
        } else if ratio > 0.1 {
            Level::Medium
        } else {
            Level::Low
        };
        let effort = if ratio < 0.15 { Level::Low } else { Level::Medium };
        out.push(Draft {
            title: format!("Fill gaps in {}", profile.name),
            category: RecommendationCategory::DataQuality,
            impact,
            effort,
            action: format!(
                "Improve collection for {} or impute the missing values before modelling",
                profile.name
            ),
            rationale: format!("{:.1}% of values are missing", ratio * 100.0),
            columns: vec![profile.name.clone()],
        });
    }
}

fn overall_quality(quality: &DataQualityReport, out: &mut Vec<Draft>) {
    if quality.score >= QUALITY_FLOOR {
        return;
    }
    out.push(Draft {
        title: "Improve overall data quality".to_string(),
        category: RecommendationCategory::DataQuality,
        impact: Level::High,
        effort: Level::Medium,
        action: "Add validation and cleansing steps to the data pipeline".to_string(),
        rationale: format!("Data quality score is {:.0} out of 100", quality.score),
        columns: Vec::new(),
    });
}

fn small_sample(rows: usize, options: &BusinessOptions, out: &mut Vec<Draft>) {
    if rows >= options.small_sample_rows {
        return;
    }
    out.push(Draft {
        title: "Collect more data".to_string(),
        category: RecommendationCategory::DataQuality,
        impact: Level::Medium,
        effort: Level::Medium,
        action: "Extend the collection window before acting on these findings".to_string(),
        rationale: format!("Only {rows} rows limit statistical significance"),
        columns: Vec::new(),
    });
}

fn concentration(risk: &RiskAssessment, out: &mut Vec<Draft>) {
    let Some(component) = risk
        .components
        .iter()
        .find(|component| component.kind == RiskKind::Concentration)
    else {
        return;
    };
    if component.level == RiskLevel::Low {
        return;
    }
    let subject = component.subject.clone().unwrap_or_default();
    let impact = if component.level == RiskLevel::High {
        Level::High
    } else {
        Level::Medium
    };
    out.push(Draft {
        title: format!("Reduce concentration in {subject}"),
        category: RecommendationCategory::Risk,
        impact,
        effort: Level::High,
        action: format!("Diversify across {subject} levels to limit single-point dependence"),
        rationale: format!("Concentration index is {:.2}", component.score),
        columns: vec![subject],
    });
}

fn from_insight(record: &InsightRecord, out: &mut Vec<Draft>) {
    let columns = record.columns.clone();
    let subject = columns.first().cloned().unwrap_or_default();
    match &record.evidence {
        InsightEvidence::Outlier {
            count,
            proportion,
            impact,
            ..
        } => {
            let impact = match impact {
                ImpactLevel::High => Level::High,
                ImpactLevel::Moderate => Level::Medium,
                ImpactLevel::Low => return,
            };
            out.push(Draft {
                title: format!("Investigate outliers in {subject}"),
                category: RecommendationCategory::Risk,
                impact,
                effort: Level::Low,
                action: format!("Review the {count} extreme {subject} values for errors or exceptional cases"),
                rationale: format!("{:.1}% of values fall outside the expected range", proportion * 100.0),
                columns,
            });
        }
        InsightEvidence::Correlation {
            coefficient, band, ..
        } => {
            if *band < CorrelationBand::Strong {
                return;
            }
            let other = columns.get(1).cloned().unwrap_or_default();
            out.push(Draft {
                title: format!("Leverage the {subject} and {other} relationship"),
                category: RecommendationCategory::Strategy,
                impact: if *band == CorrelationBand::VeryStrong {
                    Level::High
                } else {
                    Level::Medium
                },
                effort: Level::Low,
                action: format!("Use {subject} as a leading indicator when planning {other}"),
                rationale: format!("{} correlation (r = {coefficient:.2})", band.as_str()),
                columns,
            });
        }
        InsightEvidence::Trend {
            direction, strength, ..
        } => {
            let impact = if *strength > 0.05 {
                Level::High
            } else {
                Level::Medium
            };
            match direction {
                TrendDirection::Decreasing => out.push(Draft {
                    title: format!("Address the decline in {subject}"),
                    category: RecommendationCategory::Risk,
                    impact,
                    effort: Level::Medium,
                    action: format!("Find the drivers behind falling {subject} and set up monitoring"),
                    rationale: record.headline.clone(),
                    columns,
                }),
                TrendDirection::Increasing => out.push(Draft {
                    title: format!("Capitalize on growth in {subject}"),
                    category: RecommendationCategory::Growth,
                    impact,
                    effort: Level::Low,
                    action: format!("Invest in the channels driving {subject} growth"),
                    rationale: record.headline.clone(),
                    columns,
                }),
                TrendDirection::Flat => {}
            }
        }
        InsightEvidence::Distribution {
            mean,
            std,
            skewness,
            skew,
            ..
        } => {
            if mean.abs() > f64::EPSILON {
                let cv = std / mean.abs();
                if cv > VOLATILE_CV {
                    out.push(Draft {
                        title: format!("Reduce variability in {subject}"),
                        category: RecommendationCategory::Efficiency,
                        impact: if cv > 1.0 { Level::High } else { Level::Medium },
                        effort: Level::Medium,
                        action: format!("Standardize the processes that produce {subject}"),
                        rationale: format!("Coefficient of variation is {:.0}%", cv * 100.0),
                        columns: columns.clone(),
                    });
                }
            }
            if *skew != SkewClass::Symmetric && skewness.abs() >= SKEW_TRIGGER {
                out.push(Draft {
                    title: format!("Report {subject} with the median"),
                    category: RecommendationCategory::Strategy,
                    impact: Level::Low,
                    effort: Level::Low,
                    action: format!("Use median and percentiles for {subject}; the mean is pulled by the tail"),
                    rationale: format!("Skewness is {skewness:.2}"),
                    columns,
                });
            }
        }
        InsightEvidence::Cluster { k, .. } => out.push(Draft {
            title: format!("Target the {k} segments"),
            category: RecommendationCategory::Strategy,
            impact: Level::Medium,
            effort: Level::Medium,
            action: "Tailor actions to each segment instead of the overall average".to_string(),
            rationale: record.headline.clone(),
            columns,
        }),
    }
}

/// Build, rank and cap recommendations.
///
/// Ordered by priority, then priority score, then title.
pub fn recommend(
    profiles: &[ColumnProfile],
    insights: &[InsightRecord],
    quality: &DataQualityReport,
    risk: &RiskAssessment,
    rows: usize,
    options: &BusinessOptions,
) -> Vec<Recommendation> {
    let mut drafts = Vec::new();
    overall_quality(quality, &mut drafts);
    missing_data(profiles, &mut drafts);
    small_sample(rows, options, &mut drafts);
    concentration(risk, &mut drafts);
    for record in insights {
        from_insight(record, &mut drafts);
    }

    rank(
        drafts.into_iter().map(Draft::finish).collect(),
        options.max_recommendations,
    )
}

/// Sort, keep the highest-ranked entry per title, then cap.
fn rank(mut recommendations: Vec<Recommendation>, cap: usize) -> Vec<Recommendation> {
    recommendations.sort_by(|a, b| {
        Reverse(a.priority)
            .cmp(&Reverse(b.priority))
            .then_with(|| b.priority_score().cmp(&a.priority_score()))
            .then_with(|| a.title.cmp(&b.title))
    });
    let mut seen = HashSet::new();
    recommendations.retain(|recommendation| seen.insert(recommendation.title.clone()));
    recommendations.truncate(cap);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_buckets() {
        assert_eq!(priority(Level::High, Level::Low), Level::High);
        assert_eq!(priority(Level::Medium, Level::Medium), Level::Medium);
        assert_eq!(priority(Level::High, Level::High), Level::Medium);
        assert_eq!(priority(Level::Low, Level::High), Level::Low);
    }

    #[test]
    fn roi_compares_impact_and_effort() {
        assert_eq!(roi(Level::High, Level::Low), Level::High);
        assert_eq!(roi(Level::Medium, Level::Medium), Level::Medium);
        assert_eq!(roi(Level::Low, Level::High), Level::Low);
    }

    fn draft(title: &str, impact: Level) -> Recommendation {
        Draft {
            title: title.to_string(),
            category: RecommendationCategory::DataQuality,
            impact,
            effort: Level::Low,
            action: String::new(),
            rationale: String::new(),
            columns: Vec::new(),
        }
        .finish()
    }

    #[test]
    fn repeated_titles_keep_the_highest_priority() {
        let ranked = rank(
            vec![
                draft("Fill gaps", Level::Low),
                draft("Review outliers", Level::Medium),
                draft("Fill gaps", Level::High),
            ],
            10,
        );
        let titles: Vec<(&str, Level)> = ranked
            .iter()
            .map(|recommendation| (recommendation.title.as_str(), recommendation.impact))
            .collect();
        assert_eq!(
            titles,
            vec![("Fill gaps", Level::High), ("Review outliers", Level::Medium)]
        );
    }
}
