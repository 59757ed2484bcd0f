//! Suitability scoring for gate-passing candidates.
//!
//! A score is `(0.4·gate + 0.35·fit + 0.25·adequacy) · size_modifier`. Each
//! term is kept in a [`ScoreBreakdown`] so callers can explain a ranking.

use datasight_model::{
    ChartOptions, ChartType, ColumnProfile, ColumnType, InsightAngle, MarkDensity,
    ScoreBreakdown,
};

use crate::gate::Candidate;

const GATE_WEIGHT: f64 = 0.4;
const FIT_WEIGHT: f64 = 0.35;
const ADEQUACY_WEIGHT: f64 = 0.25;

/// Modifier applied to point-based charts above the size threshold.
const LARGE_POINT_MODIFIER: f64 = 0.6;
/// Modifier applied to binned relationship charts below the size threshold.
const SMALL_BINNED_MODIFIER: f64 = 0.75;

/// Unique ratio past which a discrete column reads as near-unique.
const NEAR_UNIQUE_RATIO: f64 = 0.5;

/// Rows needed before a chart type is fully supported by the data.
pub fn min_rows(chart_type: ChartType) -> usize {
    match chart_type {
        ChartType::Histogram => 10,
        ChartType::BoxPlot => 10,
        ChartType::DensityPlot => 20,
        ChartType::BarChart => 5,
        ChartType::PieChart => 5,
        ChartType::GroupedBar => 10,
        ChartType::ViolinPlot => 15,
        ChartType::ScatterPlot => 20,
        ChartType::HexbinPlot => 50,
        ChartType::CorrelationHeatmap => 10,
        ChartType::LineChart => 10,
        ChartType::StackedBar => 10,
    }
}

/// Level count a discrete role reads best at; fit decays beyond it.
fn preferred_levels(chart_type: ChartType, options: &ChartOptions) -> usize {
    match chart_type {
        ChartType::BarChart => options.top_n,
        ChartType::PieChart => 6,
        ChartType::GroupedBar | ChartType::StackedBar => 10,
        ChartType::ViolinPlot => 8,
        _ => options.top_n,
    }
}

/// Normalized Shannon entropy of a column's level counts.
///
/// Levels beyond the stored distribution are pooled into one bucket.
pub fn normalized_entropy(profile: &ColumnProfile) -> f64 {
    let Some(summary) = profile.categorical_summary() else {
        return 0.0;
    };
    let mut counts: Vec<usize> = summary.distribution.iter().map(|level| level.count).collect();
    let listed: usize = counts.iter().sum();
    let rest = profile.non_missing().saturating_sub(listed);
    if rest > 0 {
        counts.push(rest);
    }
    let total: usize = counts.iter().sum();
    if counts.len() < 2 || total == 0 {
        return 0.0;
    }
    let entropy: f64 = counts
        .iter()
        .filter(|count| **count > 0)
        .map(|count| {
            let p = *count as f64 / total as f64;
            -p * p.ln()
        })
        .sum();
    (entropy / (counts.len() as f64).ln()).clamp(0.0, 1.0)
}

/// Fit of a discrete column in a role preferring at most `preferred` levels.
///
/// Zero for single-value columns; halves toward zero as the column nears
/// one level per row.
pub fn discrete_fit(profile: &ColumnProfile, preferred: usize) -> f64 {
    let levels = profile.cardinality;
    if levels <= 1 {
        return 0.0;
    }
    let window = if levels <= preferred.max(1) {
        1.0
    } else {
        preferred.max(1) as f64 / levels as f64
    };
    let unique_ratio = levels as f64 / profile.non_missing().max(1) as f64;
    let uniqueness = if unique_ratio > NEAR_UNIQUE_RATIO {
        2.0 * (1.0 - unique_ratio)
    } else {
        1.0
    };
    (normalized_entropy(profile) * window * uniqueness).clamp(0.0, 1.0)
}

/// Fit of a continuous column: more distinct values read better, up to `saturation`.
pub fn continuous_fit(profile: &ColumnProfile, saturation: f64) -> f64 {
    if profile.cardinality <= 1 {
        return 0.0;
    }
    (profile.cardinality as f64 / saturation).min(1.0)
}

fn role_fit(chart_type: ChartType, profile: &ColumnProfile, options: &ChartOptions) -> f64 {
    match profile.column_type {
        ColumnType::Categorical | ColumnType::Boolean => {
            discrete_fit(profile, preferred_levels(chart_type, options))
        }
        ColumnType::Numeric if chart_type == ChartType::BoxPlot => continuous_fit(profile, 5.0),
        ColumnType::Numeric | ColumnType::Datetime => continuous_fit(profile, 10.0),
        ColumnType::Text | ColumnType::Unknown => 0.0,
    }
}

/// Fit term: product over bound columns, mean for the heatmap.
pub fn fit(candidate: &Candidate<'_>, options: &ChartOptions) -> f64 {
    let fits = candidate
        .profiles
        .iter()
        .map(|profile| role_fit(candidate.chart_type, profile, options));
    if candidate.chart_type == ChartType::CorrelationHeatmap {
        let fits: Vec<f64> = fits.collect();
        if fits.is_empty() {
            0.0
        } else {
            fits.iter().sum::<f64>() / fits.len() as f64
        }
    } else {
        fits.product()
    }
}

/// Rows shared by every bound column.
pub fn usable_rows(candidate: &Candidate<'_>) -> usize {
    candidate
        .profiles
        .iter()
        .map(|profile| profile.non_missing())
        .min()
        .unwrap_or(0)
}

pub fn adequacy(chart_type: ChartType, rows: usize) -> f64 {
    (rows as f64 / min_rows(chart_type) as f64).min(1.0)
}

pub fn size_modifier(chart_type: ChartType, total_rows: usize, options: &ChartOptions) -> f64 {
    let large = total_rows > options.size_threshold;
    match (chart_type.density(), large) {
        (MarkDensity::Point, true) => LARGE_POINT_MODIFIER,
        (MarkDensity::Binned, false) if chart_type.angle() == InsightAngle::Relationship => {
            SMALL_BINNED_MODIFIER
        }
        _ => 1.0,
    }
}

/// Score a candidate and collect the rationale tags explaining it.
pub fn score_candidate(
    candidate: &Candidate<'_>,
    total_rows: usize,
    options: &ChartOptions,
) -> (f64, ScoreBreakdown, Vec<String>) {
    let breakdown = ScoreBreakdown {
        gate: 1.0,
        fit: fit(candidate, options),
        adequacy: adequacy(candidate.chart_type, usable_rows(candidate)),
        size_modifier: size_modifier(candidate.chart_type, total_rows, options),
    };
    let score = ((GATE_WEIGHT * breakdown.gate
        + FIT_WEIGHT * breakdown.fit
        + ADEQUACY_WEIGHT * breakdown.adequacy)
        * breakdown.size_modifier)
        .clamp(0.0, 1.0);
    let rationale = rationale(candidate, &breakdown, total_rows, options);
    (score, breakdown, rationale)
}

fn rationale(
    candidate: &Candidate<'_>,
    breakdown: &ScoreBreakdown,
    total_rows: usize,
    options: &ChartOptions,
) -> Vec<String> {
    let mut tags = vec![format!("gate:{}", signature(candidate))];
    if candidate
        .profiles
        .iter()
        .any(|profile| profile.cardinality <= 1)
    {
        tags.push("single_value".to_string());
    } else if breakdown.fit >= 0.75 {
        tags.push("good_fit".to_string());
    } else if breakdown.fit < 0.25 {
        tags.push("weak_fit".to_string());
    }
    if candidate.profiles.iter().any(|profile| {
        profile.column_type.is_discrete()
            && profile.cardinality > preferred_levels(candidate.chart_type, options)
    }) {
        tags.push("high_cardinality".to_string());
    }
    if breakdown.adequacy < 1.0 {
        tags.push("small_sample".to_string());
    }
    if total_rows > options.size_threshold {
        match candidate.chart_type.density() {
            MarkDensity::Point => tags.push("large_dataset_point_penalty".to_string()),
            MarkDensity::Binned => tags.push("large_dataset_binned".to_string()),
            MarkDensity::Neutral => {}
        }
    } else if breakdown.size_modifier < 1.0 {
        tags.push("small_dataset_prefers_points".to_string());
    }
    if candidate
        .profiles
        .iter()
        .any(|profile| profile.overridden)
    {
        tags.push("type_override".to_string());
    }
    tags
}

fn signature(candidate: &Candidate<'_>) -> String {
    candidate
        .profiles
        .iter()
        .map(|profile| profile.column_type.as_str())
        .collect::<Vec<_>>()
        .join("+")
}

/// Sturges bin count, clamped to 5..=50.
pub fn sturges_bins(rows: usize) -> usize {
    if rows == 0 {
        return 5;
    }
    let bins = (rows as f64).log2().ceil() as usize + 1;
    bins.clamp(5, 50)
}
