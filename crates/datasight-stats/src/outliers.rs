//! Outlier detection by interquartile range or z-score.

use datasight_model::{ImpactLevel, InsightOptions, OutlierMethod};

use crate::descriptive::{mean, quantile_sorted, sorted, std_dev};

#[derive(Debug, Clone, PartialEq)]
pub struct OutlierSummary {
    pub method: OutlierMethod,
    pub count: usize,
    pub proportion: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

fn summarize(values: &[f64], method: OutlierMethod, lower: f64, upper: f64) -> OutlierSummary {
    let count = values
        .iter()
        .filter(|value| **value < lower || **value > upper)
        .count();
    OutlierSummary {
        method,
        count,
        proportion: count as f64 / values.len() as f64,
        lower_bound: lower,
        upper_bound: upper,
    }
}

/// Values outside `[Q1 - k*IQR, Q3 + k*IQR]`. Needs four values.
pub fn iqr_outliers(values: &[f64], multiplier: f64) -> Option<OutlierSummary> {
    if values.len() < 4 {
        return None;
    }
    let sorted = sorted(values);
    let q1 = quantile_sorted(&sorted, 0.25)?;
    let q3 = quantile_sorted(&sorted, 0.75)?;
    let iqr = q3 - q1;
    Some(summarize(
        values,
        OutlierMethod::Iqr,
        q1 - multiplier * iqr,
        q3 + multiplier * iqr,
    ))
}

/// Values whose population z-score exceeds `threshold`. Needs spread.
pub fn zscore_outliers(values: &[f64], threshold: f64) -> Option<OutlierSummary> {
    if values.len() < 3 {
        return None;
    }
    let mean = mean(values)?;
    let std = std_dev(values, 0)?;
    if std <= f64::EPSILON {
        return None;
    }
    Some(summarize(
        values,
        OutlierMethod::Zscore,
        mean - threshold * std,
        mean + threshold * std,
    ))
}

pub fn detect_outliers(
    values: &[f64],
    method: OutlierMethod,
    options: &InsightOptions,
) -> Option<OutlierSummary> {
    match method {
        OutlierMethod::Iqr => iqr_outliers(values, options.iqr_multiplier),
        OutlierMethod::Zscore => zscore_outliers(values, options.zscore_threshold),
    }
}

pub fn impact_level(proportion: f64, options: &InsightOptions) -> ImpactLevel {
    if proportion > options.outlier_high_impact {
        ImpactLevel::High
    } else if proportion > options.outlier_moderate_impact {
        ImpactLevel::Moderate
    } else {
        ImpactLevel::Low
    }
}
