//! Descriptive statistics over present values.

use datasight_model::NumericSummary;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Variance with `ddof` delta degrees of freedom.
pub fn variance(values: &[f64], ddof: usize) -> Option<f64> {
    if values.len() <= ddof {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
    Some(sum_sq / (values.len() - ddof) as f64)
}

pub fn std_dev(values: &[f64], ddof: usize) -> Option<f64> {
    variance(values, ddof).map(f64::sqrt)
}

pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Quantile of already sorted values using linear interpolation.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile_sorted(&sorted(values), 0.5)
}

fn central_moment(values: &[f64], mean: f64, order: i32) -> f64 {
    values.iter().map(|value| (value - mean).powi(order)).sum::<f64>() / values.len() as f64
}

/// Whether the second central moment is distinguishable from rounding noise
/// at the magnitude of the values themselves.
fn has_spread(values: &[f64], m2: f64) -> bool {
    let scale = values
        .iter()
        .map(|value| value * value)
        .fold(0.0, f64::max);
    m2 > f64::EPSILON * scale
}

/// Adjusted Fisher-Pearson sample skewness. Needs three values and spread.
pub fn skewness(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }
    let mean = mean(values)?;
    let m2 = central_moment(values, mean, 2);
    if !has_spread(values, m2) {
        return None;
    }
    let m3 = central_moment(values, mean, 3);
    let g1 = m3 / m2.powf(1.5);
    let n = n as f64;
    Some(g1 * (n * (n - 1.0)).sqrt() / (n - 2.0))
}

/// Bias-corrected excess kurtosis. Needs four values and spread.
pub fn excess_kurtosis(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 4 {
        return None;
    }
    let mean = mean(values)?;
    let m2 = central_moment(values, mean, 2);
    if !has_spread(values, m2) {
        return None;
    }
    let m4 = central_moment(values, mean, 4);
    let g2 = m4 / (m2 * m2) - 3.0;
    let n = n as f64;
    Some(((n + 1.0) * g2 + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0)))
}

/// Standard deviation relative to the absolute mean.
pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    if mean.abs() <= f64::EPSILON {
        return None;
    }
    std_dev(values, 1).map(|std| std / mean.abs())
}

pub fn describe(values: &[f64]) -> Option<NumericSummary> {
    let sorted = sorted(values);
    let first = *sorted.first()?;
    let last = *sorted.last()?;
    Some(NumericSummary {
        count: sorted.len(),
        mean: mean(&sorted)?,
        std: std_dev(&sorted, 1).unwrap_or(0.0),
        min: first,
        q1: quantile_sorted(&sorted, 0.25)?,
        median: quantile_sorted(&sorted, 0.5)?,
        q3: quantile_sorted(&sorted, 0.75)?,
        max: last,
    })
}
