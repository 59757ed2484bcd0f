//! Time aggregation and linear trend fitting.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use datasight_model::{ConfidenceLevel, Forecast, Granularity, PeriodValue, TrendDirection};

const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;

/// Bucket size implied by the median gap between distinct timestamps.
pub fn detect_granularity(timestamps: &[NaiveDateTime]) -> Option<Granularity> {
    let mut distinct = timestamps.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() < 2 {
        return None;
    }
    let mut gaps: Vec<i64> = distinct
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_seconds())
        .collect();
    gaps.sort_unstable();
    let median = gaps[gaps.len() / 2];
    Some(if median <= 2 * HOUR {
        Granularity::Hour
    } else if median <= 2 * DAY {
        Granularity::Day
    } else if median <= 10 * DAY {
        Granularity::Week
    } else if median <= 45 * DAY {
        Granularity::Month
    } else if median <= 135 * DAY {
        Granularity::Quarter
    } else {
        Granularity::Year
    })
}

/// Start of the period containing `timestamp`.
pub fn period_start(timestamp: NaiveDateTime, granularity: Granularity) -> NaiveDateTime {
    let date = timestamp.date();
    let start_date = match granularity {
        Granularity::Hour => {
            let hour = NaiveTime::from_hms_opt(timestamp.hour(), 0, 0).unwrap_or(NaiveTime::MIN);
            return date.and_time(hour);
        }
        Granularity::Day => date,
        Granularity::Week => date - Duration::days(i64::from(date.weekday().num_days_from_monday())),
        Granularity::Month => first_of(date.year(), date.month()),
        Granularity::Quarter => first_of(date.year(), (date.month() - 1) / 3 * 3 + 1),
        Granularity::Year => first_of(date.year(), 1),
    };
    start_date.and_time(NaiveTime::MIN)
}

fn first_of(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

/// Mean value per period, in chronological order.
pub fn aggregate(points: &[(NaiveDateTime, f64)], granularity: Granularity) -> Vec<PeriodValue> {
    let mut buckets: BTreeMap<NaiveDateTime, (f64, usize)> = BTreeMap::new();
    for (timestamp, value) in points {
        let entry = buckets
            .entry(period_start(*timestamp, granularity))
            .or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }
    buckets
        .into_iter()
        .map(|(period, (sum, count))| PeriodValue {
            period,
            value: sum / count as f64,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

/// Ordinary least squares of `ys` against their index.
pub fn linear_fit(ys: &[f64]) -> Option<LinearFit> {
    let n = ys.len();
    if n < 2 {
        return None;
    }
    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = ys.iter().sum::<f64>() / n_f;
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (idx, y) in ys.iter().enumerate() {
        let dx = idx as f64 - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    // A constant series is fit exactly by a flat line.
    let r_squared = if syy <= f64::EPSILON {
        1.0
    } else {
        (sxy * sxy / (sxx * syy)).clamp(0.0, 1.0)
    };
    Some(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendSummary {
    pub granularity: Granularity,
    pub direction: TrendDirection,
    pub strength: f64,
    pub slope: f64,
    pub r_squared: f64,
    pub periods: Vec<PeriodValue>,
    pub forecast: Forecast,
}

/// Why a trend could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendGap {
    TooFewPoints,
    TooFewPeriods,
}

/// Aggregate `values` over `timestamps` and fit a trend line.
pub fn analyze_trend(
    timestamps: &[Option<NaiveDateTime>],
    values: &[Option<f64>],
    flat_threshold: f64,
) -> Result<TrendSummary, TrendGap> {
    let points: Vec<(NaiveDateTime, f64)> = timestamps
        .iter()
        .zip(values)
        .filter_map(|(timestamp, value)| Some(((*timestamp)?, (*value)?)))
        .collect();
    let stamps: Vec<NaiveDateTime> = points.iter().map(|(timestamp, _)| *timestamp).collect();
    let granularity = detect_granularity(&stamps).ok_or(TrendGap::TooFewPoints)?;
    let periods = aggregate(&points, granularity);
    if periods.len() < 3 {
        return Err(TrendGap::TooFewPeriods);
    }
    let ys: Vec<f64> = periods.iter().map(|period| period.value).collect();
    let fit = linear_fit(&ys).ok_or(TrendGap::TooFewPeriods)?;
    let scale = ys.iter().map(|value| value.abs()).sum::<f64>() / ys.len() as f64;
    let strength = if scale <= f64::EPSILON {
        fit.slope.abs()
    } else {
        fit.slope.abs() / scale
    };
    let direction = if strength < flat_threshold {
        TrendDirection::Flat
    } else if fit.slope > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };
    let last = ys[ys.len() - 1];
    Ok(TrendSummary {
        granularity,
        direction,
        strength,
        slope: fit.slope,
        r_squared: fit.r_squared,
        periods,
        forecast: Forecast {
            next_value: last + fit.slope,
            confidence: ConfidenceLevel::Low,
        },
    })
}
