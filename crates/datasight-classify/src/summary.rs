//! Type-specific descriptive statistics for a classified column.

use std::collections::{BTreeSet, HashMap};

use datasight_ingest::{Column, datetime_values, numeric_values, present};
use datasight_model::{
    CategoricalSummary, ColumnSummary, ColumnType, DatetimeSummary, LevelCount, TextSummary,
};
use datasight_stats::describe;

/// Levels kept in a categorical distribution.
pub const MAX_DISTRIBUTION_LEVELS: usize = 20;

/// Summarize `column` as `column_type`.
///
/// Returns [`ColumnSummary::None`] when nothing parses as the requested type,
/// which happens for overrides that contradict the data.
pub fn summarize(column: &Column, column_type: ColumnType) -> ColumnSummary {
    let summary = match column_type {
        ColumnType::Numeric => numeric_summary(column),
        ColumnType::Categorical | ColumnType::Boolean => categorical_summary(column),
        ColumnType::Datetime => datetime_summary(column),
        ColumnType::Text => text_summary(column),
        ColumnType::Unknown => None,
    };
    summary.unwrap_or(ColumnSummary::None)
}

fn numeric_summary(column: &Column) -> Option<ColumnSummary> {
    describe(&present(&numeric_values(column))).map(ColumnSummary::Numeric)
}

/// Level counts ordered by count descending, then value ascending.
pub fn level_counts(column: &Column) -> Vec<LevelCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in column.values() {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut levels: Vec<LevelCount> = counts
        .into_iter()
        .map(|(value, count)| LevelCount {
            value: value.to_string(),
            count,
        })
        .collect();
    levels.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    levels
}

fn categorical_summary(column: &Column) -> Option<ColumnSummary> {
    let mut levels = level_counts(column);
    let top = levels.first()?.clone();
    levels.truncate(MAX_DISTRIBUTION_LEVELS);
    Some(ColumnSummary::Categorical(CategoricalSummary {
        top: top.value,
        top_count: top.count,
        distribution: levels,
    }))
}

fn datetime_summary(column: &Column) -> Option<ColumnSummary> {
    let stamps = present(&datetime_values(column));
    let min = stamps.iter().min().copied()?;
    let max = stamps.iter().max().copied()?;
    Some(ColumnSummary::Datetime(DatetimeSummary {
        min,
        max,
        span_days: (max - min).num_days(),
    }))
}

fn text_summary(column: &Column) -> Option<ColumnSummary> {
    let lengths: Vec<usize> = column.values().map(|value| value.chars().count()).collect();
    let max_length = lengths.iter().max().copied()?;
    let mean_length = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
    Some(ColumnSummary::Text(TextSummary {
        mean_length,
        max_length,
    }))
}

/// First `limit` distinct values in row order.
pub fn sample_values(column: &Column, limit: usize) -> Vec<String> {
    let mut seen = BTreeSet::new();
    column
        .values()
        .filter(|value| seen.insert(*value))
        .take(limit)
        .map(str::to_string)
        .collect()
}
