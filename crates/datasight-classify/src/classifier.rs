//! Column type assignment.
//!
//! Predicates run in a fixed order (boolean, numeric, datetime, categorical)
//! and the first match wins; anything left over is text. A column with no
//! non-missing values is `unknown`.

use std::collections::BTreeMap;

use datasight_ingest::{Column, Table};
use datasight_model::{ClassifierOptions, ColumnDiagnostic, ColumnProfile, ColumnType};
use tracing::{debug, info, warn};

use crate::predicates::{ColumnStats, is_boolean, is_categorical, is_datetime, is_numeric};
use crate::summary::{sample_values, summarize};

/// Candidate types in evaluation order.
const CANDIDATES: [ColumnType; 5] = [
    ColumnType::Boolean,
    ColumnType::Numeric,
    ColumnType::Datetime,
    ColumnType::Categorical,
    ColumnType::Text,
];

fn choose_type(stats: &ColumnStats, options: &ClassifierOptions) -> ColumnType {
    if stats.non_missing == 0 {
        ColumnType::Unknown
    } else if is_boolean(stats) {
        ColumnType::Boolean
    } else if is_numeric(stats, options) {
        ColumnType::Numeric
    } else if is_datetime(stats, options) {
        ColumnType::Datetime
    } else if is_categorical(stats, options) {
        ColumnType::Categorical
    } else {
        ColumnType::Text
    }
}

fn build_profile(
    column: &Column,
    column_type: ColumnType,
    stats: Option<&ColumnStats>,
    options: &ClassifierOptions,
) -> ColumnProfile {
    ColumnProfile {
        name: column.name.clone(),
        column_type,
        row_count: column.len(),
        missing_count: column.missing_count(),
        cardinality: column.distinct_count(),
        summary: summarize(column, column_type),
        evidence: stats.map(|stats| stats.evidence(options)),
        overridden: stats.is_none(),
        sample_values: sample_values(column, options.sample_values),
    }
}

/// Classify one column and attach its summary and evidence.
pub fn classify_column(column: &Column, options: &ClassifierOptions) -> ColumnProfile {
    let stats = ColumnStats::collect(column, options);
    let column_type = choose_type(&stats, options);
    debug!(
        column = %column.name,
        column_type = %column_type,
        non_missing = stats.non_missing,
        distinct = stats.distinct,
        "classified column"
    );
    build_profile(column, column_type, Some(&stats), options)
}

/// Profile a column with a caller-chosen type, skipping the predicates.
pub fn profile_as(
    column: &Column,
    column_type: ColumnType,
    options: &ClassifierOptions,
) -> ColumnProfile {
    build_profile(column, column_type, None, options)
}

fn log_type_counts(profiles: &[ColumnProfile]) {
    let mut counts: BTreeMap<ColumnType, usize> = BTreeMap::new();
    for profile in profiles {
        *counts.entry(profile.column_type).or_insert(0) += 1;
    }
    let count = |column_type| counts.get(&column_type).copied().unwrap_or(0);
    info!(
        columns = profiles.len(),
        numeric = count(ColumnType::Numeric),
        categorical = count(ColumnType::Categorical),
        datetime = count(ColumnType::Datetime),
        boolean = count(ColumnType::Boolean),
        text = count(ColumnType::Text),
        unknown = count(ColumnType::Unknown),
        "classified table"
    );
}

/// Classify every column, in table order.
pub fn classify_table(table: &Table, options: &ClassifierOptions) -> Vec<ColumnProfile> {
    classify_table_with_overrides(table, &BTreeMap::new(), options)
}

/// Classify every column, taking the type of overridden columns as given.
///
/// Override names that match no column are logged and ignored.
pub fn classify_table_with_overrides(
    table: &Table,
    overrides: &BTreeMap<String, ColumnType>,
    options: &ClassifierOptions,
) -> Vec<ColumnProfile> {
    warn_unknown_overrides(table, overrides);
    let profiles: Vec<ColumnProfile> = table
        .columns()
        .iter()
        .map(|column| match overrides.get(&column.name) {
            Some(column_type) => profile_as(column, *column_type, options),
            None => classify_column(column, options),
        })
        .collect();
    log_type_counts(&profiles);
    profiles
}

/// Replace the type of overridden columns in existing profiles.
///
/// Profiles without an override are returned unchanged; overridden ones lose
/// their evidence and get a summary recomputed for the new type.
pub fn apply_overrides(
    table: &Table,
    profiles: &[ColumnProfile],
    overrides: &BTreeMap<String, ColumnType>,
    options: &ClassifierOptions,
) -> Vec<ColumnProfile> {
    warn_unknown_overrides(table, overrides);
    profiles
        .iter()
        .map(|profile| {
            let target = overrides.get(&profile.name);
            match (target, table.column(&profile.name)) {
                (Some(column_type), Some(column)) => {
                    debug!(
                        column = %profile.name,
                        from = %profile.column_type,
                        to = %column_type,
                        "applied type override"
                    );
                    profile_as(column, *column_type, options)
                }
                _ => profile.clone(),
            }
        })
        .collect()
}

fn warn_unknown_overrides(table: &Table, overrides: &BTreeMap<String, ColumnType>) {
    for name in overrides.keys() {
        if table.column(name).is_none() {
            warn!(column = %name, "override names an unknown column");
        }
    }
}

/// Per-column evidence with candidate types ranked strongest first.
///
/// Ties keep evaluation order, so the ranking is stable across runs.
pub fn diagnose_table(table: &Table, options: &ClassifierOptions) -> Vec<ColumnDiagnostic> {
    table
        .columns()
        .iter()
        .map(|column| {
            let stats = ColumnStats::collect(column, options);
            let evidence = stats.evidence(options);
            let mut ranked: Vec<(ColumnType, f64)> = CANDIDATES
                .iter()
                .map(|candidate| (*candidate, evidence.score_for(*candidate)))
                .collect();
            ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
            ColumnDiagnostic {
                name: column.name.clone(),
                chosen: choose_type(&stats, options),
                evidence,
                ranked,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(values: &[&str]) -> ColumnType {
        classify_column(
            &Column::from_raw("c", values.iter().copied()),
            &ClassifierOptions::default(),
        )
        .column_type
    }

    #[test]
    fn all_missing_is_unknown() {
        assert_eq!(classify(&["", "NA", "null"]), ColumnType::Unknown);
    }

    #[test]
    fn boolean_wins_over_numeric() {
        assert_eq!(classify(&["1", "0", "0", "1"]), ColumnType::Boolean);
    }

    #[test]
    fn compact_day_stamps_are_datetimes() {
        assert_eq!(
            classify(&["20240101", "20240102", "20240103"]),
            ColumnType::Datetime
        );
    }

    #[test]
    fn free_text_falls_through() {
        assert_eq!(
            classify(&["the quick fox", "a lazy dog", "jumps over"]),
            ColumnType::Text
        );
    }
}
