//! Per-column statistics and the pure predicates evaluated over them.

use std::collections::{BTreeSet, HashMap};

use chrono::Datelike;
use datasight_ingest::{
    BOOLEAN_PAIRS, Column, boolean_token, normalize_token, parse_compact_date, parse_number,
    parse_plausible_datetime,
};
use datasight_model::{ClassifierOptions, TypeEvidence};

/// Share of compact `YYYYMMDD` stamps that marks a numeric column as dates.
const DATE_SERIAL_RATIO: f64 = 0.9;

/// Counts gathered in one pass over a column's non-missing values.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ColumnStats {
    pub non_missing: usize,
    pub distinct: usize,
    pub distinct_tokens: usize,
    /// Hits for the boolean pair matching the most values.
    pub boolean_hits: usize,
    pub boolean_pair_exact: bool,
    pub numeric: usize,
    pub compact_dates: usize,
    pub datetimes: usize,
    pub max_length: usize,
}

impl ColumnStats {
    pub fn collect(column: &Column, options: &ClassifierOptions) -> Self {
        let mut stats = ColumnStats::default();
        let mut distinct = BTreeSet::new();
        let mut tokens = BTreeSet::new();
        let mut pair_hits: HashMap<usize, usize> = HashMap::new();
        for value in column.values() {
            stats.non_missing += 1;
            distinct.insert(value);
            tokens.insert(normalize_token(value));
            stats.max_length = stats.max_length.max(value.chars().count());
            if let Some((pair, _)) = boolean_token(value) {
                *pair_hits.entry(pair).or_insert(0) += 1;
            }
            if parse_number(value).is_some() {
                stats.numeric += 1;
            }
            if parse_compact_date(value)
                .is_some_and(|date| (options.min_year..=options.max_year).contains(&date.year()))
            {
                stats.compact_dates += 1;
            }
            if parse_plausible_datetime(value, options.min_year, options.max_year).is_some() {
                stats.datetimes += 1;
            }
        }
        stats.distinct = distinct.len();
        stats.distinct_tokens = tokens.len();
        stats.boolean_hits = pair_hits.values().copied().max().unwrap_or(0);
        stats.boolean_pair_exact = tokens.len() == 2
            && BOOLEAN_PAIRS
                .iter()
                .any(|(yes, no)| tokens.contains(*yes) && tokens.contains(*no));
        stats
    }

    fn ratio(&self, count: usize) -> f64 {
        if self.non_missing == 0 {
            0.0
        } else {
            count as f64 / self.non_missing as f64
        }
    }

    pub fn unique_ratio(&self) -> f64 {
        self.ratio(self.distinct)
    }

    pub fn numeric_ratio(&self) -> f64 {
        self.ratio(self.numeric)
    }

    pub fn datetime_ratio(&self) -> f64 {
        self.ratio(self.datetimes)
    }

    pub fn has_date_serial_artifact(&self) -> bool {
        self.non_missing > 0 && self.ratio(self.compact_dates) >= DATE_SERIAL_RATIO
    }

    pub fn evidence(&self, options: &ClassifierOptions) -> TypeEvidence {
        let categorical = if self.distinct <= options.max_categories
            && self.max_length <= options.max_category_length
        {
            1.0 - self.unique_ratio()
        } else {
            0.0
        };
        TypeEvidence {
            boolean: if self.boolean_pair_exact {
                self.ratio(self.boolean_hits)
            } else {
                0.0
            },
            numeric: self.numeric_ratio(),
            datetime: self.datetime_ratio(),
            categorical,
            text: self.unique_ratio(),
            date_serial_artifact: self.has_date_serial_artifact(),
            distinct_tokens: self.distinct_tokens,
        }
    }
}

/// Exactly two distinct tokens forming one recognized true/false pair.
pub fn is_boolean(stats: &ColumnStats) -> bool {
    stats.boolean_pair_exact
}

pub fn is_numeric(stats: &ColumnStats, options: &ClassifierOptions) -> bool {
    stats.numeric_ratio() >= options.numeric_match_ratio && !stats.has_date_serial_artifact()
}

pub fn is_datetime(stats: &ColumnStats, options: &ClassifierOptions) -> bool {
    stats.datetime_ratio() >= options.datetime_match_ratio
}

pub fn is_categorical(stats: &ColumnStats, options: &ClassifierOptions) -> bool {
    stats.unique_ratio() < options.categorical_unique_ratio
        && stats.distinct <= options.max_categories
        && stats.max_length <= options.max_category_length
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(values: &[&str]) -> ColumnStats {
        ColumnStats::collect(
            &Column::from_raw("c", values.iter().copied()),
            &ClassifierOptions::default(),
        )
    }

    #[test]
    fn boolean_requires_a_single_pair() {
        assert!(is_boolean(&stats(&["Yes", "no", "YES", "No"])));
        assert!(is_boolean(&stats(&["1", "0", "1"])));
        assert!(!is_boolean(&stats(&["yes", "false"])));
        assert!(!is_boolean(&stats(&["yes", "yes"])));
        assert!(!is_boolean(&stats(&["yes", "no", "maybe"])));
    }

    #[test]
    fn compact_dates_are_flagged_as_serial_artifacts() {
        let compact = stats(&["20240101", "20240215", "20240330"]);
        assert!(compact.has_date_serial_artifact());
        assert!(!is_numeric(&compact, &ClassifierOptions::default()));
        let ids = stats(&["10000001", "10000002", "10000003"]);
        assert!(!ids.has_date_serial_artifact());
    }

    #[test]
    fn categorical_needs_repetition() {
        let options = ClassifierOptions::default();
        assert!(is_categorical(&stats(&["a", "b", "a", "b", "a"]), &options));
        assert!(!is_categorical(&stats(&["a", "b", "c", "d"]), &options));
    }
}
