//! Column type classifier.
//!
//! Assigns each column of a [`datasight_ingest::Table`] one semantic type,
//! records the evidence behind the choice and lets callers override it.

pub mod classifier;
pub mod predicates;
pub mod summary;

pub use classifier::{
    apply_overrides, classify_column, classify_table, classify_table_with_overrides,
    diagnose_table, profile_as,
};
pub use predicates::{ColumnStats, is_boolean, is_categorical, is_datetime, is_numeric};
pub use summary::{MAX_DISTRIBUTION_LEVELS, level_counts, sample_values, summarize};
