use thiserror::Error;

/// Structural problems with an input table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("table has no columns")]
    NoColumns,
    #[error("table has no rows")]
    NoRows,
    #[error("column name must not be empty (position {position})")]
    EmptyColumnName { position: usize },
    #[error("duplicate column name: {name}")]
    DuplicateColumn { name: String },
    #[error("column {name} has {actual} rows, expected {expected}")]
    RaggedColumn {
        name: String,
        expected: usize,
        actual: usize,
    },
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} must be at least {min}, got {value}")]
    TooSmall {
        field: &'static str,
        value: usize,
        min: usize,
    },
    #[error("invalid configuration: {0}")]
    Parse(String),
}

impl ConfigError {
    pub(crate) fn check_range(
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> std::result::Result<(), Self> {
        if value.is_finite() && (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            })
        }
    }

    pub(crate) fn check_min(
        field: &'static str,
        value: usize,
        min: usize,
    ) -> std::result::Result<(), Self> {
        if value >= min {
            Ok(())
        } else {
            Err(ConfigError::TooSmall { field, value, min })
        }
    }
}

/// Failures that abort an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid table: {0}")]
    Table(#[from] TableError),
    #[error("invalid options: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
