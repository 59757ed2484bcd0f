//! Conversion from Polars frames into raw tables.

use datasight_model::TableError;
use polars::prelude::{AnyValue, DataFrame};

use crate::table::{CellValue, Column, Table};

/// Render a Polars value the way it would appear in a CSV export.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Format a float without trailing zeros; non-finite values become empty.
pub fn format_numeric(v: f64) -> String {
    if !v.is_finite() {
        return String::new();
    }
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    CellValue::from_raw(&any_to_string(value))
}

/// Build a table from a Polars frame, one column per series.
pub fn table_from_dataframe(df: &DataFrame) -> Result<Table, TableError> {
    let height = df.height();
    let columns = df
        .get_columns()
        .iter()
        .map(|column| {
            let cells = (0..height)
                .map(|idx| any_to_cell(column.get(idx).unwrap_or(AnyValue::Null)))
                .collect();
            Column::new(column.name().to_string(), cells)
        })
        .collect();
    Table::new(columns)
}
