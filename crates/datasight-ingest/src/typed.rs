//! Typed views over raw columns.
//!
//! Cells that do not coerce to the requested type become `None`, so a mixed
//! column treats its stray values as missing for that analysis only.

use chrono::NaiveDateTime;

use crate::coerce::{parse_bool, parse_number};
use crate::datetime::parse_datetime;
use crate::table::Column;

pub fn numeric_values(column: &Column) -> Vec<Option<f64>> {
    column
        .cells
        .iter()
        .map(|cell| cell.as_str().and_then(parse_number))
        .collect()
}

pub fn datetime_values(column: &Column) -> Vec<Option<NaiveDateTime>> {
    column
        .cells
        .iter()
        .map(|cell| cell.as_str().and_then(parse_datetime))
        .collect()
}

pub fn boolean_values(column: &Column) -> Vec<Option<bool>> {
    column
        .cells
        .iter()
        .map(|cell| cell.as_str().and_then(parse_bool))
        .collect()
}

/// Present values only, in row order.
pub fn present<T: Copy>(values: &[Option<T>]) -> Vec<T> {
    values.iter().filter_map(|value| *value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stray_cells_become_missing() {
        let column = Column::from_raw("amount", ["10", "n/a value", "", "$12.50"]);
        let values = numeric_values(&column);
        assert_eq!(values, vec![Some(10.0), None, None, Some(12.5)]);
        assert_eq!(present(&values), vec![10.0, 12.5]);
    }

    #[test]
    fn boolean_view_uses_all_vocabularies() {
        let column = Column::from_raw("active", ["yes", "No", "maybe"]);
        assert_eq!(boolean_values(&column), vec![Some(true), Some(false), None]);
    }
}
