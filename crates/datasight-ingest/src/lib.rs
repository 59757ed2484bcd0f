//! Table ingestion for datasight.
//!
//! Loads CSV files and Polars frames into an immutable [`Table`] of raw
//! string cells and provides the coercion helpers every analysis stage shares.

pub mod coerce;
pub mod csv_table;
pub mod datetime;
pub mod polars_utils;
pub mod sample;
pub mod table;
pub mod typed;

pub use coerce::{BOOLEAN_PAIRS, boolean_token, normalize_token, parse_bool, parse_number};
pub use csv_table::{read_csv_reader, read_csv_table};
pub use datetime::{parse_compact_date, parse_datetime, parse_plausible_datetime};
pub use polars_utils::{any_to_string, format_numeric, table_from_dataframe};
pub use sample::{analysis_rows, sample_row_indices};
pub use table::{CellValue, Column, MISSING_MARKERS, Table};
pub use typed::{boolean_values, datetime_values, numeric_values, present};
