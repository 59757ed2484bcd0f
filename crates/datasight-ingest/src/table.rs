//! In-memory table of raw string cells.

use std::collections::{BTreeSet, HashSet};

use datasight_model::TableError;
use serde::{Deserialize, Serialize};

/// Tokens read as missing on ingest, compared after trimming.
pub const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Missing,
}

impl CellValue {
    /// Normalize a raw cell: trim, strip byte-order marks and map missing markers.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim().trim_matches('\u{feff}');
        if MISSING_MARKERS.contains(&trimmed) {
            CellValue::Missing
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value.as_str()),
            CellValue::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Build a column from raw strings, applying missing markers.
    pub fn from_raw<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cells = values
            .into_iter()
            .map(|value| CellValue::from_raw(value.as_ref()))
            .collect();
        Self::new(name, cells)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Non-missing values in row order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().filter_map(CellValue::as_str)
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_missing()).count()
    }

    pub fn distinct_count(&self) -> usize {
        self.values().collect::<BTreeSet<_>>().len()
    }
}

/// Ordered set of uniquely named, equally long columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub source_id: Option<String>,
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for (position, column) in columns.iter().enumerate() {
            if column.name.trim().is_empty() {
                return Err(TableError::EmptyColumnName { position });
            }
            if !seen.insert(column.name.as_str()) {
                return Err(TableError::DuplicateColumn {
                    name: column.name.clone(),
                });
            }
        }
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(ragged) = columns.iter().find(|column| column.len() != expected) {
                return Err(TableError::RaggedColumn {
                    name: ragged.name.clone(),
                    expected,
                    actual: ragged.len(),
                });
            }
        }
        Ok(Self {
            source_id: None,
            columns,
        })
    }

    /// Build a table from a header row and data rows.
    ///
    /// Short rows are padded with missing cells and extra trailing cells are dropped.
    pub fn from_rows<S: AsRef<str>>(headers: &[S], rows: &[Vec<S>]) -> Result<Self, TableError> {
        let columns = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let cells = rows
                    .iter()
                    .map(|row| {
                        row.get(idx)
                            .map_or(CellValue::Missing, |value| CellValue::from_raw(value.as_ref()))
                    })
                    .collect();
                Column::new(header.as_ref().trim(), cells)
            })
            .collect();
        Self::new(columns)
    }

    #[must_use]
    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Reject tables that cannot be analyzed at all.
    pub fn ensure_analyzable(&self) -> Result<(), TableError> {
        if self.columns.is_empty() {
            return Err(TableError::NoColumns);
        }
        if self.row_count() == 0 {
            return Err(TableError::NoRows);
        }
        Ok(())
    }

    /// Rows that exactly repeat an earlier row.
    pub fn duplicate_row_count(&self) -> usize {
        let mut seen = HashSet::with_capacity(self.row_count());
        let mut duplicates = 0usize;
        for row in 0..self.row_count() {
            let key: Vec<&CellValue> = self.columns.iter().map(|column| &column.cells[row]).collect();
            if !seen.insert(key) {
                duplicates += 1;
            }
        }
        duplicates
    }

    /// Total missing cells across the table.
    pub fn missing_cell_count(&self) -> usize {
        self.columns.iter().map(Column::missing_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_markers_are_normalized() {
        assert_eq!(CellValue::from_raw("  NA "), CellValue::Missing);
        assert_eq!(CellValue::from_raw("#N/A"), CellValue::Missing);
        assert_eq!(CellValue::from_raw("\u{feff}x"), CellValue::Text("x".to_string()));
        assert_eq!(CellValue::from_raw("none"), CellValue::Text("none".to_string()));
    }

    #[test]
    fn rejects_duplicate_and_ragged_columns() {
        let dup = Table::new(vec![
            Column::from_raw("a", ["1"]),
            Column::from_raw("a", ["2"]),
        ]);
        assert_eq!(
            dup.expect_err("duplicate"),
            TableError::DuplicateColumn {
                name: "a".to_string()
            }
        );

        let ragged = Table::new(vec![
            Column::from_raw("a", ["1", "2"]),
            Column::from_raw("b", ["x"]),
        ]);
        assert!(matches!(
            ragged.expect_err("ragged"),
            TableError::RaggedColumn { expected: 2, actual: 1, .. }
        ));
    }

    #[test]
    fn from_rows_pads_short_rows() {
        let table = Table::from_rows(
            &["a", "b"],
            &[vec!["1", "x"], vec!["2"], vec!["1", "x"]],
        )
        .expect("table");
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column("b").expect("b").missing_count(), 1);
        assert_eq!(table.duplicate_row_count(), 1);
    }

    #[test]
    fn empty_tables_are_not_analyzable() {
        let table = Table::new(Vec::new()).expect("empty table");
        assert_eq!(table.ensure_analyzable(), Err(TableError::NoColumns));
        let no_rows = Table::new(vec![Column::from_raw("a", Vec::<&str>::new())]).expect("table");
        assert_eq!(no_rows.ensure_analyzable(), Err(TableError::NoRows));
    }
}
