//! CSV intake into raw tables.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::debug;

use crate::coerce::parse_number;
use crate::table::{Column, Table};

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Default, Clone, Copy)]
struct RowStats {
    total: usize,
    non_empty: usize,
    numeric: usize,
    alpha: usize,
}

impl RowStats {
    fn ratio(self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64
        }
    }

    fn is_header_like(self) -> bool {
        self.ratio(self.non_empty) >= 0.8
            && self.ratio(self.alpha) >= 0.5
            && self.ratio(self.numeric) <= 0.1
    }
}

fn row_stats(row: &[String], width: usize) -> RowStats {
    let mut stats = RowStats {
        total: width,
        ..RowStats::default()
    };
    for cell in row {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            continue;
        }
        stats.non_empty += 1;
        if parse_number(trimmed).is_some() {
            stats.numeric += 1;
        }
        if trimmed.chars().any(char::is_alphabetic) {
            stats.alpha += 1;
        }
    }
    stats
}

/// Skip title or note lines exported above the real header.
///
/// The header is the first of the leading rows that spans the table width
/// and looks like labels rather than data.
fn detect_header_row(rows: &[Vec<String>]) -> usize {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    rows.iter()
        .take(5)
        .position(|row| row_stats(row, width).is_header_like())
        .unwrap_or(0)
}

/// Blank headers get positional names and repeats get the first free
/// numeric suffix.
fn unique_headers(raw: &[String]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    raw.iter()
        .enumerate()
        .map(|(idx, header)| {
            let base = if header.is_empty() {
                format!("column_{}", idx + 1)
            } else {
                header.clone()
            };
            let mut name = base.clone();
            let mut suffix = 1;
            while used.contains(&name) {
                suffix += 1;
                name = format!("{base}_{suffix}");
            }
            used.insert(name.clone());
            name
        })
        .collect()
}

pub fn read_csv_table(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).with_context(|| format!("read csv: {}", path.display()))?;
    let table = read_csv_reader(file).with_context(|| format!("parse csv: {}", path.display()))?;
    Ok(table.with_source_id(path.display().to_string()))
}

pub fn read_csv_reader<R: Read>(reader: R) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.context("read record")?;
        let row: Vec<String> = record.iter().map(str::to_string).collect();
        if row.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    if raw_rows.is_empty() {
        return Ok(Table::new(Vec::new())?);
    }
    let header_index = detect_header_row(&raw_rows);
    if header_index > 0 {
        debug!(skipped = header_index, "skipped preamble rows before header");
    }
    let raw_headers: Vec<String> = raw_rows[header_index]
        .iter()
        .map(|value| normalize_header(value))
        .collect();
    let headers = unique_headers(&raw_headers);
    let data = &raw_rows[header_index + 1..];
    let columns = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            Column::from_raw(
                header.as_str(),
                data.iter()
                    .map(|row| row.get(idx).map_or("", String::as_str)),
            )
        })
        .collect();
    Ok(Table::new(columns)?)
}
