//! Dataset-level data quality scoring.

use datasight_ingest::Table;
use datasight_model::{ColumnProfile, DataQualityReport, QualityIssue};

const HEAVY_MISSING_RATIO: f64 = 0.5;
const MISSING_RATIO: f64 = 0.2;
const MIN_ROWS: usize = 100;
const MIN_COLUMNS: usize = 3;

/// Score the table from 100 down, one penalty per issue found.
pub fn assess_quality(table: &Table, profiles: &[ColumnProfile]) -> DataQualityReport {
    let mut issues = Vec::new();
    for profile in profiles {
        let ratio = profile.missing_ratio();
        if ratio > HEAVY_MISSING_RATIO {
            issues.push(QualityIssue {
                column: Some(profile.name.clone()),
                message: format!("{:.0}% of values are missing", ratio * 100.0),
                penalty: 15.0,
            });
        } else if ratio > MISSING_RATIO {
            issues.push(QualityIssue {
                column: Some(profile.name.clone()),
                message: format!("{:.0}% of values are missing", ratio * 100.0),
                penalty: 5.0,
            });
        }
    }

    let rows = table.row_count();
    let duplicate_rows = table.duplicate_row_count();
    if duplicate_rows > 0 && rows > 0 {
        let pct = duplicate_rows as f64 / rows as f64 * 100.0;
        issues.push(QualityIssue {
            column: None,
            message: format!("{duplicate_rows} duplicate rows ({pct:.1}%)"),
            penalty: pct.min(20.0),
        });
    }
    if table.column_count() < MIN_COLUMNS {
        issues.push(QualityIssue {
            column: None,
            message: format!("only {} columns available", table.column_count()),
            penalty: 10.0,
        });
    }
    if rows < MIN_ROWS {
        issues.push(QualityIssue {
            column: None,
            message: format!("only {rows} rows available"),
            penalty: 15.0,
        });
    }

    let cells = rows * table.column_count();
    let completeness = if cells == 0 {
        0.0
    } else {
        1.0 - table.missing_cell_count() as f64 / cells as f64
    };
    let penalty: f64 = issues.iter().map(|issue| issue.penalty).sum();
    DataQualityReport {
        score: (100.0 - penalty).max(0.0),
        completeness,
        duplicate_rows,
        issues,
    }
}
