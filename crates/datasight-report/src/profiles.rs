//! Column profile and classification diagnostic tables.

use comfy_table::{Cell, CellAlignment, Color, Table};

use datasight_model::{ColumnDiagnostic, ColumnProfile, ColumnSummary};

use crate::style::{
    align_column, apply_table_style, count_cell, dim_cell, header_cell, optional_cell, total_cell,
    type_cell,
};

fn summary_text(summary: &ColumnSummary) -> Option<String> {
    match summary {
        ColumnSummary::Numeric(stats) => Some(format!(
            "mean {:.2}, median {:.2}, range {:.2}..{:.2}",
            stats.mean, stats.median, stats.min, stats.max
        )),
        ColumnSummary::Categorical(stats) => Some(format!(
            "top {} ({}), {} levels shown",
            stats.top,
            stats.top_count,
            stats.distribution.len()
        )),
        ColumnSummary::Datetime(stats) => Some(format!(
            "{} .. {} ({} days)",
            stats.min.date(),
            stats.max.date(),
            stats.span_days
        )),
        ColumnSummary::Text(stats) => Some(format!(
            "mean length {:.1}, max {}",
            stats.mean_length, stats.max_length
        )),
        ColumnSummary::None => None,
    }
}

/// One row per column; overridden types are marked with `*`.
pub fn render_profiles(profiles: &[ColumnProfile]) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Rows"),
        header_cell("Missing"),
        header_cell("Distinct"),
        header_cell("Summary"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    let mut total_missing = 0usize;
    for profile in profiles {
        total_missing += profile.missing_count;
        table.add_row(vec![
            Cell::new(&profile.name),
            type_cell(profile.column_type, profile.overridden),
            Cell::new(profile.row_count),
            count_cell(profile.missing_count, Color::Yellow),
            Cell::new(profile.cardinality),
            optional_cell(summary_text(&profile.summary)),
        ]);
    }
    table.add_row(vec![
        total_cell("TOTAL"),
        total_cell(&format!("{} columns", profiles.len())),
        dim_cell("-"),
        count_cell(total_missing, Color::Yellow),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table.to_string()
}

/// Evidence scores per column, strongest candidate first.
pub fn render_diagnostics(diagnostics: &[ColumnDiagnostic]) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Chosen"),
        header_cell("Ranked evidence"),
        header_cell("Date serial"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for diagnostic in diagnostics {
        let ranked = diagnostic
            .ranked
            .iter()
            .map(|(column_type, score)| format!("{column_type} {score:.2}"))
            .collect::<Vec<_>>()
            .join(", ");
        let serial = if diagnostic.evidence.date_serial_artifact {
            Cell::new("yes").fg(Color::Yellow)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            Cell::new(&diagnostic.name),
            type_cell(diagnostic.chosen, false),
            Cell::new(ranked),
            serial,
        ]);
    }
    table.to_string()
}
