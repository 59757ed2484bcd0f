use comfy_table::{Cell, CellAlignment, Color, Table};

use datasight_model::{DataQualityReport, InsightRecord};

use crate::style::{
    align_column, apply_table_style, apply_wide_table_style, dim_cell, header_cell, score_cell,
    total_cell,
};

/// Insights ordered by confidence, strongest first.
pub fn render_insights(insights: &[InsightRecord]) -> String {
    let mut ordered: Vec<&InsightRecord> = insights.iter().collect();
    ordered.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.kind.cmp(&b.kind))
            .then_with(|| a.columns.cmp(&b.columns))
    });
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Columns"),
        header_cell("Confidence"),
        header_cell("Finding"),
    ]);
    apply_wide_table_style(&mut table, 3);
    align_column(&mut table, 2, CellAlignment::Right);
    for record in ordered {
        table.add_row(vec![
            Cell::new(record.kind.as_str()),
            Cell::new(record.columns.join(", ")),
            score_cell(record.confidence),
            Cell::new(&record.headline),
        ]);
    }
    table.to_string()
}

pub fn render_quality(report: &DataQualityReport) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Issue"),
        header_cell("Penalty"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for issue in &report.issues {
        table.add_row(vec![
            issue
                .column
                .as_deref()
                .map_or_else(|| dim_cell("(table)"), Cell::new),
            Cell::new(&issue.message),
            Cell::new(format!("-{:.1}", issue.penalty)).fg(Color::Yellow),
        ]);
    }
    let score_color = if report.score >= 80.0 {
        Color::Green
    } else if report.score >= 60.0 {
        Color::Yellow
    } else {
        Color::Red
    };
    table.add_row(vec![
        total_cell("SCORE"),
        Cell::new(format!(
            "completeness {:.1}%, {} duplicate rows",
            report.completeness * 100.0,
            report.duplicate_rows
        )),
        Cell::new(format!("{:.0}", report.score)).fg(score_color),
    ]);
    table.to_string()
}
