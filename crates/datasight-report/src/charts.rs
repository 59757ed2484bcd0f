use comfy_table::{Cell, CellAlignment, Table};

use datasight_model::{ChartRecommendation, ChartRole};

use crate::style::{align_column, apply_table_style, dim_cell, header_cell, score_cell};

fn role_label(role: ChartRole) -> &'static str {
    match role {
        ChartRole::X => "x",
        ChartRole::Y => "y",
        ChartRole::Group => "group",
        ChartRole::Series => "series",
        ChartRole::Value => "value",
    }
}

fn bindings_text(chart: &ChartRecommendation) -> String {
    chart
        .bindings
        .iter()
        .map(|binding| format!("{}={}", role_label(binding.role), binding.column))
        .collect::<Vec<_>>()
        .join(", ")
}

fn params_text(chart: &ChartRecommendation) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(bins) = chart.params.bins {
        parts.push(format!("bins={bins}"));
    }
    if let Some(top_n) = chart.params.top_n {
        parts.push(format!("top_n={top_n}"));
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}

/// Ranked chart recommendations in the order given.
pub fn render_charts(charts: &[ChartRecommendation]) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Chart"),
        header_cell("Angle"),
        header_cell("Columns"),
        header_cell("Score"),
        header_cell("Options"),
        header_cell("Rationale"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for (idx, chart) in charts.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(chart.chart_type.id()),
            Cell::new(chart.angle.as_str()),
            Cell::new(bindings_text(chart)),
            score_cell(chart.score),
            params_text(chart).map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(chart.rationale.join(" ")),
        ]);
    }
    table.to_string()
}
