//! Business context and recommendation tables.

use comfy_table::{Cell, CellAlignment, Table};

use datasight_model::{BusinessContext, Kpi, KpiUnit, Recommendation, RiskKind};

use crate::style::{
    align_column, apply_table_style, apply_wide_table_style, dim_cell, header_cell, level_cell,
    risk_cell, total_cell,
};

fn kpi_value(kpi: &Kpi) -> String {
    match kpi.unit {
        KpiUnit::Currency => format!("{:.2}", kpi.value),
        KpiUnit::Ratio => format!("{:.1}%", kpi.value * 100.0),
        KpiUnit::Count => format!("{:.0}", kpi.value),
        KpiUnit::Number => format!("{:.3}", kpi.value),
    }
}

fn risk_label(kind: RiskKind) -> &'static str {
    match kind {
        RiskKind::DataQuality => "data quality",
        RiskKind::Concentration => "concentration",
        RiskKind::Volatility => "volatility",
    }
}

/// KPI table followed by the risk breakdown.
pub fn render_business(context: &BusinessContext) -> String {
    let mut kpis = Table::new();
    kpis.set_header(vec![
        header_cell("KPI"),
        header_cell("Value"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut kpis);
    align_column(&mut kpis, 1, CellAlignment::Right);
    for kpi in &context.kpis {
        let columns = if kpi.columns.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(kpi.columns.join(", "))
        };
        kpis.add_row(vec![Cell::new(&kpi.label), Cell::new(kpi_value(kpi)), columns]);
    }

    let mut risks = Table::new();
    risks.set_header(vec![
        header_cell("Risk"),
        header_cell("Subject"),
        header_cell("Score"),
        header_cell("Level"),
    ]);
    apply_table_style(&mut risks);
    align_column(&mut risks, 2, CellAlignment::Right);
    align_column(&mut risks, 3, CellAlignment::Center);
    for component in &context.risk.components {
        risks.add_row(vec![
            Cell::new(risk_label(component.kind)),
            component
                .subject
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(format!("{:.2}", component.score)),
            risk_cell(component.level),
        ]);
    }
    risks.add_row(vec![
        total_cell("OVERALL"),
        dim_cell("-"),
        Cell::new(format!("{:.2}", context.risk.overall)),
        risk_cell(context.risk.level),
    ]);

    format!(
        "Domain: {}\n{kpis}\n{risks}",
        context.domain.as_str()
    )
}

pub fn render_recommendations(recommendations: &[Recommendation]) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Priority"),
        header_cell("Title"),
        header_cell("Impact"),
        header_cell("Effort"),
        header_cell("ROI"),
        header_cell("Action"),
    ]);
    apply_wide_table_style(&mut table, 5);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Center);
    for rec in recommendations {
        table.add_row(vec![
            level_cell(rec.priority),
            Cell::new(&rec.title),
            Cell::new(rec.impact.as_str()),
            Cell::new(rec.effort.as_str()),
            Cell::new(rec.roi.as_str()),
            Cell::new(&rec.action),
        ]);
    }
    table.to_string()
}
