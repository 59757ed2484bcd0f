use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use datasight_model::{ColumnType, Level, RiskLevel};

pub(crate) fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub(crate) fn total_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub(crate) fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

pub(crate) fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub(crate) fn optional_cell(value: Option<String>) -> Cell {
    match value {
        Some(value) if !value.is_empty() => Cell::new(value),
        _ => dim_cell("-"),
    }
}

pub(crate) fn score_cell(score: f64) -> Cell {
    let color = if score >= 0.7 {
        Color::Green
    } else if score >= 0.4 {
        Color::Yellow
    } else {
        Color::DarkGrey
    };
    Cell::new(format!("{score:.2}")).fg(color)
}

pub(crate) fn type_cell(column_type: ColumnType, overridden: bool) -> Cell {
    let color = match column_type {
        ColumnType::Numeric => Color::Blue,
        ColumnType::Categorical | ColumnType::Boolean => Color::Magenta,
        ColumnType::Datetime => Color::Green,
        ColumnType::Text => Color::White,
        ColumnType::Unknown => Color::DarkGrey,
    };
    let label = if overridden {
        format!("{column_type}*")
    } else {
        column_type.to_string()
    };
    Cell::new(label).fg(color)
}

pub(crate) fn level_cell(level: Level) -> Cell {
    match level {
        Level::High => Cell::new("HIGH")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Level::Medium => Cell::new("MEDIUM").fg(Color::Yellow),
        Level::Low => dim_cell("LOW"),
    }
}

pub(crate) fn risk_cell(level: RiskLevel) -> Cell {
    match level {
        RiskLevel::High => Cell::new("HIGH")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        RiskLevel::Medium => Cell::new("MEDIUM").fg(Color::Yellow),
        RiskLevel::Low => Cell::new("LOW").fg(Color::Green),
    }
}

pub(crate) fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub(crate) fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Wide layout for tables with a free-text column.
pub(crate) fn apply_wide_table_style(table: &mut Table, text_column: usize) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
    let constraints = (0..table.column_count())
        .map(|idx| {
            if idx == text_column {
                ColumnConstraint::UpperBoundary(Width::Percentage(45))
            } else {
                ColumnConstraint::LowerBoundary(Width::Fixed(6))
            }
        })
        .collect::<Vec<_>>();
    table.set_constraints(constraints);
}
