//! Chart recommendation types shared with the rendering boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Chart types known to the recommendation engine.
///
/// Declaration order is the fixed tie-break order used when two
/// recommendations score the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Histogram,
    BoxPlot,
    DensityPlot,
    BarChart,
    PieChart,
    GroupedBar,
    ViolinPlot,
    ScatterPlot,
    HexbinPlot,
    CorrelationHeatmap,
    LineChart,
    StackedBar,
}

impl ChartType {
    pub const ALL: [ChartType; 12] = [
        ChartType::Histogram,
        ChartType::BoxPlot,
        ChartType::DensityPlot,
        ChartType::BarChart,
        ChartType::PieChart,
        ChartType::GroupedBar,
        ChartType::ViolinPlot,
        ChartType::ScatterPlot,
        ChartType::HexbinPlot,
        ChartType::CorrelationHeatmap,
        ChartType::LineChart,
        ChartType::StackedBar,
    ];

    /// Stable identifier handed to renderers.
    pub fn id(self) -> &'static str {
        match self {
            ChartType::Histogram => "histogram",
            ChartType::BoxPlot => "box_plot",
            ChartType::DensityPlot => "density_plot",
            ChartType::BarChart => "bar_chart",
            ChartType::PieChart => "pie_chart",
            ChartType::GroupedBar => "grouped_bar",
            ChartType::ViolinPlot => "violin_plot",
            ChartType::ScatterPlot => "scatter_plot",
            ChartType::HexbinPlot => "hexbin_plot",
            ChartType::CorrelationHeatmap => "correlation_heatmap",
            ChartType::LineChart => "line_chart",
            ChartType::StackedBar => "stacked_bar",
        }
    }

    /// Position in the fixed tie-break order.
    pub fn rank(self) -> usize {
        self as usize
    }

    pub fn angle(self) -> InsightAngle {
        match self {
            ChartType::Histogram | ChartType::BoxPlot | ChartType::DensityPlot => {
                InsightAngle::Distribution
            }
            ChartType::BarChart | ChartType::GroupedBar | ChartType::ViolinPlot => {
                InsightAngle::Comparison
            }
            ChartType::ScatterPlot | ChartType::HexbinPlot | ChartType::CorrelationHeatmap => {
                InsightAngle::Relationship
            }
            ChartType::PieChart | ChartType::StackedBar => InsightAngle::Composition,
            ChartType::LineChart => InsightAngle::Trend,
        }
    }

    pub fn density(self) -> MarkDensity {
        match self {
            ChartType::ScatterPlot => MarkDensity::Point,
            ChartType::Histogram | ChartType::HexbinPlot | ChartType::CorrelationHeatmap => {
                MarkDensity::Binned
            }
            _ => MarkDensity::Neutral,
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Analytical question a chart answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightAngle {
    Distribution,
    Comparison,
    Relationship,
    Composition,
    Trend,
}

impl InsightAngle {
    pub const ALL: [InsightAngle; 5] = [
        InsightAngle::Distribution,
        InsightAngle::Comparison,
        InsightAngle::Relationship,
        InsightAngle::Composition,
        InsightAngle::Trend,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InsightAngle::Distribution => "distribution",
            InsightAngle::Comparison => "comparison",
            InsightAngle::Relationship => "relationship",
            InsightAngle::Composition => "composition",
            InsightAngle::Trend => "trend",
        }
    }
}

/// How a chart's marks scale with row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkDensity {
    /// One mark per row.
    Point,
    /// Rows are aggregated into bins or cells.
    Binned,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartRole {
    X,
    Y,
    Group,
    Series,
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartBinding {
    pub role: ChartRole,
    pub column: String,
}

impl ChartBinding {
    pub fn new(role: ChartRole, column: impl Into<String>) -> Self {
        Self {
            role,
            column: column.into(),
        }
    }
}

/// Rendering hints that travel with a recommendation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bins: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_n: Option<usize>,
}

/// The four terms that make up a recommendation score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub gate: f64,
    pub fit: f64,
    pub adequacy: f64,
    pub size_modifier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRecommendation {
    pub chart_type: ChartType,
    pub angle: InsightAngle,
    pub bindings: Vec<ChartBinding>,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub rationale: Vec<String>,
    pub params: ChartParams,
}

impl ChartRecommendation {
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|binding| binding.column.as_str())
    }

    pub fn binds(&self, column: &str) -> bool {
        self.columns().any(|name| name == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_declaration_order() {
        for (idx, chart) in ChartType::ALL.iter().enumerate() {
            assert_eq!(chart.rank(), idx);
        }
    }

    #[test]
    fn every_angle_has_a_chart() {
        for angle in InsightAngle::ALL {
            assert!(ChartType::ALL.iter().any(|chart| chart.angle() == angle));
        }
    }
}
