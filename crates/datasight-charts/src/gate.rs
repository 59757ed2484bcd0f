//! Type-signature gates: which column combinations each chart type accepts.

use datasight_model::{ChartBinding, ChartOptions, ChartRole, ChartType, ColumnProfile, ColumnType};

/// A chart type paired with the columns that satisfy its gate.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub chart_type: ChartType,
    pub bindings: Vec<ChartBinding>,
    pub profiles: Vec<&'a ColumnProfile>,
}

impl<'a> Candidate<'a> {
    fn new(chart_type: ChartType, bound: Vec<(ChartRole, &'a ColumnProfile)>) -> Self {
        let bindings = bound
            .iter()
            .map(|(role, profile)| ChartBinding::new(*role, profile.name.clone()))
            .collect();
        let profiles = bound.into_iter().map(|(_, profile)| profile).collect();
        Self {
            chart_type,
            bindings,
            profiles,
        }
    }
}

/// Columns eligible for charting, grouped by role-relevant type.
struct Eligible<'a> {
    numeric: Vec<&'a ColumnProfile>,
    discrete: Vec<&'a ColumnProfile>,
    datetime: Vec<&'a ColumnProfile>,
}

impl<'a> Eligible<'a> {
    fn from_profiles(profiles: &'a [ColumnProfile]) -> Self {
        let mut eligible = Eligible {
            numeric: Vec::new(),
            discrete: Vec::new(),
            datetime: Vec::new(),
        };
        for profile in profiles.iter().filter(|profile| profile.non_missing() > 0) {
            match profile.column_type {
                ColumnType::Numeric => eligible.numeric.push(profile),
                ColumnType::Categorical | ColumnType::Boolean => eligible.discrete.push(profile),
                ColumnType::Datetime => eligible.datetime.push(profile),
                ColumnType::Text | ColumnType::Unknown => {}
            }
        }
        eligible
    }
}

fn pairs<T: Copy>(items: &[T]) -> impl Iterator<Item = (T, T)> + '_ {
    items
        .iter()
        .enumerate()
        .flat_map(move |(idx, a)| items[idx + 1..].iter().map(move |b| (*a, *b)))
}

/// Every gate-passing candidate, in chart-type order then profile order.
///
/// Text and unknown columns never pass a gate.
pub fn candidates<'a>(profiles: &'a [ColumnProfile], options: &ChartOptions) -> Vec<Candidate<'a>> {
    let eligible = Eligible::from_profiles(profiles);
    let mut out = Vec::new();

    for chart_type in [ChartType::Histogram, ChartType::BoxPlot, ChartType::DensityPlot] {
        for &profile in &eligible.numeric {
            out.push(Candidate::new(chart_type, vec![(ChartRole::X, profile)]));
        }
    }

    for &profile in &eligible.discrete {
        out.push(Candidate::new(ChartType::BarChart, vec![(ChartRole::X, profile)]));
    }
    for &profile in &eligible.discrete {
        if (2..=options.max_pie_slices).contains(&profile.cardinality) {
            out.push(Candidate::new(ChartType::PieChart, vec![(ChartRole::Value, profile)]));
        }
    }

    for chart_type in [ChartType::GroupedBar, ChartType::ViolinPlot] {
        for &group in &eligible.discrete {
            for &value in &eligible.numeric {
                out.push(Candidate::new(
                    chart_type,
                    vec![(ChartRole::Group, group), (ChartRole::Y, value)],
                ));
            }
        }
    }

    for chart_type in [ChartType::ScatterPlot, ChartType::HexbinPlot] {
        for (x, y) in pairs(&eligible.numeric) {
            out.push(Candidate::new(chart_type, vec![(ChartRole::X, x), (ChartRole::Y, y)]));
        }
    }

    if eligible.numeric.len() >= 3 {
        out.push(Candidate::new(
            ChartType::CorrelationHeatmap,
            eligible
                .numeric
                .iter()
                .map(|profile| (ChartRole::Value, *profile))
                .collect(),
        ));
    }

    for &time in &eligible.datetime {
        for &value in &eligible.numeric {
            out.push(Candidate::new(
                ChartType::LineChart,
                vec![(ChartRole::X, time), (ChartRole::Y, value)],
            ));
        }
    }

    let stackable: Vec<&ColumnProfile> = eligible
        .discrete
        .iter()
        .copied()
        .filter(|profile| profile.cardinality <= options.max_stacked_levels)
        .collect();
    for (x, series) in pairs(&stackable) {
        out.push(Candidate::new(
            ChartType::StackedBar,
            vec![(ChartRole::X, x), (ChartRole::Series, series)],
        ));
    }

    out
}
