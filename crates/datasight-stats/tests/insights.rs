use datasight_ingest::{Column, Table};
use datasight_model::{
    ColumnProfile, ColumnSummary, ColumnType, CorrelationBand, CorrelationDirection,
    InsightEvidence, InsightKind, InsightOptions, OutlierMethod, SkewClass, TrendDirection,
};
use datasight_stats::{Finding, InsightEngine, assess_quality, pearson};
use proptest::prelude::*;

fn profile(table: &Table, name: &str, column_type: ColumnType) -> ColumnProfile {
    let column = table.column(name).expect("column");
    ColumnProfile {
        name: name.to_string(),
        column_type,
        row_count: column.len(),
        missing_count: column.missing_count(),
        cardinality: column.distinct_count(),
        summary: ColumnSummary::None,
        evidence: None,
        overridden: false,
        sample_values: Vec::new(),
    }
}

fn numbers(values: impl IntoIterator<Item = f64>) -> Vec<String> {
    values.into_iter().map(|value| value.to_string()).collect()
}

/// 190 ordinary values around 50 plus 10 extreme ones.
fn with_injected_outliers() -> Vec<f64> {
    let mut values: Vec<f64> = (0..190).map(|idx| 40.0 + f64::from(idx % 21)).collect();
    values.extend(std::iter::repeat_n(1_000.0, 10));
    values
}

#[test]
fn anti_correlated_columns_are_very_strong_negative() {
    let up: Vec<f64> = (0..50).map(f64::from).collect();
    let down: Vec<f64> = up.iter().map(|value| 100.0 - 2.0 * value).collect();
    let table = Table::new(vec![
        Column::from_raw("supply", numbers(up)),
        Column::from_raw("price", numbers(down)),
    ])
    .expect("table");
    let profiles = vec![
        profile(&table, "supply", ColumnType::Numeric),
        profile(&table, "price", ColumnType::Numeric),
    ];
    let options = InsightOptions::default();
    let run = InsightEngine::new(&options).run(&table, &profiles);

    let correlation = run
        .of_kind(InsightKind::Correlation)
        .next()
        .expect("correlation insight");
    match &correlation.evidence {
        InsightEvidence::Correlation {
            coefficient,
            band,
            direction,
            significant,
            ..
        } => {
            assert!((coefficient + 1.0).abs() < 1e-9);
            assert_eq!(*band, CorrelationBand::VeryStrong);
            assert_eq!(*direction, CorrelationDirection::Negative);
            assert!(*significant);
        }
        other => panic!("unexpected evidence: {other:?}"),
    }
    assert!((0.0..=1.0).contains(&correlation.confidence));
}

#[test]
fn injected_outliers_are_found_by_both_methods() {
    let values = with_injected_outliers();
    let table = Table::new(vec![Column::from_raw("amount", numbers(values))]).expect("table");
    let profiles = vec![profile(&table, "amount", ColumnType::Numeric)];

    for method in [OutlierMethod::Iqr, OutlierMethod::Zscore] {
        let options = InsightOptions {
            outlier_method: method,
            ..InsightOptions::default()
        };
        let run = InsightEngine::new(&options).run(&table, &profiles);
        let record = run
            .of_kind(InsightKind::Outlier)
            .next()
            .unwrap_or_else(|| panic!("{method:?} found no outliers"));
        let InsightEvidence::Outlier { proportion, .. } = record.evidence else {
            panic!("unexpected evidence");
        };
        assert!(
            (proportion - 0.05).abs() <= 0.01,
            "{method:?} proportion {proportion}"
        );
    }
}

#[test]
fn monthly_growth_is_an_increasing_trend() {
    let months: Vec<String> = (1..=12).map(|month| format!("2023-{month:02}-01")).collect();
    let revenue = numbers((1..=12).map(|month| 1_000.0 + 150.0 * f64::from(month)));
    let table = Table::new(vec![
        Column::from_raw("month", months),
        Column::from_raw("revenue", revenue),
    ])
    .expect("table");
    let profiles = vec![
        profile(&table, "month", ColumnType::Datetime),
        profile(&table, "revenue", ColumnType::Numeric),
    ];
    let options = InsightOptions::default();
    let run = InsightEngine::new(&options).run(&table, &profiles);

    let trend = run.of_kind(InsightKind::Trend).next().expect("trend insight");
    let InsightEvidence::Trend {
        direction,
        strength,
        periods,
        ..
    } = &trend.evidence
    else {
        panic!("unexpected evidence");
    };
    assert_eq!(*direction, TrendDirection::Increasing);
    assert!(*strength > 0.0);
    assert_eq!(periods.len(), 12);
}

#[test]
fn no_datetime_column_means_no_trend() {
    let table = Table::new(vec![
        Column::from_raw("a", numbers((0..20).map(f64::from))),
        Column::from_raw("b", numbers((0..20).map(|v| f64::from(v * v)))),
    ])
    .expect("table");
    let profiles = vec![
        profile(&table, "a", ColumnType::Numeric),
        profile(&table, "b", ColumnType::Numeric),
    ];
    let options = InsightOptions::default();
    let run = InsightEngine::new(&options).run(&table, &profiles);
    assert_eq!(run.of_kind(InsightKind::Trend).count(), 0);
    assert!(
        run.absences
            .iter()
            .any(|absence| absence.kind == InsightKind::Trend)
    );
}

#[test]
fn small_tables_skip_clustering_without_failing_others() {
    let table = Table::new(vec![
        Column::from_raw("a", ["1", "2", "3", "4", "5"]),
        Column::from_raw("b", ["2", "4", "6", "8", "11"]),
    ])
    .expect("table");
    let profiles = vec![
        profile(&table, "a", ColumnType::Numeric),
        profile(&table, "b", ColumnType::Numeric),
    ];
    let options = InsightOptions::default();
    let run = InsightEngine::new(&options).run(&table, &profiles);
    assert_eq!(run.of_kind(InsightKind::Cluster).count(), 0);
    assert_eq!(run.of_kind(InsightKind::Distribution).count(), 2);
    assert_eq!(run.of_kind(InsightKind::Correlation).count(), 1);
}

#[test]
fn tiny_scale_columns_still_get_a_distribution() {
    let values: Vec<Option<f64>> = (1..=40).map(|idx| Some(f64::from(idx) * 1e-9)).collect();
    let options = InsightOptions::default();
    let finding = InsightEngine::new(&options).distribution("dose", &values);
    let Finding::Found(record) = finding else {
        panic!("expected a distribution insight");
    };
    assert_eq!(record.kind, InsightKind::Distribution);
    assert!(matches!(
        record.evidence,
        InsightEvidence::Distribution {
            skew: SkewClass::Symmetric,
            ..
        }
    ));
}

#[test]
fn target_columns_limit_numeric_analysis() {
    let table = Table::new(vec![
        Column::from_raw("a", numbers((0..10).map(f64::from))),
        Column::from_raw("b", numbers((0..10).map(|v| f64::from(v) * 3.0))),
    ])
    .expect("table");
    let profiles = vec![
        profile(&table, "a", ColumnType::Numeric),
        profile(&table, "b", ColumnType::Numeric),
    ];
    let options = InsightOptions {
        target_columns: vec!["b".to_string()],
        ..InsightOptions::default()
    };
    let run = InsightEngine::new(&options).run(&table, &profiles);
    assert!(run.insights.iter().all(|record| !record.involves("a")));
    assert_eq!(run.of_kind(InsightKind::Correlation).count(), 0);
}

#[test]
fn sampling_applies_above_threshold() {
    let table = Table::new(vec![
        Column::from_raw("x", numbers((0..400).map(f64::from))),
        Column::from_raw("y", numbers((0..400).map(|v| f64::from(v) * 2.0 + 1.0))),
    ])
    .expect("table");
    let profiles = vec![
        profile(&table, "x", ColumnType::Numeric),
        profile(&table, "y", ColumnType::Numeric),
    ];
    let options = InsightOptions {
        sampling_threshold: 100,
        sample_size: 50,
        ..InsightOptions::default()
    };
    let run = InsightEngine::new(&options).run(&table, &profiles);
    assert_eq!(run.sample_size, Some(50));
    let record = run.of_kind(InsightKind::Correlation).next().expect("correlation");
    let InsightEvidence::Correlation {
        sample_size,
        sampled,
        ..
    } = record.evidence
    else {
        panic!("unexpected evidence");
    };
    assert_eq!(sample_size, 50);
    assert!(sampled);
}

#[test]
fn quality_penalizes_missing_and_small_tables() {
    let table = Table::new(vec![
        Column::from_raw("a", ["1", "", "", "4"]),
        Column::from_raw("b", ["x", "y", "x", "y"]),
    ])
    .expect("table");
    let profiles = vec![
        profile(&table, "a", ColumnType::Numeric),
        profile(&table, "b", ColumnType::Categorical),
    ];
    let report = assess_quality(&table, &profiles);
    // 50% missing in one column, too few columns and too few rows.
    assert!((report.score - (100.0 - 5.0 - 10.0 - 15.0)).abs() < 1e-9);
    assert!((report.completeness - 0.75).abs() < 1e-9);
    assert_eq!(report.duplicate_rows, 0);
}

proptest! {
    #[test]
    fn correlation_stays_in_unit_interval(
        pairs in proptest::collection::vec((-1.0e6f64..1.0e6, -1.0e6f64..1.0e6), 3..60)
    ) {
        let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        if let Some(r) = pearson(&xs, &ys) {
            prop_assert!((-1.0..=1.0).contains(&r));
        }
    }
}
