use std::collections::BTreeMap;

use datasight_charts::ChartEngine;
use datasight_classify::{apply_overrides, classify_table};
use datasight_ingest::{Column, Table};
use datasight_model::{
    ChartOptions, ChartType, ClassifierOptions, ColumnProfile, ColumnType, InsightAngle,
};
use proptest::prelude::*;

fn profiles(table: &Table) -> Vec<ColumnProfile> {
    classify_table(table, &ClassifierOptions::default())
}

fn retail(rows: usize) -> Table {
    let regions = ["north", "south", "east", "west"];
    Table::new(vec![
        Column::from_raw(
            "date",
            (0..rows).map(|idx| format!("2024-{:02}-{:02}", idx % 12 + 1, idx % 28 + 1)),
        ),
        Column::from_raw("region", (0..rows).map(|idx| regions[idx % 4])),
        Column::from_raw("units", (0..rows).map(|idx| (idx * 7 % 97).to_string())),
        Column::from_raw("price", (0..rows).map(|idx| format!("{}.25", idx * 3 % 89))),
        Column::from_raw("discount", (0..rows).map(|idx| (idx * 11 % 31).to_string())),
    ])
    .expect("table")
}

fn two_numeric(rows: usize) -> Vec<ColumnProfile> {
    let table = Table::new(vec![
        Column::from_raw("x", (0..rows).map(|idx| idx.to_string())),
        Column::from_raw("y", (0..rows).map(|idx| (idx * 13 % 101).to_string())),
    ])
    .expect("table");
    profiles(&table)
}

fn position(recs: &[datasight_model::ChartRecommendation], chart: ChartType) -> usize {
    recs.iter()
        .position(|rec| rec.chart_type == chart)
        .unwrap_or_else(|| panic!("{chart} missing"))
}

#[test]
fn scatter_wins_small_hexbin_wins_large() {
    let options = ChartOptions::default();
    let engine = ChartEngine::new(&options);

    let small = engine.rank_all(&two_numeric(200));
    assert!(position(&small, ChartType::ScatterPlot) < position(&small, ChartType::HexbinPlot));

    let large = engine.rank_all(&two_numeric(5_000));
    assert!(position(&large, ChartType::HexbinPlot) < position(&large, ChartType::ScatterPlot));
    let scatter = &large[position(&large, ChartType::ScatterPlot)];
    assert!(
        scatter
            .rationale
            .iter()
            .any(|tag| tag == "large_dataset_point_penalty")
    );
}

#[test]
fn size_threshold_is_configurable() {
    let options = ChartOptions {
        size_threshold: 100,
        ..ChartOptions::default()
    };
    let ranked = ChartEngine::new(&options).rank_all(&two_numeric(200));
    assert!(position(&ranked, ChartType::HexbinPlot) < position(&ranked, ChartType::ScatterPlot));
}

#[test]
fn scores_stay_in_unit_interval_and_sorted() {
    let options = ChartOptions::default();
    let ranked = ChartEngine::new(&options).rank_all(&profiles(&retail(120)));
    assert!(!ranked.is_empty());
    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert!(ranked.iter().all(|rec| (0.0..=1.0).contains(&rec.score)));
}

#[test]
fn recommendations_are_capped() {
    let options = ChartOptions {
        max_recommendations: 4,
        ..ChartOptions::default()
    };
    let recs = ChartEngine::new(&options).recommend(&profiles(&retail(120)));
    assert_eq!(recs.len(), 4);
}

#[test]
fn auto_generate_best_covers_each_angle_once() {
    let options = ChartOptions::default();
    let best = ChartEngine::new(&options).auto_generate_best(&profiles(&retail(120)));
    let angles: Vec<InsightAngle> = best.iter().map(|rec| rec.angle).collect();
    assert_eq!(angles, InsightAngle::ALL);
}

#[test]
fn column_subset_limits_bindings() {
    let options = ChartOptions::default();
    let recs = ChartEngine::new(&options)
        .recommend_for(&profiles(&retail(60)), &["units".to_string(), "region".to_string()]);
    assert!(!recs.is_empty());
    assert!(
        recs.iter()
            .all(|rec| rec.columns().all(|name| name == "units" || name == "region"))
    );
}

#[test]
fn text_and_unknown_columns_are_excluded() {
    let table = Table::new(vec![
        Column::from_raw("comment", (0..30).map(|idx| format!("remark number {idx}"))),
        Column::from_raw("blank", (0..30).map(|_| "")),
        Column::from_raw("score", (0..30).map(|idx| idx.to_string())),
    ])
    .expect("table");
    let options = ChartOptions::default();
    let recs = ChartEngine::new(&options).recommend(&profiles(&table));
    assert!(!recs.is_empty());
    assert!(recs.iter().all(|rec| rec.columns().all(|name| name == "score")));
}

#[test]
fn histogram_carries_sturges_bins() {
    let options = ChartOptions::default();
    let recs = ChartEngine::new(&options).rank_all(&two_numeric(1_000));
    let histogram = &recs[position(&recs, ChartType::Histogram)];
    assert_eq!(histogram.params.bins, Some(11));
}

#[test]
fn categorical_override_switches_chart_family() {
    let table = Table::new(vec![Column::from_raw(
        "store",
        (0..40).map(|idx| (idx % 6 + 100).to_string()),
    )])
    .expect("table");
    let classifier = ClassifierOptions::default();
    let inferred = classify_table(&table, &classifier);
    let options = ChartOptions::default();
    let engine = ChartEngine::new(&options);
    let before: Vec<ChartType> = engine
        .recommend(&inferred)
        .iter()
        .map(|rec| rec.chart_type)
        .collect();
    insta::assert_debug_snapshot!(before, @r"
    [
        BoxPlot,
        Histogram,
        DensityPlot,
    ]
    ");

    let overrides = BTreeMap::from([("store".to_string(), ColumnType::Categorical)]);
    let overridden = apply_overrides(&table, &inferred, &overrides, &classifier);
    let after = engine.recommend(&overridden);
    let types: Vec<ChartType> = after.iter().map(|rec| rec.chart_type).collect();
    insta::assert_debug_snapshot!(types, @r"
    [
        BarChart,
        PieChart,
    ]
    ");
    assert!(
        after
            .iter()
            .all(|rec| rec.rationale.iter().any(|tag| tag == "type_override"))
    );
}

#[test]
fn single_numeric_column_with_two_rows_gets_charts() {
    let table = Table::new(vec![Column::from_raw("v", ["1.5", "2.5"])]).expect("table");
    let options = ChartOptions::default();
    assert!(!ChartEngine::new(&options).recommend(&profiles(&table)).is_empty());
}

proptest! {
    #[test]
    fn ranking_is_deterministic(rows in 2usize..300, threshold in 10usize..2_000) {
        let options = ChartOptions {
            size_threshold: threshold,
            ..ChartOptions::default()
        };
        let profiles = profiles(&retail(rows));
        let engine = ChartEngine::new(&options);
        prop_assert_eq!(engine.recommend(&profiles), engine.recommend(&profiles));
    }
}
