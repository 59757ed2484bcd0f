use std::io::Write;

use datasight_core::{Analyzer, Overrides, to_json, write_json, write_report};
use datasight_ingest::{Column, Table};
use datasight_model::{
    AnalysisError, AnalysisOptions, ChartType, ColumnType, InsightAngle, InsightKind, TableError,
};

fn sales_table() -> Table {
    Table::new(vec![
        Column::from_raw(
            "order_date",
            (0..36).map(|idx| format!("2023-{:02}-{:02}", idx / 3 + 1, idx % 3 * 9 + 1)),
        ),
        Column::from_raw(
            "region",
            (0..36).map(|idx| ["north", "south", "east", "west"][idx % 4]),
        ),
        Column::from_raw(
            "revenue",
            (0..36).map(|idx| (1_000 + 40 * idx + (idx * 7) % 11).to_string()),
        ),
        Column::from_raw("store", (0..36).map(|idx| (idx % 6 + 1).to_string())),
        Column::from_raw("comment", (0..36).map(|idx| format!("note number {idx}"))),
    ])
    .expect("table")
}

#[test]
fn empty_tables_are_rejected() {
    let analyzer = Analyzer::default();
    let no_columns = Table::new(Vec::new()).expect("empty table");
    assert!(matches!(
        analyzer.analyze(&no_columns),
        Err(AnalysisError::Table(TableError::NoColumns))
    ));
    let no_rows = Table::new(vec![Column::from_raw("a", Vec::<String>::new())]).expect("table");
    assert!(matches!(
        analyzer.analyze(&no_rows),
        Err(AnalysisError::Table(TableError::NoRows))
    ));
}

#[test]
fn invalid_options_are_rejected() {
    let mut options = AnalysisOptions::default();
    options.insights.confidence_level = 2.0;
    assert!(matches!(Analyzer::new(options), Err(AnalysisError::Config(_))));
}

#[test]
fn analysis_covers_every_stage() {
    let result = Analyzer::default().analyze(&sales_table()).expect("analysis");
    let types: Vec<(&str, ColumnType)> = result
        .column_profiles
        .iter()
        .map(|profile| (profile.name.as_str(), profile.column_type))
        .collect();
    insta::assert_debug_snapshot!(types, @r#"
    [
        (
            "order_date",
            Datetime,
        ),
        (
            "region",
            Categorical,
        ),
        (
            "revenue",
            Numeric,
        ),
        (
            "store",
            Numeric,
        ),
        (
            "comment",
            Text,
        ),
    ]
    "#);
    assert_eq!(result.dataset.rows, 36);
    assert_eq!(result.dataset.columns, 5);
    assert_eq!(result.dataset.sample_size, None);
    assert!(!result.chart_recommendations.is_empty());
    assert!(
        result
            .insights
            .iter()
            .any(|record| record.kind == InsightKind::Trend)
    );
    assert!(result.narrative.is_none());
    assert!(!result.degraded);
    assert!(
        result
            .chart_recommendations
            .iter()
            .all(|chart| !chart.binds("comment"))
    );
}

#[test]
fn auto_charts_follow_angle_order() {
    let result = Analyzer::default().analyze(&sales_table()).expect("analysis");
    let angles: Vec<InsightAngle> = result.auto_charts.iter().map(|chart| chart.angle).collect();
    assert_eq!(angles, InsightAngle::ALL);
}

#[test]
fn repeated_runs_are_identical() {
    let analyzer = Analyzer::default();
    let table = sales_table();
    let first = analyzer.analyze(&table).expect("first");
    let second = analyzer.analyze(&table).expect("second");
    assert_eq!(first, second);
    assert_eq!(
        to_json(&first).expect("json"),
        to_json(&second).expect("json")
    );
}

#[test]
fn override_to_categorical_switches_chart_family() {
    let analyzer = Analyzer::default();
    let table = sales_table();
    let before = analyzer.analyze(&table).expect("analysis");
    let store = before.profile("store").expect("store profile");
    assert_eq!(store.column_type, ColumnType::Numeric);
    assert!(store.evidence.is_some());

    let overrides = Overrides::from([("store".to_string(), ColumnType::Categorical)]);
    let after = analyzer
        .reanalyze(&table, &before, &overrides)
        .expect("reanalysis");
    let store = after.profile("store").expect("store profile");
    assert_eq!(store.column_type, ColumnType::Categorical);
    assert!(store.overridden);
    assert!(store.evidence.is_none());

    let store_charts: Vec<ChartType> = after
        .chart_recommendations
        .iter()
        .filter(|chart| chart.binds("store"))
        .map(|chart| chart.chart_type)
        .collect();
    assert!(store_charts.contains(&ChartType::BarChart));
    assert!(!store_charts.contains(&ChartType::Histogram));
    assert!(after.insights.iter().all(|record| !record.involves("store")));

    let fresh = analyzer
        .analyze_with_overrides(&table, &overrides)
        .expect("fresh analysis");
    assert_eq!(after, fresh);
}

#[test]
fn overrides_for_unknown_columns_are_ignored() {
    let analyzer = Analyzer::default();
    let table = sales_table();
    let overrides = Overrides::from([("missing".to_string(), ColumnType::Numeric)]);
    let result = analyzer
        .analyze_with_overrides(&table, &overrides)
        .expect("analysis");
    assert_eq!(result, analyzer.analyze(&table).expect("plain analysis"));
}

#[test]
fn reanalyze_with_mismatched_previous_starts_over() {
    let analyzer = Analyzer::default();
    let previous = analyzer.analyze(&sales_table()).expect("analysis");
    let other = Table::new(vec![Column::from_raw("x", ["1", "2", "3", "4"])]).expect("table");
    let result = analyzer
        .reanalyze(&other, &previous, &Overrides::new())
        .expect("reanalysis");
    assert_eq!(result.column_profiles.len(), 1);
    assert_eq!(result.column_profiles[0].name, "x");
}

#[test]
fn chart_subset_only_binds_requested_columns() {
    let analyzer = Analyzer::default();
    let result = analyzer.analyze(&sales_table()).expect("analysis");
    let subset = analyzer.recommend_charts(&result, &["revenue".to_string()]);
    assert!(!subset.is_empty());
    assert!(subset.iter().all(|chart| chart.binds("revenue")));
    assert!(subset.iter().all(|chart| chart.bindings.len() == 1));
}

#[test]
fn all_missing_column_is_profiled_but_not_analyzed() {
    let table = Table::new(vec![
        Column::from_raw("value", (0..20).map(|idx| idx.to_string())),
        Column::from_raw("blank", (0..20).map(|_| "NA")),
    ])
    .expect("table");
    let result = Analyzer::default().analyze(&table).expect("analysis");
    let blank = result.profile("blank").expect("blank profile");
    assert_eq!(blank.column_type, ColumnType::Unknown);
    assert!(result.chart_recommendations.iter().all(|chart| !chart.binds("blank")));
    assert!(result.insights.iter().all(|record| !record.involves("blank")));
}

#[test]
fn csv_files_are_analyzed_with_their_path_as_source() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "day,visits,channel").expect("write");
    for idx in 1..=15 {
        let channel = if idx % 2 == 0 { "email" } else { "search" };
        writeln!(file, "2024-03-{idx:02},{},{channel}", 100 + idx * 3).expect("write");
    }
    file.flush().expect("flush");

    let result = Analyzer::default().analyze_csv(file.path()).expect("analysis");
    assert_eq!(result.dataset.rows, 15);
    assert_eq!(
        result.dataset.source_id.as_deref(),
        Some(file.path().display().to_string().as_str())
    );
    assert_eq!(
        result.profile("day").map(|profile| profile.column_type),
        Some(ColumnType::Datetime)
    );
}

#[test]
fn results_are_written_as_json_and_text() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = Analyzer::default().analyze(&sales_table()).expect("analysis");

    let json_path = dir.path().join("result.json");
    write_json(&result, &json_path).expect("write json");
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).expect("read json"))
            .expect("parse json");
    for key in [
        "column_profiles",
        "chart_recommendations",
        "insights",
        "recommendations",
        "narrative",
        "degraded",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert!(json["narrative"].is_null());

    let report_path = dir.path().join("report.txt");
    write_report(&result, &report_path).expect("write report");
    let report = std::fs::read_to_string(&report_path).expect("read report");
    assert!(report.contains("Chart recommendations:"));
}
