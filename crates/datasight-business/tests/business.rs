use datasight_business::{BusinessOutcome, BusinessSynthesizer};
use datasight_classify::classify_table;
use datasight_ingest::{Column, Table};
use datasight_model::{
    BusinessDomain, BusinessOptions, ClassifierOptions, InsightOptions, KpiUnit, Level,
    RiskKind, RiskLevel,
};
use datasight_stats::{InsightEngine, assess_quality};

fn synthesize(table: &Table, options: &BusinessOptions) -> BusinessOutcome {
    let profiles = classify_table(table, &ClassifierOptions::default());
    let insight_options = InsightOptions::default();
    let run = InsightEngine::new(&insight_options).run(table, &profiles);
    let quality = assess_quality(table, &profiles);
    BusinessSynthesizer::new(options).synthesize(table, &profiles, &run.insights, &quality)
}

fn sales_table() -> Table {
    Table::new(vec![
        Column::from_raw(
            "order_date",
            (1..=12).map(|month| format!("2024-{month:02}-01")),
        ),
        Column::from_raw(
            "region",
            (0..12).map(|idx| ["north", "south", "east"][idx % 3]),
        ),
        Column::from_raw("revenue", (1..=12).map(|month| (100 * month).to_string())),
        Column::from_raw("order_total", (1..=12).map(|month| (3 * month).to_string())),
    ])
    .expect("table")
}

#[test]
fn sales_columns_select_the_sales_domain() {
    let outcome = synthesize(&sales_table(), &BusinessOptions::default());
    assert_eq!(outcome.context.domain, BusinessDomain::Sales);
    let sales = &outcome.context.domain_scores[0];
    assert_eq!(
        sales.matched_columns,
        ["order_date", "revenue", "order_total"]
    );
}

#[test]
fn sales_kpis_use_the_revenue_column() {
    let outcome = synthesize(&sales_table(), &BusinessOptions::default());
    let ids: Vec<&str> = outcome
        .context
        .kpis
        .iter()
        .map(|kpi| kpi.id.as_str())
        .collect();
    insta::assert_debug_snapshot!(ids, @r#"
    [
        "total_revenue",
        "average_order_value",
        "revenue_growth",
        "top_category_share",
        "record_count",
        "completeness",
    ]
    "#);
    let total = &outcome.context.kpis[0];
    assert!((total.value - 7_800.0).abs() < 1e-9);
    assert_eq!(total.unit, KpiUnit::Currency);
    let growth = &outcome.context.kpis[2];
    assert!((growth.value - 11.0).abs() < 1e-9);
}

#[test]
fn one_keyword_hit_stays_generic() {
    let table = Table::new(vec![
        Column::from_raw("price", ["1", "2", "3"]),
        Column::from_raw("weight", ["4", "5", "6"]),
    ])
    .expect("table");
    let outcome = synthesize(&table, &BusinessOptions::default());
    assert_eq!(outcome.context.domain, BusinessDomain::Generic);
    let ids: Vec<&str> = outcome.context.kpis.iter().map(|kpi| kpi.id.as_str()).collect();
    assert_eq!(ids, ["record_count", "completeness"]);
}

#[test]
fn domain_ties_resolve_in_fixed_order() {
    let table = Table::new(vec![
        Column::from_raw("revenue", ["1", "2", "3"]),
        Column::from_raw("sales", ["1", "2", "4"]),
        Column::from_raw("cost", ["4", "5", "6"]),
        Column::from_raw("expense", ["4", "5", "7"]),
    ])
    .expect("table");
    let outcome = synthesize(&table, &BusinessOptions::default());
    assert_eq!(outcome.context.domain, BusinessDomain::Sales);
}

#[test]
fn marketing_ratios() {
    let table = Table::new(vec![
        Column::from_raw("clicks", ["10", "20", "30", "40"]),
        Column::from_raw("impressions", ["100", "200", "300", "400"]),
        Column::from_raw("conversions", ["1", "2", "3", "4"]),
        Column::from_raw("spend", ["5", "5", "5", "5"]),
    ])
    .expect("table");
    let outcome = synthesize(&table, &BusinessOptions::default());
    assert_eq!(outcome.context.domain, BusinessDomain::Marketing);
    let value = |id: &str| {
        outcome
            .context
            .kpis
            .iter()
            .find(|kpi| kpi.id == id)
            .map(|kpi| kpi.value)
            .unwrap_or_else(|| panic!("{id} missing"))
    };
    assert!((value("click_through_rate") - 0.1).abs() < 1e-9);
    assert!((value("conversion_rate") - 0.1).abs() < 1e-9);
    assert!((value("cost_per_acquisition") - 2.0).abs() < 1e-9);
}

#[test]
fn dominant_category_is_a_concentration_risk() {
    let mut regions = vec!["north"; 18];
    regions.extend(["south", "east"]);
    let table = Table::new(vec![
        Column::from_raw("region", regions),
        Column::from_raw("amount", (0..20).map(|idx| (50 + idx).to_string())),
    ])
    .expect("table");
    let outcome = synthesize(&table, &BusinessOptions::default());
    let concentration = outcome
        .context
        .risk
        .components
        .iter()
        .find(|risk| risk.kind == RiskKind::Concentration)
        .expect("concentration risk");
    assert_eq!(concentration.level, RiskLevel::High);
    assert_eq!(concentration.subject.as_deref(), Some("region"));
    assert!(outcome.context.risk.overall >= concentration.score);
    assert!(
        outcome
            .recommendations
            .iter()
            .any(|rec| rec.title == "Reduce concentration in region")
    );
}

#[test]
fn recommendations_are_sorted_and_capped() {
    let options = BusinessOptions {
        max_recommendations: 2,
        ..BusinessOptions::default()
    };
    let outcome = synthesize(&sales_table(), &options);
    assert_eq!(outcome.recommendations.len(), 2);

    let all = synthesize(&sales_table(), &BusinessOptions::default());
    assert!(all.recommendations.len() <= 10);
    assert!(
        all.recommendations
            .iter()
            .any(|rec| rec.title == "Collect more data")
    );
    for pair in all.recommendations.windows(2) {
        assert!(pair[0].priority >= pair[1].priority);
    }
    assert!(
        all.recommendations
            .iter()
            .all(|rec| matches!(rec.priority, Level::Low | Level::Medium | Level::High))
    );
}
