//! Domain KPIs computed from the columns a domain expects.
//!
//! A KPI is only emitted when its prerequisite columns exist with the right
//! type; ratios with a zero denominator are skipped.

use datasight_ingest::{Column, Table, numeric_values, present};
use datasight_model::{
    BusinessDomain, ColumnProfile, ColumnType, InsightEvidence, InsightKind, InsightRecord, Kpi,
    KpiUnit,
};
use datasight_stats::{coefficient_of_variation, mean};

use crate::domain::name_matches;

const REVENUE_KEYWORDS: &[&str] = &["revenue", "sales", "amount", "total", "income"];
const COST_KEYWORDS: &[&str] = &["cost", "expense", "spend"];
const PROFIT_KEYWORDS: &[&str] = &["profit", "margin"];
const CLICK_KEYWORDS: &[&str] = &["click", "clicks"];
const IMPRESSION_KEYWORDS: &[&str] = &["impression", "impressions", "view", "views"];
const CONVERSION_KEYWORDS: &[&str] = &["conversion", "conversions", "signup", "purchase"];
const VOLUME_KEYWORDS: &[&str] = &["quantity", "volume", "units", "count", "throughput"];

/// Column lookup shared by the KPI and risk stages.
pub struct ColumnFinder<'a> {
    table: &'a Table,
    profiles: &'a [ColumnProfile],
    threshold: f64,
}

impl<'a> ColumnFinder<'a> {
    pub fn new(table: &'a Table, profiles: &'a [ColumnProfile], threshold: f64) -> Self {
        Self {
            table,
            profiles,
            threshold,
        }
    }

    /// First column of `column_type` whose name matches one of `keywords`.
    pub fn find(&self, keywords: &[&str], column_type: ColumnType) -> Option<&'a ColumnProfile> {
        self.profiles.iter().find(|profile| {
            profile.column_type == column_type
                && name_matches(&profile.name, keywords, self.threshold)
        })
    }

    pub fn first_of(&self, column_type: ColumnType) -> Option<&'a ColumnProfile> {
        self.profiles
            .iter()
            .find(|profile| profile.column_type == column_type)
    }

    pub fn column(&self, name: &str) -> Option<&'a Column> {
        self.table.column(name)
    }

    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    /// Parsed numeric values of a column, missing and unparseable cells dropped.
    pub fn values(&self, name: &str) -> Vec<f64> {
        self.column(name)
            .map(|column| present(&numeric_values(column)))
            .unwrap_or_default()
    }

    pub fn sum(&self, name: &str) -> f64 {
        self.values(name).iter().sum()
    }

    /// The numeric column a domain treats as its headline measure.
    pub fn key_metric(&self, domain: BusinessDomain) -> Option<&'a ColumnProfile> {
        let keywords = match domain {
            BusinessDomain::Sales => REVENUE_KEYWORDS,
            BusinessDomain::Finance => PROFIT_KEYWORDS,
            BusinessDomain::Marketing => CONVERSION_KEYWORDS,
            BusinessDomain::Operations => VOLUME_KEYWORDS,
            BusinessDomain::Generic => &[],
        };
        self.find(keywords, ColumnType::Numeric)
            .or_else(|| self.first_of(ColumnType::Numeric))
    }
}

fn kpi(id: &str, label: &str, value: f64, unit: KpiUnit, columns: &[&ColumnProfile]) -> Kpi {
    Kpi {
        id: id.to_string(),
        label: label.to_string(),
        value,
        unit,
        columns: columns.iter().map(|profile| profile.name.clone()).collect(),
    }
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator != 0.0 && denominator.is_finite()).then(|| numerator / denominator)
}

/// Change between the first and last trend period of `column`.
fn period_growth(insights: &[InsightRecord], column: &str) -> Option<f64> {
    insights
        .iter()
        .filter(|record| record.kind == InsightKind::Trend)
        .find(|record| record.columns.first().map(String::as_str) == Some(column))
        .and_then(|record| match &record.evidence {
            InsightEvidence::Trend { periods, .. } => {
                let first = periods.first()?.value;
                let last = periods.last()?.value;
                ratio(last - first, first.abs())
            }
            _ => None,
        })
}

fn sales_kpis(finder: &ColumnFinder<'_>, insights: &[InsightRecord], out: &mut Vec<Kpi>) {
    let Some(revenue) = finder.find(REVENUE_KEYWORDS, ColumnType::Numeric) else {
        return;
    };
    let values = finder.values(&revenue.name);
    out.push(kpi(
        "total_revenue",
        "Total revenue",
        values.iter().sum(),
        KpiUnit::Currency,
        &[revenue],
    ));
    if let Some(average) = mean(&values) {
        out.push(kpi(
            "average_order_value",
            "Average order value",
            average,
            KpiUnit::Currency,
            &[revenue],
        ));
    }
    if let Some(growth) = period_growth(insights, &revenue.name) {
        out.push(kpi(
            "revenue_growth",
            "Revenue growth (first to last period)",
            growth,
            KpiUnit::Ratio,
            &[revenue],
        ));
    }
    if let Some(category) = finder.first_of(ColumnType::Categorical)
        && let Some(summary) = category.categorical_summary()
        && let Some(share) = ratio(summary.top_count as f64, category.non_missing() as f64)
    {
        out.push(kpi(
            "top_category_share",
            "Top category share",
            share,
            KpiUnit::Ratio,
            &[category],
        ));
    }
}

fn finance_kpis(finder: &ColumnFinder<'_>, out: &mut Vec<Kpi>) {
    let cost = finder.find(COST_KEYWORDS, ColumnType::Numeric);
    let profit = finder.find(PROFIT_KEYWORDS, ColumnType::Numeric);
    let revenue = finder.find(REVENUE_KEYWORDS, ColumnType::Numeric);
    if let Some(cost) = cost {
        out.push(kpi(
            "total_cost",
            "Total cost",
            finder.sum(&cost.name),
            KpiUnit::Currency,
            &[cost],
        ));
    }
    if let (Some(profit), Some(revenue)) = (profit, revenue)
        && profit.name != revenue.name
        && let Some(margin) = ratio(finder.sum(&profit.name), finder.sum(&revenue.name))
    {
        out.push(kpi(
            "profit_margin",
            "Profit margin",
            margin,
            KpiUnit::Ratio,
            &[profit, revenue],
        ));
    }
    if let Some(subject) = profit.or(cost)
        && let Some(cv) = coefficient_of_variation(&finder.values(&subject.name))
    {
        out.push(kpi(
            "financial_volatility",
            "Financial volatility (CV)",
            cv,
            KpiUnit::Ratio,
            &[subject],
        ));
    }
}

fn marketing_kpis(finder: &ColumnFinder<'_>, out: &mut Vec<Kpi>) {
    let clicks = finder.find(CLICK_KEYWORDS, ColumnType::Numeric);
    let impressions = finder.find(IMPRESSION_KEYWORDS, ColumnType::Numeric);
    let conversions = finder.find(CONVERSION_KEYWORDS, ColumnType::Numeric);
    let spend = finder.find(COST_KEYWORDS, ColumnType::Numeric);
    if let (Some(clicks), Some(impressions)) = (clicks, impressions)
        && let Some(ctr) = ratio(finder.sum(&clicks.name), finder.sum(&impressions.name))
    {
        out.push(kpi(
            "click_through_rate",
            "Click-through rate",
            ctr,
            KpiUnit::Ratio,
            &[clicks, impressions],
        ));
    }
    if let (Some(conversions), Some(clicks)) = (conversions, clicks)
        && let Some(rate) = ratio(finder.sum(&conversions.name), finder.sum(&clicks.name))
    {
        out.push(kpi(
            "conversion_rate",
            "Conversion rate",
            rate,
            KpiUnit::Ratio,
            &[conversions, clicks],
        ));
    }
    if let (Some(spend), Some(conversions)) = (spend, conversions)
        && let Some(cpa) = ratio(finder.sum(&spend.name), finder.sum(&conversions.name))
    {
        out.push(kpi(
            "cost_per_acquisition",
            "Cost per acquisition",
            cpa,
            KpiUnit::Currency,
            &[spend, conversions],
        ));
    }
}

fn operations_kpis(finder: &ColumnFinder<'_>, out: &mut Vec<Kpi>) {
    let Some(volume) = finder.find(VOLUME_KEYWORDS, ColumnType::Numeric) else {
        return;
    };
    let values = finder.values(&volume.name);
    out.push(kpi(
        "total_volume",
        "Total volume",
        values.iter().sum(),
        KpiUnit::Count,
        &[volume],
    ));
    if let Some(cv) = coefficient_of_variation(&values) {
        out.push(kpi(
            "volume_volatility",
            "Volume volatility (CV)",
            cv,
            KpiUnit::Ratio,
            &[volume],
        ));
    }
}

/// KPIs for the detected domain followed by the generic ones.
pub fn compute_kpis(
    finder: &ColumnFinder<'_>,
    domain: BusinessDomain,
    insights: &[InsightRecord],
    completeness: f64,
) -> Vec<Kpi> {
    let mut out = Vec::new();
    match domain {
        BusinessDomain::Sales => sales_kpis(finder, insights, &mut out),
        BusinessDomain::Finance => finance_kpis(finder, &mut out),
        BusinessDomain::Marketing => marketing_kpis(finder, &mut out),
        BusinessDomain::Operations => operations_kpis(finder, &mut out),
        BusinessDomain::Generic => {}
    }
    out.push(kpi(
        "record_count",
        "Records",
        finder.row_count() as f64,
        KpiUnit::Count,
        &[],
    ));
    out.push(kpi(
        "completeness",
        "Completeness",
        completeness,
        KpiUnit::Ratio,
        &[],
    ));
    out
}
