//! Insight engine: runs every statistic independently and collects findings.

use std::collections::HashMap;
use std::time::Instant;

use chrono::NaiveDateTime;
use datasight_ingest::{Table, analysis_rows, datetime_values, numeric_values, present};
use datasight_model::{
    BusinessTag, ColumnProfile, ColumnType, CorrelationBand, CorrelationDirection, ImpactLevel,
    InsightEvidence, InsightKind, InsightOptions, InsightRecord, OutlierMethod, SkewClass,
    TrendDirection,
};
use tracing::{debug, info, info_span};

use crate::cluster::cluster_rows;
use crate::confidence::confidence;
use crate::correlation::{is_significant, paired, pearson};
use crate::descriptive::{coefficient_of_variation, describe, excess_kurtosis, skewness};
use crate::outliers::{detect_outliers, impact_level, iqr_outliers, zscore_outliers};
use crate::trend::{TrendGap, analyze_trend};

const DISTRIBUTION_SATURATION: f64 = 30.0;
const CORRELATION_SATURATION: f64 = 50.0;
const OUTLIER_SATURATION: f64 = 30.0;
const TREND_SATURATION: f64 = 12.0;
const CLUSTER_SATURATION: f64 = 100.0;
const HIGH_VARIATION_CV: f64 = 0.5;

/// A computation that was skipped, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Absence {
    pub kind: InsightKind,
    pub columns: Vec<String>,
    pub reason: String,
}

/// Outcome of a single insight computation.
#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    Found(InsightRecord),
    Absent(Absence),
}

impl Finding {
    fn absent(kind: InsightKind, columns: &[&str], reason: impl Into<String>) -> Self {
        Finding::Absent(Absence {
            kind,
            columns: columns.iter().map(|name| (*name).to_string()).collect(),
            reason: reason.into(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightRun {
    pub insights: Vec<InsightRecord>,
    pub absences: Vec<Absence>,
    /// Rows used by sampled computations when sampling applied.
    pub sample_size: Option<usize>,
}

impl InsightRun {
    fn push(&mut self, finding: Finding) {
        match finding {
            Finding::Found(record) => self.insights.push(record),
            Finding::Absent(absence) => {
                debug!(
                    kind = absence.kind.as_str(),
                    columns = ?absence.columns,
                    reason = %absence.reason,
                    "insight skipped"
                );
                self.absences.push(absence);
            }
        }
    }

    pub fn of_kind(&self, kind: InsightKind) -> impl Iterator<Item = &InsightRecord> {
        self.insights.iter().filter(move |record| record.kind == kind)
    }
}

/// Numeric columns in scope, coerced once.
struct NumericColumns<'a> {
    names: Vec<&'a str>,
    values: HashMap<&'a str, Vec<Option<f64>>>,
}

impl<'a> NumericColumns<'a> {
    fn collect(table: &'a Table, profiles: &'a [ColumnProfile], options: &InsightOptions) -> Self {
        let mut names = Vec::new();
        let mut values = HashMap::new();
        for profile in profiles {
            if profile.column_type != ColumnType::Numeric || !options.targets(&profile.name) {
                continue;
            }
            let Some(column) = table.column(&profile.name) else {
                continue;
            };
            names.push(profile.name.as_str());
            values.insert(profile.name.as_str(), numeric_values(column));
        }
        Self { names, values }
    }

    fn get(&self, name: &str) -> &[Option<f64>] {
        self.values.get(name).map(Vec::as_slice).unwrap_or_default()
    }
}

pub struct InsightEngine<'a> {
    options: &'a InsightOptions,
}

impl<'a> InsightEngine<'a> {
    pub fn new(options: &'a InsightOptions) -> Self {
        Self { options }
    }

    /// Compute every insight the table supports.
    ///
    /// Each statistic runs independently; a missing precondition produces an
    /// [`Absence`] and never stops the others.
    pub fn run(&self, table: &Table, profiles: &[ColumnProfile]) -> InsightRun {
        let span = info_span!("insights", rows = table.row_count(), columns = profiles.len());
        let _guard = span.enter();
        let start = Instant::now();

        let numeric = NumericColumns::collect(table, profiles, self.options);
        let total_rows = table.row_count();
        let rows = analysis_rows(
            total_rows,
            self.options.sampling_threshold,
            self.options.sample_size,
            self.options.sample_seed,
        );
        let mut run = InsightRun {
            sample_size: (rows.len() < total_rows).then_some(rows.len()),
            ..InsightRun::default()
        };
        if let Some(size) = run.sample_size {
            info!(total_rows, sample_size = size, "sampling rows for pairwise statistics");
        }

        for name in &numeric.names {
            run.push(self.distribution(name, numeric.get(name)));
        }
        for (idx, left) in numeric.names.iter().enumerate() {
            for right in &numeric.names[idx + 1..] {
                run.push(self.correlation(
                    left,
                    right,
                    numeric.get(left),
                    numeric.get(right),
                    &rows,
                    total_rows,
                ));
            }
        }
        for name in &numeric.names {
            run.push(self.outliers(name, numeric.get(name)));
        }
        for finding in self.trends(table, profiles, &numeric) {
            run.push(finding);
        }
        run.push(self.clusters(&numeric, &rows, total_rows));

        info!(
            insights = run.insights.len(),
            skipped = run.absences.len(),
            duration_ms = start.elapsed().as_millis(),
            "insights complete"
        );
        run
    }

    pub fn distribution(&self, name: &str, values: &[Option<f64>]) -> Finding {
        let values = present(values);
        let (Some(summary), Some(skew)) = (describe(&values), skewness(&values)) else {
            return Finding::absent(
                InsightKind::Distribution,
                &[name],
                "needs at least three values with spread",
            );
        };
        let kurtosis = excess_kurtosis(&values).unwrap_or(0.0);
        let skew_class = if skew.abs() < 0.5 {
            SkewClass::Symmetric
        } else if skew > 0.0 {
            SkewClass::RightSkewed
        } else {
            SkewClass::LeftSkewed
        };
        let heavy_tailed = kurtosis > 3.0;
        let mut tags = Vec::new();
        if skew_class != SkewClass::Symmetric {
            tags.push(BusinessTag::Skew);
        }
        if coefficient_of_variation(&values).is_some_and(|cv| cv > HIGH_VARIATION_CV) {
            tags.push(BusinessTag::Volatility);
        }
        let shape = match skew_class {
            SkewClass::Symmetric => "roughly symmetric",
            SkewClass::RightSkewed => "right-skewed",
            SkewClass::LeftSkewed => "left-skewed",
        };
        Finding::Found(InsightRecord {
            kind: InsightKind::Distribution,
            columns: vec![name.to_string()],
            headline: format!(
                "{name} is {shape} (mean {:.2}, median {:.2}, skewness {skew:.2})",
                summary.mean, summary.median
            ),
            evidence: InsightEvidence::Distribution {
                mean: summary.mean,
                median: summary.median,
                std: summary.std,
                skewness: skew,
                kurtosis,
                skew: skew_class,
                heavy_tailed,
            },
            confidence: confidence(
                summary.count,
                DISTRIBUTION_SATURATION,
                1.0 / (1.0 + skew.abs()),
            ),
            business_tags: tags,
        })
    }

    pub fn correlation(
        &self,
        left: &str,
        right: &str,
        xs: &[Option<f64>],
        ys: &[Option<f64>],
        rows: &[usize],
        total_rows: usize,
    ) -> Finding {
        let (px, py) = paired(xs, ys, rows);
        let Some(r) = pearson(&px, &py) else {
            return Finding::absent(
                InsightKind::Correlation,
                &[left, right],
                "needs three complete pairs with spread on both sides",
            );
        };
        if r.abs() < self.options.min_correlation {
            return Finding::absent(
                InsightKind::Correlation,
                &[left, right],
                format!("coefficient {r:.3} below reporting threshold"),
            );
        }
        let n = px.len();
        let band = CorrelationBand::from_coefficient(r);
        let direction = if r < 0.0 {
            CorrelationDirection::Negative
        } else {
            CorrelationDirection::Positive
        };
        let significant = is_significant(r, n, self.options.confidence_level);
        let mut tags = vec![BusinessTag::Relationship];
        if band >= CorrelationBand::Strong {
            tags.push(BusinessTag::Opportunity);
        }
        let sign = match direction {
            CorrelationDirection::Positive => "positive",
            CorrelationDirection::Negative => "negative",
        };
        let consistency = if significant { r.abs() } else { r.abs() / 2.0 };
        Finding::Found(InsightRecord {
            kind: InsightKind::Correlation,
            columns: vec![left.to_string(), right.to_string()],
            headline: format!(
                "{left} and {right} show a {} {sign} correlation (r = {r:.2})",
                band.as_str()
            ),
            evidence: InsightEvidence::Correlation {
                coefficient: r,
                band,
                direction,
                significant,
                sample_size: n,
                sampled: rows.len() < total_rows,
            },
            confidence: confidence(n, CORRELATION_SATURATION, consistency),
            business_tags: tags,
        })
    }

    pub fn outliers(&self, name: &str, values: &[Option<f64>]) -> Finding {
        self.outliers_with(name, values, self.options.outlier_method)
    }

    /// Outlier finding for an explicit method, ignoring the configured one.
    pub fn outliers_with(&self, name: &str, values: &[Option<f64>], method: OutlierMethod) -> Finding {
        let values = present(values);
        let Some(summary) = detect_outliers(&values, method, self.options) else {
            return Finding::absent(
                InsightKind::Outlier,
                &[name],
                "not enough values with spread for outlier bounds",
            );
        };
        if summary.count == 0 {
            return Finding::absent(InsightKind::Outlier, &[name], "no values outside bounds");
        }
        let other = match method {
            OutlierMethod::Iqr => zscore_outliers(&values, self.options.zscore_threshold),
            OutlierMethod::Zscore => iqr_outliers(&values, self.options.iqr_multiplier),
        };
        // Agreement between the two methods on the flagged share.
        let agreement = other.map_or(0.5, |other| {
            let (low, high) = if other.proportion < summary.proportion {
                (other.proportion, summary.proportion)
            } else {
                (summary.proportion, other.proportion)
            };
            if high <= 0.0 { 1.0 } else { low / high }
        });
        let impact = impact_level(summary.proportion, self.options);
        let mut tags = vec![BusinessTag::DataQuality];
        if impact == ImpactLevel::High {
            tags.push(BusinessTag::Risk);
        }
        Finding::Found(InsightRecord {
            kind: InsightKind::Outlier,
            columns: vec![name.to_string()],
            headline: format!(
                "{} outliers in {name} ({:.1}% via {})",
                summary.count,
                summary.proportion * 100.0,
                method.as_str()
            ),
            evidence: InsightEvidence::Outlier {
                method,
                count: summary.count,
                proportion: summary.proportion,
                lower_bound: summary.lower_bound,
                upper_bound: summary.upper_bound,
                impact,
            },
            confidence: confidence(values.len(), OUTLIER_SATURATION, agreement),
            business_tags: tags,
        })
    }

    fn trends(
        &self,
        table: &Table,
        profiles: &[ColumnProfile],
        numeric: &NumericColumns<'_>,
    ) -> Vec<Finding> {
        let Some(datetime) = profiles
            .iter()
            .find(|profile| profile.column_type == ColumnType::Datetime && profile.cardinality >= 3)
        else {
            return vec![Finding::absent(
                InsightKind::Trend,
                &[],
                "no datetime column with at least three distinct values",
            )];
        };
        let Some(column) = table.column(&datetime.name) else {
            return Vec::new();
        };
        if numeric.names.is_empty() {
            return vec![Finding::absent(
                InsightKind::Trend,
                &[datetime.name.as_str()],
                "no numeric target column",
            )];
        }
        let stamps = datetime_values(column);
        numeric
            .names
            .iter()
            .take(self.options.max_trend_targets)
            .map(|target| self.trend(&datetime.name, &stamps, target, numeric.get(target)))
            .collect()
    }

    pub fn trend(
        &self,
        datetime_column: &str,
        stamps: &[Option<NaiveDateTime>],
        target: &str,
        values: &[Option<f64>],
    ) -> Finding {
        let summary = match analyze_trend(stamps, values, self.options.flat_trend_threshold) {
            Ok(summary) => summary,
            Err(TrendGap::TooFewPoints) => {
                return Finding::absent(
                    InsightKind::Trend,
                    &[datetime_column, target],
                    "needs at least two distinct timestamps with values",
                );
            }
            Err(TrendGap::TooFewPeriods) => {
                return Finding::absent(
                    InsightKind::Trend,
                    &[datetime_column, target],
                    "needs at least three periods",
                );
            }
        };
        let tags = match summary.direction {
            TrendDirection::Increasing => vec![BusinessTag::Growth],
            TrendDirection::Decreasing => vec![BusinessTag::Decline, BusinessTag::Risk],
            TrendDirection::Flat => Vec::new(),
        };
        let periods = summary.periods.len();
        Finding::Found(InsightRecord {
            kind: InsightKind::Trend,
            columns: vec![target.to_string(), datetime_column.to_string()],
            headline: format!(
                "{target} is {} per {} ({:+.1}% of its mean per period)",
                summary.direction.as_str(),
                summary.granularity.as_str(),
                summary.slope.signum() * summary.strength * 100.0
            ),
            evidence: InsightEvidence::Trend {
                datetime_column: datetime_column.to_string(),
                granularity: summary.granularity,
                direction: summary.direction,
                strength: summary.strength,
                slope: summary.slope,
                r_squared: summary.r_squared,
                periods: summary.periods,
                forecast: summary.forecast,
            },
            confidence: confidence(periods, TREND_SATURATION, summary.r_squared),
            business_tags: tags,
        })
    }

    fn clusters(&self, numeric: &NumericColumns<'_>, rows: &[usize], total_rows: usize) -> Finding {
        let names = &numeric.names;
        if names.len() < 2 {
            return Finding::absent(InsightKind::Cluster, names, "needs two numeric features");
        }
        let features: Vec<Vec<f64>> = rows
            .iter()
            .filter_map(|&row| {
                names
                    .iter()
                    .map(|name| numeric.get(name).get(row).copied().flatten())
                    .collect::<Option<Vec<f64>>>()
            })
            .collect();
        if features.len() < self.options.cluster_min_rows {
            return Finding::absent(
                InsightKind::Cluster,
                names,
                format!(
                    "{} complete rows, clustering needs {}",
                    features.len(),
                    self.options.cluster_min_rows
                ),
            );
        }
        let Some(summary) =
            cluster_rows(&features, self.options.cluster_max_k, self.options.sample_seed)
        else {
            return Finding::absent(InsightKind::Cluster, names, "features have no spread");
        };
        Finding::Found(InsightRecord {
            kind: InsightKind::Cluster,
            columns: names.iter().map(|name| (*name).to_string()).collect(),
            headline: format!(
                "{} segments across {} numeric columns explain {:.0}% of variance",
                summary.k,
                names.len(),
                summary.explained_variance * 100.0
            ),
            evidence: InsightEvidence::Cluster {
                k: summary.k,
                sizes: summary.sizes,
                inertia: summary.inertia,
                explained_variance: summary.explained_variance,
                centroids: summary.centroids,
                sampled: rows.len() < total_rows,
            },
            confidence: confidence(
                features.len(),
                CLUSTER_SATURATION,
                summary.explained_variance,
            ),
            business_tags: vec![BusinessTag::Segmentation, BusinessTag::Opportunity],
        })
    }
}
