//! Statistical insight engine.
//!
//! Pure numeric building blocks (descriptive statistics, correlation,
//! outlier bounds, trend fitting, k-means) plus [`InsightEngine`], which runs
//! them over a classified table and collects one [`Finding`] per computation.

pub mod cluster;
pub mod confidence;
pub mod correlation;
pub mod descriptive;
pub mod engine;
pub mod outliers;
pub mod quality;
pub mod trend;

pub use cluster::{ClusterSummary, KMeansFit, cluster_rows, elbow_k, kmeans, standardize};
pub use confidence::{confidence, sample_adequacy};
pub use correlation::{is_significant, normal_quantile, paired, pearson};
pub use descriptive::{
    coefficient_of_variation, describe, excess_kurtosis, mean, median, quantile_sorted,
    skewness, sorted, std_dev, variance,
};
pub use engine::{Absence, Finding, InsightEngine, InsightRun};
pub use outliers::{OutlierSummary, detect_outliers, impact_level, iqr_outliers, zscore_outliers};
pub use quality::assess_quality;
pub use trend::{
    LinearFit, TrendGap, TrendSummary, aggregate, analyze_trend, detect_granularity, linear_fit,
    period_start,
};
