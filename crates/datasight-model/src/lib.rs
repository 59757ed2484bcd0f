pub mod business;
pub mod chart;
pub mod column;
pub mod error;
pub mod insight;
pub mod options;
pub mod result;

pub use business::{
    BusinessContext, BusinessDomain, DomainScore, Kpi, KpiUnit, Level, Recommendation,
    RecommendationCategory, RiskAssessment, RiskKind, RiskLevel, RiskScore,
};
pub use chart::{
    ChartBinding, ChartParams, ChartRecommendation, ChartRole, ChartType, InsightAngle,
    MarkDensity, ScoreBreakdown,
};
pub use column::{
    CategoricalSummary, ColumnDiagnostic, ColumnProfile, ColumnSummary, ColumnType,
    DatetimeSummary, LevelCount, NumericSummary, TextSummary, TypeEvidence,
};
pub use error::{AnalysisError, ConfigError, Result, TableError};
pub use insight::{
    BusinessTag, ConfidenceLevel, CorrelationBand, CorrelationDirection, DataQualityReport,
    Forecast, Granularity, ImpactLevel, InsightEvidence, InsightKind, InsightRecord,
    OutlierMethod, PeriodValue, QualityIssue, SkewClass, TrendDirection,
};
pub use options::{
    AnalysisOptions, BusinessOptions, ChartOptions, ClassifierOptions, InsightOptions,
    NarrativeOptions,
};
pub use result::{AnalysisResult, DatasetSummary, Narrative, NarrativeMode, NarrativeSource};
