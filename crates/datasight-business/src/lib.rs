//! Business context synthesizer.
//!
//! Turns column profiles and statistical insights into a detected business
//! domain, domain KPIs, a risk assessment and prioritized recommendations.

pub mod domain;
pub mod kpi;
pub mod recommend;
pub mod risk;
pub mod synthesizer;

pub use domain::{detect_domain, keywords, name_matches, token_matches, tokenize};
pub use kpi::{ColumnFinder, compute_kpis};
pub use recommend::{priority, recommend, roi};
pub use risk::{
    assess_risk, concentration_risk, data_quality_risk, normalized_gini, volatility_risk,
};
pub use synthesizer::{BusinessOutcome, BusinessSynthesizer};
