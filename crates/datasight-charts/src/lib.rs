//! Chart recommendation engine.
//!
//! Each chart type declares a type-signature gate over column profiles.
//! Gate-passing candidates are scored on fit, sample adequacy and dataset
//! size, then ranked deterministically by [`ChartEngine`].

pub mod engine;
pub mod gate;
pub mod score;

pub use engine::{ChartEngine, best_per_angle, compare_recommendations};
pub use gate::{Candidate, candidates};
pub use score::{
    adequacy, continuous_fit, discrete_fit, min_rows, normalized_entropy, size_modifier,
    sturges_bins,
};
