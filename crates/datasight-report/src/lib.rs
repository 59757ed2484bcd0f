//! Plain-text rendering of analysis results as terminal tables.
//!
//! Every renderer returns a `String`; callers decide where it goes.

mod business;
mod charts;
mod insights;
mod profiles;
mod style;
mod summary;

pub use business::{render_business, render_recommendations};
pub use charts::render_charts;
pub use insights::{render_insights, render_quality};
pub use profiles::{render_diagnostics, render_profiles};
pub use summary::render_summary;
