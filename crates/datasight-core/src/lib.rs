//! Analysis pipeline for datasight.
//!
//! [`Analyzer`] ties the classifier, chart engine, insight engine and
//! business synthesizer together, applies type overrides, and optionally
//! routes results through the narrative boundary and a [`ResultCache`].

pub mod analyzer;
pub mod cache;
pub mod fingerprint;
pub mod logging;
pub mod output;

pub use analyzer::{Analyzer, Overrides};
pub use cache::{CacheStats, ResultCache};
pub use fingerprint::{Fingerprint, fingerprint};
pub use logging::{LogConfig, LogFormat, init_logging, init_logging_with_writer, redact_value};
pub use output::{to_json, write_json, write_report};
