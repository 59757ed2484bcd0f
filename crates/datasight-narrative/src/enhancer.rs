//! The seam between structured results and text generators.

use std::time::Duration;

use async_trait::async_trait;
use datasight_model::NarrativeMode;

use crate::error::NarrativeError;

/// What an enhancer is asked to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeRequest {
    pub prompt: String,
    pub mode: NarrativeMode,
    pub timeout: Duration,
}

/// External text generator that turns a prompt into narrative prose.
///
/// Implementations only produce text; the caller owns timeouts, validation
/// and the fallback.
#[async_trait]
pub trait NarrativeEnhancer: Send + Sync {
    /// Short engine identifier recorded on the narrative.
    fn name(&self) -> &str;

    async fn enhance(&self, request: &NarrativeRequest) -> Result<String, NarrativeError>;
}
