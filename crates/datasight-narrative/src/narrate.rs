//! Bounded-time narrative enhancement with template fallback.

use std::time::{Duration, Instant};

use datasight_model::{AnalysisResult, Narrative, NarrativeOptions, NarrativeSource};
use tracing::{info, warn};

use crate::cancel::CancelToken;
use crate::enhancer::{NarrativeEnhancer, NarrativeRequest};
use crate::error::NarrativeError;
use crate::template::{build_prompt, key_findings, template_narrative};

/// Ask `enhancer` for text, enforcing the timeout, cancellation and the
/// minimum length.
pub async fn enhance_text(
    result: &AnalysisResult,
    enhancer: Option<&dyn NarrativeEnhancer>,
    options: &NarrativeOptions,
    cancel: &CancelToken,
) -> Result<Narrative, NarrativeError> {
    if !options.enabled {
        return Err(NarrativeError::Disabled);
    }
    let enhancer = enhancer.ok_or(NarrativeError::NoEnhancer)?;
    if cancel.is_cancelled() {
        return Err(NarrativeError::Cancelled);
    }
    let timeout = Duration::from_millis(options.timeout_ms);
    let request = NarrativeRequest {
        prompt: build_prompt(result, options.mode),
        mode: options.mode,
        timeout,
    };

    let outcome = tokio::select! {
        _ = cancel.cancelled() => Err(NarrativeError::Cancelled),
        outcome = tokio::time::timeout(timeout, enhancer.enhance(&request)) => match outcome {
            Ok(text) => text,
            Err(_) => Err(NarrativeError::Timeout { ms: options.timeout_ms }),
        },
    };
    let text = outcome?;

    let chars = text.trim().chars().count();
    if chars < options.min_response_chars {
        return Err(NarrativeError::TooShort {
            chars,
            min: options.min_response_chars,
        });
    }
    Ok(Narrative {
        mode: options.mode,
        source: NarrativeSource::Enhanced {
            engine: enhancer.name().to_string(),
        },
        text: text.trim().to_string(),
        key_findings: key_findings(result),
    })
}

/// Attach a narrative to `result`.
///
/// Any failure falls back to the template narrative and sets `degraded`;
/// nothing else on the result is touched.
pub async fn narrate(
    result: &mut AnalysisResult,
    enhancer: Option<&dyn NarrativeEnhancer>,
    options: &NarrativeOptions,
    cancel: &CancelToken,
) {
    let started = Instant::now();
    match enhance_text(result, enhancer, options, cancel).await {
        Ok(narrative) => {
            info!(
                engine = ?narrative.source,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "narrative enhanced"
            );
            result.narrative = Some(narrative);
            result.degraded = false;
        }
        Err(err) => {
            warn!(
                error = %err,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "narrative enhancement unavailable; using template"
            );
            let fallback = template_narrative(result, options.mode);
            result.narrative = Some(fallback);
            result.degraded = true;
        }
    }
}
