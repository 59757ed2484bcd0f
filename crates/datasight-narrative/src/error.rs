use thiserror::Error;

/// Why an enhancer produced no usable narrative.
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("narrative enhancement is disabled")]
    Disabled,

    #[error("no narrative enhancer configured")]
    NoEnhancer,

    #[error("narrative enhancement timed out after {ms} ms")]
    Timeout { ms: u64 },

    #[error("narrative enhancement was cancelled")]
    Cancelled,

    #[error("request to narrative service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("narrative service returned status {status}")]
    Status { status: u16 },

    #[error("narrative response too short ({chars} chars, need {min})")]
    TooShort { chars: usize, min: usize },
}
