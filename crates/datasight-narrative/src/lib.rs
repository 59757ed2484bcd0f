//! Narrative enhancement boundary.
//!
//! The structured analysis result is complete without a narrative. This
//! crate optionally asks an external text generator for prose, bounded by a
//! timeout and a cancellation token, and falls back to a deterministic
//! template when the generator is disabled, slow, failing or terse.

pub mod cancel;
pub mod enhancer;
pub mod error;
pub mod narrate;
pub mod ollama;
pub mod template;

pub use cancel::CancelToken;
pub use enhancer::{NarrativeEnhancer, NarrativeRequest};
pub use error::NarrativeError;
pub use narrate::{enhance_text, narrate};
pub use ollama::{DEFAULT_BASE_URL, OllamaEnhancer, resolve_base_url};
pub use template::{build_prompt, key_findings, template_narrative};
