//! Ollama-backed enhancer using the non-streaming generate endpoint.

use std::env;

use async_trait::async_trait;
use datasight_model::NarrativeOptions;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::enhancer::{NarrativeEnhancer, NarrativeRequest};
use crate::error::NarrativeError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";
const MAX_TOKENS: u32 = 300;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Configured URL, else `OLLAMA_BASE_URL`, else the local default.
pub fn resolve_base_url(configured: Option<&str>) -> String {
    let base = configured
        .map(str::to_string)
        .or_else(|| env::var("OLLAMA_BASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    base.trim_end_matches('/').to_string()
}

pub struct OllamaEnhancer {
    http: Client,
    base: String,
    model: String,
    temperature: f64,
}

impl OllamaEnhancer {
    pub fn new(options: &NarrativeOptions) -> Result<Self, NarrativeError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_millis(options.timeout_ms))
            .build()?;
        Ok(Self {
            http,
            base: resolve_base_url(options.base_url.as_deref()),
            model: options.model.clone(),
            temperature: options.temperature,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }
}

#[async_trait]
impl NarrativeEnhancer for OllamaEnhancer {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn enhance(&self, request: &NarrativeRequest) -> Result<String, NarrativeError> {
        let url = format!("{}/api/generate", self.base);
        let body = GenerateRequest {
            model: &self.model,
            prompt: &request.prompt,
            stream: false,
            options: GenerateOptions {
                num_predict: MAX_TOKENS,
                temperature: self.temperature,
            },
        };
        let resp = self
            .http
            .post(url)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(NarrativeError::Status {
                status: resp.status().as_u16(),
            });
        }
        let body: GenerateResponse = resp.json().await?;
        Ok(body.response.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_url_wins_and_loses_trailing_slash() {
        assert_eq!(
            resolve_base_url(Some("http://models.internal:11434/")),
            "http://models.internal:11434"
        );
    }
}
