//! Errand description polishing via a hosted text-generation API.
//!
//! [`DescriptionWriter::polish`] never fails: a missing API key or any
//! request error yields a fixed fallback string for the form field. Nothing
//! here touches order or account state.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

pub const FALLBACK_MISSING_KEY: &str = "Please enter a description manually (API key missing)";
pub const FALLBACK_FAILED: &str = "Description generation failed, please enter it manually";

/// Connection settings for the text-generation API.
#[derive(Debug, Clone)]
pub struct DescriptionConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum DescriptionError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Text API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The response had no usable text.
    #[error("Text API returned no candidates")]
    EmptyResponse,
}

// ---- wire types ----

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .map(|t| t.trim().to_string())
            .find(|t| !t.is_empty())
    }
}

/// Writes delivery remarks from a few customer keywords.
#[derive(Debug, Clone)]
pub struct DescriptionWriter {
    client: reqwest::Client,
    config: DescriptionConfig,
}

impl DescriptionWriter {
    pub fn new(config: DescriptionConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });
        Self { client, config }
    }

    /// Returns a polished description, or a fallback string on any failure.
    /// Blank keywords are returned unchanged without a request.
    #[instrument(skip(self))]
    pub async fn polish(&self, keywords: &str) -> String {
        if keywords.trim().is_empty() {
            return keywords.to_string();
        }
        let Some(api_key) = self.config.api_key.as_deref() else {
            warn!("API key not configured");
            return FALLBACK_MISSING_KEY.to_string();
        };

        match self.generate(api_key, keywords).await {
            Ok(text) => {
                debug!("Description generated");
                text
            }
            Err(e) => {
                error!(error = %e, "Text generation failed");
                FALLBACK_FAILED.to_string()
            }
        }
    }

    async fn generate(&self, api_key: &str, keywords: &str) -> Result<String, DescriptionError> {
        let prompt = prompt(keywords);
        let body = GenerateRequest {
            contents: vec![Content { parts: vec![Part { text: &prompt }] }],
        };
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        let response = self
            .client
            .post(url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DescriptionError::ApiError { status: status.as_u16(), body });
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.first_text().ok_or(DescriptionError::EmptyResponse)
    }
}

fn prompt(keywords: &str) -> String {
    format!(
        "User wants to send an item via courier. Keywords: \"{keywords}\". \
         Write a concise, professional delivery remark describing the item and \
         handling instructions (e.g. fragile, keep upright). Max 30 words."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>, base_url: &str) -> DescriptionConfig {
        DescriptionConfig {
            api_key: api_key.map(str::to_string),
            model: "test-model".to_string(),
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(2),
        }
    }

    #[tokio::test]
    async fn missing_key_returns_fallback() {
        let writer = DescriptionWriter::new(config(None, "http://127.0.0.1:9"));
        assert_eq!(writer.polish("glass vase").await, FALLBACK_MISSING_KEY);
    }

    #[tokio::test]
    async fn blank_keywords_pass_through() {
        let writer = DescriptionWriter::new(config(Some("k"), "http://127.0.0.1:9"));
        assert_eq!(writer.polish("  ").await, "  ");
    }

    #[tokio::test]
    async fn unreachable_endpoint_returns_fallback() {
        // Port 9 (discard) is not listening in test environments.
        let writer = DescriptionWriter::new(config(Some("k"), "http://127.0.0.1:9"));
        assert_eq!(writer.polish("glass vase").await, FALLBACK_FAILED);
    }

    #[test]
    fn extracts_first_non_empty_text() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "  "}]}},
                {"content": {"parts": [{"text": " Fragile glass vase, keep upright. "}]}}
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.first_text().as_deref(), Some("Fragile glass vase, keep upright."));
    }

    #[test]
    fn empty_candidates_yield_nothing() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.first_text(), None);
    }

    #[test]
    fn request_body_matches_api_shape() {
        let body = GenerateRequest {
            contents: vec![Content { parts: vec![Part { text: "hi" }] }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"contents": [{"parts": [{"text": "hi"}]}]}));
    }
}
