//! HTTP client for the generative-text completion endpoint.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Result;
use crate::error::ModelError;
use crate::models::config::ModelConfig;

/// Client for a `generateContent`-style completion endpoint.
///
/// One prompt in, raw completion text out. The timeout is built into the
/// underlying client; a failed call is reported once and never retried.
pub struct GenerativeClient {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl GenerativeClient {
    /// Build a client with the configured endpoint and timeout.
    pub fn new(config: &ModelConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_key: api_key.into().trim().to_string(),
            client,
        })
    }

    /// Send the prompt and return the raw completion text.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!("calling generative endpoint: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        debug!("generative endpoint response status: {}", status);

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body: body.chars().take(2000).collect(),
            });
        }

        let decoded: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ModelError::MalformedBody(e.to_string()))?;

        decoded.completion_text().ok_or(ModelError::EmptyCompletion)
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    fn completion_text(self) -> Option<String> {
        let text = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text;

        if text.is_empty() { None } else { Some(text) }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_decode_completion() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Box 2: ACME EXPORTS"}]}}
            ]
        }"#;

        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.completion_text().as_deref(),
            Some("Box 2: ACME EXPORTS")
        );
    }

    #[test]
    fn test_decode_missing_candidates() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.completion_text(), None);
    }

    #[test]
    fn test_decode_empty_part_text() {
        let body = r#"{"candidates": [{"content": {"parts": [{}]}}]}"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.completion_text(), None);
    }

    #[test]
    fn test_decode_candidate_without_content() {
        let body = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.completion_text(), None);
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: "prompt".to_string(),
                }],
            }],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "prompt");
    }
}
