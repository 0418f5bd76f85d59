//! Gemini Remote Provider
//!
//! Inference client for the Gemini generateContent HTTP API. Supports
//! text-only prompts and inline document payloads (base64). HTTP statuses
//! are classified so the orchestrator can tell a rate limit apart from
//! every other failure.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{InferenceClient, InferenceRequest};
use crate::config::InferenceConfig;
use crate::constants::inference as inference_constants;
use crate::types::{ClinError, ErrorCategory, ErrorClassifier, InferenceError, Result};

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Gemini generateContent client
pub struct GeminiClient {
    api_base: String,
    api_key: SecretString,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: &InferenceConfig, api_key: &str) -> Result<Self> {
        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_base = Self::validate_endpoint(&api_base)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(
                inference_constants::CONNECTION_TIMEOUT_SECS,
            ))
            .build()
            .map_err(|e| ClinError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            api_base,
            api_key: SecretString::from(api_key.to_string()),
            client,
        })
    }

    /// Validate endpoint URL, allowing only http/https schemes
    fn validate_endpoint(endpoint: &str) -> Result<String> {
        let url = url::Url::parse(endpoint).map_err(|e| {
            ClinError::Config(format!("Invalid Gemini endpoint URL '{endpoint}': {e}"))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClinError::Config(format!(
                "Gemini endpoint must use http or https scheme, got: {}",
                url.scheme()
            )));
        }

        let mut result = url.to_string();
        if result.ends_with('/') {
            result.pop();
        }
        Ok(result)
    }

    fn build_request(&self, request: &InferenceRequest<'_>) -> GenerateContentRequest {
        let mut parts = Vec::with_capacity(2);
        // Document payload precedes the instruction text
        if let Some(payload) = &request.payload {
            parts.push(Part {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: payload.mime_type.to_string(),
                    data: BASE64.encode(payload.data),
                }),
            });
        }
        parts.push(Part {
            text: Some(request.prompt.to_string()),
            inline_data: None,
        });

        GenerateContentRequest {
            contents: vec![Content { parts }],
        }
    }
}

#[async_trait]
impl InferenceClient for GeminiClient {
    async fn generate(
        &self,
        request: InferenceRequest<'_>,
    ) -> std::result::Result<String, InferenceError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, request.model
        );
        let body = self.build_request(&request);

        debug!(model = request.model, "Sending Gemini request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    InferenceError::with_provider(
                        ErrorCategory::Network,
                        format!("Gemini request failed: {e}"),
                        "gemini",
                    )
                } else {
                    ErrorClassifier::classify(&format!("Gemini request failed: {e}"), "gemini")
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Gemini API error");
            return Err(ErrorClassifier::classify_http_status(
                status.as_u16(),
                &format!("Gemini API error: {body}"),
                "gemini",
            ));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            InferenceError::with_provider(
                ErrorCategory::ParseError,
                format!("Failed to parse Gemini response: {e}"),
                "gemini",
            )
        })?;

        parsed.first_text().ok_or_else(|| {
            InferenceError::with_provider(
                ErrorCategory::ParseError,
                "Gemini response contained no text candidate",
                "gemini",
            )
        })
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<String> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .find_map(|part| part.text.clone())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}
