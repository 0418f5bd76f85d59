//! Ollama Local Provider
//!
//! Text-only inference client for a locally-running Ollama daemon. Needs
//! no credentials, so configuring it keeps the generative paths active in
//! air-gapped deployments. Document payloads are rejected as unsupported.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{InferenceClient, InferenceRequest};
use crate::config::InferenceConfig;
use crate::constants::inference as inference_constants;
use crate::types::{ClinError, ErrorCategory, ErrorClassifier, InferenceError, Result};

const DEFAULT_API_BASE: &str = "http://localhost:11434";

/// Ollama local inference client
pub struct OllamaClient {
    api_base: String,
    client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
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

        Ok(Self { api_base, client })
    }

    /// Validate endpoint URL, warning for non-localhost hosts
    fn validate_endpoint(endpoint: &str) -> Result<String> {
        let url = url::Url::parse(endpoint).map_err(|e| {
            ClinError::Config(format!("Invalid Ollama endpoint URL '{endpoint}': {e}"))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClinError::Config(format!(
                "Ollama endpoint must use http or https scheme, got: {}",
                url.scheme()
            )));
        }

        if let Some(host) = url.host_str()
            && !matches!(host, "localhost" | "127.0.0.1" | "::1")
        {
            warn!(
                "Ollama endpoint is not localhost: {}. Ensure this is intentional.",
                host
            );
        }

        let mut result = url.to_string();
        if result.ends_with('/') {
            result.pop();
        }
        Ok(result)
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    async fn generate(
        &self,
        request: InferenceRequest<'_>,
    ) -> std::result::Result<String, InferenceError> {
        if request.payload.is_some() {
            return Err(InferenceError::with_provider(
                ErrorCategory::BadRequest,
                "Ollama provider does not accept document payloads",
                "ollama",
            ));
        }

        let url = format!("{}/api/generate", self.api_base);
        let body = OllamaRequest {
            model: request.model.to_string(),
            prompt: request.prompt.to_string(),
            stream: false,
        };

        debug!(model = request.model, "Sending Ollama request");

        let response = self.client.post(&url).json(&body).send().await.map_err(|e| {
            if e.is_connect() {
                InferenceError::with_provider(
                    ErrorCategory::Network,
                    format!(
                        "Failed to connect to Ollama at {}. Is Ollama running? Start with: ollama serve",
                        self.api_base
                    ),
                    "ollama",
                )
            } else {
                ErrorClassifier::classify(&format!("Ollama request failed: {e}"), "ollama")
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::classify_http_status(
                status.as_u16(),
                &format!("Ollama API error: {body}"),
                "ollama",
            ));
        }

        let parsed: OllamaResponse = response.json().await.map_err(|e| {
            InferenceError::with_provider(
                ErrorCategory::ParseError,
                format!("Failed to parse Ollama response: {e}"),
                "ollama",
            )
        })?;

        Ok(parsed.response)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InferenceConfig;

    #[test]
    fn test_default_endpoint() {
        let config = InferenceConfig {
            provider: "ollama".to_string(),
            ..Default::default()
        };
        let client = OllamaClient::new(&config).expect("client");
        assert_eq!(client.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_trailing_slash_removed() {
        let config = InferenceConfig {
            provider: "ollama".to_string(),
            api_base: Some("http://localhost:11434/".to_string()),
            ..Default::default()
        };
        let client = OllamaClient::new(&config).expect("client");
        assert_eq!(client.api_base, DEFAULT_API_BASE);
    }

    #[tokio::test]
    async fn test_document_payload_rejected() {
        let config = InferenceConfig {
            provider: "ollama".to_string(),
            ..Default::default()
        };
        let client = OllamaClient::new(&config).expect("client");
        let request = InferenceRequest::with_document("llama3", "analyze", b"bytes", "image/png");

        let err = client.generate(request).await.expect_err("must reject");
        assert_eq!(err.category, ErrorCategory::BadRequest);
        assert!(!err.is_rate_limited());
    }
}
