//! Inference Client Abstraction
//!
//! Defines the `InferenceClient` trait consumed by the extraction engine,
//! the interaction checker, and the document analysis orchestrator. Clients
//! are injected as constructor dependencies with explicit lifecycle; there
//! are no ambient singletons, so tests substitute fakes freely.
//!
//! ## Modules
//!
//! - `gemini`: remote generateContent HTTP provider
//! - `ollama`: local text-only provider
//! - `response`: fence stripping for generative output

pub mod gemini;
pub mod ollama;
mod response;

pub use gemini::GeminiClient;
pub use ollama::OllamaClient;
pub use response::strip_fences;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::InferenceConfig;
use crate::types::{ClinError, InferenceError, Result};

// =============================================================================
// Request Types
// =============================================================================

/// Binary document attachment for multimodal requests
#[derive(Debug, Clone, Copy)]
pub struct DocumentPayload<'a> {
    pub data: &'a [u8],
    pub mime_type: &'a str,
}

/// One generation request against a named model
#[derive(Debug, Clone, Copy)]
pub struct InferenceRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub payload: Option<DocumentPayload<'a>>,
}

impl<'a> InferenceRequest<'a> {
    /// Text-only request
    pub fn text(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            prompt,
            payload: None,
        }
    }

    /// Request carrying a document payload
    pub fn with_document(model: &'a str, prompt: &'a str, data: &'a [u8], mime_type: &'a str) -> Self {
        Self {
            model,
            prompt,
            payload: Some(DocumentPayload { data, mime_type }),
        }
    }
}

// =============================================================================
// Inference Client Trait
// =============================================================================

/// Text-generation capability contract.
///
/// Errors carry an [`crate::types::ErrorCategory`] so callers can
/// distinguish a retryable rate limit from every other failure.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Generate text for the given request
    async fn generate(
        &self,
        request: InferenceRequest<'_>,
    ) -> std::result::Result<String, InferenceError>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Shared client handle passed to the orchestration components
pub type SharedClient = Arc<dyn InferenceClient>;

/// Build a client from configuration.
///
/// Returns `Ok(None)` when the configured provider needs credentials and
/// none are present. Callers treat `None` as "generative path disabled" and
/// route directly to their deterministic or fail-open behavior.
pub fn build_client(config: &InferenceConfig) -> Result<Option<SharedClient>> {
    match config.provider.as_str() {
        "gemini" => match config.api_key.as_deref() {
            Some(key) if !key.is_empty() => {
                Ok(Some(Arc::new(GeminiClient::new(config, key)?)))
            }
            _ => Ok(None),
        },
        "ollama" => Ok(Some(Arc::new(OllamaClient::new(config)?))),
        other => Err(ClinError::Config(format!(
            "Unknown inference provider: {other}. Supported: gemini, ollama"
        ))),
    }
}
