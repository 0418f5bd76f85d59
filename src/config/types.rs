//! Configuration Types
//!
//! All configuration structures with sensible defaults.

use serde::{Deserialize, Serialize};

use crate::constants::{analysis as analysis_constants, inference as inference_constants};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Inference provider settings
    pub inference: InferenceConfig,

    /// Document analysis settings
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `ClinError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if self.inference.timeout_secs == 0 {
            return Err(crate::types::ClinError::Config(
                "inference timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.analysis.models.is_empty() {
            return Err(crate::types::ClinError::Config(
                "analysis models list must not be empty".to_string(),
            ));
        }

        if self.analysis.max_attempts_per_model == 0 {
            return Err(crate::types::ClinError::Config(
                "analysis max_attempts_per_model must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Inference Configuration
// =============================================================================

/// Inference provider settings
///
/// Note: the API key is handled securely. It is never serialized to output
/// and is redacted in debug output; the provider converts it to a
/// SecretString internally for runtime protection.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Provider type: "gemini" or "ollama"
    pub provider: String,

    /// Model for single-shot extraction and interaction checks
    pub model: String,

    /// API key; absence disables the generative paths entirely
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// API base URL (for custom endpoints)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Request timeout in seconds; doubles as the per-call time budget
    /// for the orchestration components
    pub timeout_secs: u64,
}

impl std::fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: inference_constants::DEFAULT_MODEL.to_string(),
            api_key: None,
            api_base: None,
            timeout_secs: inference_constants::DEFAULT_TIMEOUT_SECS,
        }
    }
}

// =============================================================================
// Document Analysis Configuration
// =============================================================================

/// Document analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Candidate models in priority order
    pub models: Vec<String>,

    /// Attempts against one model before advancing to the next
    pub max_attempts_per_model: u32,

    /// Fixed wait after a rate-limit failure (seconds)
    pub rate_limit_backoff_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            models: analysis_constants::DEFAULT_MODELS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            max_attempts_per_model: analysis_constants::MAX_ATTEMPTS_PER_MODEL,
            rate_limit_backoff_secs: analysis_constants::RATE_LIMIT_BACKOFF_SECS,
        }
    }
}
