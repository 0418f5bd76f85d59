//! Structured Extraction Engine
//!
//! Orchestrates one generative extraction attempt with the heuristic
//! extractor as the deterministic fallback. The engine guarantees a
//! non-failing result: every generative problem (missing credentials,
//! transport error, malformed JSON, timeout) degrades silently to the
//! heuristic path, visible to the caller only as a quality change.

use std::time::Duration;

use tracing::debug;

use super::heuristic::extract_heuristic;
use crate::config::Config;
use crate::degrade;
use crate::inference::{self, InferenceRequest, SharedClient, strip_fences};
use crate::prompts;
use crate::types::{ClinError, MedicationMention, Result};

/// Generative-first medication extractor
pub struct ExtractionEngine {
    client: Option<SharedClient>,
    model: String,
    timeout: Duration,
}

impl ExtractionEngine {
    pub fn new(client: Option<SharedClient>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            model: model.into(),
            timeout,
        }
    }

    /// Build from configuration; absent credentials disable the
    /// generative attempt entirely.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = inference::build_client(&config.inference)?;
        Ok(Self::new(
            client,
            config.inference.model.clone(),
            Duration::from_secs(config.inference.timeout_secs),
        ))
    }

    /// Extract medication fields from free text. Never fails.
    pub async fn extract(&self, text: &str) -> MedicationMention {
        let Some(client) = &self.client else {
            debug!("No inference client configured, extracting heuristically");
            return extract_heuristic(text);
        };

        degrade::or_else(
            "medication extraction",
            degrade::with_timeout(
                self.timeout,
                self.generate(client, text),
                "medication extraction",
            ),
            || extract_heuristic(text),
        )
        .await
    }

    async fn generate(&self, client: &SharedClient, text: &str) -> Result<MedicationMention> {
        let prompt = prompts::extraction(text);
        let raw = client
            .generate(InferenceRequest::text(&self.model, &prompt))
            .await
            .map_err(ClinError::from)?;

        let mention: MedicationMention = serde_json::from_str(strip_fences(&raw))?;
        Ok(mention)
    }
}
