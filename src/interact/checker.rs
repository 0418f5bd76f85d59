//! Interaction Safety Checker
//!
//! Checks a newly-introduced medication against the patient's current
//! regimen: rule table first, generative fallback second.
//!
//! ## Fail-open policy
//!
//! When no rule matches and the generative path is unavailable or
//! unreliable, the checker returns the empty result instead of an error.
//! An unreachable safety backend must never block a medication addition;
//! the degraded check is logged so the omission stays auditable. This is
//! a deliberate product policy, not an oversight.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use super::rules::RuleTable;
use crate::config::Config;
use crate::degrade;
use crate::inference::{self, InferenceRequest, SharedClient, strip_fences};
use crate::prompts;
use crate::types::{ClinError, InteractionResult, Result};

/// Rule-first interaction checker with generative fallback
pub struct InteractionChecker {
    rules: Arc<RuleTable>,
    client: Option<SharedClient>,
    model: String,
    timeout: Duration,
}

impl InteractionChecker {
    pub fn new(
        rules: Arc<RuleTable>,
        client: Option<SharedClient>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            rules,
            client,
            model: model.into(),
            timeout,
        }
    }

    /// Build from configuration with the built-in rule table
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = inference::build_client(&config.inference)?;
        Ok(Self::new(
            Arc::new(RuleTable::builtin()),
            client,
            config.inference.model.clone(),
            Duration::from_secs(config.inference.timeout_secs),
        ))
    }

    /// Check `new_med` against `current_meds` in caller-supplied order.
    ///
    /// The first rule hit wins and ends the scan; later or more severe
    /// matches are not consulted. Only a fully rule-free regimen reaches
    /// the generative fallback.
    pub async fn check(&self, new_med: &str, current_meds: &[String]) -> InteractionResult {
        for current in current_meds {
            if let Some(rule) = self.rules.lookup(new_med, current) {
                let matched_name = title_case(current.trim());
                info!(
                    new_med,
                    matched = %matched_name,
                    severity = %rule.severity,
                    "Interaction rule matched"
                );
                return InteractionResult {
                    warning: Some(format!(
                        "Interaction detected with {matched_name}: {}",
                        rule.warning
                    )),
                    severity: Some(rule.severity),
                };
            }
        }

        let Some(client) = &self.client else {
            debug!("No inference client configured, interaction check fails open");
            return InteractionResult::none_found();
        };

        degrade::or_else(
            "interaction check",
            degrade::with_timeout(
                self.timeout,
                self.generate(client, new_med, current_meds),
                "interaction check",
            ),
            InteractionResult::none_found,
        )
        .await
    }

    async fn generate(
        &self,
        client: &SharedClient,
        new_med: &str,
        current_meds: &[String],
    ) -> Result<InteractionResult> {
        let prompt = prompts::interaction(new_med, current_meds);
        let raw = client
            .generate(InferenceRequest::text(&self.model, &prompt))
            .await
            .map_err(ClinError::from)?;

        let result: InteractionResult = serde_json::from_str(strip_fences(&raw))?;
        Ok(result)
    }
}

/// Uppercase the first letter of each whitespace-separated word
fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
