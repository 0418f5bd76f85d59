//! Document Analysis Orchestrator
//!
//! Drives structured extraction over a whole document through an ordered
//! list of candidate models. Rate limits retry the same model after a
//! fixed backoff; every other failure abandons the model and advances.
//! Exhaustion is reported as a structured error result, never raised,
//! because no deterministic fallback exists for document understanding.
//!
//! The successful result is scrubbed before it reaches the audit trail;
//! the caller receives the unscrubbed text. Scrubbing governs only the
//! log, not the API response.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::plan::AttemptPlan;
use crate::audit::{SharedAuditSink, TracingAuditSink};
use crate::config::Config;
use crate::degrade;
use crate::inference::{self, InferenceRequest, SharedClient, strip_fences};
use crate::prompts;
use crate::scrub::scrub;
use crate::types::{ClinError, DocumentAnalysis, InferenceError, Result};

/// Multi-model, retrying document analyzer
pub struct DocumentAnalyzer {
    client: Option<SharedClient>,
    audit: SharedAuditSink,
    models: Vec<String>,
    max_attempts_per_model: u32,
    backoff: Duration,
    timeout: Duration,
}

impl DocumentAnalyzer {
    pub fn new(
        client: Option<SharedClient>,
        audit: SharedAuditSink,
        models: Vec<String>,
        max_attempts_per_model: u32,
        backoff: Duration,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            audit,
            models,
            max_attempts_per_model,
            backoff,
            timeout,
        }
    }

    /// Build from configuration with the default tracing audit sink
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = inference::build_client(&config.inference)?;
        Ok(Self::new(
            client,
            std::sync::Arc::new(TracingAuditSink),
            config.analysis.models.clone(),
            config.analysis.max_attempts_per_model,
            Duration::from_secs(config.analysis.rate_limit_backoff_secs),
            Duration::from_secs(config.inference.timeout_secs),
        ))
    }

    /// Analyze one document. Always returns a structured result.
    pub async fn analyze(&self, document: &[u8], mime_type: &str) -> DocumentAnalysis {
        let Some(client) = &self.client else {
            return DocumentAnalysis::error("AI Analysis Failed: inference client not configured");
        };

        let prompt = prompts::document_analysis();
        let mut plan = AttemptPlan::new(&self.models, self.max_attempts_per_model);
        let mut last_error: Option<InferenceError> = None;

        while let Some(at) = plan.next_attempt() {
            debug!(model = at.model, attempt = at.attempt, "Document analysis attempt");

            let request = InferenceRequest::with_document(at.model, &prompt, document, mime_type);
            let outcome = degrade::with_timeout(
                self.timeout,
                async { client.generate(request).await.map_err(ClinError::from) },
                "document analysis",
            )
            .await;

            match outcome {
                Ok(raw) => {
                    let data = strip_fences(&raw).to_string();
                    info!(model = at.model, attempt = at.attempt, "Document analysis succeeded");
                    self.audit.record(&scrub(&data));
                    return DocumentAnalysis::success(data);
                }
                Err(err) => {
                    let classified = err.as_inference();
                    if classified.is_rate_limited() {
                        warn!(
                            model = at.model,
                            attempt = at.attempt,
                            backoff_secs = self.backoff.as_secs(),
                            "Rate limited, backing off before retry"
                        );
                        tokio::time::sleep(self.backoff).await;
                    } else {
                        warn!(
                            model = at.model,
                            attempt = at.attempt,
                            category = %classified.category,
                            error = %classified,
                            "Attempt failed, advancing to next model"
                        );
                        plan.skip_model();
                    }
                    last_error = Some(classified);
                }
            }
        }

        let note = match last_error {
            Some(err) => format!("AI Analysis Failed: {err}"),
            None => "AI Analysis Failed: no candidate models configured".to_string(),
        };
        DocumentAnalysis::error(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};

    use crate::audit::testing::MemoryAuditSink;
    use crate::inference::InferenceClient;
    use crate::types::{AnalysisStatus, ErrorCategory};

    type Reply = std::result::Result<String, ErrorCategory>;

    /// Fake client replaying per-model scripts; unscripted calls fail as
    /// unavailable.
    struct ScriptedClient {
        scripts: Mutex<HashMap<String, VecDeque<Reply>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(scripts: &[(&str, Vec<Reply>)]) -> Arc<Self> {
            Arc::new(Self {
                scripts: Mutex::new(
                    scripts
                        .iter()
                        .map(|(model, replies)| {
                            (model.to_string(), replies.iter().cloned().collect())
                        })
                        .collect(),
                ),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("calls lock").clone()
        }
    }

    #[async_trait]
    impl InferenceClient for ScriptedClient {
        async fn generate(
            &self,
            request: InferenceRequest<'_>,
        ) -> std::result::Result<String, InferenceError> {
            self.calls
                .lock()
                .expect("calls lock")
                .push(request.model.to_string());

            let reply = self
                .scripts
                .lock()
                .expect("scripts lock")
                .get_mut(request.model)
                .and_then(VecDeque::pop_front);

            match reply {
                Some(Ok(text)) => Ok(text),
                Some(Err(category)) => Err(InferenceError::new(category, "scripted failure")),
                None => Err(InferenceError::new(
                    ErrorCategory::Unavailable,
                    "unscripted model",
                )),
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn analyzer(
        client: Option<Arc<ScriptedClient>>,
        audit: Arc<MemoryAuditSink>,
        models: &[&str],
    ) -> DocumentAnalyzer {
        DocumentAnalyzer::new(
            client.map(|c| c as SharedClient),
            audit,
            models.iter().map(|m| m.to_string()).collect(),
            3,
            Duration::from_millis(1),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn persistent_rate_limits_exhaust_all_models_and_attempts() {
        let rate_limited = || vec![Err(ErrorCategory::RateLimit); 3];
        let client = ScriptedClient::new(&[("a", rate_limited()), ("b", rate_limited())]);
        let analyzer = analyzer(Some(client.clone()), Arc::default(), &["a", "b"]);

        let result = analyzer.analyze(b"doc", "application/pdf").await;

        assert_eq!(result.status, AnalysisStatus::Error);
        assert!(result.data.is_none());
        let note = result.note.expect("note");
        assert!(note.starts_with("AI Analysis Failed:"));
        assert_eq!(client.calls(), vec!["a", "a", "a", "b", "b", "b"]);
    }

    #[tokio::test]
    async fn second_model_success_never_reaches_third() {
        let client = ScriptedClient::new(&[
            ("a", vec![Err(ErrorCategory::Unavailable)]),
            ("b", vec![Ok("{\"tests\": []}".to_string())]),
        ]);
        let analyzer = analyzer(Some(client.clone()), Arc::default(), &["a", "b", "c"]);

        let result = analyzer.analyze(b"doc", "image/png").await;

        assert_eq!(result.status, AnalysisStatus::Success);
        assert_eq!(result.data.as_deref(), Some("{\"tests\": []}"));
        assert_eq!(client.calls(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn rate_limit_retries_the_same_model() {
        let client = ScriptedClient::new(&[(
            "a",
            vec![Err(ErrorCategory::RateLimit), Ok("{}".to_string())],
        )]);
        let analyzer = analyzer(Some(client.clone()), Arc::default(), &["a", "b"]);

        let result = analyzer.analyze(b"doc", "image/png").await;

        assert_eq!(result.status, AnalysisStatus::Success);
        assert_eq!(client.calls(), vec!["a", "a"]);
    }

    #[tokio::test]
    async fn non_rate_limit_failure_skips_remaining_attempts() {
        let client = ScriptedClient::new(&[
            ("a", vec![Err(ErrorCategory::BadRequest)]),
            ("b", vec![Ok("{}".to_string())]),
        ]);
        let analyzer = analyzer(Some(client.clone()), Arc::default(), &["a", "b"]);

        let result = analyzer.analyze(b"doc", "image/png").await;

        assert_eq!(result.status, AnalysisStatus::Success);
        // one attempt on the failing model, not three
        assert_eq!(client.calls(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn audit_receives_scrubbed_text_caller_receives_verbatim() {
        let raw = "```json\n{\"patient_name\": \"jane.doe@example.com\"}\n```";
        let client = ScriptedClient::new(&[("a", vec![Ok(raw.to_string())])]);
        let audit = Arc::new(MemoryAuditSink::default());
        let analyzer = analyzer(Some(client), audit.clone(), &["a"]);

        let result = analyzer.analyze(b"doc", "application/pdf").await;

        // fence-stripped but unscrubbed for the caller
        assert_eq!(
            result.data.as_deref(),
            Some("{\"patient_name\": \"jane.doe@example.com\"}")
        );

        let entries = audit.entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("[EMAIL]"));
        assert!(!entries[0].contains("jane.doe@example.com"));
    }

    #[tokio::test]
    async fn missing_client_reports_structured_error() {
        let analyzer = analyzer(None, Arc::default(), &["a"]);

        let result = analyzer.analyze(b"doc", "image/png").await;

        assert_eq!(result.status, AnalysisStatus::Error);
        assert!(result.note.expect("note").contains("not configured"));
    }
}
