//! clinsight - Clinical Medication Intelligence
//!
//! Extracts structured medication facts from free-form clinical text and
//! checks newly-introduced medications against a patient's existing
//! regimen, with safe degradation when the inference backend is
//! unavailable or unreliable.
//!
//! ## Core Capabilities
//!
//! - **Structured Extraction**: generative-first field extraction with a
//!   deterministic regex/lexicon fallback
//! - **Interaction Safety**: static rule table first, generative check
//!   second, fail-open on backend trouble
//! - **Document Analysis**: ordered multi-model orchestration with
//!   bounded rate-limit retries
//! - **PHI Scrubbing**: placeholder redaction applied before any
//!   extracted content reaches a log sink
//!
//! ## Quick Start
//!
//! ```ignore
//! use clinsight::{ConfigLoader, ExtractionEngine};
//!
//! let config = ConfigLoader::load()?;
//! let engine = ExtractionEngine::from_config(&config)?;
//! let mention = engine.extract("Take 50mg metformin every morning").await;
//! ```
//!
//! ## Modules
//!
//! - [`extract`]: heuristic extractor and generative-first engine
//! - [`interact`]: interaction rule table and safety checker
//! - [`analyze`]: document analysis orchestrator
//! - [`scrub`]: PHI scrubbing
//! - [`inference`]: injected inference client abstraction
//! - [`audit`]: fire-and-forget audit trail sink

pub mod analyze;
pub mod audit;
pub mod config;
pub mod constants;
pub mod degrade;
pub mod extract;
pub mod inference;
pub mod interact;
pub mod prompts;
pub mod scrub;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{AnalysisConfig, Config, ConfigLoader, InferenceConfig};

// Error Types
pub use types::error::{ClinError, ErrorCategory, ErrorClassifier, InferenceError, Result};

// Domain Types
pub use types::medication::{
    AnalysisStatus, DocumentAnalysis, InteractionResult, InteractionRule, MedicationMention,
    Severity,
};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use analyze::DocumentAnalyzer;
pub use audit::{AuditSink, SharedAuditSink, TracingAuditSink};
pub use extract::{ExtractionEngine, extract_heuristic};
pub use inference::{InferenceClient, InferenceRequest, SharedClient};
pub use interact::{InteractionChecker, RuleTable};
pub use scrub::scrub;
