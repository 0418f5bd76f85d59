pub mod error;
pub mod medication;

pub use error::{ClinError, ErrorCategory, ErrorClassifier, InferenceError, Result};
pub use medication::{
    AnalysisStatus, DocumentAnalysis, InteractionResult, InteractionRule, MedicationMention,
    Severity,
};
