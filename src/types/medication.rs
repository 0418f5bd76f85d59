//! Clinical Domain Types
//!
//! Wire-facing shapes for extraction, interaction checking, and document
//! analysis. Field names are a de facto contract with downstream services
//! and must not change.

use serde::{Deserialize, Serialize};

// =============================================================================
// Medication Mention
// =============================================================================

/// A structured extraction of one medication from free text.
///
/// Any field may be absent. Absent means null on the wire, never a
/// placeholder string. A fresh value is produced per extraction call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationMention {
    #[serde(default)]
    pub name: Option<String>,
    /// Quantity plus unit, e.g. "50mg"
    #[serde(default)]
    pub dosage: Option<String>,
    /// Normalized clock time, e.g. "8:00 AM"
    #[serde(default)]
    pub time: Option<String>,
}

impl MedicationMention {
    /// True when extraction produced nothing at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.dosage.is_none() && self.time.is_none()
    }
}

// =============================================================================
// Interaction Severity
// =============================================================================

/// Interaction severity grades.
///
/// The rule table uses the full set; the generative fallback is prompted to
/// answer only HIGH or MEDIUM. Both value sets are accepted on parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Contraindicated,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Contraindicated => "CONTRAINDICATED",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Interaction Types
// =============================================================================

/// One entry of the static interaction knowledge base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRule {
    pub warning: String,
    pub severity: Severity,
}

/// Outcome of an interaction safety check.
///
/// `warning` and `severity` both `None` means "no actionable interaction
/// found". That is a valid result, not a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionResult {
    #[serde(default)]
    pub warning: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
}

impl InteractionResult {
    /// The fail-open outcome: no warning, no severity
    pub fn none_found() -> Self {
        Self::default()
    }

    pub fn is_clear(&self) -> bool {
        self.warning.is_none() && self.severity.is_none()
    }
}

// =============================================================================
// Document Analysis
// =============================================================================

/// Terminal status of a document analysis call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Success,
    Error,
}

/// Result of analyzing one document.
///
/// Exhaustion of every candidate model is reported here as `status: error`
/// with the last failure in `note`; it is never surfaced as a crate error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub status: AnalysisStatus,
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DocumentAnalysis {
    pub fn success(data: impl Into<String>) -> Self {
        Self {
            status: AnalysisStatus::Success,
            data: Some(data.into()),
            note: None,
        }
    }

    pub fn error(note: impl Into<String>) -> Self {
        Self {
            status: AnalysisStatus::Error,
            data: None,
            note: Some(note.into()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mention_missing_fields_deserialize_to_null() {
        let mention: MedicationMention =
            serde_json::from_str(r#"{"name": "Aspirin"}"#).expect("valid json");
        assert_eq!(mention.name.as_deref(), Some("Aspirin"));
        assert!(mention.dosage.is_none());
        assert!(mention.time.is_none());
    }

    #[test]
    fn test_mention_serializes_null_not_placeholder() {
        let mention = MedicationMention {
            name: Some("Metformin".to_string()),
            dosage: None,
            time: None,
        };
        let json = serde_json::to_value(&mention).expect("serialize");
        assert_eq!(json["name"], "Metformin");
        assert!(json["dosage"].is_null());
        assert!(json["time"].is_null());
    }

    #[test]
    fn test_severity_wire_format() {
        assert_eq!(
            serde_json::to_string(&Severity::Contraindicated).expect("serialize"),
            "\"CONTRAINDICATED\""
        );
        let parsed: Severity = serde_json::from_str("\"HIGH\"").expect("parse");
        assert_eq!(parsed, Severity::High);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::High < Severity::Contraindicated);
    }

    #[test]
    fn test_analysis_status_wire_format() {
        let ok = DocumentAnalysis::success("{}");
        let json = serde_json::to_value(&ok).expect("serialize");
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"], "{}");

        let err = DocumentAnalysis::error("all models exhausted");
        let json = serde_json::to_value(&err).expect("serialize");
        assert_eq!(json["status"], "error");
        assert!(json["data"].is_null());
        assert_eq!(json["note"], "all models exhausted");
    }

    #[test]
    fn test_interaction_result_none_found_is_clear() {
        assert!(InteractionResult::none_found().is_clear());
        let hit = InteractionResult {
            warning: Some("risk".to_string()),
            severity: Some(Severity::High),
        };
        assert!(!hit.is_clear());
    }
}
