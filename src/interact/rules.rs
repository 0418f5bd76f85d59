//! Interaction Rule Engine
//!
//! Static symmetric-pair lookup over the built-in interaction knowledge
//! base. Keys are unordered pairs of normalized medication names, so a
//! lookup is commutative by construction. The table is immutable after
//! load and safe to share without locking.
//!
//! In production this would query a terminology service such as RxNorm;
//! the built-in table covers the highest-risk combinations.

use std::collections::HashMap;

use crate::types::{InteractionRule, Severity};

/// Unordered pair of lowercase, trimmed medication names
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MedPair(String, String);

impl MedPair {
    /// Normalize both names and order them canonically
    pub fn new(a: &str, b: &str) -> Self {
        let a = a.trim().to_lowercase();
        let b = b.trim().to_lowercase();
        if a <= b { Self(a, b) } else { Self(b, a) }
    }
}

/// Immutable interaction knowledge base
pub struct RuleTable {
    rules: HashMap<MedPair, InteractionRule>,
}

impl RuleTable {
    /// Build a table from (name, name, warning, severity) entries
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, &'static str, &'static str, Severity)>,
    {
        let rules = entries
            .into_iter()
            .map(|(a, b, warning, severity)| {
                (
                    MedPair::new(a, b),
                    InteractionRule {
                        warning: warning.to_string(),
                        severity,
                    },
                )
            })
            .collect();
        Self { rules }
    }

    /// The built-in knowledge base
    pub fn builtin() -> Self {
        Self::from_entries([
            // NSAID + NSAID
            (
                "aspirin",
                "ibuprofen",
                "Taking multiple NSAIDs increases risk of stomach bleeding.",
                Severity::Medium,
            ),
            (
                "advil",
                "aspirin",
                "Taking multiple NSAIDs increases risk of stomach bleeding.",
                Severity::Medium,
            ),
            // Warfarin combinations
            (
                "warfarin",
                "aspirin",
                "High risk of bleeding! Aspirin enhances the effect of Warfarin.",
                Severity::High,
            ),
            (
                "warfarin",
                "ibuprofen",
                "High risk of bleeding! Ibuprofen interferes with Warfarin.",
                Severity::High,
            ),
            // ACE inhibitor + potassium-sparing diuretic
            (
                "lisinopril",
                "spironolactone",
                "Risk of Hyperkalemia (High Potassium). Monitor blood levels.",
                Severity::Medium,
            ),
        ])
    }

    /// Unordered-pair membership test. `None` is the common case and not
    /// an error.
    pub fn lookup(&self, a: &str, b: &str) -> Option<&InteractionRule> {
        self.rules.get(&MedPair::new(a, b))
    }

    /// Iterate the normalized pairs in the table
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.keys().map(|MedPair(a, b)| (a.as_str(), b.as_str()))
    }
}
