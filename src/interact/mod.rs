//! Interaction Safety
//!
//! Static rule lookup plus the rule-first, generative-fallback safety
//! checker.

mod checker;
mod rules;

pub use checker::InteractionChecker;
pub use rules::{MedPair, RuleTable};
