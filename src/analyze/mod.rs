//! Document Analysis
//!
//! Multi-model, retrying orchestration for whole-document structured
//! extraction.

mod orchestrator;
mod plan;

pub use orchestrator::DocumentAnalyzer;
pub use plan::{Attempt, AttemptPlan};
