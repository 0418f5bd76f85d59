//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Project config (clinsight.toml)
//! 3. Environment variables (CLINSIGHT_*, plus GEMINI_API_KEY for the key)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
