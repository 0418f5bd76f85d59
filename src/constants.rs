//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Document analysis constants
pub mod analysis {
    /// Maximum attempts against one candidate model before advancing
    pub const MAX_ATTEMPTS_PER_MODEL: u32 = 3;

    /// Fixed wait after a rate-limit failure before retrying the same model (seconds)
    pub const RATE_LIMIT_BACKOFF_SECS: u64 = 4;

    /// Default candidate models in priority order
    pub const DEFAULT_MODELS: [&str; 2] = [
        "gemini-2.5-flash-preview-09-2025",
        "gemini-2.5-flash-image",
    ];
}

/// Generative call constants
pub mod inference {
    /// Default model for single-shot extraction and interaction checks
    pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

    /// Default request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Connection timeout (seconds)
    pub const CONNECTION_TIMEOUT_SECS: u64 = 30;
}
