//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//! Provides error classification for retry and fallback decisions.
//!
//! ## Error Categories
//!
//! - **RateLimit**: API rate limiting (wait and retry the same model)
//! - **Auth**: Authentication failures (fail fast)
//! - **Network**: Connectivity issues (advance, do not retry)
//! - **Unavailable**: Model or service unavailable (advance)
//! - **ParseError**: Malformed generative output (treated as a hard failure)
//!
//! ## Design Principles
//!
//! - Single unified error type (ClinError) for the entire application
//! - Category-based routing: only rate limits are retried in place
//! - No panic/unwrap - all errors are recoverable

use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Unified error categories for retry and fallback decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rate limited - wait then retry the same model
    RateLimit,
    /// Authentication failed - fail fast, don't retry
    Auth,
    /// Network/connectivity issues
    Network,
    /// Model or service unavailable
    Unavailable,
    /// Invalid request - don't retry, fix request
    BadRequest,
    /// Parsing a generative response failed
    ParseError,
    /// Temporary server issues
    Transient,
    /// Unknown error
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::Transient => write!(f, "TRANSIENT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// =============================================================================
// Inference Error
// =============================================================================

/// Inference backend error with category, context, and retry hints
#[derive(Debug, Clone)]
pub struct InferenceError {
    /// Error category for routing decisions
    pub category: ErrorCategory,
    /// Detailed error message
    pub message: String,
    /// Provider that produced the error
    pub provider: Option<String>,
    /// HTTP status code, when the failure came from a response
    pub status: Option<u16>,
    /// Suggested wait time before retry (if applicable)
    pub retry_after: Option<Duration>,
}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for InferenceError {}

impl InferenceError {
    /// Create a new inference error
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
            status: None,
            retry_after: None,
        }
    }

    /// Create error with provider context
    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            provider: Some(provider.into()),
            status: None,
            retry_after: None,
        }
    }

    /// Attach the originating HTTP status code
    pub fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Add suggested retry delay
    pub fn retry_after(mut self, duration: Duration) -> Self {
        self.retry_after = Some(duration);
        self
    }

    /// Only rate limits are retried against the same model
    pub fn is_rate_limited(&self) -> bool {
        self.category == ErrorCategory::RateLimit
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Error classifier for retry and fallback routing
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an error message from any provider
    pub fn classify(message: &str, provider: &str) -> InferenceError {
        let lower = message.to_lowercase();

        // Rate limiting patterns
        if lower.contains("rate limit")
            || lower.contains("429")
            || lower.contains("too many requests")
            || lower.contains("quota exceeded")
            || lower.contains("resource_exhausted")
        {
            return InferenceError::with_provider(ErrorCategory::RateLimit, message, provider)
                .retry_after(Duration::from_secs(4));
        }

        // Authentication patterns
        if lower.contains("auth")
            || lower.contains("401")
            || lower.contains("403")
            || lower.contains("api key")
            || lower.contains("unauthorized")
            || lower.contains("permission denied")
        {
            return InferenceError::with_provider(ErrorCategory::Auth, message, provider);
        }

        // Network patterns
        if lower.contains("network")
            || lower.contains("connection")
            || lower.contains("dns")
            || lower.contains("timeout")
            || lower.contains("timed out")
            || lower.contains("unreachable")
        {
            return InferenceError::with_provider(ErrorCategory::Network, message, provider);
        }

        // Service unavailable patterns
        if lower.contains("503")
            || lower.contains("502")
            || lower.contains("service unavailable")
            || lower.contains("500")
            || lower.contains("internal error")
            || lower.contains("not found")
            || lower.contains("404")
        {
            return InferenceError::with_provider(ErrorCategory::Unavailable, message, provider);
        }

        // Bad request patterns
        if lower.contains("400")
            || lower.contains("bad request")
            || lower.contains("invalid")
            || lower.contains("malformed")
        {
            return InferenceError::with_provider(ErrorCategory::BadRequest, message, provider);
        }

        // Parse error patterns
        if lower.contains("parse")
            || lower.contains("json")
            || lower.contains("unexpected token")
        {
            return InferenceError::with_provider(ErrorCategory::ParseError, message, provider);
        }

        // Transient patterns (server-side issues that may resolve)
        if lower.contains("retry") || lower.contains("temporary") || lower.contains("overloaded") {
            return InferenceError::with_provider(ErrorCategory::Transient, message, provider);
        }

        InferenceError::with_provider(ErrorCategory::Unknown, message, provider)
    }

    /// Classify HTTP status code directly (more accurate than string matching)
    pub fn classify_http_status(status: u16, message: &str, provider: &str) -> InferenceError {
        let err = match status {
            429 => InferenceError::with_provider(ErrorCategory::RateLimit, message, provider)
                .retry_after(Duration::from_secs(4)),
            401 | 403 => InferenceError::with_provider(ErrorCategory::Auth, message, provider),
            400 => InferenceError::with_provider(ErrorCategory::BadRequest, message, provider),
            404 => InferenceError::with_provider(ErrorCategory::Unavailable, message, provider),
            500 | 502 | 503 | 504 => {
                InferenceError::with_provider(ErrorCategory::Transient, message, provider)
            }
            _ => InferenceError::with_provider(ErrorCategory::Unknown, message, provider),
        };
        err.status(status)
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ClinError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Inference Errors
    // -------------------------------------------------------------------------
    /// Structured inference error with category and retry hints
    #[error("inference error: {0}")]
    Inference(InferenceError),

    /// Operation timeout with context
    #[error("timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("config error: {0}")]
    Config(String),
}

impl From<InferenceError> for ClinError {
    fn from(err: InferenceError) -> Self {
        ClinError::Inference(err)
    }
}

pub type Result<T> = std::result::Result<T, ClinError>;

impl ClinError {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// View this error as an inference failure, classifying on the fly
    /// when it did not originate from a provider.
    pub fn as_inference(&self) -> InferenceError {
        match self {
            Self::Inference(e) => e.clone(),
            Self::Timeout { operation, .. } => InferenceError::new(
                ErrorCategory::Network,
                format!("timed out during {operation}"),
            ),
            Self::Json(e) => InferenceError::new(ErrorCategory::ParseError, e.to_string()),
            other => InferenceError::new(ErrorCategory::Unknown, other.to_string()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
