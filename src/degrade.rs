//! Degradation Primitives
//!
//! The "attempt the generative capability, degrade to a deterministic one
//! on classified failure" pattern recurs across the extraction engine and
//! the interaction checker. It lives here once, parameterized by the two
//! capabilities, instead of being re-spelled at every call site.
//!
//! A caller-level time budget is part of the same contract: a generative
//! call that outlives its budget is indistinguishable from a failed one,
//! so [`with_timeout`] feeds expiry into the same degradation path.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::types::{ClinError, Result};

/// Execute an async operation with a timeout.
///
/// Returns a timeout error if the operation doesn't complete within the
/// specified duration. The wait suspends the current task only; unrelated
/// requests keep making progress.
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(ClinError::timeout(operation_name, timeout)),
    }
}

/// Attempt the primary capability; on any failure, log the classified
/// error and produce the fallback value instead.
///
/// The caller never observes the primary failure as an error, only as an
/// implicit quality change in the result.
pub async fn or_else<T, F, Fb>(operation: &str, primary: F, fallback: Fb) -> T
where
    F: Future<Output = Result<T>>,
    Fb: FnOnce() -> T,
{
    match primary.await {
        Ok(value) => value,
        Err(err) => {
            let classified = err.as_inference();
            warn!(
                operation,
                category = %classified.category,
                error = %classified,
                "Generative path failed, degrading to deterministic fallback"
            );
            fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClinError;

    #[tokio::test]
    async fn test_or_else_passes_primary_success_through() {
        let value = or_else("test", async { Ok::<_, ClinError>(7) }, || 0).await;
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_or_else_degrades_on_failure() {
        let value = or_else(
            "test",
            async { Err::<i32, _>(ClinError::Config("boom".to_string())) },
            || 42,
        )
        .await;
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_with_timeout_success() {
        let result = with_timeout(
            Duration::from_secs(1),
            async { Ok::<_, ClinError>(42) },
            "test operation",
        )
        .await;
        assert_eq!(result.expect("ok"), 42);
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result = with_timeout(
            Duration::from_millis(10),
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<_, ClinError>(42)
            },
            "slow operation",
        )
        .await;
        assert!(matches!(result, Err(ClinError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_timeout_flows_into_degradation() {
        let value = or_else(
            "test",
            with_timeout(
                Duration::from_millis(10),
                async {
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    Ok::<_, ClinError>(1)
                },
                "slow generative call",
            ),
            || -1,
        )
        .await;
        assert_eq!(value, -1);
    }
}
