//! Audit Trail Sink
//!
//! Fire-and-forget sink for scrubbed analysis output. Recording is
//! infallible from the caller's point of view; a sink that cannot deliver
//! drops the entry rather than failing the clinical operation. Only
//! scrubbed text may be handed to a sink.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

/// Audit trail capability
pub trait AuditSink: Send + Sync {
    /// Record one scrubbed entry
    fn record(&self, text: &str);
}

/// Shared sink handle
pub type SharedAuditSink = Arc<dyn AuditSink>;

/// Default sink: emits entries to the `audit` tracing target with an
/// explicit UTC timestamp.
#[derive(Debug, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, text: &str) {
        info!(target: "audit", at = %Utc::now().to_rfc3339(), entry = text);
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryAuditSink;
    use super::*;

    #[test]
    fn test_tracing_sink_is_fire_and_forget() {
        // No subscriber installed; recording must still be a no-op success
        TracingAuditSink.record("scrubbed entry");
    }

    #[test]
    fn test_memory_sink_captures_entries() {
        let sink = MemoryAuditSink::default();
        sink.record("first");
        sink.record("second");
        assert_eq!(sink.entries(), vec!["first", "second"]);
    }
}
