//! Audit sink: append-only, never in the request's way.
//!
//! A failed audit write degrades observability, not availability. The
//! sink logs the failure with enough structure to alert on and returns —
//! fire-and-forget, no retry. It can never fail or reverse the access
//! decision it is recording; that decision already happened.

use std::sync::Arc;

use tracing::error;

use meridian_entity::audit::NewAuditEntry;

use crate::provider::AuditRecorder;

/// Appends audit entries through the recorder backend.
#[derive(Clone)]
pub struct AuditSink {
    /// Append-only backend.
    recorder: Arc<dyn AuditRecorder>,
}

impl std::fmt::Debug for AuditSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditSink").finish()
    }
}

impl AuditSink {
    /// Creates a new sink.
    pub fn new(recorder: Arc<dyn AuditRecorder>) -> Self {
        Self { recorder }
    }

    /// Appends one entry. Infallible from the caller's perspective.
    pub async fn record(&self, entry: NewAuditEntry) {
        if let Err(e) = self.recorder.append(&entry).await {
            error!(
                error = %e,
                action = %entry.action,
                outcome = %entry.outcome,
                actor_id = ?entry.actor_id,
                "Audit write failed; entry dropped"
            );
        }
    }
}
