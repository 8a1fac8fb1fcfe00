//! Audit log persistence seams.

use async_trait::async_trait;
use uuid::Uuid;

use meridian_core::result::AppResult;
use meridian_entity::audit::{AuditEntry, NewAuditEntry};

/// Backend for the append-only audit log.
///
/// Implementations only ever append; updating or deleting entries is not
/// part of this contract.
#[async_trait]
pub trait AuditRecorder: Send + Sync + std::fmt::Debug + 'static {
    /// Append one entry.
    async fn append(&self, entry: &NewAuditEntry) -> AppResult<()>;
}

/// Read access to the audit log for the admin surface.
///
/// The core itself never reads the log; this seam exists for the guarded
/// admin route that exposes it.
#[async_trait]
pub trait AuditReader: Send + Sync + std::fmt::Debug + 'static {
    /// List recent entries, optionally filtered by actor and action,
    /// newest first.
    async fn search(
        &self,
        actor_id: Option<Uuid>,
        action: Option<&str>,
        limit: i64,
    ) -> AppResult<Vec<AuditEntry>>;
}
