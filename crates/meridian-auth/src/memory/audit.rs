//! In-memory audit recorder.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use meridian_core::error::AppError;
use meridian_core::result::AppResult;
use meridian_entity::audit::{AuditEntry, NewAuditEntry};

use crate::provider::{AuditReader, AuditRecorder};

/// Appends entries to an in-memory vector.
///
/// Can be switched into a failing mode to exercise the sink's
/// fire-and-forget behavior.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditRecorder {
    /// Appended entries, oldest first.
    entries: Arc<Mutex<Vec<AuditEntry>>>,
    /// When set, every append fails.
    fail_writes: Arc<Mutex<bool>>,
}

impl MemoryAuditRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent append fail (storage-outage simulation).
    pub async fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().await = fail;
    }

    /// Returns a snapshot of all appended entries.
    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().await.clone()
    }

    /// Returns the number of appended entries.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Returns whether nothing has been appended.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl AuditReader for MemoryAuditRecorder {
    async fn search(
        &self,
        actor_id: Option<Uuid>,
        action: Option<&str>,
        limit: i64,
    ) -> AppResult<Vec<AuditEntry>> {
        let entries = self.entries.lock().await;
        Ok(entries
            .iter()
            .rev()
            .filter(|e| actor_id.is_none_or(|id| e.actor_id == Some(id)))
            .filter(|e| action.is_none_or(|a| e.action == a))
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AuditRecorder for MemoryAuditRecorder {
    async fn append(&self, entry: &NewAuditEntry) -> AppResult<()> {
        if *self.fail_writes.lock().await {
            return Err(AppError::database("Audit storage unavailable"));
        }
        let mut entries = self.entries.lock().await;
        entries.push(AuditEntry {
            id: Uuid::new_v4(),
            actor_id: entry.actor_id,
            action: entry.action.clone(),
            target_type: entry.target_type.clone(),
            target_id: entry.target_id.clone(),
            details: entry.details.clone(),
            ip_address: entry.ip_address.clone(),
            user_agent: entry.user_agent.clone(),
            outcome: entry.outcome,
            reason: entry.reason.clone(),
            created_at: Utc::now(),
        });
        Ok(())
    }
}
