//! Audit log repository implementation.
//!
//! Append and read only. Nothing in this repository updates or deletes
//! entries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use meridian_auth::provider::{AuditReader, AuditRecorder};
use meridian_core::error::{AppError, ErrorKind};
use meridian_core::result::AppResult;
use meridian_entity::audit::{AuditEntry, NewAuditEntry};

/// Repository for audit log entries.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an audit log entry.
    pub async fn create(&self, data: &NewAuditEntry) -> AppResult<AuditEntry> {
        sqlx::query_as::<_, AuditEntry>(
            "INSERT INTO audit_log \
             (actor_id, action, target_type, target_id, details, ip_address, user_agent, outcome, reason) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(data.actor_id)
        .bind(&data.action)
        .bind(&data.target_type)
        .bind(&data.target_id)
        .bind(&data.details)
        .bind(&data.ip_address)
        .bind(&data.user_agent)
        .bind(data.outcome)
        .bind(&data.reason)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create audit entry", e))
    }

    /// List recent entries, optionally filtered by actor and action,
    /// newest first.
    pub async fn search(
        &self,
        actor_id: Option<Uuid>,
        action: Option<&str>,
        limit: i64,
    ) -> AppResult<Vec<AuditEntry>> {
        sqlx::query_as::<_, AuditEntry>(
            "SELECT * FROM audit_log \
             WHERE ($1::UUID IS NULL OR actor_id = $1) \
             AND ($2::TEXT IS NULL OR action = $2) \
             ORDER BY created_at DESC LIMIT $3",
        )
        .bind(actor_id)
        .bind(action)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search audit log", e))
    }

    /// Count entries since a specific time.
    pub async fn count_since(&self, since: DateTime<Utc>) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM audit_log WHERE created_at >= $1")
                .bind(since)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        "Failed to count recent audit entries",
                        e,
                    )
                })?;
        Ok(count)
    }
}

#[async_trait]
impl AuditRecorder for AuditLogRepository {
    async fn append(&self, entry: &NewAuditEntry) -> AppResult<()> {
        self.create(entry).await.map(|_| ())
    }
}

#[async_trait]
impl AuditReader for AuditLogRepository {
    async fn search(
        &self,
        actor_id: Option<Uuid>,
        action: Option<&str>,
        limit: i64,
    ) -> AppResult<Vec<AuditEntry>> {
        AuditLogRepository::search(self, actor_id, action, limit).await
    }
}
