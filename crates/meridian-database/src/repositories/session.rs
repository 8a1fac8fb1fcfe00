//! Session repository implementation.
//!
//! Sessions are never deleted here: revocation is an `UPDATE` that sets
//! `revoked_at`, and the row stays behind for the audit trail.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use meridian_auth::provider::SessionProvider;
use meridian_core::error::{AppError, ErrorKind};
use meridian_core::result::AppResult;
use meridian_entity::session::{NewSession, Session};

/// Repository for session records.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a session by ID regardless of validity.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))
    }

    /// Find the newest non-revoked, non-expired session for a user.
    pub async fn find_newest_active(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions \
             WHERE user_id = $1 AND revoked_at IS NULL AND expires_at > $2 \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(user_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find active session", e)
        })
    }

    /// Create a new session.
    pub async fn create(&self, data: &NewSession) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (user_id, ip_address, user_agent, created_at, expires_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.ip_address)
        .bind(&data.user_agent)
        .bind(data.created_at)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create session", e))
    }

    /// Revoke a session. Idempotent: a second call matches zero rows and
    /// leaves the original `revoked_at` in place.
    pub async fn revoke_session(&self, session_id: Uuid, now: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE sessions SET revoked_at = $2 WHERE id = $1 AND revoked_at IS NULL")
            .bind(session_id)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to revoke session", e)
            })?;
        Ok(())
    }

    /// Revoke all live sessions for a user.
    pub async fn revoke_all_sessions_for_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE sessions SET revoked_at = $2 \
             WHERE user_id = $1 AND revoked_at IS NULL AND expires_at > $2",
        )
        .bind(user_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke user sessions", e)
        })?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl SessionProvider for SessionRepository {
    async fn find_newest_active(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Session>> {
        SessionRepository::find_newest_active(self, user_id, now).await
    }

    async fn find_by_id(&self, session_id: Uuid) -> AppResult<Option<Session>> {
        SessionRepository::find_by_id(self, session_id).await
    }

    async fn insert(&self, session: &NewSession) -> AppResult<Session> {
        self.create(session).await
    }

    async fn revoke(&self, session_id: Uuid, now: DateTime<Utc>) -> AppResult<()> {
        self.revoke_session(session_id, now).await
    }

    async fn revoke_all_for_user(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<u64> {
        self.revoke_all_sessions_for_user(user_id, now).await
    }
}
