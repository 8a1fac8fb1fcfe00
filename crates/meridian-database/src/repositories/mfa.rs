//! MFA secret repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use meridian_auth::provider::MfaSecretProvider;
use meridian_core::error::{AppError, ErrorKind};
use meridian_core::result::AppResult;
use meridian_entity::mfa::MfaSecret;

/// Repository for per-user shared secrets.
#[derive(Debug, Clone)]
pub struct MfaSecretRepository {
    pool: PgPool,
}

impl MfaSecretRepository {
    /// Create a new MFA secret repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the secret row for a user.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<MfaSecret>> {
        sqlx::query_as::<_, MfaSecret>("SELECT * FROM mfa_secrets WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find MFA secret", e)
            })
    }

    /// Persist a confirmed secret with status `Enabled`, replacing any
    /// prior row.
    ///
    /// A single upsert statement keeps secret and status atomic: a racing
    /// verification reads either the old row or the fully enabled new
    /// one, never a half-applied mix.
    pub async fn enable_secret(
        &self,
        user_id: Uuid,
        secret: &str,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO mfa_secrets (user_id, secret, status, created_at, confirmed_at) \
             VALUES ($1, $2, 'enabled', $3, $3) \
             ON CONFLICT (user_id) DO UPDATE SET \
             secret = EXCLUDED.secret, status = EXCLUDED.status, confirmed_at = EXCLUDED.confirmed_at",
        )
        .bind(user_id)
        .bind(secret)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to enable MFA secret", e))?;
        Ok(())
    }
}

#[async_trait]
impl MfaSecretProvider for MfaSecretRepository {
    async fn find(&self, user_id: Uuid) -> AppResult<Option<MfaSecret>> {
        self.find_by_user(user_id).await
    }

    async fn enable(&self, user_id: Uuid, secret: &str, now: DateTime<Utc>) -> AppResult<()> {
        self.enable_secret(user_id, secret, now).await
    }
}
