//! MFA secret persistence seam.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use meridian_core::result::AppResult;
use meridian_entity::mfa::MfaSecret;

/// Backend for per-user shared secrets.
#[async_trait]
pub trait MfaSecretProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Find the user's secret row, if any.
    async fn find(&self, user_id: Uuid) -> AppResult<Option<MfaSecret>>;

    /// Persist `secret` with status `Enabled` for the user, replacing any
    /// existing row. Secret and status must land together — a concurrent
    /// reader sees either the old row or the fully-enabled new one, never
    /// a half-applied state.
    async fn enable(&self, user_id: Uuid, secret: &str, now: DateTime<Utc>) -> AppResult<()>;
}
