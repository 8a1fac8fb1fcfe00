//! MFA secret entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Enrollment state of a user's second factor.
///
/// `NotStarted` is the implicit state when no `mfa_secrets` row exists;
/// it is never stored. A row is only written at confirmation time, so a
/// persisted row is normally `Enabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "mfa_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MfaStatus {
    /// No enrollment has begun.
    NotStarted,
    /// A secret has been issued but not yet confirmed with a valid code.
    PendingVerification,
    /// Enrollment confirmed; login requires a one-time code.
    Enabled,
}

impl MfaStatus {
    /// Return the status as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::PendingVerification => "pending_verification",
            Self::Enabled => "enabled",
        }
    }
}

impl std::fmt::Display for MfaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's persisted shared secret.
///
/// Re-enrollment replaces the row wholesale — the old secret stops
/// validating the instant the new row is written.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MfaSecret {
    /// The user this secret belongs to (one row per user).
    pub user_id: Uuid,
    /// Base32-encoded shared secret.
    #[serde(skip_serializing)]
    pub secret: String,
    /// Enrollment status.
    pub status: MfaStatus,
    /// When the row was first written.
    pub created_at: DateTime<Utc>,
    /// When enrollment was confirmed.
    pub confirmed_at: Option<DateTime<Utc>>,
}
