//! Second-factor enrollment state machine.
//!
//! Per user: `NotStarted → PendingVerification → Enabled`, with a
//! re-enroll transition `Enabled → PendingVerification`. Nothing is
//! persisted at `begin_enrollment` — the candidate secret travels with
//! the caller until a correct code proves the authenticator app has it,
//! at which point secret and status land in one atomic write. A
//! re-enrollment therefore supersedes the old secret the instant the new
//! row is written.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use meridian_core::config::mfa::MfaConfig;
use meridian_core::result::AppResult;
use meridian_entity::mfa::MfaStatus;

use crate::error::AuthError;
use crate::provider::MfaSecretProvider;

use super::totp;

/// Material handed to the user at the start of enrollment.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EnrollmentChallenge {
    /// Base32 shared secret, shown once for manual entry.
    pub secret: String,
    /// `otpauth://` URI for authenticator-app scanning.
    pub enrollment_uri: String,
}

/// Issues, confirms, and checks per-user shared secrets.
#[derive(Clone)]
pub struct MfaEnrollment {
    /// Secret persistence backend.
    secrets: Arc<dyn MfaSecretProvider>,
    /// Enrollment configuration (issuer label).
    config: MfaConfig,
}

impl std::fmt::Debug for MfaEnrollment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MfaEnrollment")
            .field("config", &self.config)
            .finish()
    }
}

impl MfaEnrollment {
    /// Creates a new enrollment engine.
    pub fn new(secrets: Arc<dyn MfaSecretProvider>, config: MfaConfig) -> Self {
        Self { secrets, config }
    }

    /// Starts (or restarts) enrollment for an account.
    ///
    /// Generates a fresh secret and the URI carrying label, issuer, and
    /// secret. Persists nothing: until confirmation the user's effective
    /// status is unchanged, and an abandoned challenge costs nothing.
    pub fn begin_enrollment(&self, account: &str) -> EnrollmentChallenge {
        let secret = totp::generate_secret();
        let enrollment_uri = format!(
            "otpauth://totp/{issuer}:{account}?secret={secret}&issuer={issuer}&algorithm=SHA1&digits={digits}&period={period}",
            issuer = self.config.issuer,
            digits = totp::CODE_DIGITS,
            period = totp::STEP_SECONDS,
        );
        EnrollmentChallenge {
            secret,
            enrollment_uri,
        }
    }

    /// Confirms enrollment with a code from the authenticator app.
    ///
    /// On a match within the drift window the secret is persisted and the
    /// user's status becomes `Enabled` in one atomic write. On a mismatch
    /// nothing changes and the caller must restart with
    /// [`Self::begin_enrollment`].
    pub async fn confirm_enrollment(
        &self,
        user_id: Uuid,
        secret: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        let matched = totp::verify(secret, code, now).map_err(AuthError::Internal)?;
        if !matched {
            return Err(AuthError::InvalidCode);
        }

        self.secrets
            .enable(user_id, secret, now)
            .await
            .map_err(AuthError::Internal)?;

        info!(user_id = %user_id, "MFA enrollment confirmed");
        Ok(())
    }

    /// Validates a login-time code against the currently enabled secret.
    ///
    /// A superseded secret stops validating as soon as re-enrollment
    /// replaces the row; a user with no enabled secret fails closed.
    pub async fn verify_code(
        &self,
        user_id: Uuid,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        let record = self
            .secrets
            .find(user_id)
            .await
            .map_err(AuthError::Internal)?;

        let record = match record {
            Some(r) if r.status == MfaStatus::Enabled => r,
            _ => return Err(AuthError::InvalidCode),
        };

        let matched = totp::verify(&record.secret, code, now).map_err(AuthError::Internal)?;
        if !matched {
            return Err(AuthError::InvalidCode);
        }
        Ok(())
    }

    /// Returns the user's enrollment status; `NotStarted` when no row
    /// exists.
    pub async fn status(&self, user_id: Uuid) -> AppResult<MfaStatus> {
        Ok(self
            .secrets
            .find(user_id)
            .await?
            .map(|r| r.status)
            .unwrap_or(MfaStatus::NotStarted))
    }

    /// Whether login must demand a one-time code for this user.
    pub async fn is_enabled(&self, user_id: Uuid) -> AppResult<bool> {
        Ok(self.status(user_id).await? == MfaStatus::Enabled)
    }
}
