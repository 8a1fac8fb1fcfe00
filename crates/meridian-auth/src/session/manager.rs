//! Login and logout flows.
//!
//! Login is the one path that creates sessions; logout and the
//! revoke-everywhere hook are the paths that end them. Both are access
//! decisions in their own right, so both land in the audit trail just
//! like guarded requests do.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use meridian_core::error::AppError;
use meridian_entity::audit::{AuditOutcome, NewAuditEntry};
use meridian_entity::session::Session;
use meridian_entity::user::User;

use crate::audit::AuditSink;
use crate::guard::NetworkOrigin;
use crate::mfa::MfaEnrollment;
use crate::password::PasswordHasher;
use crate::provider::UserProvider;
use crate::token::TokenIssuer;

use super::store::SessionStore;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// Signed bearer token.
    pub token: String,
    /// Token expiry.
    pub token_expires_at: DateTime<Utc>,
    /// Created session.
    pub session: Session,
    /// The authenticated user.
    pub user: User,
}

/// Manages the session lifecycle around the credential check.
#[derive(Clone)]
pub struct SessionManager {
    /// User account lookups.
    users: Arc<dyn UserProvider>,
    /// Password verification.
    hasher: Arc<PasswordHasher>,
    /// Session persistence.
    sessions: Arc<SessionStore>,
    /// Token signing.
    issuer: Arc<TokenIssuer>,
    /// Second-factor checks.
    mfa: Arc<MfaEnrollment>,
    /// Decision logging.
    audit: Arc<AuditSink>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").finish()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        users: Arc<dyn UserProvider>,
        hasher: Arc<PasswordHasher>,
        sessions: Arc<SessionStore>,
        issuer: Arc<TokenIssuer>,
        mfa: Arc<MfaEnrollment>,
        audit: Arc<AuditSink>,
    ) -> Self {
        Self {
            users,
            hasher,
            sessions,
            issuer,
            mfa,
            audit,
        }
    }

    /// Performs the login flow:
    ///
    /// 1. Find the user by email.
    /// 2. Check account status.
    /// 3. Verify the Argon2 password hash.
    /// 4. If MFA is enabled, demand a valid one-time code.
    /// 5. Create a session and issue a bearer token.
    ///
    /// The same "Invalid email or password" message covers both an
    /// unknown email and a wrong password, so login attempts cannot
    /// probe which emails exist.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        mfa_code: Option<&str>,
        origin: NetworkOrigin,
    ) -> Result<LoginResult, AppError> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                self.audit_login(None, &origin, "unknown_email").await;
                return Err(AppError::unauthorized("Invalid email or password"));
            }
        };

        if !user.can_login() {
            self.audit_login(Some(user.id), &origin, "account_disabled")
                .await;
            return Err(AppError::forbidden(format!(
                "Account is {}",
                user.status.as_str()
            )));
        }

        if !self.hasher.verify_password(password, &user.password_hash)? {
            self.audit_login(Some(user.id), &origin, "bad_password").await;
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        if self.mfa.is_enabled(user.id).await? {
            let now = Utc::now();
            let code_ok = match mfa_code {
                Some(code) => self.mfa.verify_code(user.id, code, now).await.is_ok(),
                None => false,
            };
            if !code_ok {
                self.audit_login(Some(user.id), &origin, "invalid_code").await;
                return Err(AppError::unauthorized("One-time code required"));
            }
        }

        let session = self
            .sessions
            .create_default(
                user.id,
                origin.ip_address.clone(),
                origin.user_agent.clone(),
            )
            .await?;

        let (token, token_expires_at) = self.issuer.issue(user.id, &user.email, user.role)?;

        self.audit
            .record(NewAuditEntry {
                actor_id: Some(user.id),
                action: "auth:login".to_string(),
                target_type: "session".to_string(),
                target_id: Some(session.id.to_string()),
                details: None,
                ip_address: origin.ip_address.clone(),
                user_agent: origin.user_agent.clone(),
                outcome: AuditOutcome::Granted,
                reason: None,
            })
            .await;

        info!(user_id = %user.id, session_id = %session.id, "Login succeeded");

        Ok(LoginResult {
            token,
            token_expires_at,
            session,
            user,
        })
    }

    /// Revokes one session. Idempotent.
    pub async fn logout(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        origin: NetworkOrigin,
    ) -> Result<(), AppError> {
        let now = Utc::now();
        self.sessions.revoke(session_id, now).await?;

        self.audit
            .record(NewAuditEntry {
                actor_id: Some(user_id),
                action: "auth:logout".to_string(),
                target_type: "session".to_string(),
                target_id: Some(session_id.to_string()),
                details: None,
                ip_address: origin.ip_address,
                user_agent: origin.user_agent,
                outcome: AuditOutcome::Granted,
                reason: None,
            })
            .await;

        info!(user_id = %user_id, session_id = %session_id, "Logout");
        Ok(())
    }

    /// Revokes every live session for a user. Used on password change
    /// and compromise response; the caller supplies the acting user for
    /// the audit trail.
    pub async fn revoke_all(
        &self,
        actor_id: Uuid,
        user_id: Uuid,
        origin: NetworkOrigin,
    ) -> Result<u64, AppError> {
        let now = Utc::now();
        let revoked = self.sessions.revoke_all_for_user(user_id, now).await?;

        self.audit
            .record(NewAuditEntry {
                actor_id: Some(actor_id),
                action: "auth:revoke_all".to_string(),
                target_type: "user".to_string(),
                target_id: Some(user_id.to_string()),
                details: Some(serde_json::json!({ "revoked": revoked })),
                ip_address: origin.ip_address,
                user_agent: origin.user_agent,
                outcome: AuditOutcome::Granted,
                reason: None,
            })
            .await;

        info!(user_id = %user_id, revoked, "Revoked all sessions");
        Ok(revoked)
    }

    /// Records a denied login attempt.
    async fn audit_login(&self, actor_id: Option<Uuid>, origin: &NetworkOrigin, reason: &str) {
        self.audit
            .record(NewAuditEntry {
                actor_id,
                action: "auth:login".to_string(),
                target_type: "session".to_string(),
                target_id: None,
                details: None,
                ip_address: origin.ip_address.clone(),
                user_agent: origin.user_agent.clone(),
                outcome: AuditOutcome::Denied,
                reason: Some(reason.to_string()),
            })
            .await;
    }
}
