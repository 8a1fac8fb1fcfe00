//! The access guard: verify token, check session, check role, resolve
//! permissions, and audit the outcome — always.
//!
//! No protected operation runs unless every check passes, and every
//! guarded request produces exactly one audit entry whether it was
//! granted or denied. The entry is emitted by the guard itself, so a
//! faulty protected operation cannot skip it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use meridian_entity::audit::{AuditOutcome, NewAuditEntry};

use crate::audit::AuditSink;
use crate::error::AuthError;
use crate::permission::PermissionResolver;
use crate::session::SessionStore;
use crate::token::{CredentialVerifier, IdentityClaims};

use super::context::{AccessContext, GuardRequest};

/// Composes the verifier, session store, and resolver per request.
#[derive(Clone)]
pub struct AccessGuard {
    /// Bearer token verification.
    verifier: Arc<CredentialVerifier>,
    /// Server-side session checks.
    sessions: Arc<SessionStore>,
    /// Capability resolution.
    resolver: Arc<PermissionResolver>,
    /// Decision logging.
    audit: Arc<AuditSink>,
}

impl std::fmt::Debug for AccessGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGuard").finish()
    }
}

impl AccessGuard {
    /// Creates a new guard.
    pub fn new(
        verifier: Arc<CredentialVerifier>,
        sessions: Arc<SessionStore>,
        resolver: Arc<PermissionResolver>,
        audit: Arc<AuditSink>,
    ) -> Self {
        Self {
            verifier,
            sessions,
            resolver,
            audit,
        }
    }

    /// Decides one request.
    ///
    /// Check order, each short-circuiting:
    /// 1. Token signature and expiry.
    /// 2. Live session for the claimed user (revocation wins over the
    ///    token's own expiry claim).
    /// 3. Route role restriction, if declared.
    /// 4. Capability flag for the module, if demanded.
    ///
    /// Store faults deny the request (fail closed). The audit entry is
    /// written unconditionally before this method returns.
    pub async fn authorize(&self, request: GuardRequest<'_>) -> Result<AccessContext, AuthError> {
        let now = Utc::now();

        let verified = self.verifier.verify(request.token);
        let actor = verified.as_ref().ok().map(|claims| claims.sub);

        let result = match verified {
            Ok(claims) => self.check_authenticated(claims, &request, now).await,
            Err(e) => Err(e),
        };

        self.emit(&request, actor, &result).await;

        match &result {
            Ok(ctx) => {
                debug!(
                    user_id = %ctx.user_id,
                    module = %request.module,
                    action = %request.action,
                    "Access granted"
                );
            }
            Err(e) => {
                warn!(
                    actor_id = ?actor,
                    module = %request.module,
                    action = %request.action,
                    reason = e.reason_label(),
                    "Access denied"
                );
            }
        }

        result
    }

    /// Runs the post-verification checks.
    async fn check_authenticated(
        &self,
        claims: IdentityClaims,
        request: &GuardRequest<'_>,
        now: DateTime<Utc>,
    ) -> Result<AccessContext, AuthError> {
        let session = self
            .sessions
            .lookup(claims.sub, now)
            .await
            .map_err(AuthError::Internal)?
            .ok_or(AuthError::SessionInvalid)?;

        if let Some(roles) = request.required_roles {
            if !roles.contains(&claims.role) {
                return Err(AuthError::InsufficientRole {
                    actual: claims.role,
                });
            }
        }

        let permissions = match request.required_action {
            Some(action) => {
                self.resolver
                    .require(claims.sub, claims.role, request.module, action)
                    .await?
            }
            None => self
                .resolver
                .resolve(claims.sub, claims.role, request.module)
                .await
                .map_err(AuthError::Internal)?,
        };

        Ok(AccessContext {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
            session_id: session.id,
            permissions,
        })
    }

    /// Writes the single audit entry for this request.
    async fn emit(
        &self,
        request: &GuardRequest<'_>,
        actor: Option<uuid::Uuid>,
        result: &Result<AccessContext, AuthError>,
    ) {
        let (outcome, reason) = match result {
            Ok(_) => (AuditOutcome::Granted, None),
            Err(e) => (AuditOutcome::Denied, Some(e.reason_label().to_string())),
        };

        self.audit
            .record(NewAuditEntry {
                actor_id: actor,
                action: request.action.to_string(),
                target_type: request.target_type.to_string(),
                target_id: request.target_id.clone(),
                details: None,
                ip_address: request.origin.ip_address.clone(),
                user_agent: request.origin.user_agent.clone(),
                outcome,
                reason,
            })
            .await;
    }
}
