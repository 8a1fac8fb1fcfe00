//! Session store adapter over the persistence seam.
//!
//! Session state is checked on every request, with no caching of
//! "session valid" across requests: a store round-trip per request buys
//! immediate revocation effect, which is the right trade for an
//! access-control system.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use meridian_core::config::session::SessionConfig;
use meridian_core::result::AppResult;
use meridian_entity::session::{NewSession, Session};

use crate::provider::SessionProvider;

/// Session lookup, creation, and revocation.
#[derive(Clone)]
pub struct SessionStore {
    /// Session persistence backend.
    provider: Arc<dyn SessionProvider>,
    /// Session configuration.
    config: SessionConfig,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("config", &self.config)
            .finish()
    }
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(provider: Arc<dyn SessionProvider>, config: SessionConfig) -> Self {
        Self { provider, config }
    }

    /// Returns the newest session for the user that is neither revoked
    /// nor expired at `now`, or `None`.
    ///
    /// Revocation here is authoritative over the token's own expiry
    /// claim: a structurally valid token whose session has been revoked
    /// is rejected by the guard on the strength of this lookup.
    pub async fn lookup(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<Option<Session>> {
        self.provider.find_newest_active(user_id, now).await
    }

    /// Creates a new session expiring `ttl` from `now`.
    pub async fn create(
        &self,
        user_id: Uuid,
        ttl: Duration,
        ip_address: Option<String>,
        user_agent: Option<String>,
        now: DateTime<Utc>,
    ) -> AppResult<Session> {
        let session = NewSession {
            user_id,
            ip_address,
            user_agent,
            created_at: now,
            expires_at: now + ttl,
        };
        self.provider.insert(&session).await
    }

    /// Creates a new session using the configured TTL.
    pub async fn create_default(
        &self,
        user_id: Uuid,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> AppResult<Session> {
        let ttl = Duration::minutes(self.config.ttl_minutes as i64);
        self.create(user_id, ttl, ip_address, user_agent, Utc::now())
            .await
    }

    /// Revokes a session. Idempotent: revoking twice is a no-op.
    pub async fn revoke(&self, session_id: Uuid, now: DateTime<Utc>) -> AppResult<()> {
        self.provider.revoke(session_id, now).await
    }

    /// Revokes every live session for the user (logout-everywhere,
    /// password change, device compromise). Returns the count revoked.
    pub async fn revoke_all_for_user(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<u64> {
        self.provider.revoke_all_for_user(user_id, now).await
    }
}
