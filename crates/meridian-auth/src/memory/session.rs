//! In-memory session provider using a Tokio mutex.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use meridian_core::result::AppResult;
use meridian_entity::session::{NewSession, Session};

use crate::provider::SessionProvider;

/// In-memory session store keyed by session ID.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionProvider {
    /// Protected session map.
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl MemorySessionProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully formed session row, bypassing `NewSession`.
    /// Test hook for crafting expired or revoked sessions.
    pub async fn put(&self, session: Session) {
        self.sessions.lock().await.insert(session.id, session);
    }

    /// Returns the number of stored sessions (revoked ones included —
    /// sessions are never deleted).
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Returns whether no sessions are stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

#[async_trait]
impl SessionProvider for MemorySessionProvider {
    async fn find_newest_active(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Session>> {
        let sessions = self.sessions.lock().await;
        Ok(sessions
            .values()
            .filter(|s| s.user_id == user_id && s.is_valid_at(now))
            .max_by_key(|s| s.created_at)
            .cloned())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AppResult<Option<Session>> {
        Ok(self.sessions.lock().await.get(&session_id).cloned())
    }

    async fn insert(&self, new: &NewSession) -> AppResult<Session> {
        let session = Session {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            ip_address: new.ip_address.clone(),
            user_agent: new.user_agent.clone(),
            created_at: new.created_at,
            expires_at: new.expires_at,
            revoked_at: None,
        };
        self.sessions
            .lock()
            .await
            .insert(session.id, session.clone());
        Ok(session)
    }

    async fn revoke(&self, session_id: Uuid, now: DateTime<Utc>) -> AppResult<()> {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get_mut(&session_id) {
            if session.revoked_at.is_none() {
                session.revoked_at = Some(now);
            }
        }
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<u64> {
        let mut sessions = self.sessions.lock().await;
        let mut revoked = 0u64;
        for session in sessions.values_mut() {
            if session.user_id == user_id && session.is_valid_at(now) {
                session.revoked_at = Some(now);
                revoked += 1;
            }
        }
        Ok(revoked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_lookup_honors_ttl_boundary() {
        let provider = MemorySessionProvider::new();
        let user_id = Uuid::new_v4();
        let t0 = Utc::now();

        provider
            .insert(&NewSession {
                user_id,
                ip_address: None,
                user_agent: None,
                created_at: t0,
                expires_at: t0 + Duration::hours(1),
            })
            .await
            .unwrap();

        // Still there one minute before expiry.
        let at_59 = provider
            .find_newest_active(user_id, t0 + Duration::minutes(59))
            .await
            .unwrap();
        assert!(at_59.is_some());

        // Gone one minute after, regardless of any token's own expiry claim.
        let at_61 = provider
            .find_newest_active(user_id, t0 + Duration::minutes(61))
            .await
            .unwrap();
        assert!(at_61.is_none());
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent_and_preserves_first_timestamp() {
        let provider = MemorySessionProvider::new();
        let t0 = Utc::now();
        let session = provider
            .insert(&NewSession {
                user_id: Uuid::new_v4(),
                ip_address: None,
                user_agent: None,
                created_at: t0,
                expires_at: t0 + Duration::hours(1),
            })
            .await
            .unwrap();

        provider.revoke(session.id, t0).await.unwrap();
        provider
            .revoke(session.id, t0 + Duration::minutes(5))
            .await
            .unwrap();

        let stored = provider.find_by_id(session.id).await.unwrap().unwrap();
        assert_eq!(stored.revoked_at, Some(t0));
    }

    #[tokio::test]
    async fn test_newest_session_wins() {
        let provider = MemorySessionProvider::new();
        let user_id = Uuid::new_v4();
        let t0 = Utc::now();

        for minutes in [0i64, 10, 5] {
            provider
                .insert(&NewSession {
                    user_id,
                    ip_address: None,
                    user_agent: None,
                    created_at: t0 + Duration::minutes(minutes),
                    expires_at: t0 + Duration::hours(2),
                })
                .await
                .unwrap();
        }

        let newest = provider
            .find_newest_active(user_id, t0 + Duration::minutes(30))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(newest.created_at, t0 + Duration::minutes(10));
    }
}
