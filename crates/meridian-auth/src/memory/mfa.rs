//! In-memory MFA secret provider.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use meridian_core::result::AppResult;
use meridian_entity::mfa::{MfaSecret, MfaStatus};

use crate::provider::MfaSecretProvider;

/// In-memory secret rows keyed by user.
#[derive(Debug, Clone, Default)]
pub struct MemoryMfaSecretProvider {
    /// Protected secret map.
    secrets: Arc<Mutex<HashMap<Uuid, MfaSecret>>>,
}

impl MemoryMfaSecretProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MfaSecretProvider for MemoryMfaSecretProvider {
    async fn find(&self, user_id: Uuid) -> AppResult<Option<MfaSecret>> {
        Ok(self.secrets.lock().await.get(&user_id).cloned())
    }

    async fn enable(&self, user_id: Uuid, secret: &str, now: DateTime<Utc>) -> AppResult<()> {
        let mut secrets = self.secrets.lock().await;
        let created_at = secrets.get(&user_id).map(|r| r.created_at).unwrap_or(now);
        // Whole-row replacement under one lock: the reader sees either the
        // previous row or the fully enabled new one.
        secrets.insert(
            user_id,
            MfaSecret {
                user_id,
                secret: secret.to_string(),
                status: MfaStatus::Enabled,
                created_at,
                confirmed_at: Some(now),
            },
        );
        Ok(())
    }
}
