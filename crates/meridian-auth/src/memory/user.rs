//! In-memory user provider.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use meridian_core::result::AppResult;
use meridian_entity::user::User;

use crate::provider::UserProvider;

/// In-memory user accounts keyed by ID.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserProvider {
    /// Protected user map.
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl MemoryUserProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a user row.
    pub async fn put(&self, user: User) {
        self.users.lock().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserProvider for MemoryUserProvider {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().await.get(&user_id).cloned())
    }
}
