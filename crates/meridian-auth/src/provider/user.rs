//! User lookup seam for the login flow.

use async_trait::async_trait;
use uuid::Uuid;

use meridian_core::result::AppResult;
use meridian_entity::user::User;

/// Backend for user account lookups.
#[async_trait]
pub trait UserProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by login email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by ID.
    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>>;
}
