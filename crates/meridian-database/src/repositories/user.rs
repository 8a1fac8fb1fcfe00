//! User repository implementation.
//!
//! The access-control core only reads accounts; user management proper
//! lives elsewhere in the application.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use meridian_auth::provider::UserProvider;
use meridian_core::error::{AppError, ErrorKind};
use meridian_core::result::AppResult;
use meridian_entity::user::User;

/// Repository for user account lookups.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    /// Find a user by login email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }
}

#[async_trait]
impl UserProvider for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_email(self, email).await
    }

    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(self, user_id).await
    }
}
