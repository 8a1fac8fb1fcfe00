//! Permission default and override repository implementation.
//!
//! The resolver issues the two lookups separately and in order; there is
//! deliberately no joined query merging override and default rows, so an
//! override stays a total replacement rather than a per-flag overlay.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use meridian_auth::provider::PermissionProvider;
use meridian_core::error::{AppError, ErrorKind};
use meridian_core::result::AppResult;
use meridian_entity::permission::{
    BusinessModule, PermissionDefault, PermissionOverride, PermissionSet,
};
use meridian_entity::user::UserRole;

/// Repository for permission defaults and per-user overrides.
#[derive(Debug, Clone)]
pub struct PermissionRepository {
    pool: PgPool,
}

impl PermissionRepository {
    /// Create a new permission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the override row for (user, module).
    pub async fn find_override_row(
        &self,
        user_id: Uuid,
        module: BusinessModule,
    ) -> AppResult<Option<PermissionOverride>> {
        sqlx::query_as::<_, PermissionOverride>(
            "SELECT * FROM permission_overrides WHERE user_id = $1 AND module = $2",
        )
        .bind(user_id)
        .bind(module)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find permission override", e)
        })
    }

    /// Find the default row for (role, module).
    pub async fn find_default_row(
        &self,
        role: UserRole,
        module: BusinessModule,
    ) -> AppResult<Option<PermissionDefault>> {
        sqlx::query_as::<_, PermissionDefault>(
            "SELECT * FROM permission_defaults WHERE role = $1 AND module = $2",
        )
        .bind(role)
        .bind(module)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find permission default", e)
        })
    }

    /// Insert or replace the override row for (user, module).
    ///
    /// Setting every flag to false is meaningful: an explicit no-access
    /// override, distinct from having no row at all.
    pub async fn upsert_override(
        &self,
        user_id: Uuid,
        module: BusinessModule,
        flags: PermissionSet,
        granted_by: Uuid,
    ) -> AppResult<PermissionOverride> {
        sqlx::query_as::<_, PermissionOverride>(
            "INSERT INTO permission_overrides \
             (user_id, module, can_view, can_create, can_edit, can_delete, can_approve, granted_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (user_id, module) DO UPDATE SET \
             can_view = EXCLUDED.can_view, can_create = EXCLUDED.can_create, \
             can_edit = EXCLUDED.can_edit, can_delete = EXCLUDED.can_delete, \
             can_approve = EXCLUDED.can_approve, granted_by = EXCLUDED.granted_by, \
             updated_at = NOW() \
             RETURNING *",
        )
        .bind(user_id)
        .bind(module)
        .bind(flags.view)
        .bind(flags.create)
        .bind(flags.edit)
        .bind(flags.delete)
        .bind(flags.approve)
        .bind(granted_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert permission override", e)
        })
    }

    /// Remove the override row for (user, module), restoring the role
    /// default. Returns whether a row existed.
    pub async fn delete_override(
        &self,
        user_id: Uuid,
        module: BusinessModule,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM permission_overrides WHERE user_id = $1 AND module = $2",
        )
        .bind(user_id)
        .bind(module)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete permission override", e)
        })?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PermissionProvider for PermissionRepository {
    async fn find_override(
        &self,
        user_id: Uuid,
        module: BusinessModule,
    ) -> AppResult<Option<PermissionSet>> {
        Ok(self
            .find_override_row(user_id, module)
            .await?
            .map(|row| row.flags()))
    }

    async fn find_default(
        &self,
        role: UserRole,
        module: BusinessModule,
    ) -> AppResult<Option<PermissionSet>> {
        Ok(self
            .find_default_row(role, module)
            .await?
            .map(|row| row.flags()))
    }
}
