//! Permission row lookup seam.

use async_trait::async_trait;
use uuid::Uuid;

use meridian_core::result::AppResult;
use meridian_entity::permission::{BusinessModule, PermissionSet};
use meridian_entity::user::UserRole;

/// Backend for permission default and override rows.
///
/// Both lookups return `Option<PermissionSet>`: `None` means the row does
/// not exist, which is a different statement from a row whose flags are
/// all false. The resolver depends on that distinction.
#[async_trait]
pub trait PermissionProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Find the per-user override row for (user, module).
    async fn find_override(
        &self,
        user_id: Uuid,
        module: BusinessModule,
    ) -> AppResult<Option<PermissionSet>>;

    /// Find the seeded default row for (role, module).
    async fn find_default(
        &self,
        role: UserRole,
        module: BusinessModule,
    ) -> AppResult<Option<PermissionSet>>;
}
