//! In-memory permission provider.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use meridian_core::result::AppResult;
use meridian_entity::permission::{BusinessModule, PermissionSet};
use meridian_entity::user::UserRole;

use crate::provider::PermissionProvider;

/// In-memory default and override rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryPermissionProvider {
    /// Seeded (role, module) defaults.
    defaults: Arc<Mutex<HashMap<(UserRole, BusinessModule), PermissionSet>>>,
    /// Per-user (user, module) overrides.
    overrides: Arc<Mutex<HashMap<(Uuid, BusinessModule), PermissionSet>>>,
}

impl MemoryPermissionProvider {
    /// Creates an empty provider: every lookup falls through to deny.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a (role, module) default row.
    pub async fn seed_default(&self, role: UserRole, module: BusinessModule, flags: PermissionSet) {
        self.defaults.lock().await.insert((role, module), flags);
    }

    /// Seeds a (user, module) override row. Seeding `PermissionSet::none()`
    /// is meaningful: an explicit no-access override.
    pub async fn seed_override(
        &self,
        user_id: Uuid,
        module: BusinessModule,
        flags: PermissionSet,
    ) {
        self.overrides.lock().await.insert((user_id, module), flags);
    }
}

#[async_trait]
impl PermissionProvider for MemoryPermissionProvider {
    async fn find_override(
        &self,
        user_id: Uuid,
        module: BusinessModule,
    ) -> AppResult<Option<PermissionSet>> {
        Ok(self.overrides.lock().await.get(&(user_id, module)).copied())
    }

    async fn find_default(
        &self,
        role: UserRole,
        module: BusinessModule,
    ) -> AppResult<Option<PermissionSet>> {
        Ok(self.defaults.lock().await.get(&(role, module)).copied())
    }
}
