//! Permission default and override row models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::UserRole;

use super::module::BusinessModule;
use super::set::PermissionSet;

/// Seeded per-role capability defaults, unique per (role, module).
///
/// Read-mostly reference data: seeded once, consulted on every request
/// that has no matching override row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PermissionDefault {
    /// Unique row identifier.
    pub id: Uuid,
    /// The role the defaults apply to.
    pub role: UserRole,
    /// The module the defaults apply to.
    pub module: BusinessModule,
    /// Read capability.
    pub can_view: bool,
    /// Create capability.
    pub can_create: bool,
    /// Edit capability.
    pub can_edit: bool,
    /// Delete capability.
    pub can_delete: bool,
    /// Approve capability.
    pub can_approve: bool,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl PermissionDefault {
    /// Extract the capability flags.
    pub fn flags(&self) -> PermissionSet {
        PermissionSet::new(
            self.can_view,
            self.can_create,
            self.can_edit,
            self.can_delete,
            self.can_approve,
        )
    }
}

/// Per-user capability override, unique per (user, module).
///
/// When a row exists it replaces the role default *in its entirety* for
/// that module — including flags it sets to false. Absence of a row means
/// "no override", never "all false".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PermissionOverride {
    /// Unique row identifier.
    pub id: Uuid,
    /// The user the override applies to.
    pub user_id: Uuid,
    /// The module the override applies to.
    pub module: BusinessModule,
    /// Read capability.
    pub can_view: bool,
    /// Create capability.
    pub can_create: bool,
    /// Edit capability.
    pub can_edit: bool,
    /// Delete capability.
    pub can_delete: bool,
    /// Approve capability.
    pub can_approve: bool,
    /// The administrator who set the override.
    pub granted_by: Uuid,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl PermissionOverride {
    /// Extract the capability flags.
    pub fn flags(&self) -> PermissionSet {
        PermissionSet::new(
            self.can_view,
            self.can_create,
            self.can_edit,
            self.can_delete,
            self.can_approve,
        )
    }
}
