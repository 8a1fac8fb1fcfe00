//! Effective permission resolution.
//!
//! Resolution order, strict and early-returning:
//! 1. Per-user override row — returned verbatim when present, even if
//!    every flag is false.
//! 2. Role default row.
//! 3. All-false.
//!
//! An override is a total replacement of the default for that module,
//! never a per-flag overlay: a single inspectable grant. The chain is an
//! explicit sequence of lookups, not a joined COALESCE query, so the
//! replacement semantics survive in the code shape.

use std::sync::Arc;

use uuid::Uuid;

use meridian_core::result::AppResult;
use meridian_entity::permission::{BusinessModule, PermissionAction, PermissionSet};
use meridian_entity::user::UserRole;

use crate::error::AuthError;
use crate::provider::PermissionProvider;

/// Computes the effective capability set for a (user, module) pair.
#[derive(Clone)]
pub struct PermissionResolver {
    /// Permission row backend.
    provider: Arc<dyn PermissionProvider>,
}

impl std::fmt::Debug for PermissionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionResolver").finish()
    }
}

impl PermissionResolver {
    /// Creates a new resolver.
    pub fn new(provider: Arc<dyn PermissionProvider>) -> Self {
        Self { provider }
    }

    /// Resolves the effective capability set.
    ///
    /// Missing rows never surface as errors: absence of both rows is the
    /// all-false set. A store fault is the only error path, and callers
    /// treat it as a denial, not an allowance.
    pub async fn resolve(
        &self,
        user_id: Uuid,
        role: UserRole,
        module: BusinessModule,
    ) -> AppResult<PermissionSet> {
        if let Some(flags) = self.provider.find_override(user_id, module).await? {
            return Ok(flags);
        }

        if let Some(flags) = self.provider.find_default(role, module).await? {
            return Ok(flags);
        }

        Ok(PermissionSet::none())
    }

    /// Resolves and demands a specific capability flag.
    pub async fn require(
        &self,
        user_id: Uuid,
        role: UserRole,
        module: BusinessModule,
        action: PermissionAction,
    ) -> Result<PermissionSet, AuthError> {
        let flags = self
            .resolve(user_id, role, module)
            .await
            .map_err(AuthError::Internal)?;

        if !flags.allows(action) {
            return Err(AuthError::PermissionDenied { module, action });
        }

        Ok(flags)
    }
}
