//! Capability flag identifiers.

use serde::{Deserialize, Serialize};

/// The five orthogonal capability flags a permission row carries.
///
/// Each flag is an independent boolean, not a bit in a hierarchy:
/// `approve` does not imply `edit`, and `delete` does not imply `view`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionAction {
    /// Read records in the module.
    View,
    /// Create new records.
    Create,
    /// Modify existing records.
    Edit,
    /// Remove records.
    Delete,
    /// Approve records (orders, invoices, designs).
    Approve,
}

impl PermissionAction {
    /// Return the action as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Approve => "approve",
        }
    }
}

impl std::fmt::Display for PermissionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
