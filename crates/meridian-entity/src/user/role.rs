//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the permission system.
///
/// A role carries the per-module permission defaults seeded in the
/// `permission_defaults` table; it is not itself a capability set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full system administrator.
    Admin,
    /// Oversees orders, production, and approvals.
    Manager,
    /// Works in the design module.
    Designer,
    /// Works in the finance module.
    Accountant,
    /// Works in CRM and order capture.
    Sales,
    /// Read-only access.
    Viewer,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Designer => "designer",
            Self::Accountant => "accountant",
            Self::Sales => "sales",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = meridian_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "designer" => Ok(Self::Designer),
            "accountant" => Ok(Self::Accountant),
            "sales" => Ok(Self::Sales),
            "viewer" => Ok(Self::Viewer),
            _ => Err(meridian_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, manager, designer, accountant, sales, viewer"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("DESIGNER".parse::<UserRole>().unwrap(), UserRole::Designer);
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_round_trip() {
        for role in [
            UserRole::Admin,
            UserRole::Manager,
            UserRole::Designer,
            UserRole::Accountant,
            UserRole::Sales,
            UserRole::Viewer,
        ] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
    }
}
