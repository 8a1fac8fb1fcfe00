//! Business module enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The business modules permissions are granted against.
///
/// Permission rows are keyed by (role, module) or (user, module); the
/// resolver computes one capability set per module per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "business_module", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BusinessModule {
    /// Customer relationship management.
    Crm,
    /// Sales orders.
    Orders,
    /// Production planning and tracking.
    Production,
    /// Design and artwork.
    Design,
    /// Stock and warehousing.
    Inventory,
    /// Invoicing and accounting.
    Finance,
    /// Reporting views.
    Reports,
    /// System administration (users, permissions, audit).
    Admin,
}

impl BusinessModule {
    /// Return the module as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crm => "crm",
            Self::Orders => "orders",
            Self::Production => "production",
            Self::Design => "design",
            Self::Inventory => "inventory",
            Self::Finance => "finance",
            Self::Reports => "reports",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for BusinessModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BusinessModule {
    type Err = meridian_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "crm" => Ok(Self::Crm),
            "orders" => Ok(Self::Orders),
            "production" => Ok(Self::Production),
            "design" => Ok(Self::Design),
            "inventory" => Ok(Self::Inventory),
            "finance" => Ok(Self::Finance),
            "reports" => Ok(Self::Reports),
            "admin" => Ok(Self::Admin),
            _ => Err(meridian_core::AppError::validation(format!(
                "Invalid business module: '{s}'"
            ))),
        }
    }
}
