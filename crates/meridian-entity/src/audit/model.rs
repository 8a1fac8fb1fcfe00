//! Audit log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Outcome of a guarded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "audit_outcome", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    /// The request passed every check and the protected operation ran.
    Granted,
    /// The request was rejected; `reason` carries the denial kind.
    Denied,
}

impl AuditOutcome {
    /// Return the outcome as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
        }
    }
}

impl std::fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable audit log entry recording one access decision.
///
/// Append-only from this subsystem's perspective: entries are never
/// updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditEntry {
    /// Unique audit entry identifier.
    pub id: Uuid,
    /// The user who made the request. Nullable so entries survive user
    /// deletion, and absent when the caller could not be identified.
    pub actor_id: Option<Uuid>,
    /// The action that was attempted (e.g., `"orders:approve"`,
    /// `"auth:login"`).
    pub action: String,
    /// The type of target resource (e.g., `"order"`, `"session"`).
    pub target_type: String,
    /// Descriptor of the target resource (if applicable).
    pub target_id: Option<String>,
    /// Additional details about the decision (JSON).
    pub details: Option<serde_json::Value>,
    /// IP address of the caller.
    pub ip_address: Option<String>,
    /// User-Agent of the caller.
    pub user_agent: Option<String>,
    /// Whether access was granted or denied.
    pub outcome: AuditOutcome,
    /// Denial reason label (`None` on grants).
    pub reason: Option<String>,
    /// When the decision was made.
    pub created_at: DateTime<Utc>,
}

/// Data required to append a new audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuditEntry {
    /// The user who made the request (if identified).
    pub actor_id: Option<Uuid>,
    /// The action attempted.
    pub action: String,
    /// Target resource type.
    pub target_type: String,
    /// Target resource descriptor.
    pub target_id: Option<String>,
    /// Additional details.
    pub details: Option<serde_json::Value>,
    /// Caller's IP address.
    pub ip_address: Option<String>,
    /// Caller's User-Agent.
    pub user_agent: Option<String>,
    /// Whether access was granted or denied.
    pub outcome: AuditOutcome,
    /// Denial reason label.
    pub reason: Option<String>,
}
