//! Request bodies and query parameters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body for `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// One-time code, required once MFA is enabled for the account.
    #[serde(default)]
    pub mfa_code: Option<String>,
}

/// Body for `POST /api/auth/mfa/confirm`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MfaConfirmRequest {
    /// The secret handed out by the enroll endpoint.
    pub secret: String,
    /// Code from the authenticator app.
    pub code: String,
}

/// Query parameters for `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeParams {
    /// Module to resolve effective permissions for (default: reports).
    #[serde(default)]
    pub module: Option<String>,
}

/// Query parameters for `GET /api/admin/audit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSearchParams {
    /// Filter by actor.
    #[serde(default)]
    pub actor_id: Option<Uuid>,
    /// Filter by action label.
    #[serde(default)]
    pub action: Option<String>,
    /// Maximum entries to return (default 50, capped at 500).
    #[serde(default)]
    pub limit: Option<i64>,
}

impl AuditSearchParams {
    /// Effective limit with default and cap applied.
    pub fn effective_limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 500)
    }
}
