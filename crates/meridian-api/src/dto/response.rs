//! Response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use meridian_entity::audit::AuditEntry;
use meridian_entity::permission::PermissionSet;
use meridian_entity::user::User;

/// Public view of a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Role name.
    pub role: String,
    /// Status name.
    pub status: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            role: user.role.to_string(),
            status: user.status.to_string(),
        }
    }
}

/// Body for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed bearer token.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: UserResponse,
}

/// Body for `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// User ID.
    pub user_id: Uuid,
    /// Login email.
    pub email: String,
    /// Role name.
    pub role: String,
    /// Module the permissions below were resolved for.
    pub module: String,
    /// Effective capability set for that module.
    pub permissions: PermissionSet,
}

/// Body for `POST /api/auth/mfa/enroll`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentResponse {
    /// Base32 shared secret for manual entry.
    pub secret: String,
    /// `otpauth://` URI for authenticator-app scanning.
    pub enrollment_uri: String,
}

/// Body for `GET /api/admin/audit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSearchResponse {
    /// Matching entries, newest first.
    pub entries: Vec<AuditEntry>,
}

/// Generic message body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}
