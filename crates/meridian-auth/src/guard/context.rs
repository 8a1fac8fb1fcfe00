//! Request and result types for the access guard.

use uuid::Uuid;

use meridian_entity::permission::{BusinessModule, PermissionAction, PermissionSet};
use meridian_entity::user::UserRole;

/// Where a request came from, captured for the audit trail.
#[derive(Debug, Clone, Default)]
pub struct NetworkOrigin {
    /// Caller IP address as reported by the transport.
    pub ip_address: Option<String>,
    /// Caller User-Agent header.
    pub user_agent: Option<String>,
}

/// Everything the guard needs to decide one request.
#[derive(Debug, Clone)]
pub struct GuardRequest<'a> {
    /// The bearer token presented in the authorization header.
    pub token: &'a str,
    /// The business module the protected operation belongs to.
    pub module: BusinessModule,
    /// Audit action label (e.g., `"orders:approve"`).
    pub action: &'a str,
    /// Capability flag the operation demands, if any. `None` means the
    /// route only needs an authenticated caller (plus any role check).
    pub required_action: Option<PermissionAction>,
    /// Roles allowed on this route, if the route declares a restriction.
    pub required_roles: Option<&'a [UserRole]>,
    /// Target resource type for the audit trail.
    pub target_type: &'a str,
    /// Target resource descriptor for the audit trail.
    pub target_id: Option<String>,
    /// Network origin for the audit trail.
    pub origin: NetworkOrigin,
}

/// The enriched context handed to a protected operation after every
/// check has passed.
#[derive(Debug, Clone)]
pub struct AccessContext {
    /// The authenticated user.
    pub user_id: Uuid,
    /// Login email from the verified claims.
    pub email: String,
    /// Role from the verified claims.
    pub role: UserRole,
    /// The live session backing this request.
    pub session_id: Uuid,
    /// Effective capability set for the request's module.
    pub permissions: PermissionSet,
}
