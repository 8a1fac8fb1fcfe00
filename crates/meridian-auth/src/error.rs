//! The denial taxonomy for guarded requests.
//!
//! Every variant is a recoverable, caller-visible condition; none of them
//! escapes to the transport layer as a raw error. Infrastructure faults
//! are wrapped in [`AuthError::Internal`] and fail closed: the request is
//! denied, never waved through.

use thiserror::Error;

use meridian_core::error::AppError;
use meridian_entity::permission::{BusinessModule, PermissionAction};
use meridian_entity::user::UserRole;

/// Why a guarded request (or an MFA confirmation) was rejected.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The bearer token could not be parsed at all.
    #[error("bearer token is malformed")]
    TokenMalformed,

    /// The token parsed but its signature does not verify.
    #[error("bearer token signature is invalid")]
    TokenInvalid,

    /// The token verified but its expiry claim is in the past.
    #[error("bearer token has expired")]
    TokenExpired,

    /// No live session backs the token: revoked, expired, or never created.
    #[error("session is revoked, expired, or absent")]
    SessionInvalid,

    /// The caller's role is not in the route's required-role set.
    #[error("role '{actual}' is not permitted for this operation")]
    InsufficientRole {
        /// The caller's actual role.
        actual: UserRole,
    },

    /// The resolved capability set lacks the flag the operation demands.
    #[error("module '{module}' does not grant '{action}'")]
    PermissionDenied {
        /// The module the operation belongs to.
        module: BusinessModule,
        /// The missing capability flag.
        action: PermissionAction,
    },

    /// A one-time code did not match within the drift window.
    #[error("one-time code was rejected")]
    InvalidCode,

    /// A backing store failed; the request is denied rather than allowed
    /// through on missing data.
    #[error("access-control store failure")]
    Internal(#[source] AppError),
}

impl AuthError {
    /// Stable lowercase label recorded in the audit trail.
    pub fn reason_label(&self) -> &'static str {
        match self {
            Self::TokenMalformed => "token_malformed",
            Self::TokenInvalid => "token_invalid",
            Self::TokenExpired => "token_expired",
            Self::SessionInvalid => "session_invalid",
            Self::InsufficientRole { .. } => "insufficient_role",
            Self::PermissionDenied { .. } => "permission_denied",
            Self::InvalidCode => "invalid_code",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenMalformed
            | AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::SessionInvalid => AppError::unauthorized(err.to_string()),
            AuthError::InsufficientRole { .. } | AuthError::PermissionDenied { .. } => {
                AppError::forbidden(err.to_string())
            }
            AuthError::InvalidCode => AppError::unauthorized(err.to_string()),
            AuthError::Internal(inner) => inner,
        }
    }
}
