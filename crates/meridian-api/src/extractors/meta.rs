//! `RequestMeta` extractor — bearer token and network origin from the
//! request headers, with no validation of its own. Validation is the
//! guard's job; this extractor only carries the raw material to it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use meridian_auth::guard::NetworkOrigin;
use meridian_core::error::AppError;

use crate::error::ApiError;

/// Raw credentials and origin captured from the request.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    /// Bearer token from the Authorization header, if present.
    pub token: Option<String>,
    /// Caller IP and User-Agent for the audit trail.
    pub origin: NetworkOrigin,
}

impl RequestMeta {
    /// Returns the bearer token or an unauthorized error.
    pub fn bearer(&self) -> Result<&str, ApiError> {
        self.token
            .as_deref()
            .ok_or_else(|| ApiError(AppError::unauthorized("Missing Authorization header")))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestMeta {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(String::from);

        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string());

        let user_agent = parts
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Ok(RequestMeta {
            token,
            origin: NetworkOrigin {
                ip_address,
                user_agent,
            },
        })
    }
}
