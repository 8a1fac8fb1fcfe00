//! MFA enrollment handlers.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use meridian_auth::guard::GuardRequest;
use meridian_entity::permission::BusinessModule;

use crate::dto::request::MfaConfirmRequest;
use crate::dto::response::{EnrollmentResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::RequestMeta;
use crate::state::AppState;

/// POST /api/auth/mfa/enroll
///
/// Hands back a fresh secret and enrollment URI. Nothing is persisted
/// until the confirm endpoint sees a valid code.
pub async fn enroll(
    State(state): State<AppState>,
    meta: RequestMeta,
) -> Result<Json<EnrollmentResponse>, ApiError> {
    let ctx = state
        .guard
        .authorize(GuardRequest {
            token: meta.bearer()?,
            module: BusinessModule::Admin,
            action: "mfa:enroll",
            required_action: None,
            required_roles: None,
            target_type: "mfa_secret",
            target_id: None,
            origin: meta.origin.clone(),
        })
        .await?;

    let challenge = state.mfa.begin_enrollment(&ctx.email);

    Ok(Json(EnrollmentResponse {
        secret: challenge.secret,
        enrollment_uri: challenge.enrollment_uri,
    }))
}

/// POST /api/auth/mfa/confirm
pub async fn confirm(
    State(state): State<AppState>,
    meta: RequestMeta,
    Json(req): Json<MfaConfirmRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let ctx = state
        .guard
        .authorize(GuardRequest {
            token: meta.bearer()?,
            module: BusinessModule::Admin,
            action: "mfa:confirm",
            required_action: None,
            required_roles: None,
            target_type: "mfa_secret",
            target_id: None,
            origin: meta.origin.clone(),
        })
        .await?;

    state
        .mfa
        .confirm_enrollment(ctx.user_id, &req.secret, &req.code, Utc::now())
        .await?;

    Ok(Json(MessageResponse {
        message: "MFA enabled".to_string(),
    }))
}
