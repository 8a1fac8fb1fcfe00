//! Auth handlers — login, logout, me.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Query, State};
use chrono::Utc;

use meridian_auth::guard::GuardRequest;
use meridian_entity::permission::BusinessModule;

use crate::dto::request::{LoginRequest, MeParams};
use crate::dto::response::{LoginResponse, MeResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::RequestMeta;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    meta: RequestMeta,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let result = state
        .session_manager
        .login(
            &req.email,
            &req.password,
            req.mfa_code.as_deref(),
            meta.origin,
        )
        .await?;

    Ok(Json(LoginResponse {
        token: result.token,
        expires_at: result.token_expires_at,
        user: UserResponse::from(&result.user),
    }))
}

/// POST /api/auth/logout
///
/// Guard-mediated so the request lands in the audit trail exactly once;
/// the revocation itself is idempotent.
pub async fn logout(
    State(state): State<AppState>,
    meta: RequestMeta,
) -> Result<Json<MessageResponse>, ApiError> {
    let ctx = state
        .guard
        .authorize(GuardRequest {
            token: meta.bearer()?,
            module: BusinessModule::Admin,
            action: "auth:logout",
            required_action: None,
            required_roles: None,
            target_type: "session",
            target_id: None,
            origin: meta.origin.clone(),
        })
        .await?;

    state.sessions.revoke(ctx.session_id, Utc::now()).await?;

    Ok(Json(MessageResponse {
        message: "Logged out".to_string(),
    }))
}

/// GET /api/auth/me
///
/// Echoes the verified identity plus the effective capability set for
/// the requested module (default: reports).
pub async fn me(
    State(state): State<AppState>,
    meta: RequestMeta,
    Query(params): Query<MeParams>,
) -> Result<Json<MeResponse>, ApiError> {
    let module = match params.module.as_deref() {
        Some(name) => BusinessModule::from_str(name).map_err(ApiError)?,
        None => BusinessModule::Reports,
    };

    let ctx = state
        .guard
        .authorize(GuardRequest {
            token: meta.bearer()?,
            module,
            action: "auth:me",
            required_action: None,
            required_roles: None,
            target_type: "user",
            target_id: None,
            origin: meta.origin.clone(),
        })
        .await?;

    Ok(Json(MeResponse {
        user_id: ctx.user_id,
        email: ctx.email,
        role: ctx.role.to_string(),
        module: module.to_string(),
        permissions: ctx.permissions,
    }))
}
