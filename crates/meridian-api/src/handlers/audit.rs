//! Admin audit log handler — itself a guarded protected operation.

use axum::Json;
use axum::extract::{Query, State};

use meridian_auth::guard::GuardRequest;
use meridian_entity::permission::{BusinessModule, PermissionAction};
use meridian_entity::user::UserRole;

use crate::dto::request::AuditSearchParams;
use crate::dto::response::AuditSearchResponse;
use crate::error::ApiError;
use crate::extractors::RequestMeta;
use crate::state::AppState;

/// GET /api/admin/audit
pub async fn search(
    State(state): State<AppState>,
    meta: RequestMeta,
    Query(params): Query<AuditSearchParams>,
) -> Result<Json<AuditSearchResponse>, ApiError> {
    state
        .guard
        .authorize(GuardRequest {
            token: meta.bearer()?,
            module: BusinessModule::Admin,
            action: "admin:audit:read",
            required_action: Some(PermissionAction::View),
            required_roles: Some(&[UserRole::Admin]),
            target_type: "audit_log",
            target_id: None,
            origin: meta.origin.clone(),
        })
        .await?;

    let entries = state
        .audit_reader
        .search(
            params.actor_id,
            params.action.as_deref(),
            params.effective_limit(),
        )
        .await?;

    Ok(Json(AuditSearchResponse { entries }))
}
