//! Route table.

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::handlers::{audit, auth, health, mfa};
use crate::state::AppState;

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/mfa/enroll", post(mfa::enroll))
        .route("/api/auth/mfa/confirm", post(mfa::confirm))
        .route("/api/admin/audit", get(audit::search))
        .layer(middleware::from_fn(
            crate::middleware::logging::log_requests,
        ))
        .with_state(state)
}
