//! Application state shared across handlers and middleware.

use std::sync::Arc;

use meridian_auth::guard::AccessGuard;
use meridian_auth::mfa::MfaEnrollment;
use meridian_auth::provider::AuditReader;
use meridian_auth::session::{SessionManager, SessionStore};
use meridian_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Per-request access guard.
    pub guard: Arc<AccessGuard>,
    /// Login/logout lifecycle.
    pub session_manager: Arc<SessionManager>,
    /// Session revocation for the logout route.
    pub sessions: Arc<SessionStore>,
    /// MFA enrollment engine.
    pub mfa: Arc<MfaEnrollment>,
    /// Audit log read access for the admin route.
    pub audit_reader: Arc<dyn AuditReader>,
}
