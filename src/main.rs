//! Meridian ERP server.
//!
//! Entry point that wires configuration, logging, the database pool, and
//! the access-control core together and serves the HTTP surface.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use meridian_auth::audit::AuditSink;
use meridian_auth::guard::AccessGuard;
use meridian_auth::mfa::MfaEnrollment;
use meridian_auth::password::PasswordHasher;
use meridian_auth::permission::PermissionResolver;
use meridian_auth::session::{SessionManager, SessionStore};
use meridian_auth::token::{CredentialVerifier, TokenIssuer};
use meridian_core::config::AppConfig;
use meridian_core::error::AppError;
use meridian_database::DatabasePool;
use meridian_database::repositories::{
    AuditLogRepository, MfaSecretRepository, PermissionRepository, SessionRepository,
    UserRepository,
};

#[tokio::main]
async fn main() {
    let env = std::env::var("MERIDIAN_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Connect, migrate, assemble the core, and serve.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Meridian ERP v{}", env!("CARGO_PKG_VERSION"));

    let pool = DatabasePool::connect(&config.database).await?.into_pool();
    meridian_database::migration::run_migrations(&pool).await?;

    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let session_repo = Arc::new(SessionRepository::new(pool.clone()));
    let permission_repo = Arc::new(PermissionRepository::new(pool.clone()));
    let mfa_repo = Arc::new(MfaSecretRepository::new(pool.clone()));
    let audit_repo = Arc::new(AuditLogRepository::new(pool.clone()));

    let sessions = Arc::new(SessionStore::new(session_repo, config.session.clone()));
    let sink = Arc::new(AuditSink::new(audit_repo.clone()));
    let mfa = Arc::new(MfaEnrollment::new(mfa_repo, config.mfa.clone()));
    let resolver = Arc::new(PermissionResolver::new(permission_repo));

    let guard = Arc::new(AccessGuard::new(
        Arc::new(CredentialVerifier::new(&config.auth)),
        sessions.clone(),
        resolver,
        sink.clone(),
    ));
    let session_manager = Arc::new(SessionManager::new(
        user_repo,
        Arc::new(PasswordHasher::new()),
        sessions.clone(),
        Arc::new(TokenIssuer::new(&config.auth)),
        mfa.clone(),
        sink,
    ));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = meridian_api::AppState {
        config: Arc::new(config),
        guard,
        session_manager,
        sessions,
        mfa,
        audit_reader: audit_repo,
    };

    let router = meridian_api::build_router(state);

    tracing::info!(addr = %addr, "Listening");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}
