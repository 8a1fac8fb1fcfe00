//! Integration tests for the access guard over in-memory providers.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use meridian_auth::audit::AuditSink;
use meridian_auth::error::AuthError;
use meridian_auth::guard::{AccessGuard, GuardRequest, NetworkOrigin};
use meridian_auth::memory::{
    MemoryAuditRecorder, MemoryPermissionProvider, MemorySessionProvider,
};
use meridian_auth::permission::PermissionResolver;
use meridian_auth::provider::SessionProvider;
use meridian_auth::session::SessionStore;
use meridian_auth::token::{CredentialVerifier, TokenIssuer};

use meridian_core::config::auth::AuthConfig;
use meridian_core::config::session::SessionConfig;
use meridian_entity::audit::AuditOutcome;
use meridian_entity::permission::{BusinessModule, PermissionAction, PermissionSet};
use meridian_entity::session::NewSession;
use meridian_entity::user::UserRole;

struct Harness {
    guard: AccessGuard,
    issuer: TokenIssuer,
    sessions: MemorySessionProvider,
    permissions: MemoryPermissionProvider,
    audit: MemoryAuditRecorder,
}

fn auth_config() -> AuthConfig {
    AuthConfig {
        token_secret: "guard-test-secret".to_string(),
        token_ttl_minutes: 60,
        issuer: "meridian-erp".to_string(),
    }
}

fn harness() -> Harness {
    let config = auth_config();
    let sessions = MemorySessionProvider::new();
    let permissions = MemoryPermissionProvider::new();
    let audit = MemoryAuditRecorder::new();

    let store = SessionStore::new(
        Arc::new(sessions.clone()),
        SessionConfig { ttl_minutes: 480 },
    );
    let guard = AccessGuard::new(
        Arc::new(CredentialVerifier::new(&config)),
        Arc::new(store),
        Arc::new(PermissionResolver::new(Arc::new(permissions.clone()))),
        Arc::new(AuditSink::new(Arc::new(audit.clone()))),
    );

    Harness {
        guard,
        issuer: TokenIssuer::new(&config),
        sessions,
        permissions,
        audit,
    }
}

async fn open_session(harness: &Harness, user_id: Uuid) -> Uuid {
    let now = Utc::now();
    harness
        .sessions
        .insert(&NewSession {
            user_id,
            ip_address: None,
            user_agent: None,
            created_at: now,
            expires_at: now + Duration::hours(1),
        })
        .await
        .unwrap()
        .id
}

fn orders_view(token: &str) -> GuardRequest<'_> {
    GuardRequest {
        token,
        module: BusinessModule::Orders,
        action: "orders:view",
        required_action: Some(PermissionAction::View),
        required_roles: None,
        target_type: "order",
        target_id: None,
        origin: NetworkOrigin {
            ip_address: Some("198.51.100.7".to_string()),
            user_agent: Some("meridian-desktop/2.4".to_string()),
        },
    }
}

#[tokio::test]
async fn test_granted_request_yields_context_and_one_audit_entry() {
    let harness = harness();
    let user_id = Uuid::new_v4();
    let session_id = open_session(&harness, user_id).await;
    harness
        .permissions
        .seed_default(
            UserRole::Sales,
            BusinessModule::Orders,
            PermissionSet::new(true, true, false, false, false),
        )
        .await;

    let (token, _) = harness
        .issuer
        .issue(user_id, "rey@example.com", UserRole::Sales)
        .unwrap();

    let ctx = harness.guard.authorize(orders_view(&token)).await.unwrap();

    assert_eq!(ctx.user_id, user_id);
    assert_eq!(ctx.email, "rey@example.com");
    assert_eq!(ctx.role, UserRole::Sales);
    assert_eq!(ctx.session_id, session_id);
    assert!(ctx.permissions.view);
    assert!(!ctx.permissions.approve);

    let entries = harness.audit.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].outcome, AuditOutcome::Granted);
    assert_eq!(entries[0].actor_id, Some(user_id));
    assert_eq!(entries[0].action, "orders:view");
    assert_eq!(entries[0].ip_address.as_deref(), Some("198.51.100.7"));
    assert!(entries[0].reason.is_none());
}

#[tokio::test]
async fn test_revoked_session_is_session_invalid_not_token_invalid() {
    let harness = harness();
    let user_id = Uuid::new_v4();
    let session_id = open_session(&harness, user_id).await;
    harness
        .permissions
        .seed_default(
            UserRole::Sales,
            BusinessModule::Orders,
            PermissionSet::new(true, false, false, false, false),
        )
        .await;

    let (token, _) = harness
        .issuer
        .issue(user_id, "rey@example.com", UserRole::Sales)
        .unwrap();

    // The token is still structurally valid and unexpired, but the
    // server-side session has been revoked.
    harness.sessions.revoke(session_id, Utc::now()).await.unwrap();

    let err = harness
        .guard
        .authorize(orders_view(&token))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::SessionInvalid));

    let entries = harness.audit.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].outcome, AuditOutcome::Denied);
    assert_eq!(entries[0].reason.as_deref(), Some("session_invalid"));
    // The actor was identified before the denial; the entry keeps it.
    assert_eq!(entries[0].actor_id, Some(user_id));
}

#[tokio::test]
async fn test_expired_session_denies_even_with_longer_token() {
    let harness = harness();
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    // Session already expired; the token issued below is good for an hour.
    harness
        .sessions
        .insert(&NewSession {
            user_id,
            ip_address: None,
            user_agent: None,
            created_at: now - Duration::hours(2),
            expires_at: now - Duration::minutes(1),
        })
        .await
        .unwrap();

    let (token, _) = harness
        .issuer
        .issue(user_id, "rey@example.com", UserRole::Sales)
        .unwrap();

    let err = harness
        .guard
        .authorize(orders_view(&token))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::SessionInvalid));
}

#[tokio::test]
async fn test_role_restriction_denies_and_still_audits() {
    let harness = harness();
    let user_id = Uuid::new_v4();
    open_session(&harness, user_id).await;

    let (token, _) = harness
        .issuer
        .issue(user_id, "casey@example.com", UserRole::Manager)
        .unwrap();

    let request = GuardRequest {
        token: &token,
        module: BusinessModule::Admin,
        action: "admin:audit:read",
        required_action: None,
        required_roles: Some(&[UserRole::Admin]),
        target_type: "audit_log",
        target_id: None,
        origin: NetworkOrigin::default(),
    };

    let err = harness.guard.authorize(request).await.unwrap_err();
    assert!(matches!(
        err,
        AuthError::InsufficientRole {
            actual: UserRole::Manager
        }
    ));

    let entries = harness.audit.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].outcome, AuditOutcome::Denied);
    assert_eq!(entries[0].reason.as_deref(), Some("insufficient_role"));
}

#[tokio::test]
async fn test_missing_permission_flag_is_permission_denied() {
    let harness = harness();
    let user_id = Uuid::new_v4();
    open_session(&harness, user_id).await;
    harness
        .permissions
        .seed_default(
            UserRole::Sales,
            BusinessModule::Orders,
            PermissionSet::new(true, true, false, false, false),
        )
        .await;

    let (token, _) = harness
        .issuer
        .issue(user_id, "rey@example.com", UserRole::Sales)
        .unwrap();

    let request = GuardRequest {
        token: &token,
        module: BusinessModule::Orders,
        action: "orders:approve",
        required_action: Some(PermissionAction::Approve),
        required_roles: None,
        target_type: "order",
        target_id: Some("SO-2041".to_string()),
        origin: NetworkOrigin::default(),
    };

    let err = harness.guard.authorize(request).await.unwrap_err();
    assert!(matches!(err, AuthError::PermissionDenied { .. }));

    let entries = harness.audit.entries().await;
    assert_eq!(entries[0].reason.as_deref(), Some("permission_denied"));
    assert_eq!(entries[0].target_id.as_deref(), Some("SO-2041"));
}

#[tokio::test]
async fn test_malformed_token_audits_with_unknown_actor() {
    let harness = harness();

    let err = harness
        .guard
        .authorize(orders_view("garbage"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::TokenMalformed));

    let entries = harness.audit.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].actor_id, None);
    assert_eq!(entries[0].reason.as_deref(), Some("token_malformed"));
}

#[tokio::test]
async fn test_every_guard_call_appends_exactly_one_entry() {
    let harness = harness();
    let user_id = Uuid::new_v4();
    open_session(&harness, user_id).await;
    harness
        .permissions
        .seed_default(
            UserRole::Sales,
            BusinessModule::Orders,
            PermissionSet::new(true, false, false, false, false),
        )
        .await;

    let (token, _) = harness
        .issuer
        .issue(user_id, "rey@example.com", UserRole::Sales)
        .unwrap();

    harness.guard.authorize(orders_view(&token)).await.unwrap();
    harness
        .guard
        .authorize(orders_view("garbage"))
        .await
        .unwrap_err();
    let approve = GuardRequest {
        required_action: Some(PermissionAction::Approve),
        ..orders_view(&token)
    };
    harness.guard.authorize(approve).await.unwrap_err();

    assert_eq!(harness.audit.len().await, 3);
}

#[tokio::test]
async fn test_audit_outage_does_not_reverse_a_grant() {
    let harness = harness();
    let user_id = Uuid::new_v4();
    open_session(&harness, user_id).await;
    harness
        .permissions
        .seed_default(
            UserRole::Sales,
            BusinessModule::Orders,
            PermissionSet::new(true, false, false, false, false),
        )
        .await;
    harness.audit.fail_writes(true).await;

    let (token, _) = harness
        .issuer
        .issue(user_id, "rey@example.com", UserRole::Sales)
        .unwrap();

    // The write fails; the decision stands.
    let ctx = harness.guard.authorize(orders_view(&token)).await.unwrap();
    assert_eq!(ctx.user_id, user_id);
    assert!(harness.audit.is_empty().await);
}

#[tokio::test]
async fn test_designer_design_default_scenario() {
    let harness = harness();
    let user_id = Uuid::new_v4();
    open_session(&harness, user_id).await;
    harness
        .permissions
        .seed_default(
            UserRole::Designer,
            BusinessModule::Design,
            PermissionSet::new(true, false, false, false, true),
        )
        .await;

    let (token, _) = harness
        .issuer
        .issue(user_id, "drew@example.com", UserRole::Designer)
        .unwrap();

    let request = GuardRequest {
        token: &token,
        module: BusinessModule::Design,
        action: "design:view",
        required_action: Some(PermissionAction::View),
        required_roles: None,
        target_type: "design",
        target_id: None,
        origin: NetworkOrigin::default(),
    };

    let ctx = harness.guard.authorize(request).await.unwrap();
    assert_eq!(
        ctx.permissions,
        PermissionSet::new(true, false, false, false, true)
    );
}

#[tokio::test]
async fn test_forged_token_reason_reflects_true_cause() {
    let harness = harness();

    // A token from a different signing secret: the signature check fails
    // before anything else is consulted.
    let other = AuthConfig {
        token_secret: "some-other-secret".to_string(),
        token_ttl_minutes: 60,
        issuer: "meridian-erp".to_string(),
    };
    let foreign_issuer = TokenIssuer::new(&other);
    let (forged, _) = foreign_issuer
        .issue(Uuid::new_v4(), "mallory@example.com", UserRole::Admin)
        .unwrap();

    let err = harness
        .guard
        .authorize(orders_view(&forged))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::TokenInvalid));

    let entries = harness.audit.entries().await;
    assert_eq!(entries[0].reason.as_deref(), Some("token_invalid"));
}
