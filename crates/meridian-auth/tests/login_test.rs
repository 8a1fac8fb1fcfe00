//! Integration tests for the login/logout lifecycle over in-memory
//! providers, including the interplay with the access guard.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use meridian_auth::audit::AuditSink;
use meridian_auth::error::AuthError;
use meridian_auth::guard::{AccessGuard, GuardRequest, NetworkOrigin};
use meridian_auth::memory::{
    MemoryAuditRecorder, MemoryMfaSecretProvider, MemoryPermissionProvider,
    MemorySessionProvider, MemoryUserProvider,
};
use meridian_auth::mfa::{MfaEnrollment, totp};
use meridian_auth::password::PasswordHasher;
use meridian_auth::permission::PermissionResolver;
use meridian_auth::session::{SessionManager, SessionStore};
use meridian_auth::token::{CredentialVerifier, TokenIssuer};

use meridian_core::config::auth::AuthConfig;
use meridian_core::config::mfa::MfaConfig;
use meridian_core::config::session::SessionConfig;
use meridian_core::error::ErrorKind;
use meridian_entity::audit::AuditOutcome;
use meridian_entity::permission::{BusinessModule, PermissionAction, PermissionSet};
use meridian_entity::user::{User, UserRole, UserStatus};

struct Harness {
    manager: SessionManager,
    guard: AccessGuard,
    mfa: MfaEnrollment,
    users: Arc<MemoryUserProvider>,
    permissions: MemoryPermissionProvider,
    audit: MemoryAuditRecorder,
    hasher: PasswordHasher,
}

fn auth_config() -> AuthConfig {
    AuthConfig {
        token_secret: "login-test-secret".to_string(),
        token_ttl_minutes: 60,
        issuer: "meridian-erp".to_string(),
    }
}

fn harness() -> Harness {
    let config = auth_config();
    let users = Arc::new(MemoryUserProvider::new());
    let sessions = MemorySessionProvider::new();
    let permissions = MemoryPermissionProvider::new();
    let audit = MemoryAuditRecorder::new();
    let mfa_secrets = Arc::new(MemoryMfaSecretProvider::new());

    let store = Arc::new(SessionStore::new(
        Arc::new(sessions.clone()),
        SessionConfig { ttl_minutes: 480 },
    ));
    let sink = Arc::new(AuditSink::new(Arc::new(audit.clone())));
    let mfa = MfaEnrollment::new(mfa_secrets, MfaConfig::default());

    let manager = SessionManager::new(
        users.clone(),
        Arc::new(PasswordHasher::new()),
        store.clone(),
        Arc::new(TokenIssuer::new(&config)),
        Arc::new(mfa.clone()),
        sink.clone(),
    );
    let guard = AccessGuard::new(
        Arc::new(CredentialVerifier::new(&config)),
        store,
        Arc::new(PermissionResolver::new(Arc::new(permissions.clone()))),
        sink,
    );

    Harness {
        manager,
        guard,
        mfa,
        users,
        permissions,
        audit,
        hasher: PasswordHasher::new(),
    }
}

async fn create_user(harness: &Harness, email: &str, password: &str, role: UserRole) -> User {
    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        display_name: None,
        password_hash: harness.hasher.hash_password(password).unwrap(),
        role,
        status: UserStatus::Active,
        created_at: now,
        updated_at: now,
    };
    harness.users.put(user.clone()).await;
    user
}

fn origin() -> NetworkOrigin {
    NetworkOrigin {
        ip_address: Some("203.0.113.9".to_string()),
        user_agent: Some("meridian-desktop/2.4".to_string()),
    }
}

#[tokio::test]
async fn test_login_issues_usable_token() {
    let harness = harness();
    let user = create_user(&harness, "rey@example.com", "swordfish-42", UserRole::Sales).await;
    harness
        .permissions
        .seed_default(
            UserRole::Sales,
            BusinessModule::Crm,
            PermissionSet::new(true, true, true, false, false),
        )
        .await;

    let result = harness
        .manager
        .login("rey@example.com", "swordfish-42", None, origin())
        .await
        .unwrap();

    assert_eq!(result.user.id, user.id);
    assert_eq!(result.session.user_id, user.id);

    // The issued token passes the guard against the created session.
    let ctx = harness
        .guard
        .authorize(GuardRequest {
            token: &result.token,
            module: BusinessModule::Crm,
            action: "crm:view",
            required_action: Some(PermissionAction::View),
            required_roles: None,
            target_type: "customer",
            target_id: None,
            origin: NetworkOrigin::default(),
        })
        .await
        .unwrap();
    assert_eq!(ctx.user_id, user.id);
    assert_eq!(ctx.session_id, result.session.id);

    // One entry for the login, one for the guarded request.
    let entries = harness.audit.entries().await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].action, "auth:login");
    assert_eq!(entries[0].outcome, AuditOutcome::Granted);
}

#[tokio::test]
async fn test_wrong_password_is_denied_and_audited() {
    let harness = harness();
    create_user(&harness, "rey@example.com", "swordfish-42", UserRole::Sales).await;

    let err = harness
        .manager
        .login("rey@example.com", "tuna-42", None, origin())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);

    let entries = harness.audit.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].outcome, AuditOutcome::Denied);
    assert_eq!(entries[0].reason.as_deref(), Some("bad_password"));
}

#[tokio::test]
async fn test_unknown_email_and_wrong_password_share_a_message() {
    let harness = harness();
    create_user(&harness, "rey@example.com", "swordfish-42", UserRole::Sales).await;

    let unknown = harness
        .manager
        .login("nobody@example.com", "whatever", None, origin())
        .await
        .unwrap_err();
    let wrong = harness
        .manager
        .login("rey@example.com", "wrong", None, origin())
        .await
        .unwrap_err();

    assert_eq!(unknown.message, wrong.message);
}

#[tokio::test]
async fn test_inactive_account_cannot_login() {
    let harness = harness();
    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        email: "gone@example.com".to_string(),
        display_name: None,
        password_hash: harness.hasher.hash_password("pw-123456").unwrap(),
        role: UserRole::Viewer,
        status: UserStatus::Inactive,
        created_at: now,
        updated_at: now,
    };
    harness.users.put(user).await;

    let err = harness
        .manager
        .login("gone@example.com", "pw-123456", None, origin())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
}

#[tokio::test]
async fn test_mfa_enabled_login_demands_code() {
    let harness = harness();
    let user = create_user(&harness, "drew@example.com", "pw-123456", UserRole::Designer).await;

    let now = Utc::now();
    let challenge = harness.mfa.begin_enrollment(&user.email);
    let code = totp::code_at(&challenge.secret, now).unwrap();
    harness
        .mfa
        .confirm_enrollment(user.id, &challenge.secret, &code, now)
        .await
        .unwrap();

    // No code: denied.
    let err = harness
        .manager
        .login("drew@example.com", "pw-123456", None, origin())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);

    // Valid code: granted.
    let fresh = totp::code_at(&challenge.secret, Utc::now()).unwrap();
    harness
        .manager
        .login("drew@example.com", "pw-123456", Some(&fresh), origin())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_logout_revokes_and_guard_rejects_afterwards() {
    let harness = harness();
    let user = create_user(&harness, "rey@example.com", "swordfish-42", UserRole::Sales).await;
    harness
        .permissions
        .seed_default(
            UserRole::Sales,
            BusinessModule::Crm,
            PermissionSet::new(true, false, false, false, false),
        )
        .await;

    let result = harness
        .manager
        .login("rey@example.com", "swordfish-42", None, origin())
        .await
        .unwrap();

    harness
        .manager
        .logout(user.id, result.session.id, origin())
        .await
        .unwrap();

    let err = harness
        .guard
        .authorize(GuardRequest {
            token: &result.token,
            module: BusinessModule::Crm,
            action: "crm:view",
            required_action: Some(PermissionAction::View),
            required_roles: None,
            target_type: "customer",
            target_id: None,
            origin: NetworkOrigin::default(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::SessionInvalid));
}

#[tokio::test]
async fn test_revoke_all_ends_every_session() {
    let harness = harness();
    let user = create_user(&harness, "rey@example.com", "swordfish-42", UserRole::Sales).await;

    for _ in 0..3 {
        harness
            .manager
            .login("rey@example.com", "swordfish-42", None, origin())
            .await
            .unwrap();
    }

    let revoked = harness
        .manager
        .revoke_all(user.id, user.id, origin())
        .await
        .unwrap();
    assert_eq!(revoked, 3);
}
