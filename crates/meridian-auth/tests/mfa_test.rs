//! Integration tests for the MFA enrollment state machine.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use meridian_auth::error::AuthError;
use meridian_auth::memory::MemoryMfaSecretProvider;
use meridian_auth::mfa::{MfaEnrollment, totp};

use meridian_core::config::mfa::MfaConfig;
use meridian_entity::mfa::MfaStatus;

fn engine() -> (MfaEnrollment, Arc<MemoryMfaSecretProvider>) {
    let provider = Arc::new(MemoryMfaSecretProvider::new());
    let engine = MfaEnrollment::new(provider.clone(), MfaConfig::default());
    (engine, provider)
}

#[tokio::test]
async fn test_begin_enrollment_persists_nothing() {
    let (engine, _) = engine();
    let user_id = Uuid::new_v4();

    let challenge = engine.begin_enrollment("drew@example.com");

    assert!(challenge.enrollment_uri.starts_with("otpauth://totp/"));
    assert!(challenge.enrollment_uri.contains(&challenge.secret));
    assert!(challenge.enrollment_uri.contains("issuer=MeridianERP"));
    assert_eq!(
        engine.status(user_id).await.unwrap(),
        MfaStatus::NotStarted
    );
}

#[tokio::test]
async fn test_confirm_with_current_code_enables() {
    let (engine, _) = engine();
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    let challenge = engine.begin_enrollment("drew@example.com");
    let code = totp::code_at(&challenge.secret, now).unwrap();

    engine
        .confirm_enrollment(user_id, &challenge.secret, &code, now)
        .await
        .unwrap();

    assert_eq!(engine.status(user_id).await.unwrap(), MfaStatus::Enabled);
    engine.verify_code(user_id, &code, now).await.unwrap();
}

#[tokio::test]
async fn test_confirm_outside_window_rejects_and_keeps_state() {
    let (engine, _) = engine();
    let user_id = Uuid::new_v4();
    // Step-aligned so that ±61s is unambiguously outside the ±2-step
    // window.
    let now = chrono::DateTime::from_timestamp(1_750_000_020, 0).unwrap();

    let challenge = engine.begin_enrollment("drew@example.com");

    for skew in [-90i64, 90] {
        let stale = totp::code_at(&challenge.secret, now + Duration::seconds(skew)).unwrap();
        let err = engine
            .confirm_enrollment(user_id, &challenge.secret, &stale, now)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCode));
    }

    assert_eq!(
        engine.status(user_id).await.unwrap(),
        MfaStatus::NotStarted
    );
}

#[tokio::test]
async fn test_drifted_codes_within_two_steps_confirm() {
    let (engine, _) = engine();
    let now = Utc::now();

    for skew in [-60i64, 60] {
        let user_id = Uuid::new_v4();
        let challenge = engine.begin_enrollment("drew@example.com");
        let drifted = totp::code_at(&challenge.secret, now + Duration::seconds(skew)).unwrap();

        engine
            .confirm_enrollment(user_id, &challenge.secret, &drifted, now)
            .await
            .unwrap();
        assert_eq!(engine.status(user_id).await.unwrap(), MfaStatus::Enabled);
    }
}

#[tokio::test]
async fn test_reenrollment_supersedes_old_secret_immediately() {
    let (engine, _) = engine();
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    let first = engine.begin_enrollment("drew@example.com");
    let first_code = totp::code_at(&first.secret, now).unwrap();
    engine
        .confirm_enrollment(user_id, &first.secret, &first_code, now)
        .await
        .unwrap();

    // Re-enroll: a new secret replaces the old at confirmation.
    let second = engine.begin_enrollment("drew@example.com");
    assert_ne!(first.secret, second.secret);
    let second_code = totp::code_at(&second.secret, now).unwrap();
    engine
        .confirm_enrollment(user_id, &second.secret, &second_code, now)
        .await
        .unwrap();

    // Codes from the superseded secret stop validating.
    if first_code != second_code {
        let err = engine
            .verify_code(user_id, &first_code, now)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCode));
    }
    engine.verify_code(user_id, &second_code, now).await.unwrap();
}

#[tokio::test]
async fn test_verify_without_enrollment_fails_closed() {
    let (engine, _) = engine();
    let err = engine
        .verify_code(Uuid::new_v4(), "123456", Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCode));
}
