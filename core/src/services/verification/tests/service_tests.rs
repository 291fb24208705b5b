//! VerificationService behavior tests.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::code::CodePurpose;
use crate::errors::{AuthError, DomainError};
use crate::services::verification::VerificationService;

use super::mocks::{MockCodeStore, MockEmailSender};

fn service() -> (
    VerificationService<MockEmailSender, MockCodeStore>,
    Arc<MockEmailSender>,
    Arc<MockCodeStore>,
) {
    let email = Arc::new(MockEmailSender::new());
    let store = Arc::new(MockCodeStore::new());
    let service = VerificationService::new(email.clone(), store.clone());
    (service, email, store)
}

#[tokio::test]
async fn test_send_code_emails_and_stores() {
    let (service, email, store) = service();
    let user_id = Uuid::new_v4();

    service
        .send_code(user_id, "buyer@example.com", CodePurpose::TwoFactor)
        .await
        .unwrap();

    let sent = email.last().await.expect("email sent");
    assert_eq!(sent.to, "buyer@example.com");
    assert_eq!(sent.subject, "Security Code");

    let stored = store
        .peek(&format!("code:two_factor:{}", user_id))
        .await
        .expect("code stored");
    assert!(sent.body.contains(&stored.code));
}

#[tokio::test]
async fn test_email_failure_surfaces_as_auth_error() {
    let (service, email, _store) = service();
    email.fail_next();

    let result = service
        .send_code(Uuid::new_v4(), "buyer@example.com", CodePurpose::TwoFactor)
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailServiceFailure))
    ));
}

#[tokio::test]
async fn test_verify_correct_code_consumes_it() {
    let (service, email, store) = service();
    let user_id = Uuid::new_v4();

    service
        .send_code(user_id, "buyer@example.com", CodePurpose::PasswordReset)
        .await
        .unwrap();
    let code = email.last_code().await.unwrap();

    service
        .verify_code(user_id, CodePurpose::PasswordReset, &code)
        .await
        .unwrap();

    // Consumed: a second use of the same code fails
    assert!(service
        .verify_code(user_id, CodePurpose::PasswordReset, &code)
        .await
        .is_err());
    assert!(store
        .peek(&format!("code:password_reset:{}", user_id))
        .await
        .is_none());
}

#[tokio::test]
async fn test_verify_wrong_code_keeps_counting() {
    let (service, email, _store) = service();
    let user_id = Uuid::new_v4();

    service
        .send_code(user_id, "buyer@example.com", CodePurpose::TwoFactor)
        .await
        .unwrap();
    let code = email.last_code().await.unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    for _ in 0..2 {
        let result = service
            .verify_code(user_id, CodePurpose::TwoFactor, wrong)
            .await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::InvalidVerificationCode))
        ));
    }

    // The correct code still works on the final attempt
    service
        .verify_code(user_id, CodePurpose::TwoFactor, &code)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_attempts_exhaust() {
    let (service, email, _store) = service();
    let user_id = Uuid::new_v4();

    service
        .send_code(user_id, "buyer@example.com", CodePurpose::TwoFactor)
        .await
        .unwrap();
    let code = email.last_code().await.unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    for _ in 0..3 {
        let _ = service
            .verify_code(user_id, CodePurpose::TwoFactor, wrong)
            .await;
    }

    let result = service
        .verify_code(user_id, CodePurpose::TwoFactor, &code)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::MaxAttemptsExceeded))
    ));
}

#[tokio::test]
async fn test_purposes_are_isolated() {
    let (service, email, _store) = service();
    let user_id = Uuid::new_v4();

    service
        .send_code(user_id, "buyer@example.com", CodePurpose::TwoFactor)
        .await
        .unwrap();
    let code = email.last_code().await.unwrap();

    // A two-factor code is useless for a password reset
    let result = service
        .verify_code(user_id, CodePurpose::PasswordReset, &code)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidVerificationCode))
    ));
}

#[tokio::test]
async fn test_resend_replaces_previous_code() {
    let (service, email, _store) = service();
    let user_id = Uuid::new_v4();

    service
        .send_code(user_id, "buyer@example.com", CodePurpose::TwoFactor)
        .await
        .unwrap();
    let first = email.last_code().await.unwrap();

    service
        .send_code(user_id, "buyer@example.com", CodePurpose::TwoFactor)
        .await
        .unwrap();
    let second = email.last_code().await.unwrap();

    if first != second {
        // The stale code no longer verifies
        assert!(service
            .verify_code(user_id, CodePurpose::TwoFactor, &first)
            .await
            .is_err());
    }
    service
        .verify_code(user_id, CodePurpose::TwoFactor, &second)
        .await
        .unwrap();
}
