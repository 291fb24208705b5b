//! AuthService flow tests with mock repositories, email and code store.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::value_objects::auth::LoginOutcome;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{MockTokenRepository, MockUserRepository, UserRepository};
use crate::services::token::{TokenConfig, TokenService};
use crate::services::verification::tests::mocks::{MockCodeStore, MockEmailSender};
use crate::services::verification::VerificationService;

use super::{AuthConfig, AuthService, RegisterInput};

type TestAuthService =
    AuthService<MockUserRepository, MockEmailSender, MockCodeStore, MockTokenRepository>;

struct Fixture {
    service: TestAuthService,
    users: Arc<MockUserRepository>,
    email: Arc<MockEmailSender>,
    tokens: Arc<TokenService<MockTokenRepository>>,
}

fn fixture() -> Fixture {
    let users = Arc::new(MockUserRepository::new());
    let email = Arc::new(MockEmailSender::new());
    let store = Arc::new(MockCodeStore::new());
    let verification = Arc::new(VerificationService::new(email.clone(), store));
    let tokens = Arc::new(TokenService::new(
        Arc::new(MockTokenRepository::new()),
        TokenConfig::new("a-test-secret-that-is-long-enough-0123"),
    ));

    let service = AuthService::new(
        users.clone(),
        verification,
        tokens.clone(),
        AuthConfig::for_tests(),
    );

    Fixture {
        service,
        users,
        email,
        tokens,
    }
}

fn register_input(username: &str, email: &str) -> RegisterInput {
    RegisterInput {
        username: username.to_string(),
        email: email.to_string(),
        password: "hunter2slush".to_string(),
        first_name: Some("Sam".to_string()),
        last_name: None,
        company_name: None,
    }
}

async fn registered_user_id(f: &Fixture, username: &str, email: &str) -> Uuid {
    f.service
        .register(register_input(username, email))
        .await
        .unwrap();
    f.users
        .find_by_username(username)
        .await
        .unwrap()
        .unwrap()
        .id
}

#[tokio::test]
async fn test_register_creates_user_and_sends_confirmation() {
    let f = fixture();

    let tokens = f
        .service
        .register(register_input("slush_fan", "fan@example.com"))
        .await
        .unwrap();
    assert!(!tokens.access_token.is_empty());

    let user = f
        .users
        .find_by_username("slush_fan")
        .await
        .unwrap()
        .unwrap();
    assert!(!user.email_confirmed);
    assert_ne!(user.password_hash, "hunter2slush");

    let sent = f.email.last().await.unwrap();
    assert_eq!(sent.to, "fan@example.com");
    assert_eq!(sent.subject, "Account Confirmation");
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let f = fixture();

    f.service
        .register(register_input("first_user", "same@example.com"))
        .await
        .unwrap();
    let result = f
        .service
        .register(register_input("second_user", "same@example.com"))
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailAlreadyInUse))
    ));
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let f = fixture();

    let mut input = register_input("slush_fan", "fan@example.com");
    input.password = "short".to_string();

    assert!(matches!(
        f.service.register(input).await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_login_success() {
    let f = fixture();
    registered_user_id(&f, "slush_fan", "fan@example.com").await;

    let outcome = f.service.login("slush_fan", "hunter2slush").await.unwrap();
    assert!(matches!(outcome, LoginOutcome::Success(_)));

    let user = f
        .users
        .find_by_username("slush_fan")
        .await
        .unwrap()
        .unwrap();
    assert!(user.last_login_at.is_some());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let f = fixture();
    registered_user_id(&f, "slush_fan", "fan@example.com").await;

    let result = f.service.login("slush_fan", "wrong-password").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_login_unknown_user() {
    let f = fixture();
    let result = f.service.login("nobody", "hunter2slush").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_two_factor_login_flow() {
    let f = fixture();
    let user_id = registered_user_id(&f, "slush_fan", "fan@example.com").await;

    f.service.enable_two_factor(user_id).await.unwrap();

    // Password alone yields a challenge, not tokens
    let outcome = f.service.login("slush_fan", "hunter2slush").await.unwrap();
    let challenge_user = match outcome {
        LoginOutcome::TwoFactorRequired { user_id } => user_id,
        LoginOutcome::Success(_) => panic!("expected a two-factor challenge"),
    };
    assert_eq!(challenge_user, user_id);

    f.service.send_two_factor_code(user_id).await.unwrap();
    let code = f.email.last_code().await.unwrap();

    let tokens = f.service.verify_two_factor(user_id, &code).await.unwrap();
    assert!(!tokens.access_token.is_empty());
}

#[tokio::test]
async fn test_two_factor_wrong_code() {
    let f = fixture();
    let user_id = registered_user_id(&f, "slush_fan", "fan@example.com").await;

    f.service.enable_two_factor(user_id).await.unwrap();
    f.service.send_two_factor_code(user_id).await.unwrap();
    let code = f.email.last_code().await.unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let result = f.service.verify_two_factor(user_id, wrong).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidVerificationCode))
    ));
}

#[tokio::test]
async fn test_enable_two_factor_twice_rejected() {
    let f = fixture();
    let user_id = registered_user_id(&f, "slush_fan", "fan@example.com").await;

    f.service.enable_two_factor(user_id).await.unwrap();
    let result = f.service.enable_two_factor(user_id).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::TwoFactorAlreadyEnabled))
    ));
}

#[tokio::test]
async fn test_disable_two_factor_requires_enabled() {
    let f = fixture();
    let user_id = registered_user_id(&f, "slush_fan", "fan@example.com").await;

    let result = f.service.disable_two_factor(user_id).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::TwoFactorNotEnabled))
    ));
}

#[tokio::test]
async fn test_confirm_email_flow() {
    let f = fixture();
    let user_id = registered_user_id(&f, "slush_fan", "fan@example.com").await;
    let code = f.email.last_code().await.unwrap();

    f.service.confirm_email(user_id, &code).await.unwrap();

    let user = f.users.find_by_id(user_id).await.unwrap().unwrap();
    assert!(user.email_confirmed);

    // Already confirmed: resend is refused
    let result = f.service.resend_confirmation(user_id).await;
    assert!(matches!(result, Err(DomainError::BusinessRule { .. })));
}

#[tokio::test]
async fn test_change_password_requires_old() {
    let f = fixture();
    let user_id = registered_user_id(&f, "slush_fan", "fan@example.com").await;

    let result = f
        .service
        .change_password(user_id, "wrong-old", "brand-new-password")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));

    f.service
        .change_password(user_id, "hunter2slush", "brand-new-password")
        .await
        .unwrap();

    assert!(matches!(
        f.service.login("slush_fan", "brand-new-password").await,
        Ok(LoginOutcome::Success(_))
    ));
}

#[tokio::test]
async fn test_change_email_checks_old_and_uniqueness() {
    let f = fixture();
    let user_id = registered_user_id(&f, "slush_fan", "fan@example.com").await;
    registered_user_id(&f, "other_user", "taken@example.com").await;

    let mismatch = f
        .service
        .change_email(user_id, "not-current@example.com", "new@example.com")
        .await;
    assert!(matches!(
        mismatch,
        Err(DomainError::Auth(AuthError::EmailMismatch))
    ));

    let taken = f
        .service
        .change_email(user_id, "FAN@example.com", "taken@example.com")
        .await;
    assert!(matches!(
        taken,
        Err(DomainError::Auth(AuthError::EmailAlreadyInUse))
    ));

    // The old-address check is case-insensitive
    f.service
        .change_email(user_id, "FAN@example.com", "new@example.com")
        .await
        .unwrap();
    let user = f.users.find_by_id(user_id).await.unwrap().unwrap();
    assert_eq!(user.email, "new@example.com");
    assert!(!user.email_confirmed);
}

#[tokio::test]
async fn test_change_username_checks_old() {
    let f = fixture();
    let user_id = registered_user_id(&f, "slush_fan", "fan@example.com").await;

    let result = f
        .service
        .change_username(user_id, "wrong_old", "new_name")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UsernameMismatch))
    ));

    f.service
        .change_username(user_id, "slush_fan", "new_name")
        .await
        .unwrap();
    assert!(f
        .users
        .find_by_username("new_name")
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_forgot_password_is_silent_for_unknown_email() {
    let f = fixture();

    f.service
        .forgot_password("nobody@example.com")
        .await
        .unwrap();
    assert!(f.email.last().await.is_none());
}

#[tokio::test]
async fn test_forgot_password_skips_unconfirmed_email() {
    let f = fixture();
    registered_user_id(&f, "slush_fan", "fan@example.com").await;
    let mails_before = f.email.sent.read().await.len();

    f.service.forgot_password("fan@example.com").await.unwrap();
    assert_eq!(f.email.sent.read().await.len(), mails_before);
}

#[tokio::test]
async fn test_password_reset_flow() {
    let f = fixture();
    let user_id = registered_user_id(&f, "slush_fan", "fan@example.com").await;

    // Confirm the address so reset mails go out
    let code = f.email.last_code().await.unwrap();
    f.service.confirm_email(user_id, &code).await.unwrap();

    f.service.forgot_password("fan@example.com").await.unwrap();
    let reset_code = f.email.last_code().await.unwrap();

    f.service
        .reset_password("slush_fan", &reset_code, "a-whole-new-password")
        .await
        .unwrap();

    assert!(matches!(
        f.service.login("slush_fan", "a-whole-new-password").await,
        Ok(LoginOutcome::Success(_))
    ));
    assert!(matches!(
        f.service.login("slush_fan", "hunter2slush").await,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_refresh_and_logout() {
    let f = fixture();
    registered_user_id(&f, "slush_fan", "fan@example.com").await;

    let tokens = match f.service.login("slush_fan", "hunter2slush").await.unwrap() {
        LoginOutcome::Success(tokens) => tokens,
        _ => panic!("expected tokens"),
    };

    let rotated = f.service.refresh_tokens(&tokens.refresh_token).await.unwrap();
    assert!(f.service.refresh_tokens(&tokens.refresh_token).await.is_err());

    let user = f
        .users
        .find_by_username("slush_fan")
        .await
        .unwrap()
        .unwrap();
    f.service.logout(user.id).await.unwrap();
    assert!(f.service.refresh_tokens(&rotated.refresh_token).await.is_err());

    // The access token claims still parse (stateless), sessions only die at
    // the refresh boundary
    let claims = f.tokens.verify_access_token(&rotated.access_token).unwrap();
    assert_eq!(claims.username, "slush_fan");
}
