//! TokenService tests against the mock repository.

use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::MockTokenRepository;

use super::{TokenConfig, TokenService};

fn service() -> TokenService<MockTokenRepository> {
    TokenService::new(
        Arc::new(MockTokenRepository::new()),
        TokenConfig::new("a-test-secret-that-is-long-enough-0123"),
    )
}

fn sample_user() -> User {
    User::new(
        "slush_fan".to_string(),
        "fan@example.com".to_string(),
        "$2b$12$hash".to_string(),
    )
}

#[tokio::test]
async fn test_issue_and_verify_access_token() {
    let service = service();
    let user = sample_user();

    let tokens = service.issue_tokens(&user).await.unwrap();
    assert_eq!(tokens.expires_in, 15 * 60);

    let claims = service.verify_access_token(&tokens.access_token).unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
    assert_eq!(claims.username, "slush_fan");
    assert_eq!(claims.iss, "slushstore");
}

#[tokio::test]
async fn test_verify_rejects_wrong_secret() {
    let service = service();
    let other = TokenService::new(
        Arc::new(MockTokenRepository::new()),
        TokenConfig::new("a-different-secret-also-long-enough-42"),
    );
    let user = sample_user();

    let tokens = service.issue_tokens(&user).await.unwrap();
    let result = other.verify_access_token(&tokens.access_token);

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidSignature))
    ));
}

#[tokio::test]
async fn test_verify_rejects_garbage() {
    let service = service();
    assert!(service.verify_access_token("not.a.jwt").is_err());
}

#[tokio::test]
async fn test_refresh_token_rotation() {
    let service = service();
    let user = sample_user();

    let tokens = service.issue_tokens(&user).await.unwrap();

    let user_id = service
        .consume_refresh_token(&tokens.refresh_token)
        .await
        .unwrap();
    assert_eq!(user_id, user.id);

    // Consumed tokens cannot be replayed
    let replay = service.consume_refresh_token(&tokens.refresh_token).await;
    assert!(matches!(
        replay,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
}

#[tokio::test]
async fn test_unknown_refresh_token_rejected() {
    let service = service();
    let result = service.consume_refresh_token("deadbeef").await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn test_revoke_all_invalidates_refresh_tokens() {
    let service = service();
    let user = sample_user();

    let first = service.issue_tokens(&user).await.unwrap();
    let second = service.issue_tokens(&user).await.unwrap();

    let revoked = service.revoke_all(user.id).await.unwrap();
    assert_eq!(revoked, 2);

    assert!(service.consume_refresh_token(&first.refresh_token).await.is_err());
    assert!(service
        .consume_refresh_token(&second.refresh_token)
        .await
        .is_err());
}
