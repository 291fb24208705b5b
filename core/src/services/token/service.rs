//! Token issuance, validation and rotation.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::domain::entities::user::User;
use crate::domain::value_objects::auth::AuthTokens;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenConfig;

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Login name, for logging and display
    pub username: String,
    /// Token id
    pub jti: String,
    /// Issuer
    pub iss: String,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiration (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// The user id carried in `sub`
    pub fn user_id(&self) -> Result<Uuid, DomainError> {
        Uuid::parse_str(&self.sub).map_err(|_| DomainError::Token(TokenError::InvalidClaims))
    }
}

/// Issues and validates the access/refresh token pair
pub struct TokenService<T>
where
    T: TokenRepository,
{
    repository: Arc<T>,
    config: TokenConfig,
}

impl<T> TokenService<T>
where
    T: TokenRepository,
{
    pub fn new(repository: Arc<T>, config: TokenConfig) -> Self {
        Self { repository, config }
    }

    /// SHA-256 hex digest of a raw token value. Only the digest is stored.
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn generate_refresh_value() -> String {
        let mut rng = rand::thread_rng();
        let bytes: [u8; 32] = rng.gen();
        hex::encode(bytes)
    }

    /// Issue a fresh access/refresh pair for a user
    pub async fn issue_tokens(&self, user: &User) -> DomainResult<AuthTokens> {
        let now = Utc::now();
        let expires_in = self.config.access_token_minutes * 60;

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            jti: Uuid::new_v4().to_string(),
            iss: self.config.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.config.access_token_minutes)).timestamp(),
        };

        let access_token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))?;

        let refresh_value = Self::generate_refresh_value();
        let record = RefreshToken::new(
            user.id,
            Self::hash_token(&refresh_value),
            now + Duration::days(self.config.refresh_token_days),
        );
        self.repository.save(record).await?;

        Ok(AuthTokens {
            access_token,
            refresh_token: refresh_value,
            expires_in,
        })
    }

    /// Validate an access token and return its claims
    pub fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                DomainError::Token(TokenError::TokenExpired)
            }
            jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                DomainError::Token(TokenError::InvalidSignature)
            }
            _ => DomainError::Token(TokenError::InvalidTokenFormat),
        })?;

        Ok(data.claims)
    }

    /// Consume a refresh token, returning the user it belonged to.
    ///
    /// The token is revoked as part of consumption (rotation); the caller
    /// issues a fresh pair afterwards.
    pub async fn consume_refresh_token(&self, refresh_token: &str) -> DomainResult<Uuid> {
        let hash = Self::hash_token(refresh_token);

        let record = self
            .repository
            .find_by_hash(&hash)
            .await?
            .ok_or(DomainError::Token(TokenError::InvalidRefreshToken))?;

        if record.is_revoked {
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }
        if record.is_expired() {
            return Err(DomainError::Token(TokenError::RefreshTokenExpired));
        }

        self.repository.revoke(&hash).await?;
        Ok(record.user_id)
    }

    /// Revoke every refresh token a user holds
    pub async fn revoke_all(&self, user_id: Uuid) -> DomainResult<u64> {
        self.repository.revoke_all_for_user(user_id).await
    }
}
