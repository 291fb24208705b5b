//! Refresh token repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for refresh token persistence
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a new refresh token record
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a token by the SHA-256 hash of its raw value
    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Revoke a single token. Returns false when no live token matched.
    async fn revoke(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Revoke every token belonging to a user (logout-everywhere)
    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64, DomainError>;

    /// Delete expired tokens, returning how many were removed
    async fn delete_expired(&self) -> Result<u64, DomainError>;
}
