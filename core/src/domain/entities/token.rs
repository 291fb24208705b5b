//! Refresh token entity for session continuation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A refresh token, stored hashed. The raw token is only ever held by the
/// client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    pub id: Uuid,

    /// The user this token belongs to
    pub user_id: Uuid,

    /// SHA-256 hex digest of the raw token value
    pub token_hash: String,

    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,

    /// Set on logout or rotation
    pub is_revoked: bool,
}

impl RefreshToken {
    /// Creates a new refresh token record
    pub fn new(user_id: Uuid, token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            created_at: Utc::now(),
            expires_at,
            is_revoked: false,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Usable for refreshing: not revoked and not expired
    pub fn is_active(&self) -> bool {
        !self.is_revoked && !self.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_fresh_token_is_active() {
        let token = RefreshToken::new(
            Uuid::new_v4(),
            "ab".repeat(32),
            Utc::now() + Duration::days(30),
        );
        assert!(token.is_active());
        assert!(!token.is_expired());
    }

    #[test]
    fn test_expired_token_is_inactive() {
        let token = RefreshToken::new(
            Uuid::new_v4(),
            "ab".repeat(32),
            Utc::now() - Duration::seconds(1),
        );
        assert!(token.is_expired());
        assert!(!token.is_active());
    }

    #[test]
    fn test_revoked_token_is_inactive() {
        let mut token = RefreshToken::new(
            Uuid::new_v4(),
            "ab".repeat(32),
            Utc::now() + Duration::days(30),
        );
        token.is_revoked = true;
        assert!(!token.is_active());
    }
}
