//! Seams to the outside world used by the verification flow.

use async_trait::async_trait;

use crate::domain::entities::code::VerificationCode;
use crate::errors::DomainError;

/// Outbound email delivery
///
/// The `ss_infra` crate implements this over SMTP; tests use an in-memory
/// mock.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send a plain-text email
    async fn send_email(&self, to: &str, subject: &str, body: &str)
        -> Result<(), DomainError>;
}

/// Short-lived storage for verification codes, keyed by purpose and user.
///
/// Entries must expire on their own (the TTL is passed on write); the domain
/// never sweeps them.
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Store a code under a key with a TTL in seconds, replacing any
    /// previous code under the same key
    async fn put(
        &self,
        key: &str,
        code: &VerificationCode,
        ttl_seconds: u64,
    ) -> Result<(), DomainError>;

    /// Fetch the code stored under a key
    async fn get(&self, key: &str) -> Result<Option<VerificationCode>, DomainError>;

    /// Remove the code stored under a key
    async fn remove(&self, key: &str) -> Result<(), DomainError>;
}
