//! Store account repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::store_account::StoreAccount;
use crate::errors::DomainError;

/// Repository trait for StoreAccount persistence
#[async_trait]
pub trait StoreAccountRepository: Send + Sync {
    /// Find an account by its id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoreAccount>, DomainError>;

    /// Find the account held by a user (at most one exists)
    async fn find_by_holder(&self, holder_id: Uuid) -> Result<Option<StoreAccount>, DomainError>;

    /// Check whether an alias is already taken by any account
    async fn exists_by_alias(&self, alias: &str) -> Result<bool, DomainError>;

    /// Create a new store account
    async fn create(&self, account: StoreAccount) -> Result<StoreAccount, DomainError>;

    /// Update an existing store account
    async fn update(&self, account: StoreAccount) -> Result<StoreAccount, DomainError>;
}
