//! Mock implementation of StoreAccountRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::store_account::StoreAccount;
use crate::errors::DomainError;

use super::trait_::StoreAccountRepository;

/// Mock store account repository for testing
#[derive(Default)]
pub struct MockStoreAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, StoreAccount>>>,
}

impl MockStoreAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with an account
    pub async fn insert(&self, account: StoreAccount) {
        self.accounts.write().await.insert(account.id, account);
    }
}

#[async_trait]
impl StoreAccountRepository for MockStoreAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoreAccount>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_holder(&self, holder_id: Uuid) -> Result<Option<StoreAccount>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.holder_id == holder_id)
            .cloned())
    }

    async fn exists_by_alias(&self, alias: &str) -> Result<bool, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .any(|a| a.alias.as_deref() == Some(alias)))
    }

    async fn create(&self, account: StoreAccount) -> Result<StoreAccount, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts
            .values()
            .any(|a| a.holder_id == account.holder_id)
        {
            return Err(DomainError::Duplicate {
                resource: "store account".to_string(),
            });
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: StoreAccount) -> Result<StoreAccount, DomainError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(DomainError::NotFound {
                resource: "StoreAccount".to_string(),
            });
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }
}
