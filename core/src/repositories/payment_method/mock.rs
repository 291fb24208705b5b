//! Mock implementation of PaymentMethodRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::payment_method::PaymentMethod;
use crate::errors::DomainError;

use super::trait_::PaymentMethodRepository;

/// Mock payment method repository for testing
#[derive(Default)]
pub struct MockPaymentMethodRepository {
    methods: Arc<RwLock<HashMap<Uuid, PaymentMethod>>>,
}

impl MockPaymentMethodRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with a method
    pub async fn insert(&self, method: PaymentMethod) {
        self.methods.write().await.insert(method.id, method);
    }
}

#[async_trait]
impl PaymentMethodRepository for MockPaymentMethodRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PaymentMethod>, DomainError> {
        let methods = self.methods.read().await;
        Ok(methods.get(&id).cloned())
    }

    async fn list_for_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<PaymentMethod>, DomainError> {
        let methods = self.methods.read().await;
        Ok(methods
            .values()
            .filter(|m| m.account_id == account_id)
            .cloned()
            .collect())
    }

    async fn list_active_for_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<PaymentMethod>, DomainError> {
        let methods = self.methods.read().await;
        Ok(methods
            .values()
            .filter(|m| m.account_id == account_id && m.is_active())
            .cloned()
            .collect())
    }

    async fn find_by_card(
        &self,
        account_id: Uuid,
        card_number: &str,
        key_pin: &str,
    ) -> Result<Option<PaymentMethod>, DomainError> {
        let methods = self.methods.read().await;
        Ok(methods
            .values()
            .find(|m| {
                m.account_id == account_id
                    && m.card_number == card_number
                    && m.key_pin == key_pin
            })
            .cloned())
    }

    async fn create(&self, method: PaymentMethod) -> Result<PaymentMethod, DomainError> {
        let mut methods = self.methods.write().await;
        methods.insert(method.id, method.clone());
        Ok(method)
    }

    async fn update(&self, method: PaymentMethod) -> Result<PaymentMethod, DomainError> {
        let mut methods = self.methods.write().await;

        if !methods.contains_key(&method.id) {
            return Err(DomainError::NotFound {
                resource: "PaymentMethod".to_string(),
            });
        }

        methods.insert(method.id, method.clone());
        Ok(method)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut methods = self.methods.write().await;
        Ok(methods.remove(&id).is_some())
    }
}
