//! Payment method repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::payment_method::PaymentMethod;
use crate::errors::DomainError;

/// Repository trait for PaymentMethod persistence
#[async_trait]
pub trait PaymentMethodRepository: Send + Sync {
    /// Find a payment method by its id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PaymentMethod>, DomainError>;

    /// All methods registered on an account, deactivated ones included
    async fn list_for_account(&self, account_id: Uuid)
        -> Result<Vec<PaymentMethod>, DomainError>;

    /// Only the methods usable for new orders
    async fn list_active_for_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<PaymentMethod>, DomainError>;

    /// The account's method with this exact card number and PIN, if any.
    /// Used to detect duplicates and reactivation candidates.
    async fn find_by_card(
        &self,
        account_id: Uuid,
        card_number: &str,
        key_pin: &str,
    ) -> Result<Option<PaymentMethod>, DomainError>;

    /// Create a new payment method
    async fn create(&self, method: PaymentMethod) -> Result<PaymentMethod, DomainError>;

    /// Update an existing payment method
    async fn update(&self, method: PaymentMethod) -> Result<PaymentMethod, DomainError>;

    /// Hard-delete a payment method. Only valid when no order references it.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
