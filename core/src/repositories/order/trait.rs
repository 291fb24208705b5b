//! Order repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::order::{Order, OrderStatus};
use crate::errors::DomainError;

/// Repository trait for Order persistence
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order with its items and, in the same transaction,
    /// clear the cart it was assembled from. This is the single commit point
    /// of checkout: either the order exists and the cart is empty, or
    /// neither happened.
    async fn create_with_items(
        &self,
        order: Order,
        clear_cart_id: Option<Uuid>,
    ) -> Result<Order, DomainError>;

    /// Find an order with its items
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;

    /// All orders placed by a store account, items included
    async fn list_for_buyer(&self, buyer_id: Uuid) -> Result<Vec<Order>, DomainError>;

    /// Whether any order references a payment method
    async fn exists_for_payment_method(&self, payment_method_id: Uuid)
        -> Result<bool, DomainError>;

    /// Update an order's status
    async fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<(), DomainError>;

    /// Stamp `deleted_payment_method_id` on every order referencing the
    /// method, preserving the original data when the method leaves the
    /// active set
    async fn mark_payment_method_deleted(
        &self,
        payment_method_id: Uuid,
    ) -> Result<u64, DomainError>;
}
