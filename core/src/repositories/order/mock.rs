//! Mock implementation of OrderRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::order::{Order, OrderStatus};
use crate::errors::DomainError;

use super::trait_::OrderRepository;

/// Mock order repository for testing
///
/// Carts to clear are recorded in `cleared_carts` so tests can assert the
/// cart-clearing side of the checkout commit.
#[derive(Default)]
pub struct MockOrderRepository {
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
    pub cleared_carts: Arc<RwLock<Vec<Uuid>>>,
}

impl MockOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with an order
    pub async fn insert(&self, order: Order) {
        self.orders.write().await.insert(order.id, order);
    }
}

#[async_trait]
impl OrderRepository for MockOrderRepository {
    async fn create_with_items(
        &self,
        order: Order,
        clear_cart_id: Option<Uuid>,
    ) -> Result<Order, DomainError> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id, order.clone());

        if let Some(cart_id) = clear_cart_id {
            self.cleared_carts.write().await.push(cart_id);
        }

        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn list_for_buyer(&self, buyer_id: Uuid) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders.read().await;
        let mut result: Vec<Order> = orders
            .values()
            .filter(|o| o.buyer_id == buyer_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.purchase_date.cmp(&a.purchase_date));
        Ok(result)
    }

    async fn exists_for_payment_method(
        &self,
        payment_method_id: Uuid,
    ) -> Result<bool, DomainError> {
        let orders = self.orders.read().await;
        Ok(orders
            .values()
            .any(|o| o.payment_method_id == payment_method_id))
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<(), DomainError> {
        let mut orders = self.orders.write().await;
        let order = orders.get_mut(&id).ok_or(DomainError::NotFound {
            resource: "Order".to_string(),
        })?;
        order.status = status;
        Ok(())
    }

    async fn mark_payment_method_deleted(
        &self,
        payment_method_id: Uuid,
    ) -> Result<u64, DomainError> {
        let mut orders = self.orders.write().await;
        let mut touched = 0;
        for order in orders.values_mut() {
            if order.payment_method_id == payment_method_id {
                order.deleted_payment_method_id = Some(payment_method_id);
                touched += 1;
            }
        }
        Ok(touched)
    }
}
