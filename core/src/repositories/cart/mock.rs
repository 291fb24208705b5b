//! Mock implementation of CartRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::cart::{CartItem, ShoppingCart};
use crate::domain::value_objects::checkout::CartLine;
use crate::errors::DomainError;

use super::trait_::CartRepository;

/// Mock cart repository for testing
///
/// `list_lines` joins against product data seeded through
/// [`MockCartRepository::register_product`], standing in for the SQL join.
#[derive(Default)]
pub struct MockCartRepository {
    carts: Arc<RwLock<HashMap<Uuid, ShoppingCart>>>,
    product_info: Arc<RwLock<HashMap<Uuid, CartLine>>>,
}

impl MockCartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the product/supplier data a cart line joins against.
    /// The quantity on the template is ignored.
    pub async fn register_product(&self, template: CartLine) {
        self.product_info
            .write()
            .await
            .insert(template.product_id, template);
    }
}

#[async_trait]
impl CartRepository for MockCartRepository {
    async fn find_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<ShoppingCart>, DomainError> {
        let carts = self.carts.read().await;
        Ok(carts.values().find(|c| c.account_id == account_id).cloned())
    }

    async fn create(&self, cart: ShoppingCart) -> Result<ShoppingCart, DomainError> {
        let mut carts = self.carts.write().await;
        carts.insert(cart.id, cart.clone());
        Ok(cart)
    }

    async fn add_item(&self, item: CartItem) -> Result<CartItem, DomainError> {
        let mut carts = self.carts.write().await;
        let cart = carts.get_mut(&item.cart_id).ok_or(DomainError::NotFound {
            resource: "ShoppingCart".to_string(),
        })?;
        cart.items.push(item.clone());
        Ok(item)
    }

    async fn update_item_quantity(
        &self,
        item_id: Uuid,
        quantity: u32,
    ) -> Result<(), DomainError> {
        let mut carts = self.carts.write().await;
        for cart in carts.values_mut() {
            if let Some(item) = cart.items.iter_mut().find(|i| i.id == item_id) {
                item.quantity = quantity;
                return Ok(());
            }
        }
        Err(DomainError::NotFound {
            resource: "CartItem".to_string(),
        })
    }

    async fn remove_item(&self, cart_id: Uuid, product_id: Uuid) -> Result<bool, DomainError> {
        let mut carts = self.carts.write().await;
        let cart = match carts.get_mut(&cart_id) {
            Some(cart) => cart,
            None => return Ok(false),
        };
        let before = cart.items.len();
        cart.items.retain(|i| i.product_id != product_id);
        Ok(cart.items.len() < before)
    }

    async fn list_lines(&self, account_id: Uuid) -> Result<Vec<CartLine>, DomainError> {
        let carts = self.carts.read().await;
        let info = self.product_info.read().await;

        let Some(cart) = carts.values().find(|c| c.account_id == account_id) else {
            return Ok(Vec::new());
        };

        let mut lines = Vec::new();
        for item in &cart.items {
            let template = info.get(&item.product_id).ok_or(DomainError::NotFound {
                resource: "Product".to_string(),
            })?;
            lines.push(CartLine {
                quantity: item.quantity,
                ..template.clone()
            });
        }
        Ok(lines)
    }
}
