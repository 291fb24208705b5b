//! Shopping cart entity and its line items.
//!
//! One cart per store account. Adding a product that already has a line
//! merges quantities instead of creating a second line.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shopping cart, one per store account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingCart {
    pub id: Uuid,

    /// Owning store account
    pub account_id: Uuid,

    /// Line items, at most one per product
    pub items: Vec<CartItem>,
}

/// A cart line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: u32,
}

impl ShoppingCart {
    /// Creates an empty cart for an account
    pub fn new(account_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            items: Vec::new(),
        }
    }

    /// The existing line for a product, if any
    pub fn item_for(&self, product_id: Uuid) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CartItem {
    /// Creates a new line item
    pub fn new(cart_id: Uuid, product_id: Uuid, quantity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            cart_id,
            product_id,
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cart_is_empty() {
        let cart = ShoppingCart::new(Uuid::new_v4());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_item_for_finds_line() {
        let mut cart = ShoppingCart::new(Uuid::new_v4());
        let product = Uuid::new_v4();
        cart.items.push(CartItem::new(cart.id, product, 2));

        assert_eq!(cart.item_for(product).map(|i| i.quantity), Some(2));
        assert!(cart.item_for(Uuid::new_v4()).is_none());
    }
}
