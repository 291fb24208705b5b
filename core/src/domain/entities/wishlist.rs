//! Wishlist entity and its line items.
//!
//! Structurally a sibling of the shopping cart: one list per store account,
//! quantity merges on duplicate products.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wishlist, one per store account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wishlist {
    pub id: Uuid,

    /// Owning store account
    pub account_id: Uuid,

    /// Line items, at most one per product
    pub items: Vec<WishlistItem>,
}

/// A wishlist line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: Uuid,
    pub wishlist_id: Uuid,
    pub product_id: Uuid,
    pub quantity: u32,
}

impl Wishlist {
    /// Creates an empty wishlist for an account
    pub fn new(account_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            items: Vec::new(),
        }
    }

    /// The existing line for a product, if any
    pub fn item_for(&self, product_id: Uuid) -> Option<&WishlistItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }
}

impl WishlistItem {
    /// Creates a new line item
    pub fn new(wishlist_id: Uuid, product_id: Uuid, quantity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            wishlist_id,
            product_id,
            quantity,
        }
    }
}
