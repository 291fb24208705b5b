//! Shopping cart repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::cart::{CartItem, ShoppingCart};
use crate::domain::value_objects::checkout::CartLine;
use crate::errors::DomainError;

/// Repository trait for ShoppingCart persistence
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// The account's cart with its items, if one exists
    async fn find_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<ShoppingCart>, DomainError>;

    /// Create an empty cart for an account
    async fn create(&self, cart: ShoppingCart) -> Result<ShoppingCart, DomainError>;

    /// Insert a new line item
    async fn add_item(&self, item: CartItem) -> Result<CartItem, DomainError>;

    /// Replace the quantity on an existing line
    async fn update_item_quantity(&self, item_id: Uuid, quantity: u32)
        -> Result<(), DomainError>;

    /// Remove the line for a product. Returns false when no such line exists.
    async fn remove_item(&self, cart_id: Uuid, product_id: Uuid) -> Result<bool, DomainError>;

    /// The account's cart joined with product, supplier and vendor-alias
    /// data, ready for display and checkout
    async fn list_lines(&self, account_id: Uuid) -> Result<Vec<CartLine>, DomainError>;
}
