//! Wishlist repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::wishlist::{Wishlist, WishlistItem};
use crate::domain::value_objects::checkout::CartLine;
use crate::errors::DomainError;

/// Repository trait for Wishlist persistence
#[async_trait]
pub trait WishlistRepository: Send + Sync {
    /// The account's wishlist with its items, if one exists
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Wishlist>, DomainError>;

    /// Create an empty wishlist for an account
    async fn create(&self, wishlist: Wishlist) -> Result<Wishlist, DomainError>;

    /// Insert a new line item
    async fn add_item(&self, item: WishlistItem) -> Result<WishlistItem, DomainError>;

    /// Replace the quantity on an existing line
    async fn update_item_quantity(&self, item_id: Uuid, quantity: u32)
        -> Result<(), DomainError>;

    /// Remove the line for a product. Returns false when no such line exists.
    async fn remove_item(&self, wishlist_id: Uuid, product_id: Uuid)
        -> Result<bool, DomainError>;

    /// The account's wishlist joined with product data for display
    async fn list_lines(&self, account_id: Uuid) -> Result<Vec<CartLine>, DomainError>;
}
