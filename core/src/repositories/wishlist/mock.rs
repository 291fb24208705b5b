//! Mock implementation of WishlistRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::wishlist::{Wishlist, WishlistItem};
use crate::domain::value_objects::checkout::CartLine;
use crate::errors::DomainError;

use super::trait_::WishlistRepository;

/// Mock wishlist repository for testing
#[derive(Default)]
pub struct MockWishlistRepository {
    wishlists: Arc<RwLock<HashMap<Uuid, Wishlist>>>,
    product_info: Arc<RwLock<HashMap<Uuid, CartLine>>>,
}

impl MockWishlistRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the product data a wishlist line joins against
    pub async fn register_product(&self, template: CartLine) {
        self.product_info
            .write()
            .await
            .insert(template.product_id, template);
    }
}

#[async_trait]
impl WishlistRepository for MockWishlistRepository {
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Wishlist>, DomainError> {
        let wishlists = self.wishlists.read().await;
        Ok(wishlists
            .values()
            .find(|w| w.account_id == account_id)
            .cloned())
    }

    async fn create(&self, wishlist: Wishlist) -> Result<Wishlist, DomainError> {
        let mut wishlists = self.wishlists.write().await;
        wishlists.insert(wishlist.id, wishlist.clone());
        Ok(wishlist)
    }

    async fn add_item(&self, item: WishlistItem) -> Result<WishlistItem, DomainError> {
        let mut wishlists = self.wishlists.write().await;
        let wishlist = wishlists
            .get_mut(&item.wishlist_id)
            .ok_or(DomainError::NotFound {
                resource: "Wishlist".to_string(),
            })?;
        wishlist.items.push(item.clone());
        Ok(item)
    }

    async fn update_item_quantity(
        &self,
        item_id: Uuid,
        quantity: u32,
    ) -> Result<(), DomainError> {
        let mut wishlists = self.wishlists.write().await;
        for wishlist in wishlists.values_mut() {
            if let Some(item) = wishlist.items.iter_mut().find(|i| i.id == item_id) {
                item.quantity = quantity;
                return Ok(());
            }
        }
        Err(DomainError::NotFound {
            resource: "WishlistItem".to_string(),
        })
    }

    async fn remove_item(
        &self,
        wishlist_id: Uuid,
        product_id: Uuid,
    ) -> Result<bool, DomainError> {
        let mut wishlists = self.wishlists.write().await;
        let wishlist = match wishlists.get_mut(&wishlist_id) {
            Some(wishlist) => wishlist,
            None => return Ok(false),
        };
        let before = wishlist.items.len();
        wishlist.items.retain(|i| i.product_id != product_id);
        Ok(wishlist.items.len() < before)
    }

    async fn list_lines(&self, account_id: Uuid) -> Result<Vec<CartLine>, DomainError> {
        let wishlists = self.wishlists.read().await;
        let info = self.product_info.read().await;

        let Some(wishlist) = wishlists.values().find(|w| w.account_id == account_id) else {
            return Ok(Vec::new());
        };

        let mut lines = Vec::new();
        for item in &wishlist.items {
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
