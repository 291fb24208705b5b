//! Wishlist mutators, mirroring the cart flow.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::store_account::StoreAccount;
use crate::domain::entities::wishlist::{Wishlist, WishlistItem};
use crate::domain::value_objects::checkout::CartLine;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ProductRepository, StoreAccountRepository, WishlistRepository};

/// Wishlist operations for a signed-in user
pub struct WishlistService<W, P, A>
where
    W: WishlistRepository,
    P: ProductRepository,
    A: StoreAccountRepository,
{
    wishlists: Arc<W>,
    products: Arc<P>,
    accounts: Arc<A>,
}

impl<W, P, A> WishlistService<W, P, A>
where
    W: WishlistRepository,
    P: ProductRepository,
    A: StoreAccountRepository,
{
    pub fn new(wishlists: Arc<W>, products: Arc<P>, accounts: Arc<A>) -> Self {
        Self {
            wishlists,
            products,
            accounts,
        }
    }

    async fn account_for(&self, user_id: Uuid) -> DomainResult<StoreAccount> {
        self.accounts
            .find_by_holder(user_id)
            .await?
            .ok_or_else(|| DomainError::BusinessRule {
                message: "a store account is required before shopping".to_string(),
            })
    }

    /// Add a product to the wishlist, creating the list on first use and
    /// merging quantities on duplicates
    pub async fn add_to_wishlist(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: u32,
    ) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::validation(
                "please choose a non-zero quantity",
            ));
        }

        let account = self.account_for(user_id).await?;

        if self.products.find_by_id(product_id).await?.is_none() {
            return Err(DomainError::not_found("Product"));
        }

        let wishlist = match self.wishlists.find_by_account(account.id).await? {
            Some(wishlist) => wishlist,
            None => self.wishlists.create(Wishlist::new(account.id)).await?,
        };

        match wishlist.item_for(product_id) {
            Some(existing) => {
                self.wishlists
                    .update_item_quantity(existing.id, existing.quantity + quantity)
                    .await?;
            }
            None => {
                self.wishlists
                    .add_item(WishlistItem::new(wishlist.id, product_id, quantity))
                    .await?;
            }
        }

        Ok(())
    }

    /// Remove a product's line from the wishlist
    pub async fn remove_from_wishlist(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> DomainResult<()> {
        let account = self.account_for(user_id).await?;

        let wishlist = self
            .wishlists
            .find_by_account(account.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Wishlist"))?;

        if !self.wishlists.remove_item(wishlist.id, product_id).await? {
            return Err(DomainError::not_found("WishlistItem"));
        }
        Ok(())
    }

    /// The user's wishlist joined with product data
    pub async fn view_wishlist(&self, user_id: Uuid) -> DomainResult<Vec<CartLine>> {
        let account = self.account_for(user_id).await?;
        self.wishlists.list_lines(account.id).await
    }
}
