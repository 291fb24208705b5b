//! Cart mutators: find-or-create the cart, merge quantities, remove lines.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::entities::cart::{CartItem, ShoppingCart};
use crate::domain::entities::store_account::StoreAccount;
use crate::domain::value_objects::checkout::CartLine;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{CartRepository, ProductRepository, StoreAccountRepository};

/// Cart operations for a signed-in user
pub struct CartService<C, P, A>
where
    C: CartRepository,
    P: ProductRepository,
    A: StoreAccountRepository,
{
    carts: Arc<C>,
    products: Arc<P>,
    accounts: Arc<A>,
}

impl<C, P, A> CartService<C, P, A>
where
    C: CartRepository,
    P: ProductRepository,
    A: StoreAccountRepository,
{
    pub fn new(carts: Arc<C>, products: Arc<P>, accounts: Arc<A>) -> Self {
        Self {
            carts,
            products,
            accounts,
        }
    }

    /// Resolve the user's store account; shopping requires one
    async fn account_for(&self, user_id: Uuid) -> DomainResult<StoreAccount> {
        self.accounts
            .find_by_holder(user_id)
            .await?
            .ok_or_else(|| DomainError::BusinessRule {
                message: "a store account is required before shopping".to_string(),
            })
    }

    /// Add a product to the user's cart.
    ///
    /// Finds or creates the cart; an existing line for the product has the
    /// quantity merged in, otherwise a new line is appended.
    pub async fn add_to_cart(
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

        let cart = match self.carts.find_by_account(account.id).await? {
            Some(cart) => cart,
            None => self.carts.create(ShoppingCart::new(account.id)).await?,
        };

        match cart.item_for(product_id) {
            Some(existing) => {
                self.carts
                    .update_item_quantity(existing.id, existing.quantity + quantity)
                    .await?;
            }
            None => {
                self.carts
                    .add_item(CartItem::new(cart.id, product_id, quantity))
                    .await?;
            }
        }

        info!("added product {} x{} to cart {}", product_id, quantity, cart.id);
        Ok(())
    }

    /// Remove a product's line from the user's cart
    pub async fn remove_from_cart(&self, user_id: Uuid, product_id: Uuid) -> DomainResult<()> {
        let account = self.account_for(user_id).await?;

        let cart = self
            .carts
            .find_by_account(account.id)
            .await?
            .ok_or_else(|| DomainError::not_found("ShoppingCart"))?;

        if !self.carts.remove_item(cart.id, product_id).await? {
            return Err(DomainError::not_found("ShoppingCartItem"));
        }
        Ok(())
    }

    /// The user's cart joined with product data
    pub async fn view_cart(&self, user_id: Uuid) -> DomainResult<Vec<CartLine>> {
        let account = self.account_for(user_id).await?;
        self.carts.list_lines(account.id).await
    }
}
