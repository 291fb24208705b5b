//! MySQL implementation of the WishlistRepository trait.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ss_core::domain::entities::wishlist::{Wishlist, WishlistItem};
use ss_core::domain::value_objects::checkout::CartLine;
use ss_core::errors::DomainError;
use ss_core::repositories::WishlistRepository;

use super::{map_sqlx_err, parse_uuid};

/// MySQL implementation of WishlistRepository
pub struct MySqlWishlistRepository {
    pool: MySqlPool,
}

impl MySqlWishlistRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_item(row: &sqlx::mysql::MySqlRow) -> Result<WishlistItem, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::internal(e))?;
        let wishlist_id: String = row
            .try_get("wishlist_id")
            .map_err(|e| DomainError::internal(e))?;
        let product_id: String = row
            .try_get("product_id")
            .map_err(|e| DomainError::internal(e))?;

        Ok(WishlistItem {
            id: parse_uuid(&id, "id")?,
            wishlist_id: parse_uuid(&wishlist_id, "wishlist_id")?,
            product_id: parse_uuid(&product_id, "product_id")?,
            quantity: row
                .try_get("quantity")
                .map_err(|e| DomainError::internal(e))?,
        })
    }
}

#[async_trait]
impl WishlistRepository for MySqlWishlistRepository {
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Wishlist>, DomainError> {
        let wishlist_row =
            sqlx::query("SELECT id, account_id FROM wishlists WHERE account_id = ? LIMIT 1")
                .bind(account_id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_sqlx_err("failed to find wishlist", e))?;

        let Some(wishlist_row) = wishlist_row else {
            return Ok(None);
        };

        let id: String = wishlist_row
            .try_get("id")
            .map_err(|e| DomainError::internal(e))?;
        let wishlist_id = parse_uuid(&id, "id")?;

        let item_rows = sqlx::query(
            "SELECT id, wishlist_id, product_id, quantity \
             FROM wishlist_items WHERE wishlist_id = ?",
        )
        .bind(&id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("failed to load wishlist items", e))?;

        Ok(Some(Wishlist {
            id: wishlist_id,
            account_id,
            items: item_rows
                .iter()
                .map(Self::row_to_item)
                .collect::<Result<Vec<_>, _>>()?,
        }))
    }

    async fn create(&self, wishlist: Wishlist) -> Result<Wishlist, DomainError> {
        sqlx::query("INSERT INTO wishlists (id, account_id) VALUES (?, ?)")
            .bind(wishlist.id.to_string())
            .bind(wishlist.account_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("wishlist", e))?;

        Ok(wishlist)
    }

    async fn add_item(&self, item: WishlistItem) -> Result<WishlistItem, DomainError> {
        sqlx::query(
            "INSERT INTO wishlist_items (id, wishlist_id, product_id, quantity) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(item.id.to_string())
        .bind(item.wishlist_id.to_string())
        .bind(item.product_id.to_string())
        .bind(item.quantity)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("wishlist item", e))?;

        Ok(item)
    }

    async fn update_item_quantity(
        &self,
        item_id: Uuid,
        quantity: u32,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE wishlist_items SET quantity = ? WHERE id = ?")
            .bind(quantity)
            .bind(item_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("wishlist item", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("WishlistItem"));
        }
        Ok(())
    }

    async fn remove_item(
        &self,
        wishlist_id: Uuid,
        product_id: Uuid,
    ) -> Result<bool, DomainError> {
        let result =
            sqlx::query("DELETE FROM wishlist_items WHERE wishlist_id = ? AND product_id = ?")
                .bind(wishlist_id.to_string())
                .bind(product_id.to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_err("failed to remove wishlist item", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_lines(&self, account_id: Uuid) -> Result<Vec<CartLine>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT
                wi.product_id AS product_id,
                p.name AS product_name,
                p.product_type AS product_type,
                p.price AS unit_price,
                wi.quantity AS quantity,
                s.name AS supplier_name,
                sa.alias AS vendor_alias
            FROM wishlist_items wi
            INNER JOIN wishlists w ON w.id = wi.wishlist_id
            INNER JOIN products p ON p.id = wi.product_id
            INNER JOIN suppliers s ON s.id = p.supplier_id
            INNER JOIN store_accounts sa ON sa.id = s.account_id
            WHERE w.account_id = ?
            ORDER BY p.name
            "#,
        )
        .bind(account_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("failed to list wishlist lines", e))?;

        rows.iter()
            .map(|row| {
                let product_id: String = row
                    .try_get("product_id")
                    .map_err(|e| DomainError::internal(e))?;
                Ok(CartLine {
                    product_id: parse_uuid(&product_id, "product_id")?,
                    product_name: row
                        .try_get("product_name")
                        .map_err(|e| DomainError::internal(e))?,
                    product_type: row
                        .try_get("product_type")
                        .map_err(|e| DomainError::internal(e))?,
                    unit_price: row
                        .try_get::<Decimal, _>("unit_price")
                        .map_err(|e| DomainError::internal(e))?,
                    quantity: row
                        .try_get("quantity")
                        .map_err(|e| DomainError::internal(e))?,
                    supplier_name: row
                        .try_get("supplier_name")
                        .map_err(|e| DomainError::internal(e))?,
                    vendor_alias: row
                        .try_get("vendor_alias")
                        .map_err(|e| DomainError::internal(e))?,
                })
            })
            .collect()
    }
}
