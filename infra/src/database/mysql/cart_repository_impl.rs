//! MySQL implementation of the CartRepository trait.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ss_core::domain::entities::cart::{CartItem, ShoppingCart};
use ss_core::domain::value_objects::checkout::CartLine;
use ss_core::errors::DomainError;
use ss_core::repositories::CartRepository;

use super::{map_sqlx_err, parse_uuid};

/// MySQL implementation of CartRepository
pub struct MySqlCartRepository {
    pool: MySqlPool,
}

impl MySqlCartRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_item(row: &sqlx::mysql::MySqlRow) -> Result<CartItem, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::internal(e))?;
        let cart_id: String = row
            .try_get("cart_id")
            .map_err(|e| DomainError::internal(e))?;
        let product_id: String = row
            .try_get("product_id")
            .map_err(|e| DomainError::internal(e))?;
        let quantity: u32 = row
            .try_get("quantity")
            .map_err(|e| DomainError::internal(e))?;

        Ok(CartItem {
            id: parse_uuid(&id, "id")?,
            cart_id: parse_uuid(&cart_id, "cart_id")?,
            product_id: parse_uuid(&product_id, "product_id")?,
            quantity,
        })
    }

    fn row_to_line(row: &sqlx::mysql::MySqlRow) -> Result<CartLine, DomainError> {
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
    }
}

#[async_trait]
impl CartRepository for MySqlCartRepository {
    async fn find_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<ShoppingCart>, DomainError> {
        let cart_row = sqlx::query(
            "SELECT id, account_id FROM shopping_carts WHERE account_id = ? LIMIT 1",
        )
        .bind(account_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("failed to find cart", e))?;

        let Some(cart_row) = cart_row else {
            return Ok(None);
        };

        let id: String = cart_row
            .try_get("id")
            .map_err(|e| DomainError::internal(e))?;
        let cart_id = parse_uuid(&id, "id")?;

        let item_rows = sqlx::query(
            "SELECT id, cart_id, product_id, quantity FROM cart_items WHERE cart_id = ?",
        )
        .bind(&id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("failed to load cart items", e))?;

        Ok(Some(ShoppingCart {
            id: cart_id,
            account_id,
            items: item_rows
                .iter()
                .map(Self::row_to_item)
                .collect::<Result<Vec<_>, _>>()?,
        }))
    }

    async fn create(&self, cart: ShoppingCart) -> Result<ShoppingCart, DomainError> {
        sqlx::query("INSERT INTO shopping_carts (id, account_id) VALUES (?, ?)")
            .bind(cart.id.to_string())
            .bind(cart.account_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("shopping cart", e))?;

        Ok(cart)
    }

    async fn add_item(&self, item: CartItem) -> Result<CartItem, DomainError> {
        sqlx::query(
            "INSERT INTO cart_items (id, cart_id, product_id, quantity) VALUES (?, ?, ?, ?)",
        )
        .bind(item.id.to_string())
        .bind(item.cart_id.to_string())
        .bind(item.product_id.to_string())
        .bind(item.quantity)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("cart item", e))?;

        Ok(item)
    }

    async fn update_item_quantity(
        &self,
        item_id: Uuid,
        quantity: u32,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE cart_items SET quantity = ? WHERE id = ?")
            .bind(quantity)
            .bind(item_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("cart item", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("CartItem"));
        }
        Ok(())
    }

    async fn remove_item(&self, cart_id: Uuid, product_id: Uuid) -> Result<bool, DomainError> {
        let result =
            sqlx::query("DELETE FROM cart_items WHERE cart_id = ? AND product_id = ?")
                .bind(cart_id.to_string())
                .bind(product_id.to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_err("failed to remove cart item", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_lines(&self, account_id: Uuid) -> Result<Vec<CartLine>, DomainError> {
        // The vendor alias is the supplier's store-account alias; checkout
        // charges against it per vendor group.
        let rows = sqlx::query(
            r#"
            SELECT
                ci.product_id AS product_id,
                p.name AS product_name,
                p.product_type AS product_type,
                p.price AS unit_price,
                ci.quantity AS quantity,
                s.name AS supplier_name,
                sa.alias AS vendor_alias
            FROM cart_items ci
            INNER JOIN shopping_carts sc ON sc.id = ci.cart_id
            INNER JOIN products p ON p.id = ci.product_id
            INNER JOIN suppliers s ON s.id = p.supplier_id
            INNER JOIN store_accounts sa ON sa.id = s.account_id
            WHERE sc.account_id = ?
            ORDER BY p.name
            "#,
        )
        .bind(account_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("failed to list cart lines", e))?;

        rows.iter().map(Self::row_to_line).collect()
    }
}
