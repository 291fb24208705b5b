//! MySQL implementation of the OrderRepository trait.
//!
//! Order creation inserts the order, its items and the cart clear in one
//! transaction: the checkout either fully commits or leaves no trace.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ss_core::domain::entities::order::{Order, OrderItem, OrderStatus};
use ss_core::errors::DomainError;
use ss_core::repositories::OrderRepository;

use super::{map_sqlx_err, parse_uuid};

/// MySQL implementation of OrderRepository
pub struct MySqlOrderRepository {
    pool: MySqlPool,
}

impl MySqlOrderRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn status_to_str(status: OrderStatus) -> &'static str {
        match status {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Refunded => "refunded",
        }
    }

    fn status_from_str(value: &str) -> Result<OrderStatus, DomainError> {
        match value {
            "pending" => Ok(OrderStatus::Pending),
            "approved" => Ok(OrderStatus::Approved),
            "refunded" => Ok(OrderStatus::Refunded),
            other => Err(DomainError::internal(format!(
                "unknown order status '{}'",
                other
            ))),
        }
    }

    fn row_to_order(row: &sqlx::mysql::MySqlRow) -> Result<Order, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::internal(e))?;
        let buyer_id: String = row
            .try_get("buyer_id")
            .map_err(|e| DomainError::internal(e))?;
        let payment_method_id: String = row
            .try_get("payment_method_id")
            .map_err(|e| DomainError::internal(e))?;
        let deleted_payment_method_id: Option<String> = row
            .try_get("deleted_payment_method_id")
            .map_err(|e| DomainError::internal(e))?;
        let status: String = row
            .try_get("status")
            .map_err(|e| DomainError::internal(e))?;

        Ok(Order {
            id: parse_uuid(&id, "id")?,
            buyer_id: parse_uuid(&buyer_id, "buyer_id")?,
            payment_method_id: parse_uuid(&payment_method_id, "payment_method_id")?,
            deleted_payment_method_id: deleted_payment_method_id
                .as_deref()
                .map(|v| parse_uuid(v, "deleted_payment_method_id"))
                .transpose()?,
            shipping_address: row
                .try_get("shipping_address")
                .map_err(|e| DomainError::internal(e))?,
            total_price: row
                .try_get::<Decimal, _>("total_price")
                .map_err(|e| DomainError::internal(e))?,
            status: Self::status_from_str(&status)?,
            purchase_date: row
                .try_get::<DateTime<Utc>, _>("purchase_date")
                .map_err(|e| DomainError::internal(e))?,
            items: Vec::new(),
        })
    }

    fn row_to_item(row: &sqlx::mysql::MySqlRow) -> Result<OrderItem, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::internal(e))?;
        let order_id: String = row
            .try_get("order_id")
            .map_err(|e| DomainError::internal(e))?;
        let product_id: String = row
            .try_get("product_id")
            .map_err(|e| DomainError::internal(e))?;

        Ok(OrderItem {
            id: parse_uuid(&id, "id")?,
            order_id: parse_uuid(&order_id, "order_id")?,
            product_id: parse_uuid(&product_id, "product_id")?,
            certificate: row
                .try_get("certificate")
                .map_err(|e| DomainError::internal(e))?,
            total_price: row
                .try_get::<Decimal, _>("total_price")
                .map_err(|e| DomainError::internal(e))?,
            quantity: row
                .try_get("quantity")
                .map_err(|e| DomainError::internal(e))?,
        })
    }

    async fn load_items(&self, order_ids: &[String]) -> Result<Vec<OrderItem>, DomainError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: sqlx::QueryBuilder<sqlx::MySql> = sqlx::QueryBuilder::new(
            "SELECT id, order_id, product_id, certificate, total_price, quantity \
             FROM order_items WHERE order_id IN (",
        );
        let mut separated = builder.separated(", ");
        for order_id in order_ids {
            separated.push_bind(order_id);
        }
        separated.push_unseparated(")");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("failed to load order items", e))?;

        rows.iter().map(Self::row_to_item).collect()
    }
}

#[async_trait]
impl OrderRepository for MySqlOrderRepository {
    async fn create_with_items(
        &self,
        order: Order,
        clear_cart_id: Option<Uuid>,
    ) -> Result<Order, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_err("failed to open transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, buyer_id, payment_method_id, deleted_payment_method_id,
                shipping_address, total_price, status, purchase_date
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(order.id.to_string())
        .bind(order.buyer_id.to_string())
        .bind(order.payment_method_id.to_string())
        .bind(order.deleted_payment_method_id.map(|id| id.to_string()))
        .bind(&order.shipping_address)
        .bind(order.total_price)
        .bind(Self::status_to_str(order.status))
        .bind(order.purchase_date)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_err("order", e))?;

        for item in &order.items {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, product_id, certificate, total_price, quantity
                ) VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(item.id.to_string())
            .bind(item.order_id.to_string())
            .bind(item.product_id.to_string())
            .bind(&item.certificate)
            .bind(item.total_price)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_err("order item", e))?;
        }

        if let Some(cart_id) = clear_cart_id {
            sqlx::query("DELETE FROM cart_items WHERE cart_id = ?")
                .bind(cart_id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_err("failed to clear cart", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_err("failed to commit order", e))?;

        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let row = sqlx::query(
            "SELECT id, buyer_id, payment_method_id, deleted_payment_method_id, \
             shipping_address, total_price, status, purchase_date \
             FROM orders WHERE id = ? LIMIT 1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("failed to find order", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut order = Self::row_to_order(&row)?;
        order.items = self.load_items(&[order.id.to_string()]).await?;
        Ok(Some(order))
    }

    async fn list_for_buyer(&self, buyer_id: Uuid) -> Result<Vec<Order>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, buyer_id, payment_method_id, deleted_payment_method_id, \
             shipping_address, total_price, status, purchase_date \
             FROM orders WHERE buyer_id = ? ORDER BY purchase_date DESC",
        )
        .bind(buyer_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("failed to list orders", e))?;

        let mut orders = rows
            .iter()
            .map(Self::row_to_order)
            .collect::<Result<Vec<_>, _>>()?;

        let ids: Vec<String> = orders.iter().map(|o| o.id.to_string()).collect();
        let items = self.load_items(&ids).await?;
        for item in items {
            if let Some(order) = orders.iter_mut().find(|o| o.id == item.order_id) {
                order.items.push(item);
            }
        }

        Ok(orders)
    }

    async fn exists_for_payment_method(
        &self,
        payment_method_id: Uuid,
    ) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT EXISTS(\
               SELECT 1 FROM orders \
               WHERE payment_method_id = ? OR deleted_payment_method_id = ?\
             ) AS present",
        )
        .bind(payment_method_id.to_string())
        .bind(payment_method_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("failed to check orders for payment method", e))?;

        let present: i8 = row
            .try_get("present")
            .map_err(|e| DomainError::internal(e))?;
        Ok(present == 1)
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
            .bind(Self::status_to_str(status))
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("order", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Order"));
        }
        Ok(())
    }

    async fn mark_payment_method_deleted(
        &self,
        payment_method_id: Uuid,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "UPDATE orders SET deleted_payment_method_id = ? WHERE payment_method_id = ?",
        )
        .bind(payment_method_id.to_string())
        .bind(payment_method_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("order", e))?;

        Ok(result.rows_affected())
    }
}
