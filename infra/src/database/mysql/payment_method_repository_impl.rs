//! MySQL implementation of the PaymentMethodRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ss_core::domain::entities::payment_method::PaymentMethod;
use ss_core::errors::DomainError;
use ss_core::repositories::PaymentMethodRepository;

use super::{map_sqlx_err, parse_uuid};

/// MySQL implementation of PaymentMethodRepository
pub struct MySqlPaymentMethodRepository {
    pool: MySqlPool,
}

impl MySqlPaymentMethodRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_method(row: &sqlx::mysql::MySqlRow) -> Result<PaymentMethod, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::internal(e))?;
        let account_id: String = row
            .try_get("account_id")
            .map_err(|e| DomainError::internal(e))?;

        Ok(PaymentMethod {
            id: parse_uuid(&id, "id")?,
            account_id: parse_uuid(&account_id, "account_id")?,
            card_number: row
                .try_get("card_number")
                .map_err(|e| DomainError::internal(e))?,
            key_pin: row
                .try_get("key_pin")
                .map_err(|e| DomainError::internal(e))?,
            deactivated: row
                .try_get("deactivated")
                .map_err(|e| DomainError::internal(e))?,
        })
    }
}

#[async_trait]
impl PaymentMethodRepository for MySqlPaymentMethodRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PaymentMethod>, DomainError> {
        let row = sqlx::query(
            "SELECT id, account_id, card_number, key_pin, deactivated \
             FROM payment_methods WHERE id = ? LIMIT 1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("failed to find payment method", e))?;

        row.as_ref().map(Self::row_to_method).transpose()
    }

    async fn list_for_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<PaymentMethod>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, account_id, card_number, key_pin, deactivated \
             FROM payment_methods WHERE account_id = ?",
        )
        .bind(account_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("failed to list payment methods", e))?;

        rows.iter().map(Self::row_to_method).collect()
    }

    async fn list_active_for_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<PaymentMethod>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, account_id, card_number, key_pin, deactivated \
             FROM payment_methods WHERE account_id = ? AND deactivated = FALSE",
        )
        .bind(account_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("failed to list active payment methods", e))?;

        rows.iter().map(Self::row_to_method).collect()
    }

    async fn find_by_card(
        &self,
        account_id: Uuid,
        card_number: &str,
        key_pin: &str,
    ) -> Result<Option<PaymentMethod>, DomainError> {
        let row = sqlx::query(
            "SELECT id, account_id, card_number, key_pin, deactivated \
             FROM payment_methods \
             WHERE account_id = ? AND card_number = ? AND key_pin = ? LIMIT 1",
        )
        .bind(account_id.to_string())
        .bind(card_number)
        .bind(key_pin)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("failed to find payment method by card", e))?;

        row.as_ref().map(Self::row_to_method).transpose()
    }

    async fn create(&self, method: PaymentMethod) -> Result<PaymentMethod, DomainError> {
        let query = r#"
            INSERT INTO payment_methods (id, account_id, card_number, key_pin, deactivated)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(method.id.to_string())
            .bind(method.account_id.to_string())
            .bind(&method.card_number)
            .bind(&method.key_pin)
            .bind(method.deactivated)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("payment method", e))?;

        Ok(method)
    }

    async fn update(&self, method: PaymentMethod) -> Result<PaymentMethod, DomainError> {
        let result =
            sqlx::query("UPDATE payment_methods SET deactivated = ? WHERE id = ?")
                .bind(method.deactivated)
                .bind(method.id.to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_err("payment method", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("PaymentMethod"));
        }
        Ok(method)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM payment_methods WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("failed to delete payment method", e))?;

        Ok(result.rows_affected() > 0)
    }
}
