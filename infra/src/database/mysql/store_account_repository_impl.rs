//! MySQL implementation of the StoreAccountRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ss_core::domain::entities::store_account::{AccountType, StoreAccount};
use ss_core::errors::DomainError;
use ss_core::repositories::StoreAccountRepository;

use super::{map_sqlx_err, parse_uuid};

/// MySQL implementation of StoreAccountRepository
pub struct MySqlStoreAccountRepository {
    pool: MySqlPool,
}

impl MySqlStoreAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn account_type_to_str(account_type: AccountType) -> &'static str {
        match account_type {
            AccountType::Personal => "personal",
            AccountType::Business => "business",
            AccountType::Dummy => "dummy",
        }
    }

    fn account_type_from_str(value: &str) -> Result<AccountType, DomainError> {
        match value {
            "personal" => Ok(AccountType::Personal),
            "business" => Ok(AccountType::Business),
            "dummy" => Ok(AccountType::Dummy),
            other => Err(DomainError::internal(format!(
                "unknown account type '{}'",
                other
            ))),
        }
    }

    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<StoreAccount, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::internal(e))?;
        let holder_id: String = row
            .try_get("holder_id")
            .map_err(|e| DomainError::internal(e))?;
        let account_type: String = row
            .try_get("account_type")
            .map_err(|e| DomainError::internal(e))?;

        Ok(StoreAccount {
            id: parse_uuid(&id, "id")?,
            holder_id: parse_uuid(&holder_id, "holder_id")?,
            alias: row.try_get("alias").map_err(|e| DomainError::internal(e))?,
            account_type: Self::account_type_from_str(&account_type)?,
            date_opened: row
                .try_get::<DateTime<Utc>, _>("date_opened")
                .map_err(|e| DomainError::internal(e))?,
        })
    }
}

#[async_trait]
impl StoreAccountRepository for MySqlStoreAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoreAccount>, DomainError> {
        let row = sqlx::query(
            "SELECT id, holder_id, alias, account_type, date_opened \
             FROM store_accounts WHERE id = ? LIMIT 1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("failed to find store account", e))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn find_by_holder(
        &self,
        holder_id: Uuid,
    ) -> Result<Option<StoreAccount>, DomainError> {
        let row = sqlx::query(
            "SELECT id, holder_id, alias, account_type, date_opened \
             FROM store_accounts WHERE holder_id = ? LIMIT 1",
        )
        .bind(holder_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("failed to find store account by holder", e))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn exists_by_alias(&self, alias: &str) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM store_accounts WHERE alias = ?) AS present",
        )
        .bind(alias)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("failed to check alias", e))?;

        let present: i8 = row
            .try_get("present")
            .map_err(|e| DomainError::internal(e))?;
        Ok(present == 1)
    }

    async fn create(&self, account: StoreAccount) -> Result<StoreAccount, DomainError> {
        let query = r#"
            INSERT INTO store_accounts (id, holder_id, alias, account_type, date_opened)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(account.holder_id.to_string())
            .bind(&account.alias)
            .bind(Self::account_type_to_str(account.account_type))
            .bind(account.date_opened)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("store account", e))?;

        Ok(account)
    }

    async fn update(&self, account: StoreAccount) -> Result<StoreAccount, DomainError> {
        let result = sqlx::query(
            "UPDATE store_accounts SET alias = ?, account_type = ? WHERE id = ?",
        )
        .bind(&account.alias)
        .bind(Self::account_type_to_str(account.account_type))
        .bind(account.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("store account", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("StoreAccount"));
        }
        Ok(account)
    }
}
