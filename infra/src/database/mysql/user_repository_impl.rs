//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ss_core::domain::entities::user::User;
use ss_core::errors::DomainError;
use ss_core::repositories::UserRepository;

use super::{map_sqlx_err, parse_uuid};

const USER_COLUMNS: &str = "id, username, email, password_hash, email_confirmed, \
     two_factor_enabled, first_name, last_name, company_name, join_date, updated_at, \
     last_login_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("failed to get id: {}", e)))?;

        Ok(User {
            id: parse_uuid(&id, "id")?,
            username: row
                .try_get("username")
                .map_err(|e| DomainError::internal(e))?,
            email: row.try_get("email").map_err(|e| DomainError::internal(e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::internal(e))?,
            email_confirmed: row
                .try_get("email_confirmed")
                .map_err(|e| DomainError::internal(e))?,
            two_factor_enabled: row
                .try_get("two_factor_enabled")
                .map_err(|e| DomainError::internal(e))?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| DomainError::internal(e))?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| DomainError::internal(e))?,
            company_name: row
                .try_get("company_name")
                .map_err(|e| DomainError::internal(e))?,
            join_date: row
                .try_get::<DateTime<Utc>, _>("join_date")
                .map_err(|e| DomainError::internal(e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::internal(e))?,
            last_login_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_login_at")
                .map_err(|e| DomainError::internal(e))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("failed to find user by id", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE username = ? LIMIT 1",
            USER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("failed to find user by username", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER(?) LIMIT 1",
            USER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("failed to find user by email", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, username, email, password_hash, email_confirmed,
                two_factor_enabled, first_name, last_name, company_name,
                join_date, updated_at, last_login_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.email_confirmed)
            .bind(user.two_factor_enabled)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.company_name)
            .bind(user.join_date)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("user", e))?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                username = ?, email = ?, password_hash = ?, email_confirmed = ?,
                two_factor_enabled = ?, first_name = ?, last_name = ?,
                company_name = ?, updated_at = ?, last_login_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.email_confirmed)
            .bind(user.two_factor_enabled)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.company_name)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User"));
        }
        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER(?)) AS present",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("failed to check email", e))?;

        let present: i8 = row
            .try_get("present")
            .map_err(|e| DomainError::internal(e))?;
        Ok(present == 1)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let row =
            sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?) AS present")
                .bind(username)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_sqlx_err("failed to check username", e))?;

        let present: i8 = row
            .try_get("present")
            .map_err(|e| DomainError::internal(e))?;
        Ok(present == 1)
    }
}
