//! Store account entity: the commercial identity attached to a user.
//!
//! The account's alias is the handle sent (RSA-encrypted) to the bank API
//! in place of real account identifiers, both when the user pays and when a
//! supplier is paid out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the type of store account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// An individual shopper
    Personal,
    /// A business account, used by suppliers
    Business,
    /// Placeholder accounts created for seeded suppliers
    Dummy,
}

/// Store account entity, one per user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreAccount {
    /// Unique identifier for the account
    pub id: Uuid,

    /// The user who holds this account
    pub holder_id: Uuid,

    /// Unique handle used as the external identity toward the bank
    pub alias: Option<String>,

    /// Type of account
    pub account_type: AccountType,

    /// Timestamp when the account was opened
    pub date_opened: DateTime<Utc>,
}

impl StoreAccount {
    /// Creates a new store account
    pub fn new(holder_id: Uuid, account_type: AccountType, alias: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            holder_id,
            alias,
            account_type,
            date_opened: Utc::now(),
        }
    }

    /// Sets the bank-facing alias
    pub fn set_alias(&mut self, alias: String) {
        self.alias = Some(alias);
    }

    /// Whether the account can transact with the bank
    pub fn has_alias(&self) -> bool {
        self.alias.as_deref().map(|a| !a.is_empty()).unwrap_or(false)
    }
}
