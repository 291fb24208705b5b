//! Catalog product entity.
//!
//! Suppliers exist as a table the catalog queries join against (display
//! name plus the store account whose alias is the payout identity); no
//! operation creates or mutates them, so they carry no entity here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,

    /// The supplier selling this product
    pub supplier_id: Uuid,

    pub name: String,
    pub description: String,

    /// Free-form type used as a search facet
    pub product_type: String,

    /// Unit price, 2 decimal places
    pub price: Decimal,

    /// Remaining stock; `None` when the supplier does not track it
    pub stock: Option<i32>,
}
