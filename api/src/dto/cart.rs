//! Cart and wishlist DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use ss_core::domain::value_objects::checkout::CartLine;

/// Body of `POST /cart/items` and `POST /wishlist/items`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddItemRequest {
    pub product_id: Uuid,

    /// Must be a positive whole number
    #[validate(range(min = 1))]
    pub quantity: u32,
}

/// A cart or wishlist line as rendered to the client
#[derive(Debug, Clone, Serialize)]
pub struct LineResponse {
    pub product_id: Uuid,
    pub product_name: String,
    pub product_type: String,
    pub unit_price: rust_decimal::Decimal,
    pub quantity: u32,
    pub supplier_name: String,
    pub line_total: rust_decimal::Decimal,
}

impl From<CartLine> for LineResponse {
    fn from(line: CartLine) -> Self {
        let line_total = line.line_total();
        Self {
            product_id: line.product_id,
            product_name: line.product_name,
            product_type: line.product_type,
            unit_price: line.unit_price,
            quantity: line.quantity,
            supplier_name: line.supplier_name,
            line_total,
        }
    }
}
