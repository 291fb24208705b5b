//! Order DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use ss_core::domain::entities::order::Order;
use ss_core::domain::entities::payment_method::PaymentMethod;

use super::cart::LineResponse;
use super::manage::PaymentMethodResponse;

/// Body of `POST /orders`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlaceOrderRequest {
    pub payment_method_id: Uuid,

    #[validate(length(min = 1, max = 512))]
    pub shipping_address: String,
}

/// What the checkout page needs: the cart as it will be charged and the
/// active payment methods to choose from
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutContextResponse {
    pub cart_items: Vec<LineResponse>,
    pub payment_methods: Vec<PaymentMethodResponse>,
}

impl CheckoutContextResponse {
    pub fn new(
        lines: Vec<ss_core::domain::value_objects::checkout::CartLine>,
        methods: Vec<PaymentMethod>,
    ) -> Self {
        Self {
            cart_items: lines.into_iter().map(LineResponse::from).collect(),
            payment_methods: methods.iter().map(PaymentMethodResponse::from).collect(),
        }
    }
}

/// A placed order as returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub order: Order,
}
