//! Order entity: the snapshot of a completed purchase.
//!
//! Each line carries the certificate the bank returned when funds were
//! reserved for that line's vendor; refunds replay those certificates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// Order lifecycle. Transitions are one-way:
/// `Pending -> Approved -> Refunded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approved,
    Refunded,
}

/// A placed order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,

    /// Buying store account
    pub buyer_id: Uuid,

    /// Payment method charged for this order
    pub payment_method_id: Uuid,

    /// Kept when the payment method is later removed from the active set,
    /// so the original order data stays intact
    pub deleted_payment_method_id: Option<Uuid>,

    /// Free-form delivery address captured at checkout
    pub shipping_address: String,

    /// Sum of all line totals
    pub total_price: Decimal,

    pub status: OrderStatus,

    pub purchase_date: DateTime<Utc>,

    pub items: Vec<OrderItem>,
}

/// An order line: a product snapshot plus the vendor's payment certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,

    /// Opaque proof-of-payment token returned by the bank for this line's
    /// vendor; replayed on refund
    pub certificate: String,

    /// Line total (unit price x quantity at purchase time)
    pub total_price: Decimal,

    pub quantity: u32,
}

impl Order {
    /// Creates a pending order with no lines yet
    pub fn new(buyer_id: Uuid, payment_method_id: Uuid, shipping_address: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            buyer_id,
            payment_method_id,
            deleted_payment_method_id: None,
            shipping_address,
            total_price: Decimal::ZERO,
            status: OrderStatus::Pending,
            purchase_date: Utc::now(),
            items: Vec::new(),
        }
    }

    /// Marks the order approved once funds are reserved.
    /// Only a pending order can be approved.
    pub fn approve(&mut self) -> DomainResult<()> {
        match self.status {
            OrderStatus::Pending => {
                self.status = OrderStatus::Approved;
                self.purchase_date = Utc::now();
                Ok(())
            }
            _ => Err(DomainError::BusinessRule {
                message: format!("cannot approve an order in state {:?}", self.status),
            }),
        }
    }

    /// Marks the order refunded. Only an approved order can be refunded.
    pub fn refund(&mut self) -> DomainResult<()> {
        match self.status {
            OrderStatus::Approved => {
                self.status = OrderStatus::Refunded;
                Ok(())
            }
            _ => Err(DomainError::BusinessRule {
                message: format!("cannot refund an order in state {:?}", self.status),
            }),
        }
    }

    pub fn is_refundable(&self) -> bool {
        self.status == OrderStatus::Approved
    }
}

impl OrderItem {
    /// Creates an order line
    pub fn new(
        order_id: Uuid,
        product_id: Uuid,
        quantity: u32,
        total_price: Decimal,
        certificate: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            product_id,
            certificate,
            total_price,
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_order() -> Order {
        Order::new(Uuid::new_v4(), Uuid::new_v4(), "12 Slush Lane".to_string())
    }

    #[test]
    fn test_new_order_is_pending() {
        let order = sample_order();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_price, Decimal::ZERO);
        assert!(!order.is_refundable());
    }

    #[test]
    fn test_approve_then_refund() {
        let mut order = sample_order();
        order.approve().unwrap();
        assert_eq!(order.status, OrderStatus::Approved);
        assert!(order.is_refundable());

        order.refund().unwrap();
        assert_eq!(order.status, OrderStatus::Refunded);
    }

    #[test]
    fn test_cannot_refund_pending_order() {
        let mut order = sample_order();
        assert!(order.refund().is_err());
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_cannot_approve_twice() {
        let mut order = sample_order();
        order.approve().unwrap();
        assert!(order.approve().is_err());
    }

    #[test]
    fn test_cannot_refund_twice() {
        let mut order = sample_order();
        order.approve().unwrap();
        order.refund().unwrap();
        assert!(order.refund().is_err());
    }

    #[test]
    fn test_order_item_totals() {
        let item = OrderItem::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            3,
            dec!(29.97),
            "cert-abc".to_string(),
        );
        assert_eq!(item.total_price, dec!(29.97));
        assert_eq!(item.certificate, "cert-abc");
    }
}
