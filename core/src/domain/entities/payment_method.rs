//! Payment method entity.
//!
//! A method referenced by historical orders is never deleted; it is
//! soft-deactivated so the orders keep a valid reference. Re-adding the same
//! card reactivates the existing row instead of inserting a duplicate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A card registered against a store account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Unique identifier for the payment method
    pub id: Uuid,

    /// Owning store account
    pub account_id: Uuid,

    /// 11-character card number
    #[serde(skip_serializing)]
    pub card_number: String,

    /// 5-digit key PIN
    #[serde(skip_serializing)]
    pub key_pin: String,

    /// Soft-removal flag; set instead of deleting when orders reference the method
    pub deactivated: bool,
}

impl PaymentMethod {
    /// Creates a new, active payment method
    pub fn new(account_id: Uuid, card_number: String, key_pin: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            card_number,
            key_pin,
            deactivated: false,
        }
    }

    /// Soft-removes the method
    pub fn deactivate(&mut self) {
        self.deactivated = true;
    }

    /// Brings a previously removed method back into the active set
    pub fn reactivate(&mut self) {
        self.deactivated = false;
    }

    /// Whether the method can be used for new orders
    pub fn is_active(&self) -> bool {
        !self.deactivated
    }

    /// Masked card number for display and logs
    pub fn masked_card_number(&self) -> String {
        let len = self.card_number.len();
        if len <= 4 {
            return "*".repeat(len);
        }
        format!("{}{}", "*".repeat(len - 4), &self.card_number[len - 4..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_method_is_active() {
        let method =
            PaymentMethod::new(Uuid::new_v4(), "12345678901".to_string(), "54321".to_string());
        assert!(method.is_active());
    }

    #[test]
    fn test_deactivate_reactivate() {
        let mut method =
            PaymentMethod::new(Uuid::new_v4(), "12345678901".to_string(), "54321".to_string());

        method.deactivate();
        assert!(!method.is_active());
        method.reactivate();
        assert!(method.is_active());
    }

    #[test]
    fn test_masked_card_number() {
        let method =
            PaymentMethod::new(Uuid::new_v4(), "12345678901".to_string(), "54321".to_string());
        assert_eq!(method.masked_card_number(), "*******8901");
    }

    #[test]
    fn test_secrets_not_serialized() {
        let method =
            PaymentMethod::new(Uuid::new_v4(), "12345678901".to_string(), "54321".to_string());
        let json = serde_json::to_string(&method).unwrap();
        assert!(!json.contains("12345678901"));
        assert!(!json.contains("54321"));
    }
}
