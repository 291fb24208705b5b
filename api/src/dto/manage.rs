//! Account-management DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use ss_core::domain::entities::order::Order;
use ss_core::domain::entities::payment_method::PaymentMethod;
use ss_core::domain::entities::store_account::AccountType;

use super::cart::LineResponse;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStoreAccountRequest {
    pub account_type: AccountType,

    #[validate(length(min = 1, max = 256))]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetAliasRequest {
    #[validate(length(min = 1, max = 256))]
    pub alias: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddPaymentMethodRequest {
    /// The bank's card numbers are 11 digits
    #[validate(length(equal = 11))]
    pub card_number: String,

    /// 5-digit key PIN
    #[validate(length(equal = 5))]
    pub key_pin: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub old_password: String,

    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeEmailRequest {
    #[validate(email)]
    pub old_email: String,

    #[validate(email)]
    pub new_email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeUsernameRequest {
    #[validate(length(min = 1))]
    pub old_username: String,

    #[validate(length(min = 3, max = 32))]
    pub new_username: String,
}

/// Body of `PUT /manage/two-factor`
#[derive(Debug, Clone, Deserialize)]
pub struct TwoFactorToggleRequest {
    pub enabled: bool,
}

/// A payment method as rendered to the client (card number masked)
#[derive(Debug, Clone, Serialize)]
pub struct PaymentMethodResponse {
    pub id: Uuid,
    pub card_number_masked: String,
    pub deactivated: bool,
}

impl From<&PaymentMethod> for PaymentMethodResponse {
    fn from(method: &PaymentMethod) -> Self {
        Self {
            id: method.id,
            card_number_masked: method.masked_card_number(),
            deactivated: method.deactivated,
        }
    }
}

/// The manage-page aggregate
#[derive(Debug, Clone, Serialize)]
pub struct OverviewResponse {
    pub username: String,
    pub email: String,
    pub email_confirmed: bool,
    pub two_factor_enabled: bool,
    pub store_account_created: bool,
    pub alias: Option<String>,
    pub payment_methods: Vec<PaymentMethodResponse>,
    pub cart_items: Vec<LineResponse>,
    pub orders: Vec<Order>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_number_length_validation() {
        let request = AddPaymentMethodRequest {
            card_number: "12345678901".to_string(),
            key_pin: "54321".to_string(),
        };
        assert!(request.validate().is_ok());

        let request = AddPaymentMethodRequest {
            card_number: "1234".to_string(),
            key_pin: "54321".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_payment_method_response_masks_card() {
        let method = PaymentMethod::new(
            Uuid::new_v4(),
            "12345678901".to_string(),
            "54321".to_string(),
        );
        let response = PaymentMethodResponse::from(&method);
        assert_eq!(response.card_number_masked, "*******8901");
    }
}
