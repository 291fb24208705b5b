//! Wire types for the bank API.
//!
//! Field names are PascalCase on the wire; that is the JSON contract the
//! bank service exposes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `InitiateTransaction`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionRequest {
    pub encrypted_card_number: String,

    #[serde(rename = "EncryptedKeyPIN")]
    pub encrypted_key_pin: String,

    pub vendor_transactions: Vec<VendorTransaction>,
}

/// One vendor's share of a transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VendorTransaction {
    /// RSA-encrypted vendor alias
    pub vendor_alias: String,

    pub total_amount: Decimal,
}

/// Response of `InitiateTransaction`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionResponse {
    pub certificates: Vec<String>,
}

/// Body of `InitiateRefund`: the stored certificates and the per-line
/// amounts they covered, in matching order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RefundRequest {
    pub certificates: Vec<String>,
    pub amounts: Vec<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transaction_request_wire_format() {
        let request = TransactionRequest {
            encrypted_card_number: "enc-card".to_string(),
            encrypted_key_pin: "enc-pin".to_string(),
            vendor_transactions: vec![VendorTransaction {
                vendor_alias: "enc-alias".to_string(),
                total_amount: dec!(19.99),
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["EncryptedCardNumber"], "enc-card");
        assert_eq!(json["EncryptedKeyPIN"], "enc-pin");
        assert_eq!(json["VendorTransactions"][0]["VendorAlias"], "enc-alias");
        assert_eq!(
            json["VendorTransactions"][0]["TotalAmount"],
            serde_json::json!("19.99")
        );
    }

    #[test]
    fn test_transaction_response_parsing() {
        let response: TransactionResponse =
            serde_json::from_str(r#"{"Certificates":["cert-1","cert-2"]}"#).unwrap();
        assert_eq!(response.certificates, vec!["cert-1", "cert-2"]);
    }

    #[test]
    fn test_refund_request_wire_format() {
        let request = RefundRequest {
            certificates: vec!["cert-1".to_string()],
            amounts: vec![dec!(5.00)],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["Certificates"][0], "cert-1");
        assert_eq!(json["Amounts"][0], serde_json::json!("5.00"));
    }
}
