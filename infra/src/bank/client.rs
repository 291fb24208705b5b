//! HTTP implementation of the BankGateway trait.
//!
//! Every request authenticates with `Authorization: Alias <ciphertext>`,
//! where the ciphertext is the caller's RSA-encrypted account alias. Only
//! the card-verification read may retry; transaction and refund calls are
//! not idempotent and go out exactly once.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use ss_core::errors::{DomainError, PaymentError};
use ss_core::services::payment::{
    BankGateway, RefundRequest, TransactionRequest, TransactionResponse,
};
use ss_shared::config::BankApiConfig;

use crate::InfrastructureError;

const VERIFY_CARD_PATH: &str = "api/bankAPI/VerifyCard";
const INITIATE_TRANSACTION_PATH: &str = "api/bankAPI/InitiateTransaction";
const INITIATE_REFUND_PATH: &str = "api/bankAPI/InitiateRefund";

/// Marker the bank puts in a declined-transaction body
const INSUFFICIENT_FUNDS_MARKER: &str = "Not enough funds to complete the purchase.";

/// HTTP client for the SlushBank API
pub struct SlushBankClient {
    client: reqwest::Client,
    config: BankApiConfig,
}

impl SlushBankClient {
    /// Build the client from configuration
    pub fn new(config: BankApiConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!("bank gateway client ready for {}", config.base_url);
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn alias_header(encrypted_alias: &str) -> String {
        format!("Alias {}", encrypted_alias)
    }

    fn transport_err(err: reqwest::Error) -> DomainError {
        error!("bank gateway transport error: {}", err);
        DomainError::Payment(PaymentError::GatewayUnavailable)
    }
}

#[async_trait]
impl BankGateway for SlushBankClient {
    async fn verify_card(
        &self,
        encrypted_alias: &str,
        encrypted_card_number: &str,
        encrypted_key_pin: &str,
    ) -> Result<bool, DomainError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        // Verification is a read; 5xx responses are retried with backoff
        loop {
            attempts += 1;

            let response = self
                .client
                .get(self.url(VERIFY_CARD_PATH))
                .header("Authorization", Self::alias_header(encrypted_alias))
                .query(&[
                    ("encryptedCardNumber", encrypted_card_number),
                    ("encryptedKeyPIN", encrypted_key_pin),
                ])
                .send()
                .await
                .map_err(Self::transport_err)?;

            let status = response.status();
            if status.is_success() {
                let body = response.text().await.map_err(Self::transport_err)?;
                debug!("card verification answered {:?}", body.trim());
                return Ok(body.trim() == "true");
            }

            if status.is_server_error() && attempts < self.config.max_retries {
                warn!(
                    "card verification got {} (attempt {}/{}), backing off {:?}",
                    status, attempts, self.config.max_retries, delay
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
                continue;
            }

            warn!("card verification failed with status {}", status);
            return Err(DomainError::Payment(PaymentError::CardVerificationFailed));
        }
    }

    async fn authorize(
        &self,
        encrypted_alias: &str,
        request: &TransactionRequest,
    ) -> Result<String, DomainError> {
        let response = self
            .client
            .post(self.url(INITIATE_TRANSACTION_PATH))
            .header("Authorization", Self::alias_header(encrypted_alias))
            .json(request)
            .send()
            .await
            .map_err(Self::transport_err)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if body.contains(INSUFFICIENT_FUNDS_MARKER) {
                info!("bank declined transaction: insufficient funds");
                return Err(DomainError::Payment(PaymentError::InsufficientFunds));
            }

            error!("transaction failed with status {}: {}", status, body);
            return Err(DomainError::Payment(PaymentError::GatewayUnavailable));
        }

        let parsed: TransactionResponse = response.json().await.map_err(Self::transport_err)?;
        let certificate = parsed
            .certificates
            .into_iter()
            .next()
            .ok_or(DomainError::Payment(PaymentError::CertificateMissing))?;

        debug!("funds reserved, certificate received");
        Ok(certificate)
    }

    async fn refund(
        &self,
        encrypted_alias: &str,
        request: &RefundRequest,
    ) -> Result<(), DomainError> {
        let response = self
            .client
            .post(self.url(INITIATE_REFUND_PATH))
            .header("Authorization", Self::alias_header(encrypted_alias))
            .json(request)
            .send()
            .await
            .map_err(Self::transport_err)?;

        let status = response.status();
        if status.is_success() {
            info!("refund of {} certificate(s) accepted", request.certificates.len());
            return Ok(());
        }

        warn!("refund rejected with status {}", status);
        Err(DomainError::Payment(PaymentError::RefundRejected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BankApiConfig {
        BankApiConfig {
            base_url: "https://bank.example.com/".to_string(),
            public_key_pem: "unused-here".to_string(),
            request_timeout_secs: 5,
            max_retries: 3,
            retry_delay_ms: 10,
        }
    }

    #[test]
    fn test_url_joining_strips_trailing_slash() {
        let client = SlushBankClient::new(config()).unwrap();
        assert_eq!(
            client.url(VERIFY_CARD_PATH),
            "https://bank.example.com/api/bankAPI/VerifyCard"
        );
    }

    #[test]
    fn test_alias_header_shape() {
        assert_eq!(
            SlushBankClient::alias_header("abc123=="),
            "Alias abc123=="
        );
    }
}
