//! Bank gateway seam: the trait checkout talks to and the wire types it
//! exchanges.

pub mod mock;
mod types;

pub use mock::MockBankGateway;
pub use types::{RefundRequest, TransactionRequest, TransactionResponse, VendorTransaction};

use async_trait::async_trait;

use crate::errors::DomainError;

/// The external banking API, as seen by the domain.
///
/// Every value crossing this boundary is already RSA-encrypted; the trait
/// never sees raw card data. The `ss_infra` crate provides the HTTP
/// implementation.
#[async_trait]
pub trait BankGateway: Send + Sync {
    /// Ask the bank whether a card exists and the PIN matches.
    ///
    /// `Ok(false)` is the bank's definitive "no"; transport and server
    /// failures surface as errors instead.
    async fn verify_card(
        &self,
        encrypted_alias: &str,
        encrypted_card_number: &str,
        encrypted_key_pin: &str,
    ) -> Result<bool, DomainError>;

    /// Reserve funds for one vendor group, returning the certificate that
    /// proves the reservation. Not idempotent; callers must not retry.
    async fn authorize(
        &self,
        encrypted_alias: &str,
        request: &TransactionRequest,
    ) -> Result<String, DomainError>;

    /// Replay certificates to release previously reserved funds.
    /// Not idempotent; callers must not retry.
    async fn refund(
        &self,
        encrypted_alias: &str,
        request: &RefundRequest,
    ) -> Result<(), DomainError>;
}
