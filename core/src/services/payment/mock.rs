//! Mock bank gateway for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::{DomainError, PaymentError};

use super::{BankGateway, RefundRequest, TransactionRequest};

/// Scriptable in-memory bank.
///
/// Issues sequential certificates (`cert-1`, `cert-2`, …) and records every
/// call so tests can assert what crossed the seam.
#[derive(Default)]
pub struct MockBankGateway {
    verify_result: AtomicBool,
    /// 1-based index of the authorize call that should fail with
    /// insufficient funds; 0 disables
    fail_authorize_on_call: AtomicU32,
    authorize_counter: AtomicU32,
    fail_refunds: AtomicBool,

    pub authorize_calls: Arc<RwLock<Vec<TransactionRequest>>>,
    pub refund_calls: Arc<RwLock<Vec<RefundRequest>>>,
}

impl MockBankGateway {
    pub fn new() -> Self {
        let gateway = Self::default();
        gateway.verify_result.store(true, Ordering::SeqCst);
        gateway
    }

    /// Make `verify_card` answer "false"
    pub fn reject_cards(&self) {
        self.verify_result.store(false, Ordering::SeqCst);
    }

    /// Fail the nth authorize call (1-based) with insufficient funds
    pub fn fail_authorize_on(&self, call: u32) {
        self.fail_authorize_on_call.store(call, Ordering::SeqCst);
    }

    /// Make refunds fail
    pub fn fail_refunds(&self) {
        self.fail_refunds.store(true, Ordering::SeqCst);
    }

    pub async fn authorize_count(&self) -> usize {
        self.authorize_calls.read().await.len()
    }

    pub async fn refund_count(&self) -> usize {
        self.refund_calls.read().await.len()
    }
}

#[async_trait]
impl BankGateway for MockBankGateway {
    async fn verify_card(
        &self,
        _encrypted_alias: &str,
        _encrypted_card_number: &str,
        _encrypted_key_pin: &str,
    ) -> Result<bool, DomainError> {
        Ok(self.verify_result.load(Ordering::SeqCst))
    }

    async fn authorize(
        &self,
        _encrypted_alias: &str,
        request: &TransactionRequest,
    ) -> Result<String, DomainError> {
        let call = self.authorize_counter.fetch_add(1, Ordering::SeqCst) + 1;
        self.authorize_calls.write().await.push(request.clone());

        let fail_on = self.fail_authorize_on_call.load(Ordering::SeqCst);
        if fail_on != 0 && call == fail_on {
            return Err(DomainError::Payment(PaymentError::InsufficientFunds));
        }

        Ok(format!("cert-{}", call))
    }

    async fn refund(
        &self,
        _encrypted_alias: &str,
        request: &RefundRequest,
    ) -> Result<(), DomainError> {
        self.refund_calls.write().await.push(request.clone());

        if self.fail_refunds.load(Ordering::SeqCst) {
            return Err(DomainError::Payment(PaymentError::RefundRejected));
        }
        Ok(())
    }
}
