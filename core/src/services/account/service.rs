//! Store account management: account creation, alias changes and the
//! payment method lifecycle (add with bank verification, soft removal).

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use ss_shared::utils::validation;

use crate::domain::entities::payment_method::PaymentMethod;
use crate::domain::entities::store_account::{AccountType, StoreAccount};
use crate::errors::{DomainError, DomainResult, PaymentError};
use crate::repositories::{OrderRepository, PaymentMethodRepository, StoreAccountRepository};
use crate::services::crypto::CardCipher;
use crate::services::payment::BankGateway;

/// Store account and payment method operations
pub struct StoreAccountService<A, P, O, G>
where
    A: StoreAccountRepository,
    P: PaymentMethodRepository,
    O: OrderRepository,
    G: BankGateway,
{
    accounts: Arc<A>,
    payment_methods: Arc<P>,
    orders: Arc<O>,
    gateway: Arc<G>,
    cipher: Arc<CardCipher>,
}

impl<A, P, O, G> StoreAccountService<A, P, O, G>
where
    A: StoreAccountRepository,
    P: PaymentMethodRepository,
    O: OrderRepository,
    G: BankGateway,
{
    pub fn new(
        accounts: Arc<A>,
        payment_methods: Arc<P>,
        orders: Arc<O>,
        gateway: Arc<G>,
        cipher: Arc<CardCipher>,
    ) -> Self {
        Self {
            accounts,
            payment_methods,
            orders,
            gateway,
            cipher,
        }
    }

    /// The user's store account, when one exists
    pub async fn account_for(&self, user_id: Uuid) -> DomainResult<Option<StoreAccount>> {
        self.accounts.find_by_holder(user_id).await
    }

    fn require_account(account: Option<StoreAccount>) -> DomainResult<StoreAccount> {
        account.ok_or_else(|| DomainError::BusinessRule {
            message: "no store account exists for this user".to_string(),
        })
    }

    /// Open the user's store account. A user holds at most one.
    pub async fn create_store_account(
        &self,
        user_id: Uuid,
        account_type: AccountType,
        alias: Option<String>,
    ) -> DomainResult<StoreAccount> {
        if self.accounts.find_by_holder(user_id).await?.is_some() {
            return Err(DomainError::Duplicate {
                resource: "store account".to_string(),
            });
        }

        if let Some(alias) = alias.as_deref() {
            self.ensure_alias_free(alias).await?;
        }

        let account = self
            .accounts
            .create(StoreAccount::new(user_id, account_type, alias))
            .await?;

        info!("opened store account {} for user {}", account.id, user_id);
        Ok(account)
    }

    /// Change the account's bank-facing alias
    pub async fn set_alias(&self, user_id: Uuid, alias: String) -> DomainResult<StoreAccount> {
        if !validation::is_valid_alias(&alias) {
            return Err(DomainError::validation("please provide a valid alias"));
        }

        let mut account =
            Self::require_account(self.accounts.find_by_holder(user_id).await?)?;

        if account.alias.as_deref() == Some(alias.as_str()) {
            return Ok(account);
        }
        self.ensure_alias_free(&alias).await?;

        account.set_alias(alias);
        self.accounts.update(account).await
    }

    async fn ensure_alias_free(&self, alias: &str) -> DomainResult<()> {
        if self.accounts.exists_by_alias(alias).await? {
            return Err(DomainError::Duplicate {
                resource: "alias".to_string(),
            });
        }
        Ok(())
    }

    /// All payment methods on the user's account, deactivated ones included
    pub async fn list_payment_methods(
        &self,
        user_id: Uuid,
    ) -> DomainResult<Vec<PaymentMethod>> {
        let account = Self::require_account(self.accounts.find_by_holder(user_id).await?)?;
        self.payment_methods.list_for_account(account.id).await
    }

    /// Only the payment methods usable for new orders
    pub async fn list_active_payment_methods(
        &self,
        user_id: Uuid,
    ) -> DomainResult<Vec<PaymentMethod>> {
        let account = Self::require_account(self.accounts.find_by_holder(user_id).await?)?;
        self.payment_methods
            .list_active_for_account(account.id)
            .await
    }

    /// Register a card against the user's account.
    ///
    /// The same card re-added after a soft removal is reactivated instead of
    /// duplicated. The card is verified with the bank before anything is
    /// persisted; card number, PIN and alias never leave the process
    /// unencrypted.
    pub async fn add_payment_method(
        &self,
        user_id: Uuid,
        card_number: String,
        key_pin: String,
    ) -> DomainResult<PaymentMethod> {
        if !validation::is_valid_card_number(&card_number) {
            return Err(DomainError::validation(
                "the card number must be 11 digits",
            ));
        }
        if !validation::is_valid_key_pin(&key_pin) {
            return Err(DomainError::validation("the key PIN must be 5 digits"));
        }

        let account = Self::require_account(self.accounts.find_by_holder(user_id).await?)?;
        let alias = account.alias.as_deref().ok_or_else(|| {
            DomainError::BusinessRule {
                message: "set an account alias before registering a card".to_string(),
            }
        })?;

        let duplicate = self
            .payment_methods
            .find_by_card(account.id, &card_number, &key_pin)
            .await?;
        if let Some(existing) = &duplicate {
            if existing.is_active() {
                return Err(DomainError::Duplicate {
                    resource: "payment method".to_string(),
                });
            }
        }

        let encrypted_alias = self.cipher.encrypt(alias)?;
        let encrypted_card = self.cipher.encrypt(&card_number)?;
        let encrypted_pin = self.cipher.encrypt(&key_pin)?;

        let valid = self
            .gateway
            .verify_card(&encrypted_alias, &encrypted_card, &encrypted_pin)
            .await?;
        if !valid {
            return Err(DomainError::Payment(PaymentError::InvalidCard));
        }

        match duplicate {
            Some(mut existing) => {
                // Previously removed under an order reference; bring it back
                existing.reactivate();
                self.payment_methods.update(existing).await
            }
            None => {
                self.payment_methods
                    .create(PaymentMethod::new(account.id, card_number, key_pin))
                    .await
            }
        }
    }

    /// Remove a payment method.
    ///
    /// A method referenced by orders is deactivated rather than deleted so
    /// the orders keep their data; an unreferenced method is deleted
    /// outright.
    pub async fn remove_payment_method(
        &self,
        user_id: Uuid,
        payment_method_id: Uuid,
    ) -> DomainResult<()> {
        let account = Self::require_account(self.accounts.find_by_holder(user_id).await?)?;

        let mut method = self
            .payment_methods
            .find_by_id(payment_method_id)
            .await?
            .ok_or_else(|| DomainError::not_found("PaymentMethod"))?;

        if method.account_id != account.id {
            return Err(DomainError::Forbidden);
        }

        if self
            .orders
            .exists_for_payment_method(payment_method_id)
            .await?
        {
            method.deactivate();
            self.payment_methods.update(method).await?;
            self.orders
                .mark_payment_method_deleted(payment_method_id)
                .await?;
            warn!(
                "payment method {} is referenced by orders; deactivated instead of deleted",
                payment_method_id
            );
        } else {
            self.payment_methods.delete(payment_method_id).await?;
        }

        Ok(())
    }
}
