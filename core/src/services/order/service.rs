//! Order placement and refund flows.
//!
//! Checkout groups the cart by vendor, reserves funds with the bank once
//! per vendor group, and only then persists the order and clears the cart
//! in a single database transaction. Bank calls are never retried; they are
//! not idempotent.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::entities::order::{Order, OrderItem};
use crate::domain::entities::store_account::StoreAccount;
use crate::domain::value_objects::checkout::{group_by_vendor, CartLine};
use crate::errors::{DomainError, DomainResult, PaymentError};
use crate::repositories::{
    CartRepository, OrderRepository, PaymentMethodRepository, StoreAccountRepository,
};
use crate::services::crypto::CardCipher;
use crate::services::payment::{
    BankGateway, RefundRequest, TransactionRequest, VendorTransaction,
};

/// Checkout, refund and order history operations
pub struct OrderService<O, C, P, A, G>
where
    O: OrderRepository,
    C: CartRepository,
    P: PaymentMethodRepository,
    A: StoreAccountRepository,
    G: BankGateway,
{
    orders: Arc<O>,
    carts: Arc<C>,
    payment_methods: Arc<P>,
    accounts: Arc<A>,
    gateway: Arc<G>,
    cipher: Arc<CardCipher>,
}

impl<O, C, P, A, G> OrderService<O, C, P, A, G>
where
    O: OrderRepository,
    C: CartRepository,
    P: PaymentMethodRepository,
    A: StoreAccountRepository,
    G: BankGateway,
{
    pub fn new(
        orders: Arc<O>,
        carts: Arc<C>,
        payment_methods: Arc<P>,
        accounts: Arc<A>,
        gateway: Arc<G>,
        cipher: Arc<CardCipher>,
    ) -> Self {
        Self {
            orders,
            carts,
            payment_methods,
            accounts,
            gateway,
            cipher,
        }
    }

    async fn account_for(&self, user_id: Uuid) -> DomainResult<StoreAccount> {
        self.accounts
            .find_by_holder(user_id)
            .await?
            .ok_or_else(|| DomainError::BusinessRule {
                message: "a store account is required to place orders".to_string(),
            })
    }

    /// Place an order from the user's cart.
    ///
    /// 1. Load cart lines (joined with vendor data); reject an empty cart.
    /// 2. Validate the payment method: owned by the buyer and active.
    /// 3. Group lines by vendor alias, reserve funds once per vendor and
    ///    collect one certificate per vendor.
    /// 4. On a mid-sequence failure, refund the certificates already
    ///    collected (best effort) and fail the checkout.
    /// 5. Persist the approved order with its lines and clear the cart in
    ///    one transaction.
    pub async fn place_order(
        &self,
        user_id: Uuid,
        payment_method_id: Uuid,
        shipping_address: String,
    ) -> DomainResult<Order> {
        if shipping_address.trim().is_empty() {
            return Err(DomainError::validation("a shipping address is required"));
        }

        let account = self.account_for(user_id).await?;
        let buyer_alias = account.alias.as_deref().ok_or_else(|| {
            DomainError::BusinessRule {
                message: "set an account alias before placing orders".to_string(),
            }
        })?;

        let payment_method = self
            .payment_methods
            .find_by_id(payment_method_id)
            .await?
            .ok_or_else(|| DomainError::not_found("PaymentMethod"))?;
        if payment_method.account_id != account.id {
            return Err(DomainError::Forbidden);
        }
        if !payment_method.is_active() {
            return Err(DomainError::Payment(PaymentError::PaymentMethodDeactivated));
        }

        let cart = self
            .carts
            .find_by_account(account.id)
            .await?
            .ok_or_else(|| DomainError::validation("the shopping cart is empty"))?;
        let lines = self.carts.list_lines(account.id).await?;
        if lines.is_empty() {
            return Err(DomainError::validation("the shopping cart is empty"));
        }

        let charges = group_by_vendor(&lines)?;

        let encrypted_alias = self.cipher.encrypt(buyer_alias)?;
        let encrypted_card = self.cipher.encrypt(&payment_method.card_number)?;
        let encrypted_pin = self.cipher.encrypt(&payment_method.key_pin)?;

        // One reservation per vendor; the certificate applies to every line
        // of that vendor.
        let mut certificates: HashMap<String, String> = HashMap::new();
        let mut collected: Vec<(String, Decimal)> = Vec::new();

        for charge in &charges {
            let request = TransactionRequest {
                encrypted_card_number: encrypted_card.clone(),
                encrypted_key_pin: encrypted_pin.clone(),
                vendor_transactions: vec![VendorTransaction {
                    vendor_alias: self.cipher.encrypt(&charge.vendor_alias)?,
                    total_amount: charge.amount,
                }],
            };

            match self.gateway.authorize(&encrypted_alias, &request).await {
                Ok(certificate) => {
                    certificates.insert(charge.vendor_alias.clone(), certificate.clone());
                    collected.push((certificate, charge.amount));
                }
                Err(err) => {
                    warn!(
                        "authorization failed after {} of {} vendors: {}",
                        collected.len(),
                        charges.len(),
                        err
                    );
                    self.compensate(&encrypted_alias, &collected).await;
                    return Err(err);
                }
            }
        }

        let mut order = Order::new(account.id, payment_method_id, shipping_address);
        let mut total = Decimal::ZERO;
        for line in &lines {
            let certificate = line
                .vendor_alias
                .as_deref()
                .and_then(|alias| certificates.get(alias))
                .ok_or(DomainError::Payment(PaymentError::CertificateMissing))?;

            let line_total = line.line_total();
            total += line_total;
            order.items.push(OrderItem::new(
                order.id,
                line.product_id,
                line.quantity,
                line_total,
                certificate.clone(),
            ));
        }
        order.total_price = total;
        order.approve()?;

        let order = match self.orders.create_with_items(order, Some(cart.id)).await {
            Ok(order) => order,
            Err(err) => {
                // Funds are reserved but the order didn't commit; release
                // them before surfacing the failure.
                error!("order persistence failed after authorization: {}", err);
                self.compensate(&encrypted_alias, &collected).await;
                return Err(err);
            }
        };

        info!(
            "order {} placed: {} line(s), {} vendor(s), total {}",
            order.id,
            order.items.len(),
            charges.len(),
            order.total_price
        );
        Ok(order)
    }

    /// Best-effort release of already-reserved funds when checkout fails
    /// part-way through the vendor sequence.
    async fn compensate(&self, encrypted_alias: &str, collected: &[(String, Decimal)]) {
        if collected.is_empty() {
            return;
        }

        let request = RefundRequest {
            certificates: collected.iter().map(|(c, _)| c.clone()).collect(),
            amounts: collected.iter().map(|(_, a)| *a).collect(),
        };

        if let Err(err) = self.gateway.refund(encrypted_alias, &request).await {
            // Nothing more we can do from here; the reservation will need
            // manual reconciliation against the bank.
            error!(
                "compensating refund of {} certificate(s) failed: {}",
                collected.len(),
                err
            );
        }
    }

    /// Refund a previously approved order by replaying its certificates
    pub async fn refund_order(&self, user_id: Uuid, order_id: Uuid) -> DomainResult<Order> {
        let account = self.account_for(user_id).await?;

        let mut order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Order"))?;
        if order.buyer_id != account.id {
            return Err(DomainError::Forbidden);
        }
        if !order.is_refundable() {
            return Err(DomainError::BusinessRule {
                message: "only approved orders can be refunded".to_string(),
            });
        }

        let buyer_alias = account.alias.as_deref().ok_or_else(|| {
            DomainError::BusinessRule {
                message: "the account has no alias to refund against".to_string(),
            }
        })?;
        let encrypted_alias = self.cipher.encrypt(buyer_alias)?;

        let request = RefundRequest {
            certificates: order.items.iter().map(|i| i.certificate.clone()).collect(),
            amounts: order.items.iter().map(|i| i.total_price).collect(),
        };

        self.gateway
            .refund(&encrypted_alias, &request)
            .await
            .map_err(|err| {
                warn!("refund unsuccessful for order {}: {}", order_id, err);
                err
            })?;

        order.refund()?;
        self.orders.update_status(order.id, order.status).await?;

        info!("refund completed for order {}", order_id);
        Ok(order)
    }

    /// The buyer's order history, newest first
    pub async fn orders_for(&self, user_id: Uuid) -> DomainResult<Vec<Order>> {
        let account = self.account_for(user_id).await?;
        self.orders.list_for_buyer(account.id).await
    }

    /// The cart lines and active payment methods a checkout page needs
    pub async fn checkout_context(
        &self,
        user_id: Uuid,
    ) -> DomainResult<(Vec<CartLine>, Vec<crate::domain::entities::PaymentMethod>)> {
        let account = self.account_for(user_id).await?;
        let lines = self.carts.list_lines(account.id).await?;
        let methods = self
            .payment_methods
            .list_active_for_account(account.id)
            .await?;
        Ok((lines, methods))
    }
}
