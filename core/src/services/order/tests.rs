//! OrderService tests: checkout, compensation and refunds against the mock
//! bank and repositories.

use std::sync::Arc;

use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::domain::entities::cart::{CartItem, ShoppingCart};
use crate::domain::entities::order::OrderStatus;
use crate::domain::entities::payment_method::PaymentMethod;
use crate::domain::entities::store_account::{AccountType, StoreAccount};
use crate::domain::value_objects::checkout::CartLine;
use crate::errors::{DomainError, PaymentError};
use crate::repositories::{
    CartRepository, MockCartRepository, MockOrderRepository, MockPaymentMethodRepository,
    MockStoreAccountRepository, OrderRepository,
};
use crate::services::crypto::test_support::test_cipher;
use crate::services::payment::MockBankGateway;

use super::OrderService;

struct Fixture {
    service: OrderService<
        MockOrderRepository,
        MockCartRepository,
        MockPaymentMethodRepository,
        MockStoreAccountRepository,
        MockBankGateway,
    >,
    orders: Arc<MockOrderRepository>,
    carts: Arc<MockCartRepository>,
    gateway: Arc<MockBankGateway>,
    user_id: Uuid,
    account_id: Uuid,
    payment_method_id: Uuid,
    cart_id: Uuid,
}

/// Two products from vendor "acme", one from vendor "bakery".
async fn fixture() -> Fixture {
    let orders = Arc::new(MockOrderRepository::new());
    let carts = Arc::new(MockCartRepository::new());
    let payment_methods = Arc::new(MockPaymentMethodRepository::new());
    let accounts = Arc::new(MockStoreAccountRepository::new());
    let gateway = Arc::new(MockBankGateway::new());

    let user_id = Uuid::new_v4();
    let account = StoreAccount::new(user_id, AccountType::Personal, Some("buyer".to_string()));
    let account_id = account.id;
    accounts.insert(account).await;

    let method = PaymentMethod::new(account_id, "12345678901".to_string(), "54321".to_string());
    let payment_method_id = method.id;
    payment_methods.insert(method).await;

    let mut cart = ShoppingCart::new(account_id);
    let cart_id = cart.id;

    let products = [
        ("Blue Slush", "acme", dec!(2.50), 2u32),
        ("Red Slush", "acme", dec!(3.00), 1u32),
        ("Pretzel", "bakery", dec!(1.25), 4u32),
    ];
    for (name, vendor, price, quantity) in products {
        let product_id = Uuid::new_v4();
        carts
            .register_product(CartLine {
                product_id,
                product_name: name.to_string(),
                product_type: "Goods".to_string(),
                unit_price: price,
                quantity: 0,
                supplier_name: format!("{} inc", vendor),
                vendor_alias: Some(vendor.to_string()),
            })
            .await;
        cart.items.push(CartItem::new(cart_id, product_id, quantity));
    }
    carts.create(cart).await.unwrap();

    let service = OrderService::new(
        orders.clone(),
        carts.clone(),
        payment_methods,
        accounts,
        gateway.clone(),
        test_cipher(),
    );

    Fixture {
        service,
        orders,
        carts,
        gateway,
        user_id,
        account_id,
        payment_method_id,
        cart_id,
    }
}

#[tokio::test]
async fn test_place_order_happy_path() {
    let f = fixture().await;

    let order = f
        .service
        .place_order(f.user_id, f.payment_method_id, "12 Slush Lane".to_string())
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Approved);
    assert_eq!(order.items.len(), 3);
    // 2 x 2.50 + 1 x 3.00 + 4 x 1.25
    assert_eq!(order.total_price, dec!(13.00));

    // One bank call per vendor group, not per line
    assert_eq!(f.gateway.authorize_count().await, 2);

    // Lines of the same vendor share that vendor's certificate
    assert_eq!(order.items[0].certificate, order.items[1].certificate);
    assert_ne!(order.items[0].certificate, order.items[2].certificate);

    // The cart was cleared in the same commit
    assert_eq!(*f.orders.cleared_carts.read().await, vec![f.cart_id]);
}

#[tokio::test]
async fn test_place_order_amounts_grouped_per_vendor() {
    let f = fixture().await;

    f.service
        .place_order(f.user_id, f.payment_method_id, "12 Slush Lane".to_string())
        .await
        .unwrap();

    let calls = f.gateway.authorize_calls.read().await;
    let amounts: Vec<_> = calls
        .iter()
        .map(|c| c.vendor_transactions[0].total_amount)
        .collect();
    assert_eq!(amounts, vec![dec!(8.00), dec!(5.00)]);
}

#[tokio::test]
async fn test_place_order_empty_cart_rejected() {
    let f = fixture().await;

    // Empty the cart first
    let lines = f.carts.list_lines(f.account_id).await.unwrap();
    for line in lines {
        f.carts.remove_item(f.cart_id, line.product_id).await.unwrap();
    }

    let result = f
        .service
        .place_order(f.user_id, f.payment_method_id, "12 Slush Lane".to_string())
        .await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
    assert_eq!(f.gateway.authorize_count().await, 0);
}

#[tokio::test]
async fn test_place_order_blank_address_rejected() {
    let f = fixture().await;

    let result = f
        .service
        .place_order(f.user_id, f.payment_method_id, "   ".to_string())
        .await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_place_order_unknown_payment_method_rejected() {
    let f = fixture().await;

    let result = f
        .service
        .place_order(f.user_id, Uuid::new_v4(), "12 Slush Lane".to_string())
        .await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_place_order_partial_failure_compensates() {
    let f = fixture().await;

    // First vendor authorizes, second is declined
    f.gateway.fail_authorize_on(2);

    let result = f
        .service
        .place_order(f.user_id, f.payment_method_id, "12 Slush Lane".to_string())
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Payment(PaymentError::InsufficientFunds))
    ));

    // The first vendor's certificate was refunded
    assert_eq!(f.gateway.refund_count().await, 1);
    let refunds = f.gateway.refund_calls.read().await;
    assert_eq!(refunds[0].certificates, vec!["cert-1".to_string()]);
    assert_eq!(refunds[0].amounts, vec![dec!(8.00)]);

    // No order was persisted and the cart is intact
    assert!(f.orders.list_for_buyer(f.account_id).await.unwrap().is_empty());
    assert!(f.orders.cleared_carts.read().await.is_empty());
    assert_eq!(f.carts.list_lines(f.account_id).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_place_order_first_vendor_failure_needs_no_compensation() {
    let f = fixture().await;
    f.gateway.fail_authorize_on(1);

    let result = f
        .service
        .place_order(f.user_id, f.payment_method_id, "12 Slush Lane".to_string())
        .await;

    assert!(result.is_err());
    assert_eq!(f.gateway.refund_count().await, 0);
}

#[tokio::test]
async fn test_refund_order_happy_path() {
    let f = fixture().await;

    let order = f
        .service
        .place_order(f.user_id, f.payment_method_id, "12 Slush Lane".to_string())
        .await
        .unwrap();

    let refunded = f.service.refund_order(f.user_id, order.id).await.unwrap();
    assert_eq!(refunded.status, OrderStatus::Refunded);

    // The refund replayed every line's certificate and amount
    let refunds = f.gateway.refund_calls.read().await;
    assert_eq!(refunds.len(), 1);
    assert_eq!(refunds[0].certificates.len(), 3);
    assert_eq!(
        refunds[0].amounts,
        vec![dec!(5.00), dec!(3.00), dec!(5.00)]
    );

    let stored = f.orders.find_by_id(order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Refunded);
}

#[tokio::test]
async fn test_refund_rejected_by_bank_keeps_order_approved() {
    let f = fixture().await;

    let order = f
        .service
        .place_order(f.user_id, f.payment_method_id, "12 Slush Lane".to_string())
        .await
        .unwrap();

    f.gateway.fail_refunds();
    let result = f.service.refund_order(f.user_id, order.id).await;

    assert!(matches!(
        result,
        Err(DomainError::Payment(PaymentError::RefundRejected))
    ));
    let stored = f.orders.find_by_id(order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Approved);
}

#[tokio::test]
async fn test_refund_twice_rejected() {
    let f = fixture().await;

    let order = f
        .service
        .place_order(f.user_id, f.payment_method_id, "12 Slush Lane".to_string())
        .await
        .unwrap();

    f.service.refund_order(f.user_id, order.id).await.unwrap();
    let result = f.service.refund_order(f.user_id, order.id).await;

    assert!(matches!(result, Err(DomainError::BusinessRule { .. })));
}

#[tokio::test]
async fn test_refund_foreign_order_forbidden() {
    let f = fixture().await;

    let order = f
        .service
        .place_order(f.user_id, f.payment_method_id, "12 Slush Lane".to_string())
        .await
        .unwrap();

    let result = f.service.refund_order(Uuid::new_v4(), order.id).await;
    // The stranger has no store account at all
    assert!(matches!(result, Err(DomainError::BusinessRule { .. })));
}

#[tokio::test]
async fn test_order_history() {
    let f = fixture().await;

    assert!(f.service.orders_for(f.user_id).await.unwrap().is_empty());

    f.service
        .place_order(f.user_id, f.payment_method_id, "12 Slush Lane".to_string())
        .await
        .unwrap();

    let history = f.service.orders_for(f.user_id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].items.len(), 3);
}
