//! StoreAccountService tests against mock repositories and the mock bank.

use std::sync::Arc;

use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::domain::entities::order::Order;
use crate::domain::entities::store_account::AccountType;
use crate::errors::{DomainError, PaymentError};
use crate::repositories::{
    MockOrderRepository, MockPaymentMethodRepository, MockStoreAccountRepository,
    OrderRepository, PaymentMethodRepository,
};
use crate::services::crypto::test_support::test_cipher;
use crate::services::payment::MockBankGateway;

use super::StoreAccountService;

struct Fixture {
    service: StoreAccountService<
        MockStoreAccountRepository,
        MockPaymentMethodRepository,
        MockOrderRepository,
        MockBankGateway,
    >,
    gateway: Arc<MockBankGateway>,
    payment_methods: Arc<MockPaymentMethodRepository>,
    orders: Arc<MockOrderRepository>,
    user_id: Uuid,
}

fn fixture() -> Fixture {
    let accounts = Arc::new(MockStoreAccountRepository::new());
    let payment_methods = Arc::new(MockPaymentMethodRepository::new());
    let orders = Arc::new(MockOrderRepository::new());
    let gateway = Arc::new(MockBankGateway::new());

    let service = StoreAccountService::new(
        accounts,
        payment_methods.clone(),
        orders.clone(),
        gateway.clone(),
        test_cipher(),
    );

    Fixture {
        service,
        gateway,
        payment_methods,
        orders,
        user_id: Uuid::new_v4(),
    }
}

#[tokio::test]
async fn test_create_store_account() {
    let f = fixture();

    let account = f
        .service
        .create_store_account(f.user_id, AccountType::Personal, Some("buyer".to_string()))
        .await
        .unwrap();

    assert_eq!(account.holder_id, f.user_id);
    assert_eq!(account.alias.as_deref(), Some("buyer"));
}

#[tokio::test]
async fn test_second_store_account_rejected() {
    let f = fixture();

    f.service
        .create_store_account(f.user_id, AccountType::Personal, None)
        .await
        .unwrap();
    let result = f
        .service
        .create_store_account(f.user_id, AccountType::Business, None)
        .await;

    assert!(matches!(result, Err(DomainError::Duplicate { .. })));
}

#[tokio::test]
async fn test_alias_uniqueness() {
    let f = fixture();
    let other_user = Uuid::new_v4();

    f.service
        .create_store_account(other_user, AccountType::Personal, Some("taken".to_string()))
        .await
        .unwrap();
    f.service
        .create_store_account(f.user_id, AccountType::Personal, Some("mine".to_string()))
        .await
        .unwrap();

    let result = f.service.set_alias(f.user_id, "taken".to_string()).await;
    assert!(matches!(result, Err(DomainError::Duplicate { .. })));

    let account = f.service.set_alias(f.user_id, "newer".to_string()).await.unwrap();
    assert_eq!(account.alias.as_deref(), Some("newer"));
}

#[tokio::test]
async fn test_add_payment_method_happy_path() {
    let f = fixture();
    f.service
        .create_store_account(f.user_id, AccountType::Personal, Some("buyer".to_string()))
        .await
        .unwrap();

    let method = f
        .service
        .add_payment_method(f.user_id, "12345678901".to_string(), "54321".to_string())
        .await
        .unwrap();

    assert!(method.is_active());
    let listed = f.service.list_payment_methods(f.user_id).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_add_payment_method_validates_formats() {
    let f = fixture();
    f.service
        .create_store_account(f.user_id, AccountType::Personal, Some("buyer".to_string()))
        .await
        .unwrap();

    let short_card = f
        .service
        .add_payment_method(f.user_id, "123".to_string(), "54321".to_string())
        .await;
    assert!(matches!(short_card, Err(DomainError::Validation { .. })));

    let bad_pin = f
        .service
        .add_payment_method(f.user_id, "12345678901".to_string(), "54".to_string())
        .await;
    assert!(matches!(bad_pin, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_add_payment_method_requires_alias() {
    let f = fixture();
    f.service
        .create_store_account(f.user_id, AccountType::Personal, None)
        .await
        .unwrap();

    let result = f
        .service
        .add_payment_method(f.user_id, "12345678901".to_string(), "54321".to_string())
        .await;
    assert!(matches!(result, Err(DomainError::BusinessRule { .. })));
}

#[tokio::test]
async fn test_add_payment_method_bank_rejection() {
    let f = fixture();
    f.service
        .create_store_account(f.user_id, AccountType::Personal, Some("buyer".to_string()))
        .await
        .unwrap();
    f.gateway.reject_cards();

    let result = f
        .service
        .add_payment_method(f.user_id, "12345678901".to_string(), "54321".to_string())
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Payment(PaymentError::InvalidCard))
    ));
    assert!(f
        .service
        .list_payment_methods(f.user_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_duplicate_active_card_rejected() {
    let f = fixture();
    f.service
        .create_store_account(f.user_id, AccountType::Personal, Some("buyer".to_string()))
        .await
        .unwrap();

    f.service
        .add_payment_method(f.user_id, "12345678901".to_string(), "54321".to_string())
        .await
        .unwrap();
    let result = f
        .service
        .add_payment_method(f.user_id, "12345678901".to_string(), "54321".to_string())
        .await;

    assert!(matches!(result, Err(DomainError::Duplicate { .. })));
}

#[tokio::test]
async fn test_readding_deactivated_card_reactivates_it() {
    let f = fixture();
    f.service
        .create_store_account(f.user_id, AccountType::Personal, Some("buyer".to_string()))
        .await
        .unwrap();

    let method = f
        .service
        .add_payment_method(f.user_id, "12345678901".to_string(), "54321".to_string())
        .await
        .unwrap();

    // An order references the card, so removal soft-deactivates it
    f.orders
        .insert(Order::new(Uuid::new_v4(), method.id, "12 Slush Lane".to_string()))
        .await;
    f.service
        .remove_payment_method(f.user_id, method.id)
        .await
        .unwrap();
    assert!(!f
        .payment_methods
        .find_by_id(method.id)
        .await
        .unwrap()
        .unwrap()
        .is_active());

    let restored = f
        .service
        .add_payment_method(f.user_id, "12345678901".to_string(), "54321".to_string())
        .await
        .unwrap();

    assert_eq!(restored.id, method.id);
    assert!(restored.is_active());
    assert_eq!(f.service.list_payment_methods(f.user_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_remove_unreferenced_method_deletes_it() {
    let f = fixture();
    f.service
        .create_store_account(f.user_id, AccountType::Personal, Some("buyer".to_string()))
        .await
        .unwrap();

    let method = f
        .service
        .add_payment_method(f.user_id, "12345678901".to_string(), "54321".to_string())
        .await
        .unwrap();

    f.service
        .remove_payment_method(f.user_id, method.id)
        .await
        .unwrap();

    assert!(f
        .payment_methods
        .find_by_id(method.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_remove_referenced_method_marks_orders() {
    let f = fixture();
    f.service
        .create_store_account(f.user_id, AccountType::Personal, Some("buyer".to_string()))
        .await
        .unwrap();

    let method = f
        .service
        .add_payment_method(f.user_id, "12345678901".to_string(), "54321".to_string())
        .await
        .unwrap();

    let mut order = Order::new(Uuid::new_v4(), method.id, "12 Slush Lane".to_string());
    order.total_price = dec!(9.99);
    let order_id = order.id;
    f.orders.insert(order).await;

    f.service
        .remove_payment_method(f.user_id, method.id)
        .await
        .unwrap();

    let stamped = f.orders.find_by_id(order_id).await.unwrap().unwrap();
    assert_eq!(stamped.deleted_payment_method_id, Some(method.id));
}

#[tokio::test]
async fn test_remove_foreign_method_forbidden() {
    let f = fixture();
    let other_user = Uuid::new_v4();

    f.service
        .create_store_account(other_user, AccountType::Personal, Some("other".to_string()))
        .await
        .unwrap();
    let foreign = f
        .service
        .add_payment_method(other_user, "12345678901".to_string(), "54321".to_string())
        .await
        .unwrap();

    f.service
        .create_store_account(f.user_id, AccountType::Personal, Some("buyer".to_string()))
        .await
        .unwrap();

    let result = f.service.remove_payment_method(f.user_id, foreign.id).await;
    assert!(matches!(result, Err(DomainError::Forbidden)));
}
