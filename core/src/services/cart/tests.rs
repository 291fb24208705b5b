//! CartService tests against mock repositories.

use std::sync::Arc;

use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::domain::entities::product::Product;
use crate::domain::entities::store_account::{AccountType, StoreAccount};
use crate::domain::value_objects::catalog::CatalogProduct;
use crate::domain::value_objects::checkout::CartLine;
use crate::errors::DomainError;
use crate::repositories::{
    MockCartRepository, MockProductRepository, MockStoreAccountRepository,
};

use super::CartService;

struct Fixture {
    service: CartService<MockCartRepository, MockProductRepository, MockStoreAccountRepository>,
    user_id: Uuid,
    product_id: Uuid,
}

async fn fixture() -> Fixture {
    let carts = Arc::new(MockCartRepository::new());
    let products = Arc::new(MockProductRepository::new());
    let accounts = Arc::new(MockStoreAccountRepository::new());

    let user_id = Uuid::new_v4();
    let account = StoreAccount::new(user_id, AccountType::Personal, Some("buyer".to_string()));
    accounts.insert(account).await;

    let product_id = Uuid::new_v4();
    products
        .insert(CatalogProduct {
            product: Product {
                id: product_id,
                supplier_id: Uuid::new_v4(),
                name: "Blue Slush".to_string(),
                description: "A very blue slush".to_string(),
                product_type: "Drinks".to_string(),
                price: dec!(2.50),
                stock: Some(5),
            },
            supplier_name: "Acme Beverages".to_string(),
        })
        .await;
    carts
        .register_product(CartLine {
            product_id,
            product_name: "Blue Slush".to_string(),
            product_type: "Drinks".to_string(),
            unit_price: dec!(2.50),
            quantity: 0,
            supplier_name: "Acme Beverages".to_string(),
            vendor_alias: Some("acme".to_string()),
        })
        .await;

    Fixture {
        service: CartService::new(carts, products, accounts),
        user_id,
        product_id,
    }
}

#[tokio::test]
async fn test_add_creates_cart_and_line() {
    let f = fixture().await;

    f.service.add_to_cart(f.user_id, f.product_id, 2).await.unwrap();

    let lines = f.service.view_cart(f.user_id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 2);
    assert_eq!(lines[0].product_name, "Blue Slush");
}

#[tokio::test]
async fn test_add_same_product_merges_quantity() {
    let f = fixture().await;

    f.service.add_to_cart(f.user_id, f.product_id, 2).await.unwrap();
    f.service.add_to_cart(f.user_id, f.product_id, 3).await.unwrap();

    let lines = f.service.view_cart(f.user_id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 5);
}

#[tokio::test]
async fn test_add_rejects_zero_quantity() {
    let f = fixture().await;

    let result = f.service.add_to_cart(f.user_id, f.product_id, 0).await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_add_unknown_product_rejected() {
    let f = fixture().await;

    let result = f.service.add_to_cart(f.user_id, Uuid::new_v4(), 1).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_add_without_store_account_rejected() {
    let f = fixture().await;

    let result = f.service.add_to_cart(Uuid::new_v4(), f.product_id, 1).await;
    assert!(matches!(result, Err(DomainError::BusinessRule { .. })));
}

#[tokio::test]
async fn test_remove_line() {
    let f = fixture().await;

    f.service.add_to_cart(f.user_id, f.product_id, 1).await.unwrap();
    f.service
        .remove_from_cart(f.user_id, f.product_id)
        .await
        .unwrap();

    assert!(f.service.view_cart(f.user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_absent_line_is_not_found() {
    let f = fixture().await;

    f.service.add_to_cart(f.user_id, f.product_id, 1).await.unwrap();

    let result = f.service.remove_from_cart(f.user_id, Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}
