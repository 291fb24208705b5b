//! WishlistService tests against mock repositories.

use std::sync::Arc;

use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::domain::entities::product::Product;
use crate::domain::entities::store_account::{AccountType, StoreAccount};
use crate::domain::value_objects::catalog::CatalogProduct;
use crate::domain::value_objects::checkout::CartLine;
use crate::errors::DomainError;
use crate::repositories::{
    MockProductRepository, MockStoreAccountRepository, MockWishlistRepository,
};

use super::WishlistService;

struct Fixture {
    service:
        WishlistService<MockWishlistRepository, MockProductRepository, MockStoreAccountRepository>,
    user_id: Uuid,
    product_id: Uuid,
}

async fn fixture() -> Fixture {
    let wishlists = Arc::new(MockWishlistRepository::new());
    let products = Arc::new(MockProductRepository::new());
    let accounts = Arc::new(MockStoreAccountRepository::new());

    let user_id = Uuid::new_v4();
    accounts
        .insert(StoreAccount::new(
            user_id,
            AccountType::Personal,
            Some("wisher".to_string()),
        ))
        .await;

    let product_id = Uuid::new_v4();
    products
        .insert(CatalogProduct {
            product: Product {
                id: product_id,
                supplier_id: Uuid::new_v4(),
                name: "Pretzel".to_string(),
                description: "Salted".to_string(),
                product_type: "Snacks".to_string(),
                price: dec!(1.25),
                stock: None,
            },
            supplier_name: "Corner Bakery".to_string(),
        })
        .await;
    wishlists
        .register_product(CartLine {
            product_id,
            product_name: "Pretzel".to_string(),
            product_type: "Snacks".to_string(),
            unit_price: dec!(1.25),
            quantity: 0,
            supplier_name: "Corner Bakery".to_string(),
            vendor_alias: Some("bakery".to_string()),
        })
        .await;

    Fixture {
        service: WishlistService::new(wishlists, products, accounts),
        user_id,
        product_id,
    }
}

#[tokio::test]
async fn test_add_creates_wishlist_on_first_use() {
    let f = fixture().await;

    f.service
        .add_to_wishlist(f.user_id, f.product_id, 1)
        .await
        .unwrap();

    let lines = f.service.view_wishlist(f.user_id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].product_name, "Pretzel");
}

#[tokio::test]
async fn test_duplicate_add_merges_quantity() {
    let f = fixture().await;

    f.service
        .add_to_wishlist(f.user_id, f.product_id, 1)
        .await
        .unwrap();
    f.service
        .add_to_wishlist(f.user_id, f.product_id, 4)
        .await
        .unwrap();

    let lines = f.service.view_wishlist(f.user_id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 5);
}

#[tokio::test]
async fn test_remove_absent_line_is_not_found() {
    let f = fixture().await;

    // No wishlist at all yet
    let result = f
        .service
        .remove_from_wishlist(f.user_id, f.product_id)
        .await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));

    // Wishlist exists but the line doesn't
    f.service
        .add_to_wishlist(f.user_id, f.product_id, 1)
        .await
        .unwrap();
    let result = f
        .service
        .remove_from_wishlist(f.user_id, Uuid::new_v4())
        .await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_zero_quantity_rejected() {
    let f = fixture().await;

    let result = f.service.add_to_wishlist(f.user_id, f.product_id, 0).await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}
