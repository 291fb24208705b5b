//! Repository traits and their in-memory mocks.
//!
//! Traits define the persistence contract for the domain; SQLx
//! implementations live in the `ss_infra` crate. Mocks back the service
//! tests.

pub mod cart;
pub mod order;
pub mod payment_method;
pub mod product;
pub mod store_account;
pub mod token;
pub mod user;
pub mod wishlist;

pub use cart::{CartRepository, MockCartRepository};
pub use order::{MockOrderRepository, OrderRepository};
pub use payment_method::{MockPaymentMethodRepository, PaymentMethodRepository};
pub use product::{MockProductRepository, ProductRepository};
pub use store_account::{MockStoreAccountRepository, StoreAccountRepository};
pub use token::{MockTokenRepository, TokenRepository};
pub use user::{MockUserRepository, UserRepository};
pub use wishlist::{MockWishlistRepository, WishlistRepository};
