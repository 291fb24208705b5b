//! Domain services.

pub mod account;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod crypto;
pub mod order;
pub mod payment;
pub mod token;
pub mod verification;
pub mod wishlist;

pub use account::StoreAccountService;
pub use auth::AuthService;
pub use cart::CartService;
pub use catalog::CatalogService;
pub use crypto::CardCipher;
pub use order::OrderService;
pub use payment::BankGateway;
pub use token::TokenService;
pub use verification::VerificationService;
pub use wishlist::WishlistService;
