//! Application state: the domain services wired to their production
//! implementations.
//!
//! The services stay generic in `ss_core`; these aliases pin them to the
//! MySQL repositories, the Redis code store, SMTP delivery and the bank
//! HTTP client.

use std::sync::Arc;

use ss_core::services::{
    AuthService, CartService, CatalogService, OrderService, StoreAccountService, TokenService,
    WishlistService,
};
use ss_infra::database::mysql::{
    MySqlCartRepository, MySqlOrderRepository, MySqlPaymentMethodRepository,
    MySqlProductRepository, MySqlStoreAccountRepository, MySqlTokenRepository,
    MySqlUserRepository, MySqlWishlistRepository,
};
use ss_infra::{RedisCodeStore, SlushBankClient, SmtpEmailSender};

pub type CatalogServiceImpl = CatalogService<MySqlProductRepository>;
pub type CartServiceImpl =
    CartService<MySqlCartRepository, MySqlProductRepository, MySqlStoreAccountRepository>;
pub type WishlistServiceImpl =
    WishlistService<MySqlWishlistRepository, MySqlProductRepository, MySqlStoreAccountRepository>;
pub type AccountServiceImpl = StoreAccountService<
    MySqlStoreAccountRepository,
    MySqlPaymentMethodRepository,
    MySqlOrderRepository,
    SlushBankClient,
>;
pub type OrderServiceImpl = OrderService<
    MySqlOrderRepository,
    MySqlCartRepository,
    MySqlPaymentMethodRepository,
    MySqlStoreAccountRepository,
    SlushBankClient,
>;
pub type AuthServiceImpl =
    AuthService<MySqlUserRepository, SmtpEmailSender, RedisCodeStore, MySqlTokenRepository>;
pub type TokenServiceImpl = TokenService<MySqlTokenRepository>;

/// Shared application state handed to every handler
pub struct AppState {
    pub catalog: Arc<CatalogServiceImpl>,
    pub carts: Arc<CartServiceImpl>,
    pub wishlists: Arc<WishlistServiceImpl>,
    pub accounts: Arc<AccountServiceImpl>,
    pub orders: Arc<OrderServiceImpl>,
    pub auth: Arc<AuthServiceImpl>,
    pub tokens: Arc<TokenServiceImpl>,
}
