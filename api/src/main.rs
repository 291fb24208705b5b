use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use ss_api::app::configure_routes;
use ss_api::middleware::create_cors;
use ss_api::state::AppState;
use ss_core::services::auth::AuthConfig;
use ss_core::services::token::TokenConfig;
use ss_core::services::{
    AuthService, CardCipher, CartService, CatalogService, OrderService, StoreAccountService,
    TokenService, VerificationService, WishlistService,
};
use ss_infra::database::mysql::{
    MySqlCartRepository, MySqlOrderRepository, MySqlPaymentMethodRepository,
    MySqlProductRepository, MySqlStoreAccountRepository, MySqlTokenRepository,
    MySqlUserRepository, MySqlWishlistRepository,
};
use ss_infra::{create_pool, RedisCodeStore, SlushBankClient, SmtpEmailSender};
use ss_shared::config::{
    BankApiConfig, CacheConfig, CorsConfig, DatabaseConfig, EmailConfig, ServerConfig,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("starting SlushStore API server");

    // Configuration
    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env();
    let cache_config = CacheConfig::from_env().with_prefix("slushstore");
    let bank_config = BankApiConfig::from_env().map_err(anyhow::Error::msg)?;
    let email_config = EmailConfig::from_env().map_err(anyhow::Error::msg)?;
    let token_config = TokenConfig::from_env().map_err(anyhow::Error::msg)?;
    let cors_config = match std::env::var("CORS_ALLOW_ANY").as_deref() {
        Ok("1") | Ok("true") => CorsConfig::development(),
        _ => CorsConfig::default(),
    };

    // Infrastructure
    let pool = create_pool(&database_config).await?;
    let code_store = Arc::new(RedisCodeStore::connect(cache_config).await?);
    let email_sender = Arc::new(SmtpEmailSender::new(&email_config)?);
    let gateway = Arc::new(SlushBankClient::new(bank_config.clone())?);
    let cipher = Arc::new(CardCipher::new(&bank_config.public_key_pem)?);

    // Repositories
    let users = Arc::new(MySqlUserRepository::new(pool.clone()));
    let store_accounts = Arc::new(MySqlStoreAccountRepository::new(pool.clone()));
    let payment_methods = Arc::new(MySqlPaymentMethodRepository::new(pool.clone()));
    let products = Arc::new(MySqlProductRepository::new(pool.clone()));
    let carts = Arc::new(MySqlCartRepository::new(pool.clone()));
    let wishlists = Arc::new(MySqlWishlistRepository::new(pool.clone()));
    let orders = Arc::new(MySqlOrderRepository::new(pool.clone()));
    let tokens_repo = Arc::new(MySqlTokenRepository::new(pool));

    // Services
    let verification = Arc::new(VerificationService::new(email_sender, code_store));
    let token_service = Arc::new(TokenService::new(tokens_repo, token_config));
    let state = web::Data::new(AppState {
        catalog: Arc::new(CatalogService::new(products.clone())),
        carts: Arc::new(CartService::new(
            carts.clone(),
            products.clone(),
            store_accounts.clone(),
        )),
        wishlists: Arc::new(WishlistService::new(
            wishlists,
            products,
            store_accounts.clone(),
        )),
        accounts: Arc::new(StoreAccountService::new(
            store_accounts.clone(),
            payment_methods.clone(),
            orders.clone(),
            gateway.clone(),
            cipher.clone(),
        )),
        orders: Arc::new(OrderService::new(
            orders,
            carts,
            payment_methods,
            store_accounts,
            gateway,
            cipher,
        )),
        auth: Arc::new(AuthService::new(
            users,
            verification,
            token_service.clone(),
            AuthConfig::default(),
        )),
        tokens: token_service.clone(),
    });

    let bind_address = server_config.bind_address();
    info!("listening on {}", bind_address);

    HttpServer::new(move || {
        let tokens = token_service.clone();
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .wrap(create_cors(&cors_config))
            .configure(|cfg| configure_routes(cfg, tokens))
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
