//! Route table and shared endpoints.

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use ss_shared::types::ApiResponse;

use crate::middleware::JwtAuth;
use crate::routes;
use crate::state::TokenServiceImpl;

/// Register every route under the service config.
///
/// Public surface: catalog browsing, registration and the sign-in flows.
/// Everything touching a user's own data sits behind [`JwtAuth`].
pub fn configure_routes(cfg: &mut web::ServiceConfig, tokens: Arc<TokenServiceImpl>) {
    cfg.route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/catalog")
                        .route("/products", web::get().to(routes::catalog::browse))
                        .route("/products/{id}", web::get().to(routes::catalog::product)),
                )
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(routes::auth::register))
                        .route("/login", web::post().to(routes::auth::login))
                        .route(
                            "/two-factor/send",
                            web::post().to(routes::auth::send_two_factor),
                        )
                        .route(
                            "/two-factor/verify",
                            web::post().to(routes::auth::verify_two_factor),
                        )
                        .route(
                            "/forgot-password",
                            web::post().to(routes::auth::forgot_password),
                        )
                        .route(
                            "/reset-password",
                            web::post().to(routes::auth::reset_password),
                        )
                        .route("/refresh", web::post().to(routes::auth::refresh))
                        .service(
                            web::scope("")
                                .wrap(JwtAuth::new(tokens.clone()))
                                .route(
                                    "/confirm-email",
                                    web::post().to(routes::auth::confirm_email),
                                )
                                .route(
                                    "/confirm-email/resend",
                                    web::post().to(routes::auth::resend_confirmation),
                                )
                                .route("/logout", web::post().to(routes::auth::logout)),
                        ),
                )
                .service(
                    web::scope("/cart")
                        .wrap(JwtAuth::new(tokens.clone()))
                        .route("", web::get().to(routes::cart::view))
                        .route("/items", web::post().to(routes::cart::add_item))
                        .route(
                            "/items/{product_id}",
                            web::delete().to(routes::cart::remove_item),
                        ),
                )
                .service(
                    web::scope("/wishlist")
                        .wrap(JwtAuth::new(tokens.clone()))
                        .route("", web::get().to(routes::wishlist::view))
                        .route("/items", web::post().to(routes::wishlist::add_item))
                        .route(
                            "/items/{product_id}",
                            web::delete().to(routes::wishlist::remove_item),
                        ),
                )
                .service(
                    web::scope("/manage")
                        .wrap(JwtAuth::new(tokens.clone()))
                        .route("/overview", web::get().to(routes::manage::overview))
                        .route(
                            "/store-account",
                            web::post().to(routes::manage::create_store_account),
                        )
                        .route(
                            "/store-account/alias",
                            web::put().to(routes::manage::set_alias),
                        )
                        .route(
                            "/payment-methods",
                            web::post().to(routes::manage::add_payment_method),
                        )
                        .route(
                            "/payment-methods/{id}",
                            web::delete().to(routes::manage::remove_payment_method),
                        )
                        .route("/password", web::put().to(routes::manage::change_password))
                        .route("/email", web::put().to(routes::manage::change_email))
                        .route("/username", web::put().to(routes::manage::change_username))
                        .route(
                            "/two-factor",
                            web::put().to(routes::manage::toggle_two_factor),
                        ),
                )
                .service(
                    web::scope("/orders")
                        .wrap(JwtAuth::new(tokens))
                        .route("", web::get().to(routes::orders::list))
                        .route("/checkout", web::get().to(routes::orders::checkout_context))
                        .route("", web::post().to(routes::orders::place))
                        .route("/{id}/refund", web::post().to(routes::orders::refund)),
                ),
        )
        .default_service(web::route().to(not_found));
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "slushstore-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error(
        "NOT_FOUND",
        "the requested resource was not found",
    ))
}
