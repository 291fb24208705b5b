//! Account management routes: the API counterpart of the manage page.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use ss_shared::types::ApiResponse;

use crate::dto::auth::MessageResponse;
use crate::dto::cart::LineResponse;
use crate::dto::manage::{
    AddPaymentMethodRequest, ChangeEmailRequest, ChangePasswordRequest, ChangeUsernameRequest,
    CreateStoreAccountRequest, OverviewResponse, PaymentMethodResponse, SetAliasRequest,
    TwoFactorToggleRequest,
};
use crate::error::{to_response, validation_response};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// GET /api/v1/manage/overview
///
/// The aggregate behind the account page: identity flags, store account,
/// payment methods, cart contents and order history.
pub async fn overview(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    let user = match state.auth.get_user(auth.user_id).await {
        Ok(user) => user,
        Err(err) => return to_response(&err),
    };

    let account = match state.accounts.account_for(auth.user_id).await {
        Ok(account) => account,
        Err(err) => return to_response(&err),
    };

    let (alias, payment_methods, cart_items, orders) = match &account {
        Some(_) => {
            let methods = match state.accounts.list_payment_methods(auth.user_id).await {
                Ok(methods) => methods,
                Err(err) => return to_response(&err),
            };
            let cart = match state.carts.view_cart(auth.user_id).await {
                Ok(lines) => lines,
                Err(err) => return to_response(&err),
            };
            let orders = match state.orders.orders_for(auth.user_id).await {
                Ok(orders) => orders,
                Err(err) => return to_response(&err),
            };
            (
                account.as_ref().and_then(|a| a.alias.clone()),
                methods,
                cart,
                orders,
            )
        }
        None => (None, Vec::new(), Vec::new(), Vec::new()),
    };

    let response = OverviewResponse {
        username: user.username,
        email: user.email,
        email_confirmed: user.email_confirmed,
        two_factor_enabled: user.two_factor_enabled,
        store_account_created: account.is_some(),
        alias,
        payment_methods: payment_methods
            .iter()
            .map(PaymentMethodResponse::from)
            .collect(),
        cart_items: cart_items.into_iter().map(LineResponse::from).collect(),
        orders,
    };

    HttpResponse::Ok().json(ApiResponse::success(response))
}

/// POST /api/v1/manage/store-account
pub async fn create_store_account(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<CreateStoreAccountRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_response(&errors);
    }

    let request = request.into_inner();
    match state
        .accounts
        .create_store_account(auth.user_id, request.account_type, request.alias)
        .await
    {
        Ok(account) => HttpResponse::Created().json(ApiResponse::success(account)),
        Err(err) => to_response(&err),
    }
}

/// PUT /api/v1/manage/store-account/alias
pub async fn set_alias(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<SetAliasRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_response(&errors);
    }

    match state
        .accounts
        .set_alias(auth.user_id, request.alias.clone())
        .await
    {
        Ok(account) => HttpResponse::Ok().json(ApiResponse::success(account)),
        Err(err) => to_response(&err),
    }
}

/// POST /api/v1/manage/payment-methods
pub async fn add_payment_method(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<AddPaymentMethodRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_response(&errors);
    }

    let request = request.into_inner();
    match state
        .accounts
        .add_payment_method(auth.user_id, request.card_number, request.key_pin)
        .await
    {
        Ok(method) => {
            HttpResponse::Created().json(ApiResponse::success(PaymentMethodResponse::from(&method)))
        }
        Err(err) => to_response(&err),
    }
}

/// DELETE /api/v1/manage/payment-methods/{id}
pub async fn remove_payment_method(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse {
    match state
        .accounts
        .remove_payment_method(auth.user_id, path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "payment method removed",
        ))),
        Err(err) => to_response(&err),
    }
}

/// PUT /api/v1/manage/password
pub async fn change_password(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<ChangePasswordRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_response(&errors);
    }

    match state
        .auth
        .change_password(auth.user_id, &request.old_password, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "your password has been changed",
        ))),
        Err(err) => to_response(&err),
    }
}

/// PUT /api/v1/manage/email
pub async fn change_email(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<ChangeEmailRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_response(&errors);
    }

    match state
        .auth
        .change_email(auth.user_id, &request.old_email, &request.new_email)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "your email has been changed",
        ))),
        Err(err) => to_response(&err),
    }
}

/// PUT /api/v1/manage/username
pub async fn change_username(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<ChangeUsernameRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_response(&errors);
    }

    match state
        .auth
        .change_username(auth.user_id, &request.old_username, &request.new_username)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "your username has been changed",
        ))),
        Err(err) => to_response(&err),
    }
}

/// PUT /api/v1/manage/two-factor
pub async fn toggle_two_factor(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<TwoFactorToggleRequest>,
) -> HttpResponse {
    let result = if request.enabled {
        state.auth.enable_two_factor(auth.user_id).await
    } else {
        state.auth.disable_two_factor(auth.user_id).await
    };

    match result {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            if request.enabled {
                "two-factor authentication enabled"
            } else {
                "two-factor authentication disabled"
            },
        ))),
        Err(err) => to_response(&err),
    }
}
