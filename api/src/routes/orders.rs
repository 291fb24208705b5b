//! Order routes: checkout, history and refunds.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use ss_shared::types::ApiResponse;

use crate::dto::orders::{CheckoutContextResponse, OrderResponse, PlaceOrderRequest};
use crate::error::{to_response, validation_response};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// GET /api/v1/orders
pub async fn list(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    match state.orders.orders_for(auth.user_id).await {
        Ok(orders) => HttpResponse::Ok().json(ApiResponse::success(orders)),
        Err(err) => to_response(&err),
    }
}

/// GET /api/v1/orders/checkout
pub async fn checkout_context(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    match state.orders.checkout_context(auth.user_id).await {
        Ok((lines, methods)) => HttpResponse::Ok().json(ApiResponse::success(
            CheckoutContextResponse::new(lines, methods),
        )),
        Err(err) => to_response(&err),
    }
}

/// POST /api/v1/orders
pub async fn place(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<PlaceOrderRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_response(&errors);
    }

    let request = request.into_inner();
    match state
        .orders
        .place_order(auth.user_id, request.payment_method_id, request.shipping_address)
        .await
    {
        Ok(order) => HttpResponse::Created().json(ApiResponse::success(OrderResponse { order })),
        Err(err) => to_response(&err),
    }
}

/// POST /api/v1/orders/{id}/refund
pub async fn refund(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse {
    match state.orders.refund_order(auth.user_id, path.into_inner()).await {
        Ok(order) => HttpResponse::Ok().json(ApiResponse::success(OrderResponse { order })),
        Err(err) => to_response(&err),
    }
}
