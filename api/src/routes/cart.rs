//! Shopping cart routes.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use ss_shared::types::ApiResponse;

use crate::dto::cart::{AddItemRequest, LineResponse};
use crate::error::{to_response, validation_response};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// GET /api/v1/cart
pub async fn view(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    match state.carts.view_cart(auth.user_id).await {
        Ok(lines) => {
            let lines: Vec<LineResponse> = lines.into_iter().map(LineResponse::from).collect();
            HttpResponse::Ok().json(ApiResponse::success(lines))
        }
        Err(err) => to_response(&err),
    }
}

/// POST /api/v1/cart/items
pub async fn add_item(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<AddItemRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_response(&errors);
    }

    match state
        .carts
        .add_to_cart(auth.user_id, request.product_id, request.quantity)
        .await
    {
        Ok(()) => view(state, auth).await,
        Err(err) => to_response(&err),
    }
}

/// DELETE /api/v1/cart/items/{product_id}
pub async fn remove_item(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse {
    match state
        .carts
        .remove_from_cart(auth.user_id, path.into_inner())
        .await
    {
        Ok(()) => view(state, auth).await,
        Err(err) => to_response(&err),
    }
}
