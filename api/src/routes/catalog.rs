//! Catalog routes: the public product grid.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use ss_core::domain::value_objects::catalog::CatalogQuery;
use ss_shared::types::ApiResponse;

use crate::dto::catalog::CatalogQueryParams;
use crate::error::to_response;
use crate::state::AppState;

/// GET /api/v1/catalog/products
pub async fn browse(
    state: web::Data<AppState>,
    params: web::Query<CatalogQueryParams>,
) -> HttpResponse {
    let query: CatalogQuery = params.into_inner().into();

    match state.catalog.browse(&query).await {
        Ok(page) => HttpResponse::Ok().json(ApiResponse::success(page)),
        Err(err) => to_response(&err),
    }
}

/// GET /api/v1/catalog/products/{id}
pub async fn product(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    match state.catalog.product(path.into_inner()).await {
        Ok(product) => HttpResponse::Ok().json(ApiResponse::success(product)),
        Err(err) => to_response(&err),
    }
}
