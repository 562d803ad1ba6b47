//! Product, gallery, and review routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use storefront::validate::{ProductInput, ReviewInput};
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::auth::AdminUser;
use crate::services::products::{self as products_svc, ImageMove, Product, Review};
use crate::state::AppState;

/// `GET /api/products`
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(products_svc::list_products(&state.pool).await?))
}

/// `GET /api/products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(products_svc::get_product(&state.pool, product_id).await?))
}

/// `POST /api/products`
pub async fn create_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = products_svc::create_product(&state.pool, input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// `DELETE /api/products/{id}`
pub async fn delete_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(product_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    products_svc::delete_product(&state.pool, product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /api/products/{id}/images`: body `{from, to}`; returns the new order.
pub async fn move_image(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(product_id): Path<Uuid>,
    Json(edit): Json<ImageMove>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(products_svc::move_image(&state.pool, product_id, edit).await?))
}

/// `GET /api/products/{id}/reviews`
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(products_svc::list_reviews(&state.pool, product_id).await?))
}

/// `POST /api/products/{id}/reviews`: open to shoppers.
pub async fn create_review(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(input): Json<ReviewInput>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let review = products_svc::create_review(&state.pool, product_id, input).await?;
    Ok((StatusCode::CREATED, Json(review)))
}
