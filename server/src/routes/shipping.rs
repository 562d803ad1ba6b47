//! Shipping zone, rate, and checkout quote routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use storefront::rate::{RateDraft, RateQuote, ShippingRate, ShippingZone, ZoneDraft};
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::auth::AdminUser;
use crate::services::shipping as shipping_svc;
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuoteBody {
    pub country: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub subtotal: f64,
}

impl QuoteBody {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        if self.country.trim().is_empty() {
            errors.push("Country is required".to_owned());
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            errors.push("Weight cannot be negative".to_owned());
        }
        if !self.subtotal.is_finite() || self.subtotal < 0.0 {
            errors.push("Subtotal cannot be negative".to_owned());
        }
        if errors.is_empty() { Ok(()) } else { Err(ApiError::Validation(errors)) }
    }
}

// =============================================================================
// ZONES
// =============================================================================

/// `GET /api/shipping/zones`
pub async fn list_zones(State(state): State<AppState>) -> Result<Json<Vec<ShippingZone>>, ApiError> {
    Ok(Json(shipping_svc::list_zones(&state.pool).await?))
}

/// `GET /api/shipping/zones/{id}`
pub async fn get_zone(
    State(state): State<AppState>,
    Path(zone_id): Path<Uuid>,
) -> Result<Json<ShippingZone>, ApiError> {
    Ok(Json(shipping_svc::get_zone(&state.pool, zone_id).await?))
}

/// `POST /api/shipping/zones`
pub async fn create_zone(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(draft): Json<ZoneDraft>,
) -> Result<(StatusCode, Json<ShippingZone>), ApiError> {
    let zone = shipping_svc::create_zone(&state.pool, draft).await?;
    Ok((StatusCode::CREATED, Json(zone)))
}

/// `PUT /api/shipping/zones/{id}`
pub async fn replace_zone(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(zone_id): Path<Uuid>,
    Json(draft): Json<ZoneDraft>,
) -> Result<Json<ShippingZone>, ApiError> {
    Ok(Json(shipping_svc::replace_zone(&state.pool, zone_id, draft).await?))
}

/// `DELETE /api/shipping/zones/{id}`: removes the zone's rates too.
pub async fn delete_zone(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(zone_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    shipping_svc::delete_zone(&state.pool, zone_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// RATES
// =============================================================================

/// `GET /api/shipping/zones/{id}/rates`
pub async fn list_rates(
    State(state): State<AppState>,
    Path(zone_id): Path<Uuid>,
) -> Result<Json<Vec<ShippingRate>>, ApiError> {
    Ok(Json(shipping_svc::list_rates(&state.pool, zone_id).await?))
}

/// `POST /api/shipping/zones/{id}/rates`
pub async fn create_rate(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(zone_id): Path<Uuid>,
    Json(draft): Json<RateDraft>,
) -> Result<(StatusCode, Json<ShippingRate>), ApiError> {
    let rate = shipping_svc::create_rate(&state.pool, zone_id, draft).await?;
    Ok((StatusCode::CREATED, Json(rate)))
}

/// `PUT /api/shipping/rates/{id}`: whole-document replace.
pub async fn replace_rate(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(rate_id): Path<Uuid>,
    Json(draft): Json<RateDraft>,
) -> Result<Json<ShippingRate>, ApiError> {
    Ok(Json(shipping_svc::replace_rate(&state.pool, rate_id, draft).await?))
}

/// `DELETE /api/shipping/rates/{id}`
pub async fn delete_rate(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(rate_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    shipping_svc::delete_rate(&state.pool, rate_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// QUOTE
// =============================================================================

/// `POST /api/shipping/quote`: applicable rates for a cart, cheapest first.
pub async fn quote(
    State(state): State<AppState>,
    Json(body): Json<QuoteBody>,
) -> Result<Json<Vec<RateQuote>>, ApiError> {
    body.validate()?;
    let quotes = shipping_svc::quote(&state.pool, &body.country, body.weight, body.subtotal).await?;
    tracing::debug!(country = %body.country, options = quotes.len(), "shipping quoted");
    Ok(Json(quotes))
}

#[cfg(test)]
#[path = "shipping_test.rs"]
mod tests;
