//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the storefront (public reads, checkout quotes,
//! review submission) and the admin console (every mutation, gated by
//! [`auth::AdminUser`]). CORS is open because the storefront and admin
//! frontends are served from other origins.

pub mod auth;
pub mod footer;
pub mod hero;
pub mod inventory;
pub mod marquee;
pub mod products;
pub mod shipping;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, patch, post, put};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::PublicConfig;
use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/config", get(public_config))
        .route("/api/hero", get(hero::get_hero).put(hero::put_hero))
        .route(
            "/api/footer/settings",
            get(footer::get_settings).put(footer::put_settings),
        )
        .route("/api/footer/links", get(footer::list_links).post(footer::create_link))
        .route("/api/footer/links/reorder", put(footer::reorder_links))
        .route(
            "/api/footer/links/{id}",
            put(footer::replace_link).delete(footer::delete_link),
        )
        .route(
            "/api/shipping/zones",
            get(shipping::list_zones).post(shipping::create_zone),
        )
        .route(
            "/api/shipping/zones/{id}",
            get(shipping::get_zone)
                .put(shipping::replace_zone)
                .delete(shipping::delete_zone),
        )
        .route(
            "/api/shipping/zones/{id}/rates",
            get(shipping::list_rates).post(shipping::create_rate),
        )
        .route(
            "/api/shipping/rates/{id}",
            put(shipping::replace_rate).delete(shipping::delete_rate),
        )
        .route("/api/shipping/quote", post(shipping::quote))
        .route("/api/inventory", get(inventory::list_items))
        .route("/api/inventory/summary", get(inventory::summary))
        .route("/api/inventory/export.csv", get(inventory::export_csv))
        .route("/api/inventory/import.csv", post(inventory::import_csv))
        .route("/api/inventory/{id}", patch(inventory::update_item))
        .route(
            "/api/marquee",
            get(marquee::list_announcements).post(marquee::create_announcement),
        )
        .route(
            "/api/marquee/{id}",
            put(marquee::replace_announcement).delete(marquee::delete_announcement),
        )
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/products/{id}",
            get(products::get_product).delete(products::delete_product),
        )
        .route("/api/products/{id}/images", put(products::move_image))
        .route(
            "/api/products/{id}/reviews",
            get(products::list_reviews).post(products::create_review),
        )
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /api/config`: values the browser is allowed to see.
async fn public_config(State(state): State<AppState>) -> Json<PublicConfig> {
    Json(state.config.public())
}
