//! Hero banner routes.

use axum::extract::State;
use axum::response::Json;
use storefront::hero::Hero;

use crate::error::ApiError;
use crate::routes::auth::AdminUser;
use crate::services::hero as hero_svc;
use crate::state::AppState;

/// `GET /api/hero`: current banner, bootstrapped on first read.
pub async fn get_hero(State(state): State<AppState>) -> Result<Json<Hero>, ApiError> {
    Ok(Json(hero_svc::get_or_create_hero(&state.pool).await?))
}

/// `PUT /api/hero`: replace the banner.
pub async fn put_hero(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(hero): Json<Hero>,
) -> Result<Json<Hero>, ApiError> {
    Ok(Json(hero_svc::replace_hero(&state.pool, hero).await?))
}
