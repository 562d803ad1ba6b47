//! Footer settings and footer link routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use storefront::footer::{FooterLink, FooterLinkDraft, FooterSettings, ReorderItem};
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::auth::AdminUser;
use crate::services::footer as footer_svc;
use crate::state::AppState;

#[derive(Debug, Deserialize, Serialize)]
pub struct ReorderBody {
    pub links: Vec<ReorderItem>,
}

/// `GET /api/footer/settings`
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<FooterSettings>, ApiError> {
    Ok(Json(footer_svc::get_or_create_settings(&state.pool).await?))
}

/// `PUT /api/footer/settings`
pub async fn put_settings(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(settings): Json<FooterSettings>,
) -> Result<Json<FooterSettings>, ApiError> {
    Ok(Json(footer_svc::replace_settings(&state.pool, settings).await?))
}

/// `GET /api/footer/links`: all links in display order.
pub async fn list_links(State(state): State<AppState>) -> Result<Json<Vec<FooterLink>>, ApiError> {
    Ok(Json(footer_svc::list_links(&state.pool).await?))
}

/// `POST /api/footer/links`
pub async fn create_link(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(draft): Json<FooterLinkDraft>,
) -> Result<(StatusCode, Json<FooterLink>), ApiError> {
    let link = footer_svc::create_link(&state.pool, draft).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// `PUT /api/footer/links/{id}`
pub async fn replace_link(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(link_id): Path<Uuid>,
    Json(draft): Json<FooterLinkDraft>,
) -> Result<Json<FooterLink>, ApiError> {
    Ok(Json(footer_svc::replace_link(&state.pool, link_id, draft).await?))
}

/// `DELETE /api/footer/links/{id}`
pub async fn delete_link(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(link_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    footer_svc::delete_link(&state.pool, link_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /api/footer/links/reorder`: apply the whole list or nothing.
pub async fn reorder_links(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(body): Json<ReorderBody>,
) -> Result<Json<Vec<FooterLink>>, ApiError> {
    Ok(Json(footer_svc::reorder_links(&state.pool, &body.links).await?))
}

#[cfg(test)]
#[path = "footer_test.rs"]
mod tests;
