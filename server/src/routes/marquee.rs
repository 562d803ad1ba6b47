//! Marquee announcement routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use storefront::marquee::{self, Announcement, AnnouncementDraft};
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::auth::AdminUser;
use crate::services::marquee as marquee_svc;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// When set, return only what the storefront should scroll.
    #[serde(default)]
    pub active: bool,
}

/// `GET /api/marquee` (`?active=true` for the storefront view).
pub async fn list_announcements(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<ListQuery>,
) -> Result<Json<Vec<Announcement>>, ApiError> {
    let all = marquee_svc::list_announcements(&state.pool).await?;
    Ok(Json(if query.active { marquee::active_in_order(&all) } else { all }))
}

/// `POST /api/marquee`
pub async fn create_announcement(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(draft): Json<AnnouncementDraft>,
) -> Result<(StatusCode, Json<Announcement>), ApiError> {
    let announcement = marquee_svc::create_announcement(&state.pool, draft).await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

/// `PUT /api/marquee/{id}`
pub async fn replace_announcement(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(announcement_id): Path<Uuid>,
    Json(draft): Json<AnnouncementDraft>,
) -> Result<Json<Announcement>, ApiError> {
    Ok(Json(marquee_svc::replace_announcement(&state.pool, announcement_id, draft).await?))
}

/// `DELETE /api/marquee/{id}`
pub async fn delete_announcement(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(announcement_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    marquee_svc::delete_announcement(&state.pool, announcement_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
