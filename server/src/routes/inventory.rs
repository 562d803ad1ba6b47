//! Inventory routes, including spreadsheet download and upload.

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use storefront::inventory::{self, InventoryError, InventoryItem, InventorySummary};
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::auth::AdminUser;
use crate::services::inventory::{self as inventory_svc, InventoryUpdate};
use crate::state::AppState;

const EXPORT_FILENAME: &str = "inventory.csv";

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub created: usize,
    pub updated: usize,
    pub errors: Vec<String>,
}

fn spreadsheet_error(err: InventoryError) -> ApiError {
    match err {
        InventoryError::MissingColumn(column) => ApiError::Validation(vec![format!("Missing required column: {column}")]),
        other => ApiError::BadRequest(other.to_string()),
    }
}

/// `GET /api/inventory`
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<InventoryItem>>, ApiError> {
    Ok(Json(inventory_svc::list_items(&state.pool).await?))
}

/// `GET /api/inventory/summary`: dashboard stat cards.
pub async fn summary(State(state): State<AppState>) -> Result<Json<InventorySummary>, ApiError> {
    let items = inventory_svc::list_items(&state.pool).await?;
    Ok(Json(InventorySummary::from_items(&items, state.config.low_stock_threshold)))
}

/// `PATCH /api/inventory/{id}`
pub async fn update_item(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(item_id): Path<Uuid>,
    Json(update): Json<InventoryUpdate>,
) -> Result<Json<InventoryItem>, ApiError> {
    Ok(Json(inventory_svc::update_item(&state.pool, item_id, update).await?))
}

/// `GET /api/inventory/export.csv`
pub async fn export_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    let items = inventory_svc::list_items(&state.pool).await?;

    let mut body = Vec::new();
    inventory::export_csv(&items, state.config.low_stock_threshold, &mut body)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{EXPORT_FILENAME}\"")),
        ],
        body,
    )
        .into_response())
}

/// `POST /api/inventory/import.csv`: body is the spreadsheet text.
///
/// Bad rows are skipped and reported; good rows are upserted together.
pub async fn import_csv(
    State(state): State<AppState>,
    _admin: AdminUser,
    body: String,
) -> Result<Json<ImportResponse>, ApiError> {
    let report = inventory::import_csv(body.as_bytes()).map_err(spreadsheet_error)?;
    if !report.errors.is_empty() {
        tracing::warn!(rejected = report.errors.len(), accepted = report.rows.len(), "spreadsheet rows rejected");
    }

    let outcome = inventory_svc::import_rows(&state.pool, &report.rows).await?;
    Ok(Json(ImportResponse { created: outcome.created, updated: outcome.updated, errors: report.errors }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_helpers::test_app_state;

    #[tokio::test]
    async fn import_without_quantity_column_is_rejected() {
        let body = "Product Name,Size,Color\nTee,M,Red\n".to_owned();
        let err = import_csv(State(test_app_state()), AdminUser, body).await.unwrap_err();
        let ApiError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors, vec!["Missing required column: Quantity"]);
    }

    #[tokio::test]
    async fn negative_quantity_update_is_rejected() {
        let update = InventoryUpdate { quantity: Some(-3), location: None };
        let err = update_item(State(test_app_state()), AdminUser, Path(Uuid::new_v4()), Json(update))
            .await
            .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    }
}
