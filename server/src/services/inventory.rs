//! Inventory service: stock lines, admin edits, and spreadsheet import.
//!
//! Import rows are keyed by variant (product name + size + color, case
//! insensitive). A matching line is updated, anything else is inserted. The
//! whole import runs in one transaction.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use storefront::inventory::{ImportRow, InventoryItem};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::ServiceError;

type ItemRow = (Uuid, Option<Uuid>, String, String, String, i32, String, OffsetDateTime);

const ITEM_COLUMNS: &str = "id, product_id, product_name, size, color, quantity, location, last_updated";

fn row_to_item((id, product_id, product_name, size, color, quantity, location, last_updated): ItemRow) -> InventoryItem {
    InventoryItem { id, product_id, product_name, size, color, quantity, location, last_updated }
}

/// Partial edit from the inventory table. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryUpdate {
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub location: Option<String>,
}

impl InventoryUpdate {
    fn validate(&self) -> Result<(), ServiceError> {
        let mut errors = Vec::new();
        if self.quantity.is_some_and(|q| q < 0) {
            errors.push("Quantity cannot be negative".to_owned());
        }
        if self.quantity.is_none() && self.location.is_none() {
            errors.push("Nothing to update".to_owned());
        }
        if errors.is_empty() { Ok(()) } else { Err(ServiceError::Invalid(errors)) }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub created: usize,
    pub updated: usize,
}

/// List every stock line, grouped by product.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_items(pool: &PgPool) -> Result<Vec<InventoryItem>, ServiceError> {
    let rows = sqlx::query_as::<_, ItemRow>(&format!(
        "SELECT {ITEM_COLUMNS} FROM inventory_items ORDER BY lower(product_name), lower(size), lower(color)"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(row_to_item).collect())
}

/// Apply a partial edit and stamp `last_updated`.
///
/// # Errors
///
/// Returns [`ServiceError::Invalid`] for a negative quantity or an empty edit,
/// [`ServiceError::NotFound`] for an unknown id, or a database error.
pub async fn update_item(pool: &PgPool, item_id: Uuid, update: InventoryUpdate) -> Result<InventoryItem, ServiceError> {
    update.validate()?;

    let row = sqlx::query_as::<_, ItemRow>(&format!(
        "UPDATE inventory_items
         SET quantity = COALESCE($2, quantity), location = COALESCE($3, location), last_updated = now()
         WHERE id = $1
         RETURNING {ITEM_COLUMNS}"
    ))
    .bind(item_id)
    .bind(update.quantity)
    .bind(update.location.as_deref().map(str::trim))
    .fetch_optional(pool)
    .await?
    .ok_or(ServiceError::NotFound("inventory item", item_id))?;

    info!(%item_id, quantity = row.5, "inventory item updated");
    Ok(row_to_item(row))
}

/// Upsert parsed spreadsheet rows in a single transaction.
///
/// # Errors
///
/// Returns a database error; no row is written in that case.
pub async fn import_rows(pool: &PgPool, rows: &[ImportRow]) -> Result<ImportOutcome, ServiceError> {
    let mut outcome = ImportOutcome::default();
    let mut tx = pool.begin().await?;

    for row in rows {
        // `xmax = 0` only holds for a freshly inserted tuple.
        let inserted = sqlx::query_scalar::<_, bool>(
            "INSERT INTO inventory_items (id, product_name, size, color, quantity, location, last_updated)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, now()))
             ON CONFLICT (lower(product_name), lower(size), lower(color)) DO UPDATE SET
                 quantity = EXCLUDED.quantity,
                 location = CASE WHEN EXCLUDED.location = '' THEN inventory_items.location ELSE EXCLUDED.location END,
                 last_updated = EXCLUDED.last_updated
             RETURNING (xmax = 0)",
        )
        .bind(Uuid::new_v4())
        .bind(&row.product_name)
        .bind(&row.size)
        .bind(&row.color)
        .bind(row.quantity)
        .bind(&row.location)
        .bind(row.last_updated)
        .fetch_one(&mut *tx)
        .await?;

        if inserted {
            outcome.created += 1;
        } else {
            outcome.updated += 1;
        }
    }

    tx.commit().await?;
    info!(created = outcome.created, updated = outcome.updated, "inventory spreadsheet imported");
    Ok(outcome)
}
