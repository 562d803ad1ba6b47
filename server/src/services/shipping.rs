//! Shipping zones, their rates, and checkout quoting.
//!
//! DESIGN
//! ======
//! Drafts are normalized and validated before any query runs, so a rejected
//! rate never reaches the table. Conditions are stored as a JSONB array in the
//! same `{type, value}` shape the admin console submits. Quoting loads active
//! zones and their rates and defers the decision to [`storefront::rate`].

use sqlx::PgPool;
use sqlx::types::Json;
use storefront::rate::{self, ConditionSet, EstimatedDays, RateDraft, RateQuote, RateType, ShippingRate, ShippingZone, ZoneDraft};
use tracing::info;
use uuid::Uuid;

use super::{ServiceError, ensure_valid};

// =============================================================================
// ZONES
// =============================================================================

type ZoneRow = (Uuid, String, Vec<String>, Vec<String>, bool, i32);

const ZONE_COLUMNS: &str = "id, name, countries, regions, is_active, display_order";

fn row_to_zone((id, name, countries, regions, is_active, display_order): ZoneRow) -> ShippingZone {
    ShippingZone { id, name, countries, regions, is_active, display_order }
}

/// List zones in display order.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_zones(pool: &PgPool) -> Result<Vec<ShippingZone>, ServiceError> {
    let rows = sqlx::query_as::<_, ZoneRow>(&format!(
        "SELECT {ZONE_COLUMNS} FROM shipping_zones ORDER BY display_order, name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(row_to_zone).collect())
}

/// Load one zone.
///
/// # Errors
///
/// Returns [`ServiceError::NotFound`] for an unknown id, or a database error.
pub async fn get_zone(pool: &PgPool, zone_id: Uuid) -> Result<ShippingZone, ServiceError> {
    sqlx::query_as::<_, ZoneRow>(&format!("SELECT {ZONE_COLUMNS} FROM shipping_zones WHERE id = $1"))
        .bind(zone_id)
        .fetch_optional(pool)
        .await?
        .map(row_to_zone)
        .ok_or(ServiceError::NotFound("shipping zone", zone_id))
}

/// Create a zone.
///
/// # Errors
///
/// Returns [`ServiceError::Invalid`] if validation fails, or a database error.
pub async fn create_zone(pool: &PgPool, mut draft: ZoneDraft) -> Result<ShippingZone, ServiceError> {
    draft.normalize();
    ensure_valid(draft.validate())?;

    let zone = ShippingZone::from_draft(Uuid::new_v4(), draft);
    sqlx::query(
        "INSERT INTO shipping_zones (id, name, countries, regions, is_active, display_order)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(zone.id)
    .bind(&zone.name)
    .bind(&zone.countries)
    .bind(&zone.regions)
    .bind(zone.is_active)
    .bind(zone.display_order)
    .execute(pool)
    .await?;

    info!(zone_id = %zone.id, name = %zone.name, countries = zone.countries.len(), "shipping zone created");
    Ok(zone)
}

/// Replace a zone.
///
/// # Errors
///
/// Returns [`ServiceError::NotFound`] for an unknown id, [`ServiceError::Invalid`]
/// if validation fails, or a database error.
pub async fn replace_zone(pool: &PgPool, zone_id: Uuid, mut draft: ZoneDraft) -> Result<ShippingZone, ServiceError> {
    draft.normalize();
    ensure_valid(draft.validate())?;

    let zone = ShippingZone::from_draft(zone_id, draft);
    let result = sqlx::query(
        "UPDATE shipping_zones
         SET name = $2, countries = $3, regions = $4, is_active = $5, display_order = $6
         WHERE id = $1",
    )
    .bind(zone.id)
    .bind(&zone.name)
    .bind(&zone.countries)
    .bind(&zone.regions)
    .bind(zone.is_active)
    .bind(zone.display_order)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("shipping zone", zone_id));
    }
    Ok(zone)
}

/// Delete a zone. Its rates go with it.
///
/// # Errors
///
/// Returns [`ServiceError::NotFound`] for an unknown id, or a database error.
pub async fn delete_zone(pool: &PgPool, zone_id: Uuid) -> Result<(), ServiceError> {
    let result = sqlx::query("DELETE FROM shipping_zones WHERE id = $1")
        .bind(zone_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("shipping zone", zone_id));
    }
    info!(%zone_id, "shipping zone deleted");
    Ok(())
}

// =============================================================================
// RATES
// =============================================================================

type RateRow = (Uuid, Uuid, String, String, f64, Json<ConditionSet>, f64, Option<f64>, bool, i32, i32);

const RATE_COLUMNS: &str = "id, zone_id, name, rate_type, base_rate, conditions, additional_fee, \
                            free_shipping_threshold, is_active, estimated_min_days, estimated_max_days";

fn row_to_rate(row: RateRow) -> Result<ShippingRate, ServiceError> {
    let (id, zone_id, name, rate_type, base_rate, Json(conditions), additional_fee, free_shipping_threshold, is_active, min, max) =
        row;
    let rate_type = rate_type.parse::<RateType>().map_err(ServiceError::Corrupt)?;
    Ok(ShippingRate {
        id,
        zone_id,
        name,
        rate_type,
        base_rate,
        conditions,
        additional_fee,
        free_shipping_threshold,
        is_active,
        estimated_days: EstimatedDays { min, max },
    })
}

/// List the rates of one zone.
///
/// # Errors
///
/// Returns [`ServiceError::NotFound`] if the zone does not exist, or a database error.
pub async fn list_rates(pool: &PgPool, zone_id: Uuid) -> Result<Vec<ShippingRate>, ServiceError> {
    get_zone(pool, zone_id).await?;

    let rows = sqlx::query_as::<_, RateRow>(&format!(
        "SELECT {RATE_COLUMNS} FROM shipping_rates WHERE zone_id = $1 ORDER BY base_rate, name"
    ))
    .bind(zone_id)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(row_to_rate).collect()
}

/// Create a rate in a zone.
///
/// # Errors
///
/// Returns [`ServiceError::Invalid`] if validation fails, [`ServiceError::NotFound`]
/// if the zone does not exist, or a database error.
pub async fn create_rate(pool: &PgPool, zone_id: Uuid, mut draft: RateDraft) -> Result<ShippingRate, ServiceError> {
    draft.normalize();
    ensure_valid(draft.validate())?;
    get_zone(pool, zone_id).await?;

    let rate = ShippingRate::from_draft(Uuid::new_v4(), zone_id, draft);
    sqlx::query(
        "INSERT INTO shipping_rates (id, zone_id, name, rate_type, base_rate, conditions, additional_fee,
                                     free_shipping_threshold, is_active, estimated_min_days, estimated_max_days)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
    )
    .bind(rate.id)
    .bind(rate.zone_id)
    .bind(&rate.name)
    .bind(rate.rate_type.as_str())
    .bind(rate.base_rate)
    .bind(Json(&rate.conditions))
    .bind(rate.additional_fee)
    .bind(rate.free_shipping_threshold)
    .bind(rate.is_active)
    .bind(rate.estimated_days.min)
    .bind(rate.estimated_days.max)
    .execute(pool)
    .await?;

    info!(
        rate_id = %rate.id,
        %zone_id,
        rate_type = rate.rate_type.as_str(),
        conditions = rate.conditions.len(),
        "shipping rate created"
    );
    Ok(rate)
}

/// Replace a rate. The rate stays in its zone.
///
/// # Errors
///
/// Returns [`ServiceError::NotFound`] for an unknown id, [`ServiceError::Invalid`]
/// if validation fails, or a database error.
pub async fn replace_rate(pool: &PgPool, rate_id: Uuid, mut draft: RateDraft) -> Result<ShippingRate, ServiceError> {
    draft.normalize();
    ensure_valid(draft.validate())?;

    let row = sqlx::query_as::<_, RateRow>(&format!(
        "UPDATE shipping_rates
         SET name = $2, rate_type = $3, base_rate = $4, conditions = $5, additional_fee = $6,
             free_shipping_threshold = $7, is_active = $8, estimated_min_days = $9, estimated_max_days = $10
         WHERE id = $1
         RETURNING {RATE_COLUMNS}"
    ))
    .bind(rate_id)
    .bind(&draft.name)
    .bind(draft.rate_type.as_str())
    .bind(draft.base_rate)
    .bind(Json(&draft.conditions))
    .bind(draft.additional_fee)
    .bind(draft.free_shipping_threshold)
    .bind(draft.is_active)
    .bind(draft.estimated_days.min)
    .bind(draft.estimated_days.max)
    .fetch_optional(pool)
    .await?
    .ok_or(ServiceError::NotFound("shipping rate", rate_id))?;

    row_to_rate(row)
}

/// Delete a rate.
///
/// # Errors
///
/// Returns [`ServiceError::NotFound`] for an unknown id, or a database error.
pub async fn delete_rate(pool: &PgPool, rate_id: Uuid) -> Result<(), ServiceError> {
    let result = sqlx::query("DELETE FROM shipping_rates WHERE id = $1")
        .bind(rate_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("shipping rate", rate_id));
    }
    info!(%rate_id, "shipping rate deleted");
    Ok(())
}

// =============================================================================
// QUOTING
// =============================================================================

/// Quote every applicable rate for a parcel, cheapest first.
///
/// # Errors
///
/// Returns a database error, or [`ServiceError::Corrupt`] if a stored rate
/// cannot be decoded.
pub async fn quote(pool: &PgPool, country: &str, weight: f64, subtotal: f64) -> Result<Vec<RateQuote>, ServiceError> {
    let zones = sqlx::query_as::<_, ZoneRow>(&format!(
        "SELECT {ZONE_COLUMNS} FROM shipping_zones WHERE is_active AND $1 = ANY(countries)"
    ))
    .bind(country.trim().to_ascii_uppercase())
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(row_to_zone)
    .collect::<Vec<_>>();
    if zones.is_empty() {
        return Ok(Vec::new());
    }

    let zone_ids: Vec<Uuid> = zones.iter().map(|z| z.id).collect();
    let rates = sqlx::query_as::<_, RateRow>(&format!(
        "SELECT {RATE_COLUMNS} FROM shipping_rates WHERE is_active AND zone_id = ANY($1)"
    ))
    .bind(&zone_ids)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(row_to_rate)
    .collect::<Result<Vec<_>, _>>()?;

    Ok(rate::quote_rates(&zones, &rates, country, weight, subtotal))
}

#[cfg(test)]
#[path = "shipping_test.rs"]
mod tests;
