//! Footer service: settings document plus ordered links.
//!
//! DESIGN
//! ======
//! Settings are a singleton JSONB document bootstrapped on first read. Links
//! are rows ordered by `(section, sort_order)`. A reorder rewrites every named
//! link inside one transaction so a failure leaves the stored order untouched
//! and the admin client can roll back by re-fetching.

use sqlx::PgPool;
use sqlx::types::Json;
use storefront::footer::{self, FooterLink, FooterLinkDraft, FooterSection, FooterSettings, ReorderItem};
use tracing::{info, warn};
use uuid::Uuid;

use super::{ServiceError, ensure_valid};

// =============================================================================
// SETTINGS
// =============================================================================

async fn fetch_settings(pool: &PgPool) -> Result<Option<FooterSettings>, sqlx::Error> {
    let row = sqlx::query_scalar::<_, Json<FooterSettings>>("SELECT settings FROM footer_settings WHERE id = 1")
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|Json(settings)| settings))
}

/// Return footer settings, inserting the default document if none exists.
///
/// # Errors
///
/// Returns a database error if the read or bootstrap insert fails.
pub async fn get_or_create_settings(pool: &PgPool) -> Result<FooterSettings, ServiceError> {
    if let Some(settings) = fetch_settings(pool).await? {
        return Ok(settings);
    }

    let settings = FooterSettings::default();
    let inserted = sqlx::query("INSERT INTO footer_settings (id, settings) VALUES (1, $1) ON CONFLICT (id) DO NOTHING")
        .bind(Json(&settings))
        .execute(pool)
        .await?;
    if inserted.rows_affected() > 0 {
        info!("bootstrapped default footer settings");
    }
    Ok(fetch_settings(pool).await?.unwrap_or(settings))
}

/// Replace footer settings as a whole document.
///
/// # Errors
///
/// Returns [`ServiceError::Invalid`] if validation fails, or a database error.
pub async fn replace_settings(pool: &PgPool, settings: FooterSettings) -> Result<FooterSettings, ServiceError> {
    ensure_valid(settings.validate())?;

    sqlx::query(
        "INSERT INTO footer_settings (id, settings, updated_at) VALUES (1, $1, now())
         ON CONFLICT (id) DO UPDATE SET settings = EXCLUDED.settings, updated_at = now()",
    )
    .bind(Json(&settings))
    .execute(pool)
    .await?;

    info!("footer settings replaced");
    Ok(settings)
}

// =============================================================================
// LINKS
// =============================================================================

type LinkRow = (Uuid, String, String, String, i32, bool);

fn row_to_link((id, title, url, section, order, is_active): LinkRow) -> Result<FooterLink, ServiceError> {
    let section = section.parse::<FooterSection>().map_err(ServiceError::Corrupt)?;
    Ok(FooterLink { id, title, url, section, order, is_active })
}

/// List all links in display order.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_links(pool: &PgPool) -> Result<Vec<FooterLink>, ServiceError> {
    let rows = sqlx::query_as::<_, LinkRow>("SELECT id, title, url, section, sort_order, is_active FROM footer_links")
        .fetch_all(pool)
        .await?;

    let mut links = rows.into_iter().map(row_to_link).collect::<Result<Vec<_>, _>>()?;
    footer::sort_links(&mut links);
    Ok(links)
}

/// Create a link. Without an explicit order it goes to the end of its section.
///
/// # Errors
///
/// Returns [`ServiceError::Invalid`] if validation fails, or a database error.
pub async fn create_link(pool: &PgPool, draft: FooterLinkDraft) -> Result<FooterLink, ServiceError> {
    ensure_valid(draft.validate())?;

    let next_order = sqlx::query_scalar::<_, Option<i32>>("SELECT MAX(sort_order) FROM footer_links WHERE section = $1")
        .bind(draft.section.as_str())
        .fetch_one(pool)
        .await?
        .map_or(0, |max| max + 1);

    let link = FooterLink::from_draft(Uuid::new_v4(), draft, next_order);
    sqlx::query(
        "INSERT INTO footer_links (id, title, url, section, sort_order, is_active) VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(link.id)
    .bind(&link.title)
    .bind(&link.url)
    .bind(link.section.as_str())
    .bind(link.order)
    .bind(link.is_active)
    .execute(pool)
    .await?;

    info!(link_id = %link.id, section = link.section.as_str(), "footer link created");
    Ok(link)
}

/// Replace a link. Omitting `order` keeps the stored position.
///
/// # Errors
///
/// Returns [`ServiceError::NotFound`] for an unknown id, [`ServiceError::Invalid`]
/// if validation fails, or a database error.
pub async fn replace_link(pool: &PgPool, link_id: Uuid, draft: FooterLinkDraft) -> Result<FooterLink, ServiceError> {
    ensure_valid(draft.validate())?;

    let row = sqlx::query_as::<_, LinkRow>(
        "UPDATE footer_links
         SET title = $2, url = $3, section = $4, sort_order = COALESCE($5, sort_order), is_active = $6
         WHERE id = $1
         RETURNING id, title, url, section, sort_order, is_active",
    )
    .bind(link_id)
    .bind(draft.title.trim())
    .bind(draft.url.trim())
    .bind(draft.section.as_str())
    .bind(draft.order)
    .bind(draft.is_active)
    .fetch_optional(pool)
    .await?
    .ok_or(ServiceError::NotFound("footer link", link_id))?;

    row_to_link(row)
}

/// Delete a link.
///
/// # Errors
///
/// Returns [`ServiceError::NotFound`] for an unknown id, or a database error.
pub async fn delete_link(pool: &PgPool, link_id: Uuid) -> Result<(), ServiceError> {
    let result = sqlx::query("DELETE FROM footer_links WHERE id = $1")
        .bind(link_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("footer link", link_id));
    }
    info!(%link_id, "footer link deleted");
    Ok(())
}

/// Apply a reorder atomically and return the resulting list.
///
/// # Errors
///
/// Returns [`ServiceError::Invalid`] for an empty or inconsistent list,
/// [`ServiceError::NotFound`] if any id is unknown (nothing is changed), or a
/// database error.
pub async fn reorder_links(pool: &PgPool, items: &[ReorderItem]) -> Result<Vec<FooterLink>, ServiceError> {
    ensure_valid(footer::validate_reorder(items))?;

    let mut tx = pool.begin().await?;
    for item in items {
        let result = sqlx::query("UPDATE footer_links SET sort_order = $2, section = $3 WHERE id = $1")
            .bind(item.id)
            .bind(item.order)
            .bind(item.section.as_str())
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            warn!(link_id = %item.id, "reorder named unknown footer link; rolling back");
            tx.rollback().await?;
            return Err(ServiceError::NotFound("footer link", item.id));
        }
    }
    tx.commit().await?;

    info!(count = items.len(), "footer links reordered");
    list_links(pool).await
}

#[cfg(test)]
#[path = "footer_test.rs"]
mod tests;
