//! Marquee announcement CRUD.

use sqlx::PgPool;
use storefront::marquee::{Announcement, AnnouncementDraft};
use tracing::info;
use uuid::Uuid;

use super::{ServiceError, ensure_valid};

type AnnouncementRow = (Uuid, String, Option<String>, bool, i32);

fn row_to_announcement((id, text, link, is_active, display_order): AnnouncementRow) -> Announcement {
    Announcement { id, text, link, is_active, display_order }
}

/// List all announcements in display order, inactive ones included.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_announcements(pool: &PgPool) -> Result<Vec<Announcement>, ServiceError> {
    let rows = sqlx::query_as::<_, AnnouncementRow>(
        "SELECT id, text, link, is_active, display_order FROM marquee_announcements ORDER BY display_order, id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(row_to_announcement).collect())
}

/// # Errors
///
/// Returns [`ServiceError::Invalid`] if validation fails, or a database error.
pub async fn create_announcement(pool: &PgPool, draft: AnnouncementDraft) -> Result<Announcement, ServiceError> {
    ensure_valid(draft.validate())?;

    let announcement = Announcement::from_draft(Uuid::new_v4(), draft);
    sqlx::query(
        "INSERT INTO marquee_announcements (id, text, link, is_active, display_order) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(announcement.id)
    .bind(&announcement.text)
    .bind(&announcement.link)
    .bind(announcement.is_active)
    .bind(announcement.display_order)
    .execute(pool)
    .await?;

    info!(announcement_id = %announcement.id, "marquee announcement created");
    Ok(announcement)
}

/// # Errors
///
/// Returns [`ServiceError::NotFound`] for an unknown id, [`ServiceError::Invalid`]
/// if validation fails, or a database error.
pub async fn replace_announcement(
    pool: &PgPool,
    announcement_id: Uuid,
    draft: AnnouncementDraft,
) -> Result<Announcement, ServiceError> {
    ensure_valid(draft.validate())?;

    let announcement = Announcement::from_draft(announcement_id, draft);
    let result = sqlx::query(
        "UPDATE marquee_announcements SET text = $2, link = $3, is_active = $4, display_order = $5 WHERE id = $1",
    )
    .bind(announcement.id)
    .bind(&announcement.text)
    .bind(&announcement.link)
    .bind(announcement.is_active)
    .bind(announcement.display_order)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("announcement", announcement_id));
    }
    Ok(announcement)
}

/// # Errors
///
/// Returns [`ServiceError::NotFound`] for an unknown id, or a database error.
pub async fn delete_announcement(pool: &PgPool, announcement_id: Uuid) -> Result<(), ServiceError> {
    let result = sqlx::query("DELETE FROM marquee_announcements WHERE id = $1")
        .bind(announcement_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("announcement", announcement_id));
    }
    info!(%announcement_id, "marquee announcement deleted");
    Ok(())
}
