//! Hero banner service: singleton document with bootstrap-on-read.

use sqlx::PgPool;
use storefront::hero::Hero;
use tracing::info;

use super::{ServiceError, ensure_valid};

type HeroRow = (String, String, String, String, String, bool);

fn row_to_hero((title, subtitle, image_url, button_text, button_link, is_active): HeroRow) -> Hero {
    Hero { title, subtitle, image_url, button_text, button_link, is_active }
}

async fn fetch_hero(pool: &PgPool) -> Result<Option<Hero>, sqlx::Error> {
    let row = sqlx::query_as::<_, HeroRow>(
        "SELECT title, subtitle, image_url, button_text, button_link, is_active FROM hero WHERE id = 1",
    )
    .fetch_optional(pool)
    .await?;
    Ok(row.map(row_to_hero))
}

/// Return the hero banner, inserting the default document if none exists.
///
/// # Errors
///
/// Returns a database error if the read or bootstrap insert fails.
pub async fn get_or_create_hero(pool: &PgPool) -> Result<Hero, ServiceError> {
    if let Some(hero) = fetch_hero(pool).await? {
        return Ok(hero);
    }

    let hero = Hero::default();
    let inserted = sqlx::query(
        "INSERT INTO hero (id, title, subtitle, image_url, button_text, button_link, is_active)
         VALUES (1, $1, $2, $3, $4, $5, $6)
         ON CONFLICT (id) DO NOTHING",
    )
    .bind(&hero.title)
    .bind(&hero.subtitle)
    .bind(&hero.image_url)
    .bind(&hero.button_text)
    .bind(&hero.button_link)
    .bind(hero.is_active)
    .execute(pool)
    .await?;
    if inserted.rows_affected() > 0 {
        info!("bootstrapped default hero");
    }

    // Another request may have won the insert race; read back what was stored.
    Ok(fetch_hero(pool).await?.unwrap_or(hero))
}

/// Replace the hero banner as a whole document.
///
/// # Errors
///
/// Returns [`ServiceError::Invalid`] before touching the database if the
/// document fails validation, or a database error if the upsert fails.
pub async fn replace_hero(pool: &PgPool, hero: Hero) -> Result<Hero, ServiceError> {
    ensure_valid(hero.validate())?;

    sqlx::query(
        "INSERT INTO hero (id, title, subtitle, image_url, button_text, button_link, is_active, updated_at)
         VALUES (1, $1, $2, $3, $4, $5, $6, now())
         ON CONFLICT (id) DO UPDATE SET
             title = EXCLUDED.title,
             subtitle = EXCLUDED.subtitle,
             image_url = EXCLUDED.image_url,
             button_text = EXCLUDED.button_text,
             button_link = EXCLUDED.button_link,
             is_active = EXCLUDED.is_active,
             updated_at = now()",
    )
    .bind(hero.title.trim())
    .bind(hero.subtitle.trim())
    .bind(hero.image_url.trim())
    .bind(hero.button_text.trim())
    .bind(hero.button_link.trim())
    .bind(hero.is_active)
    .execute(pool)
    .await?;

    info!(title = %hero.title, is_active = hero.is_active, "hero replaced");
    Ok(fetch_hero(pool).await?.unwrap_or(hero))
}
