//! Product catalogue: products, their image galleries, and reviews.
//!
//! DESIGN
//! ======
//! Products are validated with the same form rules the admin console shows
//! inline. Colors are stored canonicalized (`#RRGGBB`) inside JSONB; sizes
//! keep their optional stock count. Reordering a gallery locks the product
//! row so two admins moving images cannot interleave.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use sqlx::types::Json;
use storefront::gallery::Gallery;
use storefront::validate::{self, HexColor, ProductInput, ReviewInput};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::{ServiceError, ensure_valid};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductColor {
    pub name: String,
    pub hex_code: HexColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSize {
    pub size: String,
    pub stock: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub images: Vec<String>,
    pub colors: Vec<ProductColor>,
    pub sizes: Vec<ProductSize>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub product_id: Uuid,
    pub rating: i16,
    pub comment: String,
    pub photos: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Gallery edit: move the image at `from` to position `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMove {
    pub from: usize,
    pub to: usize,
}

type ProductRow = (
    Uuid,
    String,
    String,
    f64,
    String,
    Vec<String>,
    Json<Vec<ProductColor>>,
    Json<Vec<ProductSize>>,
    OffsetDateTime,
);

const PRODUCT_COLUMNS: &str = "id, name, description, price, category, images, colors, sizes, created_at";

fn row_to_product(row: ProductRow) -> Product {
    let (id, name, description, price, category, images, Json(colors), Json(sizes), created_at) = row;
    Product { id, name, description, price, category, images, colors, sizes, created_at }
}

/// Build the stored shape from a form that already passed validation.
fn canonical_parts(input: &ProductInput) -> Result<(Vec<String>, Vec<ProductColor>, Vec<ProductSize>), ServiceError> {
    let images = input
        .images
        .iter()
        .map(|url| url.trim().to_owned())
        .filter(|url| !url.is_empty())
        .collect();
    let colors = input
        .colors
        .iter()
        .flatten()
        .map(|c| {
            let hex_code = c
                .hex_code
                .trim()
                .parse::<HexColor>()
                .map_err(|e| ServiceError::Invalid(vec![e.to_string()]))?;
            Ok(ProductColor { name: c.name.trim().to_owned(), hex_code })
        })
        .collect::<Result<Vec<_>, ServiceError>>()?;
    let sizes = input
        .sizes
        .iter()
        .flatten()
        .map(|s| ProductSize { size: s.size.trim().to_owned(), stock: s.stock })
        .collect();
    Ok((images, colors, sizes))
}

// =============================================================================
// PRODUCTS
// =============================================================================

/// List products, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_products(pool: &PgPool) -> Result<Vec<Product>, ServiceError> {
    let rows = sqlx::query_as::<_, ProductRow>(&format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"))
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(row_to_product).collect())
}

/// # Errors
///
/// Returns [`ServiceError::NotFound`] for an unknown id, or a database error.
pub async fn get_product(pool: &PgPool, product_id: Uuid) -> Result<Product, ServiceError> {
    sqlx::query_as::<_, ProductRow>(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"))
        .bind(product_id)
        .fetch_optional(pool)
        .await?
        .map(row_to_product)
        .ok_or(ServiceError::NotFound("product", product_id))
}

/// Create a product from the admin form.
///
/// # Errors
///
/// Returns [`ServiceError::Invalid`] with every form error, or a database error.
pub async fn create_product(pool: &PgPool, input: ProductInput) -> Result<Product, ServiceError> {
    ensure_valid(validate::validate_product(&input))?;
    let (images, colors, sizes) = canonical_parts(&input)?;
    let price = input.price.unwrap_or_default();

    let row = sqlx::query_as::<_, ProductRow>(&format!(
        "INSERT INTO products (id, name, description, price, category, images, colors, sizes)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(input.name.trim())
    .bind(input.description.trim())
    .bind(price)
    .bind(input.category.trim())
    .bind(&images)
    .bind(Json(&colors))
    .bind(Json(&sizes))
    .fetch_one(pool)
    .await?;

    let product = row_to_product(row);
    info!(product_id = %product.id, name = %product.name, images = product.images.len(), "product created");
    Ok(product)
}

/// # Errors
///
/// Returns [`ServiceError::NotFound`] for an unknown id, or a database error.
pub async fn delete_product(pool: &PgPool, product_id: Uuid) -> Result<(), ServiceError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(product_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("product", product_id));
    }
    info!(%product_id, "product deleted");
    Ok(())
}

/// Move one gallery image and return the new image order.
///
/// # Errors
///
/// Returns [`ServiceError::NotFound`] for an unknown product,
/// [`ServiceError::Invalid`] if either index is out of range, or a database error.
pub async fn move_image(pool: &PgPool, product_id: Uuid, edit: ImageMove) -> Result<Vec<String>, ServiceError> {
    let mut tx = pool.begin().await?;

    let images = sqlx::query_scalar::<_, Vec<String>>("SELECT images FROM products WHERE id = $1 FOR UPDATE")
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::NotFound("product", product_id))?;

    let mut gallery = Gallery::new(images);
    if !gallery.move_image(edit.from, edit.to) {
        return Err(ServiceError::Invalid(vec![format!(
            "Image position out of range (gallery has {} images)",
            gallery.len()
        )]));
    }
    let images = gallery.into_images();

    sqlx::query("UPDATE products SET images = $2 WHERE id = $1")
        .bind(product_id)
        .bind(&images)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    info!(%product_id, from = edit.from, to = edit.to, "product image moved");
    Ok(images)
}

// =============================================================================
// REVIEWS
// =============================================================================

type ReviewRow = (Uuid, Uuid, i16, String, Vec<String>, OffsetDateTime);

fn row_to_review((id, product_id, rating, comment, photos, created_at): ReviewRow) -> Review {
    Review { id, product_id, rating, comment, photos, created_at }
}

/// List a product's reviews, newest first.
///
/// # Errors
///
/// Returns [`ServiceError::NotFound`] for an unknown product, or a database error.
pub async fn list_reviews(pool: &PgPool, product_id: Uuid) -> Result<Vec<Review>, ServiceError> {
    get_product(pool, product_id).await?;
    let rows = sqlx::query_as::<_, ReviewRow>(
        "SELECT id, product_id, rating, comment, photos, created_at
         FROM reviews WHERE product_id = $1 ORDER BY created_at DESC",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(row_to_review).collect())
}

/// Submit a review.
///
/// # Errors
///
/// Returns [`ServiceError::Invalid`] with every form error,
/// [`ServiceError::NotFound`] for an unknown product, or a database error.
#[allow(clippy::cast_possible_truncation)]
pub async fn create_review(pool: &PgPool, product_id: Uuid, input: ReviewInput) -> Result<Review, ServiceError> {
    ensure_valid(validate::validate_review(&input))?;
    get_product(pool, product_id).await?;

    // Validation guarantees a whole number in 1..=5.
    let rating = input.rating.unwrap_or_default() as i16;
    let comment = input.comment.as_deref().unwrap_or_default().trim().to_owned();
    let photos: Vec<String> = input
        .photos
        .unwrap_or_default()
        .into_iter()
        .map(|p| p.trim().to_owned())
        .filter(|p| !p.is_empty())
        .collect();

    let row = sqlx::query_as::<_, ReviewRow>(
        "INSERT INTO reviews (id, product_id, rating, comment, photos) VALUES ($1, $2, $3, $4, $5)
         RETURNING id, product_id, rating, comment, photos, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(product_id)
    .bind(rating)
    .bind(&comment)
    .bind(&photos)
    .fetch_one(pool)
    .await?;

    info!(%product_id, rating, "review submitted");
    Ok(row_to_review(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront::validate::{ColorInput, SizeInput};

    #[test]
    fn canonical_parts_trims_and_uppercases() {
        let input = ProductInput {
            images: vec![" a.jpg ".into(), String::new(), "b.jpg".into()],
            colors: Some(vec![ColorInput { name: " Navy ".into(), hex_code: "#1a2b3c".into() }]),
            sizes: Some(vec![SizeInput { size: " M ".into(), stock: Some(4) }]),
            ..ProductInput::default()
        };
        let (images, colors, sizes) = canonical_parts(&input).unwrap();
        assert_eq!(images, vec!["a.jpg", "b.jpg"]);
        assert_eq!(colors[0].name, "Navy");
        assert_eq!(colors[0].hex_code.as_str(), "#1A2B3C");
        assert_eq!(sizes, vec![ProductSize { size: "M".into(), stock: Some(4) }]);
    }

    #[test]
    fn product_colors_serialize_as_plain_strings() {
        let color = ProductColor { name: "Red".into(), hex_code: "#ff0000".parse().unwrap() };
        let value = serde_json::to_value(&color).unwrap();
        assert_eq!(value, serde_json::json!({"name": "Red", "hex_code": "#FF0000"}));
    }
}
