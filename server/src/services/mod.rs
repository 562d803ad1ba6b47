//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation and persistence so route handlers can stay
//! focused on request/response translation and admin auth. Every mutation
//! validates its whole document before the first query runs.

pub mod footer;
pub mod hero;
pub mod inventory;
pub mod marquee;
pub mod products;
pub mod shipping;

use storefront::ValidationResult;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0} not found: {1}")]
    NotFound(&'static str, Uuid),
    #[error("validation failed: {}", .0.join("; "))]
    Invalid(Vec<String>),
    #[error("stored data is corrupt: {0}")]
    Corrupt(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Turn a failed [`ValidationResult`] into [`ServiceError::Invalid`].
pub(crate) fn ensure_valid(result: ValidationResult) -> Result<(), ServiceError> {
    result.into_result().map_err(ServiceError::Invalid)
}
