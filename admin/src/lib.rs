//! Admin console client for the storefront API.
//!
//! ARCHITECTURE
//! ============
//! [`client::ApiClient`] is a typed wrapper over the REST surface. Screens
//! that keep local state between requests live beside it:
//! [`footer_view::FooterLinksView`] applies link reorders optimistically and
//! rolls back by re-fetching when the server refuses. [`rates`] turns CLI
//! condition arguments into a checked [`storefront::rate::ConditionSet`].

pub mod client;
pub mod footer_view;
pub mod rates;

use storefront::rate::ConditionError;

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("missing admin token; pass --admin-token or set STOREFRONT_ADMIN_TOKEN")]
    MissingToken,
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("server returned {status}: {}", .errors.join("; "))]
    Api { status: u16, errors: Vec<String> },
    #[error("a reorder is already in flight")]
    ReorderInFlight,
    #[error("{}", .0.join("; "))]
    Invalid(Vec<String>),
    #[error(transparent)]
    Condition(#[from] ConditionError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
