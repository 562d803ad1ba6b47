//! HTTP error type shared by all route handlers.
//!
//! Errors reach the admin console as a list of user-facing messages under
//! `errors`. Only two classes matter to the client: the request was rejected
//! (validation, auth, not found) or the server failed. Database details are
//! logged, never returned.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::services::ServiceError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("missing or invalid admin token")]
    Unauthorized,
    #[error("admin access is not configured")]
    AdminDisabled,
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    errors: Vec<String>,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::AdminDisabled => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn messages(self) -> Vec<String> {
        match self {
            Self::Validation(errors) => errors,
            Self::Internal(_) => vec!["Something went wrong, please try again".to_owned()],
            other => vec![other.to_string()],
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Invalid(errors) => Self::Validation(errors),
            ServiceError::NotFound(what, _) => Self::NotFound(what),
            ServiceError::Database(e) => {
                tracing::error!(error = %e, "database error");
                Self::Internal(e.to_string())
            }
            ServiceError::Corrupt(detail) => {
                tracing::error!(%detail, "stored document failed to decode");
                Self::Internal(detail)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody { errors: self.messages() })).into_response()
    }
}
