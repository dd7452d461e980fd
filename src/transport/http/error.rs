//! Mapping of service failures onto HTTP responses.

use crate::domain::FormError;
use crate::storage::StoreError;
use crate::transport::http::types::ErrorBody;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Converts a store failure, using `not_found` as the body of a 404.
    pub fn from_store(err: StoreError, not_found: &str) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound(not_found.to_string()),
            StoreError::ConstraintViolation(msg) => ApiError::Conflict(msg),
            StoreError::InvalidValue(msg) => ApiError::BadRequest(msg),
            StoreError::Database(e) => {
                tracing::error!(error = %e, "store operation failed");
                ApiError::Internal("The cafe database could not be reached.".to_string())
            }
        }
    }

    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "Conflict"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let not_found = err.to_string();
        ApiError::from_store(err, &not_found)
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, label) = self.parts();
        (status, Json(ErrorBody::new(label, self.to_string()))).into_response()
    }
}
