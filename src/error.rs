//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::{FilterError, RecordError};
use crate::store::StoreError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid record at index {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: RecordError,
    },

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    // Server errors (5xx)
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<FilterError> for AppError {
    fn from(err: FilterError) -> Self {
        AppError::InvalidRequest(err.to_string())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    /// HTTP status and machine-readable code
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            AppError::InvalidRecord { .. } => (StatusCode::BAD_REQUEST, "invalid_record"),
            AppError::ProductNotFound(_) => (StatusCode::NOT_FOUND, "product_not_found"),
            AppError::Store(StoreError::InvalidRecord(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_stored_record")
            }
            AppError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        let details = match &self {
            AppError::InvalidRequest(msg) => Some(msg.clone()),
            AppError::InvalidRecord { index, source } => Some(match source.record_id() {
                Some(id) => format!("records[{index}] ({id})"),
                None => format!("records[{index}]"),
            }),
            AppError::ProductNotFound(id) => Some(id.clone()),
            AppError::Store(StoreError::InvalidRecord(e)) => Some(e.to_string()),
            AppError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                None
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
