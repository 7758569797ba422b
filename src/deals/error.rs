// Error types for the expiry-deals subsystem

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors raised by deal operations
///
/// Validation and not-found errors are deterministic: they are reported to
/// the caller and never retried internally. Storage faults map to a generic
/// 500 with the detail kept in the server log.
#[derive(Debug, Error)]
pub enum DealError {
    /// Request payload failed validation
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// No deal stored under the given barcode
    #[error("Deal with barcode {0} not found")]
    NotFound(String),

    /// Flat-file store failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<validator::ValidationErrors> for DealError {
    fn from(err: validator::ValidationErrors) -> Self {
        DealError::ValidationError(err.to_string())
    }
}

impl IntoResponse for DealError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            DealError::ValidationError(msg) => {
                tracing::debug!("deal validation error: {}", msg);
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            DealError::NotFound(barcode) => {
                tracing::debug!("deal not found: {}", barcode);
                (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string())
            }
            DealError::Storage(err) => {
                tracing::error!("deal storage error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "An internal storage error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_code,
            "message": message,
        }));

        (status, body).into_response()
    }
}
