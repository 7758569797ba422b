// Error types for the rewards subsystem

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised by rewards operations
///
/// All of these are deterministic caller errors; retrying without changing
/// the request cannot succeed. Insufficient redemption balance is NOT here:
/// that is an expected outcome, modeled as `RedemptionOutcome`.
#[derive(Debug, Error)]
pub enum RewardsError {
    /// Request payload failed validation
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Submitted activity type is not in the program's closed set
    #[error("Unknown activity type: {0}")]
    UnknownActivityType(String),

    /// Moderation decision string is neither approve nor reject
    #[error("Unknown moderation decision: {0}")]
    UnknownDecision(String),

    /// No activity with the given id in the log
    #[error("Activity {0} not found")]
    ActivityNotFound(uuid::Uuid),
}

impl From<validator::ValidationErrors> for RewardsError {
    fn from(err: validator::ValidationErrors) -> Self {
        RewardsError::ValidationError(err.to_string())
    }
}

impl IntoResponse for RewardsError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            RewardsError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            RewardsError::UnknownActivityType(_) => {
                (StatusCode::BAD_REQUEST, "UNKNOWN_ACTIVITY_TYPE")
            }
            RewardsError::UnknownDecision(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_DECISION"),
            RewardsError::ActivityNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        };

        tracing::debug!("rewards request failed: {}", self);

        let body = Json(json!({
            "error": error_code,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
