use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

/// Error type returned by the booking endpoints
///
/// Store failures are reported to the caller with a generic message; the
/// cause is logged when the response is built.
#[derive(Debug)]
pub enum ApiError {
    /// `studio`, `date` or `time` missing from a check request
    MissingFields,
    /// Booking body parsed but is not a JSON object
    InvalidBooking,
    /// Request body could not be extracted as JSON
    InvalidBody(JsonRejection),
    /// Database operation error
    Store(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingFields => (
                StatusCode::BAD_REQUEST,
                "Missing required fields".to_string(),
            ),
            ApiError::InvalidBooking => (
                StatusCode::BAD_REQUEST,
                "Booking must be a JSON object".to_string(),
            ),
            ApiError::InvalidBody(rejection) => (rejection.status(), rejection.body_text()),
            ApiError::Store(err) => {
                tracing::error!("Store error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Store(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection)
    }
}
