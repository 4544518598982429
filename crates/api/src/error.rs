//! HTTP error translation
//!
//! Core errors map onto the two wire body shapes: `{message}` for generic
//! failures and `{field, message}` for field-attributable ones. Clients
//! branch on the presence of `field`, so the distinction matters.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use rhythmpulse_core::Error as CoreError;

pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            CoreError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            // Validation collects every bad field; the wire body carries
            // the first one.
            CoreError::Validation(_) | CoreError::Conflict(_) | CoreError::Auth(_) => {
                match self.0.field_error() {
                    Some(field_error) => (
                        StatusCode::BAD_REQUEST,
                        Json(json!({
                            "field": field_error.field,
                            "message": field_error.message,
                        })),
                    )
                        .into_response(),
                    None => (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "message": "Invalid request" })),
                    )
                        .into_response(),
                }
            }
            other => {
                error!(error = %other, "Unhandled error in request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
