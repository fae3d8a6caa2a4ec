use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use ridepool_core::Error;

/// Boundary translator from the domain error taxonomy to client-visible
/// responses. Anything without an explicit mapping becomes a 500 with a
/// generic message; the underlying cause is logged, never leaked.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::Unauthorized(reason) => {
                tracing::debug!(%reason, "rejected unauthorized request");
                (StatusCode::UNAUTHORIZED, "unauthorized".to_string())
            }
            Error::NotFound(_) => (StatusCode::NOT_FOUND, "reservation does not exist".to_string()),
            Error::Validation { message, .. } => (StatusCode::BAD_REQUEST, message.clone()),
            err => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong while processing your request. Please contact your system administrator.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
