//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use rulehub_domain::error::RuleHubError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps application failures to HTTP responses with appropriate status codes.
#[derive(Debug)]
pub enum ApiError {
    /// A domain or application error.
    Domain(RuleHubError),
    /// The request itself was malformed (bad id, bad header value, …).
    BadRequest(String),
    /// The caller identity headers are missing.
    Unauthorized(&'static str),
}

impl From<RuleHubError> for ApiError {
    fn from(err: RuleHubError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Domain(RuleHubError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(RuleHubError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Domain(RuleHubError::AccessDenied(err)) => {
                (StatusCode::FORBIDDEN, err.to_string())
            }
            Self::Domain(RuleHubError::Storage(err)) => {
                tracing::error!(error = %err, "adapter error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message.to_string()),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
