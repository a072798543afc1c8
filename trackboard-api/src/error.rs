/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>`, which converts to a status code
/// and a `{ "error": "..." }` body.
///
/// Upstream failures are flat: a transport error, a non-success
/// status, and a malformed body all become a 500 with the endpoint's fixed
/// message, while the cause only goes to the log.
///
/// # Example
///
/// ```
/// use trackboard_api::error::{ApiError, ApiResult};
/// use axum::Json;
///
/// fn check(id: &str) -> ApiResult<Json<String>> {
///     if id.is_empty() {
///         return Err(ApiError::BadRequest("empty id".to_string()));
///     }
///     Ok(Json(id.to_string()))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use trackboard_shared::jira::JiraError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Upstream call failed or returned something unusable (500)
    Upstream {
        /// Fixed, client-facing message of the endpoint
        message: &'static str,

        /// Underlying cause, logged only
        source: JiraError,
    },
}

impl ApiError {
    /// Wraps an upstream error with the endpoint's fixed message
    pub fn upstream(message: &'static str) -> impl FnOnce(JiraError) -> ApiError {
        move |source| ApiError::Upstream { message, source }
    }
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Upstream { message, source } => write!(f, "{}: {}", message, source),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Upstream { source, .. } => Some(source),
            ApiError::BadRequest(_) => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Upstream { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
