// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::DatabaseError;

/// API error with the status codes and client-safe messages used by every
/// handler. Anything outside these four categories is a programming error.
#[derive(Debug)]
pub enum ApiError {
    // 401 Unauthorized - uniform regardless of which credential check failed
    Unauthenticated,

    // 400 Bad Request - malformed input, unresolvable reference, ownership mismatch
    InvalidArgument(String),

    // 404 Not Found - absent resource or page beyond the last page
    NotFound(String),

    // 500 Internal Server Error - generic; detail stays in the server log
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Unauthenticated => "authentication required",
            ApiError::InvalidArgument(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Internal => "internal error",
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated => "UNAUTHENTICATED",
            ApiError::InvalidArgument(_) => "INVALID_ARGUMENT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Internal => "INTERNAL",
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "code": self.error_code(),
            "message": self.message(),
        })
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ApiError::InvalidArgument(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    /// Log the real failure server-side and hand the caller a generic error.
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        tracing::error!(error = %err, "server internal error");
        ApiError::Internal
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound => ApiError::not_found("record not found"),
            DatabaseError::InvalidDistance => ApiError::invalid_argument("invalid distance"),
            DatabaseError::Sqlx(e) => ApiError::internal(e),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(ApiError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::invalid_argument("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_error_body_is_generic() {
        let body = ApiError::Internal.to_json();
        assert_eq!(body["code"], "INTERNAL");
        assert_eq!(body["message"], "internal error");
    }

    #[test]
    fn database_not_found_maps_to_not_found() {
        let err: ApiError = DatabaseError::NotFound.into();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn database_invalid_distance_maps_to_invalid_argument() {
        let err: ApiError = DatabaseError::InvalidDistance.into();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
        assert_eq!(err.message(), "invalid distance");
    }
}
