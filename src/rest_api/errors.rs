//! # REST API Errors
//!
//! Error types for the REST API module.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::error::{QueryError, QueryErrorKind};

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    /// Malformed query parameter
    #[error("{0}")]
    BadRequest(String),

    /// Error raised by the query pipeline
    #[error("{}", .0.message())]
    Query(#[from] QueryError),

    /// Failure outside the pipeline (task join, serialization)
    #[error("Internal error")]
    Internal(String),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RestError::Query(e) => match e.kind() {
                QueryErrorKind::BadRequest => StatusCode::BAD_REQUEST,
                QueryErrorKind::Validation
                | QueryErrorKind::InvalidLimit
                | QueryErrorKind::InvalidOffset
                | QueryErrorKind::InvalidRange => StatusCode::UNPROCESSABLE_ENTITY,
                QueryErrorKind::NotFound => StatusCode::NOT_FOUND,
                QueryErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
            },
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code
    pub fn kind_code(&self) -> &'static str {
        match self {
            RestError::BadRequest(_) => QueryErrorKind::BadRequest.code(),
            RestError::Query(e) => e.kind().code(),
            RestError::Internal(_) => QueryErrorKind::Unexpected.code(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl From<RestError> for ErrorResponse {
    fn from(err: RestError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            kind: err.kind_code(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        if let RestError::Internal(detail) = &self {
            tracing::error!(%detail, "internal error");
        }
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RestError::BadRequest("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RestError::from(QueryError::unknown_column("color")).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            RestError::from(QueryError::invalid_range()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            RestError::from(QueryError::not_found()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RestError::from(QueryError::unexpected()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body() {
        let body = ErrorResponse::from(RestError::from(QueryError::unknown_column("color")));
        assert_eq!(body.error, "Invalid column: color");
        assert_eq!(body.code, 422);
        assert_eq!(body.kind, "FIPE_VALIDATION");
    }

    #[test]
    fn test_internal_detail_hidden() {
        let body = ErrorResponse::from(RestError::Internal("join error: panicked".into()));
        assert_eq!(body.error, "Internal error");
        assert_eq!(body.kind, "FIPE_UNEXPECTED");
    }
}
