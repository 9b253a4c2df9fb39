//! Query pipeline error types
//!
//! Every stage of the pipeline returns errors as values carrying a kind and
//! a human-readable message. Callers switch on the kind; the message is for
//! people.
//!
//! Error codes:
//! - FIPE_BAD_REQUEST
//! - FIPE_VALIDATION
//! - FIPE_INVALID_LIMIT
//! - FIPE_INVALID_OFFSET
//! - FIPE_INVALID_RANGE
//! - FIPE_NOT_FOUND
//! - FIPE_UNEXPECTED

use std::fmt;

/// Error kinds produced by the query pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryErrorKind {
    /// Malformed or empty required input
    BadRequest,
    /// A value fails its column rule, or a column is outside the allowed set
    Validation,
    /// Limit outside `1..=MAX_LIMIT`
    InvalidLimit,
    /// Negative offset
    InvalidOffset,
    /// Offset larger than limit
    InvalidRange,
    /// Query ran but matched zero rows
    NotFound,
    /// Unclassified storage failure
    Unexpected,
}

impl QueryErrorKind {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            QueryErrorKind::BadRequest => "FIPE_BAD_REQUEST",
            QueryErrorKind::Validation => "FIPE_VALIDATION",
            QueryErrorKind::InvalidLimit => "FIPE_INVALID_LIMIT",
            QueryErrorKind::InvalidOffset => "FIPE_INVALID_OFFSET",
            QueryErrorKind::InvalidRange => "FIPE_INVALID_RANGE",
            QueryErrorKind::NotFound => "FIPE_NOT_FOUND",
            QueryErrorKind::Unexpected => "FIPE_UNEXPECTED",
        }
    }

    /// Returns true if the caller's input caused the error
    pub fn is_client_error(&self) -> bool {
        !matches!(self, QueryErrorKind::Unexpected)
    }
}

impl fmt::Display for QueryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Pipeline error with full context
#[derive(Debug, Clone, PartialEq)]
pub struct QueryError {
    kind: QueryErrorKind,
    message: String,
    column: Option<String>,
}

impl QueryError {
    /// Create a bad request error
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorKind::BadRequest,
            message: reason.into(),
            column: None,
        }
    }

    /// Create a validation error naming the offending column
    pub fn validation(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorKind::Validation,
            message: reason.into(),
            column: Some(column.into()),
        }
    }

    /// Create an error for a column outside the allowed set
    pub fn unknown_column(column: impl Into<String>) -> Self {
        let c = column.into();
        Self {
            kind: QueryErrorKind::Validation,
            message: format!("Invalid column: {}", c),
            column: Some(c),
        }
    }

    pub fn invalid_limit(max: u64) -> Self {
        Self {
            kind: QueryErrorKind::InvalidLimit,
            message: format!("invalid limit. The limit must be between 1 and {}", max),
            column: None,
        }
    }

    pub fn invalid_offset() -> Self {
        Self {
            kind: QueryErrorKind::InvalidOffset,
            message: "invalid offset. The offset must be greater than or equal to 0".into(),
            column: None,
        }
    }

    /// Create an error for a (year, month) filter pair after `now`
    pub fn future_period(period: impl fmt::Display, now: impl fmt::Display) -> Self {
        Self {
            kind: QueryErrorKind::Validation,
            message: format!(
                "Invalid reference period. {} is after the current period {}",
                period, now
            ),
            column: Some("month".into()),
        }
    }

    pub fn invalid_range() -> Self {
        Self {
            kind: QueryErrorKind::InvalidRange,
            message: "Offset must be smaller than Limit".into(),
            column: None,
        }
    }

    /// Create a not found error
    pub fn not_found() -> Self {
        Self {
            kind: QueryErrorKind::NotFound,
            message: "no records match".into(),
            column: None,
        }
    }

    /// Create an unexpected error.
    ///
    /// The message is fixed so storage internals never reach the caller.
    pub fn unexpected() -> Self {
        Self {
            kind: QueryErrorKind::Unexpected,
            message: "Unexpected database error".into(),
            column: None,
        }
    }

    /// Returns the error kind
    pub fn kind(&self) -> QueryErrorKind {
        self.kind
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending column, if any
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.code(), self.message)?;
        if let Some(column) = &self.column {
            write!(f, " [column {}]", column)?;
        }
        Ok(())
    }
}

impl std::error::Error for QueryError {}

/// Result type for pipeline operations
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(QueryErrorKind::BadRequest.code(), "FIPE_BAD_REQUEST");
        assert_eq!(QueryErrorKind::Validation.code(), "FIPE_VALIDATION");
        assert_eq!(QueryErrorKind::InvalidLimit.code(), "FIPE_INVALID_LIMIT");
        assert_eq!(QueryErrorKind::InvalidOffset.code(), "FIPE_INVALID_OFFSET");
        assert_eq!(QueryErrorKind::InvalidRange.code(), "FIPE_INVALID_RANGE");
        assert_eq!(QueryErrorKind::NotFound.code(), "FIPE_NOT_FOUND");
        assert_eq!(QueryErrorKind::Unexpected.code(), "FIPE_UNEXPECTED");
    }

    #[test]
    fn test_client_error_kinds() {
        assert!(QueryErrorKind::InvalidLimit.is_client_error());
        assert!(QueryErrorKind::NotFound.is_client_error());
        assert!(!QueryErrorKind::Unexpected.is_client_error());
    }

    #[test]
    fn test_validation_names_column() {
        let err = QueryError::validation("year", "Invalid year");
        assert_eq!(err.kind(), QueryErrorKind::Validation);
        assert_eq!(err.column(), Some("year"));

        let display = format!("{}", err);
        assert!(display.contains("FIPE_VALIDATION"));
        assert!(display.contains("Invalid year"));
        assert!(display.contains("year"));
    }

    #[test]
    fn test_future_period_message() {
        let err = QueryError::future_period("2024-08", "2024-07");
        assert_eq!(err.kind(), QueryErrorKind::Validation);
        assert_eq!(err.column(), Some("month"));
        assert_eq!(
            err.message(),
            "Invalid reference period. 2024-08 is after the current period 2024-07"
        );
    }

    #[test]
    fn test_unexpected_is_opaque() {
        let err = QueryError::unexpected();
        assert!(!err.kind().is_client_error());
        assert_eq!(err.message(), "Unexpected database error");
        assert!(err.column().is_none());
    }
}
