//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::error::QueryError;
use crate::rest_api::RestError;
use crate::storage::StorageError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file or environment error
    ConfigError,
    /// I/O error (files, stdout)
    IoError,
    /// Database could not be opened or written
    StorageError,
    /// Malformed command arguments
    BadArguments,
    /// A seed record has a malformed fipe code or reference period
    InvalidRecord,
    /// Query pipeline rejected or failed the query
    QueryFailed,
    /// HTTP server could not start or stopped with an error
    ServeFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "FIPE_CLI_CONFIG_ERROR",
            Self::IoError => "FIPE_CLI_IO_ERROR",
            Self::StorageError => "FIPE_CLI_STORAGE_ERROR",
            Self::BadArguments => "FIPE_CLI_BAD_ARGUMENTS",
            Self::InvalidRecord => "FIPE_CLI_INVALID_RECORD",
            Self::QueryFailed => "FIPE_CLI_QUERY_FAILED",
            Self::ServeFailed => "FIPE_CLI_SERVE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidRecord, msg)
    }

    pub fn serve_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServeFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(CliErrorCode::ConfigError, e.to_string())
    }
}

impl From<StorageError> for CliError {
    fn from(e: StorageError) -> Self {
        Self::new(CliErrorCode::StorageError, e.to_string())
    }
}

impl From<RestError> for CliError {
    fn from(e: RestError) -> Self {
        Self::new(CliErrorCode::BadArguments, e.to_string())
    }
}

impl From<QueryError> for CliError {
    fn from(e: QueryError) -> Self {
        Self::new(CliErrorCode::QueryFailed, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_keeps_kind_code() {
        let err = CliError::from(QueryError::not_found());
        assert_eq!(err.code(), &CliErrorCode::QueryFailed);
        assert_eq!(
            err.to_string(),
            "FIPE_CLI_QUERY_FAILED: FIPE_NOT_FOUND: no records match"
        );
    }

    #[test]
    fn test_bad_arguments() {
        let err = CliError::from(RestError::BadRequest("limit must be an integer".into()));
        assert_eq!(err.code().code(), "FIPE_CLI_BAD_ARGUMENTS");
        assert_eq!(err.message(), "limit must be an integer");
    }
}
