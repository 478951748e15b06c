//! CLI-specific error types
//!
//! Every CLI error ends the command with a single error response.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::executor::ExecutorError;
use crate::model::ModelError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout, records file)
    IoError,
    /// Records file does not hold valid records
    InvalidRecords,
    /// Descriptor refused before execution
    QueryRejected,
    /// Query could not run
    QueryFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "LENS_CLI_CONFIG_ERROR",
            Self::IoError => "LENS_CLI_IO_ERROR",
            Self::InvalidRecords => "LENS_CLI_INVALID_RECORDS",
            Self::QueryRejected => "LENS_CLI_QUERY_REJECTED",
            Self::QueryFailed => "LENS_CLI_QUERY_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
    field: Option<String>,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Records file rejected
    pub fn invalid_records(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidRecords, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Descriptor field behind a rejected query
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
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
        Self::config_error(e.to_string())
    }
}

impl From<ModelError> for CliError {
    fn from(e: ModelError) -> Self {
        Self::invalid_records(e.to_string())
    }
}

impl From<ExecutorError> for CliError {
    fn from(e: ExecutorError) -> Self {
        let code = if e.is_rejection() {
            CliErrorCode::QueryRejected
        } else {
            CliErrorCode::QueryFailed
        };
        Self {
            code,
            message: e.to_string(),
            field: e.field().map(str::to_string),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
