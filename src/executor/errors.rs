//! Executor error types
//!
//! Error codes:
//! - LENS_QUERY_REJECTED (REJECT)
//! - LENS_EXECUTION_LIMIT (ERROR)
//! - LENS_EXECUTION_FAILED (ERROR)
//!
//! Errors surface immediately with no partial result.

use std::fmt;

use crate::query::ValidationError;

/// Severity levels for executor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The caller's input was refused; nothing ran
    Reject,
    /// Execution was attempted and failed
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Executor-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorErrorCode {
    /// Descriptor failed validation
    LensQueryRejected,
    /// Collection exceeds the configured record cap
    LensExecutionLimit,
    /// Execution could not complete
    LensExecutionFailed,
}

impl ExecutorErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorErrorCode::LensQueryRejected => "LENS_QUERY_REJECTED",
            ExecutorErrorCode::LensExecutionLimit => "LENS_EXECUTION_LIMIT",
            ExecutorErrorCode::LensExecutionFailed => "LENS_EXECUTION_FAILED",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ExecutorErrorCode::LensQueryRejected => Severity::Reject,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for ExecutorErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Executor error type with full context
#[derive(Debug)]
pub struct ExecutorError {
    code: ExecutorErrorCode,
    message: String,
    validation: Option<ValidationError>,
}

impl ExecutorError {
    /// Create an execution failed error
    pub fn execution_failed(reason: impl Into<String>) -> Self {
        Self {
            code: ExecutorErrorCode::LensExecutionFailed,
            message: reason.into(),
            validation: None,
        }
    }

    /// Create an execution limit error
    pub fn execution_limit(records: usize, limit: usize) -> Self {
        Self {
            code: ExecutorErrorCode::LensExecutionLimit,
            message: format!(
                "collection holds {} records, limit is {}",
                records, limit
            ),
            validation: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ExecutorErrorCode {
        self.code
    }

    /// Most specific code available: the validation code for rejected queries
    pub fn detail_code(&self) -> &'static str {
        match &self.validation {
            Some(err) => err.code().code(),
            None => self.code.code(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Descriptor field that caused a rejection
    pub fn field(&self) -> Option<&str> {
        self.validation.as_ref().map(ValidationError::field)
    }

    /// The validation failure behind a rejected query
    pub fn validation(&self) -> Option<&ValidationError> {
        self.validation.as_ref()
    }

    pub fn is_rejection(&self) -> bool {
        self.severity() == Severity::Reject
    }
}

impl From<ValidationError> for ExecutorError {
    fn from(err: ValidationError) -> Self {
        Self {
            code: ExecutorErrorCode::LensQueryRejected,
            message: err.message().to_string(),
            validation: Some(err),
        }
    }
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.detail_code(),
            self.message
        )?;
        if let Some(field) = self.field() {
            write!(f, " (field '{}')", field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExecutorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.validation
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortKey;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ExecutorErrorCode::LensQueryRejected.code(),
            "LENS_QUERY_REJECTED"
        );
        assert_eq!(
            ExecutorErrorCode::LensExecutionLimit.code(),
            "LENS_EXECUTION_LIMIT"
        );
        assert_eq!(
            ExecutorErrorCode::LensExecutionFailed.code(),
            "LENS_EXECUTION_FAILED"
        );
    }

    #[test]
    fn test_validation_error_becomes_rejection() {
        let validation = SortKey::parse("sortKey", "popularity").unwrap_err();
        let err = ExecutorError::from(validation);

        assert!(err.is_rejection());
        assert_eq!(err.field(), Some("sortKey"));
        assert_eq!(err.detail_code(), "LENS_QUERY_UNKNOWN_SORT_KEY");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_limit_error_display() {
        let err = ExecutorError::execution_limit(12, 10);
        assert!(!err.is_rejection());
        assert_eq!(err.field(), None);

        let display = err.to_string();
        assert!(display.starts_with("[ERROR] LENS_EXECUTION_LIMIT"));
        assert!(display.contains("12"));
    }
}
