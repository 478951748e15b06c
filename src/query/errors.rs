//! Query descriptor validation errors
//!
//! Error codes:
//! - LENS_QUERY_UNKNOWN_STATUS (REJECT)
//! - LENS_QUERY_UNKNOWN_SORT_KEY (REJECT)
//! - LENS_QUERY_UNKNOWN_SORT_DIRECTION (REJECT)
//! - LENS_QUERY_UNKNOWN_DATE_RANGE (REJECT)
//! - LENS_QUERY_UNKNOWN_TYPE (REJECT)
//! - LENS_QUERY_UNKNOWN_PAYMENT_STATUS (REJECT)
//! - LENS_QUERY_INVALID_AMOUNT_RANGE (REJECT)
//! - LENS_QUERY_INVALID_RATING (REJECT)
//! - LENS_QUERY_INVALID_VALUE (REJECT)
//! - LENS_QUERY_UNKNOWN_PARAMETER (REJECT)

use std::fmt;

/// Severity levels for validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller request rejected, nothing was executed
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Validation error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorCode {
    /// Status label not in any kind's enumeration
    UnknownStatus,
    /// Sort key not supported
    UnknownSortKey,
    /// Sort direction other than asc/desc
    UnknownSortDirection,
    /// Date window name not recognized
    UnknownDateRange,
    /// Transaction type filter not recognized
    UnknownType,
    /// Booking payment status not recognized
    UnknownPaymentStatus,
    /// Amount bounds negative, non-finite, or inverted
    InvalidAmountRange,
    /// Minimum rating outside 0-5
    InvalidRating,
    /// Value could not be parsed as the field's type
    InvalidValue,
    /// Parameter name not part of the descriptor
    UnknownParameter,
}

impl ValidationErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorCode::UnknownStatus => "LENS_QUERY_UNKNOWN_STATUS",
            ValidationErrorCode::UnknownSortKey => "LENS_QUERY_UNKNOWN_SORT_KEY",
            ValidationErrorCode::UnknownSortDirection => "LENS_QUERY_UNKNOWN_SORT_DIRECTION",
            ValidationErrorCode::UnknownDateRange => "LENS_QUERY_UNKNOWN_DATE_RANGE",
            ValidationErrorCode::UnknownType => "LENS_QUERY_UNKNOWN_TYPE",
            ValidationErrorCode::UnknownPaymentStatus => "LENS_QUERY_UNKNOWN_PAYMENT_STATUS",
            ValidationErrorCode::InvalidAmountRange => "LENS_QUERY_INVALID_AMOUNT_RANGE",
            ValidationErrorCode::InvalidRating => "LENS_QUERY_INVALID_RATING",
            ValidationErrorCode::InvalidValue => "LENS_QUERY_INVALID_VALUE",
            ValidationErrorCode::UnknownParameter => "LENS_QUERY_UNKNOWN_PARAMETER",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Descriptor validation error naming the offending field
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error code
    code: ValidationErrorCode,
    /// Human-readable message
    message: String,
    /// Descriptor field that failed
    field: String,
}

impl ValidationError {
    fn new(code: ValidationErrorCode, field: impl Into<String>, message: String) -> Self {
        Self {
            code,
            message,
            field: field.into(),
        }
    }

    /// Create an unknown status error
    pub fn unknown_status(field: &str, value: &str) -> Self {
        Self::new(
            ValidationErrorCode::UnknownStatus,
            field,
            format!("Unknown status '{}'", value),
        )
    }

    /// Create an unknown sort key error
    pub fn unknown_sort_key(field: &str, value: &str) -> Self {
        Self::new(
            ValidationErrorCode::UnknownSortKey,
            field,
            format!("Unknown sort key '{}'", value),
        )
    }

    /// Create an unknown sort direction error
    pub fn unknown_sort_direction(field: &str, value: &str) -> Self {
        Self::new(
            ValidationErrorCode::UnknownSortDirection,
            field,
            format!("Sort direction must be 'asc' or 'desc', got '{}'", value),
        )
    }

    /// Create an unknown date range error
    pub fn unknown_date_range(field: &str, value: &str) -> Self {
        Self::new(
            ValidationErrorCode::UnknownDateRange,
            field,
            format!("Unknown date range '{}'", value),
        )
    }

    /// Create an unknown transaction type error
    pub fn unknown_type(field: &str, value: &str) -> Self {
        Self::new(
            ValidationErrorCode::UnknownType,
            field,
            format!("Unknown transaction type filter '{}'", value),
        )
    }

    /// Create an unknown payment status error
    pub fn unknown_payment_status(field: &str, value: &str) -> Self {
        Self::new(
            ValidationErrorCode::UnknownPaymentStatus,
            field,
            format!("Unknown payment status '{}'", value),
        )
    }

    /// Create an invalid amount range error
    pub fn invalid_amount_range(field: &str, reason: impl Into<String>) -> Self {
        Self::new(ValidationErrorCode::InvalidAmountRange, field, reason.into())
    }

    /// Create an invalid rating error
    pub fn invalid_rating(field: &str, value: i64) -> Self {
        Self::new(
            ValidationErrorCode::InvalidRating,
            field,
            format!("Minimum rating must be between 0 and 5, got {}", value),
        )
    }

    /// Create an invalid value error
    pub fn invalid_value(field: &str, value: &str) -> Self {
        Self::new(
            ValidationErrorCode::InvalidValue,
            field,
            format!("Invalid value '{}' for '{}'", value, field),
        )
    }

    /// Create an unknown parameter error
    pub fn unknown_parameter(field: &str) -> Self {
        Self::new(
            ValidationErrorCode::UnknownParameter,
            field,
            format!("Unknown query parameter '{}'", field),
        )
    }

    /// Returns the error code
    pub fn code(&self) -> ValidationErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending descriptor field
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} (field '{}')",
            self.code.severity(),
            self.code.code(),
            self.message,
            self.field
        )
    }
}

impl std::error::Error for ValidationError {}

/// Result type for descriptor validation
pub type QueryResult<T> = Result<T, ValidationError>;
