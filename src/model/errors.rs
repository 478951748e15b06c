//! Record model errors

use thiserror::Error;

/// Result type for record construction
pub type ModelResult<T> = Result<T, ModelError>;

/// A record violated one of the model invariants
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Identifier was empty
    #[error("Record id must not be empty")]
    EmptyId,

    /// Amount was NaN or infinite
    #[error("Record '{id}' has a non-finite amount")]
    NonFiniteAmount { id: String },

    /// Bookings never carry negative amounts
    #[error("Booking '{id}' has negative amount {amount}")]
    NegativeBookingAmount { id: String, amount: f64 },

    /// Rating outside 1..=5
    #[error("Booking '{id}' has rating {rating}, expected 1-5")]
    RatingOutOfRange { id: String, rating: u8 },

    /// Rating on a booking that is not completed
    #[error("Booking '{id}' is {status} and cannot carry a rating")]
    RatingNotAllowed { id: String, status: &'static str },

    /// A monetary detail field was negative or non-finite
    #[error("Record '{id}' has invalid {field}: {value}")]
    InvalidMoneyField {
        id: String,
        field: &'static str,
        value: f64,
    },

    /// Two records in one collection share an id
    #[error("Duplicate record id '{0}'")]
    DuplicateId(String),
}
