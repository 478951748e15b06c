//! Record model for recordlens
//!
//! Bookings and payment transactions share one `Record` type: a common base
//! (id, timestamp, status, signed amount, tags) plus a kind-specific
//! extension selected by `RecordKind`.
//!
//! # Invariants
//!
//! - `id` is non-empty and unique within a collection
//! - `status` always belongs to the record's kind
//! - booking amounts are never negative; transaction refunds are
//! - ratings are 1-5 and only present on completed bookings

mod details;
mod errors;
mod record;
mod status;

pub use details::{BookingDetails, TransactionDetails};
pub use errors::{ModelError, ModelResult};
pub use record::{ensure_unique_ids, Record};
pub use status::{
    BookingStatus, PaymentStatus, RecordKind, RecordStatus, TransactionStatus, TransactionType,
    UrgencyLevel,
};
