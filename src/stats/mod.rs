//! Statistics over record collections
//!
//! The aggregator always runs over the complete collection a query was given.
//! Filters and sort order never influence a `StatsSnapshot`.
//!
//! An empty collection yields zero counts and sums, zero averages and unset
//! `earliest`/`latest`; it is never an error.

mod aggregator;
mod frequency;
mod snapshot;

pub use aggregator::{Aggregator, ModeField};
pub use frequency::FrequencyTable;
pub use snapshot::{BookingStats, StatsSnapshot, TransactionStats};
