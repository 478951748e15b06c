//! Query descriptors for recordlens
//!
//! A descriptor carries the filter criteria, free-text search term and sort
//! order for one query. Callers either build one directly, deserialize a
//! `RawDescriptor`, or parse HTTP-style parameters.
//!
//! # Rules
//!
//! - Absent fields never restrict; `all` is the explicit "no restriction" value
//! - Unknown enumeration values are rejected, never ignored
//! - Errors name the offending field

mod descriptor;
mod errors;
mod params;
mod raw;
mod window;

pub use descriptor::{
    AmountRange, BookingFlags, QueryDescriptor, SortDirection, SortKey, SortSpec, StatusFilter,
    TypeFilter,
};
pub use errors::{QueryResult, Severity, ValidationError, ValidationErrorCode};
pub use params::{parse_pairs, parse_params};
pub use raw::RawDescriptor;
pub use window::{month_start, DateWindow};
