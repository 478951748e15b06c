//! recordlens - query and analytics over bookings and payment transactions
//!
//! A query takes a record collection and a descriptor and returns the
//! filtered, sorted view together with statistics over the whole collection.
//!
//! ```ignore
//! use recordlens::executor::QueryEngine;
//! use recordlens::query::{QueryDescriptor, SortKey, SortSpec};
//!
//! let engine = QueryEngine::default();
//! let descriptor = QueryDescriptor::new().with_sort(SortSpec::asc(SortKey::Amount));
//! let result = engine.run(&records, &descriptor)?;
//! println!("{} of {}", result.len(), result.stats.total_count);
//! ```

pub mod cli;
pub mod config;
pub mod executor;
pub mod model;
pub mod observability;
pub mod query;
pub mod stats;
