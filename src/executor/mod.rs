//! Query execution for recordlens
//!
//! The executor takes a record collection and a validated descriptor and
//! produces a view plus statistics.
//!
//! # Execution Flow (strict order)
//!
//! 1. Filter records by every active criterion (AND)
//! 2. Stable-sort the matches by the descriptor's key and direction
//! 3. Aggregate over the original, unfiltered collection
//! 4. Return `{ view, stats }`
//!
//! # Guarantees
//!
//! - The input collection is never mutated
//! - Equal sort keys keep input order
//! - Statistics never depend on filters or sort order
//! - Identical inputs give identical results

mod engine;
mod errors;
mod filters;
mod result;
mod sorter;
pub mod worker;

pub use engine::QueryEngine;
pub use errors::{ExecutorError, ExecutorErrorCode, ExecutorResult, Severity};
pub use filters::{Criterion, PredicateFilter};
pub use result::{ExecutionResult, OwnedExecutionResult};
pub use sorter::{RecordComparator, ResultSorter};
pub use worker::run_on_worker;
