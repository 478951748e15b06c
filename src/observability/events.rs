//! Observable events
//!
//! Events are explicit and typed; the logger only ever sees their names.

use std::fmt;

/// Observable events in recordlens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration file read and validated
    ConfigLoaded,
    /// Record collection loaded and validated
    RecordsLoaded,
    /// Record collection failed validation
    RecordsRejected,
    /// Query accepted for execution
    QueryReceived,
    /// Query produced a view and snapshot
    QueryExecuted,
    /// Query refused before execution
    QueryRejected,
    /// Statistics snapshot computed
    AggregateComplete,
    /// Query handed to a background worker
    WorkerDispatched,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::RecordsLoaded => "RECORDS_LOADED",
            Event::RecordsRejected => "RECORDS_REJECTED",
            Event::QueryReceived => "QUERY_RECEIVED",
            Event::QueryExecuted => "QUERY_EXECUTED",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::AggregateComplete => "AGGREGATE_COMPLETE",
            Event::WorkerDispatched => "WORKER_DISPATCHED",
        }
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::RecordsRejected | Event::QueryRejected)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
