//! Observability subsystem for recordlens
//!
//! - Structured logging (JSON lines on stderr)
//! - Counters for queries and records
//! - Lifecycle event tracing
//!
//! Observability is read-only: nothing here changes what a query returns.
//!
//! ```ignore
//! use recordlens::observability::{Event, Logger, MetricsRegistry};
//!
//! Logger::info(Event::QueryExecuted.as_str(), &[("view", "42")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_queries_executed();
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use scope::{ObservationScope, Timer};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Warn
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
