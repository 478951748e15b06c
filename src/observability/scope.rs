//! Scope-based lifecycle logging
//!
//! - `{name}_BEGIN` on creation (TRACE)
//! - `{name}_COMPLETE` on `complete` (INFO)
//! - `{name}_FAILED` on `fail` (WARN)
//! - `{name}_INCOMPLETE` if dropped without either (WARN)

use std::cell::Cell;
use std::time::Instant;

use super::logger::Logger;

/// A scope that logs the start and outcome of one operation
///
/// ```ignore
/// let scope = ObservationScope::with_fields("QUERY", &[("sort", "amount")]);
/// // ... filter, sort, aggregate ...
/// scope.complete_with_fields(&[("view", "12")]);
/// ```
pub struct ObservationScope<'a> {
    name: &'a str,
    completed: Cell<bool>,
    fields: Vec<(&'a str, String)>,
    timer: Timer,
}

impl<'a> ObservationScope<'a> {
    /// Create a new observation scope
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    /// Create a new observation scope carrying fields into every line it logs
    pub fn with_fields(name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        let event = format!("{}_BEGIN", name);
        Logger::trace(&event, fields);

        Self {
            name,
            completed: Cell::new(false),
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            timer: Timer::new(),
        }
    }

    /// Mark the scope as successfully completed
    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    /// Mark the scope as successfully completed with additional fields
    pub fn complete_with_fields(self, extra_fields: &[(&str, &str)]) {
        self.completed.set(true);
        let event = format!("{}_COMPLETE", self.name);
        let elapsed = self.timer.elapsed_ms();

        let mut all_fields = self.field_refs();
        all_fields.extend(extra_fields.iter().copied());
        all_fields.push(("elapsed_ms", elapsed.as_str()));

        Logger::info(&event, &all_fields);
    }

    /// Mark the scope as failed with a reason
    pub fn fail(self, reason: &str) {
        self.completed.set(true);
        let event = format!("{}_FAILED", self.name);

        let mut all_fields = self.field_refs();
        all_fields.push(("reason", reason));

        Logger::warn(&event, &all_fields);
    }

    /// Check if the scope has been completed
    pub fn is_completed(&self) -> bool {
        self.completed.get()
    }

    fn field_refs(&self) -> Vec<(&str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect()
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed.get() {
            let event = format!("{}_INCOMPLETE", self.name);
            Logger::warn(&event, &[("reason", "scope dropped without completion")]);
        }
    }
}

/// A simple duration timer for logging elapsed time
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed milliseconds as a string
    pub fn elapsed_ms(&self) -> String {
        self.start.elapsed().as_millis().to_string()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
