//! Metrics registry for recordlens
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for a query engine
///
/// All counters use `Relaxed` ordering; readers may observe counters from
/// different queries in different states.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    queries_executed: AtomicU64,
    queries_rejected: AtomicU64,
    records_scanned: AtomicU64,
    records_returned: AtomicU64,
    records_loaded: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    // Query metrics

    /// Increment queries executed
    pub fn increment_queries_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment queries rejected
    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Add to the number of records a query had to examine
    pub fn add_records_scanned(&self, count: u64) {
        self.records_scanned.fetch_add(count, Ordering::Relaxed);
    }

    /// Add to the number of records placed in a view
    pub fn add_records_returned(&self, count: u64) {
        self.records_returned.fetch_add(count, Ordering::Relaxed);
    }

    // Load metrics

    /// Add to the number of records loaded from disk
    pub fn add_records_loaded(&self, count: u64) {
        self.records_loaded.fetch_add(count, Ordering::Relaxed);
    }

    /// Get queries executed
    pub fn queries_executed(&self) -> u64 {
        self.queries_executed.load(Ordering::Relaxed)
    }

    /// Get queries rejected
    pub fn queries_rejected(&self) -> u64 {
        self.queries_rejected.load(Ordering::Relaxed)
    }

    /// Take a point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            records_scanned: self.records_scanned.load(Ordering::Relaxed),
            records_returned: self.records_returned.load(Ordering::Relaxed),
            records_loaded: self.records_loaded.load(Ordering::Relaxed),
        }
    }

    /// Export all counters as a JSON object
    pub fn to_json(&self) -> String {
        // Field order is fixed by the struct layout
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Point-in-time copy of the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_rejected: u64,
    pub records_scanned: u64,
    pub records_returned: u64,
    pub records_loaded: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_new_registry_zeroed() {
        let metrics = MetricsRegistry::new();
        let snap = metrics.snapshot();
        assert_eq!(snap.queries_executed, 0);
        assert_eq!(snap.records_scanned, 0);
        assert_eq!(snap.records_loaded, 0);
    }

    #[test]
    fn test_counters_accumulate() {
        let metrics = MetricsRegistry::new();
        metrics.increment_queries_executed();
        metrics.increment_queries_executed();
        metrics.increment_queries_rejected();
        metrics.add_records_scanned(10);
        metrics.add_records_scanned(5);
        metrics.add_records_returned(3);

        let snap = metrics.snapshot();
        assert_eq!(snap.queries_executed, 2);
        assert_eq!(snap.queries_rejected, 1);
        assert_eq!(snap.records_scanned, 15);
        assert_eq!(snap.records_returned, 3);
    }

    #[test]
    fn test_to_json() {
        let metrics = MetricsRegistry::new();
        metrics.add_records_loaded(42);

        let parsed: serde_json::Value = serde_json::from_str(&metrics.to_json()).unwrap();
        assert_eq!(parsed["records_loaded"], 42);
        assert_eq!(parsed["queries_executed"], 0);
    }

    #[test]
    fn test_thread_safety() {
        let metrics = Arc::new(MetricsRegistry::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let m = Arc::clone(&metrics);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    m.increment_queries_executed();
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(metrics.queries_executed(), 1000);
    }
}
