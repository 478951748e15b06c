//! Result types for query execution

use serde::Serialize;

use crate::model::Record;
use crate::stats::StatsSnapshot;

/// Result of one query: the sorted view and statistics over the full input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResult<'a> {
    /// Matching records in sort order
    pub view: Vec<&'a Record>,
    /// Computed over the full collection, not the view
    pub stats: StatsSnapshot,
    /// Number of records examined
    #[serde(skip)]
    pub scanned_count: usize,
}

impl<'a> ExecutionResult<'a> {
    /// Returns true if no records matched
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Returns the number of matching records
    pub fn len(&self) -> usize {
        self.view.len()
    }

    /// Returns an iterator over the matching records
    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.view.iter().copied()
    }

    /// Ids of the matching records, in view order
    pub fn ids(&self) -> Vec<&'a str> {
        self.view.iter().map(|r| r.id()).collect()
    }

    /// Detaches the result from the input collection
    pub fn into_owned(self) -> OwnedExecutionResult {
        OwnedExecutionResult {
            view: self.view.into_iter().cloned().collect(),
            stats: self.stats,
            scanned_count: self.scanned_count,
        }
    }
}

/// `ExecutionResult` holding its own records, for results sent across tasks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnedExecutionResult {
    pub view: Vec<Record>,
    pub stats: StatsSnapshot,
    #[serde(skip)]
    pub scanned_count: usize,
}

impl OwnedExecutionResult {
    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TransactionDetails, TransactionStatus};
    use chrono::{TimeZone, Utc};

    fn record(id: &str) -> Record {
        Record::transaction(
            id,
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            TransactionStatus::Pending,
            5.0,
            TransactionDetails::new("x", "UPI"),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_result() {
        let result = ExecutionResult {
            view: Vec::new(),
            stats: StatsSnapshot::default(),
            scanned_count: 0,
        };
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
    }

    #[test]
    fn test_into_owned_keeps_order() {
        let (a, b) = (record("a"), record("b"));
        let result = ExecutionResult {
            view: vec![&b, &a],
            stats: StatsSnapshot::default(),
            scanned_count: 2,
        };
        assert_eq!(result.ids(), ["b", "a"]);

        let owned = result.into_owned();
        assert_eq!(owned.len(), 2);
        assert_eq!(owned.view[0].id(), "b");
    }

    #[test]
    fn test_serializes_view_and_stats() {
        let a = record("a");
        let result = ExecutionResult {
            view: vec![&a],
            stats: StatsSnapshot::default(),
            scanned_count: 1,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["view"][0]["id"], "a");
        assert_eq!(value["view"][0]["kind"], "transaction");
        assert_eq!(value["stats"]["totalCount"], 0);
        assert!(value.get("scanned_count").is_none());
    }
}
