//! Record ordering for query execution
//!
//! Comparison never breaks ties with a secondary key. Equal records keep
//! their input order because the sort is stable.

use std::cmp::Ordering;

use crate::model::Record;
use crate::query::{SortDirection, SortKey, SortSpec};

/// Compares records under a sort key and direction
pub struct RecordComparator;

impl RecordComparator {
    /// Total order on `a` and `b` for `spec`
    pub fn compare(a: &Record, b: &Record, spec: SortSpec) -> Ordering {
        let ordering = Self::compare_key(a, b, spec.key);

        match spec.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    fn compare_key(a: &Record, b: &Record, key: SortKey) -> Ordering {
        match key {
            SortKey::Timestamp => a.timestamp().cmp(&b.timestamp()),
            // Amounts are finite by construction
            SortKey::Amount => a.amount().abs().total_cmp(&b.amount().abs()),
            SortKey::Status => a.status().as_str().cmp(b.status().as_str()),
            SortKey::Method => a.category().cmp(b.category()),
            SortKey::Provider => a.provider().cmp(b.provider()),
            SortKey::Rating => a.rating().unwrap_or(0).cmp(&b.rating().unwrap_or(0)),
            SortKey::Urgency => urgency_rank(a).cmp(&urgency_rank(b)),
            SortKey::Type => type_label(a).cmp(type_label(b)),
        }
    }
}

fn urgency_rank(record: &Record) -> u8 {
    record.urgency().map_or(0, |u| u.rank())
}

fn type_label(record: &Record) -> &'static str {
    record.transaction_type().map_or("", |t| t.as_str())
}

/// Sorts record views
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts in place. Stable: equal records keep their relative order.
    pub fn sort(records: &mut [&Record], spec: SortSpec) {
        records.sort_by(|a, b| RecordComparator::compare(a, b, spec));
    }
}
