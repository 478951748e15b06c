//! Aggregate statistics over a record collection

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Statistics over the full, unfiltered collection
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_count: usize,
    /// Keyed by status label; labels shared by both kinds are counted together
    pub count_by_status: BTreeMap<String, usize>,
    pub sum: f64,
    pub total_refunded: f64,
    pub sum_this_period: f64,
    pub count_this_period: usize,
    pub average_abs_amount: f64,
    pub mode_of_field: Option<String>,
    pub pending_count: usize,
    pub failed_count: usize,
    pub earliest: Option<DateTime<Utc>>,
    pub latest: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookings: Option<BookingStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions: Option<TransactionStats>,
}

impl StatsSnapshot {
    /// Count for one status label, zero when absent
    pub fn status_count(&self, label: &str) -> usize {
        self.count_by_status.get(label).copied().unwrap_or(0)
    }
}

/// Booking-only statistics
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStats {
    pub total_saved: f64,
    pub average_rating: f64,
    pub upcoming_count: usize,
    pub emergency_count: usize,
    pub recurring_count: usize,
    pub loyalty_points: u64,
    /// Percent of finished bookings that completed rather than cancelled
    pub completion_rate: f64,
    /// Percent of completed bookings that arrived on time
    pub on_time_rate: f64,
    pub favorite_provider: Option<String>,
    pub most_booked_service: Option<String>,
}

/// Transaction-only statistics
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStats {
    pub total_fees: f64,
    pub total_rewards: f64,
    pub international_count: usize,
    pub installment_count: usize,
    pub most_used_method: Option<String>,
}
