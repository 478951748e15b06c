//! Aggregator
//!
//! Computes a `StatsSnapshot` in one pass over the collection. The result
//! never depends on any query's filters or sort order.

use std::fmt;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    BookingDetails, BookingStatus, PaymentStatus, Record, RecordStatus, TransactionDetails,
    TransactionStatus, TransactionType, UrgencyLevel,
};
use crate::query::month_start;

use super::frequency::FrequencyTable;
use super::snapshot::{BookingStats, StatsSnapshot, TransactionStats};

/// Field whose most frequent value is reported as `modeOfField`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeField {
    /// Payment method for transactions, provider name for bookings
    #[default]
    KindDefault,
    /// Booking category or payment method
    Category,
    /// Booking provider or transaction merchant
    Provider,
    /// Booking service name; transactions have none
    Service,
}

impl ModeField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "kind_default" | "default" => Some(ModeField::KindDefault),
            "category" | "method" => Some(ModeField::Category),
            "provider" => Some(ModeField::Provider),
            "service" => Some(ModeField::Service),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeField::KindDefault => "kind_default",
            ModeField::Category => "category",
            ModeField::Provider => "provider",
            ModeField::Service => "service",
        }
    }

    fn value<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            ModeField::KindDefault => {
                match (record.booking_details(), record.transaction_details()) {
                    (Some(booking), _) => &booking.provider_name,
                    (_, Some(transaction)) => &transaction.method,
                    _ => "",
                }
            }
            ModeField::Category => record.category(),
            ModeField::Provider => record.provider(),
            ModeField::Service => record
                .booking_details()
                .map(|b| b.service_name.as_str())
                .unwrap_or(""),
        }
    }
}

impl fmt::Display for ModeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computes statistics over a full record collection
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    mode_field: ModeField,
    offset: FixedOffset,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(ModeField::default(), Utc.fix())
    }
}

impl Aggregator {
    pub fn new(mode_field: ModeField, offset: FixedOffset) -> Self {
        Self { mode_field, offset }
    }

    pub fn mode_field(&self) -> ModeField {
        self.mode_field
    }

    /// Aggregates against the current wall-clock time
    pub fn aggregate(&self, records: &[Record]) -> StatsSnapshot {
        self.aggregate_at(records, Utc::now())
    }

    /// Aggregates with an explicit "now" anchoring the current period
    pub fn aggregate_at(&self, records: &[Record], now: DateTime<Utc>) -> StatsSnapshot {
        let period_start = month_start(now, self.offset);

        let mut snapshot = StatsSnapshot {
            total_count: records.len(),
            ..StatsSnapshot::default()
        };
        let mut modes = FrequencyTable::new();
        let mut completed = 0usize;
        let mut completed_abs = 0.0;
        let mut bookings = BookingTally::default();
        let mut transactions = TransactionTally::default();

        for record in records {
            let status = record.status();
            *snapshot
                .count_by_status
                .entry(status.as_str().to_string())
                .or_insert(0) += 1;

            let timestamp = record.timestamp();
            snapshot.earliest = Some(snapshot.earliest.map_or(timestamp, |t| t.min(timestamp)));
            snapshot.latest = Some(snapshot.latest.map_or(timestamp, |t| t.max(timestamp)));

            let in_period = timestamp >= period_start;
            if in_period {
                snapshot.count_this_period += 1;
            }

            if status.is_completed() {
                completed += 1;
                completed_abs += record.amount().abs();
            }

            let moved = money_moved(record);
            snapshot.sum += moved.spent;
            snapshot.total_refunded += moved.refunded;
            if in_period {
                snapshot.sum_this_period += moved.spent;
            }

            modes.record(self.mode_field.value(record));

            if let Some(details) = record.booking_details() {
                bookings.add(record, details, now);
            }
            if let Some(details) = record.transaction_details() {
                transactions.add(record, details);
            }
        }

        snapshot.pending_count = snapshot.status_count("pending");
        snapshot.failed_count = snapshot.status_count("failed");
        snapshot.average_abs_amount = mean(completed_abs, completed);
        snapshot.mode_of_field = modes.mode().map(str::to_string);
        snapshot.bookings = bookings.finish();
        snapshot.transactions = transactions.finish();
        snapshot
    }
}

#[derive(Debug, Default)]
struct MoneyMoved {
    spent: f64,
    refunded: f64,
}

/// Money that actually changed hands for one record
fn money_moved(record: &Record) -> MoneyMoved {
    let mut moved = MoneyMoved::default();

    match (record.status(), record.booking_details()) {
        (RecordStatus::Booking(status), Some(details)) => {
            let settled = matches!(details.payment_status, None | Some(PaymentStatus::Paid));
            if status == BookingStatus::Completed && settled {
                moved.spent = record.amount();
            }
            if details.payment_status.is_some_and(|p| p.is_refund()) {
                moved.refunded = details.refund_amount.unwrap_or(0.0);
            }
        }
        (RecordStatus::Transaction(TransactionStatus::Completed), _) => {
            match record.transaction_type() {
                Some(TransactionType::Payment) => moved.spent = record.amount(),
                Some(TransactionType::Refund) => moved.refunded = record.amount().abs(),
                _ => {}
            }
        }
        _ => {}
    }

    moved
}

#[derive(Debug, Default)]
struct BookingTally<'a> {
    seen: usize,
    saved: f64,
    rating_total: u64,
    rated: usize,
    upcoming: usize,
    emergency: usize,
    recurring: usize,
    loyalty_points: u64,
    completed: usize,
    cancelled: usize,
    on_time: usize,
    providers: FrequencyTable<'a>,
    services: FrequencyTable<'a>,
}

impl<'a> BookingTally<'a> {
    fn add(&mut self, record: &'a Record, details: &'a BookingDetails, now: DateTime<Utc>) {
        self.seen += 1;
        self.saved += details.discount_applied.unwrap_or(0.0);
        self.loyalty_points += u64::from(details.loyalty_points);

        if let Some(rating) = details.rating {
            self.rating_total += u64::from(rating);
            self.rated += 1;
        }
        if details.urgency == UrgencyLevel::Emergency {
            self.emergency += 1;
        }
        if details.recurring {
            self.recurring += 1;
        }

        match record.status() {
            RecordStatus::Booking(BookingStatus::Pending | BookingStatus::Confirmed)
                if record.timestamp() > now =>
            {
                self.upcoming += 1;
            }
            RecordStatus::Booking(BookingStatus::Completed) => {
                self.completed += 1;
                if details.arrived_on_time() {
                    self.on_time += 1;
                }
            }
            RecordStatus::Booking(BookingStatus::Cancelled) => self.cancelled += 1,
            _ => {}
        }

        self.providers.record(&details.provider_name);
        self.services.record(&details.service_name);
    }

    fn finish(self) -> Option<BookingStats> {
        if self.seen == 0 {
            return None;
        }
        Some(BookingStats {
            total_saved: self.saved,
            average_rating: mean(self.rating_total as f64, self.rated),
            upcoming_count: self.upcoming,
            emergency_count: self.emergency,
            recurring_count: self.recurring,
            loyalty_points: self.loyalty_points,
            completion_rate: percent(self.completed, self.completed + self.cancelled),
            on_time_rate: percent(self.on_time, self.completed),
            favorite_provider: self.providers.mode().map(str::to_string),
            most_booked_service: self.services.mode().map(str::to_string),
        })
    }
}

#[derive(Debug, Default)]
struct TransactionTally<'a> {
    seen: usize,
    fees: f64,
    rewards: f64,
    international: usize,
    installment: usize,
    methods: FrequencyTable<'a>,
}

impl<'a> TransactionTally<'a> {
    fn add(&mut self, record: &'a Record, details: &'a TransactionDetails) {
        self.seen += 1;
        if record.status().is_completed() {
            self.fees += details.fees_total.unwrap_or(0.0);
            self.rewards += details.cashback.unwrap_or(0.0);
        }
        if details.international {
            self.international += 1;
        }
        if details.installment {
            self.installment += 1;
        }
        self.methods.record(&details.method);
    }

    fn finish(self) -> Option<TransactionStats> {
        if self.seen == 0 {
            return None;
        }
        Some(TransactionStats {
            total_fees: self.fees,
            total_rewards: self.rewards,
            international_count: self.international,
            installment_count: self.installment,
            most_used_method: self.methods.mode().map(str::to_string),
        })
    }
}

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    mean(part as f64 * 100.0, whole)
}
