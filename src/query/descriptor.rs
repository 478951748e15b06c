//! Query descriptor: filter, search and sort parameters for one query
//!
//! Every field is optional. An absent filter means "no restriction"; an
//! absent sort means timestamp, descending. All criteria combine with AND.

use std::fmt;

use crate::model::{BookingStatus, PaymentStatus, RecordStatus, TransactionStatus, TransactionType};

use super::errors::{QueryResult, ValidationError};
use super::window::DateWindow;

/// Status label filter, matched against any record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFilter(&'static str);

impl StatusFilter {
    /// Parses a status label known to at least one record kind
    pub fn parse(field: &str, value: &str) -> QueryResult<Self> {
        RecordStatus::canonical_label(value)
            .map(StatusFilter)
            .ok_or_else(|| ValidationError::unknown_status(field, value))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn matches(&self, status: RecordStatus) -> bool {
        status.as_str() == self.0
    }
}

impl From<BookingStatus> for StatusFilter {
    fn from(status: BookingStatus) -> Self {
        StatusFilter(status.as_str())
    }
}

impl From<TransactionStatus> for StatusFilter {
    fn from(status: TransactionStatus) -> Self {
        StatusFilter(status.as_str())
    }
}

/// Transaction type groups offered as filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    Payments,
    Refunds,
    Fees,
    /// Rewards and cashback
    Rewards,
    Chargeback,
    Dispute,
}

impl TypeFilter {
    pub fn parse(field: &str, value: &str) -> QueryResult<Self> {
        match value {
            "payments" | "payment" => Ok(TypeFilter::Payments),
            "refunds" | "refund" => Ok(TypeFilter::Refunds),
            "fees" | "fee" => Ok(TypeFilter::Fees),
            "rewards" | "reward" => Ok(TypeFilter::Rewards),
            "chargeback" => Ok(TypeFilter::Chargeback),
            "dispute" => Ok(TypeFilter::Dispute),
            other => Err(ValidationError::unknown_type(field, other)),
        }
    }

    pub fn matches(&self, transaction_type: TransactionType) -> bool {
        match self {
            TypeFilter::Payments => transaction_type == TransactionType::Payment,
            TypeFilter::Refunds => transaction_type == TransactionType::Refund,
            TypeFilter::Fees => transaction_type == TransactionType::Fee,
            TypeFilter::Rewards => matches!(
                transaction_type,
                TransactionType::Reward | TransactionType::Cashback
            ),
            TypeFilter::Chargeback => transaction_type == TransactionType::Chargeback,
            TypeFilter::Dispute => transaction_type == TransactionType::Dispute,
        }
    }
}

/// Bounds on `abs(amount)`.
///
/// A `max` of zero or less leaves the upper end open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountRange {
    min: f64,
    max: f64,
}

impl AmountRange {
    pub fn new(min: f64, max: f64) -> QueryResult<Self> {
        const FIELD: &str = "amountRange";

        if !min.is_finite() || !max.is_finite() {
            return Err(ValidationError::invalid_amount_range(
                FIELD,
                "Amount bounds must be finite",
            ));
        }
        if min < 0.0 {
            return Err(ValidationError::invalid_amount_range(
                FIELD,
                format!("Minimum amount {} is negative", min),
            ));
        }
        if max > 0.0 && min > max {
            return Err(ValidationError::invalid_amount_range(
                FIELD,
                format!("Minimum amount {} exceeds maximum {}", min, max),
            ));
        }

        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_upper_bounded(&self) -> bool {
        self.max > 0.0
    }

    /// Checks `abs(amount)` against the bounds
    pub fn contains(&self, amount: f64) -> bool {
        let magnitude = amount.abs();
        magnitude >= self.min && (!self.is_upper_bounded() || magnitude <= self.max)
    }
}

/// Booking-only presence checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BookingFlags {
    pub has_review: bool,
    pub is_recurring: bool,
    pub is_emergency: bool,
    pub has_discount: bool,
}

impl BookingFlags {
    pub fn any(&self) -> bool {
        self.has_review || self.is_recurring || self.is_emergency || self.has_discount
    }
}

/// Sort keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Timestamp,
    /// Compares `abs(amount)`
    Amount,
    Status,
    /// Payment method, or booking category
    Method,
    Provider,
    /// Missing rating sorts as 0
    Rating,
    Urgency,
    /// Transaction type label; empty for bookings
    Type,
}

impl SortKey {
    pub fn parse(field: &str, value: &str) -> QueryResult<Self> {
        match value {
            "timestamp" | "date" | "datetime" => Ok(SortKey::Timestamp),
            "amount" => Ok(SortKey::Amount),
            "status" => Ok(SortKey::Status),
            "method" | "category" => Ok(SortKey::Method),
            "provider" => Ok(SortKey::Provider),
            "rating" => Ok(SortKey::Rating),
            "urgency" => Ok(SortKey::Urgency),
            "type" => Ok(SortKey::Type),
            other => Err(ValidationError::unknown_sort_key(field, other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Timestamp => "timestamp",
            SortKey::Amount => "amount",
            SortKey::Status => "status",
            SortKey::Method => "method",
            SortKey::Provider => "provider",
            SortKey::Rating => "rating",
            SortKey::Urgency => "urgency",
            SortKey::Type => "type",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn parse(field: &str, value: &str) -> QueryResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ValidationError::unknown_sort_direction(field, value)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
        }
    }
}

/// Validated query descriptor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryDescriptor {
    pub status: Option<StatusFilter>,
    pub category: Option<String>,
    pub provider: Option<String>,
    pub transaction_type: Option<TypeFilter>,
    pub payment_status: Option<PaymentStatus>,
    pub date_range: DateWindow,
    pub amount_range: Option<AmountRange>,
    /// Zero is stored as `None`
    pub min_rating: Option<u8>,
    /// Stored case-folded; empty terms are stored as `None`
    pub search_term: Option<String>,
    pub flags: BookingFlags,
    pub sort: SortSpec,
}

impl QueryDescriptor {
    /// Descriptor with no restrictions and the default sort
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: impl Into<StatusFilter>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_type(mut self, filter: TypeFilter) -> Self {
        self.transaction_type = Some(filter);
        self
    }

    pub fn with_payment_status(mut self, status: PaymentStatus) -> Self {
        self.payment_status = Some(status);
        self
    }

    pub fn with_date_range(mut self, window: DateWindow) -> Self {
        self.date_range = window;
        self
    }

    pub fn with_amount_range(mut self, range: AmountRange) -> Self {
        self.amount_range = Some(range);
        self
    }

    /// Sets the minimum rating; ratings above 5 are rejected
    pub fn with_min_rating(mut self, rating: u8) -> QueryResult<Self> {
        if rating > 5 {
            return Err(ValidationError::invalid_rating("minRating", i64::from(rating)));
        }
        self.min_rating = (rating > 0).then_some(rating);
        Ok(self)
    }

    pub fn with_search(mut self, term: &str) -> Self {
        self.search_term = (!term.is_empty()).then(|| term.to_lowercase());
        self
    }

    pub fn with_flags(mut self, flags: BookingFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Number of active criteria, used for logging
    pub fn active_criteria(&self) -> usize {
        [
            self.status.is_some(),
            self.category.is_some(),
            self.provider.is_some(),
            self.transaction_type.is_some(),
            self.payment_status.is_some(),
            self.date_range != DateWindow::All,
            self.amount_range.is_some(),
            self.min_rating.is_some(),
            self.search_term.is_some(),
            self.flags.has_review,
            self.flags.is_recurring,
            self.flags.is_emergency,
            self.flags.has_discount,
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }
}
