//! Record representation shared by bookings and transactions
//!
//! A record is a base field set plus a kind-specific extension. The kind is
//! carried by the extension variant and never inferred from field shapes.
//! Records are immutable once built; the search text is computed at
//! construction and stays in sync with the fields it was derived from.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::details::{BookingDetails, TransactionDetails};
use super::errors::{ModelError, ModelResult};
use super::status::{
    BookingStatus, RecordKind, RecordStatus, TransactionStatus, TransactionType, UrgencyLevel,
};

/// Status and extension, paired by kind
#[derive(Debug, Clone, PartialEq)]
enum Body {
    Booking(BookingStatus, BookingDetails),
    Transaction(TransactionStatus, TransactionDetails),
}

/// A single booking or transaction entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RecordWire", try_from = "RecordWire")]
pub struct Record {
    id: String,
    timestamp: DateTime<Utc>,
    amount: f64,
    tags: BTreeSet<String>,
    body: Body,
    searchable_text: String,
}

impl Record {
    /// Builds a booking record.
    ///
    /// Rejects negative amounts, ratings outside 1-5, and ratings on
    /// bookings that are not completed.
    pub fn booking(
        id: impl Into<String>,
        timestamp: DateTime<Utc>,
        status: BookingStatus,
        amount: f64,
        details: BookingDetails,
    ) -> ModelResult<Self> {
        let id = id.into();
        check_base(&id, amount)?;

        if amount < 0.0 {
            return Err(ModelError::NegativeBookingAmount { id, amount });
        }

        if let Some(rating) = details.rating {
            if !(1..=5).contains(&rating) {
                return Err(ModelError::RatingOutOfRange { id, rating });
            }
            if status != BookingStatus::Completed {
                return Err(ModelError::RatingNotAllowed {
                    id,
                    status: status.as_str(),
                });
            }
        }

        check_money(&id, "discount_applied", details.discount_applied)?;
        check_money(&id, "refund_amount", details.refund_amount)?;

        let searchable_text = fold_text(
            [
                Some(details.service_name.as_str()),
                Some(details.provider_name.as_str()),
                Some(id.as_str()),
                Some(details.address.as_str()),
                details.professional_name.as_deref(),
                Some(details.description.as_str()),
            ]
            .into_iter()
            .flatten(),
        );

        Ok(Self {
            id,
            timestamp,
            amount,
            tags: BTreeSet::new(),
            body: Body::Booking(status, details),
            searchable_text,
        })
    }

    /// Builds a transaction record. Negative amounts are refunds.
    pub fn transaction(
        id: impl Into<String>,
        timestamp: DateTime<Utc>,
        status: TransactionStatus,
        amount: f64,
        details: TransactionDetails,
    ) -> ModelResult<Self> {
        let id = id.into();
        check_base(&id, amount)?;
        check_money(&id, "fees_total", details.fees_total)?;
        check_money(&id, "cashback", details.cashback)?;

        let searchable_text = fold_text(
            [
                Some(details.description.as_str()),
                Some(id.as_str()),
                Some(details.method.as_str()),
                details.booking_id.as_deref(),
                details.invoice_id.as_deref(),
                details.merchant_name.as_deref(),
            ]
            .into_iter()
            .flatten(),
        );

        Ok(Self {
            id,
            timestamp,
            amount,
            tags: BTreeSet::new(),
            body: Body::Transaction(status, details),
            searchable_text,
        })
    }

    /// Attaches labels to the record
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> RecordKind {
        match &self.body {
            Body::Booking(..) => RecordKind::Booking,
            Body::Transaction(..) => RecordKind::Transaction,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn status(&self) -> RecordStatus {
        match &self.body {
            Body::Booking(status, _) => RecordStatus::Booking(*status),
            Body::Transaction(status, _) => RecordStatus::Transaction(*status),
        }
    }

    /// Signed amount; refunds are negative on transactions
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Booking category, or the payment method for transactions
    pub fn category(&self) -> &str {
        match &self.body {
            Body::Booking(_, b) => &b.category,
            Body::Transaction(_, t) => &t.method,
        }
    }

    /// Provider name for bookings, merchant name for transactions
    pub fn provider(&self) -> &str {
        match &self.body {
            Body::Booking(_, b) => &b.provider_name,
            Body::Transaction(_, t) => t.merchant_name.as_deref().unwrap_or(""),
        }
    }

    pub fn rating(&self) -> Option<u8> {
        self.booking_details().and_then(|b| b.rating)
    }

    pub fn urgency(&self) -> Option<UrgencyLevel> {
        self.booking_details().map(|b| b.urgency)
    }

    /// Recorded or inferred transaction type; `None` for bookings
    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.transaction_details()
            .map(|t| t.transaction_type.unwrap_or_else(|| TransactionType::infer(self.amount)))
    }

    pub fn booking_details(&self) -> Option<&BookingDetails> {
        match &self.body {
            Body::Booking(_, b) => Some(b),
            Body::Transaction(..) => None,
        }
    }

    pub fn transaction_details(&self) -> Option<&TransactionDetails> {
        match &self.body {
            Body::Transaction(_, t) => Some(t),
            Body::Booking(..) => None,
        }
    }

    /// Lowercased concatenation of the human-readable fields
    pub fn searchable_text(&self) -> &str {
        &self.searchable_text
    }
}

/// Checks that every id in the collection is distinct
pub fn ensure_unique_ids(records: &[Record]) -> ModelResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(ModelError::DuplicateId(record.id().to_string()));
        }
    }
    Ok(())
}

fn check_base(id: &str, amount: f64) -> ModelResult<()> {
    if id.is_empty() {
        return Err(ModelError::EmptyId);
    }
    if !amount.is_finite() {
        return Err(ModelError::NonFiniteAmount { id: id.to_string() });
    }
    Ok(())
}

fn check_money(id: &str, field: &'static str, value: Option<f64>) -> ModelResult<()> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(ModelError::InvalidMoneyField {
            id: id.to_string(),
            field,
            value: v,
        }),
        _ => Ok(()),
    }
}

fn fold_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let mut text = String::with_capacity(128);
    for part in parts.filter(|p| !p.is_empty()) {
        if !text.is_empty() {
            // Separator keeps a term from matching across two fields
            text.push('\u{1f}');
        }
        text.push_str(&part.to_lowercase());
    }
    text
}

/// JSON shape of a record, tagged by `kind`
#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RecordWire {
    Booking {
        id: String,
        timestamp: DateTime<Utc>,
        status: BookingStatus,
        amount: f64,
        #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
        tags: BTreeSet<String>,
        #[serde(flatten)]
        details: BookingDetails,
    },
    Transaction {
        id: String,
        timestamp: DateTime<Utc>,
        status: TransactionStatus,
        amount: f64,
        #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
        tags: BTreeSet<String>,
        #[serde(flatten)]
        details: TransactionDetails,
    },
}

impl TryFrom<RecordWire> for Record {
    type Error = ModelError;

    fn try_from(wire: RecordWire) -> Result<Self, Self::Error> {
        match wire {
            RecordWire::Booking {
                id,
                timestamp,
                status,
                amount,
                tags,
                details,
            } => Ok(Record::booking(id, timestamp, status, amount, details)?.with_tags(tags)),
            RecordWire::Transaction {
                id,
                timestamp,
                status,
                amount,
                tags,
                details,
            } => Ok(Record::transaction(id, timestamp, status, amount, details)?.with_tags(tags)),
        }
    }
}

impl From<Record> for RecordWire {
    fn from(record: Record) -> Self {
        let Record {
            id,
            timestamp,
            amount,
            tags,
            body,
            ..
        } = record;

        match body {
            Body::Booking(status, details) => RecordWire::Booking {
                id,
                timestamp,
                status,
                amount,
                tags,
                details,
            },
            Body::Transaction(status, details) => RecordWire::Transaction {
                id,
                timestamp,
                status,
                amount,
                tags,
                details,
            },
        }
    }
}
