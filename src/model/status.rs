//! Status and classification enumerations
//!
//! Every enumeration here is closed. Parsing an unknown label fails rather
//! than producing a catch-all variant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Record type discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Booking,
    Transaction,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Booking => "booking",
            RecordKind::Transaction => "transaction",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    Rescheduled,
    NoShow,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 7] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::InProgress,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
        BookingStatus::Rescheduled,
        BookingStatus::NoShow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Rescheduled => "rescheduled",
            BookingStatus::NoShow => "no_show",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|st| st.as_str() == s).ok_or(())
    }
}

/// Lifecycle status of a payment transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
    Processing,
    Cancelled,
    Disputed,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 6] = [
        TransactionStatus::Completed,
        TransactionStatus::Pending,
        TransactionStatus::Failed,
        TransactionStatus::Processing,
        TransactionStatus::Cancelled,
        TransactionStatus::Disputed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Processing => "processing",
            TransactionStatus::Cancelled => "cancelled",
            TransactionStatus::Disputed => "disputed",
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|st| st.as_str() == s).ok_or(())
    }
}

/// Status of a record, tied to its kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordStatus {
    Booking(BookingStatus),
    Transaction(TransactionStatus),
}

impl RecordStatus {
    /// Returns the kind this status belongs to
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordStatus::Booking(_) => RecordKind::Booking,
            RecordStatus::Transaction(_) => RecordKind::Transaction,
        }
    }

    /// Returns the wire label
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Booking(s) => s.as_str(),
            RecordStatus::Transaction(s) => s.as_str(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.as_str() == "completed"
    }

    /// Resolves a label shared by any kind to its canonical static form.
    ///
    /// Labels such as `completed` exist for both kinds and resolve once.
    pub fn canonical_label(label: &str) -> Option<&'static str> {
        BookingStatus::ALL
            .iter()
            .map(BookingStatus::as_str)
            .chain(TransactionStatus::ALL.iter().map(TransactionStatus::as_str))
            .find(|l| *l == label)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking urgency, ranked by `rank()` for sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Low,
    #[default]
    Medium,
    High,
    Emergency,
}

impl UrgencyLevel {
    /// Ordinal used by the urgency sort key: emergency=4 > high=3 > medium=2 > low=1
    pub fn rank(&self) -> u8 {
        match self {
            UrgencyLevel::Low => 1,
            UrgencyLevel::Medium => 2,
            UrgencyLevel::High => 3,
            UrgencyLevel::Emergency => 4,
        }
    }
}

/// Settlement state of a booking payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
    PartiallyRefunded,
    Failed,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 5] = [
        PaymentStatus::Pending,
        PaymentStatus::Paid,
        PaymentStatus::Refunded,
        PaymentStatus::PartiallyRefunded,
        PaymentStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::PartiallyRefunded => "partially_refunded",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn is_refund(&self) -> bool {
        matches!(self, PaymentStatus::Refunded | PaymentStatus::PartiallyRefunded)
    }
}

impl FromStr for PaymentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|st| st.as_str() == s).ok_or(())
    }
}

/// Semantic type of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Payment,
    Refund,
    Chargeback,
    Dispute,
    Fee,
    Reward,
    Cashback,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Payment => "payment",
            TransactionType::Refund => "refund",
            TransactionType::Chargeback => "chargeback",
            TransactionType::Dispute => "dispute",
            TransactionType::Fee => "fee",
            TransactionType::Reward => "reward",
            TransactionType::Cashback => "cashback",
        }
    }

    /// Type assumed when the ledger did not record one
    pub fn infer(amount: f64) -> Self {
        if amount < 0.0 {
            TransactionType::Refund
        } else {
            TransactionType::Payment
        }
    }
}
