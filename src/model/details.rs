//! Kind-specific record extensions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::{PaymentStatus, TransactionType, UrgencyLevel};

/// Fields only bookings carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingDetails {
    pub service_name: String,
    pub provider_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_name: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub urgency: UrgencyLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    /// 1-5, only on completed bookings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_applied: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_amount: Option<f64>,
    #[serde(default)]
    pub loyalty_points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_arrival: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_arrival: Option<DateTime<Utc>>,
}

impl BookingDetails {
    pub fn new(
        service_name: impl Into<String>,
        provider_name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            provider_name: provider_name.into(),
            professional_name: None,
            address: String::new(),
            description: String::new(),
            category: category.into(),
            urgency: UrgencyLevel::default(),
            payment_status: None,
            rating: None,
            review: None,
            recurring: false,
            discount_applied: None,
            refund_amount: None,
            loyalty_points: 0,
            estimated_arrival: None,
            actual_arrival: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_professional(mut self, name: impl Into<String>) -> Self {
        self.professional_name = Some(name.into());
        self
    }

    pub fn with_urgency(mut self, urgency: UrgencyLevel) -> Self {
        self.urgency = urgency;
        self
    }

    pub fn with_payment_status(mut self, status: PaymentStatus) -> Self {
        self.payment_status = Some(status);
        self
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_review(mut self, review: impl Into<String>) -> Self {
        self.review = Some(review.into());
        self
    }

    pub fn recurring(mut self) -> Self {
        self.recurring = true;
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount_applied = Some(discount);
        self
    }

    pub fn with_refund(mut self, refund: f64) -> Self {
        self.refund_amount = Some(refund);
        self
    }

    pub fn with_loyalty_points(mut self, points: u32) -> Self {
        self.loyalty_points = points;
        self
    }

    pub fn with_arrival(mut self, estimated: DateTime<Utc>, actual: DateTime<Utc>) -> Self {
        self.estimated_arrival = Some(estimated);
        self.actual_arrival = Some(actual);
        self
    }

    /// A discount of zero does not count as a discount
    pub fn has_discount(&self) -> bool {
        self.discount_applied.is_some_and(|d| d > 0.0)
    }

    /// Review text must be non-empty to count
    pub fn has_review(&self) -> bool {
        self.review.as_deref().is_some_and(|r| !r.is_empty())
    }

    /// Arrived no later than estimated; unknown arrivals are not on time
    pub fn arrived_on_time(&self) -> bool {
        match (self.actual_arrival, self.estimated_arrival) {
            (Some(actual), Some(estimated)) => actual <= estimated,
            _ => false,
        }
    }
}

/// Fields only payment transactions carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDetails {
    #[serde(default)]
    pub description: String,
    pub method: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees_total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashback: Option<f64>,
    #[serde(default)]
    pub international: bool,
    #[serde(default)]
    pub installment: bool,
}

impl TransactionDetails {
    pub fn new(description: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            method: method.into(),
            transaction_type: None,
            merchant_name: None,
            booking_id: None,
            invoice_id: None,
            fees_total: None,
            cashback: None,
            international: false,
            installment: false,
        }
    }

    pub fn with_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    pub fn with_merchant(mut self, name: impl Into<String>) -> Self {
        self.merchant_name = Some(name.into());
        self
    }

    pub fn with_booking(mut self, booking_id: impl Into<String>) -> Self {
        self.booking_id = Some(booking_id.into());
        self
    }

    pub fn with_invoice(mut self, invoice_id: impl Into<String>) -> Self {
        self.invoice_id = Some(invoice_id.into());
        self
    }

    pub fn with_fees(mut self, total: f64) -> Self {
        self.fees_total = Some(total);
        self
    }

    pub fn with_cashback(mut self, cashback: f64) -> Self {
        self.cashback = Some(cashback);
        self
    }

    pub fn international(mut self) -> Self {
        self.international = true;
        self
    }

    pub fn installment(mut self) -> Self {
        self.installment = true;
        self
    }
}
