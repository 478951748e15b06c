//! Predicate filtering for query execution
//!
//! A descriptor compiles into a list of criteria, one per active field.
//! A record matches when every criterion matches (AND). Inactive fields
//! compile to nothing and so never restrict.

use chrono::{DateTime, Utc};

use crate::model::{PaymentStatus, Record, UrgencyLevel};
use crate::query::{AmountRange, QueryDescriptor, StatusFilter, TypeFilter};

/// One active filter condition
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion<'q> {
    Status(StatusFilter),
    Category(&'q str),
    Provider(&'q str),
    Type(TypeFilter),
    PaymentStatus(PaymentStatus),
    /// Inclusive lower bound on the timestamp
    Since(DateTime<Utc>),
    Amount(AmountRange),
    MinRating(u8),
    /// Case-folded term matched against the record's search text
    Search(&'q str),
    HasReview,
    IsRecurring,
    IsEmergency,
    HasDiscount,
}

impl Criterion<'_> {
    /// Descriptor field this criterion came from
    pub fn field(&self) -> &'static str {
        match self {
            Criterion::Status(_) => "statusFilter",
            Criterion::Category(_) => "categoryFilter",
            Criterion::Provider(_) => "providerFilter",
            Criterion::Type(_) => "typeFilter",
            Criterion::PaymentStatus(_) => "paymentStatusFilter",
            Criterion::Since(_) => "dateRange",
            Criterion::Amount(_) => "amountRange",
            Criterion::MinRating(_) => "minRating",
            Criterion::Search(_) => "searchTerm",
            Criterion::HasReview => "hasReview",
            Criterion::IsRecurring => "isRecurring",
            Criterion::IsEmergency => "isEmergency",
            Criterion::HasDiscount => "hasDiscount",
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Criterion::Status(filter) => filter.matches(record.status()),
            Criterion::Category(category) => record.category() == *category,
            Criterion::Provider(provider) => record.provider() == *provider,
            // Bookings carry no type
            Criterion::Type(filter) => record
                .transaction_type()
                .is_some_and(|t| filter.matches(t)),
            Criterion::PaymentStatus(status) => record
                .booking_details()
                .and_then(|b| b.payment_status)
                .is_some_and(|p| p == *status),
            Criterion::Since(start) => record.timestamp() >= *start,
            Criterion::Amount(range) => range.contains(record.amount()),
            Criterion::MinRating(min) => record.rating().is_some_and(|r| r >= *min),
            Criterion::Search(term) => record.searchable_text().contains(term),
            Criterion::HasReview => record.booking_details().is_some_and(|b| b.has_review()),
            Criterion::IsRecurring => record.booking_details().is_some_and(|b| b.recurring),
            Criterion::IsEmergency => record.urgency() == Some(UrgencyLevel::Emergency),
            Criterion::HasDiscount => record
                .booking_details()
                .is_some_and(|b| b.has_discount()),
        }
    }
}

/// Evaluates descriptors against records
pub struct PredicateFilter;

impl PredicateFilter {
    /// Compiles the active fields of a descriptor.
    ///
    /// `window_start` is the resolved start of the descriptor's date window.
    pub fn compile(
        descriptor: &QueryDescriptor,
        window_start: Option<DateTime<Utc>>,
    ) -> Vec<Criterion<'_>> {
        let mut criteria = Vec::new();

        if let Some(status) = descriptor.status {
            criteria.push(Criterion::Status(status));
        }
        if let Some(category) = descriptor.category.as_deref() {
            criteria.push(Criterion::Category(category));
        }
        if let Some(provider) = descriptor.provider.as_deref() {
            criteria.push(Criterion::Provider(provider));
        }
        if let Some(filter) = descriptor.transaction_type {
            criteria.push(Criterion::Type(filter));
        }
        if let Some(status) = descriptor.payment_status {
            criteria.push(Criterion::PaymentStatus(status));
        }
        if let Some(start) = window_start {
            criteria.push(Criterion::Since(start));
        }
        if let Some(range) = descriptor.amount_range {
            criteria.push(Criterion::Amount(range));
        }
        if let Some(min) = descriptor.min_rating {
            criteria.push(Criterion::MinRating(min));
        }
        if let Some(term) = descriptor.search_term.as_deref() {
            criteria.push(Criterion::Search(term));
        }

        let flags = descriptor.flags;
        if flags.has_review {
            criteria.push(Criterion::HasReview);
        }
        if flags.is_recurring {
            criteria.push(Criterion::IsRecurring);
        }
        if flags.is_emergency {
            criteria.push(Criterion::IsEmergency);
        }
        if flags.has_discount {
            criteria.push(Criterion::HasDiscount);
        }

        criteria
    }

    /// Checks if a record matches all criteria
    pub fn matches(record: &Record, criteria: &[Criterion<'_>]) -> bool {
        criteria.iter().all(|criterion| criterion.matches(record))
    }

    /// Compiles and evaluates in one step
    pub fn matches_descriptor(
        record: &Record,
        descriptor: &QueryDescriptor,
        window_start: Option<DateTime<Utc>>,
    ) -> bool {
        Self::matches(record, &Self::compile(descriptor, window_start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BookingDetails, BookingStatus, TransactionDetails, TransactionStatus, TransactionType,
    };
    use crate::query::BookingFlags;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, day, 9, 30, 0).unwrap()
    }

    fn payment(id: &str, amount: f64) -> Record {
        Record::transaction(
            id,
            at(10),
            TransactionStatus::Completed,
            amount,
            TransactionDetails::new("Electricity bill", "UPI").with_merchant("PowerCo"),
        )
        .unwrap()
    }

    fn plumbing(id: &str) -> Record {
        Record::booking(
            id,
            at(12),
            BookingStatus::Completed,
            800.0,
            BookingDetails::new("Leak repair", "AquaFix", "plumbing")
                .with_rating(4)
                .with_review("quick and tidy")
                .with_discount(50.0)
                .with_payment_status(PaymentStatus::Paid)
                .with_urgency(UrgencyLevel::Emergency),
        )
        .unwrap()
    }

    fn matches(record: &Record, descriptor: &QueryDescriptor) -> bool {
        PredicateFilter::matches_descriptor(record, descriptor, None)
    }

    #[test]
    fn test_empty_descriptor_matches_everything() {
        let descriptor = QueryDescriptor::new();
        assert!(PredicateFilter::compile(&descriptor, None).is_empty());
        assert!(matches(&payment("t1", 10.0), &descriptor));
        assert!(matches(&plumbing("b1"), &descriptor));
    }

    #[test]
    fn test_status_and_category() {
        let record = plumbing("b1");
        assert!(matches(
            &record,
            &QueryDescriptor::new().with_status(BookingStatus::Completed)
        ));
        assert!(!matches(
            &record,
            &QueryDescriptor::new().with_status(BookingStatus::Pending)
        ));
        assert!(matches(&record, &QueryDescriptor::new().with_category("plumbing")));
        assert!(!matches(&record, &QueryDescriptor::new().with_category("Plumbing")));
    }

    #[test]
    fn test_shared_status_label_matches_both_kinds() {
        let descriptor = QueryDescriptor::new().with_status(TransactionStatus::Completed);
        assert!(matches(&payment("t1", 10.0), &descriptor));
        assert!(matches(&plumbing("b1"), &descriptor));
    }

    #[test]
    fn test_amount_uses_absolute_value() {
        let refund = payment("t1", -40.0);
        let range = AmountRange::new(30.0, 50.0).unwrap();
        assert!(matches(&refund, &QueryDescriptor::new().with_amount_range(range)));

        let open = AmountRange::new(100.0, 0.0).unwrap();
        assert!(!matches(&refund, &QueryDescriptor::new().with_amount_range(open)));
        assert!(matches(&plumbing("b"), &QueryDescriptor::new().with_amount_range(open)));
    }

    #[test]
    fn test_min_rating_requires_rating() {
        let descriptor = QueryDescriptor::new().with_min_rating(3).unwrap();
        assert!(matches(&plumbing("b1"), &descriptor));
        assert!(!matches(&payment("t1", 10.0), &descriptor));

        let higher = QueryDescriptor::new().with_min_rating(5).unwrap();
        assert!(!matches(&plumbing("b1"), &higher));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let record = payment("TX-1", 10.0);
        assert!(matches(&record, &QueryDescriptor::new().with_search("POWERco")));
        assert!(matches(&record, &QueryDescriptor::new().with_search("tx-1")));
        assert!(!matches(&record, &QueryDescriptor::new().with_search("water")));
    }

    #[test]
    fn test_date_window_is_inclusive() {
        let record = payment("t1", 10.0);
        assert!(PredicateFilter::matches_descriptor(
            &record,
            &QueryDescriptor::new(),
            Some(at(10))
        ));
        assert!(!PredicateFilter::matches_descriptor(
            &record,
            &QueryDescriptor::new(),
            Some(at(11))
        ));
    }

    #[test]
    fn test_kind_specific_filters() {
        let booking = plumbing("b1");
        let tx = payment("t1", 10.0);

        let by_type = QueryDescriptor::new().with_type(TypeFilter::Payments);
        assert!(matches(&tx, &by_type));
        assert!(!matches(&booking, &by_type));

        let by_payment = QueryDescriptor::new().with_payment_status(PaymentStatus::Paid);
        assert!(matches(&booking, &by_payment));
        assert!(!matches(&tx, &by_payment));

        let flags = QueryDescriptor::new().with_flags(BookingFlags {
            has_review: true,
            is_recurring: false,
            is_emergency: true,
            has_discount: true,
        });
        assert!(matches(&booking, &flags));
        assert!(!matches(&tx, &flags));
    }

    #[test]
    fn test_type_filter_groups_rewards() {
        let cashback = Record::transaction(
            "t9",
            at(3),
            TransactionStatus::Completed,
            25.0,
            TransactionDetails::new("Cashback", "Wallet").with_type(TransactionType::Cashback),
        )
        .unwrap();
        assert!(matches(&cashback, &QueryDescriptor::new().with_type(TypeFilter::Rewards)));
        assert!(!matches(&cashback, &QueryDescriptor::new().with_type(TypeFilter::Payments)));
    }

    #[test]
    fn test_all_criteria_must_match() {
        let record = plumbing("b1");
        let descriptor = QueryDescriptor::new()
            .with_category("plumbing")
            .with_provider("AquaFix")
            .with_search("leak");
        assert!(matches(&record, &descriptor));

        let descriptor = descriptor.with_provider("VoltWorks");
        let criteria = PredicateFilter::compile(&descriptor, None);
        assert_eq!(criteria.len(), 3);
        let failing: Vec<_> = criteria
            .iter()
            .filter(|c| !c.matches(&record))
            .map(Criterion::field)
            .collect();
        assert_eq!(failing, vec!["providerFilter"]);
        assert!(!PredicateFilter::matches(&record, &criteria));
    }
}
