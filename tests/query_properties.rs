//! Query Property Tests
//!
//! Tests for query engine invariants over a generated mixed collection:
//! - Every view record satisfies every active criterion
//! - Every excluded record fails at least one criterion
//! - Statistics never depend on filters or sort order
//! - Repeated runs give identical results
//! - Empty collections never fail

use chrono::{DateTime, Duration, TimeZone, Utc};
use recordlens::executor::{PredicateFilter, QueryEngine, RecordComparator};
use recordlens::model::{
    BookingDetails, BookingStatus, PaymentStatus, Record, TransactionDetails, TransactionStatus,
    TransactionType, UrgencyLevel,
};
use recordlens::query::{
    AmountRange, BookingFlags, DateWindow, QueryDescriptor, SortKey, SortSpec, TypeFilter,
};
use std::cmp::Ordering;

// =============================================================================
// Helper Functions
// =============================================================================

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, 15, 9, 30, 0).unwrap()
}

const BOOKING_STATUSES: [BookingStatus; 4] = [
    BookingStatus::Completed,
    BookingStatus::Pending,
    BookingStatus::Confirmed,
    BookingStatus::Cancelled,
];

const TRANSACTION_STATUSES: [TransactionStatus; 4] = [
    TransactionStatus::Completed,
    TransactionStatus::Pending,
    TransactionStatus::Failed,
    TransactionStatus::Processing,
];

const CATEGORIES: [&str; 3] = ["cleaning", "plumbing", "electrical"];
const PROVIDERS: [&str; 3] = ["SparkleHome", "FixIt", "Volt"];
const METHODS: [&str; 3] = ["UPI", "Card", "Wallet"];

/// Deterministic mixed collection with repeated keys and timestamps.
fn collection() -> Vec<Record> {
    let mut records = Vec::new();

    for i in 0..40usize {
        let at = now() - Duration::days((i % 20) as i64 * 3);

        if i % 2 == 0 {
            let status = BOOKING_STATUSES[(i / 2) % 4];
            let mut details =
                BookingDetails::new(format!("Service {}", i % 5), PROVIDERS[i % 3], CATEGORIES[i % 3])
                    .with_urgency(match (i / 2) % 4 {
                        0 => UrgencyLevel::Low,
                        1 => UrgencyLevel::Medium,
                        2 => UrgencyLevel::High,
                        _ => UrgencyLevel::Emergency,
                    })
                    .with_payment_status(if i % 6 == 0 {
                        PaymentStatus::Refunded
                    } else {
                        PaymentStatus::Paid
                    });
            if status == BookingStatus::Completed {
                details = details.with_rating((i % 5) as u8 + 1);
            }
            if i % 3 == 0 {
                details = details.with_review("Good work").with_discount(25.0);
            }
            if i % 5 == 0 {
                details = details.recurring();
            }

            records.push(
                Record::booking(format!("b{}", i), at, status, (i * 37 % 900) as f64, details)
                    .unwrap(),
            );
        } else {
            let amount = if i % 5 == 0 {
                -((i * 13) as f64)
            } else {
                (i * 29 % 700) as f64
            };
            let mut details = TransactionDetails::new(format!("Invoice {}", i), METHODS[i % 3]);
            if i % 7 == 0 {
                details = details.with_type(TransactionType::Fee).with_fees(4.5);
            }
            if i % 9 == 0 {
                details = details.with_merchant(PROVIDERS[i % 3]);
            }

            records.push(
                Record::transaction(
                    format!("t{}", i),
                    at,
                    TRANSACTION_STATUSES[(i / 2) % 4],
                    amount,
                    details,
                )
                .unwrap(),
            );
        }
    }

    records
}

fn descriptors() -> Vec<QueryDescriptor> {
    vec![
        QueryDescriptor::new(),
        QueryDescriptor::new().with_status(BookingStatus::Completed),
        QueryDescriptor::new()
            .with_status(TransactionStatus::Pending)
            .with_sort(SortSpec::asc(SortKey::Amount)),
        QueryDescriptor::new()
            .with_category("plumbing")
            .with_date_range(DateWindow::Month),
        QueryDescriptor::new()
            .with_provider("FixIt")
            .with_sort(SortSpec::desc(SortKey::Provider)),
        QueryDescriptor::new()
            .with_type(TypeFilter::Refunds)
            .with_sort(SortSpec::desc(SortKey::Amount)),
        QueryDescriptor::new()
            .with_type(TypeFilter::Fees)
            .with_date_range(DateWindow::Week),
        QueryDescriptor::new()
            .with_payment_status(PaymentStatus::Refunded)
            .with_sort(SortSpec::asc(SortKey::Status)),
        QueryDescriptor::new()
            .with_amount_range(AmountRange::new(100.0, 500.0).unwrap())
            .with_sort(SortSpec::asc(SortKey::Timestamp)),
        QueryDescriptor::new()
            .with_amount_range(AmountRange::new(200.0, 0.0).unwrap())
            .with_date_range(DateWindow::Quarter),
        QueryDescriptor::new()
            .with_min_rating(3)
            .unwrap()
            .with_sort(SortSpec::desc(SortKey::Rating)),
        QueryDescriptor::new()
            .with_search("service 2")
            .with_sort(SortSpec::desc(SortKey::Urgency)),
        QueryDescriptor::new().with_search("invoice").with_date_range(DateWindow::Year),
        QueryDescriptor::new()
            .with_flags(BookingFlags {
                has_review: true,
                has_discount: true,
                ..Default::default()
            })
            .with_sort(SortSpec::asc(SortKey::Type)),
        QueryDescriptor::new()
            .with_flags(BookingFlags {
                is_recurring: true,
                is_emergency: true,
                ..Default::default()
            })
            .with_date_range(DateWindow::Today),
    ]
}

fn window_start(descriptor: &QueryDescriptor) -> Option<DateTime<Utc>> {
    descriptor
        .date_range
        .start(now(), chrono::Offset::fix(&Utc))
}

// =============================================================================
// Filter Conjunction Tests
// =============================================================================

/// View records satisfy every criterion; excluded records fail at least one.
#[test]
fn test_filter_conjunction() {
    let records = collection();
    let engine = QueryEngine::default();

    for descriptor in descriptors() {
        let result = engine.run_at(&records, &descriptor, now()).unwrap();
        let criteria = PredicateFilter::compile(&descriptor, window_start(&descriptor));
        let view_ids = result.ids();

        for record in &records {
            let passes_all = criteria.iter().all(|c| c.matches(record));
            let in_view = view_ids.contains(&record.id());
            assert_eq!(
                passes_all,
                in_view,
                "record {} under {:?}",
                record.id(),
                descriptor
            );

            if !in_view {
                assert!(criteria.iter().any(|c| !c.matches(record)));
            }
        }
    }
}

/// Empty descriptor returns every record.
#[test]
fn test_unrestricted_view_is_complete() {
    let records = collection();
    let engine = QueryEngine::default();

    let result = engine.run_at(&records, &QueryDescriptor::new(), now()).unwrap();
    assert_eq!(result.len(), records.len());
}

// =============================================================================
// Sort Tests
// =============================================================================

/// Adjacent view records are ordered, and equal keys keep input order.
#[test]
fn test_sort_order_and_stability() {
    let records = collection();
    let engine = QueryEngine::default();
    let position = |id: &str| records.iter().position(|r| r.id() == id).unwrap();

    for descriptor in descriptors() {
        let result = engine.run_at(&records, &descriptor, now()).unwrap();

        for pair in result.view.windows(2) {
            match RecordComparator::compare(pair[0], pair[1], descriptor.sort) {
                Ordering::Less => {}
                Ordering::Equal => assert!(position(pair[0].id()) < position(pair[1].id())),
                Ordering::Greater => panic!(
                    "{} sorted before {} under {:?}",
                    pair[0].id(),
                    pair[1].id(),
                    descriptor.sort
                ),
            }
        }
    }
}

// =============================================================================
// Aggregate Tests
// =============================================================================

/// Statistics are identical for every descriptor.
#[test]
fn test_stats_independent_of_descriptor() {
    let records = collection();
    let engine = QueryEngine::default();
    let baseline = engine
        .run_at(&records, &QueryDescriptor::new(), now())
        .unwrap()
        .stats;

    for descriptor in descriptors() {
        let result = engine.run_at(&records, &descriptor, now()).unwrap();
        assert_eq!(result.stats, baseline);
    }
}

/// Status counts add up to the collection size.
#[test]
fn test_status_counts_cover_collection() {
    let records = collection();
    let engine = QueryEngine::default();

    let stats = engine
        .run_at(&records, &QueryDescriptor::new(), now())
        .unwrap()
        .stats;
    assert_eq!(stats.total_count, records.len());
    assert_eq!(stats.count_by_status.values().sum::<usize>(), records.len());
    assert!(stats.bookings.is_some());
    assert!(stats.transactions.is_some());
}

// =============================================================================
// Determinism Tests
// =============================================================================

/// Same collection and descriptor give identical results.
#[test]
fn test_idempotent_runs() {
    let records = collection();
    let engine = QueryEngine::default();

    for descriptor in descriptors() {
        let first = engine.run_at(&records, &descriptor, now()).unwrap();
        let second = engine.run_at(&records, &descriptor, now()).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

/// Running a query leaves the collection untouched.
#[test]
fn test_collection_not_mutated() {
    let records = collection();
    let before = records.clone();
    let engine = QueryEngine::default();

    for descriptor in descriptors() {
        engine.run_at(&records, &descriptor, now()).unwrap();
    }
    assert_eq!(records, before);
}

// =============================================================================
// Empty Input Tests
// =============================================================================

/// Every descriptor runs over an empty collection.
#[test]
fn test_empty_collection() {
    let engine = QueryEngine::default();

    for descriptor in descriptors() {
        let result = engine.run_at(&[], &descriptor, now()).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.stats.total_count, 0);
        assert_eq!(result.stats.sum, 0.0);
        assert_eq!(result.stats.average_abs_amount, 0.0);
        assert_eq!(result.stats.mode_of_field, None);
    }
}
