//! Query engine for recordlens
//!
//! Execution flow (strict order):
//! 1. Check the collection against the record cap
//! 2. Resolve the date window against "now"
//! 3. Filter records by every active criterion
//! 4. Stable-sort the matches
//! 5. Aggregate over the full, unfiltered collection
//! 6. Return view and statistics
//!
//! The engine holds no per-query state; the same collection and descriptor
//! always give the same result.

use chrono::{DateTime, Utc};

use crate::config::EngineConfig;
use crate::model::Record;
use crate::observability::{log_event_with_fields, Event, Logger, MetricsRegistry, Timer};
use crate::query::{QueryDescriptor, QueryResult, RawDescriptor};

use super::errors::{ExecutorError, ExecutorResult};
use super::filters::PredicateFilter;
use super::result::ExecutionResult;
use super::sorter::ResultSorter;

/// Runs descriptors against record collections
#[derive(Debug, Default)]
pub struct QueryEngine {
    config: EngineConfig,
    metrics: MetricsRegistry,
}

impl QueryEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            metrics: MetricsRegistry::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Runs a query anchored to the current time
    pub fn run<'a>(
        &self,
        records: &'a [Record],
        descriptor: &QueryDescriptor,
    ) -> ExecutorResult<ExecutionResult<'a>> {
        self.run_at(records, descriptor, Utc::now())
    }

    /// Validates a wire descriptor, then runs it
    pub fn run_raw<'a>(
        &self,
        records: &'a [Record],
        raw: &RawDescriptor,
    ) -> ExecutorResult<ExecutionResult<'a>> {
        let descriptor = self.admit(raw.validate())?;
        self.run(records, &descriptor)
    }

    /// Accepts a parsed descriptor, recording a rejection when parsing failed
    pub fn admit(&self, parsed: QueryResult<QueryDescriptor>) -> ExecutorResult<QueryDescriptor> {
        parsed.map_err(|err| self.reject(err.into()))
    }

    /// Runs a query with an explicit "now" for date windows and the current period
    pub fn run_at<'a>(
        &self,
        records: &'a [Record],
        descriptor: &QueryDescriptor,
        now: DateTime<Utc>,
    ) -> ExecutorResult<ExecutionResult<'a>> {
        if records.len() > self.config.max_records {
            return Err(self.reject(ExecutorError::execution_limit(
                records.len(),
                self.config.max_records,
            )));
        }

        let timer = Timer::new();
        let criteria_count = descriptor.active_criteria().to_string();
        Logger::trace(
            Event::QueryReceived.as_str(),
            &[
                ("criteria", criteria_count.as_str()),
                ("records", records.len().to_string().as_str()),
                ("sort", descriptor.sort.key.as_str()),
                ("direction", descriptor.sort.direction.as_str()),
            ],
        );

        let window_start = descriptor.date_range.start(now, self.config.utc_offset);
        let criteria = PredicateFilter::compile(descriptor, window_start);

        let mut view: Vec<&'a Record> = records
            .iter()
            .filter(|record| PredicateFilter::matches(record, &criteria))
            .collect();
        ResultSorter::sort(&mut view, descriptor.sort);

        let stats = self.config.aggregator().aggregate_at(records, now);
        Logger::trace(
            Event::AggregateComplete.as_str(),
            &[("total", stats.total_count.to_string().as_str())],
        );

        self.metrics.increment_queries_executed();
        self.metrics.add_records_scanned(records.len() as u64);
        self.metrics.add_records_returned(view.len() as u64);

        log_event_with_fields(
            Event::QueryExecuted,
            &[
                ("criteria", criteria_count.as_str()),
                ("scanned", records.len().to_string().as_str()),
                ("view", view.len().to_string().as_str()),
                ("elapsed_ms", timer.elapsed_ms().as_str()),
            ],
        );

        Ok(ExecutionResult {
            view,
            stats,
            scanned_count: records.len(),
        })
    }

    fn reject(&self, err: ExecutorError) -> ExecutorError {
        self.metrics.increment_queries_rejected();
        log_event_with_fields(
            Event::QueryRejected,
            &[
                ("code", err.detail_code()),
                ("field", err.field().unwrap_or("")),
                ("reason", err.message()),
            ],
        );
        err
    }
}
