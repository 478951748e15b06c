//! Background hand-off for large collections
//!
//! The engine never awaits. These helpers move an owned collection onto
//! tokio's blocking pool so an async caller is not stalled by a long scan.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::model::Record;
use crate::observability::{Event, Logger};
use crate::query::QueryDescriptor;

use super::engine::QueryEngine;
use super::errors::{ExecutorError, ExecutorResult};
use super::result::OwnedExecutionResult;

/// Runs a query on the blocking pool anchored to the current time
pub async fn run_on_worker(
    engine: Arc<QueryEngine>,
    records: Arc<[Record]>,
    descriptor: QueryDescriptor,
) -> ExecutorResult<OwnedExecutionResult> {
    run_on_worker_at(engine, records, descriptor, Utc::now()).await
}

/// Runs a query on the blocking pool with an explicit "now"
pub async fn run_on_worker_at(
    engine: Arc<QueryEngine>,
    records: Arc<[Record]>,
    descriptor: QueryDescriptor,
    now: DateTime<Utc>,
) -> ExecutorResult<OwnedExecutionResult> {
    Logger::trace(
        Event::WorkerDispatched.as_str(),
        &[("records", records.len().to_string().as_str())],
    );

    tokio::task::spawn_blocking(move || {
        engine
            .run_at(&records, &descriptor, now)
            .map(|result| result.into_owned())
    })
    .await
    .map_err(|e| ExecutorError::execution_failed(format!("worker task failed: {}", e)))?
}
