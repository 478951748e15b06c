//! CLI command implementations
//!
//! Each command: load config, apply log level, load records, act, print one
//! JSON response. Failures print an error response and exit non-zero.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::config::Config;
use crate::executor::QueryEngine;
use crate::model::{ensure_unique_ids, Record, RecordKind};
use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::query::{parse_pairs, QueryDescriptor};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a command, reporting any failure as an error response
pub fn run_command(cmd: Command) -> CliResult<()> {
    let name = cmd.name();
    let scope = ObservationScope::with_fields("COMMAND", &[("command", name)]);

    let outcome = match cmd {
        Command::Query { config, params } => query(&config, &params),
        Command::Stats { config } => stats(&config),
        Command::Check { config } => check(&config),
    };

    match outcome {
        Ok(()) => {
            scope.complete();
            Ok(())
        }
        Err(err) => {
            scope.fail(err.code_str());
            write_error(&err)?;
            Err(err)
        }
    }
}

/// Run one query and print `{ view, stats }`
///
/// Uses `--param` pairs when given, else a descriptor line from stdin.
pub fn query(config_path: &Path, params: &[String]) -> CliResult<()> {
    let (config, engine) = load_engine(config_path)?;
    let records = load_records(&config, &engine)?;

    let parsed = if params.is_empty() {
        read_request()?.validate()
    } else {
        parse_pairs(params)
    };
    let descriptor = engine.admit(parsed)?;

    let result = engine.run(&records, &descriptor)?;
    write_response(serde_json::to_value(&result)?)
}

/// Print statistics over the whole collection
pub fn stats(config_path: &Path) -> CliResult<()> {
    let (config, engine) = load_engine(config_path)?;
    let records = load_records(&config, &engine)?;

    let result = engine.run(&records, &QueryDescriptor::new())?;
    write_response(serde_json::to_value(&result.stats)?)
}

/// Validate the configuration and records file
pub fn check(config_path: &Path) -> CliResult<()> {
    let (config, engine) = load_engine(config_path)?;
    let records = load_records(&config, &engine)?;

    let bookings = records
        .iter()
        .filter(|r| r.kind() == RecordKind::Booking)
        .count();

    write_response(json!({
        "records": records.len(),
        "bookings": bookings,
        "transactions": records.len() - bookings,
        "max_records": config.max_records,
        "within_limit": records.len() <= config.max_records,
    }))
}

fn load_engine(config_path: &Path) -> CliResult<(Config, QueryEngine)> {
    let config = Config::load(config_path)?;
    config.apply_logging()?;
    let engine = QueryEngine::new(config.engine_config()?);

    let records_path = config.records_path.to_string_lossy().into_owned();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("mode_field", config.mode_field.as_str()),
            ("records_path", records_path.as_str()),
        ],
    );

    Ok((config, engine))
}

/// Read, parse and validate the records file named by the config
pub fn load_records(config: &Config, engine: &QueryEngine) -> CliResult<Vec<Record>> {
    let path = config.records_path.to_string_lossy().into_owned();

    let content = fs::read_to_string(&config.records_path)
        .map_err(|e| CliError::io_error(format!("Failed to read records {}: {}", path, e)))?;

    let records: Vec<Record> = serde_json::from_str(&content).map_err(|e| {
        log_event_with_fields(Event::RecordsRejected, &[("path", path.as_str())]);
        CliError::invalid_records(format!("Invalid records JSON: {}", e))
    })?;

    if let Err(e) = ensure_unique_ids(&records) {
        log_event_with_fields(Event::RecordsRejected, &[("path", path.as_str())]);
        return Err(e.into());
    }

    engine.metrics().add_records_loaded(records.len() as u64);
    log_event_with_fields(
        Event::RecordsLoaded,
        &[("count", records.len().to_string().as_str()), ("path", path.as_str())],
    );

    Ok(records)
}
