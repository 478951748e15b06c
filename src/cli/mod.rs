//! CLI module for recordlens
//!
//! Provides command-line interface for:
//! - query: run one descriptor and print view and statistics
//! - stats: print statistics over the whole collection
//! - check: validate configuration and records

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, load_records, query, run, run_command, stats};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_descriptor, read_request, write_error, write_response};
