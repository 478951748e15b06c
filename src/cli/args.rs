//! CLI argument definitions using clap
//!
//! Commands:
//! - recordlens query --config <path> [--param key=value ...]
//! - recordlens stats --config <path>
//! - recordlens check --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// recordlens - query and summarize bookings and payment transactions
#[derive(Parser, Debug)]
#[command(name = "recordlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one query and print the view and statistics
    ///
    /// Without --param, reads a JSON descriptor line from stdin.
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./recordlens.json")]
        config: PathBuf,

        /// Query parameter as key=value, e.g. --param status=completed
        #[arg(long = "param", short = 'p', value_name = "KEY=VALUE")]
        params: Vec<String>,
    },

    /// Print statistics over the whole collection
    Stats {
        /// Path to configuration file
        #[arg(long, default_value = "./recordlens.json")]
        config: PathBuf,
    },

    /// Validate the configuration and records file
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./recordlens.json")]
        config: PathBuf,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Query { .. } => "query",
            Command::Stats { .. } => "stats",
            Command::Check { .. } => "check",
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
