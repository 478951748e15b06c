//! Configuration for recordlens
//!
//! `EngineConfig` is what the library needs to run a query. `Config` is the
//! JSON file the CLI reads; it validates eagerly and converts into an
//! `EngineConfig`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{Logger, Severity};
use crate::stats::{Aggregator, ModeField};

/// Largest UTC offset accepted, in minutes (exclusive of a full day)
pub const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Settings the query engine runs with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Offset used to align calendar date windows and the current period
    pub utc_offset: FixedOffset,
    /// Collections larger than this are refused
    pub max_records: usize,
    pub mode_field: ModeField,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            utc_offset: utc(),
            max_records: default_max_records(),
            mode_field: ModeField::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    pub fn with_mode_field(mut self, mode_field: ModeField) -> Self {
        self.mode_field = mode_field;
        self
    }

    /// Aggregator matching this configuration
    pub fn aggregator(&self) -> Aggregator {
        Aggregator::new(self.mode_field, self.utc_offset)
    }
}

/// JSON configuration file read by the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// JSON array of records; relative paths resolve against the config file
    pub records_path: PathBuf,

    /// Record cap (optional, default 100000)
    #[serde(default = "default_max_records")]
    pub max_records: usize,

    /// Offset for calendar windows in minutes east of UTC (optional, default 0)
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Minimum log severity (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Field reported as `modeOfField` (optional, default "kind_default")
    #[serde(default)]
    pub mode_field: ModeField,
}

fn default_max_records() -> usize {
    100_000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn utc() -> FixedOffset {
    chrono::Offset::fix(&chrono::Utc)
}

impl Config {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Config = serde_json::from_str(&content)?;
        config.validate()?;

        if config.records_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.records_path = dir.join(&config.records_path);
            }
        }

        Ok(config)
    }

    /// Validate field values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.records_path.as_os_str().is_empty() {
            return Err(ConfigError::invalid("records_path", "must not be empty"));
        }

        if self.max_records == 0 {
            return Err(ConfigError::invalid("max_records", "must be > 0"));
        }

        if self.utc_offset_minutes.unsigned_abs() > MAX_OFFSET_MINUTES.unsigned_abs() {
            return Err(ConfigError::invalid(
                "utc_offset_minutes",
                format!(
                    "{} is outside -{}..={}",
                    self.utc_offset_minutes, MAX_OFFSET_MINUTES, MAX_OFFSET_MINUTES
                ),
            ));
        }

        self.severity()?;
        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> Result<Severity, ConfigError> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            ConfigError::invalid(
                "log_level",
                format!(
                    "'{}' is not one of trace, info, warn, error, fatal",
                    self.log_level
                ),
            )
        })
    }

    /// Applies `log_level` to the process-wide logger
    pub fn apply_logging(&self) -> Result<(), ConfigError> {
        Logger::set_min_severity(self.severity()?);
        Ok(())
    }

    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let utc_offset = self
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::invalid("utc_offset_minutes", "offset out of range"))?;

        Ok(EngineConfig {
            utc_offset,
            max_records: self.max_records,
            mode_field: self.mode_field,
        })
    }
}
