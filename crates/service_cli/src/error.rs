//! Error types for the snowball CLI.

use snowball_core::types::{DateError, SeriesError};
use snowball_models::calendar::CalendarError;
use snowball_models::instruments::ContractError;
use snowball_models::schedules::ScheduleError;
use snowball_models::sweep::SweepError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Price data could not be read
    #[error("Data loading error: {0}")]
    DataLoad(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read or write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid date argument
    #[error(transparent)]
    Date(#[from] DateError),

    /// Price series failed validation
    #[error("Invalid price series: {0}")]
    Series(#[from] SeriesError),

    /// Contract terms failed validation
    #[error("Invalid contract terms: {0}")]
    Contract(#[from] ContractError),

    /// Calendar lookup failed
    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// Observation schedule could not be resolved
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Sweep aborted
    #[error("Sweep failed: {0}")]
    Sweep(#[from] SweepError),
}

impl CliError {
    /// Create a data loading error
    pub fn data_load(msg: impl Into<String>) -> Self {
        Self::DataLoad(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;
