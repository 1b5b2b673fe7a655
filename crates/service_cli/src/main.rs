//! Snowball CLI - Historical Snowball Autocallable Sweeps
//!
//! This is the operational entry point for the snowball-rust libraries.
//!
//! # Commands
//!
//! - `snowball sweep --input <file>` - Classify every start date of a price history
//! - `snowball schedule --input <file> --start <date>` - Show one contract's observation schedule
//! - `snowball check` - Validate configuration
//!
//! # Configuration
//!
//! Contract terms are read from `snowball.toml` (if present), then
//! `SNOWBALL_*` environment variables, then command-line flags.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod loader;
mod output;

pub use error::{CliError, Result};

use config::{SweepConfig, TermOverrides};

/// Snowball autocallable historical sweep CLI
#[derive(Parser)]
#[command(name = "snowball")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "snowball.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every row of a price history as a contract start date
    Sweep {
        /// Path to price CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Contract life in months
        #[arg(long)]
        tenure: Option<u32>,

        /// Lock-in period in months
        #[arg(long = "lock-in")]
        lock_in: Option<u32>,

        /// Knock-out barrier ratio
        #[arg(long)]
        upper_ratio: Option<f64>,

        /// Knock-in barrier ratio
        #[arg(long)]
        lower_ratio: Option<f64>,

        /// Output format (csv, json, table)
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the observation schedule of one contract
    Schedule {
        /// Path to price CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Contract start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: String,

        /// Contract life in months
        #[arg(long)]
        tenure: Option<u32>,

        /// Lock-in period in months
        #[arg(long = "lock-in")]
        lock_in: Option<u32>,
    },

    /// Check configuration
    Check,
}

fn init_tracing(verbose: bool, config: &SweepConfig) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<SweepConfig> {
    Ok(SweepConfig::load_or_default(path)?.with_env_override())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    init_tracing(cli.verbose, &config)?;
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Sweep {
            input,
            tenure,
            lock_in,
            upper_ratio,
            lower_ratio,
            format,
            output,
        } => {
            let config = config.with_overrides(&TermOverrides {
                tenure,
                lock_in_period: lock_in,
                upper_ratio,
                lower_ratio,
            });
            commands::sweep::run(&config, &input, &format, output.as_deref())?;
        }
        Commands::Schedule {
            input,
            start,
            tenure,
            lock_in,
        } => {
            let config = config.with_overrides(&TermOverrides {
                tenure,
                lock_in_period: lock_in,
                ..TermOverrides::default()
            });
            commands::schedule::run(&config, &input, &start)?;
        }
        Commands::Check => commands::check::run(&config, &cli.config)?,
    }

    Ok(())
}
