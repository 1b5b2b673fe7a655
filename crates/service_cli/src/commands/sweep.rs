//! Sweep command implementation
//!
//! Classifies every row of a historical price series as a contract start
//! date and writes the result table.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use snowball_models::calendar::TradingCalendar;
use snowball_models::sweep::{ContractSweep, ParallelConfig, SweepRecord, SweepSummary, DEFAULT_BATCH_SIZE};
use tracing::info;

use crate::config::SweepConfig;
use crate::loader::load_price_series;
use crate::output::{write_records, write_summary, OutputFormat};
use crate::Result;

/// Run the sweep command
pub fn run(config: &SweepConfig, input: &Path, format: &str, output: Option<&Path>) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    config.validate()?;

    info!("Starting sweep...");
    info!("  Input: {}", input.display());
    info!(
        "  Terms: tenure={} lock_in={} upper={} lower={}",
        config.tenure, config.lock_in_period, config.upper_ratio, config.lower_ratio
    );

    let records = evaluate(config, input)?;
    let summary = SweepSummary::from_records(&records);

    match output {
        Some(path) => {
            let file = BufWriter::new(File::create(path)?);
            write_records(&records, format, file)?;
            info!("Results written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_records(&records, format, &mut lock)?;
            if format == OutputFormat::Table {
                writeln!(lock)?;
                write_summary(&summary, &mut lock)?;
            }
            lock.flush()?;
        }
    }

    info!(
        rows = summary.rows,
        eligible = summary.knock_out_evaluated,
        knock_outs = summary.knock_outs,
        neithers = summary.neithers,
        "Sweep complete"
    );
    Ok(())
}

/// Loads `input` and runs the sweep with the configured terms.
pub fn evaluate(config: &SweepConfig, input: &Path) -> Result<Vec<SweepRecord>> {
    let series = load_price_series(input, &config.date_column, &config.price_column)?;
    let calendar = TradingCalendar::new(series);
    let terms = config.contract_terms()?;

    let records = ContractSweep::new(&calendar, terms)
        .with_parallel(ParallelConfig::new(DEFAULT_BATCH_SIZE, config.parallel_threshold))
        .run()?;
    Ok(records)
}
