//! Schedule command implementation
//!
//! Prints the resolved monthly observation schedule of one contract.

use std::io::{self, Write};
use std::path::Path;

use snowball_core::types::Date;
use snowball_models::calendar::TradingCalendar;
use snowball_models::schedules::{ObservationDate, ObservationScheduler};
use tracing::info;

use crate::config::SweepConfig;
use crate::loader::load_price_series;
use crate::output::write_schedule;
use crate::Result;

/// Run the schedule command
pub fn run(config: &SweepConfig, input: &Path, start: &str) -> Result<()> {
    config.validate()?;
    let start = Date::parse(start)?;

    let series = load_price_series(input, &config.date_column, &config.price_column)?;
    let calendar = TradingCalendar::new(series);
    let (base_price, schedule) = resolve(&calendar, config, start)?;

    info!(
        "Resolved {} observations for {} ({} search)",
        schedule.len(),
        start,
        ObservationScheduler::search_direction(start)
    );

    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_schedule(start, base_price, &schedule, &mut lock)?;
    lock.flush()?;
    Ok(())
}

/// Resolves the schedule of a contract starting on `start` with its prices.
pub fn resolve(
    calendar: &TradingCalendar,
    config: &SweepConfig,
    start: Date,
) -> Result<(f64, Vec<(ObservationDate, f64)>)> {
    let spec = config.contract_terms()?.for_start(start);
    let scheduler = ObservationScheduler::new(calendar);

    let schedule = scheduler
        .schedule_for(&spec)?
        .into_iter()
        .map(|obs| Ok((obs, calendar.price_at(obs.actual)?)))
        .collect::<Result<Vec<_>>>()?;
    let base_price = calendar.price_at(start)?;

    Ok((base_price, schedule))
}
