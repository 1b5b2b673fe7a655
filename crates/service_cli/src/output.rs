//! Result table rendering.

use std::io::Write;
use std::str::FromStr;

use serde::Serialize;
use snowball_core::types::Date;
use snowball_models::schedules::ObservationDate;
use snowball_models::sweep::{SweepRecord, SweepSummary};

use crate::{CliError, Result};

/// Output format for sweep results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `ordinal,date,price,knock_out,neither` with `NA` for indeterminate
    Csv,
    /// Array of records with `null` for indeterminate
    Json,
    /// Human-readable table
    Table,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            other => Err(CliError::invalid_argument(format!(
                "Unknown format: {}. Supported: csv, json, table",
                other
            ))),
        }
    }
}

#[derive(Serialize)]
struct CsvRow {
    ordinal: usize,
    date: String,
    price: f64,
    knock_out: &'static str,
    neither: &'static str,
}

#[derive(Serialize)]
struct JsonRow {
    ordinal: usize,
    date: Date,
    price: f64,
    knock_out: Option<u8>,
    neither: Option<u8>,
    knock_out_date: Option<Date>,
}

fn flag_text(flag: Option<u8>) -> &'static str {
    match flag {
        Some(1) => "1",
        Some(_) => "0",
        None => "NA",
    }
}

/// Writes sweep records to `writer` in the requested format.
pub fn write_records<W: Write>(records: &[SweepRecord], format: OutputFormat, writer: W) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(records, writer),
        OutputFormat::Json => write_json(records, writer),
        OutputFormat::Table => write_table(records, writer),
    }
}

fn write_csv<W: Write>(records: &[SweepRecord], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for r in records {
        csv.serialize(CsvRow {
            ordinal: r.ordinal,
            date: r.date.to_string(),
            price: r.price,
            knock_out: flag_text(r.knock_out_flag()),
            neither: flag_text(r.neither_flag()),
        })?;
    }
    csv.flush()?;
    Ok(())
}

fn write_json<W: Write>(records: &[SweepRecord], mut writer: W) -> Result<()> {
    let rows: Vec<JsonRow> = records
        .iter()
        .map(|r| JsonRow {
            ordinal: r.ordinal,
            date: r.date,
            price: r.price,
            knock_out: r.knock_out_flag(),
            neither: r.neither_flag(),
            knock_out_date: r.knock_out_date,
        })
        .collect();
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writeln!(writer)?;
    Ok(())
}

fn write_table<W: Write>(records: &[SweepRecord], mut w: W) -> Result<()> {
    writeln!(w, "┌─────────┬────────────┬──────────────┬───────────┬─────────┬──────────────┐")?;
    writeln!(w, "│ Ordinal │ Date       │        Price │ Knock-out │ Neither │ KO date      │")?;
    writeln!(w, "├─────────┼────────────┼──────────────┼───────────┼─────────┼──────────────┤")?;
    for r in records {
        let ko_date = r
            .knock_out_date
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        writeln!(
            w,
            "│ {:>7} │ {} │ {:>12.4} │ {:>9} │ {:>7} │ {:<12} │",
            r.ordinal,
            r.date,
            r.price,
            flag_text(r.knock_out_flag()),
            flag_text(r.neither_flag()),
            ko_date
        )?;
    }
    writeln!(w, "└─────────┴────────────┴──────────────┴───────────┴─────────┴──────────────┘")?;
    Ok(())
}

/// Writes a one-block summary of a sweep.
pub fn write_summary<W: Write>(summary: &SweepSummary, mut w: W) -> Result<()> {
    let rate = |r: Option<f64>| r.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}%", v * 100.0));
    writeln!(w, "Rows:            {}", summary.rows)?;
    writeln!(w, "Eligible rows:   {}", summary.knock_out_evaluated)?;
    writeln!(
        w,
        "Knock-out:       {} ({})",
        summary.knock_outs,
        rate(summary.knock_out_rate())
    )?;
    writeln!(
        w,
        "Neither:         {} ({})",
        summary.neithers,
        rate(summary.neither_rate())
    )?;
    Ok(())
}

/// Writes one contract's resolved observation schedule as a table.
pub fn write_schedule<W: Write>(
    start: Date,
    base_price: f64,
    schedule: &[(ObservationDate, f64)],
    mut w: W,
) -> Result<()> {
    writeln!(w, "Start: {}  Base price: {:.4}", start, base_price)?;
    writeln!(w, "┌───────┬─────────────┬────────────┬─────────┬──────────────┐")?;
    writeln!(w, "│ Index │ Theoretical │ Actual     │ Ordinal │        Price │")?;
    writeln!(w, "├───────┼─────────────┼────────────┼─────────┼──────────────┤")?;
    for (obs, price) in schedule {
        writeln!(
            w,
            "│ {:>5} │ {}  │ {} │ {:>7} │ {:>12.4} │",
            obs.index, obs.theoretical, obs.actual, obs.ordinal, price
        )?;
    }
    writeln!(w, "└───────┴─────────────┴────────────┴─────────┴──────────────┘")?;
    Ok(())
}
