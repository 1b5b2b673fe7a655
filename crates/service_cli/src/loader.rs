//! CSV price series loader.
//!
//! Reads `(date, price)` rows from named columns, sorts them oldest first
//! and hands them to [`PriceSeries`] which assigns ordinals 1..N.

use std::io::Read;
use std::path::Path;

use snowball_core::market_data::PriceSeries;
use snowball_core::types::Date;
use tracing::{debug, warn};

use crate::{CliError, Result};

/// Loads a price series from a CSV file with a header row.
pub fn load_price_series(path: &Path, date_column: &str, price_column: &str) -> Result<PriceSeries> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }

    let reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let series = read_series(reader, date_column, price_column)?;
    debug!(path = %path.display(), rows = series.len(), "loaded price series");
    Ok(series)
}

/// Reads a price series from any CSV source with a header row.
///
/// Rows with an empty price cell are skipped; any other unparsable cell is
/// an error naming its line.
pub fn read_series<R: Read>(
    mut reader: csv::Reader<R>,
    date_column: &str,
    price_column: &str,
) -> Result<PriceSeries> {
    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| CliError::data_load(format!("missing column '{}'", name)))
    };
    let date_idx = column(date_column)?;
    let price_idx = column(price_column)?;

    let mut rows: Vec<(Date, f64)> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());

        let date_cell = record.get(date_idx).unwrap_or_default();
        let price_cell = record.get(price_idx).unwrap_or_default();

        if price_cell.is_empty() {
            warn!(line, date = date_cell, "skipping row without a price");
            continue;
        }

        let date = Date::parse(date_cell)
            .map_err(|e| CliError::data_load(format!("line {}: {}", line, e)))?;
        let price: f64 = price_cell.parse().map_err(|_| {
            CliError::data_load(format!("line {}: invalid price '{}'", line, price_cell))
        })?;

        rows.push((date, price));
    }

    rows.sort_by_key(|(date, _)| *date);
    Ok(PriceSeries::from_date_prices(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowball_core::types::SeriesError;

    fn reader(data: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes())
    }

    #[test]
    fn test_reads_and_sorts_rows() {
        let data = "date,close,volume\n\
                    2024-01-03,101.5,10\n\
                    2024-01-02,100.0,12\n\
                    2024-01-04, 99.25 ,8\n";
        let series = read_series(reader(data), "date", "close").unwrap();

        assert_eq!(series.len(), 3);
        let points = series.points();
        assert_eq!(points[0].date, Date::from_ymd(2024, 1, 2).unwrap());
        assert_eq!(points[0].ordinal, 1);
        assert_eq!(points[0].price, 100.0);
        assert_eq!(points[2].ordinal, 3);
        assert_eq!(points[2].price, 99.25);
    }

    #[test]
    fn test_missing_column() {
        let err = read_series(reader("date,price\n2024-01-02,1\n"), "date", "close").unwrap_err();
        assert!(err.to_string().contains("missing column 'close'"));
    }

    #[test]
    fn test_blank_price_rows_are_skipped() {
        let data = "date,price\n2024-01-02,100\n2024-01-03,\n2024-01-04,101\n";
        let series = read_series(reader(data), "date", "price").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.last().date, Date::from_ymd(2024, 1, 4).unwrap());
    }

    #[test]
    fn test_bad_price_names_line() {
        let data = "date,price\n2024-01-02,100\n2024-01-03,abc\n";
        let err = read_series(reader(data), "date", "price").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 3"), "{}", msg);
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let data = "date,price\n2024-01-02,100\n2024-01-02,101\n";
        let err = read_series(reader(data), "date", "price").unwrap_err();
        assert!(matches!(
            err,
            CliError::Series(SeriesError::NonIncreasingDate { .. })
        ));
    }

    #[test]
    fn test_empty_file_rejected() {
        let err = read_series(reader("date,price\n"), "date", "price").unwrap_err();
        assert!(matches!(err, CliError::Series(SeriesError::Empty)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_price_series(&dir.path().join("nope.csv"), "date", "price").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }
}
