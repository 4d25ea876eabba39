//! CSV ingestion for daily price series
//!
//! Expects a header row of `date,open,high,low,close,volume` with dates in
//! `YYYY-MM-DD` form and rows ordered oldest first. The loaded rows pass
//! through the same validation as [`Series::new`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{Observation, OhlcvBar, Result, Series};

/// Loader for daily OHLCV series
#[derive(Debug)]
pub struct DataLoader;

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl From<CsvRow> for Observation {
    fn from(row: CsvRow) -> Self {
        Observation {
            date: row.date,
            bar: OhlcvBar {
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
            },
        }
    }
}

impl DataLoader {
    /// Load a series from a CSV file.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Series> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load a series from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Series> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut observations = Vec::new();
        for row in csv_reader.deserialize::<CsvRow>() {
            observations.push(row?.into());
        }
        Series::new(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
date,open,high,low,close,volume
2023-01-02,10.0,10.5,9.8,10.2,1200
2023-01-03,10.2,10.9,10.1,10.7,1500
2023-01-04,10.7,11.0,10.4,10.5,900
";

    #[test]
    fn loads_rows_from_reader() {
        let series = DataLoader::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![10.2, 10.7, 10.5]);
        assert_eq!(
            series.last_date(),
            Some(NaiveDate::from_ymd_opt(2023, 1, 4).unwrap())
        );
    }

    #[test]
    fn loads_rows_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let series = DataLoader::from_csv(file.path()).unwrap();
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DataLoader::from_csv("does-not-exist.csv").unwrap_err();
        assert!(matches!(err, crate::SeriesError::Io(_)));
    }

    #[test]
    fn unsorted_rows_are_rejected() {
        let csv = "\
date,open,high,low,close,volume
2023-01-03,10.0,10.5,9.8,10.2,1200
2023-01-02,10.2,10.9,10.1,10.7,1500
";
        let err = DataLoader::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, crate::SeriesError::OutOfOrder { .. }));
    }

    #[test]
    fn malformed_rows_are_a_csv_error() {
        let csv = "\
date,open,high,low,close,volume
2023-01-02,ten,10.5,9.8,10.2,1200
";
        let err = DataLoader::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, crate::SeriesError::Csv(_)));
    }
}
