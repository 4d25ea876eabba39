//! # Market Data
//!
//! `market_data` holds the daily OHLCV (Open, High, Low, Close, Volume)
//! observation types shared by the analytics crates, together with the
//! validated [`Series`] container the indicator and forecasting engines
//! consume.
//!
//! A [`Series`] is built once per request from retrieved rows, validated at
//! construction, and never mutated afterwards; the analytics entry points
//! take it by shared reference.
//!
//! ## Usage Example
//!
//! ```
//! use chrono::NaiveDate;
//! use market_data::{Observation, OhlcvBar, Series};
//!
//! let observations = vec![
//!     Observation {
//!         date: NaiveDate::from_ymd_opt(2023, 4, 10).unwrap(),
//!         bar: OhlcvBar { open: 10.0, high: 10.5, low: 9.8, close: 10.2, volume: 1_200 },
//!     },
//!     Observation {
//!         date: NaiveDate::from_ymd_opt(2023, 4, 11).unwrap(),
//!         bar: OhlcvBar { open: 10.2, high: 10.9, low: 10.1, close: 10.7, volume: 1_500 },
//!     },
//! ];
//!
//! let series = Series::new(observations).unwrap();
//! assert_eq!(series.len(), 2);
//! assert_eq!(series.closes(), vec![10.2, 10.7]);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod loader;

pub use loader::DataLoader;

/// Errors that can occur while building or loading a price series
#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("observation {position} is out of order: {current} does not follow {previous}")]
    OutOfOrder {
        position: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("observation {position} has a non-finite {field}")]
    NonFinite {
        position: usize,
        field: &'static str,
    },

    #[error("observation {position} has low above high")]
    InvertedRange { position: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for market data operations
pub type Result<T> = std::result::Result<T, SeriesError>;

/// Open, high, low, close and volume for a single trading day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcvBar {
    /// Open price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Close price
    pub close: f64,
    /// Traded volume
    pub volume: u64,
}

/// One trading day for one instrument
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar date of the trading day (no time component)
    pub date: NaiveDate,
    /// OHLCV data for the day
    pub bar: OhlcvBar,
}

/// An ordered, validated sequence of daily observations for one instrument.
///
/// Construction enforces strictly increasing dates (which implies one
/// observation per date), finite price/volume fields, and `low <= high`.
/// Calendar gaps are expected: the series only contains trading days that
/// exist in the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    /// Build a series from observations, validating every row.
    pub fn new(observations: Vec<Observation>) -> Result<Self> {
        for (position, obs) in observations.iter().enumerate() {
            let bar = &obs.bar;
            for (field, value) in [
                ("open", bar.open),
                ("high", bar.high),
                ("low", bar.low),
                ("close", bar.close),
            ] {
                if !value.is_finite() {
                    return Err(SeriesError::NonFinite { position, field });
                }
            }
            if bar.low > bar.high {
                return Err(SeriesError::InvertedRange { position });
            }
            if position > 0 {
                let previous = observations[position - 1].date;
                if obs.date <= previous {
                    return Err(SeriesError::OutOfOrder {
                        position,
                        previous,
                        current: obs.date,
                    });
                }
            }
        }

        Ok(Self { observations })
    }

    /// All observations, oldest first.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Number of observations in the series.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series holds no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The most recent observation, if any.
    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// The most recent trading date, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|obs| obs.date)
    }

    /// Closing prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.observations.iter().map(|obs| obs.bar.close).collect()
    }

    /// Iterate over observations, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(date: (i32, u32, u32), close: f64) -> Observation {
        Observation {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            bar: OhlcvBar {
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000,
            },
        }
    }

    #[test]
    fn builds_from_ordered_observations() {
        let series = Series::new(vec![obs((2023, 1, 2), 10.0), obs((2023, 1, 3), 11.0)]).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![10.0, 11.0]);
        assert_eq!(
            series.last_date(),
            Some(NaiveDate::from_ymd_opt(2023, 1, 3).unwrap())
        );
    }

    #[test]
    fn empty_series_is_allowed() {
        let series = Series::new(Vec::new()).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.last_date(), None);
    }

    #[test]
    fn calendar_gaps_are_allowed() {
        // Friday to Monday — weekends are simply absent.
        let series = Series::new(vec![obs((2023, 1, 6), 10.0), obs((2023, 1, 9), 11.0)]).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn rejects_out_of_order_dates() {
        let err = Series::new(vec![obs((2023, 1, 3), 10.0), obs((2023, 1, 2), 11.0)]).unwrap_err();
        assert!(matches!(err, SeriesError::OutOfOrder { position: 1, .. }));
    }

    #[test]
    fn rejects_duplicate_dates() {
        let err = Series::new(vec![obs((2023, 1, 2), 10.0), obs((2023, 1, 2), 11.0)]).unwrap_err();
        assert!(matches!(err, SeriesError::OutOfOrder { position: 1, .. }));
    }

    #[test]
    fn rejects_non_finite_prices() {
        let mut bad = obs((2023, 1, 2), 10.0);
        bad.bar.close = f64::NAN;
        let err = Series::new(vec![bad]).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::NonFinite {
                position: 0,
                field: "close"
            }
        ));
    }

    #[test]
    fn rejects_low_above_high() {
        let mut bad = obs((2023, 1, 2), 10.0);
        bad.bar.low = 12.0;
        bad.bar.high = 11.0;
        let err = Series::new(vec![bad]).unwrap_err();
        assert!(matches!(err, SeriesError::InvertedRange { position: 0 }));
    }

    #[test]
    fn serializes_dates_as_iso() {
        let series = Series::new(vec![obs((2023, 4, 10), 10.0)]).unwrap();
        let json = serde_json::to_value(series.observations()).unwrap();
        assert_eq!(json[0]["date"], "2023-04-10");
    }
}
