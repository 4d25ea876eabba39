//! # Forecast Engine
//!
//! Short-horizon close-price forecasting for daily stock series.
//!
//! The engine fits a univariate autoregressive-integrated model (default
//! order (5, 1, 0)) to a close-price history and projects it a fixed
//! number of calendar days past the last observation. It is a pure
//! function of (series, configuration): no shared state, no I/O, and a
//! structured failure instead of a fault whenever the input is
//! insufficient or the fit degenerates.
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use forecast_engine::{forecast, ForecastConfig};
//! use market_data::{Observation, OhlcvBar, Series};
//!
//! let mut date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
//! let mut observations = Vec::new();
//! for i in 0..100 {
//!     let close = 100.0 + i as f64 * 0.4;
//!     observations.push(Observation {
//!         date,
//!         bar: OhlcvBar { open: close, high: close + 1.0, low: close - 1.0, close, volume: 1_000 },
//!     });
//!     date = date.succ_opt().unwrap();
//! }
//! let series = Series::new(observations).unwrap();
//!
//! let result = forecast(&series, &ForecastConfig::default()).unwrap();
//! assert_eq!(result.horizon(), 30);
//! assert_eq!(result.points()[0].date, date);
//! ```

pub mod error;
pub mod forecast;
pub mod models;

// Re-export commonly used types
pub use crate::error::{FitError, ForecastError};
pub use crate::forecast::{forecast, Forecast, ForecastConfig, ForecastPoint};
pub use crate::models::{
    AutoRegressive, FitBudget, FittedAutoRegressive, FittedModel, Forecaster, ModelOrder,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
