//! # Indicator Math
//!
//! Technical indicator calculations for daily price series.
//!
//! Each indicator is an independent incremental calculator: construct it
//! with its window parameters, feed values through `update`, and read the
//! current value with `value()`, which reports insufficient history as a
//! [`MathError::InsufficientData`] instead of a number. The snapshot entry
//! point [`compute_indicators`] folds a whole
//! [`market_data::Series`] through a configured set of calculators and
//! returns only the values at the last observation.
//!
//! ## Usage Example
//!
//! ```
//! use indicator_math::moving_averages::SimpleMovingAverage;
//!
//! let mut sma = SimpleMovingAverage::new(3).unwrap();
//! for close in [2.0, 4.0, 6.0] {
//!     sma.update(close);
//! }
//! assert_eq!(sma.value().unwrap(), 4.0);
//! ```

use thiserror::Error;

// Indicator modules
pub mod moving_averages;
pub mod oscillators;
pub mod snapshot;
pub mod volatility;

pub use snapshot::{compute_indicators, IndicatorConfig, IndicatorError, IndicatorSnapshot};

/// Errors that can occur in indicator calculations
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for indicator math operations
pub type Result<T> = std::result::Result<T, MathError>;
