//! Error types for the forecast_engine crate

use thiserror::Error;

/// Failures reported by the forecast entry point.
///
/// `EmptySeries` means there was nothing to forecast; `FitFailure` means a
/// fit was attempted and did not produce a usable model. Callers can rely
/// on the distinction: retrying with identical inputs fails identically,
/// so the remedy for a `FitFailure` is more history or a different order.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The series holds no observations at all
    #[error("series contains no observations")]
    EmptySeries,

    /// The configuration is unusable regardless of the data
    #[error("invalid forecast configuration: {0}")]
    InvalidConfig(String),

    /// Fitting or prediction failed; the reason is a human-readable diagnostic
    #[error("model fit failed: {reason}")]
    FitFailure { reason: String },
}

/// Result type with the forecast error
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Failures inside a model's fit/predict implementation.
///
/// These never escape the forecast entry point directly; they are folded
/// into [`ForecastError::FitFailure`] with their display message as the
/// diagnostic.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("unsupported model order: {0}")]
    UnsupportedOrder(String),

    #[error("series too short: need at least {required} observations, have {actual}")]
    TooShort { required: usize, actual: usize },

    #[error("series contains non-finite values")]
    NonFinite,

    #[error("numerically singular fit: {0}")]
    Singular(String),

    #[error("forecast diverged to a non-finite value")]
    Diverged,

    #[error("fitting exceeded the iteration budget of {max_iterations}")]
    BudgetExceeded { max_iterations: usize },
}
