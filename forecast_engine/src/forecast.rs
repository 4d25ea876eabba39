//! Forecast entry point
//!
//! Fits the configured autoregressive model to a series and projects it a
//! fixed number of calendar days past the last observation. All model
//! failures surface as [`ForecastError::FitFailure`] with a diagnostic;
//! the caller always receives either a full-length forecast or a
//! structured failure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::{debug, warn};

use market_data::Series;

use crate::error::{ForecastError, Result};
use crate::models::{AutoRegressive, FitBudget, FittedModel, Forecaster, ModelOrder};

/// Configuration for [`forecast`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Model order; defaults to (5, 1, 0)
    pub order: ModelOrder,
    /// Number of days to project; defaults to 30
    pub horizon: usize,
    /// Iteration cap for the fitting procedure
    pub budget: FitBudget,
    /// Confidence level for the optional intervals; `None` disables them
    pub confidence_level: Option<f64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            order: ModelOrder::default(),
            horizon: 30,
            budget: FitBudget::default(),
            confidence_level: Some(0.95),
        }
    }
}

/// A predicted close price for one future calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    #[serde(rename = "TradingDate")]
    pub date: NaiveDate,
    #[serde(rename = "ForecastedClosePrice")]
    pub close: f64,
}

/// A fixed-length forecast: one point per day, starting the day after the
/// last observation, with optional confidence intervals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    points: Vec<ForecastPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    intervals: Option<Vec<(f64, f64)>>,
}

impl Forecast {
    /// The forecasted points, earliest first.
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Number of forecasted days.
    pub fn horizon(&self) -> usize {
        self.points.len()
    }

    /// Per-point (lower, upper) confidence bounds, if configured.
    pub fn intervals(&self) -> Option<&[(f64, f64)]> {
        self.intervals.as_deref()
    }
}

/// Fit the configured model to the series and project `horizon` days past
/// the last observation.
///
/// The series is read, never mutated; calling twice with the same inputs
/// yields identical forecasts. An empty series returns
/// [`ForecastError::EmptySeries`]; every fitting or prediction problem
/// returns [`ForecastError::FitFailure`] with a human-readable reason.
/// This function never panics on bad input.
pub fn forecast(series: &Series, config: &ForecastConfig) -> Result<Forecast> {
    let last_date = series.last_date().ok_or(ForecastError::EmptySeries)?;

    if config.horizon == 0 {
        return Err(ForecastError::InvalidConfig(
            "horizon must be at least 1".to_string(),
        ));
    }
    if let Some(level) = config.confidence_level {
        if level <= 0.0 || level >= 1.0 {
            return Err(ForecastError::InvalidConfig(format!(
                "confidence level must be strictly between 0 and 1, got {level}"
            )));
        }
    }

    let model = AutoRegressive::new(config.order)
        .map_err(|err| ForecastError::InvalidConfig(err.to_string()))?;

    let closes = series.closes();
    debug!(
        model = model.name(),
        observations = closes.len(),
        horizon = config.horizon,
        "fitting forecast model"
    );

    let fitted = model.fit(&closes, &config.budget).map_err(|err| {
        warn!(model = model.name(), error = %err, "model fit failed");
        ForecastError::FitFailure {
            reason: err.to_string(),
        }
    })?;

    let values = fitted
        .predict(config.horizon)
        .map_err(|err| ForecastError::FitFailure {
            reason: err.to_string(),
        })?;

    debug!(residual_std = fitted.residual_std(), "forecast complete");

    let intervals = match config.confidence_level {
        Some(level) => Some(confidence_intervals(&values, fitted.residual_std(), level)?),
        None => None,
    };

    let points = future_dates(last_date, config.horizon)?
        .into_iter()
        .zip(values)
        .map(|(date, close)| ForecastPoint { date, close })
        .collect();

    Ok(Forecast { points, intervals })
}

/// Consecutive calendar dates starting the day after `last`.
fn future_dates(last: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::with_capacity(horizon);
    let mut current = last;
    for _ in 0..horizon {
        current = current.succ_opt().ok_or_else(|| {
            ForecastError::InvalidConfig(
                "forecast dates exceed the supported calendar range".to_string(),
            )
        })?;
        dates.push(current);
    }
    Ok(dates)
}

/// Symmetric intervals around each point: the residual deviation widens
/// with the square root of the step for the integrated series.
fn confidence_intervals(
    values: &[f64],
    residual_std: f64,
    level: f64,
) -> Result<Vec<(f64, f64)>> {
    let normal = Normal::new(0.0, 1.0)
        .map_err(|err| ForecastError::InvalidConfig(err.to_string()))?;
    let z = normal.inverse_cdf(0.5 + level / 2.0);

    Ok(values
        .iter()
        .enumerate()
        .map(|(step, &value)| {
            let margin = z * residual_std * ((step + 1) as f64).sqrt();
            (value - margin, value + margin)
        })
        .collect())
}
