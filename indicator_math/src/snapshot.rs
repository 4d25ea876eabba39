//! Last-observation indicator snapshots
//!
//! [`compute_indicators`] folds a whole series through a configured set of
//! calculators and reports only the values at the final observation.
//! Indicators whose history is too short at that point are reported as
//! `None` (serialized as `null`), never dropped from the output and never
//! coerced to zero.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use market_data::Series;

use crate::moving_averages::{ExponentialMovingAverage, SimpleMovingAverage};
use crate::oscillators::{Macd, RelativeStrengthIndex, StochasticOscillator};
use crate::volatility::BollingerBands;
use crate::MathError;

/// Errors from the snapshot entry point
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("series contains no observations")]
    EmptySeries,

    #[error("invalid indicator configuration: {0}")]
    InvalidConfig(#[from] MathError),
}

/// MACD window parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    pub fast_window: usize,
    pub slow_window: usize,
    pub signal_window: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_window: 12,
            slow_window: 26,
            signal_window: 9,
        }
    }
}

/// Bollinger Bands parameters (optional output)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BollingerParams {
    pub window: usize,
    pub multiplier: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            window: 20,
            multiplier: 2.0,
        }
    }
}

/// Stochastic Oscillator parameters (optional output)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StochasticParams {
    pub k_window: usize,
    pub d_window: usize,
}

impl Default for StochasticParams {
    fn default() -> Self {
        Self {
            k_window: 14,
            d_window: 3,
        }
    }
}

/// Window configuration for [`compute_indicators`].
///
/// The defaults reproduce the standard output surface: SMA 50/200, EMA
/// 12/26, RSI 14, and MACD (12, 26, 9). Bollinger Bands and the Stochastic
/// Oscillator are computed only when their parameters are present.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub sma_windows: Vec<usize>,
    pub ema_windows: Vec<usize>,
    pub rsi_window: usize,
    pub macd: MacdParams,
    pub bollinger: Option<BollingerParams>,
    pub stochastic: Option<StochasticParams>,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_windows: vec![50, 200],
            ema_windows: vec![12, 26],
            rsi_window: 14,
            macd: MacdParams::default(),
            bollinger: None,
            stochastic: None,
        }
    }
}

/// Indicator values at the last observation of a series.
///
/// Serializes with the warehouse payload's column names: `TradingDate`,
/// `ClosePrice`, then one field per indicator (`SMA_50`, `EMA_12`, `RSI`,
/// `MACD`, `MACD_Signal`, ...). `None` means the series was too short for
/// that indicator at the final index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    #[serde(rename = "TradingDate")]
    pub date: NaiveDate,
    #[serde(rename = "ClosePrice")]
    pub close: f64,
    #[serde(flatten)]
    values: BTreeMap<String, Option<f64>>,
}

impl IndicatorSnapshot {
    /// The value of a named indicator.
    ///
    /// Outer `None`: the indicator was not part of the configured output.
    /// Inner `None`: it was computed but undefined (insufficient history).
    pub fn get(&self, name: &str) -> Option<Option<f64>> {
        self.values.get(name).copied()
    }

    /// Whether the named indicator was computed and is defined.
    pub fn is_defined(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(Some(_)))
    }

    /// All indicator entries, ordered by name.
    pub fn values(&self) -> &BTreeMap<String, Option<f64>> {
        &self.values
    }
}

/// Compute the configured indicators over the full series, reporting the
/// values at the last observation.
///
/// The series is read, never mutated; calling twice with the same inputs
/// yields identical snapshots. An empty series is the only hard failure —
/// a non-empty series that is too short for some indicator reports that
/// indicator as `None`.
pub fn compute_indicators(
    series: &Series,
    config: &IndicatorConfig,
) -> Result<IndicatorSnapshot, IndicatorError> {
    let last = series.last().ok_or(IndicatorError::EmptySeries)?;

    let mut smas = Vec::with_capacity(config.sma_windows.len());
    for &window in &config.sma_windows {
        smas.push((window, SimpleMovingAverage::new(window)?));
    }
    let mut emas = Vec::with_capacity(config.ema_windows.len());
    for &window in &config.ema_windows {
        emas.push((window, ExponentialMovingAverage::new(window)?));
    }
    let mut rsi = RelativeStrengthIndex::new(config.rsi_window)?;
    let mut macd = Macd::new(
        config.macd.fast_window,
        config.macd.slow_window,
        config.macd.signal_window,
    )?;
    let mut bollinger = match &config.bollinger {
        Some(params) => Some(BollingerBands::new(params.window, params.multiplier)?),
        None => None,
    };
    let mut stochastic = match &config.stochastic {
        Some(params) => Some(StochasticOscillator::new(params.k_window, params.d_window)?),
        None => None,
    };

    for obs in series {
        let close = obs.bar.close;
        for (_, sma) in smas.iter_mut() {
            sma.update(close);
        }
        for (_, ema) in emas.iter_mut() {
            ema.update(close);
        }
        rsi.update(close);
        macd.update(close);
        if let Some(bands) = bollinger.as_mut() {
            bands.update(close);
        }
        if let Some(stoch) = stochastic.as_mut() {
            stoch.update(obs.bar.high, obs.bar.low, close);
        }
    }

    let mut values = BTreeMap::new();
    for (window, sma) in &smas {
        values.insert(format!("SMA_{window}"), sma.value().ok());
    }
    for (window, ema) in &emas {
        values.insert(format!("EMA_{window}"), ema.value().ok());
    }
    values.insert("RSI".to_string(), rsi.value().ok());
    values.insert("MACD".to_string(), macd.macd_value().ok());
    values.insert("MACD_Signal".to_string(), macd.signal_value().ok());
    if let Some(bands) = &bollinger {
        values.insert("BB_Middle".to_string(), bands.middle_band().ok());
        values.insert("BB_Upper".to_string(), bands.upper_band().ok());
        values.insert("BB_Lower".to_string(), bands.lower_band().ok());
    }
    if let Some(stoch) = &stochastic {
        values.insert("Stoch_K".to_string(), stoch.k_value().ok());
        values.insert("Stoch_D".to_string(), stoch.d_value().ok());
    }

    Ok(IndicatorSnapshot {
        date: last.date,
        close: last.bar.close,
        values,
    })
}
