//! Moving average calculators
//!
//! Contains the two moving average types used by the snapshot:
//! - Simple Moving Average (SMA)
//! - Exponential Moving Average (EMA)

use crate::{MathError, Result};
use std::collections::VecDeque;

/// Simple Moving Average (SMA) over a sliding window of the most recent
/// `window` values.
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    window: usize,
    values: VecDeque<f64>,
    sum: f64,
}

impl SimpleMovingAverage {
    /// Create a new SMA with the specified window.
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(MathError::InvalidInput(
                "SMA window must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            window,
            values: VecDeque::with_capacity(window),
            sum: 0.0,
        })
    }

    /// Feed the next value into the window.
    pub fn update(&mut self, value: f64) {
        self.values.push_back(value);
        self.sum += value;

        if self.values.len() > self.window {
            if let Some(oldest) = self.values.pop_front() {
                self.sum -= oldest;
            }
        }
    }

    /// The mean of the last `window` values.
    ///
    /// Defined only once `window` values have been seen.
    pub fn value(&self) -> Result<f64> {
        if self.values.len() < self.window {
            return Err(MathError::InsufficientData(format!(
                "SMA({}) needs {} values, have {}",
                self.window,
                self.window,
                self.values.len()
            )));
        }

        Ok(self.sum / self.window as f64)
    }

    /// The configured window.
    pub fn window(&self) -> usize {
        self.window
    }
}

/// Exponential Moving Average (EMA) with smoothing factor
/// `alpha = 2 / (window + 1)`.
///
/// The first EMA value is the simple average of the first `window` inputs;
/// every later value follows the recursion
/// `ema = (value - prev) * alpha + prev`.
#[derive(Debug, Clone)]
pub struct ExponentialMovingAverage {
    window: usize,
    alpha: f64,
    seed_sum: f64,
    seed_count: usize,
    current: Option<f64>,
}

impl ExponentialMovingAverage {
    /// Create a new EMA with the specified window.
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(MathError::InvalidInput(
                "EMA window must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            window,
            alpha: 2.0 / (window as f64 + 1.0),
            seed_sum: 0.0,
            seed_count: 0,
            current: None,
        })
    }

    /// Feed the next value into the average.
    pub fn update(&mut self, value: f64) {
        match self.current {
            Some(prev) => {
                self.current = Some((value - prev) * self.alpha + prev);
            }
            None => {
                // Still seeding: accumulate until the seed window is full.
                self.seed_sum += value;
                self.seed_count += 1;
                if self.seed_count == self.window {
                    self.current = Some(self.seed_sum / self.window as f64);
                }
            }
        }
    }

    /// The current EMA value, defined once the seed window is full.
    pub fn value(&self) -> Result<f64> {
        self.current.ok_or_else(|| {
            MathError::InsufficientData(format!(
                "EMA({}) needs {} values, have {}",
                self.window, self.window, self.seed_count
            ))
        })
    }

    /// The configured window.
    pub fn window(&self) -> usize {
        self.window
    }
}
