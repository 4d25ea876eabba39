//! Volatility calculators
//!
//! Bollinger Bands: a middle SMA with bands at a multiple of the
//! population standard deviation over the same window.

use crate::moving_averages::SimpleMovingAverage;
use crate::{MathError, Result};
use std::collections::VecDeque;

/// Bollinger Bands calculator.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    window: usize,
    multiplier: f64,
    values: VecDeque<f64>,
    sma: SimpleMovingAverage,
}

impl BollingerBands {
    /// Create new bands with the specified window and deviation multiplier.
    pub fn new(window: usize, multiplier: f64) -> Result<Self> {
        if window == 0 {
            return Err(MathError::InvalidInput(
                "Bollinger window must be greater than zero".to_string(),
            ));
        }
        if multiplier <= 0.0 {
            return Err(MathError::InvalidInput(
                "Bollinger deviation multiplier must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            window,
            multiplier,
            values: VecDeque::with_capacity(window),
            sma: SimpleMovingAverage::new(window)?,
        })
    }

    /// Feed the next price into the bands.
    pub fn update(&mut self, price: f64) {
        self.values.push_back(price);
        if self.values.len() > self.window {
            self.values.pop_front();
        }
        self.sma.update(price);
    }

    /// The middle band (SMA over the window).
    pub fn middle_band(&self) -> Result<f64> {
        self.sma.value()
    }

    /// The upper band (middle + multiplier * standard deviation).
    pub fn upper_band(&self) -> Result<f64> {
        Ok(self.middle_band()? + self.multiplier * self.std_dev()?)
    }

    /// The lower band (middle - multiplier * standard deviation).
    pub fn lower_band(&self) -> Result<f64> {
        Ok(self.middle_band()? - self.multiplier * self.std_dev()?)
    }

    fn std_dev(&self) -> Result<f64> {
        if self.values.len() < self.window {
            return Err(MathError::InsufficientData(format!(
                "Bollinger({}) needs {} values, have {}",
                self.window,
                self.window,
                self.values.len()
            )));
        }

        let mean = self.middle_band()?;
        let variance = self
            .values
            .iter()
            .map(|value| {
                let diff = value - mean;
                diff * diff
            })
            .sum::<f64>()
            / self.window as f64;

        Ok(variance.sqrt())
    }
}
