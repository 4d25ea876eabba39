//! Oscillator calculators
//!
//! Contains the momentum oscillators used by the snapshot:
//! - Relative Strength Index (RSI) with Wilder smoothing
//! - Moving Average Convergence Divergence (MACD) with its signal line
//! - Stochastic Oscillator (%K / %D)

use crate::moving_averages::{ExponentialMovingAverage, SimpleMovingAverage};
use crate::{MathError, Result};
use std::collections::VecDeque;

/// Relative Strength Index (RSI) with Wilder smoothing.
///
/// The first averages are the simple means of the gains and losses over the
/// first `window` price changes; later values use
/// `avg = (avg * (window - 1) + current) / window`. Output is in [0, 100].
#[derive(Debug, Clone)]
pub struct RelativeStrengthIndex {
    window: usize,
    previous: Option<f64>,
    seed_gain: f64,
    seed_loss: f64,
    deltas_seen: usize,
    averages: Option<(f64, f64)>,
}

impl RelativeStrengthIndex {
    /// Create a new RSI with the specified window.
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(MathError::InvalidInput(
                "RSI window must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            window,
            previous: None,
            seed_gain: 0.0,
            seed_loss: 0.0,
            deltas_seen: 0,
            averages: None,
        })
    }

    /// Feed the next price into the oscillator.
    pub fn update(&mut self, price: f64) {
        if let Some(previous) = self.previous {
            let change = price - previous;
            let gain = change.max(0.0);
            let loss = (-change).max(0.0);
            let window = self.window as f64;

            match self.averages {
                Some((avg_gain, avg_loss)) => {
                    self.averages = Some((
                        (avg_gain * (window - 1.0) + gain) / window,
                        (avg_loss * (window - 1.0) + loss) / window,
                    ));
                }
                None => {
                    self.seed_gain += gain;
                    self.seed_loss += loss;
                    self.deltas_seen += 1;
                    if self.deltas_seen == self.window {
                        self.averages = Some((self.seed_gain / window, self.seed_loss / window));
                    }
                }
            }
        }

        self.previous = Some(price);
    }

    /// The current RSI value in [0, 100].
    ///
    /// Needs `window + 1` prices (one full window of changes). A market with
    /// no losses reads 100; one with no movement at all reads 50.
    pub fn value(&self) -> Result<f64> {
        let (avg_gain, avg_loss) = self.averages.ok_or_else(|| {
            MathError::InsufficientData(format!(
                "RSI({}) needs {} values, have {}",
                self.window,
                self.window + 1,
                self.deltas_seen + usize::from(self.previous.is_some())
            ))
        })?;

        if avg_gain == 0.0 && avg_loss == 0.0 {
            return Ok(50.0);
        }
        if avg_loss == 0.0 {
            return Ok(100.0);
        }

        let rs = avg_gain / avg_loss;
        Ok(100.0 - 100.0 / (1.0 + rs))
    }

    /// The configured window.
    pub fn window(&self) -> usize {
        self.window
    }
}

/// Moving Average Convergence Divergence (MACD).
///
/// The MACD line is the fast EMA minus the slow EMA; the signal line is an
/// EMA of the MACD line itself, seeded per the usual EMA rule over the MACD
/// values as they become defined.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: ExponentialMovingAverage,
    slow: ExponentialMovingAverage,
    signal: ExponentialMovingAverage,
}

impl Macd {
    /// Create a new MACD with the specified fast/slow/signal windows.
    pub fn new(fast_window: usize, slow_window: usize, signal_window: usize) -> Result<Self> {
        if fast_window >= slow_window {
            return Err(MathError::InvalidInput(
                "MACD fast window must be smaller than slow window".to_string(),
            ));
        }

        Ok(Self {
            fast: ExponentialMovingAverage::new(fast_window)?,
            slow: ExponentialMovingAverage::new(slow_window)?,
            signal: ExponentialMovingAverage::new(signal_window)?,
        })
    }

    /// Feed the next price into both EMAs and, once the MACD line is
    /// defined, into the signal EMA.
    pub fn update(&mut self, price: f64) {
        self.fast.update(price);
        self.slow.update(price);

        if let (Ok(fast), Ok(slow)) = (self.fast.value(), self.slow.value()) {
            self.signal.update(fast - slow);
        }
    }

    /// The current MACD line value (fast EMA - slow EMA).
    pub fn macd_value(&self) -> Result<f64> {
        match (self.fast.value(), self.slow.value()) {
            (Ok(fast), Ok(slow)) => Ok(fast - slow),
            _ => Err(MathError::InsufficientData(
                "not enough data for the MACD line".to_string(),
            )),
        }
    }

    /// The current signal line value (EMA of the MACD line).
    pub fn signal_value(&self) -> Result<f64> {
        self.signal.value().map_err(|_| {
            MathError::InsufficientData("not enough data for the MACD signal line".to_string())
        })
    }

    /// The current histogram value (MACD line - signal line).
    pub fn histogram(&self) -> Result<f64> {
        Ok(self.macd_value()? - self.signal_value()?)
    }
}

/// Stochastic Oscillator.
///
/// %K locates the close within the high/low range of the last `k_window`
/// bars; %D is the simple average of the last `d_window` %K values.
#[derive(Debug, Clone)]
pub struct StochasticOscillator {
    k_window: usize,
    bars: VecDeque<(f64, f64, f64)>,
    last_k: Option<f64>,
    d_average: SimpleMovingAverage,
}

impl StochasticOscillator {
    /// Create a new Stochastic Oscillator with the specified windows.
    pub fn new(k_window: usize, d_window: usize) -> Result<Self> {
        if k_window == 0 || d_window == 0 {
            return Err(MathError::InvalidInput(
                "stochastic windows must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            k_window,
            bars: VecDeque::with_capacity(k_window),
            last_k: None,
            d_average: SimpleMovingAverage::new(d_window)?,
        })
    }

    /// Feed the next bar into the oscillator.
    pub fn update(&mut self, high: f64, low: f64, close: f64) {
        self.bars.push_back((high, low, close));
        if self.bars.len() > self.k_window {
            self.bars.pop_front();
        }

        if self.bars.len() == self.k_window {
            let highest = self
                .bars
                .iter()
                .map(|&(high, _, _)| high)
                .fold(f64::NEG_INFINITY, f64::max);
            let lowest = self
                .bars
                .iter()
                .map(|&(_, low, _)| low)
                .fold(f64::INFINITY, f64::min);

            // Flat range reads as mid-scale.
            let k = if highest == lowest {
                50.0
            } else {
                (close - lowest) / (highest - lowest) * 100.0
            };

            self.last_k = Some(k);
            self.d_average.update(k);
        }
    }

    /// The current %K value in [0, 100].
    pub fn k_value(&self) -> Result<f64> {
        self.last_k.ok_or_else(|| {
            MathError::InsufficientData(format!(
                "%K needs {} bars, have {}",
                self.k_window,
                self.bars.len()
            ))
        })
    }

    /// The current %D value (SMA of %K) in [0, 100].
    pub fn d_value(&self) -> Result<f64> {
        self.d_average.value().map_err(|_| {
            MathError::InsufficientData(format!(
                "%D needs {} %K values",
                self.d_average.window()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rsi_needs_window_plus_one_values() {
        let mut rsi = RelativeStrengthIndex::new(14).unwrap();
        for value in (1..=14).map(|x| x as f64) {
            rsi.update(value);
        }
        assert!(rsi.value().is_err());

        rsi.update(15.0);
        assert!(rsi.value().is_ok());
    }

    #[test]
    fn rsi_is_100_for_all_gains() {
        let mut rsi = RelativeStrengthIndex::new(14).unwrap();
        for value in (1..=30).map(|x| x as f64) {
            rsi.update(value);
        }
        assert_relative_eq!(rsi.value().unwrap(), 100.0);
    }

    #[test]
    fn rsi_is_0_for_all_losses() {
        let mut rsi = RelativeStrengthIndex::new(14).unwrap();
        for value in (1..=30).rev().map(|x| x as f64) {
            rsi.update(value);
        }
        assert!(rsi.value().unwrap().abs() < 1e-10);
    }

    #[test]
    fn rsi_is_50_for_flat_market() {
        let mut rsi = RelativeStrengthIndex::new(14).unwrap();
        for _ in 0..30 {
            rsi.update(100.0);
        }
        assert_relative_eq!(rsi.value().unwrap(), 50.0);
    }

    #[test]
    fn rsi_stays_in_range() {
        let closes = [
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        let mut rsi = RelativeStrengthIndex::new(14).unwrap();
        for &close in &closes {
            rsi.update(close);
            if let Ok(value) = rsi.value() {
                assert!((0.0..=100.0).contains(&value), "RSI {value} out of range");
            }
        }
    }

    #[test]
    fn macd_line_is_fast_minus_slow() {
        let mut macd = Macd::new(12, 26, 9).unwrap();
        let mut fast = ExponentialMovingAverage::new(12).unwrap();
        let mut slow = ExponentialMovingAverage::new(26).unwrap();

        for value in (1..=60).map(|x| x as f64) {
            macd.update(value);
            fast.update(value);
            slow.update(value);
        }

        let expected = fast.value().unwrap() - slow.value().unwrap();
        assert_relative_eq!(macd.macd_value().unwrap(), expected, max_relative = 1e-12);
    }

    #[test]
    fn macd_signal_is_ema_of_macd_line() {
        let closes: Vec<f64> = (1..=80).map(|x| x as f64 + (x as f64 * 0.3).sin()).collect();

        let mut macd = Macd::new(12, 26, 9).unwrap();
        let mut reference = ExponentialMovingAverage::new(9).unwrap();

        for &close in &closes {
            macd.update(close);
            // Re-derive the MACD sequence and feed it through a plain EMA.
            if let Ok(line) = macd.macd_value() {
                reference.update(line);
            }
        }

        assert_relative_eq!(
            macd.signal_value().unwrap(),
            reference.value().unwrap(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn macd_rejects_fast_at_or_above_slow() {
        assert!(Macd::new(26, 12, 9).is_err());
        assert!(Macd::new(12, 12, 9).is_err());
    }

    #[test]
    fn macd_signal_undefined_before_nine_macd_values() {
        let mut macd = Macd::new(12, 26, 9).unwrap();
        // 33 closes: MACD defined from the 26th, so only 8 MACD values.
        for value in (1..=33).map(|x| x as f64) {
            macd.update(value);
        }
        assert!(macd.macd_value().is_ok());
        assert!(macd.signal_value().is_err());

        macd.update(34.0);
        assert!(macd.signal_value().is_ok());
    }

    #[test]
    fn stochastic_tracks_close_within_range() {
        let mut stoch = StochasticOscillator::new(3, 2).unwrap();
        stoch.update(10.0, 8.0, 9.0);
        stoch.update(11.0, 9.0, 10.0);
        assert!(stoch.k_value().is_err());

        stoch.update(12.0, 10.0, 12.0);
        // Range over 3 bars is [8, 12], close 12 => %K = 100.
        assert_relative_eq!(stoch.k_value().unwrap(), 100.0);
        assert!(stoch.d_value().is_err());

        stoch.update(12.0, 10.0, 10.0);
        // Range [9, 12], close 10 => %K = 33.33..; %D = (100 + 33.33..) / 2.
        let k = stoch.k_value().unwrap();
        assert_relative_eq!(k, 100.0 / 3.0, max_relative = 1e-12);
        assert_relative_eq!(stoch.d_value().unwrap(), (100.0 + k) / 2.0);
    }

    #[test]
    fn stochastic_flat_range_reads_50() {
        let mut stoch = StochasticOscillator::new(3, 3).unwrap();
        for _ in 0..5 {
            stoch.update(10.0, 10.0, 10.0);
        }
        assert_relative_eq!(stoch.k_value().unwrap(), 50.0);
    }
}
