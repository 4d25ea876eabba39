//! Autoregressive-integrated model
//!
//! Fits an AR(p) process to the d-times differenced close series:
//! autocovariances feed the Yule-Walker equations, solved with the
//! Levinson-Durbin recursion on the mean-centered data. Prediction extends
//! the differenced series one step at a time and undifferences back to
//! price levels from the last observed values.

use crate::error::FitError;
use crate::models::{FitBudget, FittedModel, Forecaster, ModelOrder};

// Below this, a lag-0 autocovariance or prediction-error variance is
// treated as zero.
const VARIANCE_FLOOR: f64 = 1e-12;

/// Autoregressive-integrated forecasting model of fixed order.
#[derive(Debug, Clone)]
pub struct AutoRegressive {
    order: ModelOrder,
    name: String,
}

impl AutoRegressive {
    /// Create a model with the given order. Only `q = 0` is supported.
    pub fn new(order: ModelOrder) -> Result<Self, FitError> {
        if order.q != 0 {
            return Err(FitError::UnsupportedOrder(
                "moving-average terms are not supported (q must be 0)".to_string(),
            ));
        }
        if order.p > 10 {
            return Err(FitError::UnsupportedOrder(
                "autoregressive order must be at most 10".to_string(),
            ));
        }
        if order.d > 2 {
            return Err(FitError::UnsupportedOrder(
                "differencing order must be at most 2".to_string(),
            ));
        }

        Ok(Self {
            order,
            name: format!("ARIMA({},{},{})", order.p, order.d, order.q),
        })
    }

    /// The configured order.
    pub fn order(&self) -> ModelOrder {
        self.order
    }

    /// Minimum observations: after `d` differencing passes there must be
    /// at least `p + 1` points to form the Yule-Walker system.
    fn min_observations(&self) -> usize {
        self.order.p + self.order.d + 1
    }
}

fn difference(data: &[f64]) -> Vec<f64> {
    data.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

/// Biased sample autocovariances of the centered series for lags 0..=max_lag.
fn autocovariances(centered: &[f64], max_lag: usize) -> Vec<f64> {
    let n = centered.len();
    (0..=max_lag)
        .map(|lag| {
            (lag..n)
                .map(|i| centered[i] * centered[i - lag])
                .sum::<f64>()
                / n as f64
        })
        .collect()
}

/// Solve the Yule-Walker equations with the Levinson-Durbin recursion.
///
/// Each order step counts against the iteration budget. A vanishing
/// prediction-error variance or a non-finite reflection coefficient is a
/// singularity.
fn levinson_durbin(autocov: &[f64], p: usize, budget: &FitBudget) -> Result<Vec<f64>, FitError> {
    let mut coefficients = vec![0.0; p];
    let mut prediction_error = autocov[0];
    let mut iterations = 0usize;

    for step in 0..p {
        iterations += 1;
        if iterations > budget.max_iterations {
            return Err(FitError::BudgetExceeded {
                max_iterations: budget.max_iterations,
            });
        }

        if prediction_error.abs() < VARIANCE_FLOOR {
            return Err(FitError::Singular(
                "prediction-error variance vanished".to_string(),
            ));
        }

        let mut acc = autocov[step + 1];
        for j in 0..step {
            acc -= coefficients[j] * autocov[step - j];
        }
        let reflection = acc / prediction_error;
        if !reflection.is_finite() {
            return Err(FitError::Singular(
                "non-finite reflection coefficient".to_string(),
            ));
        }

        let previous = coefficients.clone();
        coefficients[step] = reflection;
        for j in 0..step {
            coefficients[j] = previous[j] - reflection * previous[step - 1 - j];
        }
        prediction_error *= 1.0 - reflection * reflection;
    }

    Ok(coefficients)
}

impl Forecaster for AutoRegressive {
    type Fitted = FittedAutoRegressive;

    fn fit(&self, closes: &[f64], budget: &FitBudget) -> Result<FittedAutoRegressive, FitError> {
        let ModelOrder { p, d, .. } = self.order;

        if closes.iter().any(|value| !value.is_finite()) {
            return Err(FitError::NonFinite);
        }
        if closes.len() < self.min_observations() {
            return Err(FitError::TooShort {
                required: self.min_observations(),
                actual: closes.len(),
            });
        }

        // Difference d times, keeping the last level of each stage for
        // undifferencing later.
        let mut stage_tails = Vec::with_capacity(d);
        let mut working = closes.to_vec();
        for _ in 0..d {
            stage_tails.push(working[working.len() - 1]);
            working = difference(&working);
        }

        let n = working.len();
        let mean = working.iter().sum::<f64>() / n as f64;
        let centered: Vec<f64> = working.iter().map(|value| value - mean).collect();

        let autocov = autocovariances(&centered, p);
        // A constant differenced series carries no AR structure; the mean
        // alone drives the forecast.
        let coefficients = if p == 0 || autocov[0].abs() < VARIANCE_FLOOR {
            vec![0.0; p]
        } else {
            levinson_durbin(&autocov, p, budget)?
        };

        let mut sum_squares = 0.0;
        let residual_count = n - p;
        for i in p..n {
            let mut predicted = mean;
            for (j, &coefficient) in coefficients.iter().enumerate() {
                predicted += coefficient * (working[i - j - 1] - mean);
            }
            let residual = working[i] - predicted;
            sum_squares += residual * residual;
        }
        let residual_std = (sum_squares / residual_count as f64).sqrt();
        if !residual_std.is_finite() {
            return Err(FitError::Singular(
                "non-finite residual variance".to_string(),
            ));
        }

        Ok(FittedAutoRegressive {
            order: self.order,
            coefficients,
            mean,
            differenced: working,
            stage_tails,
            residual_std,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// An [`AutoRegressive`] model fitted to one price history.
#[derive(Debug, Clone)]
pub struct FittedAutoRegressive {
    order: ModelOrder,
    coefficients: Vec<f64>,
    mean: f64,
    differenced: Vec<f64>,
    stage_tails: Vec<f64>,
    residual_std: f64,
}

impl FittedAutoRegressive {
    /// The estimated AR coefficients, lag 1 first.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// The mean of the differenced series (the drift term).
    pub fn mean(&self) -> f64 {
        self.mean
    }
}

impl FittedModel for FittedAutoRegressive {
    fn predict(&self, horizon: usize) -> Result<Vec<f64>, FitError> {
        if horizon == 0 {
            return Ok(Vec::new());
        }

        let fitted_len = self.differenced.len();
        let mut extended = self.differenced.clone();
        for _ in 0..horizon {
            let mut next = self.mean;
            for (j, &coefficient) in self.coefficients.iter().enumerate() {
                next += coefficient * (extended[extended.len() - j - 1] - self.mean);
            }
            if !next.is_finite() {
                return Err(FitError::Diverged);
            }
            extended.push(next);
        }

        // Undifference stage by stage, innermost first, accumulating from
        // the recorded level of each stage.
        let mut projected: Vec<f64> = extended[fitted_len..].to_vec();
        for &tail in self.stage_tails.iter().rev() {
            let mut level = tail;
            for value in projected.iter_mut() {
                level += *value;
                *value = level;
            }
        }

        if projected.iter().any(|value| !value.is_finite()) {
            return Err(FitError::Diverged);
        }
        Ok(projected)
    }

    fn residual_std(&self) -> f64 {
        self.residual_std
    }
}
