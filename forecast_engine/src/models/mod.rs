//! Forecasting model seam
//!
//! The model is split in two: a [`Forecaster`] fits a price history and
//! produces a [`FittedModel`], which projects forward. The forecast entry
//! point only touches these traits, so the autoregressive model can be
//! swapped or reimplemented without touching error shaping or date
//! assignment.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::FitError;

pub mod autoregressive;

pub use autoregressive::{AutoRegressive, FittedAutoRegressive};

/// Model order (p, d, q): autoregressive terms, differencing passes, and
/// moving-average terms.
///
/// Only `q = 0` is supported; the field exists so configurations carry the
/// conventional order triple and a non-zero `q` is rejected explicitly
/// instead of being ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOrder {
    /// Autoregressive order (p)
    pub p: usize,
    /// Differencing order (d)
    pub d: usize,
    /// Moving-average order (q); must be 0
    pub q: usize,
}

impl Default for ModelOrder {
    fn default() -> Self {
        Self { p: 5, d: 1, q: 0 }
    }
}

/// Iteration cap for the fitting procedure.
///
/// Fitting runs to completion or fails within one call; the cap is the
/// defensive boundary that turns a runaway fit into a structured failure
/// instead of a hang. Wall-clock timeouts belong to the request layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitBudget {
    pub max_iterations: usize,
}

impl Default for FitBudget {
    fn default() -> Self {
        Self {
            max_iterations: 500,
        }
    }
}

/// A model fitted to one price history.
pub trait FittedModel: Debug {
    /// Project `horizon` steps beyond the fitted history.
    fn predict(&self, horizon: usize) -> Result<Vec<f64>, FitError>;

    /// Standard deviation of the in-sample residuals.
    fn residual_std(&self) -> f64;
}

/// A forecasting model that can be fitted to a close-price history.
pub trait Forecaster: Debug {
    /// The fitted model type produced
    type Fitted: FittedModel;

    /// Fit the model to a close-price history, oldest first.
    fn fit(&self, closes: &[f64], budget: &FitBudget) -> Result<Self::Fitted, FitError>;

    /// Name of the model
    fn name(&self) -> &str;
}
