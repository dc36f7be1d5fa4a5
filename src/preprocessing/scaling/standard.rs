//! Standard Scaler (Z-score normalization).
//!
//! Transforms features by removing the mean and scaling to unit variance.
//!
//! The standard score of a sample `x` is calculated as:
//! ```text
//! z = (x - u) / s
//! ```
//! where `u` is the mean of the training samples, and `s` is the population
//! standard deviation. Constant features keep `s = 1`, so they map to zero.
//!
//! # Example
//! ```
//! use tabular_preprocessor::preprocessing::{
//!     ColumnBlock, FittedTransformer, StandardScaler, Transformer,
//! };
//!
//! let data = ColumnBlock::new(vec!["x".to_string()], vec![vec![1.0, 2.0, 3.0]]).unwrap();
//!
//! let fitted = StandardScaler::new().with_mean(true).with_std(true).fit(&data).unwrap();
//! let scaled = fitted.transform(&data).unwrap();
//! assert_eq!(scaled.columns()[0][1], 0.0);
//! ```

use crate::preprocessing::block::{
    check_feature_names, check_fitted_len, finite_mean, ColumnBlock,
};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Standard deviations at or below this are treated as zero variance.
const ZERO_VARIANCE_TOLERANCE: f64 = 1e-12;

/// Configuration for StandardScaler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardScalerConfig {
    /// If True, center the data before scaling.
    pub with_mean: bool,
    /// If True, scale the data to unit variance.
    pub with_std: bool,
}

impl Default for StandardScalerConfig {
    fn default() -> Self {
        Self {
            with_mean: true,
            with_std: true,
        }
    }
}

/// StandardScaler transformer (unfitted).
///
/// Transforms features by removing the mean and scaling to unit variance.
#[derive(Clone, Debug, Default)]
pub struct StandardScaler {
    config: StandardScalerConfig,
}

impl StandardScaler {
    /// Create a new StandardScaler with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to center data by mean.
    pub fn with_mean(mut self, with_mean: bool) -> Self {
        self.config.with_mean = with_mean;
        self
    }

    /// Set whether to scale data to unit variance.
    pub fn with_std(mut self, with_std: bool) -> Self {
        self.config.with_std = with_std;
        self
    }
}

/// Population mean and standard deviation of one non-empty, finite column.
fn column_moments(values: &[f64]) -> (f64, f64) {
    if values.iter().all(|v| *v == values[0]) {
        return (values[0], 0.0);
    }

    let n = values.len() as f64;
    let mean = finite_mean(values);
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    if var.is_finite() {
        return (mean, var.sqrt());
    }

    // Squared deviations overflowed: rescale by the largest half-deviation
    let half: Vec<f64> = values.iter().map(|v| v / 2.0 - mean / 2.0).collect();
    let scale = half.iter().fold(0.0_f64, |acc, h| acc.max(h.abs()));
    let scaled_var = half.iter().map(|h| (h / scale).powi(2)).sum::<f64>() / n;
    (mean, 2.0 * scale * scaled_var.sqrt())
}

/// `(v - m) / s`, without overflowing when `v` and `m` are far apart.
fn standardize(v: f64, m: f64, s: f64) -> f64 {
    let d = v - m;
    if d.is_finite() {
        d / s
    } else {
        v / s - m / s
    }
}

fn ensure_finite(name: &str, values: &[f64]) -> Result<(), PreprocessingError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(row) => Err(PreprocessingError::InvalidInput(format!(
            "column {:?} has non-finite value {} at row {}",
            name, values[row], row
        ))),
        None => Ok(()),
    }
}

impl Transformer for StandardScaler {
    type Input = ColumnBlock<f64>;
    type Output = ColumnBlock<f64>;
    type Fitted = FittedStandardScaler;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        if data.n_rows() == 0 {
            return Err(PreprocessingError::EmptyDataset(
                "Cannot fit StandardScaler on empty data".to_string(),
            ));
        }

        let mut mean = Vec::with_capacity(data.n_columns());
        let mut std = Vec::with_capacity(data.n_columns());
        for (name, values) in data.iter() {
            ensure_finite(name, values)?;
            let (m, s) = column_moments(values);

            // Handle zero std (constant features)
            let s = if s <= ZERO_VARIANCE_TOLERANCE {
                debug!(column = name, "zero variance column, keeping unit scale");
                1.0
            } else if !s.is_finite() {
                warn!(column = name, "standard deviation overflows, keeping unit scale");
                1.0
            } else {
                s
            };

            mean.push(if self.config.with_mean { m } else { 0.0 });
            std.push(if self.config.with_std { s } else { 1.0 });
        }

        Ok(FittedStandardScaler {
            config: self.config.clone(),
            mean,
            std,
            feature_names_in: data.names().to_vec(),
        })
    }
}

/// Fitted StandardScaler ready for inference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedStandardScaler {
    config: StandardScalerConfig,
    mean: Vec<f64>,
    std: Vec<f64>,
    feature_names_in: Vec<String>,
}

impl FittedStandardScaler {
    /// Get the mean values for each feature.
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Get the standard deviation values for each feature.
    pub fn std(&self) -> &[f64] {
        &self.std
    }

    pub fn config(&self) -> &StandardScalerConfig {
        &self.config
    }

    /// `(mean, std)` of the named column.
    pub fn scaling(&self, column: &str) -> Option<(f64, f64)> {
        self.feature_names_in
            .iter()
            .position(|name| name == column)
            .and_then(|i| Some((*self.mean.get(i)?, *self.std.get(i)?)))
    }
}

impl FittedTransformer for FittedStandardScaler {
    type Input = ColumnBlock<f64>;
    type Output = ColumnBlock<f64>;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        check_feature_names(&self.feature_names_in, data.names())?;
        let n_features = self.feature_names_in.len();
        check_fitted_len("mean", n_features, self.mean.len())?;
        check_fitted_len("std", n_features, self.std.len())?;

        data.map_columns(|col, values| {
            ensure_finite(&self.feature_names_in[col], values)?;
            let (m, s) = (self.mean[col], self.std[col]);
            Ok(values.iter().map(|v| standardize(*v, m, s)).collect())
        })
    }

    fn feature_names_in(&self) -> &[String] {
        &self.feature_names_in
    }
}
