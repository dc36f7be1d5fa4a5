//! Simple Imputer.
//!
//! Imputation transformers for completing missing values.
//! [`SimpleImputer`] fills numeric columns with the mean, median, most frequent
//! value or a constant. [`CategoricalImputer`] fills categorical columns with
//! their most frequent category.
//!
//! # Example
//! ```
//! use tabular_preprocessor::preprocessing::{
//!     CategoricalImputer, ColumnBlock, FittedTransformer, Transformer,
//! };
//!
//! let data = ColumnBlock::new(
//!     vec!["gender".to_string()],
//!     vec![vec![Some("M".to_string()), Some("F".to_string()), Some("F".to_string()), None]],
//! )
//! .unwrap();
//!
//! let fitted = CategoricalImputer::new().fit(&data).unwrap();
//! assert_eq!(fitted.modes(), ["F".to_string()]);
//! ```

use crate::preprocessing::block::{
    check_feature_names, check_fitted_len, finite_mean, ColumnBlock,
};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Fill value for categorical columns that have no observed value at fit time.
pub const MISSING_CATEGORY: &str = "missing_value";

/// Strategy for imputing missing numeric values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputeStrategy {
    /// Replace missing values with the mean of each column.
    #[default]
    Mean,
    /// Replace missing values with the median of each column.
    Median,
    /// Replace missing values with the most frequent value of each column.
    MostFrequent,
    /// Replace missing values with a constant value.
    Constant(f64),
}

impl fmt::Display for ImputeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImputeStrategy::Mean => write!(f, "mean"),
            ImputeStrategy::Median => write!(f, "median"),
            ImputeStrategy::MostFrequent => write!(f, "most_frequent"),
            ImputeStrategy::Constant(v) => write!(f, "constant({})", v),
        }
    }
}

impl FromStr for ImputeStrategy {
    type Err = PreprocessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mean" => Ok(ImputeStrategy::Mean),
            "median" => Ok(ImputeStrategy::Median),
            "most_frequent" => Ok(ImputeStrategy::MostFrequent),
            other => Err(PreprocessingError::InvalidParameter(format!(
                "unknown imputation strategy {:?} (expected mean, median or most_frequent)",
                other
            ))),
        }
    }
}

/// SimpleImputer transformer (unfitted).
///
/// Imputation transformer for completing missing numeric values.
#[derive(Clone, Debug, Default)]
pub struct SimpleImputer {
    strategy: ImputeStrategy,
}

impl SimpleImputer {
    /// Create a new SimpleImputer with the specified strategy.
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &ImputeStrategy {
        &self.strategy
    }
}

/// Compute the fill value of one column, ignoring missing values.
///
/// Returns `None` when the column has no observed value.
fn compute_statistic(column: &[Option<f64>], strategy: &ImputeStrategy) -> Option<f64> {
    if let ImputeStrategy::Constant(val) = strategy {
        return Some(*val);
    }

    let mut values: Vec<f64> = column
        .iter()
        .filter_map(|v| *v)
        .filter(|v| !v.is_nan())
        .collect();
    if values.is_empty() {
        return None;
    }

    let stat = match strategy {
        ImputeStrategy::Mean => finite_mean(&values),
        ImputeStrategy::Median => {
            values.sort_by(f64::total_cmp);
            let n = values.len();
            if n % 2 == 0 {
                (values[n / 2 - 1] + values[n / 2]) / 2.0
            } else {
                values[n / 2]
            }
        }
        ImputeStrategy::MostFrequent => {
            // Ascending scan keeps the smallest value on ties
            values.sort_by(f64::total_cmp);
            let mut best = values[0];
            let mut best_count = 0;
            let mut i = 0;
            while i < values.len() {
                let run = values[i..].iter().take_while(|&&v| v == values[i]).count();
                if run > best_count {
                    best = values[i];
                    best_count = run;
                }
                i += run;
            }
            best
        }
        ImputeStrategy::Constant(val) => *val,
    };

    Some(stat)
}

impl Transformer for SimpleImputer {
    type Input = ColumnBlock<Option<f64>>;
    type Output = ColumnBlock<f64>;
    type Fitted = FittedSimpleImputer;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        if data.n_rows() == 0 {
            return Err(PreprocessingError::EmptyDataset(
                "Cannot fit SimpleImputer on empty data".to_string(),
            ));
        }

        if let ImputeStrategy::Constant(val) = self.strategy {
            if !val.is_finite() {
                return Err(PreprocessingError::InvalidParameter(format!(
                    "constant fill value must be finite, got {}",
                    val
                )));
            }
        }

        let statistics = data
            .iter()
            .map(|(name, column)| {
                let stat = compute_statistic(column, &self.strategy).unwrap_or_else(|| {
                    warn!(column = name, "numeric column has no observed values, imputing 0.0");
                    0.0
                });
                debug!(column = name, strategy = %self.strategy, statistic = stat, "fitted imputer");
                stat
            })
            .collect();

        Ok(FittedSimpleImputer {
            strategy: self.strategy.clone(),
            statistics,
            feature_names_in: data.names().to_vec(),
        })
    }
}

/// Fitted SimpleImputer ready for inference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedSimpleImputer {
    strategy: ImputeStrategy,
    statistics: Vec<f64>,
    feature_names_in: Vec<String>,
}

impl FittedSimpleImputer {
    /// Get the imputation statistics (fill values) for each feature.
    pub fn statistics(&self) -> &[f64] {
        &self.statistics
    }

    pub fn strategy(&self) -> &ImputeStrategy {
        &self.strategy
    }

    /// Fill value of the named column.
    pub fn statistic(&self, column: &str) -> Option<f64> {
        self.feature_names_in
            .iter()
            .position(|name| name == column)
            .and_then(|i| self.statistics.get(i).copied())
    }
}

impl FittedTransformer for FittedSimpleImputer {
    type Input = ColumnBlock<Option<f64>>;
    type Output = ColumnBlock<f64>;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        check_feature_names(&self.feature_names_in, data.names())?;
        check_fitted_len("statistics", self.feature_names_in.len(), self.statistics.len())?;

        data.map_columns(|col, values| {
            let fill = self.statistics[col];
            Ok(values
                .iter()
                .map(|v| match v {
                    Some(x) if !x.is_nan() => *x,
                    _ => fill,
                })
                .collect())
        })
    }

    fn feature_names_in(&self) -> &[String] {
        &self.feature_names_in
    }
}

/// Most-frequent imputer for categorical columns (unfitted).
///
/// Ties are broken by taking the lexicographically smallest category. A column
/// without any observed value is filled with [`MISSING_CATEGORY`].
#[derive(Clone, Debug, Default)]
pub struct CategoricalImputer;

impl CategoricalImputer {
    pub fn new() -> Self {
        Self
    }
}

fn most_frequent_category(column: &[Option<String>]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in column.iter().flatten() {
        *counts.entry(value.as_str()).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.to_string())
}

impl Transformer for CategoricalImputer {
    type Input = ColumnBlock<Option<String>>;
    type Output = ColumnBlock<String>;
    type Fitted = FittedCategoricalImputer;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        if data.n_rows() == 0 {
            return Err(PreprocessingError::EmptyDataset(
                "Cannot fit CategoricalImputer on empty data".to_string(),
            ));
        }

        let modes = data
            .iter()
            .map(|(name, column)| {
                let mode = most_frequent_category(column).unwrap_or_else(|| {
                    warn!(
                        column = name,
                        fill = MISSING_CATEGORY,
                        "categorical column has no observed values"
                    );
                    MISSING_CATEGORY.to_string()
                });
                debug!(column = name, mode = %mode, "fitted categorical imputer");
                mode
            })
            .collect();

        Ok(FittedCategoricalImputer {
            modes,
            feature_names_in: data.names().to_vec(),
        })
    }
}

/// Fitted CategoricalImputer ready for inference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedCategoricalImputer {
    modes: Vec<String>,
    feature_names_in: Vec<String>,
}

impl FittedCategoricalImputer {
    /// Fill value (most frequent category) for each feature.
    pub fn modes(&self) -> &[String] {
        &self.modes
    }

    /// Fill value of the named column.
    pub fn mode(&self, column: &str) -> Option<&str> {
        self.feature_names_in
            .iter()
            .position(|name| name == column)
            .and_then(|i| self.modes.get(i))
            .map(String::as_str)
    }
}

impl FittedTransformer for FittedCategoricalImputer {
    type Input = ColumnBlock<Option<String>>;
    type Output = ColumnBlock<String>;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        check_feature_names(&self.feature_names_in, data.names())?;
        check_fitted_len("modes", self.feature_names_in.len(), self.modes.len())?;

        data.map_columns(|col, values| {
            let fill = &self.modes[col];
            Ok(values
                .iter()
                .map(|v| v.clone().unwrap_or_else(|| fill.clone()))
                .collect())
        })
    }

    fn feature_names_in(&self) -> &[String] {
        &self.feature_names_in
    }
}
