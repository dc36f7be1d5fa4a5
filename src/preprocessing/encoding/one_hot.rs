//! One-hot encoding for categorical features.
//!
//! Transforms categorical string values to one-hot (dummy) encoded columns.
//! Each input column `c` with learned categories `v1 < v2 < ...` produces the
//! output columns `c_v1`, `c_v2`, ... in that order.

use crate::preprocessing::block::{check_feature_names, check_fitted_len, ColumnBlock};
use crate::preprocessing::encoding::HandleUnknown;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// One-hot encoder for categorical features.
///
/// Each input column is treated as a categorical feature, and the encoder
/// learns the unique values (categories) present in each column during fitting.
///
/// # Example
/// ```
/// use tabular_preprocessor::preprocessing::{
///     ColumnBlock, FittedTransformer, OneHotEncoder, Transformer,
/// };
///
/// let data = ColumnBlock::new(
///     vec!["color".to_string()],
///     vec![vec!["red".to_string(), "blue".to_string()]],
/// )
/// .unwrap();
///
/// let fitted = OneHotEncoder::new().fit(&data).unwrap();
/// assert_eq!(fitted.feature_names_out(), vec!["color_blue", "color_red"]);
///
/// let encoded = fitted.transform(&data).unwrap();
/// assert_eq!(encoded.columns()[0], vec![0.0, 1.0]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct OneHotEncoder {
    /// How to handle unknown categories during transform.
    handle_unknown: HandleUnknown,
}

impl OneHotEncoder {
    /// Create a new OneHotEncoder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strategy for handling unknown categories.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }
}

impl Transformer for OneHotEncoder {
    type Input = ColumnBlock<String>;
    type Output = ColumnBlock<f64>;
    type Fitted = FittedOneHotEncoder;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        if data.n_rows() == 0 {
            return Err(PreprocessingError::EmptyDataset(
                "Cannot fit OneHotEncoder on empty data".to_string(),
            ));
        }

        let categories = data
            .iter()
            .map(|(name, values)| {
                let unique: BTreeSet<&str> = values.iter().map(String::as_str).collect();
                debug!(column = name, n_categories = unique.len(), "fitted one-hot encoder");
                unique.into_iter().map(str::to_string).collect()
            })
            .collect();

        Ok(FittedOneHotEncoder {
            handle_unknown: self.handle_unknown,
            categories,
            feature_names_in: data.names().to_vec(),
        })
    }
}

/// Fitted OneHotEncoder ready for inference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedOneHotEncoder {
    handle_unknown: HandleUnknown,
    /// Sorted categories for each input column.
    categories: Vec<Vec<String>>,
    feature_names_in: Vec<String>,
}

impl FittedOneHotEncoder {
    /// Get the learned categories for each feature.
    pub fn categories(&self) -> &[Vec<String>] {
        &self.categories
    }

    pub fn handle_unknown(&self) -> HandleUnknown {
        self.handle_unknown
    }

    /// Learned vocabulary of the named column.
    pub fn vocabulary(&self, column: &str) -> Option<&[String]> {
        self.feature_names_in
            .iter()
            .position(|name| name == column)
            .and_then(|i| self.categories.get(i))
            .map(Vec::as_slice)
    }
}

impl FittedTransformer for FittedOneHotEncoder {
    type Input = ColumnBlock<String>;
    type Output = ColumnBlock<f64>;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        check_feature_names(&self.feature_names_in, data.names())?;
        check_fitted_len("categories", self.feature_names_in.len(), self.categories.len())?;
        // Lookup is a binary search
        if let Some((name, _)) = self
            .feature_names_in
            .iter()
            .zip(&self.categories)
            .find(|(_, cats)| cats.windows(2).any(|w| w[0] >= w[1]))
        {
            return Err(PreprocessingError::InvalidInput(format!(
                "inconsistent fitted state: categories of {:?} are not sorted and unique",
                name
            )));
        }

        let mut columns = Vec::with_capacity(self.n_features_out());
        for ((name, values), categories) in data.iter().zip(&self.categories) {
            let mut encoded = vec![vec![0.0; data.n_rows()]; categories.len()];
            let mut n_unknown = 0usize;

            for (row, value) in values.iter().enumerate() {
                match categories.binary_search(value) {
                    Ok(idx) => encoded[idx][row] = 1.0,
                    Err(_) => match self.handle_unknown {
                        HandleUnknown::Ignore => n_unknown += 1,
                        HandleUnknown::Error => {
                            return Err(PreprocessingError::UnknownCategory {
                                column: name.to_string(),
                                value: value.clone(),
                            })
                        }
                    },
                }
            }

            if n_unknown > 0 {
                debug!(column = name, n_unknown, "unknown categories encoded as all zeros");
            }
            columns.extend(encoded);
        }

        ColumnBlock::new(self.feature_names_out(), columns)
    }

    fn feature_names_in(&self) -> &[String] {
        &self.feature_names_in
    }

    fn feature_names_out(&self) -> Vec<String> {
        self.feature_names_in
            .iter()
            .zip(&self.categories)
            .flat_map(|(name, cats)| cats.iter().map(move |cat| format!("{}_{}", name, cat)))
            .collect()
    }

    fn n_features_out(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }
}
