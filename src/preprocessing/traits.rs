//! Core traits for preprocessing transformers.
//!
//! This module defines the two central traits:
//! - [`Transformer`]: Used during fitting; has hyperparameters and can learn from data.
//! - [`FittedTransformer`]: After fitting; holds learned parameters and transforms data.
//!
//! Fitted transformers are plain data (they derive `Serialize`/`Deserialize`), so
//! any of them can be turned into bytes through
//! [`SerializableParams`](crate::serialization::SerializableParams).

use crate::preprocessing::error::PreprocessingError;

/// Trait for unfitted transformers with hyperparameters.
///
/// A transformer learns parameters from training data and can then transform
/// new data using those learned parameters. This trait represents the
/// configurable, unfitted state.
///
/// # Example
/// ```
/// use tabular_preprocessor::preprocessing::{
///     ColumnBlock, FittedTransformer, ImputeStrategy, SimpleImputer, Transformer,
/// };
///
/// let data = ColumnBlock::new(
///     vec!["age".to_string()],
///     vec![vec![Some(25.0), Some(30.0), None]],
/// )
/// .unwrap();
///
/// let fitted = SimpleImputer::new(ImputeStrategy::Mean).fit(&data).unwrap();
/// let imputed = fitted.transform(&data).unwrap();
/// assert_eq!(imputed.columns()[0][2], 27.5);
/// ```
pub trait Transformer: Clone {
    /// Input data type for fitting and transformation.
    type Input: ?Sized;
    /// Output data type after transformation.
    type Output;
    /// The fitted transformer type ready for inference.
    type Fitted: FittedTransformer<Input = Self::Input, Output = Self::Output>;

    /// Fit the transformer to the training data.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if:
    /// - Data is empty
    /// - Data contains invalid values
    /// - Hyperparameters are invalid
    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError>;

    /// Fit the transformer and transform the data in one step.
    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

/// Trait for fitted transformers ready for inference.
///
/// After fitting, a transformer contains learned parameters (e.g. the per-column
/// mean and std of a standard scaler) and can transform new data. It never
/// mutates itself while transforming.
pub trait FittedTransformer: Clone {
    /// Input data type for transformation.
    type Input: ?Sized;
    /// Output data type after transformation.
    type Output;

    /// Transform data using learned parameters.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if:
    /// - Input columns don't match the columns seen during fit
    /// - Input contains invalid values
    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError>;

    /// Names of the columns seen during fit, in order.
    fn feature_names_in(&self) -> &[String];

    /// Names of the produced columns, in order.
    ///
    /// Defaults to the input names, which is right for column-wise transformers.
    fn feature_names_out(&self) -> Vec<String> {
        self.feature_names_in().to_vec()
    }

    /// Returns the number of features seen during fit.
    fn n_features_in(&self) -> usize {
        self.feature_names_in().len()
    }

    /// Returns the number of features produced by `transform`.
    fn n_features_out(&self) -> usize {
        self.n_features_in()
    }
}
