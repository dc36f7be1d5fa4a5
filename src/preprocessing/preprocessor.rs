//! Tabular preprocessor: impute, scale and one-hot encode a mixed-type table.
//!
//! [`TabularPreprocessor`] learns a [`FittedState`] from a training table and
//! applies it to later tables with the same columns:
//!
//! - numeric columns: impute (mean, median, most frequent or a constant), then
//!   standard-scale when `scale` is set
//! - categorical columns: impute the most frequent category, then one-hot
//!   encode when `encode` is set (otherwise the imputed category passes through)
//!
//! # Example
//! ```
//! use tabular_preprocessor::dataset::{Column, Table};
//! use tabular_preprocessor::preprocessing::{PreprocessorConfig, TabularPreprocessor};
//!
//! let train = Table::new(vec![
//!     Column::new("age", [Some(25.0), Some(30.0), None]),
//!     Column::new("gender", [Some("M"), Some("F"), Some("F")]),
//! ])
//! .unwrap();
//!
//! let mut preprocessor = TabularPreprocessor::new(PreprocessorConfig::default().with_scaling(false));
//! preprocessor.fit(&train).unwrap();
//!
//! let out = preprocessor.transform(&train).unwrap();
//! assert_eq!(out.feature_names().unwrap(), ["age", "gender_F", "gender_M"]);
//! assert_eq!(out.to_array2().unwrap()[[2, 0]], 27.5);
//! ```

use crate::dataset::TabularData;
use crate::preprocessing::column_transformer::{
    ColumnGroups, ColumnSpec, ColumnTransformer, FittedColumnTransformer,
};
use crate::preprocessing::encoding::HandleUnknown;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::imputation::ImputeStrategy;
use crate::preprocessing::output::TransformedTable;
use crate::preprocessing::pipeline::{CategoricalPipeline, NumericPipeline};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for [`TabularPreprocessor`].
///
/// Missing fields take their default when deserialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessorConfig {
    /// Imputation strategy for numeric columns. Categorical columns always use
    /// the most frequent category.
    pub strategy: ImputeStrategy,
    /// Standard-scale numeric columns after imputation.
    pub scale: bool,
    /// One-hot encode categorical columns after imputation.
    pub encode: bool,
    /// Policy for categories not seen during fit.
    pub handle_unknown: HandleUnknown,
    /// Declared numeric columns. When either list is set, only declared
    /// columns are used.
    pub numeric_columns: Option<Vec<String>>,
    /// Declared categorical columns.
    pub categorical_columns: Option<Vec<String>>,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            strategy: ImputeStrategy::Mean,
            scale: true,
            encode: true,
            handle_unknown: HandleUnknown::Ignore,
            numeric_columns: None,
            categorical_columns: None,
        }
    }
}

impl PreprocessorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON; absent fields keep their defaults.
    ///
    /// ```
    /// use tabular_preprocessor::preprocessing::{ImputeStrategy, PreprocessorConfig};
    ///
    /// let config = PreprocessorConfig::from_json(r#"{"strategy": "median", "scale": false}"#).unwrap();
    /// assert_eq!(config.strategy, ImputeStrategy::Median);
    /// assert!(config.encode);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, PreprocessingError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_strategy(mut self, strategy: ImputeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_scaling(mut self, scale: bool) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_encoding(mut self, encode: bool) -> Self {
        self.encode = encode;
        self
    }

    pub fn with_handle_unknown(mut self, handle_unknown: HandleUnknown) -> Self {
        self.handle_unknown = handle_unknown;
        self
    }

    pub fn with_numeric_columns<S: Into<String>>(
        mut self,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        self.numeric_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_categorical_columns<S: Into<String>>(
        mut self,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        self.categorical_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Check the configuration without looking at any data.
    ///
    /// # Errors
    /// [`PreprocessingError::InvalidParameter`] if the constant fill value is
    /// not finite, or the declared column lists are empty, repeat a name or
    /// overlap.
    pub fn validate(&self) -> Result<(), PreprocessingError> {
        if let ImputeStrategy::Constant(val) = self.strategy {
            if !val.is_finite() {
                return Err(PreprocessingError::InvalidParameter(format!(
                    "constant fill value must be finite, got {}",
                    val
                )));
            }
        }
        self.column_spec().validate()
    }

    pub(crate) fn column_spec(&self) -> ColumnSpec {
        if self.numeric_columns.is_none() && self.categorical_columns.is_none() {
            return ColumnSpec::Infer;
        }
        ColumnSpec::Declared {
            numeric: self.numeric_columns.clone().unwrap_or_default(),
            categorical: self.categorical_columns.clone().unwrap_or_default(),
        }
    }

    fn column_transformer(&self) -> ColumnTransformer {
        ColumnTransformer::new(
            self.column_spec(),
            NumericPipeline::new(self.strategy.clone(), self.scale),
            CategoricalPipeline::new(self.encode, self.handle_unknown),
        )
    }
}

/// Everything learned by a fit, as plain serializable data.
///
/// Immutable once produced. Use
/// [`SerializableParams`](crate::serialization::SerializableParams) to turn it
/// into bytes and back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedState {
    config: PreprocessorConfig,
    transformer: FittedColumnTransformer,
}

impl FittedState {
    /// Apply the fitted transformations to `data`.
    pub fn transform<D: TabularData + ?Sized>(
        &self,
        data: &D,
    ) -> Result<TransformedTable, PreprocessingError> {
        self.transformer.transform(data)
    }

    /// Configuration the state was fitted with.
    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    /// Numeric/categorical partition of the used columns.
    pub fn groups(&self) -> &ColumnGroups {
        self.transformer.groups()
    }

    /// Ordered output feature names, if they could be reconstructed.
    pub fn feature_names(&self) -> Option<&[String]> {
        self.transformer.feature_names()
    }

    pub fn n_features_out(&self) -> usize {
        self.transformer.n_features_out()
    }

    /// Imputation fill value of a numeric column.
    pub fn imputation_statistic(&self, column: &str) -> Option<f64> {
        self.transformer.numeric()?.imputer().statistic(column)
    }

    /// `(mean, std)` of a numeric column, if scaling is enabled.
    pub fn scaling(&self, column: &str) -> Option<(f64, f64)> {
        self.transformer.numeric()?.scaler()?.scaling(column)
    }

    /// Most frequent category of a categorical column.
    pub fn mode(&self, column: &str) -> Option<&str> {
        self.transformer.categorical()?.imputer().mode(column)
    }

    /// Sorted vocabulary of a categorical column, if encoding is enabled.
    pub fn vocabulary(&self, column: &str) -> Option<&[String]> {
        self.transformer.categorical()?.encoder()?.vocabulary(column)
    }

    pub fn handle_unknown(&self) -> HandleUnknown {
        self.config.handle_unknown
    }
}

/// Fit/transform front end holding a configuration and, after a successful
/// fit, a [`FittedState`].
#[derive(Clone, Debug, Default)]
pub struct TabularPreprocessor {
    config: PreprocessorConfig,
    state: Option<FittedState>,
}

impl TabularPreprocessor {
    pub fn new(config: PreprocessorConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Wrap a previously fitted state.
    pub fn from_state(state: FittedState) -> Self {
        Self {
            config: state.config.clone(),
            state: Some(state),
        }
    }

    /// Learn a fitted state from `data` without touching `self`.
    ///
    /// # Errors
    /// - [`PreprocessingError::InvalidParameter`] for an invalid configuration
    /// - [`PreprocessingError::InvalidInput`] if `data` is not table-shaped or a
    ///   numeric column holds text
    /// - [`PreprocessingError::EmptyDataset`] if `data` has zero rows
    /// - [`PreprocessingError::SchemaMismatch`] if a declared column is absent
    pub fn fit_state<D: TabularData + ?Sized>(
        &self,
        data: &D,
    ) -> Result<FittedState, PreprocessingError> {
        self.config.validate()?;
        debug!(config = ?self.config, "fitting preprocessor");

        let transformer = self.config.column_transformer().fit(data)?;
        Ok(FittedState {
            config: self.config.clone(),
            transformer,
        })
    }

    /// Fit on `data`, replacing any previous state.
    ///
    /// On error the previous state is left untouched.
    pub fn fit<D: TabularData + ?Sized>(
        &mut self,
        data: &D,
    ) -> Result<&mut Self, PreprocessingError> {
        let state = self.fit_state(data)?;
        self.state = Some(state);
        Ok(self)
    }

    /// Fit on `data` with a new configuration.
    ///
    /// The configuration is only adopted if the fit succeeds.
    pub fn fit_with_config<D: TabularData + ?Sized>(
        &mut self,
        data: &D,
        config: PreprocessorConfig,
    ) -> Result<&mut Self, PreprocessingError> {
        let staged = TabularPreprocessor::new(config);
        let state = staged.fit_state(data)?;
        self.config = staged.config;
        self.state = Some(state);
        Ok(self)
    }

    /// Transform `data` with the fitted state.
    ///
    /// # Errors
    /// [`PreprocessingError::NotFitted`] before a successful fit, otherwise
    /// as [`FittedState::transform`].
    pub fn transform<D: TabularData + ?Sized>(
        &self,
        data: &D,
    ) -> Result<TransformedTable, PreprocessingError> {
        self.state
            .as_ref()
            .ok_or(PreprocessingError::NotFitted)?
            .transform(data)
    }

    pub fn fit_transform<D: TabularData + ?Sized>(
        &mut self,
        data: &D,
    ) -> Result<TransformedTable, PreprocessingError> {
        self.fit(data)?.transform(data)
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&FittedState> {
        self.state.as_ref()
    }

    pub fn into_state(self) -> Option<FittedState> {
        self.state
    }

    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    /// Output feature names of the fitted state.
    pub fn feature_names(&self) -> Option<&[String]> {
        self.state.as_ref()?.feature_names()
    }
}
