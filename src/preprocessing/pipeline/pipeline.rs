//! Per-group pipelines chaining an imputer with an optional second step.
//!
//! The output of the imputer becomes the input of the next step, and the next
//! step is always fitted on imputed data.
//!
//! # Example
//! ```
//! use tabular_preprocessor::preprocessing::{
//!     ColumnBlock, FittedTransformer, ImputeStrategy, NumericPipeline, Transformer,
//! };
//!
//! let data = ColumnBlock::new(
//!     vec!["x".to_string()],
//!     vec![vec![Some(1.0), None, Some(3.0)]],
//! )
//! .unwrap();
//!
//! let fitted = NumericPipeline::new(ImputeStrategy::Mean, true).fit(&data).unwrap();
//! let out = fitted.transform(&data).unwrap();
//! assert_eq!(out.columns()[0][1], 0.0);
//! ```

use crate::preprocessing::block::ColumnBlock;
use crate::preprocessing::encoding::{FittedOneHotEncoder, HandleUnknown, OneHotEncoder};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::imputation::{
    CategoricalImputer, FittedCategoricalImputer, FittedSimpleImputer, ImputeStrategy,
    SimpleImputer,
};
use crate::preprocessing::scaling::{FittedStandardScaler, StandardScaler};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Numeric pipeline: imputation followed by optional standard scaling.
#[derive(Clone, Debug)]
pub struct NumericPipeline {
    imputer: SimpleImputer,
    scaler: Option<StandardScaler>,
}

impl NumericPipeline {
    /// Create a pipeline imputing with `strategy`, scaling when `scale` is set.
    pub fn new(strategy: ImputeStrategy, scale: bool) -> Self {
        Self {
            imputer: SimpleImputer::new(strategy),
            scaler: scale.then(StandardScaler::new),
        }
    }
}

impl Transformer for NumericPipeline {
    type Input = ColumnBlock<Option<f64>>;
    type Output = ColumnBlock<f64>;
    type Fitted = FittedNumericPipeline;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        let imputer = self.imputer.fit(data)?;
        debug!(step = "SimpleImputer", n_features = imputer.n_features_in(), "fitted step");

        let scaler = match &self.scaler {
            Some(scaler) => {
                let imputed = imputer.transform(data)?;
                let fitted = scaler.fit(&imputed)?;
                debug!(step = "StandardScaler", n_features = fitted.n_features_in(), "fitted step");
                Some(fitted)
            }
            None => None,
        };

        Ok(FittedNumericPipeline { imputer, scaler })
    }
}

/// Fitted numeric pipeline ready for inference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedNumericPipeline {
    imputer: FittedSimpleImputer,
    scaler: Option<FittedStandardScaler>,
}

impl FittedNumericPipeline {
    pub fn imputer(&self) -> &FittedSimpleImputer {
        &self.imputer
    }

    pub fn scaler(&self) -> Option<&FittedStandardScaler> {
        self.scaler.as_ref()
    }
}

impl FittedTransformer for FittedNumericPipeline {
    type Input = ColumnBlock<Option<f64>>;
    type Output = ColumnBlock<f64>;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let imputed = self.imputer.transform(data)?;
        match &self.scaler {
            Some(scaler) => scaler.transform(&imputed),
            None => Ok(imputed),
        }
    }

    fn feature_names_in(&self) -> &[String] {
        self.imputer.feature_names_in()
    }
}

/// Categorical pipeline: most-frequent imputation followed by optional
/// one-hot encoding.
#[derive(Clone, Debug)]
pub struct CategoricalPipeline {
    imputer: CategoricalImputer,
    encoder: Option<OneHotEncoder>,
}

impl CategoricalPipeline {
    /// Create a pipeline that encodes when `encode` is set.
    pub fn new(encode: bool, handle_unknown: HandleUnknown) -> Self {
        Self {
            imputer: CategoricalImputer::new(),
            encoder: encode.then(|| OneHotEncoder::new().with_handle_unknown(handle_unknown)),
        }
    }
}

/// Output of a categorical pipeline.
///
/// Without an encoder the imputed strings pass through unchanged.
#[derive(Clone, Debug, PartialEq)]
pub enum CategoricalOutput {
    Encoded(ColumnBlock<f64>),
    Passthrough(ColumnBlock<String>),
}

impl Transformer for CategoricalPipeline {
    type Input = ColumnBlock<Option<String>>;
    type Output = CategoricalOutput;
    type Fitted = FittedCategoricalPipeline;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        let imputer = self.imputer.fit(data)?;
        debug!(step = "CategoricalImputer", n_features = imputer.n_features_in(), "fitted step");

        let encoder = match &self.encoder {
            Some(encoder) => {
                let imputed = imputer.transform(data)?;
                let fitted = encoder.fit(&imputed)?;
                debug!(step = "OneHotEncoder", n_features_out = fitted.n_features_out(), "fitted step");
                Some(fitted)
            }
            None => None,
        };

        Ok(FittedCategoricalPipeline { imputer, encoder })
    }
}

/// Fitted categorical pipeline ready for inference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedCategoricalPipeline {
    imputer: FittedCategoricalImputer,
    encoder: Option<FittedOneHotEncoder>,
}

impl FittedCategoricalPipeline {
    pub fn imputer(&self) -> &FittedCategoricalImputer {
        &self.imputer
    }

    pub fn encoder(&self) -> Option<&FittedOneHotEncoder> {
        self.encoder.as_ref()
    }
}

impl FittedTransformer for FittedCategoricalPipeline {
    type Input = ColumnBlock<Option<String>>;
    type Output = CategoricalOutput;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let imputed = self.imputer.transform(data)?;
        match &self.encoder {
            Some(encoder) => encoder.transform(&imputed).map(CategoricalOutput::Encoded),
            None => Ok(CategoricalOutput::Passthrough(imputed)),
        }
    }

    fn feature_names_in(&self) -> &[String] {
        self.imputer.feature_names_in()
    }

    fn feature_names_out(&self) -> Vec<String> {
        match &self.encoder {
            Some(encoder) => encoder.feature_names_out(),
            None => self.feature_names_in().to_vec(),
        }
    }

    fn n_features_out(&self) -> usize {
        match &self.encoder {
            Some(encoder) => encoder.n_features_out(),
            None => self.n_features_in(),
        }
    }
}
