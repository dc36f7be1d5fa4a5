//! Data preprocessing transformers for tabular datasets.
//!
//! The entry point is [`TabularPreprocessor`], which partitions a table into
//! numeric and categorical columns and runs a pipeline on each group. The
//! building blocks are usable on their own.
//!
//! # Core Traits
//!
//! - [`Transformer`]: Unfitted transformer with hyperparameters
//! - [`FittedTransformer`]: Fitted transformer ready for inference
//!
//! # Available Transformers
//!
//! ## Imputation
//! - [`SimpleImputer`]: Fill missing numbers with mean, median, most_frequent, or constant
//! - [`CategoricalImputer`]: Fill missing categories with the most frequent one
//!
//! ## Scaling
//! - [`StandardScaler`]: Z-score normalization
//!
//! ## Encoding
//! - [`OneHotEncoder`]: One indicator column per learned category
//!
//! ## Composition
//! - [`NumericPipeline`] / [`CategoricalPipeline`]: Impute, then scale or encode
//! - [`ColumnTransformer`]: Apply both pipelines to their column groups
//!
//! # Example
//!
//! ```
//! use tabular_preprocessor::dataset::{Column, Table};
//! use tabular_preprocessor::preprocessing::{PreprocessorConfig, TabularPreprocessor};
//! use tabular_preprocessor::serialization::SerializableParams;
//! use tabular_preprocessor::preprocessing::FittedState;
//!
//! let train = Table::new(vec![
//!     Column::new("size", [1.0, 2.0, 3.0]),
//!     Column::new("color", ["red", "blue", "red"]),
//! ])
//! .unwrap();
//!
//! let mut preprocessor = TabularPreprocessor::new(PreprocessorConfig::default());
//! preprocessor.fit(&train).unwrap();
//!
//! // The fitted state is plain data and can be moved around as bytes
//! let bytes = preprocessor.state().unwrap().to_bytes().unwrap();
//! let restored = TabularPreprocessor::from_state(FittedState::from_bytes(&bytes).unwrap());
//!
//! assert_eq!(
//!     restored.transform(&train).unwrap(),
//!     preprocessor.transform(&train).unwrap()
//! );
//! ```

pub mod block;
pub mod column_transformer;
pub mod encoding;
pub mod error;
pub mod imputation;
pub mod output;
pub mod pipeline;
pub mod preprocessor;
pub mod scaling;
pub mod traits;

// Re-export main types
pub use block::ColumnBlock;
pub use column_transformer::{
    ColumnGroups, ColumnKind, ColumnSpec, ColumnTransformer, FittedColumnTransformer,
};
pub use encoding::{FittedOneHotEncoder, HandleUnknown, OneHotEncoder};
pub use error::PreprocessingError;
pub use imputation::{
    CategoricalImputer, FittedCategoricalImputer, FittedSimpleImputer, ImputeStrategy,
    SimpleImputer, MISSING_CATEGORY,
};
pub use output::{OutputColumn, TransformedTable};
pub use pipeline::{
    CategoricalOutput, CategoricalPipeline, FittedCategoricalPipeline, FittedNumericPipeline,
    NumericPipeline,
};
pub use preprocessor::{FittedState, PreprocessorConfig, TabularPreprocessor};
pub use scaling::{FittedStandardScaler, StandardScaler, StandardScalerConfig};
pub use traits::{FittedTransformer, Transformer};
