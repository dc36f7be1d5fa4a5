//! Fit/transform preprocessing for mixed-type tabular data.
//!
//! A [`TabularPreprocessor`] imputes missing values, standard-scales numeric
//! columns and one-hot encodes categorical columns. It learns a
//! [`FittedState`] once and applies it to any later table with the same
//! columns.
//!
//! - [`dataset`]: cell values, in-memory tables and the [`TabularData`] trait
//! - [`preprocessing`]: transformers, pipelines and the preprocessor itself
//! - [`serialization`]: byte encoding of fitted state
//!
//! The crate logs through `tracing` and never installs a subscriber.

pub mod dataset;
pub mod preprocessing;
pub mod serialization;

pub use dataset::{Column, Table, TabularData, Value};
pub use preprocessing::{
    FittedState, HandleUnknown, ImputeStrategy, PreprocessingError, PreprocessorConfig,
    TabularPreprocessor, TransformedTable,
};
pub use serialization::SerializableParams;
