//! Pipeline utilities for chaining transformers.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`NumericPipeline`] | Impute, then optionally standard-scale |
//! | [`CategoricalPipeline`] | Impute most frequent, then optionally one-hot encode |

#[allow(clippy::module_inception)]
pub mod pipeline;

pub use pipeline::{
    CategoricalOutput, CategoricalPipeline, FittedCategoricalPipeline, FittedNumericPipeline,
    NumericPipeline,
};
