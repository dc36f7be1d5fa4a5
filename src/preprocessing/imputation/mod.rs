//! Imputation transformers for handling missing values.
//!
//! # Available Transformers
//!
//! | Transformer | Description |
//! |-------------|-------------|
//! | [`SimpleImputer`] | Impute numeric columns with mean, median, most_frequent, or constant |
//! | [`CategoricalImputer`] | Impute categorical columns with their most frequent category |

pub mod simple;

pub use simple::{
    CategoricalImputer, FittedCategoricalImputer, FittedSimpleImputer, ImputeStrategy,
    SimpleImputer, MISSING_CATEGORY,
};
