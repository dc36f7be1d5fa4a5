//! Error types for preprocessing operations.

use thiserror::Error;

/// Error type for preprocessing operations.
///
/// Errors are raised at the point of violation and never retried internally.
#[derive(Debug, Error)]
pub enum PreprocessingError {
    /// Input is not table-shaped or holds a value of the wrong type.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A dataset with zero rows was given to `fit`.
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// `transform` was called before a successful `fit`.
    #[error("Not fitted: call fit before transform")]
    NotFitted,

    /// Columns required by the fitted state are absent from the input.
    #[error("Schema mismatch: missing required columns {missing:?}")]
    SchemaMismatch { missing: Vec<String> },

    /// A fitted transformer received a block with the wrong number of columns.
    #[error("Feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },

    /// A category not seen at fit time, raised only under `HandleUnknown::Error`.
    #[error("Unknown category {value:?} in column {column:?}")]
    UnknownCategory { column: String, value: String },

    /// Invalid configuration value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for PreprocessingError {
    fn from(err: bincode::Error) -> Self {
        PreprocessingError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for PreprocessingError {
    fn from(err: serde_json::Error) -> Self {
        PreprocessingError::Serialization(err.to_string())
    }
}

impl From<ndarray::ShapeError> for PreprocessingError {
    fn from(err: ndarray::ShapeError) -> Self {
        PreprocessingError::InvalidInput(err.to_string())
    }
}
