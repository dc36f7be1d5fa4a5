//! Categorical feature encoding transformers.
//!
//! ## OneHotEncoder
//! Converts categorical string values to one-hot (dummy) encoding.
//!
//! ```text
//! color: [red, blue, red]
//! -> color_blue: [0, 1, 0], color_red: [1, 0, 1]
//! ```

mod one_hot;

pub use one_hot::{FittedOneHotEncoder, OneHotEncoder};

use serde::{Deserialize, Serialize};

/// Strategy for handling unknown categories during transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    /// Raise an error when unknown categories are encountered.
    Error,
    /// Ignore unknown categories (output all zeros for that column).
    #[default]
    Ignore,
}
