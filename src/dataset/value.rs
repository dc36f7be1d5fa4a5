//! Cell values of a tabular dataset.

use serde::{Deserialize, Serialize};

/// A single cell of a table.
///
/// `Number(f64::NAN)` is treated exactly like `Missing`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// No value recorded.
    #[default]
    Missing,
    /// A numeric value.
    Number(f64),
    /// A textual (categorical) value.
    Text(String),
}

impl Value {
    /// Returns `true` for `Missing` and for NaN numbers.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Number(v) => v.is_nan(),
            Value::Text(_) => false,
        }
    }

    /// Returns `true` for non-missing numbers.
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// The numeric value, if this cell holds a non-missing number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    /// The value as a category label.
    ///
    /// Numbers are rendered with their shortest display form (`1` for `1.0`).
    pub fn as_category(&self) -> Option<String> {
        match self {
            Value::Missing => None,
            Value::Number(v) if v.is_nan() => None,
            Value::Number(v) => Some(v.to_string()),
            Value::Text(s) => Some(s.clone()),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Missing, Into::into)
    }
}
