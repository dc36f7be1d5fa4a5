//! Tabular data abstractions for preprocessing workloads.
//!
//! This module provides the [`TabularData`] trait for column-name-indexed access
//! to a two-dimensional table, the [`Value`] cell type, and [`Table`], an
//! in-memory implementation.
//!
//! # Core Concepts
//!
//! - **Table**: an ordered sequence of named columns of equal length.
//! - **Value**: a single cell holding a number, some text, or nothing.
//!   A `Number` holding NaN counts as missing.
//! - **Provider**: anything implementing [`TabularData`]. The preprocessor only
//!   needs column lookup by name, a row count, and per-value missingness and
//!   numeric-ness checks, so callers can plug in their own storage.
//!
//! # Example
//!
//! ```rust
//! use tabular_preprocessor::dataset::{Column, Table, TabularData};
//!
//! let table = Table::new(vec![
//!     Column::new("age", [Some(25.0), Some(30.0), None]),
//!     Column::new("gender", ["M", "F", "F"]),
//! ])
//! .unwrap();
//!
//! assert_eq!(table.n_rows(), 3);
//! assert!(table.column("age").unwrap()[2].is_missing());
//! ```

use crate::preprocessing::error::PreprocessingError;
use std::collections::HashSet;

pub mod memory;
pub mod value;

pub use self::memory::{Column, Table};
pub use self::value::Value;

/// Column-name-indexed access to a two-dimensional table.
///
/// Implementors must return columns whose length equals [`n_rows`](Self::n_rows).
/// Providers that cannot guarantee this are still accepted: the preprocessor
/// checks the shape and reports [`PreprocessingError::InvalidInput`].
///
/// # Example Implementation
///
/// ```rust
/// use tabular_preprocessor::dataset::{TabularData, Value};
///
/// struct SingleColumn {
///     values: Vec<Value>,
/// }
///
/// impl TabularData for SingleColumn {
///     fn column_names(&self) -> Vec<&str> {
///         vec!["x"]
///     }
///
///     fn n_rows(&self) -> usize {
///         self.values.len()
///     }
///
///     fn column(&self, name: &str) -> Option<&[Value]> {
///         (name == "x").then_some(self.values.as_slice())
///     }
/// }
/// ```
pub trait TabularData {
    /// Names of all columns, in table order.
    fn column_names(&self) -> Vec<&str>;

    /// Number of rows in the table.
    fn n_rows(&self) -> usize;

    /// Values of the named column, or `None` if the column does not exist.
    fn column(&self, name: &str) -> Option<&[Value]>;

    /// Returns `true` if the named column exists.
    fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}

/// Check that a provider is table-shaped: at least one column, unique
/// non-empty names, and every column `n_rows` long.
pub(crate) fn validate_table_shape<D: TabularData + ?Sized>(
    data: &D,
) -> Result<(), PreprocessingError> {
    let names = data.column_names();
    if names.is_empty() {
        return Err(PreprocessingError::InvalidInput(
            "table has no columns".to_string(),
        ));
    }

    let n_rows = data.n_rows();
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if name.is_empty() {
            return Err(PreprocessingError::InvalidInput(
                "column names must be non-empty".to_string(),
            ));
        }
        if !seen.insert(name) {
            return Err(PreprocessingError::InvalidInput(format!(
                "duplicate column name {:?}",
                name
            )));
        }
        let values = data.column(name).ok_or_else(|| {
            PreprocessingError::InvalidInput(format!(
                "column {:?} is listed but cannot be accessed",
                name
            ))
        })?;
        if values.len() != n_rows {
            return Err(PreprocessingError::InvalidInput(format!(
                "column {:?} has {} values, expected {}",
                name,
                values.len(),
                n_rows
            )));
        }
    }

    Ok(())
}
