//! Named column blocks passed between transformers.
//!
//! A [`ColumnBlock`] is the column-major unit of data every transformer in this
//! crate consumes and produces: a list of column names with one value vector
//! per name, all of the same length.

use crate::preprocessing::error::PreprocessingError;

/// A rectangular, column-major block of named columns.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnBlock<T> {
    names: Vec<String>,
    columns: Vec<Vec<T>>,
    n_rows: usize,
}

impl<T> ColumnBlock<T> {
    /// Create a block, checking that names and columns line up and that all
    /// columns have the same length.
    pub fn new(names: Vec<String>, columns: Vec<Vec<T>>) -> Result<Self, PreprocessingError> {
        if names.len() != columns.len() {
            return Err(PreprocessingError::InvalidInput(format!(
                "{} column names given for {} columns",
                names.len(),
                columns.len()
            )));
        }

        let n_rows = columns.first().map_or(0, Vec::len);
        if let Some((name, col)) = names
            .iter()
            .zip(&columns)
            .find(|(_, col)| col.len() != n_rows)
        {
            return Err(PreprocessingError::InvalidInput(format!(
                "column {:?} has {} values, expected {}",
                name,
                col.len(),
                n_rows
            )));
        }

        Ok(Self {
            names,
            columns,
            n_rows,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn columns(&self) -> &[Vec<T>] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Iterate over `(name, values)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// Split into names and columns.
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<T>>) {
        (self.names, self.columns)
    }

    /// Build a block whose columns come from applying `f` to each input column.
    ///
    /// Row count and names are preserved.
    pub(crate) fn map_columns<U, F>(&self, mut f: F) -> Result<ColumnBlock<U>, PreprocessingError>
    where
        F: FnMut(usize, &[T]) -> Result<Vec<U>, PreprocessingError>,
    {
        let columns = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| f(i, col))
            .collect::<Result<Vec<_>, _>>()?;
        ColumnBlock::new(self.names.clone(), columns)
    }
}

/// Mean of `values`, which must be non-empty and finite.
///
/// Falls back to summing pre-divided values when the plain sum overflows, so
/// the result is always finite.
pub(crate) fn finite_mean(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        return sum / n;
    }
    values
        .iter()
        .map(|v| v / n)
        .sum::<f64>()
        .clamp(f64::MIN, f64::MAX)
}

/// Check that a per-feature parameter of a fitted transformer has one entry
/// per fitted column.
///
/// Fitted transformers are plain serde data, so a deserialized value may not
/// satisfy this.
pub(crate) fn check_fitted_len(
    param: &str,
    n_features: usize,
    len: usize,
) -> Result<(), PreprocessingError> {
    if n_features == len {
        Ok(())
    } else {
        Err(PreprocessingError::InvalidInput(format!(
            "inconsistent fitted state: {} entries of {} for {} fitted columns",
            len, param, n_features
        )))
    }
}

/// Check a block against the columns a transformer was fitted on.
pub(crate) fn check_feature_names(
    expected: &[String],
    got: &[String],
) -> Result<(), PreprocessingError> {
    if expected.len() != got.len() {
        return Err(PreprocessingError::FeatureMismatch {
            expected_features: expected.len(),
            got_features: got.len(),
        });
    }

    let missing: Vec<String> = expected
        .iter()
        .filter(|name| !got.contains(name))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(PreprocessingError::SchemaMismatch { missing });
    }

    if expected != got {
        return Err(PreprocessingError::InvalidInput(format!(
            "columns {:?} are out of order, expected {:?}",
            got, expected
        )));
    }

    Ok(())
}
