//! Output of a fitted preprocessor.

use crate::preprocessing::error::PreprocessingError;
use ndarray::Array2;

/// One column of transformed output.
#[derive(Clone, Debug, PartialEq)]
pub enum OutputColumn {
    /// Imputed (and possibly scaled) numeric values, or one-hot indicators.
    Numeric(Vec<f64>),
    /// Imputed raw categories, produced when encoding is disabled.
    Text(Vec<String>),
}

impl OutputColumn {
    pub fn len(&self) -> usize {
        match self {
            OutputColumn::Numeric(values) => values.len(),
            OutputColumn::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            OutputColumn::Numeric(values) => Some(values),
            OutputColumn::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            OutputColumn::Text(values) => Some(values),
            OutputColumn::Numeric(_) => None,
        }
    }
}

/// Transformed table: numeric group outputs first, then categorical outputs.
///
/// Row count and row order always match the input. Feature names are absent
/// only when they could not be reconstructed.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformedTable {
    columns: Vec<OutputColumn>,
    feature_names: Option<Vec<String>>,
    n_rows: usize,
}

impl TransformedTable {
    pub(crate) fn new(
        columns: Vec<OutputColumn>,
        feature_names: Option<Vec<String>>,
        n_rows: usize,
    ) -> Self {
        Self {
            columns,
            feature_names,
            n_rows,
        }
    }

    /// Ordered output feature names, if available.
    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    pub fn columns(&self) -> &[OutputColumn] {
        &self.columns
    }

    /// Look up an output column by feature name.
    pub fn column(&self, name: &str) -> Option<&OutputColumn> {
        self.feature_names
            .as_ref()?
            .iter()
            .position(|n| n == name)
            .and_then(|i| self.columns.get(i))
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Dense row-major `(n_rows, n_columns)` matrix of the output.
    ///
    /// # Errors
    /// [`PreprocessingError::InvalidInput`] if a passthrough text column is present.
    pub fn to_array2(&self) -> Result<Array2<f64>, PreprocessingError> {
        let numeric = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                column.as_numeric().ok_or_else(|| {
                    let name = self
                        .feature_names
                        .as_ref()
                        .and_then(|names| names.get(idx).cloned())
                        .unwrap_or_else(|| format!("#{}", idx));
                    PreprocessingError::InvalidInput(format!(
                        "column {} holds text and cannot be converted to a numeric matrix",
                        name
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut data = Vec::with_capacity(self.n_rows * numeric.len());
        for row in 0..self.n_rows {
            data.extend(numeric.iter().map(|values| values[row]));
        }
        Ok(Array2::from_shape_vec(
            (self.n_rows, self.columns.len()),
            data,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TransformedTable {
        TransformedTable::new(
            vec![
                OutputColumn::Numeric(vec![1.0, 2.0]),
                OutputColumn::Numeric(vec![0.0, 1.0]),
            ],
            Some(vec!["age".to_string(), "color_red".to_string()]),
            2,
        )
    }

    #[test]
    fn test_transformed_table_column_lookup() {
        let t = table();
        assert_eq!(t.n_columns(), 2);
        assert_eq!(
            t.column("color_red").and_then(OutputColumn::as_numeric),
            Some(&[0.0, 1.0][..])
        );
        assert!(t.column("color_blue").is_none());
    }

    #[test]
    fn test_transformed_table_to_array2() {
        let arr = table().to_array2().unwrap();
        assert_eq!(arr.shape(), &[2, 2]);
        assert_eq!(arr[[0, 0]], 1.0);
        assert_eq!(arr[[1, 1]], 1.0);
    }

    #[test]
    fn test_transformed_table_to_array2_rejects_text() {
        let t = TransformedTable::new(
            vec![OutputColumn::Text(vec!["a".to_string()])],
            Some(vec!["city".to_string()]),
            1,
        );
        assert!(matches!(
            t.to_array2(),
            Err(PreprocessingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_transformed_table_without_names() {
        let t = TransformedTable::new(vec![OutputColumn::Numeric(vec![1.0])], None, 1);
        assert!(t.feature_names().is_none());
        assert!(t.column("age").is_none());
        assert_eq!(t.to_array2().unwrap().shape(), &[1, 1]);
    }
}
