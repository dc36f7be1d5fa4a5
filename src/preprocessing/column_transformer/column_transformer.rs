//! ColumnTransformer implementation.
//!
//! Partitions a table into numeric and categorical columns, applies the
//! matching pipeline to each group and concatenates results: numeric outputs
//! first, then categorical outputs.

use crate::dataset::{validate_table_shape, TabularData, Value};
use crate::preprocessing::block::ColumnBlock;
use crate::preprocessing::column_transformer::{ColumnGroups, ColumnSpec};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::output::{OutputColumn, TransformedTable};
use crate::preprocessing::pipeline::{
    CategoricalOutput, CategoricalPipeline, FittedCategoricalPipeline, FittedNumericPipeline,
    NumericPipeline,
};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Applies a numeric and a categorical pipeline to their column groups.
///
/// # Example
/// ```
/// use tabular_preprocessor::dataset::{Column, Table};
/// use tabular_preprocessor::preprocessing::{
///     CategoricalPipeline, ColumnSpec, ColumnTransformer, HandleUnknown, ImputeStrategy,
///     NumericPipeline,
/// };
///
/// let table = Table::new(vec![
///     Column::new("age", [Some(25.0), Some(30.0), None]),
///     Column::new("gender", ["M", "F", "F"]),
/// ])
/// .unwrap();
///
/// let fitted = ColumnTransformer::new(
///     ColumnSpec::Infer,
///     NumericPipeline::new(ImputeStrategy::Mean, false),
///     CategoricalPipeline::new(true, HandleUnknown::Ignore),
/// )
/// .fit(&table)
/// .unwrap();
///
/// let out = fitted.transform(&table).unwrap();
/// assert_eq!(out.feature_names().unwrap(), ["age", "gender_F", "gender_M"]);
/// ```
#[derive(Clone, Debug)]
pub struct ColumnTransformer {
    spec: ColumnSpec,
    numeric: NumericPipeline,
    categorical: CategoricalPipeline,
}

impl ColumnTransformer {
    pub fn new(spec: ColumnSpec, numeric: NumericPipeline, categorical: CategoricalPipeline) -> Self {
        Self {
            spec,
            numeric,
            categorical,
        }
    }

    /// Fit both pipelines on their column groups of `data`.
    ///
    /// # Errors
    /// - [`PreprocessingError::InvalidInput`] if `data` is not table-shaped or a
    ///   numeric column holds text
    /// - [`PreprocessingError::EmptyDataset`] if `data` has no rows
    /// - [`PreprocessingError::SchemaMismatch`] if a declared column is absent
    /// - [`PreprocessingError::InvalidParameter`] for invalid column declarations
    pub fn fit<D: TabularData + ?Sized>(
        &self,
        data: &D,
    ) -> Result<FittedColumnTransformer, PreprocessingError> {
        validate_table_shape(data)?;
        if data.n_rows() == 0 {
            return Err(PreprocessingError::EmptyDataset(
                "Cannot fit ColumnTransformer on a dataset with zero rows".to_string(),
            ));
        }

        let groups = self.spec.resolve(data)?;
        debug!(
            numeric = ?groups.numeric(),
            categorical = ?groups.categorical(),
            "partitioned columns"
        );

        let numeric = if groups.numeric().is_empty() {
            None
        } else {
            let block = extract_numeric(data, groups.numeric())?;
            Some(self.numeric.fit(&block)?)
        };

        let categorical = if groups.categorical().is_empty() {
            None
        } else {
            let block = extract_categorical(data, groups.categorical())?;
            Some(self.categorical.fit(&block)?)
        };

        let names: Vec<String> = numeric
            .iter()
            .flat_map(|p| p.feature_names_out())
            .chain(categorical.iter().flat_map(|p| p.feature_names_out()))
            .collect();
        let feature_names = unique_names(names);

        let fitted = FittedColumnTransformer {
            groups,
            numeric,
            categorical,
            feature_names,
        };

        info!(
            n_rows = data.n_rows(),
            n_numeric = fitted.groups.numeric().len(),
            n_categorical = fitted.groups.categorical().len(),
            n_features_out = fitted.n_features_out(),
            "fitted column transformer"
        );
        Ok(fitted)
    }
}

/// Keep `names` only if they are pairwise distinct.
fn unique_names(names: Vec<String>) -> Option<Vec<String>> {
    let duplicate = {
        let mut seen = HashSet::with_capacity(names.len());
        names.iter().find(|name| !seen.insert(name.as_str())).cloned()
    };
    match duplicate {
        Some(duplicate) => {
            warn!(
                duplicate = %duplicate,
                "output feature names are not unique, output will be unnamed"
            );
            None
        }
        None => Some(names),
    }
}

fn column_values<'a, D: TabularData + ?Sized>(
    data: &'a D,
    name: &str,
) -> Result<&'a [Value], PreprocessingError> {
    data.column(name)
        .ok_or_else(|| PreprocessingError::SchemaMismatch {
            missing: vec![name.to_string()],
        })
}

/// Numeric columns as a block; missing cells become `None`.
fn extract_numeric<D: TabularData + ?Sized>(
    data: &D,
    names: &[String],
) -> Result<ColumnBlock<Option<f64>>, PreprocessingError> {
    let columns = names
        .iter()
        .map(|name| -> Result<Vec<Option<f64>>, PreprocessingError> {
            column_values(data, name)?
                .iter()
                .enumerate()
                .map(|(row, value)| match value {
                    Value::Text(text) => Err(PreprocessingError::InvalidInput(format!(
                        "numeric column {:?} holds text {:?} at row {}",
                        name, text, row
                    ))),
                    other => Ok(other.as_number()),
                })
                .collect()
        })
        .collect::<Result<Vec<_>, _>>()?;
    ColumnBlock::new(names.to_vec(), columns)
}

/// Categorical columns as a block; numbers are rendered as category labels.
fn extract_categorical<D: TabularData + ?Sized>(
    data: &D,
    names: &[String],
) -> Result<ColumnBlock<Option<String>>, PreprocessingError> {
    let columns = names
        .iter()
        .map(|name| -> Result<Vec<Option<String>>, PreprocessingError> {
            Ok(column_values(data, name)?.iter().map(Value::as_category).collect())
        })
        .collect::<Result<Vec<_>, _>>()?;
    ColumnBlock::new(names.to_vec(), columns)
}

/// Fitted ColumnTransformer ready for inference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedColumnTransformer {
    groups: ColumnGroups,
    numeric: Option<FittedNumericPipeline>,
    categorical: Option<FittedCategoricalPipeline>,
    feature_names: Option<Vec<String>>,
}

impl FittedColumnTransformer {
    /// Transform `data` with the fitted pipelines.
    ///
    /// Columns are looked up by name; extra columns are ignored.
    ///
    /// # Errors
    /// - [`PreprocessingError::InvalidInput`] if `data` is not table-shaped or a
    ///   numeric column holds text
    /// - [`PreprocessingError::SchemaMismatch`] if a fitted column is absent
    /// - [`PreprocessingError::UnknownCategory`] for unseen categories under
    ///   [`HandleUnknown::Error`](crate::preprocessing::HandleUnknown::Error)
    pub fn transform<D: TabularData + ?Sized>(
        &self,
        data: &D,
    ) -> Result<TransformedTable, PreprocessingError> {
        validate_table_shape(data)?;
        self.groups.check_present(data)?;

        let n_rows = data.n_rows();
        let mut columns = Vec::with_capacity(self.n_features_out());

        if let Some(numeric) = &self.numeric {
            let block = extract_numeric(data, self.groups.numeric())?;
            let (_, out) = numeric.transform(&block)?.into_parts();
            columns.extend(out.into_iter().map(OutputColumn::Numeric));
        }

        if let Some(categorical) = &self.categorical {
            let block = extract_categorical(data, self.groups.categorical())?;
            match categorical.transform(&block)? {
                CategoricalOutput::Encoded(out) => {
                    let (_, out) = out.into_parts();
                    columns.extend(out.into_iter().map(OutputColumn::Numeric));
                }
                CategoricalOutput::Passthrough(out) => {
                    let (_, out) = out.into_parts();
                    columns.extend(out.into_iter().map(OutputColumn::Text));
                }
            }
        }

        let feature_names = match &self.feature_names {
            Some(names) if names.len() == columns.len() => Some(names.clone()),
            Some(names) => {
                warn!(
                    n_names = names.len(),
                    n_columns = columns.len(),
                    "feature names do not match output width, output will be unnamed"
                );
                None
            }
            None => None,
        };

        debug!(n_rows, n_columns = columns.len(), "transformed table");
        Ok(TransformedTable::new(columns, feature_names, n_rows))
    }

    pub fn groups(&self) -> &ColumnGroups {
        &self.groups
    }

    pub fn numeric(&self) -> Option<&FittedNumericPipeline> {
        self.numeric.as_ref()
    }

    pub fn categorical(&self) -> Option<&FittedCategoricalPipeline> {
        self.categorical.as_ref()
    }

    /// Ordered output feature names, or `None` if they are not unique.
    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    /// Number of output columns.
    pub fn n_features_out(&self) -> usize {
        self.numeric.as_ref().map_or(0, |p| p.n_features_out())
            + self.categorical.as_ref().map_or(0, |p| p.n_features_out())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Column, Table};
    use crate::preprocessing::encoding::HandleUnknown;
    use crate::preprocessing::imputation::ImputeStrategy;

    fn transformer(scale: bool, encode: bool) -> ColumnTransformer {
        ColumnTransformer::new(
            ColumnSpec::Infer,
            NumericPipeline::new(ImputeStrategy::Mean, scale),
            CategoricalPipeline::new(encode, HandleUnknown::Ignore),
        )
    }

    fn train() -> Table {
        Table::new(vec![
            Column::new("age", [Some(25.0), Some(30.0), None]),
            Column::new("color", [Some("red"), Some("blue"), None]),
        ])
        .unwrap()
    }

    #[test]
    fn test_column_transformer_output_layout() {
        let fitted = transformer(false, true).fit(&train()).unwrap();
        assert_eq!(fitted.n_features_out(), 3);

        let out = fitted.transform(&train()).unwrap();
        assert_eq!(
            out.feature_names().unwrap(),
            ["age", "color_blue", "color_red"]
        );
        assert_eq!(
            out.column("age").and_then(OutputColumn::as_numeric).unwrap(),
            &[25.0, 30.0, 27.5]
        );
        // Missing color imputed with "blue" (tie broken lexicographically)
        assert_eq!(
            out.column("color_blue").and_then(OutputColumn::as_numeric).unwrap(),
            &[0.0, 1.0, 1.0]
        );
    }

    #[test]
    fn test_column_transformer_passthrough() {
        let fitted = transformer(false, false).fit(&train()).unwrap();
        let out = fitted.transform(&train()).unwrap();
        assert_eq!(out.feature_names().unwrap(), ["age", "color"]);
        assert_eq!(
            out.column("color").and_then(OutputColumn::as_text).unwrap(),
            &["red".to_string(), "blue".to_string(), "blue".to_string()]
        );
    }

    #[test]
    fn test_column_transformer_ignores_extra_columns_and_order() {
        let fitted = transformer(true, true).fit(&train()).unwrap();
        let reordered = Table::new(vec![
            Column::new("extra", [1.0]),
            Column::new("color", ["red"]),
            Column::new("age", [30.0]),
        ])
        .unwrap();

        let out = fitted.transform(&reordered).unwrap();
        assert_eq!(out.n_rows(), 1);
        assert_eq!(out.n_columns(), 3);
    }

    #[test]
    fn test_column_transformer_missing_column() {
        let fitted = transformer(true, true).fit(&train()).unwrap();
        let partial = Table::new(vec![Column::new("age", [1.0])]).unwrap();
        match fitted.transform(&partial) {
            Err(PreprocessingError::SchemaMismatch { missing }) => {
                assert_eq!(missing, vec!["color".to_string()]);
            }
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_column_transformer_text_in_numeric_column() {
        let fitted = transformer(true, true).fit(&train()).unwrap();
        let bad = Table::new(vec![
            Column::new("age", [Value::from(1.0), Value::from("old")]),
            Column::new("color", ["red", "red"]),
        ])
        .unwrap();
        assert!(matches!(
            fitted.transform(&bad),
            Err(PreprocessingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_column_transformer_empty_dataset() {
        let empty = Table::new(vec![Column::new("age", Vec::<f64>::new())]).unwrap();
        assert!(matches!(
            transformer(true, true).fit(&empty),
            Err(PreprocessingError::EmptyDataset(_))
        ));
    }

    #[test]
    fn test_column_transformer_duplicate_feature_names() {
        let table = Table::new(vec![
            Column::new("color_red", [1.0, 2.0]),
            Column::new("color", ["red", "blue"]),
        ])
        .unwrap();

        let fitted = transformer(false, true).fit(&table).unwrap();
        assert!(fitted.feature_names().is_none());

        let out = fitted.transform(&table).unwrap();
        assert!(out.feature_names().is_none());
        assert_eq!(out.n_columns(), 3);
    }

    #[test]
    fn test_column_transformer_name_count_differs_from_width() {
        let fitted = transformer(true, true).fit(&train()).unwrap();
        let mut value = serde_json::to_value(&fitted).unwrap();
        value["feature_names"] = serde_json::json!(["age", "color_blue"]);
        let inconsistent: FittedColumnTransformer = serde_json::from_value(value).unwrap();
        assert_eq!(inconsistent.feature_names().unwrap().len(), 2);

        let out = inconsistent.transform(&train()).unwrap();
        assert!(out.feature_names().is_none());
        assert_eq!(out.n_columns(), 3);
        assert_eq!(out.n_rows(), 3);
        assert!(out.column("age").is_none());
        assert_eq!(
            out.to_array2().unwrap(),
            fitted.transform(&train()).unwrap().to_array2().unwrap()
        );
    }

    #[test]
    fn test_column_transformer_numeric_only() {
        let table = Table::new(vec![Column::new("x", [1.0, 2.0])]).unwrap();
        let fitted = transformer(false, true).fit(&table).unwrap();
        assert!(fitted.categorical().is_none());
        assert_eq!(fitted.transform(&table).unwrap().n_columns(), 1);
    }
}
