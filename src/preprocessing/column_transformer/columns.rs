//! Column kinds and the numeric/categorical partition.

use crate::dataset::{TabularData, Value};
use crate::preprocessing::error::PreprocessingError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Semantic type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl ColumnKind {
    /// Numeric iff every non-missing value is a number.
    ///
    /// A column with no observed value is numeric.
    pub fn infer(values: &[Value]) -> ColumnKind {
        if values.iter().any(|v| matches!(v, Value::Text(_))) {
            ColumnKind::Categorical
        } else {
            ColumnKind::Numeric
        }
    }
}

/// Which columns a [`ColumnTransformer`](super::ColumnTransformer) uses.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ColumnSpec {
    /// Use every column of the fit data, classified by [`ColumnKind::infer`].
    #[default]
    Infer,
    /// Use exactly the listed columns.
    Declared {
        numeric: Vec<String>,
        categorical: Vec<String>,
    },
}

impl ColumnSpec {
    /// Check the declared lists for emptiness, blank names, repeats and overlap.
    pub fn validate(&self) -> Result<(), PreprocessingError> {
        let ColumnSpec::Declared {
            numeric,
            categorical,
        } = self
        else {
            return Ok(());
        };

        if numeric.is_empty() && categorical.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "at least one numeric or categorical column must be declared".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for name in numeric.iter().chain(categorical) {
            if name.is_empty() {
                return Err(PreprocessingError::InvalidParameter(
                    "declared column names must be non-empty".to_string(),
                ));
            }
            if !seen.insert(name.as_str()) {
                let place = if numeric.contains(name) && categorical.contains(name) {
                    "both numeric and categorical"
                } else {
                    "more than once"
                };
                return Err(PreprocessingError::InvalidParameter(format!(
                    "column {:?} is declared {}",
                    name, place
                )));
            }
        }
        Ok(())
    }

    /// Resolve to a concrete partition of the columns of `data`.
    ///
    /// # Errors
    /// - [`PreprocessingError::InvalidParameter`] for invalid declarations
    /// - [`PreprocessingError::SchemaMismatch`] if a declared column is absent
    pub fn resolve<D: TabularData + ?Sized>(
        &self,
        data: &D,
    ) -> Result<ColumnGroups, PreprocessingError> {
        match self {
            ColumnSpec::Infer => {
                let mut groups = ColumnGroups::default();
                for name in data.column_names() {
                    let values = data.column(name).unwrap_or_default();
                    match ColumnKind::infer(values) {
                        ColumnKind::Numeric => groups.numeric.push(name.to_string()),
                        ColumnKind::Categorical => groups.categorical.push(name.to_string()),
                    }
                }
                Ok(groups)
            }
            ColumnSpec::Declared {
                numeric,
                categorical,
            } => {
                self.validate()?;
                let groups = ColumnGroups {
                    numeric: numeric.clone(),
                    categorical: categorical.clone(),
                };
                groups.check_present(data)?;
                Ok(groups)
            }
        }
    }
}

/// Partition of the used columns into numeric and categorical groups.
///
/// The groups are disjoint and keep their input order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnGroups {
    numeric: Vec<String>,
    categorical: Vec<String>,
}

impl ColumnGroups {
    pub fn numeric(&self) -> &[String] {
        &self.numeric
    }

    pub fn categorical(&self) -> &[String] {
        &self.categorical
    }

    /// Kind of the named column, or `None` if it is not used.
    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        if self.numeric.iter().any(|c| c == column) {
            Some(ColumnKind::Numeric)
        } else if self.categorical.iter().any(|c| c == column) {
            Some(ColumnKind::Categorical)
        } else {
            None
        }
    }

    /// All used columns, numeric first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.numeric
            .iter()
            .chain(&self.categorical)
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.numeric.len() + self.categorical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fail with [`PreprocessingError::SchemaMismatch`] listing every used
    /// column absent from `data`.
    pub(crate) fn check_present<D: TabularData + ?Sized>(
        &self,
        data: &D,
    ) -> Result<(), PreprocessingError> {
        let missing: Vec<String> = self
            .iter()
            .filter(|name| !data.has_column(name))
            .map(str::to_string)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PreprocessingError::SchemaMismatch { missing })
        }
    }
}
