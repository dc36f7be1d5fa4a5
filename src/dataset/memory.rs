use crate::dataset::{validate_table_shape, TabularData, Value};
use crate::preprocessing::error::PreprocessingError;
use serde::{Deserialize, Serialize};

/// A named column of values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    /// Create a column from anything convertible into [`Value`]s.
    ///
    /// `Option<T>` items map `None` to [`Value::Missing`].
    pub fn new<V: Into<Value>>(name: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// In-memory table: an ordered sequence of equally long, uniquely named columns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table, rejecting inputs that are not table-shaped.
    ///
    /// # Errors
    /// [`PreprocessingError::InvalidInput`] if there are no columns, a name is
    /// empty or repeated, or the columns differ in length. A table with zero
    /// rows is valid here; `fit` rejects it separately.
    pub fn new(columns: Vec<Column>) -> Result<Self, PreprocessingError> {
        let n_rows = columns.first().map_or(0, Column::len);
        let table = Self { columns, n_rows };
        validate_table_shape(&table)?;
        Ok(table)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

impl TabularData for Table {
    fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    fn n_rows(&self) -> usize {
        self.n_rows
    }

    fn column(&self, name: &str) -> Option<&[Value]> {
        self.get(name).map(Column::values)
    }
}
