//! ColumnTransformer for applying different pipelines to different columns.
//!
//! Columns are partitioned once at fit time into a numeric and a categorical
//! group ([`ColumnGroups`]); the partition is stored in the fitted transformer
//! and never re-inferred at transform time.

#[allow(clippy::module_inception)]
mod column_transformer;
mod columns;

pub use column_transformer::{ColumnTransformer, FittedColumnTransformer};
pub use columns::{ColumnGroups, ColumnKind, ColumnSpec};
