//! # Dataset Handle
//!
//! A [`Dataset`] wraps an Arrow table together with its metadata: an optional
//! name, an optional target column, a semantic role per column
//! (`feature_types`) and a physical type per column (`column_types`).
//!
//! Datasets are checkpointed to an artifact store and rebuilt later, possibly
//! in another process:
//!
//! ```text
//! <namespace>/datasets/<dataset_id>/
//! ├── data.csv.zst                # zstd-compressed delimited text
//! └── giskard-dataset-meta.yaml   # name, target, feature_types, column_types
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use giskard_dataset::client::LocalArtifactStore;
//! use giskard_dataset::dataset::{Dataset, Retrieval};
//! use giskard_dataset::settings::Settings;
//! # use std::sync::Arc;
//! # use arrow::array::Int64Array;
//! # use arrow::datatypes::{DataType, Field, Schema};
//! # use arrow::record_batch::RecordBatch;
//! # let schema = Schema::new(vec![Field::new("age", DataType::Int64, true)]);
//! # let table = RecordBatch::try_new(Arc::new(schema), vec![Arc::new(Int64Array::from(vec![25, 30]))])?;
//!
//! let settings = Settings::from_env();
//! let store = LocalArtifactStore::new("/tmp/artifacts");
//!
//! let dataset = Dataset::new(table)
//!     .with_name("ages")
//!     .with_column_types([("age".to_string(), "int64".to_string())].into());
//!
//! let dataset_id = dataset.save(&store, "proj1", &settings)?;
//! let loaded = Dataset::load(Retrieval::Remote(&store), "proj1", &dataset_id, &settings)?;
//! assert_eq!(loaded.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod load;
mod save;


pub use error::DatasetError;
pub use load::Retrieval;

use std::borrow::Cow;
use std::collections::BTreeMap;

use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::meta::DatasetMeta;

/// A table-to-table function applied by [`Dataset::slice`]
pub type TableTransform<'a> = &'a dyn Fn(&RecordBatch) -> Result<RecordBatch, ArrowError>;

/// In-memory table plus metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    table: RecordBatch,
    name: Option<String>,
    target: Option<String>,
    feature_types: BTreeMap<String, String>,
    column_types: BTreeMap<String, String>,
}

impl Dataset {
    /// Wrap a table with no metadata
    pub fn new(table: RecordBatch) -> Self {
        Self {
            table,
            name: None,
            target: None,
            feature_types: BTreeMap::new(),
            column_types: BTreeMap::new(),
        }
    }

    /// Wrap a table with every field of `meta`
    pub fn from_meta(table: RecordBatch, meta: DatasetMeta) -> Self {
        Self {
            table,
            name: meta.name,
            target: meta.target,
            feature_types: meta.feature_types,
            column_types: meta.column_types,
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the target column
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the semantic role of each column
    pub fn with_feature_types(mut self, feature_types: BTreeMap<String, String>) -> Self {
        self.feature_types = feature_types;
        self
    }

    /// Set the physical type descriptor of each column
    pub fn with_column_types(mut self, column_types: BTreeMap<String, String>) -> Self {
        self.column_types = column_types;
        self
    }

    /// The underlying table
    pub fn table(&self) -> &RecordBatch {
        &self.table
    }

    /// Consume the dataset, keeping only the table
    pub fn into_table(self) -> RecordBatch {
        self.table
    }

    /// Display name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Target column, if any
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Semantic role per column
    pub fn feature_types(&self) -> &BTreeMap<String, String> {
        &self.feature_types
    }

    /// Physical type descriptor per column
    pub fn column_types(&self) -> &BTreeMap<String, String> {
        &self.column_types
    }

    /// Project the persisted metadata; recomputed on every call
    pub fn meta(&self) -> DatasetMeta {
        DatasetMeta {
            name: self.name.clone(),
            target: self.target.clone(),
            feature_types: self.feature_types.clone(),
            column_types: self.column_types.clone(),
        }
    }

    /// Column names in table order
    pub fn columns(&self) -> Vec<&str> {
        self.table
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.table.num_rows()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply `transform` to the table and wrap the result with the same metadata.
    ///
    /// With no transform the dataset itself is returned, borrowed. The
    /// transform is not checked to preserve column names or types.
    pub fn slice(&self, transform: Option<TableTransform<'_>>) -> Result<Cow<'_, Dataset>, DatasetError> {
        let Some(transform) = transform else {
            return Ok(Cow::Borrowed(self));
        };
        let table = transform(&self.table)?;
        Ok(Cow::Owned(Self {
            table,
            name: self.name.clone(),
            target: self.target.clone(),
            feature_types: self.feature_types.clone(),
            column_types: self.column_types.clone(),
        }))
    }
}
