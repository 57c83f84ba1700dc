//! # giskard-dataset - Dataset Checkpoints for ML Testing Workers
//!
//! `giskard_dataset` is the client-side dataset handle of an ML testing worker.
//! A [`dataset::Dataset`] wraps an Arrow table with its metadata (name, target
//! column, semantic feature types, physical column types) and round-trips it
//! through a remote artifact store.
//!
//! ## Key Features
//!
//! - **Compact checkpoints**: the table is encoded as delimited text and
//!   compressed with zstd
//! - **Faithful missing values**: nulls are written as a reserved token, so a
//!   missing cell and an empty string stay distinct
//! - **Declared physical types**: `column_types` restore integer, float,
//!   boolean, categorical and timestamp columns after the text round trip
//! - **Human-readable metadata**: a YAML document next to the data
//! - **Offline workers**: datasets already in the local cache load without a
//!   network client
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use giskard_dataset::client::LocalArtifactStore;
//! use giskard_dataset::dataset::{Dataset, Retrieval};
//! use giskard_dataset::settings::Settings;
//! # use std::sync::Arc;
//! # use arrow::array::{Int64Array, StringArray};
//! # use arrow::datatypes::{DataType, Field, Schema};
//! # use arrow::record_batch::RecordBatch;
//! # let schema = Schema::new(vec![
//! #     Field::new("age", DataType::Int64, true),
//! #     Field::new("city", DataType::Utf8, true),
//! # ]);
//! # let table = RecordBatch::try_new(Arc::new(schema), vec![
//! #     Arc::new(Int64Array::from(vec![Some(25), Some(30), None])),
//! #     Arc::new(StringArray::from(vec!["NY", "LA", "NY"])),
//! # ])?;
//!
//! let settings = Settings::from_env();
//! let store = LocalArtifactStore::new("/var/lib/artifacts");
//!
//! let dataset = Dataset::new(table)
//!     .with_name("people")
//!     .with_column_types([
//!         ("age".to_string(), "int64".to_string()),
//!         ("city".to_string(), "object".to_string()),
//!     ].into());
//!
//! let dataset_id = dataset.save(&store, "proj1", &settings)?;
//!
//! // Later, possibly in another process
//! let loaded = Dataset::load(Retrieval::Remote(&store), "proj1", &dataset_id, &settings)?;
//! assert_eq!(loaded.columns(), vec!["age", "city"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! This stores:
//! ```text
//! proj1/datasets/<dataset_id>/
//! ├── data.csv.zst                # compressed table
//! └── giskard-dataset-meta.yaml   # metadata
//! ```
//!
//! ## Architecture
//!
//! - [`dataset`]: the dataset handle and its save/load pipelines
//! - [`codec`]: delimited-text encoding and zstd compression of tables
//! - [`column_types`]: declared physical types and column coercion
//! - [`meta`]: the persisted metadata projection
//! - [`client`]: artifact store and metadata registry interfaces
//! - [`validation`]: semantic checks run before saving
//! - [`settings`]: cache location and compression settings

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod codec;
pub mod column_types;
pub mod dataset;
pub mod meta;
pub mod settings;
pub mod validation;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::client::{
        artifact_path, ArtifactStore, ClientError, LocalArtifactStore, MetadataRegistry,
        MlWorkerClient,
    };
    pub use crate::codec::{CodecError, DATA_FILE_NAME, MISSING_VALUE_SENTINEL};
    pub use crate::column_types::{cast_columns, CastError, ColumnType};
    pub use crate::dataset::{Dataset, DatasetError, Retrieval};
    pub use crate::meta::{DatasetMeta, META_FILE_NAME};
    pub use crate::settings::Settings;
    pub use crate::validation::{
        check_dataset, DatasetValidator, SchemaValidator, ValidationError, ValidationReport,
    };
}
