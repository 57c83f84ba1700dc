//! Dataset metadata projection.
//!
//! [`DatasetMeta`] is the serializable subset of a [`crate::dataset::Dataset`]:
//! everything except the table. It is written next to the compressed data as
//! a YAML document:
//!
//! ```yaml
//! name: credit
//! target: default
//! feature_types:
//!   age: numeric
//!   city: category
//! column_types:
//!   age: int64
//!   city: object
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// File name of the metadata document inside a dataset directory
pub const META_FILE_NAME: &str = "giskard-dataset-meta.yaml";

/// Errors reading or writing the metadata document
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    /// I/O error reading or writing the metadata file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Name, target and per-column types of a dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetMeta {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Column treated as the prediction target
    #[serde(default)]
    pub target: Option<String>,

    /// Semantic role per column (`numeric`, `category`, `text`)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub feature_types: BTreeMap<String, String>,

    /// Physical type descriptor per column (`int64`, `object`, ...)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub column_types: BTreeMap<String, String>,
}

impl DatasetMeta {
    /// Serialize to a YAML document
    pub fn to_yaml(&self) -> Result<String, MetaError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parse from a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self, MetaError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Write [`META_FILE_NAME`] into `dir`
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<(), MetaError> {
        let mut writer = BufWriter::new(File::create(dir.as_ref().join(META_FILE_NAME))?);
        serde_yaml::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Read [`META_FILE_NAME`] from `dir`
    pub fn read_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, MetaError> {
        let reader = BufReader::new(File::open(dir.as_ref().join(META_FILE_NAME))?);
        Ok(serde_yaml::from_reader(reader)?)
    }
}

/// Older writers emit `feature_types: null` for an unset mapping.
fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}
