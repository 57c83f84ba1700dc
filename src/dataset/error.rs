use std::path::PathBuf;

use crate::client::ClientError;
use crate::codec::CodecError;
use crate::column_types::CastError;
use crate::meta::MetaError;
use crate::validation::ValidationError;

/// Errors that can occur while saving, loading or slicing a dataset
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The dataset failed semantic validation; nothing was written
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    /// A declared column type could not be applied to the loaded table
    #[error("Failed to apply column types to dataset: {0}")]
    CastError(#[from] CastError),

    /// Local-only load found no cached copy of the dataset.
    ///
    /// The worker was expected to have downloaded this dataset already; this
    /// is a deployment error and must not be retried or defaulted.
    #[error("Cannot find existing dataset {namespace}.{dataset_id} at {}", path.display())]
    MissingCache {
        /// Namespace the dataset was requested from
        namespace: String,
        /// Requested dataset identifier
        dataset_id: String,
        /// Cache directory that does not exist
        path: PathBuf,
    },

    /// The cache directory exists but one of the dataset files is absent
    #[error("Incomplete dataset cache at {}: missing {missing}", path.display())]
    IncompleteCache {
        /// Cache directory that was inspected
        path: PathBuf,
        /// File name that is absent
        missing: &'static str,
    },

    /// Failure reported by the artifact store or metadata registry
    #[error("Client error: {0}")]
    ClientError(#[from] ClientError),

    /// Failure encoding, compressing or decoding the table
    #[error("Codec error: {0}")]
    CodecError(#[from] CodecError),

    /// Failure reading or writing the metadata document
    #[error("Metadata error: {0}")]
    MetaError(#[from] MetaError),

    /// I/O error managing the staging directory
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error raised by a table transform
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),
}

impl DatasetError {
    /// Whether the error is an unrecoverable precondition violation
    pub fn is_fatal(&self) -> bool {
        matches!(self, DatasetError::MissingCache { .. })
    }
}
