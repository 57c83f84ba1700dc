//! # Artifact Store and Metadata Registry
//!
//! A saved dataset lives in two places: its files in an artifact store under
//! `<namespace>/datasets/<dataset_id>`, and its [`DatasetMeta`] plus byte
//! sizes in a metadata registry. Both are external services reached through
//! the traits in this module.
//!
//! [`LocalArtifactStore`] implements both on a local directory.

mod error;
mod local;

pub use error::ClientError;
pub use local::{DatasetRecord, LocalArtifactStore};

use std::path::Path;

use crate::meta::DatasetMeta;

/// Remote storage for directories of artifacts
pub trait ArtifactStore {
    /// Push every file in `local_dir` to `remote_path`
    fn log_artifacts(&self, local_dir: &Path, remote_path: &str) -> Result<(), ClientError>;

    /// Pull every file under `remote_path` into `local_dir`
    fn load_artifact(&self, local_dir: &Path, remote_path: &str) -> Result<(), ClientError>;
}

/// Remote registry of dataset metadata
pub trait MetadataRegistry {
    /// Record the metadata and sizes of a saved dataset
    fn save_dataset_meta(
        &self,
        namespace: &str,
        dataset_id: &str,
        meta: &DatasetMeta,
        original_size_bytes: u64,
        compressed_size_bytes: u64,
    ) -> Result<(), ClientError>;

    /// Fetch the metadata of a saved dataset
    fn load_dataset_meta(&self, namespace: &str, dataset_id: &str)
        -> Result<DatasetMeta, ClientError>;
}

/// A client that can both move artifacts and record metadata
pub trait MlWorkerClient: ArtifactStore + MetadataRegistry {}

impl<T: ArtifactStore + MetadataRegistry> MlWorkerClient for T {}

/// Storage path of a dataset inside a namespace
pub fn artifact_path(namespace: &str, dataset_id: &str) -> String {
    format!("{}/datasets/{}", namespace, dataset_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_path_uses_forward_slashes() {
        assert_eq!(artifact_path("proj1", "abc"), "proj1/datasets/abc");
    }
}
