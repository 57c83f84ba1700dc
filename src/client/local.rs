use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{ArtifactStore, ClientError, MetadataRegistry};
use crate::meta::DatasetMeta;

/// Registry entry for one saved dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Metadata projection recorded at save time
    pub meta: DatasetMeta,
    /// Size of the uncompressed text encoding
    pub original_size_bytes: u64,
    /// Size of the compressed data file
    pub compressed_size_bytes: u64,
    /// When the record was written
    pub created: DateTime<Utc>,
}

/// Artifact store and metadata registry backed by a local directory
///
/// ```text
/// {root}/
/// ├── artifacts/{namespace}/datasets/{id}/...   # copies of logged directories
/// └── registry/{namespace}/datasets/{id}.json   # DatasetRecord
/// ```
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    root: PathBuf,
}

impl LocalArtifactStore {
    /// Create a store rooted at `root` (created lazily on first write)
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read back the registry entry of a saved dataset
    pub fn dataset_record(
        &self,
        namespace: &str,
        dataset_id: &str,
    ) -> Result<DatasetRecord, ClientError> {
        let path = self.record_path(namespace, dataset_id);
        if !path.exists() {
            return Err(ClientError::NotFound(format!(
                "no registry record for {}.{}",
                namespace, dataset_id
            )));
        }
        let reader = BufReader::new(File::open(&path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    fn artifacts_dir(&self, remote_path: &str) -> PathBuf {
        remote_path
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.join("artifacts"), |dir, part| dir.join(part))
    }

    fn record_path(&self, namespace: &str, dataset_id: &str) -> PathBuf {
        self.root
            .join("registry")
            .join(namespace)
            .join("datasets")
            .join(format!("{}.json", dataset_id))
    }
}

impl ArtifactStore for LocalArtifactStore {
    fn log_artifacts(&self, local_dir: &Path, remote_path: &str) -> Result<(), ClientError> {
        let target = self.artifacts_dir(remote_path);
        debug!("Logging {} to {}", local_dir.display(), target.display());
        copy_tree(local_dir, &target)?;
        Ok(())
    }

    fn load_artifact(&self, local_dir: &Path, remote_path: &str) -> Result<(), ClientError> {
        let source = self.artifacts_dir(remote_path);
        if !source.is_dir() {
            return Err(ClientError::NotFound(format!("no artifacts at {}", remote_path)));
        }
        debug!("Loading {} into {}", source.display(), local_dir.display());
        copy_tree(&source, local_dir)?;
        Ok(())
    }
}

impl MetadataRegistry for LocalArtifactStore {
    fn save_dataset_meta(
        &self,
        namespace: &str,
        dataset_id: &str,
        meta: &DatasetMeta,
        original_size_bytes: u64,
        compressed_size_bytes: u64,
    ) -> Result<(), ClientError> {
        let path = self.record_path(namespace, dataset_id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let record = DatasetRecord {
            meta: meta.clone(),
            original_size_bytes,
            compressed_size_bytes,
            created: Utc::now(),
        };
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, &record)?;
        writer.flush()?;
        Ok(())
    }

    fn load_dataset_meta(
        &self,
        namespace: &str,
        dataset_id: &str,
    ) -> Result<DatasetMeta, ClientError> {
        Ok(self.dataset_record(namespace, dataset_id)?.meta)
    }
}

fn copy_tree(source: &Path, target: &Path) -> std::io::Result<()> {
    fs::create_dir_all(target)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let destination = target.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &destination)?;
        } else {
            fs::copy(entry.path(), destination)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_log_and_load_artifacts() {
        let store_dir = tempdir().unwrap();
        let store = LocalArtifactStore::new(store_dir.path());

        let staging = tempdir().unwrap();
        fs::write(staging.path().join("a.txt"), "alpha").unwrap();
        fs::create_dir(staging.path().join("nested")).unwrap();
        fs::write(staging.path().join("nested").join("b.txt"), "beta").unwrap();

        store.log_artifacts(staging.path(), "proj/datasets/x").unwrap();
        assert!(store_dir
            .path()
            .join("artifacts/proj/datasets/x/a.txt")
            .exists());

        let target = tempdir().unwrap();
        let local = target.path().join("cache");
        store.load_artifact(&local, "proj/datasets/x").unwrap();
        assert_eq!(fs::read_to_string(local.join("a.txt")).unwrap(), "alpha");
        assert_eq!(
            fs::read_to_string(local.join("nested").join("b.txt")).unwrap(),
            "beta"
        );
    }

    #[test]
    fn test_load_unknown_artifact() {
        let store_dir = tempdir().unwrap();
        let store = LocalArtifactStore::new(store_dir.path());
        let target = tempdir().unwrap();

        let result = store.load_artifact(target.path(), "proj/datasets/missing");
        assert!(matches!(result, Err(ClientError::NotFound(_))));
    }

    #[test]
    fn test_registry_round_trip() {
        let store_dir = tempdir().unwrap();
        let store = LocalArtifactStore::new(store_dir.path());
        let meta = DatasetMeta {
            name: Some("credit".to_string()),
            ..Default::default()
        };

        store.save_dataset_meta("proj", "abc", &meta, 120, 40).unwrap();

        let record = store.dataset_record("proj", "abc").unwrap();
        assert_eq!(record.meta, meta);
        assert_eq!(record.original_size_bytes, 120);
        assert_eq!(record.compressed_size_bytes, 40);
        assert_eq!(store.load_dataset_meta("proj", "abc").unwrap(), meta);
    }

    #[test]
    fn test_unknown_record() {
        let store_dir = tempdir().unwrap();
        let store = LocalArtifactStore::new(store_dir.path());
        assert!(matches!(
            store.load_dataset_meta("proj", "nope"),
            Err(ClientError::NotFound(_))
        ));
    }
}
