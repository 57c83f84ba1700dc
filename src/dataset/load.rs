use std::path::Path;

use log::info;

use super::{Dataset, DatasetError};
use crate::client::{artifact_path, MlWorkerClient};
use crate::codec::{self, DATA_FILE_NAME};
use crate::column_types::cast_columns;
use crate::meta::{DatasetMeta, META_FILE_NAME};
use crate::settings::Settings;

/// Where [`Dataset::load`] gets the dataset files from
#[derive(Clone, Copy)]
pub enum Retrieval<'a> {
    /// Download into the local cache and ask the registry for the metadata
    Remote(&'a dyn MlWorkerClient),
    /// Read a copy already present in the local cache (workers without a
    /// network identity)
    LocalCache,
}

impl Dataset {
    /// Rebuild a saved dataset.
    ///
    /// Both retrieval modes end with the files in
    /// [`Settings::dataset_cache_dir`]; the table is then decoded and the
    /// declared column types are applied.
    ///
    /// # Errors
    ///
    /// - [`DatasetError::MissingCache`] in local-only mode when the cache
    ///   directory does not exist (fatal)
    /// - [`DatasetError::IncompleteCache`] when the directory exists but a
    ///   dataset file is absent
    /// - [`DatasetError::CastError`] when a declared column type cannot be
    ///   applied; no partially typed dataset is returned
    pub fn load(
        retrieval: Retrieval<'_>,
        namespace: &str,
        dataset_id: &str,
        settings: &Settings,
    ) -> Result<Self, DatasetError> {
        let local_dir = settings.dataset_cache_dir(namespace, dataset_id);

        let meta = match retrieval {
            Retrieval::Remote(client) => {
                client.load_artifact(&local_dir, &artifact_path(namespace, dataset_id))?;
                client.load_dataset_meta(namespace, dataset_id)?
            }
            Retrieval::LocalCache => {
                if !local_dir.is_dir() {
                    return Err(DatasetError::MissingCache {
                        namespace: namespace.to_string(),
                        dataset_id: dataset_id.to_string(),
                        path: local_dir,
                    });
                }
                require_file(&local_dir, META_FILE_NAME)?;
                DatasetMeta::read_from_dir(&local_dir)?
            }
        };

        info!("Loading dataset {}.{} from {}", namespace, dataset_id, local_dir.display());
        Self::load_from_local_dir(&local_dir, meta)
    }

    /// Decode the table in `dir`, apply `meta.column_types` and attach `meta`.
    pub fn load_from_local_dir(dir: &Path, meta: DatasetMeta) -> Result<Self, DatasetError> {
        require_file(dir, DATA_FILE_NAME)?;
        let table = codec::read_compressed_table_with(dir.join(DATA_FILE_NAME), |name| {
            !meta.column_types.contains_key(name)
        })?;
        let table = cast_columns(&table, &meta.column_types)?;
        Ok(Self::from_meta(table, meta))
    }
}

fn require_file(dir: &Path, file_name: &'static str) -> Result<(), DatasetError> {
    if dir.join(file_name).is_file() {
        Ok(())
    } else {
        Err(DatasetError::IncompleteCache {
            path: dir.to_path_buf(),
            missing: file_name,
        })
    }
}
