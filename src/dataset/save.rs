use std::path::Path;

use log::{debug, info};
use uuid::Uuid;

use super::{Dataset, DatasetError};
use crate::client::{artifact_path, MlWorkerClient};
use crate::codec::{self, EncodedSizes, DATA_FILE_NAME};
use crate::settings::Settings;
use crate::validation::{DatasetValidator, SchemaValidator};

/// Prefix of the scoped staging directory used by [`Dataset::save`]
const STAGING_PREFIX: &str = "giskard-dataset-";

impl Dataset {
    /// Validate, stage, upload and register the dataset.
    ///
    /// Runs the built-in [`SchemaValidator`]. Returns the freshly generated
    /// dataset identifier; saving the same table twice yields two identifiers.
    pub fn save<C>(
        &self,
        client: &C,
        namespace: &str,
        settings: &Settings,
    ) -> Result<String, DatasetError>
    where
        C: MlWorkerClient + ?Sized,
    {
        self.save_with(&SchemaValidator, client, namespace, settings)
    }

    /// Like [`Dataset::save`], with a caller-supplied validator.
    ///
    /// # Errors
    ///
    /// Validation failures are returned before anything touches the disk.
    /// Staging, upload and registration failures are returned as-is; the
    /// staging directory is removed on every path.
    pub fn save_with<V, C>(
        &self,
        validator: &V,
        client: &C,
        namespace: &str,
        settings: &Settings,
    ) -> Result<String, DatasetError>
    where
        V: DatasetValidator + ?Sized,
        C: MlWorkerClient + ?Sized,
    {
        validator.validate(self)?;

        let dataset_id = Uuid::new_v4().simple().to_string();
        let remote_path = artifact_path(namespace, &dataset_id);
        info!(
            "Saving dataset {} ({} rows, {} columns) to {}",
            self.name().unwrap_or(&dataset_id),
            self.len(),
            self.table().num_columns(),
            remote_path
        );

        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir()?;
        let sizes = self.save_to_local_dir(staging.path(), settings.compression_level)?;

        client.log_artifacts(staging.path(), &remote_path)?;
        client.save_dataset_meta(
            namespace,
            &dataset_id,
            &self.meta(),
            sizes.original_bytes,
            sizes.compressed_bytes,
        )?;

        staging.close()?;
        info!("Saved dataset {}", remote_path);
        Ok(dataset_id)
    }

    /// Write the compressed table and the metadata document into `dir`.
    ///
    /// Returns the uncompressed and compressed sizes of the table.
    pub fn save_to_local_dir(&self, dir: &Path, compression_level: i32) -> Result<EncodedSizes, DatasetError> {
        let sizes =
            codec::write_compressed_table(dir.join(DATA_FILE_NAME), self.table(), compression_level)?;
        self.meta().write_to_dir(dir)?;
        debug!(
            "Staged dataset in {} ({} -> {} bytes)",
            dir.display(),
            sizes.original_bytes,
            sizes.compressed_bytes
        );
        Ok(sizes)
    }
}
