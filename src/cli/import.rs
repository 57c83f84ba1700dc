use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use giskard_dataset::client::LocalArtifactStore;
use giskard_dataset::settings::Settings;

use super::{read_csv_dataset, MetaArgs};

/// Checkpoint a CSV file into a local artifact store
pub fn run(
    input: PathBuf,
    store: PathBuf,
    namespace: &str,
    meta: MetaArgs,
    settings: &Settings,
) -> Result<()> {
    info!("Importing {}", input.display());
    let dataset = read_csv_dataset(&input, &meta)?;
    let client = LocalArtifactStore::new(&store);

    let dataset_id = dataset
        .save(&client, namespace, settings)
        .context("Failed to save dataset")?;

    let record = client.dataset_record(namespace, &dataset_id)?;
    info!(
        "Saved {} rows x {} columns ({} bytes, {} compressed)",
        dataset.len(),
        dataset.table().num_columns(),
        record.original_size_bytes,
        record.compressed_size_bytes
    );

    println!("{}", dataset_id);
    Ok(())
}
