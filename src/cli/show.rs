use anyhow::{Context, Result};
use arrow::util::pretty::pretty_format_batches;
use std::path::PathBuf;

use giskard_dataset::client::LocalArtifactStore;
use giskard_dataset::dataset::{Dataset, Retrieval};
use giskard_dataset::settings::Settings;

/// Display metadata and the first rows of a saved dataset
pub fn run(
    namespace: &str,
    dataset_id: &str,
    store: Option<PathBuf>,
    rows: usize,
    settings: &Settings,
) -> Result<()> {
    let client = store.map(LocalArtifactStore::new);
    let retrieval = match &client {
        Some(client) => Retrieval::Remote(client),
        None => Retrieval::LocalCache,
    };

    let dataset = Dataset::load(retrieval, namespace, dataset_id, settings)
        .with_context(|| format!("Failed to load dataset {}.{}", namespace, dataset_id))?;

    println!("Dataset Information");
    println!("===================");
    println!("ID: {}.{}", namespace, dataset_id);
    println!("Name: {}", dataset.name().unwrap_or("<unnamed>"));
    println!("Target: {}", dataset.target().unwrap_or("<none>"));
    println!("Rows: {}", dataset.len());
    println!();

    println!("Columns:");
    for (i, column) in dataset.columns().iter().enumerate() {
        let column_type = dataset
            .column_types()
            .get(*column)
            .map(String::as_str)
            .unwrap_or("-");
        let feature_type = dataset
            .feature_types()
            .get(*column)
            .map(String::as_str)
            .unwrap_or("-");
        println!("  {:3}. {} ({}, {})", i + 1, column, column_type, feature_type);
    }
    println!();

    let head = dataset.table().slice(0, rows.min(dataset.len()));
    println!("{}", pretty_format_batches(&[head])?);
    Ok(())
}
