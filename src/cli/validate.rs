use anyhow::Result;
use log::info;
use std::path::PathBuf;

use giskard_dataset::validation::check_dataset;

use super::{read_csv_dataset, MetaArgs};

/// Run the pre-save checks on a CSV file
pub fn run(input: PathBuf, meta: MetaArgs) -> Result<()> {
    info!("Validating {}", input.display());

    let dataset = match read_csv_dataset(&input, &meta) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Validation error: {:#}", e);
            std::process::exit(1);
        }
    };

    let report = check_dataset(&dataset);
    println!("{}", report.format_colored());

    // Exit with error code if validation failed
    if report.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
