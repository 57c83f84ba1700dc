//! # giskard-dataset
//!
//! Command-line front end for dataset checkpoints.
//!
//! ## Usage
//!
//! ```bash
//! # Checkpoint a CSV file into a local artifact store
//! giskard-dataset import people.csv --store ./artifacts --namespace proj1 --target label
//!
//! # Print metadata and the first rows of a saved dataset
//! giskard-dataset show proj1 4f1c0d... --store ./artifacts
//!
//! # Run the pre-save checks on a CSV file
//! giskard-dataset validate people.csv --feature-type age=numeric
//! ```

mod cli;

use anyhow::Result;
use clap::Parser;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity());
    cli.run()
}
