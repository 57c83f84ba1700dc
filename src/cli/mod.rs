use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use giskard_dataset::settings::Settings;

mod import;
mod show;
mod validate;

/// giskard-dataset - Dataset checkpoints for ML testing workers
#[derive(Parser)]
#[command(name = "giskard-dataset")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Load settings from a TOML config file (defaults to the environment)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Metadata flags shared by `import` and `validate`
#[derive(Args, Debug, Default)]
pub struct MetaArgs {
    /// Dataset name
    #[arg(long)]
    name: Option<String>,

    /// Target column
    #[arg(long)]
    target: Option<String>,

    /// Semantic feature type, as COLUMN=KIND (category, numeric or text)
    #[arg(long = "feature-type", value_name = "COLUMN=KIND", value_parser = parse_key_value)]
    feature_types: Vec<(String, String)>,

    /// Physical column type, as COLUMN=TYPE (overrides the inferred type)
    #[arg(long = "column-type", value_name = "COLUMN=TYPE", value_parser = parse_key_value)]
    column_types: Vec<(String, String)>,
}

#[derive(Subcommand)]
enum Commands {
    /// Checkpoint a CSV file into an artifact store
    Import {
        /// Input CSV file path
        #[arg(value_name = "CSV")]
        input: PathBuf,

        /// Root directory of the local artifact store
        #[arg(short = 's', long, value_name = "DIR")]
        store: PathBuf,

        /// Project namespace to save under
        #[arg(short = 'n', long, default_value = "default")]
        namespace: String,

        #[command(flatten)]
        meta: MetaArgs,
    },

    /// Print metadata and the first rows of a saved dataset
    Show {
        /// Project namespace
        #[arg(value_name = "NAMESPACE")]
        namespace: String,

        /// Dataset identifier returned by `import`
        #[arg(value_name = "ID")]
        dataset_id: String,

        /// Download through this artifact store (reads the local cache when omitted)
        #[arg(short = 's', long, value_name = "DIR")]
        store: Option<PathBuf>,

        /// Number of rows to print
        #[arg(short = 'r', long, default_value = "10")]
        rows: usize,
    },

    /// Run the pre-save checks on a CSV file
    Validate {
        /// Input CSV file path
        #[arg(value_name = "CSV")]
        input: PathBuf,

        #[command(flatten)]
        meta: MetaArgs,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn run(self) -> Result<()> {
        let settings = match &self.config {
            Some(path) => Settings::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Settings::from_env(),
        };

        match self.command {
            Commands::Import {
                input,
                store,
                namespace,
                meta,
            } => import::run(input, store, &namespace, meta, &settings),
            Commands::Show {
                namespace,
                dataset_id,
                store,
                rows,
            } => show::run(&namespace, &dataset_id, store, rows, &settings),
            Commands::Validate { input, meta } => validate::run(input, meta),
        }
    }
}

impl MetaArgs {
    fn feature_types(&self) -> BTreeMap<String, String> {
        self.feature_types.iter().cloned().collect()
    }

    fn column_type_overrides(&self) -> BTreeMap<String, String> {
        self.column_types.iter().cloned().collect()
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() && !value.is_empty() => {
            Ok((key.to_string(), value.to_string()))
        }
        _ => Err(format!("expected COLUMN=VALUE, got '{}'", s)),
    }
}

/// Read a plain CSV file into a dataset with inferred column types plus the
/// metadata given on the command line.
fn read_csv_dataset(
    input: &Path,
    meta: &MetaArgs,
) -> Result<giskard_dataset::dataset::Dataset> {
    use giskard_dataset::codec::decode_table;
    use giskard_dataset::column_types::{cast_columns, infer_column_types};
    use giskard_dataset::dataset::Dataset;
    use std::fs::File;
    use std::io::BufReader;

    if !input.exists() {
        anyhow::bail!("File does not exist: {}", input.display());
    }
    let file = File::open(input).context("Failed to open file")?;
    let table = decode_table(BufReader::new(file)).context("Failed to parse CSV")?;

    let overrides = meta.column_type_overrides();
    let table = cast_columns(&table, &overrides).context("Failed to apply column types")?;
    let mut column_types = infer_column_types(&table);
    column_types.extend(overrides);

    let mut dataset = Dataset::new(table)
        .with_feature_types(meta.feature_types())
        .with_column_types(column_types);
    if let Some(name) = &meta.name {
        dataset = dataset.with_name(name.clone());
    }
    if let Some(target) = &meta.target {
        dataset = dataset.with_target(target.clone());
    }
    Ok(dataset)
}
