//! # Dataset Validation
//!
//! Semantic checks run before a dataset is saved. Saving goes through a
//! [`DatasetValidator`]; the built-in [`SchemaValidator`] checks that the
//! metadata agrees with the table:
//!
//! 1. **Target**: the target column, if set, exists
//! 2. **Feature columns**: every `feature_types` key names a column
//! 3. **Feature types**: every `feature_types` value is `category`, `numeric` or `text`
//! 4. **Column types**: every `column_types` key names a column and every
//!    descriptor is supported
//! 5. **Numeric features**: numeric features hold numbers, or text that parses
//!    as numbers
//! 6. **Feature coverage**: warns about columns with no feature type
//!
//! ## Usage
//!
//! ```rust,ignore
//! use giskard_dataset::validation::check_dataset;
//!
//! let report = check_dataset(&dataset);
//! println!("{}", report);
//! ```

mod report;

#[cfg(test)]
mod tests;

pub use report::{CheckStatus, ValidationCheck, ValidationReport};

use std::fmt;
use std::str::FromStr;

use arrow::array::Array;
use arrow::compute::cast_with_options;
use arrow::datatypes::DataType;
use log::warn;

use crate::column_types::{strict_cast_options, ColumnType};
use crate::dataset::Dataset;

/// Errors raised by a [`DatasetValidator`]
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The built-in checks found failures
    #[error("Dataset failed validation: {}", .0.failure_summary())]
    Invalid(ValidationReport),

    /// A custom validator rejected the dataset
    #[error("Dataset rejected: {0}")]
    Rejected(String),
}

/// Semantic validation run before a dataset is saved
pub trait DatasetValidator {
    /// Return an error if the dataset must not be saved
    fn validate(&self, dataset: &Dataset) -> Result<(), ValidationError>;
}

/// Validator running [`check_dataset`]; warnings are logged, failures rejected
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl DatasetValidator for SchemaValidator {
    fn validate(&self, dataset: &Dataset) -> Result<(), ValidationError> {
        let report = check_dataset(dataset);
        if report.has_failures() {
            return Err(ValidationError::Invalid(report));
        }
        for check in &report.checks {
            if let CheckStatus::Warning(msg) = &check.status {
                warn!("{}: {}", check.name, msg);
            }
        }
        Ok(())
    }
}

/// Semantic role of a feature column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureType {
    /// Discrete labels
    Category,
    /// Continuous or integer values
    Numeric,
    /// Free text
    Text,
}

impl FromStr for FeatureType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "category" => Ok(FeatureType::Category),
            "numeric" => Ok(FeatureType::Numeric),
            "text" => Ok(FeatureType::Text),
            other => Err(format!("unsupported feature type '{}'", other)),
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FeatureType::Category => "category",
            FeatureType::Numeric => "numeric",
            FeatureType::Text => "text",
        })
    }
}

/// Run every check against `dataset` and collect the results.
pub fn check_dataset(dataset: &Dataset) -> ValidationReport {
    let mut report = ValidationReport::new(dataset.name().unwrap_or("<unnamed dataset>"));
    let columns = dataset.columns();
    let has_column = |name: &str| columns.contains(&name);

    report.add_check(match dataset.target() {
        Some(target) if !has_column(target) => ValidationCheck::failed(
            "Target column",
            format!("target column '{}' is not in the table", target),
        ),
        _ => ValidationCheck::ok("Target column"),
    });

    let unknown_features: Vec<&str> = dataset
        .feature_types()
        .keys()
        .map(String::as_str)
        .filter(|name| !has_column(*name))
        .collect();
    report.add_check(if unknown_features.is_empty() {
        ValidationCheck::ok("Feature columns")
    } else {
        ValidationCheck::failed(
            "Feature columns",
            format!("features not in the table: {}", unknown_features.join(", ")),
        )
    });

    let bad_feature_types: Vec<String> = dataset
        .feature_types()
        .iter()
        .filter(|(_, kind)| kind.parse::<FeatureType>().is_err())
        .map(|(name, kind)| format!("{}={}", name, kind))
        .collect();
    report.add_check(if bad_feature_types.is_empty() {
        ValidationCheck::ok("Feature types")
    } else {
        ValidationCheck::failed(
            "Feature types",
            format!(
                "expected category, numeric or text: {}",
                bad_feature_types.join(", ")
            ),
        )
    });

    let mut column_type_problems = Vec::new();
    for (name, descriptor) in dataset.column_types() {
        if !has_column(name.as_str()) {
            column_type_problems.push(format!("'{}' is not in the table", name));
        } else if descriptor.parse::<ColumnType>().is_err() {
            column_type_problems.push(format!("'{}' has unsupported type '{}'", name, descriptor));
        }
    }
    report.add_check(if column_type_problems.is_empty() {
        ValidationCheck::ok("Column types")
    } else {
        ValidationCheck::failed("Column types", column_type_problems.join("; "))
    });

    report.add_check(check_numeric_features(dataset));

    let uncovered: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|name| Some(*name) != dataset.target())
        .filter(|name| !dataset.feature_types().contains_key(*name))
        .collect();
    report.add_check(if uncovered.is_empty() {
        ValidationCheck::ok("Feature coverage")
    } else {
        ValidationCheck::warning(
            "Feature coverage",
            format!("columns without a feature type: {}", uncovered.join(", ")),
        )
    });

    report
}

fn check_numeric_features(dataset: &Dataset) -> ValidationCheck {
    let table = dataset.table();
    let schema = table.schema();
    let options = strict_cast_options();

    let mut offenders = Vec::new();
    for (name, kind) in dataset.feature_types() {
        if kind.parse::<FeatureType>() != Ok(FeatureType::Numeric) {
            continue;
        }
        let Ok(idx) = schema.index_of(name) else {
            continue;
        };
        let column = table.column(idx);
        if column.data_type().is_numeric() {
            continue;
        }
        if cast_with_options(column, &DataType::Float64, &options).is_err() {
            offenders.push(name.as_str());
        }
    }

    if offenders.is_empty() {
        ValidationCheck::ok("Numeric features")
    } else {
        ValidationCheck::failed(
            "Numeric features",
            format!("non-numeric values in: {}", offenders.join(", ")),
        )
    }
}
