//! # Column Type Coercion
//!
//! A text round trip loses physical type fidelity: integers become ambiguous
//! with floats, booleans with strings. Dataset metadata carries a physical type
//! descriptor per column (`"int64"`, `"object"`, ...) and [`cast_columns`]
//! forces each named column back to it.
//!
//! Descriptors follow dataframe dtype spellings and are resolved through an
//! explicit table ([`ColumnType`]) rather than passed through to Arrow.
//!
//! | Descriptor | Arrow type |
//! |------------|------------|
//! | `int8` .. `int64`, `Int8` .. `Int64` | `Int8` .. `Int64` |
//! | `uint8` .. `uint64`, `UInt8` .. `UInt64` | `UInt8` .. `UInt64` |
//! | `float32`, `float64`, `Float32`, `Float64` | `Float32`, `Float64` |
//! | `bool`, `boolean` | `Boolean` |
//! | `object`, `str`, `string` | `Utf8` |
//! | `category` | `Dictionary(Int32, Utf8)` |
//! | `datetime64[s]`, `[ms]`, `[us]`, `[ns]` | `Timestamp(unit, None)` |

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef};
use arrow::compute::{cast_with_options, CastOptions};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::error::ArrowError;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use log::{info, warn};

/// Errors raised while applying declared column types
#[derive(Debug, thiserror::Error)]
pub enum CastError {
    /// The descriptor is not in the supported conversion table
    #[error("Unsupported column type '{column_type}' for column '{column}'")]
    UnknownType {
        /// Column the descriptor was declared for
        column: String,
        /// The unrecognised descriptor
        column_type: String,
    },

    /// The column's values cannot be converted to the declared type
    #[error("Failed to cast column '{column}' to '{column_type}': {source}")]
    Conversion {
        /// Column that failed to convert
        column: String,
        /// Declared descriptor
        column_type: String,
        /// Underlying Arrow cast failure
        #[source]
        source: ArrowError,
    },

    /// The coerced columns could not be reassembled into a table
    #[error("Arrow error: {0}")]
    ArrowError(#[from] ArrowError),
}

/// Supported physical column types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// Boolean
    Bool,
    /// Free text
    Object,
    /// Dictionary-encoded text
    Category,
    /// Timestamp without timezone
    Datetime(TimeUnit),
}

impl ColumnType {
    /// Arrow type a column of this kind is stored as
    pub fn data_type(&self) -> DataType {
        match self {
            ColumnType::Int8 => DataType::Int8,
            ColumnType::Int16 => DataType::Int16,
            ColumnType::Int32 => DataType::Int32,
            ColumnType::Int64 => DataType::Int64,
            ColumnType::UInt8 => DataType::UInt8,
            ColumnType::UInt16 => DataType::UInt16,
            ColumnType::UInt32 => DataType::UInt32,
            ColumnType::UInt64 => DataType::UInt64,
            ColumnType::Float32 => DataType::Float32,
            ColumnType::Float64 => DataType::Float64,
            ColumnType::Bool => DataType::Boolean,
            ColumnType::Object => DataType::Utf8,
            ColumnType::Category => {
                DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8))
            }
            ColumnType::Datetime(unit) => DataType::Timestamp(*unit, None),
        }
    }

    /// Map an Arrow type back to a descriptor, if it has one
    pub fn from_data_type(data_type: &DataType) -> Option<Self> {
        let column_type = match data_type {
            DataType::Int8 => ColumnType::Int8,
            DataType::Int16 => ColumnType::Int16,
            DataType::Int32 => ColumnType::Int32,
            DataType::Int64 => ColumnType::Int64,
            DataType::UInt8 => ColumnType::UInt8,
            DataType::UInt16 => ColumnType::UInt16,
            DataType::UInt32 => ColumnType::UInt32,
            DataType::UInt64 => ColumnType::UInt64,
            DataType::Float32 => ColumnType::Float32,
            DataType::Float64 => ColumnType::Float64,
            DataType::Boolean => ColumnType::Bool,
            DataType::Utf8 | DataType::LargeUtf8 => ColumnType::Object,
            DataType::Dictionary(_, value) if value.as_ref() == &DataType::Utf8 => {
                ColumnType::Category
            }
            DataType::Timestamp(unit, None) => ColumnType::Datetime(*unit),
            _ => return None,
        };
        Some(column_type)
    }

    /// Whether the type holds numbers
    pub fn is_numeric(&self) -> bool {
        self.data_type().is_numeric()
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let column_type = match s {
            "int8" | "Int8" => ColumnType::Int8,
            "int16" | "Int16" => ColumnType::Int16,
            "int32" | "Int32" => ColumnType::Int32,
            "int64" | "Int64" | "int" => ColumnType::Int64,
            "uint8" | "UInt8" => ColumnType::UInt8,
            "uint16" | "UInt16" => ColumnType::UInt16,
            "uint32" | "UInt32" => ColumnType::UInt32,
            "uint64" | "UInt64" => ColumnType::UInt64,
            "float32" | "Float32" => ColumnType::Float32,
            "float64" | "Float64" | "float" => ColumnType::Float64,
            "bool" | "boolean" => ColumnType::Bool,
            "object" | "str" | "string" => ColumnType::Object,
            "category" => ColumnType::Category,
            "datetime64[s]" => ColumnType::Datetime(TimeUnit::Second),
            "datetime64[ms]" => ColumnType::Datetime(TimeUnit::Millisecond),
            "datetime64[us]" => ColumnType::Datetime(TimeUnit::Microsecond),
            "datetime64[ns]" | "datetime64" => ColumnType::Datetime(TimeUnit::Nanosecond),
            other => return Err(format!("unsupported column type '{}'", other)),
        };
        Ok(column_type)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Int8 => "int8",
            ColumnType::Int16 => "int16",
            ColumnType::Int32 => "int32",
            ColumnType::Int64 => "int64",
            ColumnType::UInt8 => "uint8",
            ColumnType::UInt16 => "uint16",
            ColumnType::UInt32 => "uint32",
            ColumnType::UInt64 => "uint64",
            ColumnType::Float32 => "float32",
            ColumnType::Float64 => "float64",
            ColumnType::Bool => "bool",
            ColumnType::Object => "object",
            ColumnType::Category => "category",
            ColumnType::Datetime(TimeUnit::Second) => "datetime64[s]",
            ColumnType::Datetime(TimeUnit::Millisecond) => "datetime64[ms]",
            ColumnType::Datetime(TimeUnit::Microsecond) => "datetime64[us]",
            ColumnType::Datetime(TimeUnit::Nanosecond) => "datetime64[ns]",
        };
        f.write_str(name)
    }
}

/// Cast options that turn unparseable values into errors instead of nulls
pub(crate) fn strict_cast_options() -> CastOptions<'static> {
    CastOptions {
        safe: false,
        ..Default::default()
    }
}

/// Force each column named in `column_types` to its declared physical type.
///
/// Columns not named in `column_types` are left as they are, and column order
/// and row count never change. Descriptors naming a column the table does not
/// have are skipped.
///
/// # Errors
///
/// The whole operation fails on the first descriptor that is unknown or whose
/// column cannot be converted; no partially cast table is returned.
pub fn cast_columns(
    batch: &RecordBatch,
    column_types: &BTreeMap<String, String>,
) -> Result<RecordBatch, CastError> {
    if column_types.is_empty() {
        return Ok(batch.clone());
    }

    let schema = batch.schema();
    info!(
        "Casting table columns from {:?} to {:?}",
        describe_columns(batch),
        column_types
    );

    for name in column_types.keys() {
        if schema.index_of(name).is_err() {
            warn!("Declared column type for '{}' has no matching column", name);
        }
    }

    let options = strict_cast_options();
    let mut fields = Vec::with_capacity(schema.fields().len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(batch.num_columns());

    for (field, column) in schema.fields().iter().zip(batch.columns()) {
        let Some(descriptor) = column_types.get(field.name()) else {
            fields.push(field.as_ref().clone());
            columns.push(Arc::clone(column));
            continue;
        };

        let column_type: ColumnType =
            descriptor.parse().map_err(|_| CastError::UnknownType {
                column: field.name().clone(),
                column_type: descriptor.clone(),
            })?;
        let target = column_type.data_type();

        let cast = if column.data_type() == &target {
            Arc::clone(column)
        } else {
            cast_with_options(column, &target, &options).map_err(|source| {
                CastError::Conversion {
                    column: field.name().clone(),
                    column_type: descriptor.clone(),
                    source,
                }
            })?
        };

        fields.push(Field::new(field.name(), target, true).with_metadata(field.metadata().clone()));
        columns.push(cast);
    }

    let schema = Schema::new(fields).with_metadata(schema.metadata().clone());
    let batch_options = RecordBatchOptions::new().with_row_count(Some(batch.num_rows()));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(schema),
        columns,
        &batch_options,
    )?)
}

/// Describe each column's physical type with a descriptor.
///
/// Columns whose Arrow type has no descriptor are omitted.
pub fn infer_column_types(batch: &RecordBatch) -> BTreeMap<String, String> {
    batch
        .schema()
        .fields()
        .iter()
        .filter_map(|field| {
            ColumnType::from_data_type(field.data_type())
                .map(|column_type| (field.name().clone(), column_type.to_string()))
        })
        .collect()
}

fn describe_columns(batch: &RecordBatch) -> BTreeMap<String, String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|field| {
            let described = ColumnType::from_data_type(field.data_type())
                .map(|t| t.to_string())
                .unwrap_or_else(|| field.data_type().to_string());
            (field.name().clone(), described)
        })
        .collect()
}
