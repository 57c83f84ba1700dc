//! # Table Codec
//!
//! Encodes an Arrow [`RecordBatch`] as comma-delimited text, compresses it with
//! zstd, and reads it back.
//!
//! ## Encoding
//!
//! ```text
//! age,city
//! 25,NY
//! 30,LA
//! _GSK_NA_,NY
//! ```
//!
//! - One header row with the column names in schema order, no index column
//! - Cells are rendered with Arrow's display formatter
//! - Null cells are written as [`MISSING_VALUE_SENTINEL`] so that a missing
//!   value and an empty string stay distinct after the round trip
//!
//! Decoding maps the sentinel back to a null and infers a physical type per
//! column (Int64, Float64, Boolean, else Utf8). Columns with a declared type
//! are kept as text and cast afterwards by
//! [`crate::column_types::cast_columns`].

mod error;
mod infer;

#[cfg(test)]
mod tests;

pub use error::CodecError;

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use log::debug;

/// Reserved token written in place of missing values
pub const MISSING_VALUE_SENTINEL: &str = "_GSK_NA_";

/// File name of the compressed table inside a dataset directory
pub const DATA_FILE_NAME: &str = "data.csv.zst";

/// zstd level used when no level is configured
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

/// Byte sizes of an encoded table before and after compression
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodedSizes {
    /// Size of the delimited-text encoding
    pub original_bytes: u64,
    /// Size of the zstd stream written to disk
    pub compressed_bytes: u64,
}

impl EncodedSizes {
    /// Ratio of original to compressed size (0.0 for an empty stream)
    pub fn compression_ratio(&self) -> f64 {
        if self.compressed_bytes == 0 {
            0.0
        } else {
            self.original_bytes as f64 / self.compressed_bytes as f64
        }
    }
}

/// Encode a table as comma-delimited text with a header row.
///
/// # Errors
///
/// Returns [`CodecError::SentinelCollision`] if a non-null cell renders to the
/// missing-value token, since it would decode as missing.
pub fn encode_table(batch: &RecordBatch) -> Result<Vec<u8>, CodecError> {
    let schema = batch.schema();
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(schema.fields().iter().map(|f| f.name().as_str()))?;

    let options = FormatOptions::default();
    let formatters = batch
        .columns()
        .iter()
        .map(|column| ArrayFormatter::try_new(column.as_ref(), &options))
        .collect::<Result<Vec<_>, _>>()?;

    let mut record = csv::StringRecord::with_capacity(256, batch.num_columns());
    for row in 0..batch.num_rows() {
        record.clear();
        for (idx, (column, formatter)) in batch.columns().iter().zip(&formatters).enumerate() {
            if column.is_null(row) {
                record.push_field(MISSING_VALUE_SENTINEL);
                continue;
            }
            let value = formatter.value(row).to_string();
            if value == MISSING_VALUE_SENTINEL {
                return Err(CodecError::SentinelCollision {
                    column: schema.field(idx).name().clone(),
                    row,
                });
            }
            record.push_field(&value);
        }
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| CodecError::IoError(e.into_error()))
}

/// Decode a delimited-text table produced by [`encode_table`].
///
/// Every column comes back nullable, with a physical type inferred from its
/// values.
pub fn decode_table<R: Read>(reader: R) -> Result<RecordBatch, CodecError> {
    decode_table_with(reader, |_| true)
}

/// Decode a table, inferring types only for columns where `infer` holds.
///
/// Other columns stay Utf8 so that a declared type can be applied to the
/// original text (`"007"` must not become `7` before being cast to text).
pub fn decode_table_with<R, F>(reader: R, infer: F) -> Result<RecordBatch, CodecError>
where
    R: Read,
    F: Fn(&str) -> bool,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let names: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
    let mut row_count = 0usize;

    for record in csv_reader.records() {
        let record = record?;
        for (values, field) in cells.iter_mut().zip(record.iter()) {
            values.push((field != MISSING_VALUE_SENTINEL).then(|| field.to_string()));
        }
        row_count += 1;
    }

    let arrays: Vec<ArrayRef> = cells
        .into_iter()
        .zip(&names)
        .map(|(values, name)| {
            let values = StringArray::from(values);
            if infer(name.as_str()) {
                infer::infer_column(values)
            } else {
                Arc::new(values) as ArrayRef
            }
        })
        .collect();
    let fields: Vec<Field> = names
        .iter()
        .zip(&arrays)
        .map(|(name, array)| Field::new(name, array.data_type().clone(), true))
        .collect();

    let options = RecordBatchOptions::new().with_row_count(Some(row_count));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        arrays,
        &options,
    )?)
}

/// Compress encoded bytes with zstd at the given level.
pub fn compress(bytes: &[u8], level: i32) -> Result<Vec<u8>, CodecError> {
    zstd::stream::encode_all(bytes, level).map_err(CodecError::CompressionError)
}

/// Wrap a compressed byte stream in a streaming zstd decoder.
pub fn decompressing_reader<R: Read>(reader: R) -> Result<impl Read, CodecError> {
    zstd::stream::read::Decoder::new(reader).map_err(CodecError::DecompressionError)
}

/// Encode, compress and write a table to `path`.
///
/// Returns the uncompressed and compressed sizes of what was written.
pub fn write_compressed_table<P: AsRef<Path>>(
    path: P,
    batch: &RecordBatch,
    level: i32,
) -> Result<EncodedSizes, CodecError> {
    let path = path.as_ref();
    let encoded = encode_table(batch)?;
    let compressed = compress(&encoded, level)?;

    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(&compressed)?;
    file.flush()?;

    let sizes = EncodedSizes {
        original_bytes: encoded.len() as u64,
        compressed_bytes: compressed.len() as u64,
    };
    debug!(
        "Wrote {} ({} bytes encoded, {} bytes compressed, {:.1}x)",
        path.display(),
        sizes.original_bytes,
        sizes.compressed_bytes,
        sizes.compression_ratio()
    );
    Ok(sizes)
}

/// Read a table written by [`write_compressed_table`].
pub fn read_compressed_table<P: AsRef<Path>>(path: P) -> Result<RecordBatch, CodecError> {
    read_compressed_table_with(path, |_| true)
}

/// Read a compressed table, inferring types only where `infer` holds
/// (see [`decode_table_with`]).
pub fn read_compressed_table_with<P, F>(path: P, infer: F) -> Result<RecordBatch, CodecError>
where
    P: AsRef<Path>,
    F: Fn(&str) -> bool,
{
    let file = File::open(path.as_ref())?;
    decode_table_with(decompressing_reader(file)?, infer)
}
