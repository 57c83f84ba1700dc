/// Errors that can occur while encoding or decoding a table
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the delimited-text reader or writer
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from the Arrow library while formatting or building arrays
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// zstd failed to compress the encoded table
    #[error("Compression error: {0}")]
    CompressionError(std::io::Error),

    /// zstd failed to open the compressed stream
    #[error("Decompression error: {0}")]
    DecompressionError(std::io::Error),

    /// A cell renders to the reserved missing-value token
    #[error("Column '{column}' row {row} contains the reserved missing-value token")]
    SentinelCollision {
        /// Column holding the offending value
        column: String,
        /// Zero-based row index
        row: usize,
    },
}
