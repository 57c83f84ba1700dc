/// Errors reported by an artifact store or metadata registry.
///
/// The dataset pipeline never interprets these; they reach the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// I/O error while moving artifacts
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error for registry records
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The requested artifact or record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failure from any other client implementation
    #[error("Client error: {0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}
