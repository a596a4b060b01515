/// Error types for storage operations

use thiserror::Error;

/// Storage operation errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Vertex not found
    #[error("Vertex not found: {0}")]
    VertexNotFound(String),

    /// Edge not found
    #[error("Edge not found: {0}")]
    EdgeNotFound(String),

    /// Too many distinct labels for the 16-bit label space
    #[error("Label registry is full, cannot register: {0}")]
    LabelSpaceExhausted(String),

    /// Counter overflow
    #[error("Counter overflow for label: {0}")]
    CounterOverflow(String),

    /// Generic error
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
