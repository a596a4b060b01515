/// Data import tools
///
/// This module loads graph data from files into a `MemoryGraph`, so the path
/// procedures can be run against exported datasets.

pub mod import;

pub use import::{import_from_csv, import_from_json, ImportOptions, ImportReport, ImportStats};

use thiserror::Error;

/// Import errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] crate::storage::StorageError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

pub type ToolResult<T> = Result<T, ToolError>;
