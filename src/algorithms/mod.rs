/// Path algorithms
///
/// This module implements filtered simple-path enumeration:
/// - range: property range predicates over relationships
/// - expander: relationship filter + range → next hops from a vertex
/// - all_paths: lazy depth-first enumeration of all simple paths

pub mod all_paths;
pub mod expander;
pub mod range;

pub use all_paths::{find_all_paths, AllSimplePaths};
pub use expander::PathExpander;
pub use range::{PropertyError, PropertyRange, RangeBounds};

use thiserror::Error;

/// Algorithm errors
#[derive(Error, Debug)]
pub enum AlgorithmError {
    #[error("Storage error: {0}")]
    StorageError(#[from] crate::storage::StorageError),

    #[error("Path error: {0}")]
    PathError(#[from] crate::types::PathError),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

pub type AlgorithmResult<T> = Result<T, AlgorithmError>;
