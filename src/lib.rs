/// Filtered simple-path enumeration
///
/// Finds every simple path between two vertices of a property graph, following
/// only relationships admitted by a type/direction filter and a property range.
///
/// # Architecture
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │           Path Procedures                        │
/// ├──────────────────────────────────────────────────┤
/// │  ┌────────────────────────────────┐              │
/// │  │   Relationship Filter (pest)   │              │
/// │  └────────────┬───────────────────┘              │
/// │               ↓                                   │
/// │  ┌────────────────────────────────┐              │
/// │  │   Path Expander + Range        │              │
/// │  └────────────┬───────────────────┘              │
/// │               ↓                                   │
/// │  ┌────────────────────────────────┐              │
/// │  │   Simple Path Enumerator       │              │
/// │  └────────────┬───────────────────┘              │
/// │               ↓                                   │
/// │  ┌────────────────────────────────┐              │
/// │  │   Graph Snapshot (in memory)   │              │
/// │  └────────────────────────────────┘              │
/// └──────────────────────────────────────────────────┘
/// ```
///
/// # Modules
///
/// - `types`: Core data types (Graphid, Vertex, Edge, Direction, GraphPath)
/// - `storage`: Read-only graph interface and in-memory implementation
/// - `parser`: Relationship filter parser
/// - `algorithms`: Range predicates, path expansion, simple path enumeration
/// - `procedures`: The callable path procedures and their result rows
/// - `tools`: Data import
/// - `config`: Configuration and logging setup for the binaries

pub mod algorithms;
pub mod config;
pub mod parser;
pub mod procedures;
pub mod storage;
pub mod tools;
pub mod types;

// Re-export commonly used types
pub use types::{Direction, Edge, GraphPath, Graphid, Vertex};

// Re-export storage types
pub use storage::{GraphRead, GraphSnapshot, MemoryGraph, StorageError, StorageResult};

// Re-export parser types
pub use parser::ast::{RelType, TypeDirection, TypeDirectionSpec};
pub use parser::{parse_rel_filter, GrammarError, GrammarResult};

// Re-export algorithm types
pub use algorithms::{
    find_all_paths, AlgorithmError, AlgorithmResult, AllSimplePaths, PathExpander, PropertyError,
    PropertyRange, RangeBounds,
};

// Re-export procedure types
pub use procedures::{
    all_simple_paths_filtered, all_simple_paths_filtered_dt, PathResult, PathResults,
    ProcedureError, ProcedureResult,
};

// Re-export tool types
pub use tools::{import_from_csv, import_from_json, ImportOptions, ImportReport, ImportStats, ToolError, ToolResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
