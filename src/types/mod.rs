/// Core data types for the graph
///
/// This module defines the fundamental types used throughout the system:
/// - Graphid: 64-bit identifier with embedded label and local ID
/// - Vertex: Graph node with labels and properties
/// - Edge: Typed, directed relationship with properties
/// - Direction: Traversal orientation relative to a vertex
/// - GraphPath: Sequence of vertices and edges forming a path

pub mod direction;
pub mod edge;
pub mod graphid;
pub mod path;
pub mod vertex;

pub use direction::Direction;
pub use edge::Edge;
pub use graphid::{Graphid, GraphidError};
pub use path::{GraphPath, PathError};
pub use vertex::Vertex;
