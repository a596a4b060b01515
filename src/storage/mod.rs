/// Graph storage interface for path enumeration
///
/// This module provides the read-side storage abstraction used by the
/// traversal code, and an in-memory implementation:
/// - GraphRead trait: Read-only vertex/edge access and adjacency queries
/// - MemoryGraph: Thread-safe, copy-on-write in-memory graph
/// - GraphSnapshot: Immutable view of a MemoryGraph at one point in time

pub mod error;
pub mod memory;

use crate::types::{Direction, Edge, Graphid, Vertex};
pub use error::{StorageError, StorageResult};
pub use memory::{GraphSnapshot, MemoryGraph};
use std::sync::Arc;

/// Read-only graph access
///
/// Implementations must present a stable view for as long as the value is
/// borrowed: an enumeration reads vertices and adjacency lists many times
/// and expects the same answers each time.
pub trait GraphRead: Send + Sync {
    /// Get a vertex by ID
    ///
    /// # Returns
    /// * `Ok(Some(vertex))` if found
    /// * `Ok(None)` if not found
    /// * `Err(StorageError)` on storage errors
    fn vertex(&self, id: Graphid) -> StorageResult<Option<Vertex>>;

    /// Get an edge by ID
    fn edge(&self, id: Graphid) -> StorageResult<Option<Edge>>;

    /// Relationships attached to `vertex`
    ///
    /// # Arguments
    /// * `vertex` - The vertex whose relationships are listed
    /// * `direction` - `Outgoing`: `vertex` is the start; `Incoming`: `vertex`
    ///   is the end; `Both`: either (each relationship listed once)
    /// * `rel_type` - Restrict to one relationship type, or `None` for all
    ///
    /// # Returns
    /// * Relationships in insertion order (for `Both`, outgoing before
    ///   incoming); empty for an unknown vertex
    fn relationships(
        &self,
        vertex: Graphid,
        direction: Direction,
        rel_type: Option<&str>,
    ) -> StorageResult<Vec<Edge>>;
}

impl<T: GraphRead + ?Sized> GraphRead for Arc<T> {
    fn vertex(&self, id: Graphid) -> StorageResult<Option<Vertex>> {
        (**self).vertex(id)
    }

    fn edge(&self, id: Graphid) -> StorageResult<Option<Edge>> {
        (**self).edge(id)
    }

    fn relationships(
        &self,
        vertex: Graphid,
        direction: Direction,
        rel_type: Option<&str>,
    ) -> StorageResult<Vec<Edge>> {
        (**self).relationships(vertex, direction, rel_type)
    }
}
