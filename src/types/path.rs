use super::{edge::Edge, graphid::Graphid, vertex::Vertex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for GraphPath operations
#[derive(Error, Debug)]
pub enum PathError {
    #[error("Path is empty")]
    EmptyPath,

    #[error("Path vertices and edges count mismatch: {vertices} vertices, {edges} edges")]
    CountMismatch { vertices: usize, edges: usize },

    #[error("Path discontinuity at position {pos}: edge {edge} does not join {from} and {to}")]
    Discontinuity {
        pos: usize,
        edge: Graphid,
        from: Graphid,
        to: Graphid,
    },
}

/// GraphPath represents a path in the graph
///
/// A path is an alternating sequence of vertices and edges:
/// (v1) -[e1]- (v2) -[e2]- (v3) ... -[en]- (vn+1)
///
/// Invariants:
/// - vertices.len() = edges.len() + 1
/// - edges[i] joins vertices[i] and vertices[i+1], in either stored orientation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphPath {
    /// Vertices in the path
    pub vertices: Vec<Vertex>,

    /// Edges in the path
    pub edges: Vec<Edge>,
}

impl GraphPath {
    /// Create a new path with a single vertex (no edges)
    pub fn new(start: Vertex) -> Self {
        Self {
            vertices: vec![start],
            edges: Vec::new(),
        }
    }

    /// Create a path from vertices and edges
    ///
    /// # Errors
    /// Returns an error if the path is invalid (wrong counts or discontinuous)
    pub fn from_parts(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Result<Self, PathError> {
        let path = Self { vertices, edges };
        path.validate()?;
        Ok(path)
    }

    /// Validate the path invariants
    pub fn validate(&self) -> Result<(), PathError> {
        if self.vertices.is_empty() {
            return Err(PathError::EmptyPath);
        }

        if self.vertices.len() != self.edges.len() + 1 {
            return Err(PathError::CountMismatch {
                vertices: self.vertices.len(),
                edges: self.edges.len(),
            });
        }

        for (pos, edge) in self.edges.iter().enumerate() {
            check_joins(pos, edge, self.vertices[pos].id, self.vertices[pos + 1].id)?;
        }

        Ok(())
    }

    /// Append an edge and the vertex it leads to
    ///
    /// # Errors
    /// Returns an error if the edge does not join the last vertex to `vertex`
    pub fn push(&mut self, edge: Edge, vertex: Vertex) -> Result<(), PathError> {
        let last = self.end().id;
        check_joins(self.edges.len(), &edge, last, vertex.id)?;

        self.edges.push(edge);
        self.vertices.push(vertex);
        Ok(())
    }

    /// Remove the last edge and vertex; the start vertex is never removed
    pub fn pop(&mut self) -> Option<(Edge, Vertex)> {
        let edge = self.edges.pop()?;
        let vertex = self.vertices.pop()?;
        Some((edge, vertex))
    }

    /// Get the start vertex of the path
    pub fn start(&self) -> &Vertex {
        &self.vertices[0]
    }

    /// Get the end vertex of the path
    pub fn end(&self) -> &Vertex {
        &self.vertices[self.vertices.len() - 1]
    }

    /// Number of edges in the path
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Number of vertices in the path
    pub fn node_count(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the path has no edges (a single vertex)
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Get all vertex IDs in the path
    pub fn vertex_ids(&self) -> Vec<Graphid> {
        self.vertices.iter().map(|v| v.id).collect()
    }

    /// Get all edge IDs in the path
    pub fn edge_ids(&self) -> Vec<Graphid> {
        self.edges.iter().map(|e| e.id).collect()
    }

    /// True when no vertex appears twice
    pub fn is_simple(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.vertices.len());
        self.vertices.iter().all(|v| seen.insert(v.id))
    }
}

fn check_joins(pos: usize, edge: &Edge, from: Graphid, to: Graphid) -> Result<(), PathError> {
    if edge.other_end(from) == Some(to) {
        Ok(())
    } else {
        Err(PathError::Discontinuity {
            pos,
            edge: edge.id,
            from,
            to,
        })
    }
}
