use crate::types::{GraphPath, Graphid};
use serde::{Deserialize, Serialize};

/// One procedure output row
///
/// `weight` is the number of relationships on the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Vertex ids from start to end
    pub nodes: Vec<Graphid>,
    /// Relationship ids in traversal order
    pub relationships: Vec<Graphid>,
    pub weight: f64,
}

impl PathResult {
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }
}

impl From<&GraphPath> for PathResult {
    fn from(path: &GraphPath) -> Self {
        Self {
            nodes: path.vertex_ids(),
            relationships: path.edge_ids(),
            weight: path.len() as f64,
        }
    }
}
