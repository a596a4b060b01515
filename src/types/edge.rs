use super::graphid::Graphid;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Edge (Relationship) in the graph
///
/// Represents a directed edge with:
/// - Unique identifier (Graphid)
/// - Start vertex ID
/// - End vertex ID
/// - Relationship type (e.g. "KNOWS", "WORKS_FOR")
/// - Properties (JSON object)
///
/// The stored direction is meaningful for `Outgoing`/`Incoming` traversal,
/// but a path may cross an edge from either end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    /// Unique identifier
    pub id: Graphid,

    /// Start vertex ID (source)
    pub start: Graphid,

    /// End vertex ID (target)
    pub end: Graphid,

    /// Relationship type
    #[serde(rename = "type")]
    pub rel_type: String,

    /// Properties stored as JSON
    pub properties: JsonValue,
}

impl Edge {
    /// Create a new edge
    pub fn new(
        id: Graphid,
        start: Graphid,
        end: Graphid,
        rel_type: impl Into<String>,
        properties: JsonValue,
    ) -> Self {
        Self {
            id,
            start,
            end,
            rel_type: rel_type.into(),
            properties,
        }
    }

    /// Create an edge with an empty property map
    pub fn new_empty(id: Graphid, start: Graphid, end: Graphid, rel_type: impl Into<String>) -> Self {
        Self::new(
            id,
            start,
            end,
            rel_type,
            JsonValue::Object(serde_json::Map::new()),
        )
    }

    /// Get a property value by key
    pub fn get_property(&self, key: &str) -> Option<&JsonValue> {
        self.properties.get(key)
    }

    /// The endpoint opposite `vertex`, or `None` if the edge does not touch it
    ///
    /// A self-loop returns the vertex itself.
    pub fn other_end(&self, vertex: Graphid) -> Option<Graphid> {
        if self.start == vertex {
            Some(self.end)
        } else if self.end == vertex {
            Some(self.start)
        } else {
            None
        }
    }

    /// Check if this edge is a self-loop
    pub fn is_self_loop(&self) -> bool {
        self.start == self.end
    }
}
