use super::graphid::Graphid;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Vertex (Node) in the graph
///
/// Represents a graph vertex with:
/// - Unique identifier (Graphid)
/// - Label set (e.g. `Person`, `Employee`)
/// - Properties (JSON object)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vertex {
    /// Unique identifier
    pub id: Graphid,

    /// Labels in insertion order, without duplicates
    pub labels: Vec<String>,

    /// Properties stored as JSON
    pub properties: JsonValue,
}

impl Vertex {
    /// Create a new vertex; repeated labels are dropped
    pub fn new<I, S>(id: Graphid, labels: I, properties: JsonValue) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into();
            if !unique.contains(&label) {
                unique.push(label);
            }
        }

        Self {
            id,
            labels: unique,
            properties,
        }
    }

}
