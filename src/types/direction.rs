use super::graphid::Graphid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Orientation of a relationship relative to the vertex it is reached from
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// The vertex is the relationship's start
    Outgoing,
    /// The vertex is the relationship's end
    Incoming,
    /// Either endpoint
    Both,
}

impl Direction {
    /// Whether an edge stored as `start -> end` is traversable from `vertex`
    pub fn admits(&self, vertex: Graphid, start: Graphid, end: Graphid) -> bool {
        match self {
            Direction::Outgoing => start == vertex,
            Direction::Incoming => end == vertex,
            Direction::Both => start == vertex || end == vertex,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Outgoing => "OUTGOING",
            Direction::Incoming => "INCOMING",
            Direction::Both => "BOTH",
        };
        f.write_str(name)
    }
}
