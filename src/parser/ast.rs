/// Parsed relationship filter
///
/// A filter is an ordered list of (type, direction) entries. A relationship is
/// admissible when it matches any entry; the order only decides in which order
/// candidates are offered during expansion.

use crate::types::{Direction, Edge, Graphid};
use std::fmt;

/// Relationship type selector
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelType {
    /// Matches every relationship type
    Wildcard,
    /// Matches exactly this type
    Named(String),
}

impl RelType {
    pub fn matches(&self, rel_type: &str) -> bool {
        match self {
            RelType::Wildcard => true,
            RelType::Named(name) => name == rel_type,
        }
    }

    /// The type name to pass to a storage lookup, `None` for all types
    pub fn as_filter(&self) -> Option<&str> {
        match self {
            RelType::Wildcard => None,
            RelType::Named(name) => Some(name),
        }
    }
}

/// One entry of a relationship filter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDirection {
    pub rel_type: RelType,
    pub direction: Direction,
}

impl TypeDirection {
    pub fn new(rel_type: RelType, direction: Direction) -> Self {
        Self {
            rel_type,
            direction,
        }
    }

    /// Matches every relationship in every direction
    pub fn any() -> Self {
        Self::new(RelType::Wildcard, Direction::Both)
    }

    /// Whether `edge`, seen from `vertex`, satisfies this entry
    pub fn matches(&self, edge: &Edge, vertex: Graphid) -> bool {
        self.rel_type.matches(&edge.rel_type) && self.direction.admits(vertex, edge.start, edge.end)
    }
}

impl fmt::Display for TypeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match &self.rel_type {
            RelType::Wildcard => "",
            RelType::Named(name) => name.as_str(),
        };
        match self.direction {
            Direction::Incoming => write!(f, "<{}", name),
            Direction::Outgoing => write!(f, "{}>", name),
            Direction::Both => f.write_str(name),
        }
    }
}

/// Ordered relationship filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDirectionSpec {
    entries: Vec<TypeDirection>,
}

impl TypeDirectionSpec {
    /// Build from parsed entries; an empty list means "anything"
    pub fn new(entries: Vec<TypeDirection>) -> Self {
        if entries.is_empty() {
            return Self::unfiltered();
        }
        Self { entries }
    }

    /// A single wildcard entry in both directions
    pub fn unfiltered() -> Self {
        Self {
            entries: vec![TypeDirection::any()],
        }
    }

    /// True for the single wildcard/both entry produced by an empty filter
    pub fn is_unfiltered(&self) -> bool {
        self.entries.len() == 1 && self.entries[0] == TypeDirection::any()
    }

    pub fn entries(&self) -> &[TypeDirection] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry admits `edge` seen from `vertex`
    pub fn matches(&self, edge: &Edge, vertex: Graphid) -> bool {
        self.entries.iter().any(|entry| entry.matches(edge, vertex))
    }
}

impl fmt::Display for TypeDirectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TypeDirectionSpec {
    type Item = &'a TypeDirection;
    type IntoIter = std::slice::Iter<'a, TypeDirection>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
