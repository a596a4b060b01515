/// Path expansion
///
/// Decides, from a vertex on the current path, which relationships may be
/// traversed next and where they lead.

use super::range::PropertyRange;
use crate::parser::ast::TypeDirectionSpec;
use crate::storage::{GraphRead, StorageResult};
use crate::types::{Direction, Edge, Graphid};
use std::collections::HashSet;

/// Relationship filter combined with a property range
#[derive(Debug, Clone)]
pub struct PathExpander {
    spec: TypeDirectionSpec,
    range: PropertyRange,
}

impl PathExpander {
    pub fn new(spec: TypeDirectionSpec, range: PropertyRange) -> Self {
        Self { spec, range }
    }

    pub fn spec(&self) -> &TypeDirectionSpec {
        &self.spec
    }

    pub fn range(&self) -> &PropertyRange {
        &self.range
    }

    /// Admissible `(relationship, next vertex)` pairs from `vertex`
    ///
    /// Each relationship appears at most once, in the order of the first
    /// filter entry that offers it.
    pub fn expand<G>(&self, graph: &G, vertex: Graphid) -> StorageResult<Vec<(Edge, Graphid)>>
    where
        G: GraphRead + ?Sized,
    {
        let edges = self.candidates(graph, vertex)?;
        Ok(self.admit(edges, vertex).collect())
    }

    /// Relationships offered by the filter, each once, before the range is applied
    fn candidates<G>(&self, graph: &G, vertex: Graphid) -> StorageResult<Vec<Edge>>
    where
        G: GraphRead + ?Sized,
    {
        if self.spec.is_unfiltered() {
            return graph.relationships(vertex, Direction::Both, None);
        }

        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for entry in &self.spec {
            let edges = graph.relationships(vertex, entry.direction, entry.rel_type.as_filter())?;
            result.extend(edges.into_iter().filter(|e| seen.insert(e.id)));
        }
        Ok(result)
    }

    fn admit(
        &self,
        edges: Vec<Edge>,
        vertex: Graphid,
    ) -> impl Iterator<Item = (Edge, Graphid)> + '_ {
        edges.into_iter().filter_map(move |edge| {
            if !self.range.admits(&edge) {
                return None;
            }
            let next = edge.other_end(vertex)?;
            Some((edge, next))
        })
    }
}
