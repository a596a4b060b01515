/// All simple paths between two vertices
///
/// Depth-first enumeration with an explicit work stack. Each stack frame holds
/// the remaining candidates of one vertex on the current path, so the stack,
/// the path buffer and the visited set always describe the same vertices.
/// Paths are produced lazily, one per `next()` call, in DFS pre-order over the
/// expander's candidate order.

use super::expander::PathExpander;
use super::{AlgorithmError, AlgorithmResult};
use crate::storage::GraphRead;
use crate::types::{Edge, GraphPath, Graphid, Vertex};
use std::collections::HashSet;
use std::iter::FusedIterator;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Pending,
    Running,
    Done,
}

/// Lazy iterator over every simple path from `start` to `end`
///
/// A path has at most `max_nodes` vertices. Dropping the iterator stops the
/// search; a storage error is yielded once, after which the iterator is empty.
pub struct AllSimplePaths<'g, G: GraphRead + ?Sized> {
    graph: &'g G,
    expander: PathExpander,
    end: Graphid,
    max_nodes: usize,
    state: State,
    path: GraphPath,
    visited: HashSet<Graphid>,
    stack: Vec<std::vec::IntoIter<(Edge, Graphid)>>,
    paths_found: usize,
    vertices_expanded: usize,
}

impl<'g, G: GraphRead + ?Sized> AllSimplePaths<'g, G> {
    pub fn new(
        graph: &'g G,
        expander: PathExpander,
        start: Vertex,
        end: Graphid,
        max_nodes: usize,
    ) -> Self {
        debug!(
            start = %start.id,
            end = %end,
            max_nodes,
            filter = %expander.spec(),
            property = expander.range().property(),
            bounds = ?expander.range().bounds(),
            "enumerating simple paths"
        );

        let mut visited = HashSet::new();
        visited.insert(start.id);

        Self {
            graph,
            expander,
            end,
            max_nodes,
            state: State::Pending,
            path: GraphPath::new(start),
            visited,
            stack: Vec::new(),
            paths_found: 0,
            vertices_expanded: 0,
        }
    }

    /// Paths yielded so far
    pub fn paths_found(&self) -> usize {
        self.paths_found
    }

    /// Vertices whose relationships have been expanded so far
    pub fn vertices_expanded(&self) -> usize {
        self.vertices_expanded
    }

    fn push_frame(&mut self, vertex: Graphid) -> AlgorithmResult<()> {
        // A vertex at the bound stays on the stack without candidates
        let candidates = if self.path.node_count() < self.max_nodes {
            self.vertices_expanded += 1;
            self.expander.expand(self.graph, vertex)?
        } else {
            Vec::new()
        };
        self.stack.push(candidates.into_iter());
        Ok(())
    }

    fn found(&mut self, path: GraphPath) -> Option<AlgorithmResult<GraphPath>> {
        debug_assert!(path.is_simple(), "path repeats a vertex: {:?}", path.vertex_ids());
        self.paths_found += 1;
        Some(Ok(path))
    }

    fn fail(&mut self, err: AlgorithmError) -> Option<AlgorithmResult<GraphPath>> {
        debug!(error = %err, paths = self.paths_found, "path enumeration aborted");
        self.state = State::Done;
        self.stack.clear();
        Some(Err(err))
    }

    fn finish(&mut self) -> Option<AlgorithmResult<GraphPath>> {
        if self.state != State::Done {
            self.state = State::Done;
            debug!(
                paths = self.paths_found,
                expanded = self.vertices_expanded,
                "path enumeration finished"
            );
        }
        None
    }

    /// First call: handle the single-vertex path and seed the stack
    fn begin(&mut self) -> Option<AlgorithmResult<GraphPath>> {
        self.state = State::Running;
        if self.max_nodes == 0 {
            return self.finish();
        }

        let start = self.path.start().id;
        if start == self.end {
            // Any longer path would have to revisit `end`
            let path = self.path.clone();
            return self.found(path);
        }

        if let Err(err) = self.push_frame(start) {
            return self.fail(err);
        }
        self.advance()
    }

    fn advance(&mut self) -> Option<AlgorithmResult<GraphPath>> {
        loop {
            let Some(frame) = self.stack.last_mut() else {
                return self.finish();
            };

            let Some((edge, next)) = frame.next() else {
                self.stack.pop();
                if let Some((_, vertex)) = self.path.pop() {
                    self.visited.remove(&vertex.id);
                }
                continue;
            };

            if self.visited.contains(&next) {
                continue;
            }

            let vertex = match self.graph.vertex(next) {
                Ok(Some(vertex)) => vertex,
                Ok(None) => {
                    trace!(edge = %edge.id, vertex = %next, "skipping dangling relationship");
                    continue;
                }
                Err(err) => return self.fail(err.into()),
            };

            if let Err(err) = self.path.push(edge, vertex) {
                return self.fail(err.into());
            }

            if next == self.end {
                let path = self.path.clone();
                self.path.pop();
                return self.found(path);
            }

            self.visited.insert(next);
            if let Err(err) = self.push_frame(next) {
                return self.fail(err);
            }
        }
    }
}

impl<G: GraphRead + ?Sized> Iterator for AllSimplePaths<'_, G> {
    type Item = AlgorithmResult<GraphPath>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Pending => self.begin(),
            State::Running => self.advance(),
            State::Done => None,
        }
    }
}

impl<G: GraphRead + ?Sized> FusedIterator for AllSimplePaths<'_, G> {}

/// Find all simple paths between two vertices
///
/// # Arguments
/// * `graph` - Graph to read; should be a consistent snapshot
/// * `start` - Start vertex ID
/// * `end` - End vertex ID
/// * `max_nodes` - Maximum number of vertices on a path
/// * `expander` - Decides which relationships may be followed
///
/// # Returns
/// * A lazy iterator over the paths
/// * `Err(AlgorithmError::InvalidParameters)` if `start` or `end` does not exist
pub fn find_all_paths<'g, G>(
    graph: &'g G,
    start: Graphid,
    end: Graphid,
    max_nodes: usize,
    expander: PathExpander,
) -> AlgorithmResult<AllSimplePaths<'g, G>>
where
    G: GraphRead + ?Sized,
{
    let start_vertex = graph.vertex(start)?.ok_or_else(|| {
        AlgorithmError::InvalidParameters(format!("Start vertex {} not found", start))
    })?;

    if graph.vertex(end)?.is_none() {
        return Err(AlgorithmError::InvalidParameters(format!(
            "End vertex {} not found",
            end
        )));
    }

    Ok(AllSimplePaths::new(graph, expander, start_vertex, end, max_nodes))
}
