/// In-memory graph storage
///
/// Layout:
/// - Vertices: id → Vertex
/// - Edges:    id → Edge
/// - OutEdge:  start vertex → edge ids (insertion order)
/// - InEdge:   end vertex → edge ids (insertion order)
/// - Labels:   name → label ID (shared by vertex labels and relationship types)
/// - Counter:  label ID → max local ID
///
/// Writers copy the graph on first write after a snapshot was taken, so a
/// `GraphSnapshot` never observes later changes.

use super::error::{StorageError, StorageResult};
use super::GraphRead;
use crate::types::{Direction, Edge, Graphid, Vertex};
use parking_lot::RwLock;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;

/// Label ID used for vertices without labels
const UNLABELED: u16 = 0;

#[derive(Debug, Clone)]
struct GraphData {
    vertices: HashMap<Graphid, Vertex>,
    edges: HashMap<Graphid, Edge>,
    out_edges: HashMap<Graphid, Vec<Graphid>>,
    in_edges: HashMap<Graphid, Vec<Graphid>>,
    label_ids: HashMap<String, u16>,
    next_label_id: u16,
    counters: HashMap<u16, u64>,
}

impl GraphData {
    fn new() -> Self {
        Self {
            vertices: HashMap::new(),
            edges: HashMap::new(),
            out_edges: HashMap::new(),
            in_edges: HashMap::new(),
            label_ids: HashMap::new(),
            next_label_id: UNLABELED + 1,
            counters: HashMap::new(),
        }
    }

    /// Get or create a label ID
    fn label_id(&mut self, label: &str) -> StorageResult<u16> {
        if label.is_empty() {
            return Ok(UNLABELED);
        }
        if let Some(&id) = self.label_ids.get(label) {
            return Ok(id);
        }

        let id = self.next_label_id;
        self.next_label_id = id
            .checked_add(1)
            .ok_or_else(|| StorageError::LabelSpaceExhausted(label.to_string()))?;
        self.label_ids.insert(label.to_string(), id);
        Ok(id)
    }

    /// Allocate the next id for a label
    fn next_id(&mut self, labid: u16, label: &str) -> StorageResult<Graphid> {
        let counter = self.counters.entry(labid).or_insert(0);
        let next = counter
            .checked_add(1)
            .filter(|next| *next <= Graphid::MAX_LOCID)
            .ok_or_else(|| StorageError::CounterOverflow(label.to_string()))?;
        *counter = next;

        Graphid::new(labid, next).map_err(|_| StorageError::CounterOverflow(label.to_string()))
    }

    fn edge_by_id(&self, id: &Graphid) -> StorageResult<&Edge> {
        self.edges
            .get(id)
            .ok_or_else(|| StorageError::EdgeNotFound(id.to_string()))
    }
}

/// Thread-safe in-memory graph
pub struct MemoryGraph {
    data: RwLock<Arc<GraphData>>,
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(Arc::new(GraphData::new())),
        }
    }

    /// Create a new vertex
    ///
    /// # Arguments
    /// * `labels` - Vertex labels; the first one determines the label part of the id
    /// * `properties` - JSON properties
    pub fn create_vertex<I, S>(&self, labels: I, properties: JsonValue) -> StorageResult<Vertex>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let primary = labels.first().map(String::as_str).unwrap_or("");

        let mut guard = self.data.write();
        let data = Arc::make_mut(&mut *guard);
        let labid = data.label_id(primary)?;
        let id = data.next_id(labid, primary)?;

        let vertex = Vertex::new(id, labels, properties);
        data.vertices.insert(id, vertex.clone());
        Ok(vertex)
    }

    /// Create a new edge
    ///
    /// # Arguments
    /// * `rel_type` - The relationship type, must not be empty
    /// * `start` - Start vertex ID
    /// * `end` - End vertex ID
    /// * `properties` - JSON properties
    ///
    /// # Returns
    /// * `Ok(edge)` with assigned ID
    /// * `Err(StorageError::VertexNotFound)` if an endpoint does not exist
    pub fn create_edge(
        &self,
        rel_type: &str,
        start: Graphid,
        end: Graphid,
        properties: JsonValue,
    ) -> StorageResult<Edge> {
        if rel_type.is_empty() {
            return Err(StorageError::Other(
                "relationship type must not be empty".to_string(),
            ));
        }

        let mut guard = self.data.write();
        for endpoint in [start, end] {
            if !guard.vertices.contains_key(&endpoint) {
                return Err(StorageError::VertexNotFound(endpoint.to_string()));
            }
        }

        let data = Arc::make_mut(&mut *guard);
        let labid = data.label_id(rel_type)?;
        let id = data.next_id(labid, rel_type)?;

        let edge = Edge::new(id, start, end, rel_type, properties);
        data.edges.insert(id, edge.clone());
        data.out_edges.entry(start).or_default().push(id);
        data.in_edges.entry(end).or_default().push(id);
        Ok(edge)
    }

    pub fn vertex_count(&self) -> usize {
        self.data.read().vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.data.read().edges.len()
    }

    /// Freeze the current state for reading
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            data: Arc::clone(&self.data.read()),
        }
    }
}

/// Immutable view of a `MemoryGraph`
#[derive(Clone)]
pub struct GraphSnapshot {
    data: Arc<GraphData>,
}

impl GraphSnapshot {
    pub fn vertex_count(&self) -> usize {
        self.data.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.data.edges.len()
    }
}

impl GraphRead for GraphSnapshot {
    fn vertex(&self, id: Graphid) -> StorageResult<Option<Vertex>> {
        Ok(self.data.vertices.get(&id).cloned())
    }

    fn edge(&self, id: Graphid) -> StorageResult<Option<Edge>> {
        Ok(self.data.edges.get(&id).cloned())
    }

    fn relationships(
        &self,
        vertex: Graphid,
        direction: Direction,
        rel_type: Option<&str>,
    ) -> StorageResult<Vec<Edge>> {
        let type_matches = |edge: &Edge| rel_type.map_or(true, |t| edge.rel_type == t);
        let mut result = Vec::new();

        if matches!(direction, Direction::Outgoing | Direction::Both) {
            for id in self.data.out_edges.get(&vertex).into_iter().flatten() {
                let edge = self.data.edge_by_id(id)?;
                if type_matches(edge) {
                    result.push(edge.clone());
                }
            }
        }

        if matches!(direction, Direction::Incoming | Direction::Both) {
            for id in self.data.in_edges.get(&vertex).into_iter().flatten() {
                let edge = self.data.edge_by_id(id)?;
                // Self-loops were already listed as outgoing
                if direction == Direction::Both && edge.is_self_loop() {
                    continue;
                }
                if type_matches(edge) {
                    result.push(edge.clone());
                }
            }
        }

        Ok(result)
    }
}
