/// Data import utilities
///
/// Supports loading graph data into a `MemoryGraph` from:
/// - JSON files (vertices and edges in one document)
/// - CSV files (one file of vertices, one of edges)
///
/// Vertices carry a string key (`id`) that edges use to reference their
/// endpoints. The keys are not stored; the report maps each key to the
/// Graphid the store assigned.

use super::{ToolError, ToolResult};
use crate::storage::MemoryGraph;
use crate::types::Graphid;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

/// Import options
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Skip invalid rows instead of failing
    pub skip_errors: bool,
    /// Label for vertices that have none; empty leaves them unlabeled
    pub default_vertex_label: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            skip_errors: false,
            default_vertex_label: "Node".to_string(),
        }
    }
}

/// Import statistics
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportStats {
    pub vertices_imported: usize,
    pub edges_imported: usize,
    pub vertices_skipped: usize,
    pub edges_skipped: usize,
    pub errors: Vec<String>,
}

/// Outcome of an import
#[derive(Debug, Default, Clone)]
pub struct ImportReport {
    pub stats: ImportStats,
    /// Vertex key from the source file → assigned id
    pub id_mapping: HashMap<String, Graphid>,
}

impl ImportReport {
    /// Id assigned to the vertex with source key `key`
    pub fn resolve(&self, key: &str) -> Option<Graphid> {
        self.id_mapping.get(key).copied()
    }
}

/// JSON graph format
#[derive(Debug, Deserialize)]
struct JsonGraph {
    #[serde(default)]
    vertices: Vec<JsonVertex>,
    #[serde(default)]
    edges: Vec<JsonEdge>,
}

#[derive(Debug, Deserialize)]
struct JsonVertex {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    properties: Map<String, JsonValue>,
}

#[derive(Debug, Deserialize)]
struct JsonEdge {
    #[serde(rename = "type", alias = "label")]
    rel_type: String,
    start: String,
    end: String,
    #[serde(default)]
    properties: Map<String, JsonValue>,
}

#[derive(Clone, Copy)]
enum Kind {
    Vertex,
    Edge,
}

struct Importer<'a> {
    graph: &'a MemoryGraph,
    options: &'a ImportOptions,
    report: ImportReport,
}

impl<'a> Importer<'a> {
    fn new(graph: &'a MemoryGraph, options: &'a ImportOptions) -> Self {
        Self {
            graph,
            options,
            report: ImportReport::default(),
        }
    }

    fn add_vertex(
        &mut self,
        key: Option<String>,
        labels: Vec<String>,
        properties: Map<String, JsonValue>,
    ) -> ToolResult<()> {
        if let Some(ref key) = key {
            if self.report.id_mapping.contains_key(key) {
                return Err(ToolError::InvalidFormat(format!("duplicate vertex id '{}'", key)));
            }
        }

        let mut labels: Vec<String> = labels.into_iter().filter(|l| !l.is_empty()).collect();
        if labels.is_empty() && !self.options.default_vertex_label.is_empty() {
            labels.push(self.options.default_vertex_label.clone());
        }

        let vertex = self.graph.create_vertex(labels, JsonValue::Object(properties))?;
        if let Some(key) = key {
            self.report.id_mapping.insert(key, vertex.id);
        }
        Ok(())
    }

    fn add_edge(
        &mut self,
        rel_type: &str,
        start: &str,
        end: &str,
        properties: Map<String, JsonValue>,
    ) -> ToolResult<()> {
        let start = self.lookup(start)?;
        let end = self.lookup(end)?;
        self.graph
            .create_edge(rel_type, start, end, JsonValue::Object(properties))?;
        Ok(())
    }

    fn lookup(&self, key: &str) -> ToolResult<Graphid> {
        self.report
            .resolve(key)
            .ok_or_else(|| ToolError::InvalidFormat(format!("unknown vertex '{}'", key)))
    }

    /// Count one row, or fail / skip it depending on the options
    fn record(&mut self, kind: Kind, row: usize, result: ToolResult<()>) -> ToolResult<()> {
        let stats = &mut self.report.stats;
        match (result, kind) {
            (Ok(()), Kind::Vertex) => stats.vertices_imported += 1,
            (Ok(()), Kind::Edge) => stats.edges_imported += 1,
            (Err(e), _) if !self.options.skip_errors => return Err(e),
            (Err(e), kind) => {
                let what = match kind {
                    Kind::Vertex => {
                        stats.vertices_skipped += 1;
                        "vertex"
                    }
                    Kind::Edge => {
                        stats.edges_skipped += 1;
                        "edge"
                    }
                };
                warn!(row, error = %e, "skipping {}", what);
                stats.errors.push(format!("{} {}: {}", what, row, e));
            }
        }
        Ok(())
    }

    fn finish(self) -> ImportReport {
        let stats = &self.report.stats;
        info!(
            vertices = stats.vertices_imported,
            edges = stats.edges_imported,
            skipped = stats.vertices_skipped + stats.edges_skipped,
            "import finished"
        );
        self.report
    }
}

/// Import a graph from a JSON file
///
/// JSON format:
/// ```json
/// {
///   "vertices": [
///     { "id": "alice", "labels": ["Person"], "properties": { "name": "Alice" } }
///   ],
///   "edges": [
///     { "type": "KNOWS", "start": "alice", "end": "bob", "properties": { "since": 2020 } }
///   ]
/// }
/// ```
pub fn import_from_json<P: AsRef<Path>>(
    graph: &MemoryGraph,
    path: P,
    options: &ImportOptions,
) -> ToolResult<ImportReport> {
    let file = File::open(path)?;
    let data: JsonGraph = serde_json::from_reader(BufReader::new(file))?;

    let mut importer = Importer::new(graph, options);

    for (row, vertex) in data.vertices.into_iter().enumerate() {
        let result = importer.add_vertex(vertex.id, vertex.labels, vertex.properties);
        importer.record(Kind::Vertex, row, result)?;
    }

    for (row, edge) in data.edges.into_iter().enumerate() {
        let result = importer.add_edge(&edge.rel_type, &edge.start, &edge.end, edge.properties);
        importer.record(Kind::Edge, row, result)?;
    }

    Ok(importer.finish())
}

/// Import a graph from a vertex CSV file and an edge CSV file
///
/// CSV formats:
/// ```csv
/// id,labels,name,age
/// alice,Person;Employee,Alice,30
/// ```
/// ```csv
/// type,start,end,since
/// KNOWS,alice,bob,2020
/// ```
///
/// Columns other than the fixed ones become properties; integers, floats and
/// booleans are recognised, everything else is kept as a string, empty cells
/// are omitted.
pub fn import_from_csv<P: AsRef<Path>, Q: AsRef<Path>>(
    graph: &MemoryGraph,
    vertices_path: P,
    edges_path: Q,
    options: &ImportOptions,
) -> ToolResult<ImportReport> {
    let mut importer = Importer::new(graph, options);

    let mut reader = csv::Reader::from_path(vertices_path)?;
    let headers = reader.headers()?.clone();
    for (row, record) in reader.records().enumerate() {
        let result = record.map_err(ToolError::from).and_then(|record| {
            let mut fields = row_fields(&headers, &record);
            let key = fields.remove("id").filter(|s| !s.is_empty());
            let labels: Vec<String> = fields
                .remove("labels")
                .map(|s| s.split(';').map(|l| l.trim().to_string()).collect())
                .unwrap_or_default();
            importer.add_vertex(key, labels, to_properties(fields))
        });
        importer.record(Kind::Vertex, row, result)?;
    }

    let mut reader = csv::Reader::from_path(edges_path)?;
    let headers = reader.headers()?.clone();
    for column in ["type", "start", "end"] {
        if !headers.iter().any(|h| h == column) {
            return Err(ToolError::InvalidFormat(format!(
                "edge file is missing column '{}'",
                column
            )));
        }
    }
    for (row, record) in reader.records().enumerate() {
        let result = record.map_err(ToolError::from).and_then(|record| {
            let mut fields = row_fields(&headers, &record);
            let rel_type = fields.remove("type").unwrap_or_default();
            let start = fields.remove("start").unwrap_or_default();
            let end = fields.remove("end").unwrap_or_default();
            importer.add_edge(&rel_type, &start, &end, to_properties(fields))
        });
        importer.record(Kind::Edge, row, result)?;
    }

    Ok(importer.finish())
}

fn row_fields(headers: &csv::StringRecord, record: &csv::StringRecord) -> HashMap<String, String> {
    headers
        .iter()
        .zip(record.iter())
        .map(|(h, v)| (h.to_string(), v.to_string()))
        .collect()
}

fn to_properties(fields: HashMap<String, String>) -> Map<String, JsonValue> {
    fields
        .into_iter()
        .filter_map(|(k, v)| infer_value(&v).map(|v| (k, v)))
        .collect()
}

fn infer_value(raw: &str) -> Option<JsonValue> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Some(JsonValue::from(i));
    }
    if let Ok(f) = raw.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Some(JsonValue::Number(n));
        }
    }
    match raw {
        "true" => Some(JsonValue::Bool(true)),
        "false" => Some(JsonValue::Bool(false)),
        _ => Some(JsonValue::String(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::GraphRead;
    use crate::types::Direction;
    use serde_json::json;
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_import_json() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "graph.json",
            r#"{
                "vertices": [
                    {"id": "alice", "labels": ["Person"], "properties": {"name": "Alice"}},
                    {"id": "bob", "properties": {"name": "Bob"}}
                ],
                "edges": [
                    {"type": "KNOWS", "start": "alice", "end": "bob", "properties": {"since": "2020-01-01T00:00:00Z"}},
                    {"label": "LIKES", "start": "bob", "end": "alice"}
                ]
            }"#,
        );

        let graph = MemoryGraph::new();
        let report = import_from_json(&graph, &path, &ImportOptions::default()).unwrap();

        assert_eq!(report.stats.vertices_imported, 2);
        assert_eq!(report.stats.edges_imported, 2);
        let alice = report.resolve("alice").unwrap();
        let bob = report.resolve("bob").unwrap();

        let snapshot = graph.snapshot();
        let bob_vertex = snapshot.vertex(bob).unwrap().unwrap();
        assert_eq!(bob_vertex.labels, vec!["Node"]);

        let out = snapshot.relationships(alice, Direction::Outgoing, None).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].rel_type, "KNOWS");
        assert_eq!(out[0].end, bob);
        assert_eq!(out[0].get_property("since"), Some(&json!("2020-01-01T00:00:00Z")));
    }

    #[test]
    fn test_import_json_unknown_endpoint() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "graph.json",
            r#"{
                "vertices": [{"id": "a"}, {"id": "a"}],
                "edges": [
                    {"type": "LINK", "start": "a", "end": "zed"},
                    {"type": "LINK", "start": "a", "end": "a"}
                ]
            }"#,
        );

        let graph = MemoryGraph::new();
        let strict = import_from_json(&graph, &path, &ImportOptions::default());
        assert!(matches!(strict, Err(ToolError::InvalidFormat(_))));

        let graph = MemoryGraph::new();
        let options = ImportOptions {
            skip_errors: true,
            ..ImportOptions::default()
        };
        let report = import_from_json(&graph, &path, &options).unwrap();
        assert_eq!(report.stats.vertices_imported, 1);
        assert_eq!(report.stats.vertices_skipped, 1);
        assert_eq!(report.stats.edges_imported, 1);
        assert_eq!(report.stats.edges_skipped, 1);
        assert_eq!(report.stats.errors.len(), 2);
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn test_import_csv() {
        let dir = TempDir::new().unwrap();
        let vertices = write(
            &dir,
            "vertices.csv",
            "id,labels,name,age\nalice,Person;Employee,Alice,30\nbob,,Bob,\n",
        );
        let edges = write(
            &dir,
            "edges.csv",
            "type,start,end,since,weight,active\nKNOWS,alice,bob,2020,0.5,true\n",
        );

        let graph = MemoryGraph::new();
        let report = import_from_csv(&graph, &vertices, &edges, &ImportOptions::default()).unwrap();
        assert_eq!(report.stats.vertices_imported, 2);
        assert_eq!(report.stats.edges_imported, 1);

        let snapshot = graph.snapshot();
        let alice = snapshot.vertex(report.resolve("alice").unwrap()).unwrap().unwrap();
        assert_eq!(alice.labels, vec!["Person", "Employee"]);
        assert_eq!(alice.properties.get("age"), Some(&json!(30)));

        let bob = snapshot.vertex(report.resolve("bob").unwrap()).unwrap().unwrap();
        assert_eq!(bob.labels, vec!["Node"]);
        assert_eq!(bob.properties.get("age"), None);

        let edge = &snapshot
            .relationships(alice.id, Direction::Outgoing, Some("KNOWS"))
            .unwrap()[0];
        assert_eq!(edge.get_property("since"), Some(&json!(2020)));
        assert_eq!(edge.get_property("weight"), Some(&json!(0.5)));
        assert_eq!(edge.get_property("active"), Some(&json!(true)));
    }

    #[test]
    fn test_import_csv_missing_column() {
        let dir = TempDir::new().unwrap();
        let vertices = write(&dir, "vertices.csv", "id\na\n");
        let edges = write(&dir, "edges.csv", "start,end\na,a\n");

        let graph = MemoryGraph::new();
        let result = import_from_csv(&graph, &vertices, &edges, &ImportOptions::default());
        assert!(matches!(result, Err(ToolError::InvalidFormat(_))));
    }
}
