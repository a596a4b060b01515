/// End-to-end tests for the path procedures
///
/// Builds graphs in memory (or imports them from files) and checks the
/// records produced by both procedures.

use chrono::{DateTime, FixedOffset};
use filtered_paths::{
    all_simple_paths_filtered, all_simple_paths_filtered_dt, import_from_json, parse_rel_filter,
    Direction, GraphRead, GraphSnapshot, Graphid, ImportOptions, MemoryGraph, PathResult,
    ProcedureError, PropertyRange,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::collections::HashSet;
use std::io::Write;
use tempfile::NamedTempFile;

fn ts(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

fn collect_int(
    snapshot: &GraphSnapshot,
    start: Graphid,
    end: Graphid,
    filter: &str,
    max_nodes: i64,
    property: &str,
    min: i64,
    max: i64,
) -> Vec<PathResult> {
    all_simple_paths_filtered(snapshot, start, end, filter, max_nodes, property, min, max)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn test_directed_chain() {
    let graph = MemoryGraph::new();
    let a = graph.create_vertex(["Person"], json!({"name": "A"})).unwrap();
    let b = graph.create_vertex(["Person"], json!({"name": "B"})).unwrap();
    let c = graph.create_vertex(["Person"], json!({"name": "C"})).unwrap();
    let ab = graph.create_edge("KNOWS", a.id, b.id, json!({"w": 1})).unwrap();
    let bc = graph.create_edge("KNOWS", b.id, c.id, json!({"w": 1})).unwrap();

    let snapshot = graph.snapshot();
    let paths = collect_int(&snapshot, a.id, c.id, "KNOWS>", 3, "w", 0, 10);

    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].nodes, vec![a.id, b.id, c.id]);
    assert_eq!(paths[0].relationships, vec![ab.id, bc.id]);
    assert_eq!(paths[0].weight, 2.0);

    // Against the arrows there is nothing to follow
    assert!(collect_int(&snapshot, a.id, c.id, "<KNOWS", 3, "w", 0, 10).is_empty());
    // Three nodes do not fit in two
    assert!(collect_int(&snapshot, a.id, c.id, "KNOWS>", 2, "w", 0, 10).is_empty());
}

#[test]
fn test_empty_filter_follows_any_type() {
    let graph = MemoryGraph::new();
    let a = graph.create_vertex(["Person"], json!({})).unwrap();
    let b = graph.create_vertex(["Page"], json!({})).unwrap();
    graph.create_edge("LIKES", a.id, b.id, json!({"w": 3})).unwrap();

    let snapshot = graph.snapshot();
    let paths = collect_int(&snapshot, a.id, b.id, "", 2, "w", 3, 3);
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].nodes, vec![a.id, b.id]);

    // Both directions
    let back = collect_int(&snapshot, b.id, a.id, "", 2, "w", 3, 3);
    assert_eq!(back.len(), 1);
    assert_eq!(back[0].nodes, vec![b.id, a.id]);
}

#[test]
fn test_integer_bounds_are_inclusive() {
    let graph = MemoryGraph::new();
    let a = graph.create_vertex(["Person"], json!({})).unwrap();
    let b = graph.create_vertex(["Person"], json!({})).unwrap();
    let e4 = graph.create_edge("KNOWS", a.id, b.id, json!({"age": 4})).unwrap();
    let e5 = graph.create_edge("KNOWS", a.id, b.id, json!({"age": 5})).unwrap();
    let e6 = graph.create_edge("KNOWS", a.id, b.id, json!({"age": 6})).unwrap();
    graph.create_edge("KNOWS", a.id, b.id, json!({"age": "5"})).unwrap();
    graph.create_edge("KNOWS", a.id, b.id, json!({})).unwrap();

    let snapshot = graph.snapshot();

    let exact = collect_int(&snapshot, a.id, b.id, "KNOWS", 2, "age", 5, 5);
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].relationships, vec![e5.id]);

    let wide = collect_int(&snapshot, a.id, b.id, "KNOWS", 2, "age", 4, 6);
    let rels: Vec<Graphid> = wide.iter().map(|p| p.relationships[0]).collect();
    assert_eq!(rels, vec![e4.id, e5.id, e6.id]);
}

#[test]
fn test_timestamp_bounds_are_exclusive() {
    let graph = MemoryGraph::new();
    let a = graph.create_vertex(["Person"], json!({})).unwrap();
    let b = graph.create_vertex(["Person"], json!({})).unwrap();
    graph
        .create_edge("KNOWS", a.id, b.id, json!({"since": "2020-01-01T00:00:00Z"}))
        .unwrap();
    let inside = graph
        .create_edge("KNOWS", a.id, b.id, json!({"since": "2020-06-01T12:00:00+02:00"}))
        .unwrap();
    graph
        .create_edge("KNOWS", a.id, b.id, json!({"since": "2021-01-01T00:00:00Z"}))
        .unwrap();
    graph
        .create_edge("KNOWS", a.id, b.id, json!({"since": "yesterday"}))
        .unwrap();

    let snapshot = graph.snapshot();
    let paths: Vec<PathResult> = all_simple_paths_filtered_dt(
        &snapshot,
        a.id,
        b.id,
        "KNOWS>",
        2,
        "since",
        ts("2020-01-01T00:00:00Z"),
        ts("2021-01-01T00:00:00Z"),
    )
    .unwrap()
    .collect::<Result<_, _>>()
    .unwrap();

    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].relationships, vec![inside.id]);

    // The same instant written in another offset is still on the boundary
    let paths: Vec<PathResult> = all_simple_paths_filtered_dt(
        &snapshot,
        a.id,
        b.id,
        "KNOWS>",
        2,
        "since",
        ts("2020-06-01T10:00:00Z"),
        ts("2020-12-31T00:00:00Z"),
    )
    .unwrap()
    .collect::<Result<_, _>>()
    .unwrap();
    assert!(paths.is_empty());
}

#[test]
fn test_mixed_directions_in_filter() {
    // A -KNOWS-> B <-WORKS_WITH- C -IS_MANAGER_OF-> D
    let graph = MemoryGraph::new();
    let a = graph.create_vertex(["Person"], json!({})).unwrap();
    let b = graph.create_vertex(["Person"], json!({})).unwrap();
    let c = graph.create_vertex(["Person"], json!({})).unwrap();
    let d = graph.create_vertex(["Person"], json!({})).unwrap();
    graph.create_edge("KNOWS", a.id, b.id, json!({"w": 1})).unwrap();
    graph.create_edge("WORKS_WITH", c.id, b.id, json!({"w": 1})).unwrap();
    graph.create_edge("IS_MANAGER_OF", c.id, d.id, json!({"w": 1})).unwrap();

    let snapshot = graph.snapshot();

    let paths = collect_int(
        &snapshot,
        a.id,
        d.id,
        "KNOWS|<WORKS_WITH|IS_MANAGER_OF>",
        4,
        "w",
        0,
        1,
    );
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].nodes, vec![a.id, b.id, c.id, d.id]);

    // WORKS_WITH followed forwards from B does not exist
    let paths = collect_int(&snapshot, a.id, d.id, "KNOWS|WORKS_WITH>|IS_MANAGER_OF>", 4, "w", 0, 1);
    assert!(paths.is_empty());
}

#[test]
fn test_start_equals_end() {
    let graph = MemoryGraph::new();
    let a = graph.create_vertex(["Person"], json!({})).unwrap();
    let b = graph.create_vertex(["Person"], json!({})).unwrap();
    graph.create_edge("KNOWS", a.id, b.id, json!({"w": 1})).unwrap();
    graph.create_edge("KNOWS", b.id, a.id, json!({"w": 1})).unwrap();

    let snapshot = graph.snapshot();
    let paths = collect_int(&snapshot, a.id, a.id, "", 5, "w", 0, 10);
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].nodes, vec![a.id]);
    assert!(paths[0].relationships.is_empty());
    assert_eq!(paths[0].weight, 0.0);

    assert!(collect_int(&snapshot, a.id, a.id, "", 0, "w", 0, 10).is_empty());
}

#[test]
fn test_errors() {
    let graph = MemoryGraph::new();
    let a = graph.create_vertex(["Person"], json!({})).unwrap();
    let snapshot = graph.snapshot();
    let ghost = Graphid::new(7, 99).unwrap();

    let result = all_simple_paths_filtered(&snapshot, a.id, a.id, "<KNOWS>", 3, "w", 0, 1);
    assert!(matches!(result, Err(ProcedureError::Grammar(_))));

    let result = all_simple_paths_filtered(&snapshot, a.id, a.id, "KNOWS|<", 3, "w", 0, 1);
    assert!(result.is_ok());

    let result = all_simple_paths_filtered(&snapshot, a.id, ghost, "", 3, "w", 0, 1);
    assert!(matches!(result, Err(ProcedureError::Algorithm(_))));
}

#[test]
fn test_snapshot_isolation() {
    let graph = MemoryGraph::new();
    let a = graph.create_vertex(["Person"], json!({})).unwrap();
    let b = graph.create_vertex(["Person"], json!({})).unwrap();
    graph.create_edge("KNOWS", a.id, b.id, json!({"w": 1})).unwrap();

    let snapshot = graph.snapshot();
    let mut results = all_simple_paths_filtered(&snapshot, a.id, b.id, "", 3, "w", 0, 1).unwrap();

    // Writes after the snapshot are invisible to it
    let c = graph.create_vertex(["Person"], json!({})).unwrap();
    graph.create_edge("KNOWS", a.id, c.id, json!({"w": 1})).unwrap();
    graph.create_edge("KNOWS", c.id, b.id, json!({"w": 1})).unwrap();

    assert!(results.next().is_some());
    assert!(results.next().is_none());

    let fresh = graph.snapshot();
    assert_eq!(collect_int(&fresh, a.id, b.id, "", 3, "w", 0, 1).len(), 2);
}

#[test]
fn test_concurrent_queries() {
    let graph = MemoryGraph::new();
    let ids: Vec<Graphid> = (0..6)
        .map(|_| graph.create_vertex(["Node"], json!({})).unwrap().id)
        .collect();
    for i in 0..ids.len() {
        for j in (i + 1)..ids.len() {
            graph.create_edge("LINK", ids[i], ids[j], json!({"w": 1})).unwrap();
        }
    }
    let snapshot = graph.snapshot();
    let (start, end) = (ids[0], ids[5]);

    let counts: Vec<usize> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| collect_int(&snapshot, start, end, "LINK>", 6, "w", 1, 1).len()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // Forward paths in a 6-vertex tournament: one per subset of the 4 inner vertices
    assert_eq!(counts, vec![16; 4]);
}

#[test]
fn test_limit_stops_early() {
    let graph = MemoryGraph::new();
    let ids: Vec<Graphid> = (0..10)
        .map(|_| graph.create_vertex(["Node"], json!({})).unwrap().id)
        .collect();
    for i in 0..ids.len() {
        for j in 0..ids.len() {
            if i != j {
                graph.create_edge("LINK", ids[i], ids[j], json!({"w": 1})).unwrap();
            }
        }
    }
    let snapshot = graph.snapshot();

    let mut results =
        all_simple_paths_filtered(&snapshot, ids[0], ids[9], "LINK>", 10, "w", 1, 1).unwrap();
    let first: Vec<PathResult> = results.by_ref().take(3).collect::<Result<_, _>>().unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(results.paths_found(), 3);
}

/// Every path reachable by naive recursion over the same admission rule
fn naive_paths(
    snapshot: &GraphSnapshot,
    filter: &str,
    range: &PropertyRange,
    start: Graphid,
    end: Graphid,
    max_nodes: usize,
) -> Vec<(Vec<Graphid>, Vec<Graphid>)> {
    fn walk(
        snapshot: &GraphSnapshot,
        spec: &filtered_paths::TypeDirectionSpec,
        range: &PropertyRange,
        end: Graphid,
        max_nodes: usize,
        nodes: &mut Vec<Graphid>,
        rels: &mut Vec<Graphid>,
        out: &mut Vec<(Vec<Graphid>, Vec<Graphid>)>,
    ) {
        let current = *nodes.last().unwrap();
        if current == end {
            out.push((nodes.clone(), rels.clone()));
            return;
        }
        if nodes.len() >= max_nodes {
            return;
        }
        for edge in snapshot.relationships(current, Direction::Both, None).unwrap() {
            if !spec.matches(&edge, current) || !range.admits(&edge) {
                continue;
            }
            let next = edge.other_end(current).unwrap();
            if nodes.contains(&next) {
                continue;
            }
            nodes.push(next);
            rels.push(edge.id);
            walk(snapshot, spec, range, end, max_nodes, nodes, rels, out);
            nodes.pop();
            rels.pop();
        }
    }

    let spec = parse_rel_filter(filter).unwrap();
    let mut out = Vec::new();
    if max_nodes >= 1 {
        walk(
            snapshot,
            &spec,
            range,
            end,
            max_nodes,
            &mut vec![start],
            &mut Vec::new(),
            &mut out,
        );
    }
    out
}

#[test]
fn test_matches_naive_enumeration() {
    let mut rng = StdRng::seed_from_u64(7);
    let types = ["KNOWS", "WORKS_WITH", "IS_MANAGER_OF"];

    for _ in 0..20 {
        let graph = MemoryGraph::new();
        let ids: Vec<Graphid> = (0..7)
            .map(|_| graph.create_vertex(["Node"], json!({})).unwrap().id)
            .collect();
        for _ in 0..14 {
            let s = ids[rng.gen_range(0..ids.len())];
            let e = ids[rng.gen_range(0..ids.len())];
            let t = types[rng.gen_range(0..types.len())];
            graph
                .create_edge(t, s, e, json!({"w": rng.gen_range(0..5)}))
                .unwrap();
        }
        let snapshot = graph.snapshot();

        for filter in ["", "KNOWS", "KNOWS>|<WORKS_WITH", "IS_MANAGER_OF>|KNOWS|<", ">"] {
            for max_nodes in [1usize, 3, 5, 7] {
                let (start, end) = (ids[0], ids[6]);
                let range = PropertyRange::integer("w", 1, 3);

                let mut expected = naive_paths(&snapshot, filter, &range, start, end, max_nodes);
                let mut actual: Vec<(Vec<Graphid>, Vec<Graphid>)> =
                    collect_int(&snapshot, start, end, filter, max_nodes as i64, "w", 1, 3)
                        .into_iter()
                        .map(|p| (p.nodes, p.relationships))
                        .collect();

                for (nodes, _) in &actual {
                    assert!(nodes.len() <= max_nodes);
                    let distinct: HashSet<_> = nodes.iter().collect();
                    assert_eq!(distinct.len(), nodes.len(), "path repeats a vertex");
                }

                expected.sort();
                actual.sort();
                assert_eq!(actual, expected, "filter {:?}, max_nodes {}", filter, max_nodes);
            }
        }
    }
}

#[test]
fn test_procedure_over_imported_graph() {
    let mut file = NamedTempFile::new().unwrap();
    let data = json!({
        "vertices": [
            { "id": "alice", "labels": ["Person"], "properties": { "name": "Alice" } },
            { "id": "bob", "labels": ["Person"], "properties": { "name": "Bob" } },
            { "id": "carol", "labels": ["Person"], "properties": { "name": "Carol" } }
        ],
        "edges": [
            { "type": "KNOWS", "start": "alice", "end": "bob",
              "properties": { "since": "2019-03-01T00:00:00Z" } },
            { "type": "KNOWS", "start": "bob", "end": "carol",
              "properties": { "since": "2022-03-01T00:00:00Z" } },
            { "type": "KNOWS", "start": "alice", "end": "carol",
              "properties": { "since": "2015-03-01T00:00:00Z" } }
        ]
    });
    write!(file, "{}", data).unwrap();

    let graph = MemoryGraph::new();
    let report = import_from_json(&graph, file.path(), &ImportOptions::default()).unwrap();
    assert_eq!(report.stats.vertices_imported, 3);
    assert_eq!(report.stats.edges_imported, 3);

    let alice = report.resolve("alice").unwrap();
    let bob = report.resolve("bob").unwrap();
    let carol = report.resolve("carol").unwrap();
    let snapshot = graph.snapshot();

    let paths: Vec<PathResult> = all_simple_paths_filtered_dt(
        &snapshot,
        alice,
        carol,
        "KNOWS>",
        3,
        "since",
        ts("2018-01-01T00:00:00Z"),
        ts("2023-01-01T00:00:00Z"),
    )
    .unwrap()
    .collect::<Result<_, _>>()
    .unwrap();

    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].nodes, vec![alice, bob, carol]);
}
