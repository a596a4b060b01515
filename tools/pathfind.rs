use anyhow::{bail, Context, Result};
use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand, ValueEnum};
use filtered_paths::config::{init_logging, Config};
use filtered_paths::{
    all_simple_paths_filtered, all_simple_paths_filtered_dt, import_from_csv, import_from_json,
    Graphid, ImportOptions, ImportReport, MemoryGraph, PathResult,
};
use filtered_paths::procedures::procedure;
use serde::Serialize;
use std::collections::HashMap;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "pathfind")]
#[command(about = "Enumerate filtered simple paths between two vertices", long_about = None)]
struct Args {
    /// JSON graph file
    #[arg(long, required_unless_present = "vertices", conflicts_with = "vertices")]
    graph: Option<PathBuf>,

    /// Vertex CSV file
    #[arg(long, requires = "edges")]
    vertices: Option<PathBuf>,

    /// Edge CSV file
    #[arg(long, requires = "vertices")]
    edges: Option<PathBuf>,

    /// Id of the start vertex in the input file
    #[arg(short, long)]
    start: String,

    /// Id of the end vertex in the input file
    #[arg(short, long)]
    end: String,

    /// Relationship filter, e.g. 'KNOWS|<WORKS_WITH|IS_MANAGER_OF>'
    #[arg(short, long, default_value = "")]
    rel_filter: String,

    /// Maximum number of vertices per path
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    max_nodes: Option<i64>,

    /// Relationship property to check
    #[arg(short, long)]
    property: String,

    /// Stop after this many paths (0 = unlimited)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    output: OutputFormat,

    /// Skip malformed rows while importing
    #[arg(long)]
    skip_errors: bool,

    /// JSON config file; environment variables override it
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    bounds: Bounds,
}

#[derive(Subcommand, Debug)]
enum Bounds {
    /// Integer property, min <= value <= max
    Int {
        #[arg(long, allow_negative_numbers = true)]
        min: i64,
        #[arg(long, allow_negative_numbers = true)]
        max: i64,
    },
    /// RFC 3339 timestamp property, min < value < max
    Datetime {
        #[arg(long, value_parser = parse_datetime)]
        min: DateTime<FixedOffset>,
        #[arg(long, value_parser = parse_datetime)]
        max: DateTime<FixedOffset>,
    },
}

fn parse_datetime(s: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s).map_err(|e| format!("invalid RFC 3339 timestamp '{}': {}", s, e))
}

/// Output row with vertices named by their import ids
#[derive(Debug, Serialize)]
struct PathRow {
    nodes: Vec<String>,
    relationships: Vec<Graphid>,
    weight: f64,
}

impl PathRow {
    fn new(result: PathResult, names: &HashMap<Graphid, String>) -> Self {
        Self {
            nodes: result
                .nodes
                .iter()
                .map(|id| names.get(id).cloned().unwrap_or_else(|| id.to_string()))
                .collect(),
            relationships: result.relationships,
            weight: result.weight,
        }
    }
}

fn load_graph(args: &Args, graph: &MemoryGraph) -> Result<ImportReport> {
    let options = ImportOptions {
        skip_errors: args.skip_errors,
        ..ImportOptions::default()
    };

    match (&args.graph, &args.vertices, &args.edges) {
        (Some(path), _, _) => import_from_json(graph, path, &options)
            .with_context(|| format!("failed to import {}", path.display())),
        (None, Some(vertices), Some(edges)) => import_from_csv(graph, vertices, edges, &options)
            .with_context(|| {
                format!("failed to import {} and {}", vertices.display(), edges.display())
            }),
        _ => bail!("either --graph or both --vertices and --edges are required"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref()).context("invalid configuration")?;
    init_logging(&config.logging)?;

    let max_nodes = args.max_nodes.unwrap_or(config.query.max_nodes);
    let limit = match args.limit.unwrap_or(config.query.limit) {
        0 => usize::MAX,
        n => n,
    };

    let graph = MemoryGraph::new();
    let report = load_graph(&args, &graph)?;

    let start = report
        .resolve(&args.start)
        .with_context(|| format!("unknown start vertex '{}'", args.start))?;
    let end = report
        .resolve(&args.end)
        .with_context(|| format!("unknown end vertex '{}'", args.end))?;

    let names: HashMap<Graphid, String> = report
        .id_mapping
        .iter()
        .map(|(key, id)| (*id, key.clone()))
        .collect();

    let snapshot = graph.snapshot();
    let name = match args.bounds {
        Bounds::Int { .. } => "algo.allSimplePathsFiltered",
        Bounds::Datetime { .. } => "algo.allSimplePathsFilteredDt",
    };
    let info = procedure(name).with_context(|| format!("procedure {} is not registered", name))?;
    info!(
        procedure = info.name,
        vertices = snapshot.vertex_count(),
        edges = snapshot.edge_count(),
        "running"
    );

    let results = match args.bounds {
        Bounds::Int { min, max } => all_simple_paths_filtered(
            &snapshot,
            start,
            end,
            &args.rel_filter,
            max_nodes,
            &args.property,
            min,
            max,
        )?,
        Bounds::Datetime { min, max } => all_simple_paths_filtered_dt(
            &snapshot,
            start,
            end,
            &args.rel_filter,
            max_nodes,
            &args.property,
            min,
            max,
        )?,
    };

    let started = Instant::now();
    let stdout = io::stdout();
    let mut count = 0usize;

    match args.output {
        OutputFormat::Json => {
            let mut out = BufWriter::new(stdout.lock());
            for result in results.take(limit) {
                let row = PathRow::new(result?, &names);
                serde_json::to_writer(&mut out, &row)?;
                writeln!(out)?;
                count += 1;
            }
            out.flush()?;
        }
        OutputFormat::Csv => {
            let mut out = csv::Writer::from_writer(stdout.lock());
            out.write_record(["nodes", "relationships", "weight"])?;
            for result in results.take(limit) {
                let row = PathRow::new(result?, &names);
                let relationships: Vec<String> =
                    row.relationships.iter().map(|id| id.to_string()).collect();
                out.write_record([
                    row.nodes.join(";"),
                    relationships.join(";"),
                    row.weight.to_string(),
                ])?;
                count += 1;
            }
            out.flush()?;
        }
    }

    info!(paths = count, elapsed_ms = started.elapsed().as_millis() as u64, "done");
    Ok(())
}
