use anyhow::{Context, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

const REL_TYPES: [&str; 3] = ["KNOWS", "WORKS_WITH", "IS_MANAGER_OF"];

#[derive(Debug, Clone, ValueEnum)]
enum GraphType {
    Uniform,
    Grid,
}

#[derive(Parser, Debug)]
#[command(name = "data_generator")]
#[command(about = "Generate graph datasets for path queries", long_about = None)]
struct Args {
    /// Type of graph to generate
    #[arg(short, long, value_enum)]
    graph_type: GraphType,

    /// Number of vertices (uniform graphs)
    #[arg(short = 'n', long, default_value_t = 1000)]
    vertices: usize,

    /// Average degree (uniform graphs)
    #[arg(short = 'd', long, default_value_t = 4)]
    avg_degree: usize,

    /// Grid size (creates size×size grid)
    #[arg(short = 's', long, default_value_t = 10)]
    size: usize,

    /// Upper bound of the integer `weight` property
    #[arg(long, default_value_t = 100)]
    max_weight: i64,

    /// Output file
    #[arg(short, long)]
    output: PathBuf,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Debug, Serialize)]
struct VertexRecord {
    id: String,
    labels: Vec<String>,
    properties: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct EdgeRecord {
    #[serde(rename = "type")]
    rel_type: String,
    start: String,
    end: String,
    properties: Map<String, Value>,
}

#[derive(Debug, Default, Serialize)]
struct GraphData {
    vertices: Vec<VertexRecord>,
    edges: Vec<EdgeRecord>,
}

struct GraphGenerator {
    rng: StdRng,
    max_weight: i64,
    epoch: DateTime<Utc>,
}

impl GraphGenerator {
    fn new(seed: u64, max_weight: i64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_weight: max_weight.max(1),
            epoch: Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).single().unwrap_or_default(),
        }
    }

    fn vertex(&mut self, key: String, label: &str) -> VertexRecord {
        let mut properties = Map::new();
        properties.insert("name".to_string(), json!(key.clone()));
        properties.insert("age".to_string(), json!(self.rng.gen_range(18..80)));
        VertexRecord {
            id: key,
            labels: vec![label.to_string()],
            properties,
        }
    }

    /// Relationship with a random type, integer weight and `since` timestamp
    fn edge(&mut self, start: String, end: String) -> EdgeRecord {
        let rel_type = REL_TYPES[self.rng.gen_range(0..REL_TYPES.len())];
        let since = self.epoch + Duration::days(self.rng.gen_range(0..365 * 25));

        let mut properties = Map::new();
        properties.insert("weight".to_string(), json!(self.rng.gen_range(0..=self.max_weight)));
        properties.insert("since".to_string(), json!(since.to_rfc3339()));

        EdgeRecord {
            rel_type: rel_type.to_string(),
            start,
            end,
            properties,
        }
    }

    /// Random graph with a fixed average degree
    fn generate_uniform(&mut self, n: usize, avg_degree: usize) -> GraphData {
        let mut data = GraphData::default();
        for i in 0..n {
            let v = self.vertex(format!("p{}", i), "Person");
            data.vertices.push(v);
        }
        if n < 2 {
            return data;
        }

        let num_edges = (n * avg_degree) / 2;
        let max_attempts = num_edges * 10;
        let mut edge_set = HashSet::new();
        let mut attempts = 0;

        while data.edges.len() < num_edges && attempts < max_attempts {
            attempts += 1;
            let start = self.rng.gen_range(0..n);
            let end = self.rng.gen_range(0..n);
            if start == end || !edge_set.insert((start, end)) {
                continue;
            }
            let e = self.edge(format!("p{}", start), format!("p{}", end));
            data.edges.push(e);
        }

        data
    }

    /// size×size grid, each cell linked to its right and lower neighbour
    fn generate_grid(&mut self, size: usize) -> GraphData {
        let mut data = GraphData::default();
        let key = |row: usize, col: usize| format!("n{}_{}", row, col);

        for row in 0..size {
            for col in 0..size {
                let v = self.vertex(key(row, col), "GridNode");
                data.vertices.push(v);
            }
        }

        for row in 0..size {
            for col in 0..size {
                if col + 1 < size {
                    let e = self.edge(key(row, col), key(row, col + 1));
                    data.edges.push(e);
                }
                if row + 1 < size {
                    let e = self.edge(key(row, col), key(row + 1, col));
                    data.edges.push(e);
                }
            }
        }

        data
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let mut generator = GraphGenerator::new(args.seed, args.max_weight);
    let data = match args.graph_type {
        GraphType::Uniform => generator.generate_uniform(args.vertices, args.avg_degree),
        GraphType::Grid => generator.generate_grid(args.size),
    };

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &data)?;

    tracing::info!(
        vertices = data.vertices.len(),
        edges = data.edges.len(),
        output = %args.output.display(),
        "graph written"
    );
    Ok(())
}
