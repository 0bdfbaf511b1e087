//! Edge-list ingestion
//!
//! Reads one edge per line as `u v` or `u v w` (whitespace separated).
//! Blank lines and lines starting with `#` are skipped. The vertex count is
//! `max(endpoint) + 1`. Edges without an explicit weight get a uniform random
//! weight in `[0, max_weight)`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{PeelConfig, DEFAULT_MAX_WEIGHT};
use peelgraph_algorithms::{Graph, GraphError, VertexId, Weight};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Line {line}: vertex {vertex} exceeds the limit of {limit} vertices")]
    TooLarge { line: usize, vertex: u64, limit: usize },

    #[error("Edge list contains no edges")]
    Empty,

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Upper bound on the vertex count; the graph allocates one adjacency map per vertex id
pub const MAX_VERTICES: usize = 1 << 22;

/// Counters gathered while loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct LoadStats {
    /// Non-blank, non-comment lines
    pub records: usize,
    pub edges_added: usize,
    /// Repeated `u v` pairs; the first weight is kept
    pub duplicates: usize,
    pub self_loops: usize,
}

/// A freshly loaded graph with its load counters
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    pub graph: Graph,
    pub stats: LoadStats,
}

struct EdgeRecord {
    source: VertexId,
    target: VertexId,
    weight: Option<Weight>,
}

/// Builds graphs from edge lists, assigning random weights where none are given
pub struct EdgeListLoader {
    max_weight: Weight,
    rng: StdRng,
}

impl Default for EdgeListLoader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WEIGHT, None)
    }
}

impl EdgeListLoader {
    /// `seed = None` draws weights from OS entropy.
    pub fn new(max_weight: Weight, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            max_weight: max_weight.max(1),
            rng,
        }
    }

    pub fn from_config(config: &PeelConfig) -> Self {
        Self::new(config.max_weight, config.seed)
    }

    pub fn load_path(&mut self, path: impl AsRef<Path>) -> LoadResult<LoadedGraph> {
        let path = path.as_ref();
        let file = File::open(path)?;
        info!("Loading edge list from {:?}", path);
        self.load_reader(BufReader::new(file))
    }

    pub fn load_str(&mut self, text: &str) -> LoadResult<LoadedGraph> {
        self.load_reader(text.as_bytes())
    }

    pub fn load_reader<R: BufRead>(&mut self, reader: R) -> LoadResult<LoadedGraph> {
        let mut records = Vec::new();
        let mut max_vertex: Option<VertexId> = None;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let Some(record) = parse_line(&line, idx + 1)? else {
                continue;
            };
            let top = record.source.max(record.target);
            max_vertex = Some(max_vertex.map_or(top, |m| m.max(top)));
            records.push(record);
        }

        let max_vertex = max_vertex.ok_or(LoadError::Empty)?;
        let size = max_vertex.checked_add(1).ok_or(LoadError::TooLarge {
            line: 0,
            vertex: max_vertex as u64,
            limit: MAX_VERTICES,
        })?;
        let mut graph = Graph::new(size)?;
        let mut stats = LoadStats {
            records: records.len(),
            ..LoadStats::default()
        };

        for record in records {
            if record.source == record.target {
                warn!("Skipping self-loop on vertex {}", record.source);
                stats.self_loops += 1;
                continue;
            }
            let weight = match record.weight {
                Some(w) => w,
                None => self.rng.gen_range(0..self.max_weight),
            };
            if graph.add_edge(record.source, record.target, weight)? {
                stats.edges_added += 1;
            } else {
                stats.duplicates += 1;
            }
        }

        info!(
            "Loaded graph with {} vertices and {} edges ({} duplicates, {} self-loops skipped)",
            graph.size(),
            stats.edges_added,
            stats.duplicates,
            stats.self_loops
        );
        Ok(LoadedGraph { graph, stats })
    }
}

fn parse_line(line: &str, line_no: usize) -> LoadResult<Option<EdgeRecord>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    if !(2..=3).contains(&fields.len()) {
        return Err(LoadError::Parse {
            line: line_no,
            message: format!("expected `u v` or `u v w`, found {} fields", fields.len()),
        });
    }

    let parse = |field: &str, what: &str| -> LoadResult<u64> {
        field.parse::<u64>().map_err(|e| LoadError::Parse {
            line: line_no,
            message: format!("invalid {} `{}`: {}", what, field, e),
        })
    };

    let vertex = |field: &str, what: &str| -> LoadResult<VertexId> {
        let id = parse(field, what)?;
        match VertexId::try_from(id) {
            Ok(v) if v < MAX_VERTICES => Ok(v),
            _ => Err(LoadError::TooLarge {
                line: line_no,
                vertex: id,
                limit: MAX_VERTICES,
            }),
        }
    };

    let source = vertex(fields[0], "source")?;
    let target = vertex(fields[1], "target")?;
    let weight = fields.get(2).map(|w| parse(*w, "weight")).transpose()?;

    Ok(Some(EdgeRecord {
        source,
        target,
        weight,
    }))
}
