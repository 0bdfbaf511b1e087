//! Peelgraph
//!
//! Shortest paths, edge betweenness and iterative community peeling over a
//! directed, integer-weighted graph.
//!
//! # Architecture
//!
//! - `peelgraph-algorithms`: indexed min-heap, graph storage, Dijkstra,
//!   edge betweenness accumulation and the peeling loop
//! - [`loader`]: edge-list ingestion with random or explicit weights
//! - [`config`]: run settings, optionally read from JSON
//! - [`session`]: runs peeling rounds and gathers per-round metrics
//!
//! ## Example Usage
//!
//! ```rust
//! use peelgraph::{EdgeListLoader, PeelConfig, PeelSession};
//!
//! let text = "0 1 3\n1 2 4\n2 0 5\n2 3 1\n3 2 1\n";
//! let loaded = EdgeListLoader::new(100, Some(7)).load_str(text).unwrap();
//!
//! let config = PeelConfig { rounds: 2, ..PeelConfig::default() };
//! let mut session = PeelSession::new(loaded.graph, config);
//! let report = session.run().unwrap();
//!
//! assert_eq!(report.rounds.len(), 2);
//! assert_eq!(session.graph().edge_count(), 3);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod loader;
pub mod session;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigResult, PeelConfig};
pub use loader::{EdgeListLoader, LoadError, LoadResult, LoadStats, LoadedGraph};
pub use session::{GraphMetrics, PeelReport, PeelSession, RoundReport};

pub use peelgraph_algorithms as algo;
pub use peelgraph_algorithms::{
    Graph, GraphError, GraphResult, MaxEdge, PathResult, SweepMode, VertexId, Weight,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
