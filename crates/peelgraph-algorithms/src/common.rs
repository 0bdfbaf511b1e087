//! Shared graph storage for the algorithms
//!
//! A directed, integer-weighted graph over vertices `0..n` with at most one
//! edge per ordered pair and no self-loops. Each vertex owns a map of
//! destination -> edge slot, so edge lookups are O(1) and neighbor
//! iteration is O(out-degree) without an adjacency matrix.
//!
//! Every edge slot also carries a betweenness counter that the centrality
//! pass increments; its presence mirrors the edge's presence exactly.

use indexmap::IndexMap;
use thiserror::Error;

/// Vertex identifier, an index in `[0, n)`
pub type VertexId = usize;

/// Edge weight. Non-negative by construction.
pub type Weight = u64;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    #[error("Graph must have at least one vertex")]
    EmptyGraph,

    #[error("Invalid vertex {0}")]
    InvalidVertex(VertexId),

    #[error("No edge {0} -> {1}")]
    NoSuchEdge(VertexId, VertexId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Per-edge storage: weight plus the traversal counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EdgeSlot {
    weight: Weight,
    betweenness: u64,
}

/// Directed weighted graph with per-edge betweenness counters.
///
/// Adjacency maps preserve insertion order, which makes neighbor iteration
/// (and therefore shortest-path tie-breaking) deterministic for a given
/// sequence of `add_edge`/`delete_edge` calls.
#[derive(Debug, Clone)]
pub struct Graph {
    adjacency: Vec<IndexMap<VertexId, EdgeSlot>>,
    edge_count: usize,
}

impl Graph {
    /// Create a graph with `n` isolated vertices. `n` must be positive.
    pub fn new(n: usize) -> GraphResult<Self> {
        if n == 0 {
            return Err(GraphError::EmptyGraph);
        }
        Ok(Self {
            adjacency: vec![IndexMap::new(); n],
            edge_count: 0,
        })
    }

    /// Build a graph from `(u, v, weight)` triples. Duplicate pairs keep the first weight.
    pub fn from_edges<I>(n: usize, edges: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (VertexId, VertexId, Weight)>,
    {
        let mut graph = Self::new(n)?;
        for (u, v, w) in edges {
            graph.add_edge(u, v, w)?;
        }
        Ok(graph)
    }

    /// Number of vertices
    pub fn size(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges currently present
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn check_vertex(&self, v: VertexId) -> GraphResult<()> {
        if v < self.adjacency.len() {
            Ok(())
        } else {
            Err(GraphError::InvalidVertex(v))
        }
    }

    fn slot(&self, u: VertexId, v: VertexId) -> GraphResult<&EdgeSlot> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        self.adjacency[u].get(&v).ok_or(GraphError::NoSuchEdge(u, v))
    }

    pub fn has_edge(&self, u: VertexId, v: VertexId) -> GraphResult<bool> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        Ok(self.adjacency[u].contains_key(&v))
    }

    pub fn weight(&self, u: VertexId, v: VertexId) -> GraphResult<Weight> {
        self.slot(u, v).map(|slot| slot.weight)
    }

    /// Insert `u -> v` with `weight`.
    ///
    /// Returns `Ok(false)` without touching the existing weight if the edge is
    /// already present.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, weight: Weight) -> GraphResult<bool> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if u == v {
            return Err(GraphError::InvalidVertex(v));
        }

        let out = &mut self.adjacency[u];
        if out.contains_key(&v) {
            return Ok(false);
        }
        out.insert(v, EdgeSlot { weight, betweenness: 0 });
        self.edge_count += 1;
        Ok(true)
    }

    /// Remove `u -> v`. Returns `Ok(false)` if there was no such edge.
    pub fn delete_edge(&mut self, u: VertexId, v: VertexId) -> GraphResult<bool> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;

        // swap_remove keeps deletion O(1); the resulting order is still deterministic
        if self.adjacency[u].swap_remove(&v).is_some() {
            self.edge_count -= 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Vertices reachable from `v` in one hop
    pub fn out_neighbors(&self, v: VertexId) -> GraphResult<impl Iterator<Item = VertexId> + '_> {
        self.check_vertex(v)?;
        Ok(self.adjacency[v].keys().copied())
    }

    /// `(target, weight)` pairs for the out-edges of `v`
    pub fn out_edges(&self, v: VertexId) -> GraphResult<impl Iterator<Item = (VertexId, Weight)> + '_> {
        self.check_vertex(v)?;
        Ok(self.adjacency[v].iter().map(|(&t, slot)| (t, slot.weight)))
    }

    pub fn out_degree(&self, v: VertexId) -> GraphResult<usize> {
        self.check_vertex(v)?;
        Ok(self.adjacency[v].len())
    }

    /// Every edge as `(source, target, weight)`, grouped by source vertex
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId, Weight)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, out)| out.iter().map(move |(&v, slot)| (u, v, slot.weight)))
    }

    /// Number of shortest paths counted through `u -> v` since the last reset
    pub fn betweenness(&self, u: VertexId, v: VertexId) -> GraphResult<u64> {
        self.slot(u, v).map(|slot| slot.betweenness)
    }

    /// Bump the counter on `u -> v`, returning the new value
    pub fn increment_betweenness(&mut self, u: VertexId, v: VertexId) -> GraphResult<u64> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        let slot = self.adjacency[u]
            .get_mut(&v)
            .ok_or(GraphError::NoSuchEdge(u, v))?;
        slot.betweenness += 1;
        Ok(slot.betweenness)
    }

    /// Zero every edge counter
    pub fn reset_betweenness(&mut self) {
        for out in &mut self.adjacency {
            for slot in out.values_mut() {
                slot.betweenness = 0;
            }
        }
    }
}
