//! Shortest paths, edge betweenness and Girvan-Newman style edge peeling
//! over a directed, integer-weighted graph.

pub mod common;
pub mod heap;
pub mod pathfinding;
pub mod centrality;
pub mod community;
pub mod topology;

pub use common::{Graph, GraphError, GraphResult, VertexId, Weight};
pub use heap::{HeapEntry, HeapError, HeapResult, IndexedMinHeap};
pub use pathfinding::{dijkstra, dijkstra_parents, shortest_path, PathResult, ShortestPathTree};
pub use centrality::{edge_betweenness, ranked_edges, BetweennessPass, MaxEdge, SweepMode};
pub use community::{girvan_newman_round, CommunityPeeler, PeelStep};
pub use topology::{
    average_neighborhood_overlap, neighborhood_overlap, strong_ties, triadic_closure_violations,
    TriadicViolation, DEFAULT_STRONG_TIE_THRESHOLD,
};
