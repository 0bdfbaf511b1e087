//! Edge betweenness centrality
//!
//! Counts, for every edge, how many source/target shortest paths pass
//! through it, and tracks the edge with the highest count. One Dijkstra
//! tree is computed per source and reused for every target; the counts are
//! the same as running a separate shortest-path query per pair.

use super::common::{Graph, GraphResult, VertexId};
use super::pathfinding::dijkstra_parents;
use tracing::debug;

/// Which ordered vertex pairs a pass visits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SweepMode {
    /// Every ordered pair `(i, j)` with `i != j`
    #[default]
    AllPairs,
    /// Only pairs with `i < j`
    UpperTriangle,
}

impl SweepMode {
    fn includes(self, i: VertexId, j: VertexId) -> bool {
        match self {
            SweepMode::AllPairs => i != j,
            SweepMode::UpperTriangle => i < j,
        }
    }
}

/// The edge with the highest betweenness seen during a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaxEdge {
    pub source: VertexId,
    pub target: VertexId,
    pub betweenness: u64,
}

/// Summary of one accumulation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BetweennessPass {
    /// `None` when the graph has no edges
    pub max_edge: Option<MaxEdge>,
    /// Pairs visited
    pub pairs: usize,
    /// Pairs with a non-trivial path
    pub paths: usize,
}

/// Reset all counters, then accumulate edge betweenness over the sweep.
///
/// Ties on the maximum go to the edge that reached the winning count first
/// in sweep order: sources ascending, targets ascending, edges along the path.
pub fn edge_betweenness(graph: &mut Graph, sweep: SweepMode) -> GraphResult<BetweennessPass> {
    graph.reset_betweenness();

    let n = graph.size();
    let mut pass = BetweennessPass::default();

    for i in 0..n {
        let tree = dijkstra_parents(graph, i)?;

        for j in 0..n {
            if !sweep.includes(i, j) {
                continue;
            }
            pass.pairs += 1;

            let path = tree.path_to(j);
            if path.len() < 2 {
                continue;
            }
            pass.paths += 1;

            for hop in path.windows(2) {
                let (u, v) = (hop[0], hop[1]);
                let count = graph.increment_betweenness(u, v)?;
                let beats = pass.max_edge.map_or(true, |max| count > max.betweenness);
                if beats {
                    pass.max_edge = Some(MaxEdge {
                        source: u,
                        target: v,
                        betweenness: count,
                    });
                }
            }
        }
    }

    debug!(
        "Betweenness pass over {} pairs ({} paths), max edge {:?}",
        pass.pairs, pass.paths, pass.max_edge
    );
    Ok(pass)
}

/// All edges ordered by current betweenness, highest first.
///
/// Reads the counters left by the last pass; equal counts keep edge order.
pub fn ranked_edges(graph: &Graph) -> GraphResult<Vec<MaxEdge>> {
    let mut ranked = graph
        .edges()
        .map(|(u, v, _)| {
            graph.betweenness(u, v).map(|betweenness| MaxEdge {
                source: u,
                target: v,
                betweenness,
            })
        })
        .collect::<GraphResult<Vec<_>>>()?;
    ranked.sort_by(|a, b| b.betweenness.cmp(&a.betweenness));
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bridge_graph() -> Graph {
        // two triangles (edges both ways) joined by 2 <-> 3
        let mut edges = Vec::new();
        for &(u, v) in &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)] {
            edges.push((u, v, 1));
            edges.push((v, u, 1));
        }
        Graph::from_edges(6, edges).unwrap()
    }

    #[test]
    fn test_bridge_has_max_betweenness() {
        let mut g = bridge_graph();
        let pass = edge_betweenness(&mut g, SweepMode::AllPairs).unwrap();
        let max = pass.max_edge.unwrap();

        // every path crossing between the triangles uses the bridge: 3 * 3 each way
        assert_eq!(g.betweenness(2, 3), Ok(9));
        assert_eq!(g.betweenness(3, 2), Ok(9));
        // 2->3 reaches 9 before 3->2 does
        assert_eq!((max.source, max.target, max.betweenness), (2, 3, 9));
        assert_eq!(pass.pairs, 30);
        assert_eq!(pass.paths, 30);
    }

    #[test]
    fn test_chain_counts() {
        // 0 -> 1 -> 2 -> 3
        let mut g = Graph::from_edges(4, [(0, 1, 1), (1, 2, 1), (2, 3, 1)]).unwrap();
        edge_betweenness(&mut g, SweepMode::AllPairs).unwrap();
        assert_eq!(g.betweenness(0, 1), Ok(3));
        assert_eq!(g.betweenness(1, 2), Ok(4));
        assert_eq!(g.betweenness(2, 3), Ok(3));
    }

    #[test]
    fn test_upper_triangle_sweep() {
        // only i < j pairs: 3 -> 0 is never counted
        let mut g = Graph::from_edges(4, [(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 0, 1)]).unwrap();
        let pass = edge_betweenness(&mut g, SweepMode::UpperTriangle).unwrap();
        assert_eq!(pass.pairs, 6);
        assert_eq!(g.betweenness(3, 0), Ok(0));
        assert_eq!(g.betweenness(1, 2), Ok(4));
        assert_eq!(pass.max_edge.map(|m| (m.source, m.target)), Some((1, 2)));
    }

    #[test]
    fn test_pass_is_idempotent() {
        let mut g = bridge_graph();
        edge_betweenness(&mut g, SweepMode::AllPairs).unwrap();
        let first: Vec<_> = g.edges().map(|(u, v, _)| g.betweenness(u, v).unwrap()).collect();

        g.reset_betweenness();
        edge_betweenness(&mut g, SweepMode::AllPairs).unwrap();
        let second: Vec<_> = g.edges().map(|(u, v, _)| g.betweenness(u, v).unwrap()).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_no_edges() {
        let mut g = Graph::new(3).unwrap();
        let pass = edge_betweenness(&mut g, SweepMode::AllPairs).unwrap();
        assert_eq!(pass.max_edge, None);
        assert_eq!(pass.paths, 0);
    }

    #[test]
    fn test_ranked_edges() {
        let mut g = Graph::from_edges(4, [(0, 1, 1), (1, 2, 1), (2, 3, 1)]).unwrap();
        edge_betweenness(&mut g, SweepMode::AllPairs).unwrap();
        let ranked = ranked_edges(&g).unwrap();
        assert_eq!(ranked.len(), 3);
        assert_eq!((ranked[0].source, ranked[0].target), (1, 2));
        assert_eq!(ranked[0].betweenness, 4);
        assert_eq!((ranked[1].source, ranked[1].target), (0, 1));
    }
}
