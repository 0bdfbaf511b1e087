//! Pathfinding algorithms
//!
//! Single-source Dijkstra over [`Graph`] driven by an [`IndexedMinHeap`]
//! keyed by tentative distance. Edge weights must be non-negative; with
//! `Weight = u64` this holds by construction.

use super::common::{Graph, GraphResult, VertexId};
use super::heap::IndexedMinHeap;

/// Result of a pathfinding algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    pub source: VertexId,
    pub target: VertexId,
    pub path: Vec<VertexId>,
    pub cost: u64,
}

/// Parent pointers and distances from a single source
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: VertexId,
    /// `None` stands for infinity
    distance: Vec<Option<u64>>,
    /// `None` when the vertex has no predecessor
    parent: Vec<Option<VertexId>>,
}

impl ShortestPathTree {
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Distance from the source, `None` if unreachable or out of range
    pub fn distance(&self, v: VertexId) -> Option<u64> {
        self.distance.get(v).copied().flatten()
    }

    pub fn parent(&self, v: VertexId) -> Option<VertexId> {
        self.parent.get(v).copied().flatten()
    }

    /// Backtrack from `target` to the source.
    ///
    /// Returns `[source, ..., target]`, `[source]` when `target == source`,
    /// and an empty path when `target` is unreachable.
    pub fn path_to(&self, target: VertexId) -> Vec<VertexId> {
        if target == self.source {
            return vec![self.source];
        }
        if self.parent(target).is_none() {
            return Vec::new();
        }

        let mut path = vec![target];
        let mut current = target;
        while let Some(prev) = self.parent(current) {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        path
    }
}

/// Dijkstra's algorithm from `source`, producing the full parent tree.
///
/// Runtime O((n + m) log n).
pub fn dijkstra_parents(graph: &Graph, source: VertexId) -> GraphResult<ShortestPathTree> {
    let n = graph.size();
    // validates `source`
    graph.out_degree(source)?;

    let mut distance: Vec<Option<u64>> = vec![None; n];
    let mut parent: Vec<Option<VertexId>> = vec![None; n];
    let mut done = vec![false; n];

    distance[source] = Some(0);
    let mut queue: IndexedMinHeap<u64, VertexId> = IndexedMinHeap::with_capacity(n);
    let seeded = queue.add(0, source);
    debug_assert!(seeded.is_ok(), "fresh heap rejected the source");

    while let Ok(entry) = queue.extract_min() {
        let u = entry.value;
        let dist_u = entry.key;
        done[u] = true;

        for (next, weight) in graph.out_edges(u)? {
            if done[next] {
                continue;
            }
            let candidate = dist_u.saturating_add(weight);
            let improves = distance[next].map_or(true, |d| candidate < d);
            if !improves {
                continue;
            }

            distance[next] = Some(candidate);
            parent[next] = Some(u);
            // candidate is strictly below any queued key for `next`
            let queued = if queue.contains_value(&next) {
                queue.decrease_key(&next, candidate)
            } else {
                queue.add(candidate, next)
            };
            debug_assert!(queued.is_ok(), "heap rejected relaxation of {}: {:?}", next, queued);
        }
    }

    Ok(ShortestPathTree {
        source,
        distance,
        parent,
    })
}

/// Shortest path from `source` to `target` as a vertex sequence.
///
/// Empty when unreachable, `[source]` when `source == target`.
pub fn shortest_path(graph: &Graph, source: VertexId, target: VertexId) -> GraphResult<Vec<VertexId>> {
    // validates `target`
    graph.out_degree(target)?;
    let tree = dijkstra_parents(graph, source)?;
    Ok(tree.path_to(target))
}

/// Dijkstra's Algorithm (Weighted Shortest Path) with total cost.
///
/// Returns `None` when `target` is unreachable.
pub fn dijkstra(graph: &Graph, source: VertexId, target: VertexId) -> GraphResult<Option<PathResult>> {
    graph.out_degree(target)?;
    let tree = dijkstra_parents(graph, source)?;
    let path = tree.path_to(target);
    if path.is_empty() {
        return Ok(None);
    }
    Ok(tree.distance(target).map(|cost| PathResult {
        source,
        target,
        path,
        cost,
    }))
}
