//! Graph topology analysis algorithms
//!
//! Set-based analyses over out-neighborhoods: strong ties, triadic-closure
//! violations, and neighborhood overlap. These only read the graph.

use super::common::{Graph, GraphResult, VertexId, Weight};
use std::collections::{BTreeMap, HashSet};

/// Weight above which an edge counts as a strong tie
pub const DEFAULT_STRONG_TIE_THRESHOLD: Weight = 50;

/// A vertex with two strong out-ties whose endpoints are not linked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriadicViolation {
    pub vertex: VertexId,
    /// Strong-tie targets `(j, k)`, `j < k`, with no edge `j -> k`
    pub pair: (VertexId, VertexId),
}

/// Strong out-ties per vertex, targets ascending. Vertices without any are omitted.
pub fn strong_ties(graph: &Graph, threshold: Weight) -> BTreeMap<VertexId, Vec<VertexId>> {
    let mut ties: BTreeMap<VertexId, Vec<VertexId>> = BTreeMap::new();
    for (u, v, w) in graph.edges() {
        if w > threshold {
            ties.entry(u).or_default().push(v);
        }
    }
    for targets in ties.values_mut() {
        targets.sort_unstable();
    }
    ties
}

/// Triadic closure violations, at most one per vertex.
///
/// For each vertex the first violating pair in ascending order is reported.
pub fn triadic_closure_violations(graph: &Graph, threshold: Weight) -> GraphResult<Vec<TriadicViolation>> {
    let mut violations = Vec::new();

    for (vertex, targets) in strong_ties(graph, threshold) {
        'search: for (a, &j) in targets.iter().enumerate() {
            for &k in &targets[a + 1..] {
                if !graph.has_edge(j, k)? {
                    violations.push(TriadicViolation { vertex, pair: (j, k) });
                    break 'search;
                }
            }
        }
    }

    Ok(violations)
}

/// Neighborhood overlap of `a` and `b`.
///
/// |N(a) ∩ N(b)| / |(N(a) ∪ N(b)) \ {a, b}| over out-neighborhoods, or 0.0
/// when the denominator is empty.
pub fn neighborhood_overlap(graph: &Graph, a: VertexId, b: VertexId) -> GraphResult<f64> {
    let na: HashSet<VertexId> = graph.out_neighbors(a)?.filter(|&x| x != b).collect();
    let nb: HashSet<VertexId> = graph.out_neighbors(b)?.filter(|&x| x != a).collect();

    let union = na.union(&nb).count();
    if union == 0 {
        return Ok(0.0);
    }
    let common = na.intersection(&nb).count();
    Ok(common as f64 / union as f64)
}

/// Sum of the per-edge neighborhood overlaps divided by the vertex count.
///
/// 0.0 for an edgeless graph.
pub fn average_neighborhood_overlap(graph: &Graph) -> GraphResult<f64> {
    let mut sum = 0.0;
    for (u, v, _) in graph.edges() {
        sum += neighborhood_overlap(graph, u, v)?;
    }
    Ok(sum / graph.size() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_ties() {
        let g = Graph::from_edges(4, [(0, 3, 80), (0, 1, 90), (0, 2, 10), (2, 1, 50)]).unwrap();
        let ties = strong_ties(&g, DEFAULT_STRONG_TIE_THRESHOLD);
        assert_eq!(ties.len(), 1);
        assert_eq!(ties[&0], vec![1, 3]);
    }

    #[test]
    fn test_triadic_violations() {
        // 0 has strong ties to 1, 2, 3; only 1 -> 2 closes a triangle
        let g = Graph::from_edges(
            5,
            [(0, 1, 60), (0, 2, 70), (0, 3, 80), (1, 2, 1), (4, 0, 99)],
        )
        .unwrap();
        let violations = triadic_closure_violations(&g, 50).unwrap();
        assert_eq!(violations, vec![TriadicViolation { vertex: 0, pair: (1, 3) }]);
    }

    #[test]
    fn test_closed_triangle_has_no_violation() {
        let g = Graph::from_edges(3, [(0, 1, 60), (0, 2, 70), (1, 2, 5)]).unwrap();
        assert!(triadic_closure_violations(&g, 50).unwrap().is_empty());
        // raising the threshold removes the strong ties entirely
        assert!(strong_ties(&g, 100).is_empty());
    }

    #[test]
    fn test_neighborhood_overlap() {
        // N(0) = {1, 2, 3}, N(1) = {2, 3, 4}
        let g = Graph::from_edges(
            5,
            [(0, 1, 1), (0, 2, 1), (0, 3, 1), (1, 2, 1), (1, 3, 1), (1, 4, 1)],
        )
        .unwrap();
        // common {2, 3}; union without endpoints {2, 3, 4}
        let overlap = neighborhood_overlap(&g, 0, 1).unwrap();
        assert!((overlap - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(neighborhood_overlap(&g, 3, 4).unwrap(), 0.0);
    }

    #[test]
    fn test_average_overlap() {
        let empty = Graph::new(2).unwrap();
        assert_eq!(average_neighborhood_overlap(&empty).unwrap(), 0.0);

        // 0 -> 1, 0 -> 2, 1 -> 2: overlaps are 1/1 for (0,1) and 0 otherwise
        let g = Graph::from_edges(3, [(0, 1, 1), (0, 2, 1), (1, 2, 1)]).unwrap();
        let avg = average_neighborhood_overlap(&g).unwrap();
        assert!((avg - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_average_overlap_divides_by_vertex_count() {
        // same edges plus an isolated vertex 3: sum 1.0 over 4 vertices
        let g = Graph::from_edges(4, [(0, 1, 1), (0, 2, 1), (1, 2, 1)]).unwrap();
        let avg = average_neighborhood_overlap(&g).unwrap();
        assert!((avg - 0.25).abs() < 1e-12);
    }
}
