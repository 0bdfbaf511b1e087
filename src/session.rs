//! Peeling session
//!
//! Owns a graph and a [`PeelConfig`], runs the configured number of peeling
//! rounds, and collects the metrics the driver reports between rounds. No
//! formatting happens here.

use serde::Serialize;
use tracing::info;

use crate::config::PeelConfig;
use peelgraph_algorithms::{
    average_neighborhood_overlap, triadic_closure_violations, CommunityPeeler, Graph,
    GraphResult, MaxEdge, TriadicViolation,
};

/// Structural metrics for the graph at one point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphMetrics {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub violations: Vec<TriadicViolation>,
    pub average_overlap: f64,
}

impl GraphMetrics {
    pub fn collect(graph: &Graph, strong_tie_threshold: u64) -> GraphResult<Self> {
        Ok(Self {
            vertex_count: graph.size(),
            edge_count: graph.edge_count(),
            violations: triadic_closure_violations(graph, strong_tie_threshold)?,
            average_overlap: average_neighborhood_overlap(graph)?,
        })
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }
}

/// What one round removed, and the graph afterwards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundReport {
    pub round: usize,
    pub removed: MaxEdge,
    pub metrics: GraphMetrics,
}

/// Full result of a session run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeelReport {
    pub initial: GraphMetrics,
    pub rounds: Vec<RoundReport>,
}

pub struct PeelSession {
    graph: Graph,
    config: PeelConfig,
}

impl PeelSession {
    pub fn new(graph: Graph, config: PeelConfig) -> Self {
        Self { graph, config }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Metrics for the current state of the graph
    pub fn metrics(&self) -> GraphResult<GraphMetrics> {
        GraphMetrics::collect(&self.graph, self.config.strong_tie_threshold)
    }

    /// Run all configured rounds, collecting every report.
    pub fn run(&mut self) -> GraphResult<PeelReport> {
        self.run_with(|_| {})
    }

    /// Run all configured rounds, handing each report to `on_round` as it completes.
    ///
    /// Stops early once the graph has no edges left.
    pub fn run_with<F>(&mut self, mut on_round: F) -> GraphResult<PeelReport>
    where
        F: FnMut(&RoundReport),
    {
        let threshold = self.config.strong_tie_threshold;
        let initial = GraphMetrics::collect(&self.graph, threshold)?;
        info!(
            "Starting peel: {} vertices, {} edges, {} rounds requested",
            initial.vertex_count, initial.edge_count, self.config.rounds
        );

        let mut peeler = CommunityPeeler::with_sweep(&mut self.graph, self.config.sweep);
        let mut rounds = Vec::new();

        for _ in 0..self.config.rounds {
            let Some(step) = peeler.step()? else {
                info!("Graph has no edges left, stopping after {} rounds", rounds.len());
                break;
            };
            let report = RoundReport {
                round: step.round,
                removed: step.removed,
                metrics: GraphMetrics::collect(peeler.graph(), threshold)?,
            };
            on_round(&report);
            rounds.push(report);
        }

        Ok(PeelReport { initial, rounds })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot() {
        let graph = Graph::from_edges(3, [(0, 1, 60), (0, 2, 70), (1, 0, 1)]).unwrap();
        let session = PeelSession::new(graph, PeelConfig::default());
        let metrics = session.metrics().unwrap();
        assert_eq!(metrics.vertex_count, 3);
        assert_eq!(metrics.edge_count, 3);
        assert_eq!(metrics.violation_count(), 1);
        assert_eq!(metrics.violations[0].pair, (1, 2));
    }

    #[test]
    fn test_run_respects_round_limit() {
        let graph = Graph::from_edges(4, [(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 0, 1)]).unwrap();
        let config = PeelConfig {
            rounds: 2,
            ..PeelConfig::default()
        };
        let mut session = PeelSession::new(graph, config);

        let mut seen = Vec::new();
        let report = session.run_with(|r| seen.push(r.round)).unwrap();
        assert_eq!(seen, vec![1, 2]);
        assert_eq!(report.initial.edge_count, 4);
        assert_eq!(report.rounds[0].metrics.edge_count, 3);
        assert_eq!(report.rounds[1].metrics.edge_count, 2);
        assert_eq!(session.graph().edge_count(), 2);
    }
}
