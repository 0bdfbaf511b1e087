//! Community detection by edge peeling
//!
//! Girvan-Newman style loop: find the edge with the highest betweenness,
//! delete it, reset the counters, repeat. Each round removes exactly one
//! edge while any remain. Connected components and modularity are not
//! computed here.

use super::centrality::{edge_betweenness, MaxEdge, SweepMode};
use super::common::{Graph, GraphResult};
use tracing::{debug, info};

/// Outcome of a single peeling round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeelStep {
    /// 1-based round number
    pub round: usize,
    /// The deleted edge and the betweenness it had when chosen
    pub removed: MaxEdge,
    /// Edges left after the deletion
    pub remaining_edges: usize,
}

/// Run one round on `graph`: remove the max-betweenness edge and zero the counters.
///
/// Returns `None`, leaving the graph untouched, when there are no edges.
pub fn girvan_newman_round(graph: &mut Graph, sweep: SweepMode) -> GraphResult<Option<MaxEdge>> {
    let pass = edge_betweenness(graph, sweep)?;
    let Some(max) = pass.max_edge else {
        return Ok(None);
    };

    graph.delete_edge(max.source, max.target)?;
    graph.reset_betweenness();
    Ok(Some(max))
}

/// Drives repeated peeling rounds over a borrowed graph
pub struct CommunityPeeler<'g> {
    graph: &'g mut Graph,
    sweep: SweepMode,
    rounds_run: usize,
}

impl<'g> CommunityPeeler<'g> {
    pub fn new(graph: &'g mut Graph) -> Self {
        Self::with_sweep(graph, SweepMode::default())
    }

    pub fn with_sweep(graph: &'g mut Graph, sweep: SweepMode) -> Self {
        Self {
            graph,
            sweep,
            rounds_run: 0,
        }
    }

    pub fn graph(&self) -> &Graph {
        &*self.graph
    }

    pub fn rounds_run(&self) -> usize {
        self.rounds_run
    }

    /// One round. `Ok(None)` once the graph has no edges left.
    pub fn step(&mut self) -> GraphResult<Option<PeelStep>> {
        let Some(removed) = girvan_newman_round(self.graph, self.sweep)? else {
            debug!("No edges left to peel after {} rounds", self.rounds_run);
            return Ok(None);
        };

        self.rounds_run += 1;
        let step = PeelStep {
            round: self.rounds_run,
            removed,
            remaining_edges: self.graph.edge_count(),
        };
        info!(
            "Round {}: removed {} -> {} (betweenness {}), {} edges left",
            step.round, removed.source, removed.target, removed.betweenness, step.remaining_edges
        );
        Ok(Some(step))
    }

    /// Up to `rounds` rounds, stopping early when the graph runs out of edges.
    pub fn run(&mut self, rounds: usize) -> GraphResult<Vec<PeelStep>> {
        let mut steps = Vec::with_capacity(rounds.min(self.graph.edge_count()));
        for _ in 0..rounds {
            match self.step()? {
                Some(step) => steps.push(step),
                None => break,
            }
        }
        Ok(steps)
    }
}
