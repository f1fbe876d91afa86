//! Graph payloads.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use stepwise_trace::Trace;

use crate::graph::EdgeId;

/// Snapshot of a graph algorithm.
///
/// Searches fill `visited`, `frontier` and `current`; Dijkstra also fills
/// `distances`; Kruskal uses `current_edge`, `components` and `total_weight`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphState {
    /// Nodes visited so far, in the order they were marked.
    pub visited: Vec<String>,
    /// Pending nodes, front of the queue (or bottom of the stack) first.
    pub frontier: Vec<String>,
    /// Node being processed.
    pub current: Option<String>,
    /// Edges to draw emphasized.
    pub highlighted_edges: BTreeSet<EdgeId>,
    /// Edge under examination.
    pub current_edge: Option<EdgeId>,
    /// Tentative distances; `None` means unreached.
    pub distances: Option<BTreeMap<String, Option<u64>>>,
    /// Reconstructed path from start to goal.
    pub path: Option<Vec<String>>,
    /// Disjoint-set components (Kruskal).
    pub components: Vec<Vec<String>>,
    /// Accumulated weight of selected edges or of the found path.
    pub total_weight: Option<u64>,
}

impl GraphState {
    pub(crate) fn mark_visited(&mut self, node: &str) {
        if !self.visited.iter().any(|v| v == node) {
            self.visited.push(node.to_string());
        }
    }
}

/// The path recorded in the final frame, if the goal was reached.
pub fn found_path(trace: &Trace<GraphState>) -> Option<&[String]> {
    trace.last().payload.path.as_deref()
}
