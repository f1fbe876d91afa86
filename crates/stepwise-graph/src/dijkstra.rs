//! Dijkstra's single-source shortest paths.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet};

use stepwise_trace::{Result, Trace, TraceBuilder};

use crate::graph::Graph;
use crate::search::{reconstruct, resolve, Parents};
use crate::state::GraphState;

/// A popped frontier entry.
struct Pending<'g> {
    node: &'g str,
    distance: u64,
}

/// Min-heap frontier ordered by (distance, first-found).
///
/// Lowering a distance pushes a fresh entry; the superseded one stays in the
/// heap and is skipped when popped.
#[derive(Default)]
struct Frontier<'g> {
    heap: BinaryHeap<Reverse<(u64, u64, &'g str)>>,
    /// Live tentative distance of every queued node.
    best: HashMap<&'g str, u64>,
    /// Sequence number from when each node was first found.
    found: HashMap<&'g str, u64>,
}

impl<'g> Frontier<'g> {
    fn offer(&mut self, node: &'g str, distance: u64) {
        let next = self.found.len() as u64;
        let seq = *self.found.entry(node).or_insert(next);
        self.best.insert(node, distance);
        self.heap.push(Reverse((distance, seq, node)));
    }

    fn pop(&mut self) -> Option<Pending<'g>> {
        while let Some(Reverse((distance, _, node))) = self.heap.pop() {
            if self.best.get(node) == Some(&distance) {
                self.best.remove(node);
                return Some(Pending { node, distance });
            }
        }
        None
    }

    /// Queued nodes in pop order, one entry each.
    fn names(&self) -> Vec<String> {
        let mut live: Vec<_> = self
            .best
            .iter()
            .map(|(&node, &distance)| (distance, self.found.get(node).copied().unwrap_or(0), node))
            .collect();
        live.sort_unstable();
        live.into_iter().map(|(_, _, node)| node.to_string()).collect()
    }
}

fn format_distance(d: Option<u64>) -> String {
    d.map_or_else(|| "∞".to_string(), |d| d.to_string())
}

/// Trace Dijkstra's algorithm from `source`.
///
/// Distances start at infinity except the source (0). Each popped node gets a
/// settle frame naming the neighbors whose distance improved. With a `goal`
/// the run stops once the goal is settled and a path frame follows; without
/// one every reachable node is settled and a distance table closes the trace.
pub fn dijkstra(graph: &Graph, source: &str, goal: Option<&str>) -> Result<Trace<GraphState>> {
    let (source, goal) = resolve(graph, source, goal)?;
    let adjacency = graph.adjacency();

    let mut distances: BTreeMap<String, Option<u64>> =
        graph.nodes.iter().map(|n| (n.clone(), None)).collect();
    distances.insert(source.to_string(), Some(0));

    let mut state = GraphState::default();
    let mut builder = TraceBuilder::new("dijkstra");
    let mut frontier = Frontier::default();
    let mut settled = HashSet::new();
    let mut parents = Parents::new();

    frontier.offer(source, 0);
    state.frontier = frontier.names();
    state.distances = Some(distances.clone());
    builder.snapshot(
        format!("Start at {}", source),
        format!("dist({}) = 0, every other node is ∞", source),
        &state,
    );

    let mut reached = false;
    while let Some(Pending { node, distance }) = frontier.pop() {
        settled.insert(node);
        state.mark_visited(node);
        state.current = Some(node.to_string());

        if goal == Some(node) {
            state.frontier = frontier.names();
            builder.snapshot(
                format!("Settle {}", node),
                format!("Goal {} settled at distance {}", node, distance),
                &state,
            );
            reached = true;
            break;
        }

        let mut relaxed = Vec::new();
        for nb in adjacency.get(node).map(Vec::as_slice).unwrap_or(&[]) {
            if settled.contains(nb.node) {
                continue;
            }
            let candidate = distance + nb.weight;
            let current = distances.get(nb.node).copied().flatten();
            if current.map_or(true, |d| candidate < d) {
                distances.insert(nb.node.to_string(), Some(candidate));
                parents.insert(nb.node, (node, nb.edge));
                frontier.offer(nb.node, candidate);
                relaxed.push(format!(
                    "{} ({} → {})",
                    nb.node,
                    format_distance(current),
                    candidate
                ));
            }
        }

        state.highlighted_edges = parents.values().map(|&(_, edge)| edge).collect();
        state.frontier = frontier.names();
        state.distances = Some(distances.clone());
        let description = if relaxed.is_empty() {
            format!("dist({}) = {}; no neighbor improved", node, distance)
        } else {
            format!("dist({}) = {}; relaxed {}", node, distance, relaxed.join(", "))
        };
        builder.snapshot(format!("Settle {}", node), description, &state);
    }

    match goal {
        Some(goal) if reached => {
            let (path, edges) = reconstruct(&parents, source, goal);
            state.highlighted_edges = edges.into_iter().collect();
            state.total_weight = distances.get(goal).copied().flatten();
            let description = format!(
                "{} (cost {})",
                path.join(" → "),
                format_distance(state.total_weight)
            );
            state.path = Some(path);
            builder.snapshot("Path reconstructed", description, &state);
        }
        Some(goal) => {
            state.current = None;
            builder.snapshot(
                "Goal unreachable",
                format!("{} stays at distance ∞", goal),
                &state,
            );
        }
        None => {
            state.current = None;
            let table = distances
                .iter()
                .map(|(n, d)| format!("{}={}", n, format_distance(*d)))
                .collect::<Vec<_>>()
                .join(", ");
            builder.snapshot("All reachable nodes settled", table, &state);
        }
    }

    builder.finish()
}
