//! Kruskal's minimum spanning tree.

use std::collections::BTreeSet;

use stepwise_trace::{Result, Trace, TraceBuilder};

use crate::graph::{EdgeId, Graph};
use crate::state::GraphState;

/// Disjoint sets with path compression and union by rank.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    /// `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Representative of `x`'s set, compressing the path on the way.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merge the sets of `a` and `b`. Returns false if already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

/// Group node ids by set, in first-appearance order of `graph.nodes`.
fn components(graph: &Graph, sets: &mut UnionFind) -> Vec<Vec<String>> {
    let mut groups: Vec<(usize, Vec<String>)> = Vec::new();
    for (i, node) in graph.nodes.iter().enumerate() {
        let root = sets.find(i);
        match groups.iter_mut().find(|(r, _)| *r == root) {
            Some((_, members)) => members.push(node.clone()),
            None => groups.push((root, vec![node.clone()])),
        }
    }
    groups.into_iter().map(|(_, members)| members).collect()
}

/// Trace Kruskal's algorithm.
///
/// Edges are examined in ascending weight order (equal weights keep their
/// input order). Each examined edge yields one frame, accepted or rejected as
/// a cycle. Examination stops once `nodes - 1` edges are selected; the final
/// frame lists the selected edges and their total weight. A disconnected graph
/// ends with a spanning forest.
pub fn kruskal(graph: &Graph) -> Result<Trace<GraphState>> {
    graph.validate()?;

    let n = graph.nodes.len();
    let mut order: Vec<EdgeId> = (0..graph.edges.len()).collect();
    order.sort_by_key(|&e| graph.edges[e].weight);

    let mut sets = UnionFind::new(n);
    let mut selected = BTreeSet::new();
    let mut total = 0u64;

    let mut state = GraphState {
        components: components(graph, &mut sets),
        total_weight: Some(0),
        ..GraphState::default()
    };
    let mut builder = TraceBuilder::new("kruskal");
    builder.snapshot(
        "Sort edges",
        format!(
            "Examine by weight: {}",
            order
                .iter()
                .map(|&e| format!("{}({})", graph.edges[e].label(), graph.edges[e].weight))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        &state,
    );

    for &id in &order {
        if selected.len() + 1 >= n {
            break;
        }
        let edge = &graph.edges[id];
        // Endpoints were checked by validate().
        let (a, b) = match (graph.index_of(&edge.from), graph.index_of(&edge.to)) {
            (Some(a), Some(b)) => (a, b),
            _ => continue,
        };

        state.current_edge = Some(id);
        if sets.union(a, b) {
            selected.insert(id);
            total += edge.weight;
            state.mark_visited(&edge.from);
            state.mark_visited(&edge.to);
            state.highlighted_edges = selected.clone();
            state.components = components(graph, &mut sets);
            state.total_weight = Some(total);
            builder.snapshot(
                format!("Accept {}", edge.label()),
                format!(
                    "{} and {} were in different components; total weight {}",
                    edge.from, edge.to, total
                ),
                &state,
            );
        } else {
            builder.snapshot(
                format!("Reject {}", edge.label()),
                format!("{} and {} are already connected; adding it would form a cycle", edge.from, edge.to),
                &state,
            );
        }
    }

    state.current_edge = None;
    let title = if selected.len() + 1 == n {
        "Minimum spanning tree"
    } else {
        "Minimum spanning forest"
    };
    let edges = selected
        .iter()
        .map(|&e| graph.edges[e].label())
        .collect::<Vec<_>>()
        .join(", ");
    builder.snapshot(
        title,
        format!("{} edges [{}], total weight {}", selected.len(), edges, total),
        &state,
    );
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{demo_graph, ring_graph, Edge, MAX_EDGES};

    #[test]
    fn union_find_merges_and_detects_cycles() {
        let mut sets = UnionFind::new(4);
        assert!(sets.union(0, 1));
        assert!(sets.union(2, 3));
        assert!(sets.union(1, 3));
        assert!(!sets.union(0, 2));
        let root = sets.find(0);
        assert!((0..4).all(|i| sets.find(i) == root));
    }

    #[test]
    fn demo_tree_weight_and_frames() {
        let trace = kruskal(&demo_graph()).unwrap();
        let last = &trace.last().payload;
        assert_eq!(last.total_weight, Some(13));
        assert_eq!(last.highlighted_edges.len(), 5);
        assert_eq!(trace.last().title, "Minimum spanning tree");
        // sort + B-C, A-C, D-E, E-F, A-B (rejected), B-D + final
        assert_eq!(trace.len(), 8);
        assert!(trace.iter().any(|f| f.title == "Reject A-B"));
    }

    #[test]
    fn equal_weights_keep_input_order() {
        let trace = kruskal(&ring_graph(&["A", "B", "C"])).unwrap();
        let accepted: Vec<_> = trace
            .iter()
            .filter(|f| f.title.starts_with("Accept"))
            .map(|f| f.title.clone())
            .collect();
        assert_eq!(accepted, vec!["Accept A-B", "Accept B-C"]);
        // C-A is never examined: two edges already span three nodes.
        assert!(trace.iter().all(|f| f.title != "Reject C-A"));
    }

    #[test]
    fn disconnected_graph_yields_forest() {
        let graph = Graph::new(
            ["A", "B", "C", "D"],
            vec![Edge::new("A", "B", 2), Edge::new("C", "D", 1)],
        );
        let trace = kruskal(&graph).unwrap();
        assert_eq!(trace.last().title, "Minimum spanning forest");
        assert_eq!(trace.last().payload.components.len(), 2);
        assert_eq!(trace.last().payload.total_weight, Some(3));
    }

    #[test]
    fn single_node_has_empty_tree() {
        let trace = kruskal(&Graph::new(["A"], vec![])).unwrap();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.last().payload.total_weight, Some(0));
        assert_eq!(trace.last().title, "Minimum spanning tree");
    }

    #[test]
    fn rejected_parallel_edges_stay_within_the_edge_cap() {
        // Every cheap parallel edge after the first is a rejected cycle.
        let mut edges: Vec<Edge> = (0..MAX_EDGES - 1).map(|_| Edge::new("A", "B", 1)).collect();
        edges.push(Edge::new("B", "C", 2));
        let trace = kruskal(&Graph::new(["A", "B", "C"], edges)).unwrap();

        assert_eq!(trace.len(), MAX_EDGES + 2);
        assert_eq!(trace.last().payload.total_weight, Some(3));
        assert!(trace.iter().all(|f| f.payload.components.len() <= 3));

        let mut edges: Vec<Edge> = (0..MAX_EDGES).map(|_| Edge::new("A", "B", 1)).collect();
        edges.push(Edge::new("B", "C", 2));
        assert!(kruskal(&Graph::new(["A", "B", "C"], edges)).unwrap_err().is_input_error());
    }

    #[test]
    fn components_shrink_as_edges_are_accepted() {
        let trace = kruskal(&demo_graph()).unwrap();
        let counts: Vec<_> = trace.iter().map(|f| f.payload.components.len()).collect();
        assert_eq!(counts.first(), Some(&6));
        assert_eq!(counts.last(), Some(&1));
        assert!(counts.windows(2).all(|w| w[1] <= w[0]));
    }
}
