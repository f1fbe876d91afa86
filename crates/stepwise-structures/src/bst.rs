//! Unbalanced binary search tree insertion.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use stepwise_trace::{Result, Trace, TraceBuilder, TraceError};

/// Most keys accepted in one run.
pub const MAX_KEYS: usize = 1024;

/// A node as drawn: `depth` is the row and `rank` (in-order position) the
/// column, so the layout never overlaps however unbalanced the tree is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNodeView {
    pub key: i64,
    pub depth: usize,
    pub rank: usize,
    pub left: Option<i64>,
    pub right: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeState {
    /// Level order, left to right.
    pub nodes: Vec<TreeNodeView>,
    /// Keys compared on the way to the latest insertion, ending with it.
    pub path: Vec<i64>,
    /// Sorted keys; filled on the closing frame only.
    pub inorder: Vec<i64>,
}

#[derive(Debug, Clone)]
struct Node {
    key: i64,
    left: Option<usize>,
    right: Option<usize>,
}

/// Arena-backed tree. Index 0 is the root once anything is inserted.
#[derive(Debug, Clone, Default)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Insert `key` and return the keys compared along the way.
    fn insert(&mut self, key: i64) -> Vec<i64> {
        let fresh = self.nodes.len();
        let mut path = Vec::new();
        if fresh > 0 {
            let mut at = 0;
            loop {
                let node = &mut self.nodes[at];
                path.push(node.key);
                let slot = if key < node.key {
                    &mut node.left
                } else {
                    &mut node.right
                };
                match *slot {
                    Some(next) => at = next,
                    None => {
                        *slot = Some(fresh);
                        break;
                    }
                }
            }
        }
        self.nodes.push(Node {
            key,
            left: None,
            right: None,
        });
        path.push(key);
        path
    }

    /// Node indices in order, iteratively so skewed trees cannot overflow.
    fn inorder_indices(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut cursor = if self.nodes.is_empty() { None } else { Some(0) };
        while cursor.is_some() || !stack.is_empty() {
            while let Some(i) = cursor {
                stack.push(i);
                cursor = self.nodes[i].left;
            }
            if let Some(i) = stack.pop() {
                out.push(i);
                cursor = self.nodes[i].right;
            }
        }
        out
    }

    fn inorder(&self) -> Vec<i64> {
        self.inorder_indices()
            .into_iter()
            .map(|i| self.nodes[i].key)
            .collect()
    }

    fn level_order(&self) -> Vec<TreeNodeView> {
        if self.nodes.is_empty() {
            return Vec::new();
        }
        let mut rank = vec![0; self.nodes.len()];
        for (r, i) in self.inorder_indices().into_iter().enumerate() {
            rank[i] = r;
        }
        let key_of = |i: Option<usize>| i.map(|i| self.nodes[i].key);

        let mut views = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::from([(0usize, 0usize)]);
        while let Some((i, depth)) = queue.pop_front() {
            let node = &self.nodes[i];
            views.push(TreeNodeView {
                key: node.key,
                depth,
                rank: rank[i],
                left: key_of(node.left),
                right: key_of(node.right),
            });
            queue.extend(node.left.map(|c| (c, depth + 1)));
            queue.extend(node.right.map(|c| (c, depth + 1)));
        }
        views
    }
}

fn join(keys: &[i64], sep: &str) -> String {
    keys.iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Insert `keys` in order into an empty tree.
///
/// Smaller keys go left, everything else (duplicates included) goes right.
/// One frame per insertion follows an initial empty frame; the closing frame
/// lists the in-order traversal.
pub fn bst_insert(keys: &[i64]) -> Result<Trace<TreeState>> {
    if keys.len() > MAX_KEYS {
        return Err(TraceError::InvalidInput(format!(
            "{} keys exceed the limit of {}",
            keys.len(),
            MAX_KEYS
        )));
    }

    let mut tree = Tree::default();
    let mut state = TreeState {
        nodes: Vec::new(),
        path: Vec::new(),
        inorder: Vec::new(),
    };
    let mut builder = TraceBuilder::new("bst");
    builder.snapshot("Empty tree", format!("Inserting {} keys", keys.len()), &state);

    for &key in keys {
        let path = tree.insert(key);
        let description = match path.len() {
            1 => format!("{} becomes the root", key),
            n => {
                let parent = path[n - 2];
                let side = if key < parent { "left" } else { "right" };
                format!("{}: {} child of {}", join(&path, " → "), side, parent)
            }
        };
        state.nodes = tree.level_order();
        state.path = path;
        builder.snapshot(format!("Insert {}", key), description, &state);
    }

    state.path.clear();
    state.inorder = tree.inorder();
    builder.snapshot(
        "In-order traversal",
        format!("[{}]", join(&state.inorder, ", ")),
        &state,
    );
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_paths_and_layout() {
        let trace = bst_insert(&[50, 30, 70, 40]).unwrap();
        assert_eq!(trace.len(), 6);

        let fourth = trace.get(4).unwrap();
        assert_eq!(fourth.payload.path, vec![50, 30, 40]);
        assert_eq!(fourth.description, "50 → 30 → 40: right child of 30");

        let keys: Vec<_> = fourth.payload.nodes.iter().map(|n| n.key).collect();
        assert_eq!(keys, vec![50, 30, 70, 40]);
        let ranks: Vec<_> = fourth.payload.nodes.iter().map(|n| n.rank).collect();
        assert_eq!(ranks, vec![2, 0, 3, 1]);
        assert_eq!(fourth.payload.nodes[1].right, Some(40));
        assert_eq!(fourth.payload.nodes[3].depth, 2);
    }

    #[test]
    fn equal_keys_go_right() {
        let trace = bst_insert(&[5, 5]).unwrap();
        let root = &trace.last().payload.nodes[0];
        assert_eq!(root.left, None);
        assert_eq!(root.right, Some(5));
        assert_eq!(trace.last().payload.inorder, vec![5, 5]);
    }

    #[test]
    fn final_frame_is_sorted() {
        let trace = bst_insert(&[8, 3, 10, 1, 6, 14, 4, 7, 13]).unwrap();
        assert_eq!(trace.last().payload.inorder, vec![1, 3, 4, 6, 7, 8, 10, 13, 14]);
        assert_eq!(trace.last().description, "[1, 3, 4, 6, 7, 8, 10, 13, 14]");
        assert!(trace.last().payload.path.is_empty());
    }

    #[test]
    fn empty_input_is_minimal() {
        let trace = bst_insert(&[]).unwrap();
        assert_eq!(trace.len(), 2);
        assert!(trace.last().payload.nodes.is_empty());
    }

    #[test]
    fn skewed_tree_is_laid_out() {
        let keys: Vec<i64> = (0..MAX_KEYS as i64).collect();
        let trace = bst_insert(&keys).unwrap();
        let last = trace.last().payload.nodes.last().cloned().unwrap();
        assert_eq!(last.depth, MAX_KEYS - 1);
        assert_eq!(last.rank, MAX_KEYS - 1);
    }
}
