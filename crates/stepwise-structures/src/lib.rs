//! Stepwise Data Structures
//!
//! Operation-log tracers for the elementary structures:
//!
//! - [`queue_ops`] and [`stack_ops`] replay straight-line operation logs.
//! - [`bst_insert`] grows an unbalanced binary search tree.
//! - [`segment_tree`] builds a sum segment tree and answers one range query.

mod bst;
mod linear;
mod segment;

use serde::{Deserialize, Serialize};

pub use bst::{bst_insert, TreeNodeView, TreeState, MAX_KEYS};
pub use linear::{queue_ops, stack_ops, QueueOp, QueueState, StackOp, StackState, MAX_OPS};
pub use segment::{
    segment_tree, Overlap, SegmentNode, SegmentTreeState, MAX_SEGMENT_LEN, MAX_SEGMENT_VALUE,
};

/// The structures available for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    Queue,
    Stack,
    Bst,
    SegmentTree,
}

impl StructureKind {
    pub const ALL: [StructureKind; 4] = [
        StructureKind::Queue,
        StructureKind::Stack,
        StructureKind::Bst,
        StructureKind::SegmentTree,
    ];
}
