//! Sum segment tree: build, then one range query.

use serde::{Deserialize, Serialize};
use stepwise_trace::{Result, Trace, TraceBuilder, TraceError};

/// Longest array accepted.
pub const MAX_SEGMENT_LEN: usize = 1024;

/// Largest absolute element value accepted.
pub const MAX_SEGMENT_VALUE: i64 = 1_000_000_000;

/// One tree node. `index` is heap-style: root 1, children `2i` and `2i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentNode {
    pub index: usize,
    pub lo: usize,
    pub hi: usize,
    pub value: i64,
}

/// How a visited node's interval relates to the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlap {
    Contained,
    Disjoint,
    Partial,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentTreeState {
    /// Nodes built so far, ordered by index.
    pub nodes: Vec<SegmentNode>,
    /// Node the frame is about.
    pub highlighted: Option<usize>,
    /// Inclusive query range once the query has started.
    pub query: Option<(usize, usize)>,
    pub overlap: Option<Overlap>,
    /// Sum of contained nodes visited so far.
    pub accumulated: i64,
    pub result: Option<i64>,
}

impl SegmentTreeState {
    /// The root node, once built.
    pub fn root(&self) -> Option<&SegmentNode> {
        self.nodes.first().filter(|n| n.index == 1)
    }

    fn insert(&mut self, node: SegmentNode) {
        let at = self.nodes.partition_point(|n| n.index < node.index);
        self.nodes.insert(at, node);
    }

    fn value_of(&self, index: usize) -> i64 {
        self.nodes
            .binary_search_by_key(&index, |n| n.index)
            .map_or(0, |at| self.nodes[at].value)
    }
}

struct Recorder<'a> {
    array: &'a [i64],
    state: SegmentTreeState,
    builder: TraceBuilder<SegmentTreeState>,
}

impl Recorder<'_> {
    fn build(&mut self, index: usize, lo: usize, hi: usize) -> i64 {
        if lo == hi {
            let value = self.array[lo];
            self.state.insert(SegmentNode { index, lo, hi, value });
            self.state.highlighted = Some(index);
            self.builder.snapshot(
                format!("Leaf [{}]", lo),
                format!("Node {} holds array[{}] = {}", index, lo, value),
                &self.state,
            );
            return value;
        }
        let mid = lo + (hi - lo) / 2;
        let left = self.build(2 * index, lo, mid);
        let right = self.build(2 * index + 1, mid + 1, hi);
        let value = left + right;
        self.state.insert(SegmentNode { index, lo, hi, value });
        self.state.highlighted = Some(index);
        self.builder.snapshot(
            format!("Merge [{}, {}]", lo, hi),
            format!("Node {} = {} + {} = {}", index, left, right, value),
            &self.state,
        );
        value
    }

    fn query(&mut self, index: usize, lo: usize, hi: usize, l: usize, r: usize) -> i64 {
        self.state.highlighted = Some(index);
        if r < lo || hi < l {
            self.state.overlap = Some(Overlap::Disjoint);
            self.builder.snapshot(
                format!("Skip [{}, {}]", lo, hi),
                format!("No overlap with [{}, {}], contributes 0", l, r),
                &self.state,
            );
            return 0;
        }
        if l <= lo && hi <= r {
            let value = self.state.value_of(index);
            self.state.overlap = Some(Overlap::Contained);
            self.state.accumulated += value;
            self.builder.snapshot(
                format!("Take [{}, {}]", lo, hi),
                format!(
                    "Fully inside [{}, {}], add {} (running sum {})",
                    l, r, value, self.state.accumulated
                ),
                &self.state,
            );
            return value;
        }
        self.state.overlap = Some(Overlap::Partial);
        self.builder.snapshot(
            format!("Split [{}, {}]", lo, hi),
            format!("Partially overlaps [{}, {}], visit both children", l, r),
            &self.state,
        );
        let mid = lo + (hi - lo) / 2;
        self.query(2 * index, lo, mid, l, r) + self.query(2 * index + 1, mid + 1, hi, l, r)
    }
}

fn validate(array: &[i64], l: usize, r: usize) -> Result<()> {
    if array.is_empty() {
        return Err(TraceError::invalid("segment tree needs a non-empty array"));
    }
    if array.len() > MAX_SEGMENT_LEN {
        return Err(TraceError::InvalidInput(format!(
            "array of {} elements exceeds the limit of {}",
            array.len(),
            MAX_SEGMENT_LEN
        )));
    }
    if let Some((i, v)) = array
        .iter()
        .enumerate()
        .find(|(_, v)| v.unsigned_abs() > MAX_SEGMENT_VALUE as u64)
    {
        return Err(TraceError::InvalidInput(format!(
            "array[{}] = {} is outside ±{}",
            i, v, MAX_SEGMENT_VALUE
        )));
    }
    if l > r || r >= array.len() {
        return Err(TraceError::InvalidInput(format!(
            "query [{}, {}] is not a valid range of 0..{}",
            l,
            r,
            array.len()
        )));
    }
    Ok(())
}

/// Build a sum segment tree over `array` and query the inclusive range
/// `[l, r]`.
///
/// Build frames come first, one per leaf and per merge in post-order. The
/// query then records one frame per visited node, classified as contained,
/// disjoint or partial, and closes with the answer.
pub fn segment_tree(array: &[i64], l: usize, r: usize) -> Result<Trace<SegmentTreeState>> {
    validate(array, l, r)?;

    let mut rec = Recorder {
        array,
        state: SegmentTreeState {
            nodes: Vec::with_capacity(2 * array.len()),
            highlighted: None,
            query: None,
            overlap: None,
            accumulated: 0,
            result: None,
        },
        builder: TraceBuilder::new("segment_tree"),
    };
    rec.builder.snapshot(
        "Start",
        format!("Build over {} elements, then sum [{}, {}]", array.len(), l, r),
        &rec.state,
    );

    let total = rec.build(1, 0, array.len() - 1);
    tracing::trace!(total, nodes = rec.state.nodes.len(), "segment tree built");

    rec.state.query = Some((l, r));
    let answer = rec.query(1, 0, array.len() - 1, l, r);

    rec.state.highlighted = None;
    rec.state.overlap = None;
    rec.state.result = Some(answer);
    rec.builder.snapshot(
        "Result",
        format!("sum[{}..={}] = {}", l, r, answer),
        &rec.state,
    );
    rec.builder.finish()
}
