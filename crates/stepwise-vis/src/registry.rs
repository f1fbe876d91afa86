//! One entry point for every tracer.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use stepwise_disk::{DiskAlgorithm, DiskRun};
use stepwise_graph::{GraphAlgorithm, GraphState};
use stepwise_protocol::EncapsulationState;
use stepwise_recursion::CallStackState;
use stepwise_sorting::{SortAlgorithm, SortState};
use stepwise_structures::{QueueState, SegmentTreeState, StackState, TreeState};
use stepwise_trace::{Result, Trace, TraceError};

use crate::algorithm::AlgorithmId;
use crate::demo::demo_params;
use crate::params::{
    BstParams, CountParams, DiskParams, EncapsulationParams, GraphParams, QueueParams,
    SearchParams, SegmentTreeParams, SortParams, StackParams,
};

/// A finished trace of any family, keeping its typed payload.
#[derive(Debug, Clone)]
pub enum AnyTrace {
    Sorting(Trace<SortState>),
    Graph(Trace<GraphState>),
    Disk(DiskRun),
    Recursion(Trace<CallStackState>),
    Queue(Trace<QueueState>),
    Stack(Trace<StackState>),
    Tree(Trace<TreeState>),
    SegmentTree(Trace<SegmentTreeState>),
    Protocol(Trace<EncapsulationState>),
}

fn erase<P: Serialize>(trace: Trace<P>) -> serde_json::Result<Trace<Value>> {
    trace.try_map(|payload| serde_json::to_value(payload))
}

impl AnyTrace {
    /// Number of frames.
    pub fn len(&self) -> usize {
        match self {
            AnyTrace::Sorting(t) => t.len(),
            AnyTrace::Graph(t) => t.len(),
            AnyTrace::Disk(run) => run.trace.len(),
            AnyTrace::Recursion(t) => t.len(),
            AnyTrace::Queue(t) => t.len(),
            AnyTrace::Stack(t) => t.len(),
            AnyTrace::Tree(t) => t.len(),
            AnyTrace::SegmentTree(t) => t.len(),
            AnyTrace::Protocol(t) => t.len(),
        }
    }

    /// Always false: traces hold at least one frame.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name recorded by the tracer.
    pub fn algorithm(&self) -> &str {
        match self {
            AnyTrace::Sorting(t) => t.algorithm(),
            AnyTrace::Graph(t) => t.algorithm(),
            AnyTrace::Disk(run) => run.trace.algorithm(),
            AnyTrace::Recursion(t) => t.algorithm(),
            AnyTrace::Queue(t) => t.algorithm(),
            AnyTrace::Stack(t) => t.algorithm(),
            AnyTrace::Tree(t) => t.algorithm(),
            AnyTrace::SegmentTree(t) => t.algorithm(),
            AnyTrace::Protocol(t) => t.algorithm(),
        }
    }

    /// Convert payloads to JSON so the trace can be played back opaquely.
    pub fn into_json(self) -> serde_json::Result<Trace<Value>> {
        match self {
            AnyTrace::Sorting(t) => erase(t),
            AnyTrace::Graph(t) => erase(t),
            AnyTrace::Disk(run) => erase(run.trace),
            AnyTrace::Recursion(t) => erase(t),
            AnyTrace::Queue(t) => erase(t),
            AnyTrace::Stack(t) => erase(t),
            AnyTrace::Tree(t) => erase(t),
            AnyTrace::SegmentTree(t) => erase(t),
            AnyTrace::Protocol(t) => erase(t),
        }
    }
}

fn parse<T: DeserializeOwned>(id: AlgorithmId, params: &Value) -> Result<T> {
    let value = if params.is_null() {
        demo_params(id)
    } else {
        params.clone()
    };
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!(algorithm = %id, error = %e, "rejected parameters");
        TraceError::InvalidInput(format!("{} parameters: {}", id, e))
    })
}

fn graph(id: AlgorithmId, algorithm: GraphAlgorithm, params: &Value) -> Result<AnyTrace> {
    let p: GraphParams = parse(id, params)?;
    algorithm
        .trace(&p.graph, p.start.as_deref(), p.goal.as_deref())
        .map(AnyTrace::Graph)
}

fn sort(id: AlgorithmId, algorithm: SortAlgorithm, params: &Value) -> Result<AnyTrace> {
    let p: SortParams = parse(id, params)?;
    algorithm.trace(&p.array.values()?).map(AnyTrace::Sorting)
}

fn disk(id: AlgorithmId, algorithm: DiskAlgorithm, params: &Value) -> Result<AnyTrace> {
    let p: DiskParams = parse(id, params)?;
    algorithm.run(&p).map(AnyTrace::Disk)
}

/// Build the trace for `id` from JSON parameters.
///
/// `Value::Null` selects the demo preset. Malformed parameters fail with
/// [`TraceError::InvalidInput`] before any frame is recorded.
pub fn build_trace(id: AlgorithmId, params: &Value) -> Result<AnyTrace> {
    let trace = match id {
        AlgorithmId::BubbleSort => sort(id, SortAlgorithm::Bubble, params)?,
        AlgorithmId::InsertionSort => sort(id, SortAlgorithm::Insertion, params)?,
        AlgorithmId::QuickSort => sort(id, SortAlgorithm::Quick, params)?,
        AlgorithmId::Bfs => graph(id, GraphAlgorithm::Bfs, params)?,
        AlgorithmId::Dfs => graph(id, GraphAlgorithm::Dfs, params)?,
        AlgorithmId::Dijkstra => graph(id, GraphAlgorithm::Dijkstra, params)?,
        AlgorithmId::Kruskal => graph(id, GraphAlgorithm::Kruskal, params)?,
        AlgorithmId::Fcfs => disk(id, DiskAlgorithm::Fcfs, params)?,
        AlgorithmId::Sstf => disk(id, DiskAlgorithm::Sstf, params)?,
        AlgorithmId::Scan => disk(id, DiskAlgorithm::Scan, params)?,
        AlgorithmId::Look => disk(id, DiskAlgorithm::Look, params)?,
        AlgorithmId::CScan => disk(id, DiskAlgorithm::CScan, params)?,
        AlgorithmId::CLook => disk(id, DiskAlgorithm::CLook, params)?,
        AlgorithmId::Factorial => {
            let p: CountParams = parse(id, params)?;
            AnyTrace::Recursion(stepwise_recursion::factorial(p.n)?)
        }
        AlgorithmId::Fibonacci => {
            let p: CountParams = parse(id, params)?;
            AnyTrace::Recursion(stepwise_recursion::fibonacci(p.n)?)
        }
        AlgorithmId::BinarySearch => {
            let p: SearchParams = parse(id, params)?;
            AnyTrace::Recursion(stepwise_recursion::binary_search(&p.array, p.target)?)
        }
        AlgorithmId::Queue => {
            let p: QueueParams = parse(id, params)?;
            AnyTrace::Queue(stepwise_structures::queue_ops(&p.ops, p.capacity)?)
        }
        AlgorithmId::Stack => {
            let p: StackParams = parse(id, params)?;
            AnyTrace::Stack(stepwise_structures::stack_ops(&p.ops, p.capacity)?)
        }
        AlgorithmId::Bst => {
            let p: BstParams = parse(id, params)?;
            AnyTrace::Tree(stepwise_structures::bst_insert(&p.keys)?)
        }
        AlgorithmId::SegmentTree => {
            let p: SegmentTreeParams = parse(id, params)?;
            AnyTrace::SegmentTree(stepwise_structures::segment_tree(&p.array, p.left, p.right)?)
        }
        AlgorithmId::Encapsulation => {
            let p: EncapsulationParams = parse(id, params)?;
            AnyTrace::Protocol(stepwise_protocol::encapsulate(&p.scenario, &p.message)?)
        }
    };
    tracing::debug!(algorithm = %id, frames = trace.len(), "trace built");
    Ok(trace)
}
