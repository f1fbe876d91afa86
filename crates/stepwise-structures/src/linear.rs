//! Queue and stack operation logs.
//!
//! Both structures are replayed one operation per frame after an initial
//! empty frame. Overflow and underflow do not fail the run: the offending
//! operation is recorded with a note and leaves the structure unchanged.

use serde::{Deserialize, Serialize};
use stepwise_trace::{Result, Trace, TraceBuilder, TraceError};

/// Longest operation log accepted.
pub const MAX_OPS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum QueueOp {
    Enqueue(i64),
    Dequeue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum StackOp {
    Push(i64),
    Pop,
}

/// Array-backed queue.
///
/// `items` is the backing buffer. Dequeued slots are never reclaimed, so
/// `front` and `rear` only advance and the live elements are
/// `items[front..rear]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueState {
    pub items: Vec<i64>,
    pub front: usize,
    pub rear: usize,
    /// Maximum number of live elements, unbounded when `None`.
    pub capacity: Option<usize>,
    /// Set when the operation was rejected.
    pub note: Option<String>,
}

impl QueueState {
    fn new(capacity: Option<usize>) -> Self {
        Self {
            items: Vec::new(),
            front: 0,
            rear: 0,
            capacity,
            note: None,
        }
    }

    /// Elements currently in the queue, front first.
    pub fn live(&self) -> &[i64] {
        &self.items[self.front..self.rear]
    }

    pub fn len(&self) -> usize {
        self.rear - self.front
    }

    pub fn is_empty(&self) -> bool {
        self.front == self.rear
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackState {
    /// Bottom first.
    pub items: Vec<i64>,
    pub capacity: Option<usize>,
    pub note: Option<String>,
}

fn check_log(len: usize, capacity: Option<usize>) -> Result<()> {
    if len > MAX_OPS {
        return Err(TraceError::InvalidInput(format!(
            "{} operations exceed the limit of {}",
            len, MAX_OPS
        )));
    }
    if capacity == Some(0) {
        return Err(TraceError::invalid("capacity must be at least 1"));
    }
    Ok(())
}

fn describe_capacity(capacity: Option<usize>) -> String {
    capacity.map_or_else(|| "unbounded".to_string(), |c| format!("capacity {}", c))
}

/// Replay queue operations.
pub fn queue_ops(ops: &[QueueOp], capacity: Option<usize>) -> Result<Trace<QueueState>> {
    check_log(ops.len(), capacity)?;

    let mut state = QueueState::new(capacity);
    let mut builder = TraceBuilder::new("queue");
    builder.snapshot(
        "Empty queue",
        format!("front = rear = 0, {}", describe_capacity(capacity)),
        &state,
    );

    for op in ops {
        state.note = None;
        match *op {
            QueueOp::Enqueue(value) => {
                if capacity.is_some_and(|c| state.len() >= c) {
                    tracing::warn!(value, "queue overflow");
                    state.note = Some(format!("Overflow: queue is full, {} rejected", value));
                    builder.snapshot(format!("Enqueue {}", value), "Queue is full", &state);
                    continue;
                }
                state.items.push(value);
                state.rear += 1;
                builder.snapshot(
                    format!("Enqueue {}", value),
                    format!("Stored at index {}, rear advances to {}", state.rear - 1, state.rear),
                    &state,
                );
            }
            QueueOp::Dequeue => {
                if state.is_empty() {
                    tracing::warn!("queue underflow");
                    state.note = Some("Underflow: queue is empty".to_string());
                    builder.snapshot("Dequeue", "Queue is empty", &state);
                    continue;
                }
                let value = state.items[state.front];
                state.front += 1;
                builder.snapshot(
                    format!("Dequeue {}", value),
                    format!("Removed from index {}, front advances to {}", state.front - 1, state.front),
                    &state,
                );
            }
        }
    }
    builder.finish()
}

/// Replay stack operations.
pub fn stack_ops(ops: &[StackOp], capacity: Option<usize>) -> Result<Trace<StackState>> {
    check_log(ops.len(), capacity)?;

    let mut state = StackState {
        items: Vec::new(),
        capacity,
        note: None,
    };
    let mut builder = TraceBuilder::new("stack");
    builder.snapshot("Empty stack", describe_capacity(capacity), &state);

    for op in ops {
        state.note = None;
        match *op {
            StackOp::Push(value) => {
                if capacity.is_some_and(|c| state.items.len() >= c) {
                    tracing::warn!(value, "stack overflow");
                    state.note = Some(format!("Overflow: stack is full, {} rejected", value));
                    builder.snapshot(format!("Push {}", value), "Stack is full", &state);
                    continue;
                }
                state.items.push(value);
                builder.snapshot(
                    format!("Push {}", value),
                    format!("{} is the new top, size {}", value, state.items.len()),
                    &state,
                );
            }
            StackOp::Pop => match state.items.pop() {
                Some(value) => {
                    let top = state
                        .items
                        .last()
                        .map_or_else(|| "stack is now empty".to_string(), |t| format!("top is {}", t));
                    builder.snapshot(format!("Pop {}", value), top, &state);
                }
                None => {
                    tracing::warn!("stack underflow");
                    state.note = Some("Underflow: stack is empty".to_string());
                    builder.snapshot("Pop", "Stack is empty", &state);
                }
            },
        }
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_pointers_only_advance() {
        use QueueOp::*;
        let trace = queue_ops(&[Enqueue(1), Enqueue(2), Dequeue, Enqueue(3)], None).unwrap();
        assert_eq!(trace.len(), 5);
        let last = &trace.last().payload;
        assert_eq!(last.items, vec![1, 2, 3]);
        assert_eq!((last.front, last.rear), (1, 3));
        assert_eq!(last.live(), &[2, 3]);
        assert_eq!(trace.get(3).unwrap().title, "Dequeue 1");
    }

    #[test]
    fn queue_overflow_is_noted() {
        use QueueOp::*;
        let trace = queue_ops(&[Enqueue(1), Enqueue(2), Enqueue(3)], Some(2)).unwrap();
        let last = &trace.last().payload;
        assert_eq!(last.live(), &[1, 2]);
        assert_eq!(
            last.note.as_deref(),
            Some("Overflow: queue is full, 3 rejected")
        );
        // Notes do not leak into later frames.
        assert!(trace.get(2).unwrap().payload.note.is_none());
    }

    #[test]
    fn queue_capacity_counts_live_elements() {
        use QueueOp::*;
        let trace = queue_ops(&[Enqueue(1), Dequeue, Enqueue(2)], Some(1)).unwrap();
        assert!(trace.last().payload.note.is_none());
        assert_eq!(trace.last().payload.live(), &[2]);
    }

    #[test]
    fn queue_underflow_is_noted() {
        let trace = queue_ops(&[QueueOp::Dequeue], None).unwrap();
        assert_eq!(trace.len(), 2);
        let last = &trace.last().payload;
        assert_eq!(last.note.as_deref(), Some("Underflow: queue is empty"));
        assert_eq!((last.front, last.rear), (0, 0));
    }

    #[test]
    fn stack_push_pop() {
        use StackOp::*;
        let trace = stack_ops(&[Push(1), Push(2), Pop, Pop, Pop], Some(4)).unwrap();
        assert_eq!(trace.len(), 6);
        assert_eq!(trace.get(2).unwrap().payload.items, vec![1, 2]);
        assert_eq!(trace.get(3).unwrap().title, "Pop 2");
        assert_eq!(trace.get(4).unwrap().description, "stack is now empty");
        assert_eq!(trace.last().payload.note.as_deref(), Some("Underflow: stack is empty"));
    }

    #[test]
    fn stack_overflow_is_noted() {
        use StackOp::*;
        let trace = stack_ops(&[Push(1), Push(2)], Some(1)).unwrap();
        assert_eq!(trace.last().payload.items, vec![1]);
        assert!(trace.last().payload.note.is_some());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(stack_ops(&[], Some(0)).is_err());
        assert!(queue_ops(&[], Some(0)).is_err());
    }

    #[test]
    fn ops_parse_from_json() {
        let ops: Vec<QueueOp> =
            serde_json::from_str(r#"[{"op":"enqueue","value":4},{"op":"dequeue"}]"#).unwrap();
        assert_eq!(ops, vec![QueueOp::Enqueue(4), QueueOp::Dequeue]);
    }
}
