//! Turning a call/return stream into call-stack frames.

use serde::{Deserialize, Serialize};
use stepwise_trace::{Result, Trace, TraceBuilder, TraceError};

use crate::recorder::{CallEvent, CallId};

/// Whether a stack entry is still running or about to pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Call,
    Returning,
}

/// One active call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEntry {
    pub id: CallId,
    pub label: String,
    pub status: CallStatus,
    /// Set once the call is returning.
    pub value: Option<i64>,
}

/// What the frame shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackStep {
    Start,
    Call,
    Return,
    Done,
}

/// Snapshot of the simulated call stack, outermost call first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallStackState {
    pub stack: Vec<StackEntry>,
    pub step: StackStep,
    /// Value of the outermost call, set on the closing frame.
    pub result: Option<i64>,
}

impl CallStackState {
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

fn show(value: Option<i64>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.to_string())
}

/// Build frames from a recorded event stream.
///
/// Opens with an empty stack. A call pushes an entry and records a frame. A
/// return marks the top entry as returning with its value, records a frame,
/// then pops. The closing frame shows the outermost result over an empty
/// stack. Returns that do not match the top of the stack, and calls that
/// never return, are rejected as [`TraceError::InvalidInput`].
pub fn frames_from_events(
    algorithm: &str,
    events: &[CallEvent],
) -> Result<Trace<CallStackState>> {
    let mut state = CallStackState {
        stack: Vec::new(),
        step: StackStep::Start,
        result: None,
    };
    let mut builder = TraceBuilder::new(algorithm);
    builder.snapshot("Start", "Call stack is empty", &state);

    let mut result = None;
    let mut max_depth = 0;
    for event in events {
        match event {
            CallEvent::Call { id, label } => {
                state.stack.push(StackEntry {
                    id: *id,
                    label: label.clone(),
                    status: CallStatus::Call,
                    value: None,
                });
                state.step = StackStep::Call;
                max_depth = max_depth.max(state.stack.len());
                builder.snapshot(
                    format!("Call {}", label),
                    format!("Push {} at depth {}", label, state.stack.len()),
                    &state,
                );
            }
            CallEvent::Return { id, value } => {
                let depth = state.stack.len();
                let top = match state.stack.last_mut() {
                    Some(top) if top.id == *id => top,
                    Some(top) => {
                        return Err(TraceError::InvalidInput(format!(
                            "return from call {} while call {} is on top of the stack",
                            id, top.id
                        )))
                    }
                    None => {
                        return Err(TraceError::InvalidInput(format!(
                            "return from call {} with an empty stack",
                            id
                        )))
                    }
                };
                top.status = CallStatus::Returning;
                top.value = *value;
                let label = top.label.clone();
                state.step = StackStep::Return;
                builder.snapshot(
                    format!("Return from {}", label),
                    format!("{} returns {} from depth {}", label, show(*value), depth),
                    &state,
                );
                state.stack.pop();
                if state.stack.is_empty() {
                    result = *value;
                }
            }
        }
    }

    if let Some(open) = state.stack.last() {
        tracing::warn!(algorithm, open = %open.label, "call stream ended with open calls");
        return Err(TraceError::InvalidInput(format!(
            "{} call(s) never returned, innermost {}",
            state.stack.len(),
            open.label
        )));
    }

    state.step = StackStep::Done;
    state.result = result;
    builder.snapshot(
        "Done",
        format!("Result {}, maximum depth {}", show(result), max_depth),
        &state,
    );
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(id: CallId, label: &str) -> CallEvent {
        CallEvent::Call { id, label: label.into() }
    }

    fn ret(id: CallId, value: i64) -> CallEvent {
        CallEvent::Return { id, value: Some(value) }
    }

    #[test]
    fn empty_stream_is_start_and_done() {
        let trace = frames_from_events("noop", &[]).unwrap();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.last().payload.step, StackStep::Done);
        assert_eq!(trace.last().payload.result, None);
    }

    #[test]
    fn return_frame_shows_entry_before_pop() {
        let events = [call(0, "f(1)"), call(1, "f(0)"), ret(1, 1), ret(0, 1)];
        let trace = frames_from_events("f", &events).unwrap();
        let steps: Vec<_> = trace.iter().map(|f| (f.payload.step, f.payload.depth())).collect();
        assert_eq!(
            steps,
            vec![
                (StackStep::Start, 0),
                (StackStep::Call, 1),
                (StackStep::Call, 2),
                (StackStep::Return, 2),
                (StackStep::Return, 1),
                (StackStep::Done, 0),
            ]
        );
        let returning = &trace.get(3).unwrap().payload.stack[1];
        assert_eq!(returning.status, CallStatus::Returning);
        assert_eq!(returning.value, Some(1));
        // The outer call is untouched while the inner one returns.
        assert_eq!(trace.get(3).unwrap().payload.stack[0].status, CallStatus::Call);
        assert_eq!(trace.last().payload.result, Some(1));
    }

    #[test]
    fn mismatched_return_is_rejected() {
        let events = [call(0, "a"), call(1, "b"), ret(0, 1)];
        let err = frames_from_events("bad", &events).unwrap_err();
        assert!(matches!(err, TraceError::InvalidInput(_)));
    }

    #[test]
    fn return_without_call_is_rejected() {
        assert!(frames_from_events("bad", &[ret(0, 1)]).is_err());
    }

    #[test]
    fn unreturned_call_is_rejected() {
        let err = frames_from_events("bad", &[call(0, "a")]).unwrap_err();
        assert_eq!(
            err,
            TraceError::InvalidInput("1 call(s) never returned, innermost a".into())
        );
    }
}
