//! Call/return event capture.

use serde::{Deserialize, Serialize};

/// Identifier assigned to each recorded call, in call order.
pub type CallId = usize;

/// One entry or exit of an instrumented function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CallEvent {
    Call { id: CallId, label: String },
    Return { id: CallId, value: Option<i64> },
}

/// Collects a properly nested call/return stream.
///
/// Instrumented functions wrap their body in [`CallRecorder::call`], which
/// records the entry, runs the body (which may recurse through the same
/// recorder) and records the exit with the computed value.
#[derive(Debug, Default)]
pub struct CallRecorder {
    events: Vec<CallEvent>,
    next_id: CallId,
}

impl CallRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record entry into `label` and return its id.
    pub fn enter(&mut self, label: impl Into<String>) -> CallId {
        let id = self.next_id;
        self.next_id += 1;
        self.events.push(CallEvent::Call {
            id,
            label: label.into(),
        });
        id
    }

    /// Record the exit of call `id`.
    pub fn exit(&mut self, id: CallId, value: Option<i64>) -> Option<i64> {
        self.events.push(CallEvent::Return { id, value });
        value
    }

    /// Run `body` as a recorded call.
    pub fn call<F>(&mut self, label: impl Into<String>, body: F) -> Option<i64>
    where
        F: FnOnce(&mut Self) -> Option<i64>,
    {
        let id = self.enter(label);
        let value = body(self);
        self.exit(id, value)
    }

    /// Number of calls entered so far.
    pub fn calls(&self) -> usize {
        self.next_id
    }

    pub fn events(&self) -> &[CallEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<CallEvent> {
        self.events
    }
}
