//! Stepwise Recursion Tracer
//!
//! Recursive functions are rewritten as instrumented wrappers that report
//! every entry and exit to a [`CallRecorder`]. The resulting event stream is
//! converted into call-stack frames by [`frames_from_events`], so the real
//! machine stack is never inspected.
//!
//! ```
//! use stepwise_recursion::{factorial, StackStep};
//!
//! let trace = factorial(3).unwrap();
//! assert_eq!(trace.last().payload.result, Some(6));
//! assert_eq!(trace.last().payload.step, StackStep::Done);
//! ```

mod functions;
mod recorder;
mod stack;

use serde::{Deserialize, Serialize};

pub use functions::{
    binary_search, factorial, fibonacci, DEFAULT_SEARCH_ARRAY, MAX_FACTORIAL, MAX_FIBONACCI,
    MAX_SEARCH_LEN,
};
pub use recorder::{CallEvent, CallId, CallRecorder};
pub use stack::{frames_from_events, CallStackState, CallStatus, StackEntry, StackStep};

/// The recursive functions available for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecursionAlgorithm {
    Factorial,
    Fibonacci,
    BinarySearch,
}

impl RecursionAlgorithm {
    pub const ALL: [RecursionAlgorithm; 3] = [
        RecursionAlgorithm::Factorial,
        RecursionAlgorithm::Fibonacci,
        RecursionAlgorithm::BinarySearch,
    ];
}
