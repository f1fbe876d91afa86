//! Stepwise Frame Model
//!
//! Every stepwise tracer runs its algorithm exactly once and records what it
//! sees as an ordered list of frames. This crate holds the shared vocabulary.
//!
//! # Invariants
//!
//! - A [`Trace`] is never empty: a run that changes nothing still records its
//!   starting state.
//! - Frames own their payloads. [`TraceBuilder::snapshot`] clones the working
//!   state, so later mutation cannot leak into earlier frames.
//! - Input is validated before the builder is created. A tracer either returns
//!   a complete trace or an error, never a partial trace.
//!
//! # Usage
//!
//! ```
//! use stepwise_trace::TraceBuilder;
//!
//! let mut state = vec![2, 1];
//! let mut builder = TraceBuilder::new("demo");
//! builder.snapshot("Start", "Initial array", &state);
//! state.swap(0, 1);
//! builder.snapshot("Swap", "Swapped positions 0 and 1", &state);
//!
//! let trace = builder.finish().unwrap();
//! assert_eq!(trace.len(), 2);
//! assert_eq!(trace.first().payload, vec![2, 1]);
//! ```

mod error;
mod frame;

pub use error::{Result, TraceError};
pub use frame::{Frame, FrameSource, Trace, TraceBuilder};
