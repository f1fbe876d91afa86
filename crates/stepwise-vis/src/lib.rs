//! Stepwise Visualizer
//!
//! Front door to every tracer: look up an algorithm by id, build its trace
//! from JSON parameters, and drive it through a [`Session`].
//!
//! # Architecture
//!
//! - **Registry**: [`build_trace`] maps an [`AlgorithmId`] plus parameters to
//!   a typed [`AnyTrace`]
//! - **Demo**: preset parameters for every algorithm and seeded random arrays
//! - **Session**: one cursor and one auto-play timer, safe to switch traces
//!   while playing
//!
//! # Usage
//!
//! ```
//! use serde_json::json;
//! use stepwise_vis::{build_trace, AlgorithmId};
//!
//! let id: AlgorithmId = "bubble_sort".parse().unwrap();
//! let trace = build_trace(id, &json!({ "array": [3, 1, 2] })).unwrap();
//! assert_eq!(trace.algorithm(), "bubble_sort");
//!
//! // Parameters are checked against the algorithm they are given to.
//! assert!(build_trace(AlgorithmId::Dijkstra, &id.demo_params()).is_err());
//! assert!(build_trace(AlgorithmId::Dijkstra, &AlgorithmId::Dijkstra.demo_params()).is_ok());
//! ```

mod algorithm;
mod demo;
mod params;
mod registry;
mod session;

use serde_json::Value;

pub use algorithm::{AlgorithmId, Family};
pub use demo::{demo_params, random_array, DEMO_SEED};
pub use params::{
    ArrayInput, BstParams, CountParams, DiskParams, EncapsulationParams, GraphParams, QueueParams,
    SearchParams, SegmentTreeParams, SortParams, StackParams,
};
pub use registry::{build_trace, AnyTrace};
pub use session::{Session, SessionError};

impl AlgorithmId {
    /// Parameters for a representative demo run.
    pub fn demo_params(self) -> Value {
        demo::demo_params(self)
    }
}
