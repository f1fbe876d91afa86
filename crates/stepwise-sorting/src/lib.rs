//! Stepwise Sorting Tracers
//!
//! Bubble, insertion and quick sort, each recorded as a trace of
//! [`SortState`] snapshots.
//!
//! Arrays of length 0 or 1 produce exactly two frames (initial and sorted)
//! with no comparisons. Bubble and insertion sort are stable; quick sort is
//! not.

mod bubble;
mod input;
mod insertion;
mod quick;
mod state;

use serde::{Deserialize, Serialize};
use stepwise_trace::{Result, Trace};

pub use bubble::bubble_sort;
pub use input::{parse_array, MAX_LEN};
pub use insertion::insertion_sort;
pub use quick::quick_sort;
pub use state::{SortState, SortStats, SortStep};

/// The sorting algorithms available for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortAlgorithm {
    Bubble,
    Insertion,
    Quick,
}

impl SortAlgorithm {
    /// All variants in display order.
    pub const ALL: [SortAlgorithm; 3] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Insertion,
        SortAlgorithm::Quick,
    ];

    /// Run this algorithm over `input`.
    pub fn trace(self, input: &[i64]) -> Result<Trace<SortState>> {
        match self {
            SortAlgorithm::Bubble => bubble_sort(input),
            SortAlgorithm::Insertion => insertion_sort(input),
            SortAlgorithm::Quick => quick_sort(input),
        }
    }

    /// Whether equal elements keep their relative order.
    pub fn is_stable(self) -> bool {
        !matches!(self, SortAlgorithm::Quick)
    }
}
