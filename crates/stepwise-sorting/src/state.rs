//! Sorting payloads.

use serde::{Deserialize, Serialize};
use stepwise_trace::Trace;

/// What happened in a sorting frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortStep {
    /// Unsorted input, before any work.
    Start,
    /// Two elements are about to be compared.
    Compare,
    /// Two elements were exchanged.
    Swap,
    /// Insertion sort picked up the next key.
    PickKey,
    /// Insertion sort moved the key one slot left.
    Shift,
    /// Insertion sort dropped the key into its slot.
    Place,
    /// Quick sort chose the pivot of a range.
    Pivot,
    /// Array is sorted.
    Done,
}

/// Snapshot of a sorting run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Full array at this instant.
    pub array: Vec<i64>,
    /// Indices under inspection (empty when none).
    pub compared: Vec<usize>,
    /// Whether this step exchanged elements.
    pub swapped: bool,
    /// Pivot position for quick sort.
    pub pivot: Option<usize>,
    /// Kind of step.
    pub step: SortStep,
}

impl SortState {
    pub(crate) fn start(array: &[i64]) -> Self {
        Self {
            array: array.to_vec(),
            compared: Vec::new(),
            swapped: false,
            pivot: None,
            step: SortStep::Start,
        }
    }

    /// Reset per-step markers before describing the next step.
    pub(crate) fn mark(&mut self, step: SortStep, compared: &[usize], swapped: bool) {
        self.step = step;
        self.compared.clear();
        self.compared.extend_from_slice(compared);
        self.swapped = swapped;
    }
}

/// Operation counts derived from a finished sorting trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortStats {
    /// Number of compare frames.
    pub comparisons: usize,
    /// Number of frames that exchanged elements.
    pub swaps: usize,
}

impl SortStats {
    /// Count compare and swap frames in `trace`.
    pub fn from_trace(trace: &Trace<SortState>) -> Self {
        trace.iter().fold(Self::default(), |mut stats, frame| {
            if frame.payload.step == SortStep::Compare {
                stats.comparisons += 1;
            }
            if frame.payload.swapped {
                stats.swaps += 1;
            }
            stats
        })
    }
}
