//! Quick sort with Lomuto partitioning.

use stepwise_trace::{Result, Trace, TraceBuilder};

use crate::input::validate;
use crate::state::{SortState, SortStep};

/// Trace a quick sort using Lomuto partitioning.
///
/// The pivot is always the last element of the range. Each partition records
/// the pivot choice, one compare per scanned index, a swap for every element
/// moved into the left partition, and the final pivot placement. The left
/// sub-range is processed before the right one.
///
/// Ranges are kept on an explicit stack so adversarial inputs (already sorted
/// arrays) cannot exhaust the native call stack.
pub fn quick_sort(input: &[i64]) -> Result<Trace<SortState>> {
    validate(input)?;

    let mut state = SortState::start(input);
    let mut builder = TraceBuilder::new("quick_sort");
    builder.snapshot("Initial array", format!("Sorting {:?}", input), &state);

    let mut ranges = Vec::new();
    if state.array.len() > 1 {
        ranges.push((0, state.array.len() - 1));
    }

    while let Some((low, high)) = ranges.pop() {
        let p = partition(&mut state, &mut builder, low, high);

        // Right first so the left range is popped next.
        if p + 1 < high {
            ranges.push((p + 1, high));
        }
        if p > low + 1 {
            ranges.push((low, p - 1));
        }
    }

    state.pivot = None;
    state.mark(SortStep::Done, &[], false);
    builder.snapshot("Sorted", format!("Result {:?}", state.array), &state);
    builder.finish()
}

/// Partition `array[low..=high]` around its last element and return the
/// pivot's final index.
fn partition(
    state: &mut SortState,
    builder: &mut TraceBuilder<SortState>,
    low: usize,
    high: usize,
) -> usize {
    let pivot = state.array[high];
    state.pivot = Some(high);
    state.mark(SortStep::Pivot, &[high], false);
    builder.snapshot(
        format!("Pivot {}", pivot),
        format!("Partitioning positions {}..={} around {}", low, high, pivot),
        state,
    );

    let mut i = low;
    for j in low..high {
        let value = state.array[j];
        state.mark(SortStep::Compare, &[j, high], false);
        builder.snapshot(
            format!("Compare {} with pivot {}", value, pivot),
            format!("Scanning position {}", j),
            state,
        );

        if value < pivot {
            state.array.swap(i, j);
            state.mark(SortStep::Swap, &[i, j], true);
            builder.snapshot(
                format!("Move {} left", value),
                format!("{} < {}, swap positions {} and {}", value, pivot, i, j),
                state,
            );
            i += 1;
        }
    }

    state.array.swap(i, high);
    state.pivot = Some(i);
    state.mark(SortStep::Swap, &[i, high], true);
    builder.snapshot(
        format!("Place pivot {}", pivot),
        format!("Pivot {} lands at its final position {}", pivot, i),
        state,
    );
    i
}
