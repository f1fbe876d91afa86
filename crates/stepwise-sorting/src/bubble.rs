//! Bubble sort.

use stepwise_trace::{Result, Trace, TraceBuilder};

use crate::input::validate;
use crate::state::{SortState, SortStep};

/// Trace a classic bubble sort.
///
/// Runs `n - 1` passes of adjacent comparisons. A compare frame precedes every
/// comparison; a swap frame follows only when an inversion is corrected.
pub fn bubble_sort(input: &[i64]) -> Result<Trace<SortState>> {
    validate(input)?;

    let mut state = SortState::start(input);
    let mut builder = TraceBuilder::new("bubble_sort");
    builder.snapshot("Initial array", format!("Sorting {:?}", input), &state);

    let n = state.array.len();
    for pass in 0..n.saturating_sub(1) {
        for j in 0..n - 1 - pass {
            let (left, right) = (state.array[j], state.array[j + 1]);
            state.mark(SortStep::Compare, &[j, j + 1], false);
            builder.snapshot(
                format!("Compare {} and {}", left, right),
                format!("Pass {}: comparing positions {} and {}", pass + 1, j, j + 1),
                &state,
            );

            if left > right {
                state.array.swap(j, j + 1);
                state.mark(SortStep::Swap, &[j, j + 1], true);
                builder.snapshot(
                    format!("Swap {} and {}", left, right),
                    format!("{} > {}, so they trade places", left, right),
                    &state,
                );
            }
        }
    }

    state.mark(SortStep::Done, &[], false);
    builder.snapshot("Sorted", format!("Result {:?}", state.array), &state);
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SortStats;

    #[test]
    fn three_element_example() {
        let trace = bubble_sort(&[3, 1, 2]).unwrap();
        let stats = SortStats::from_trace(&trace);

        assert_eq!(stats.comparisons, 3);
        assert_eq!(stats.swaps, 2);
        assert_eq!(trace.last().payload.array, vec![1, 2, 3]);

        // The first correction exchanges positions 0 and 1.
        let first_swap = trace
            .iter()
            .find(|f| f.payload.step == SortStep::Swap)
            .unwrap();
        assert_eq!(first_swap.payload.compared, vec![0, 1]);
        assert_eq!(first_swap.payload.array, vec![1, 3, 2]);
    }

    #[test]
    fn swap_frames_follow_their_compare_frame() {
        let trace = bubble_sort(&[4, 3, 2, 1]).unwrap();
        for (i, frame) in trace.iter().enumerate() {
            if frame.payload.step == SortStep::Swap {
                let prev = &trace.frames()[i - 1].payload;
                assert_eq!(prev.step, SortStep::Compare);
                assert_eq!(prev.compared, frame.payload.compared);
            }
        }
    }

    #[test]
    fn sorted_input_never_swaps() {
        let trace = bubble_sort(&[1, 2, 3, 4]).unwrap();
        let stats = SortStats::from_trace(&trace);
        assert_eq!(stats.swaps, 0);
        assert_eq!(stats.comparisons, 6);
    }

    #[test]
    fn trivial_inputs_produce_two_frames() {
        for input in [&[][..], &[42][..]] {
            let trace = bubble_sort(input).unwrap();
            assert_eq!(trace.len(), 2);
            assert_eq!(SortStats::from_trace(&trace).comparisons, 0);
        }
    }
}
