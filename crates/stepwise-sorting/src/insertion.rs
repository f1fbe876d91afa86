//! Insertion sort.

use stepwise_trace::{Result, Trace, TraceBuilder};

use crate::input::validate;
use crate::state::{SortState, SortStep};

/// Trace an insertion sort.
///
/// For every index from 1 the key is picked up, moved left one slot per
/// larger neighbor, then placed. Equal keys never pass each other, so the
/// result is stable.
pub fn insertion_sort(input: &[i64]) -> Result<Trace<SortState>> {
    validate(input)?;

    let mut state = SortState::start(input);
    let mut builder = TraceBuilder::new("insertion_sort");
    builder.snapshot("Initial array", format!("Sorting {:?}", input), &state);

    for i in 1..state.array.len() {
        let key = state.array[i];
        state.mark(SortStep::PickKey, &[i], false);
        builder.snapshot(
            format!("Insert {}", key),
            format!("Take key {} from position {}; positions 0..{} are sorted", key, i, i),
            &state,
        );

        let mut j = i;
        while j > 0 && state.array[j - 1] > key {
            let larger = state.array[j - 1];
            state.array.swap(j - 1, j);
            state.mark(SortStep::Shift, &[j - 1, j], true);
            builder.snapshot(
                format!("Shift {} right", larger),
                format!("{} > {}, key moves to position {}", larger, key, j - 1),
                &state,
            );
            j -= 1;
        }

        state.mark(SortStep::Place, &[j], false);
        builder.snapshot(
            format!("Place {}", key),
            format!("Key {} settles at position {}", key, j),
            &state,
        );
    }

    state.mark(SortStep::Done, &[], false);
    builder.snapshot("Sorted", format!("Result {:?}", state.array), &state);
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(trace: &Trace<SortState>, step: SortStep) -> usize {
        trace.iter().filter(|f| f.payload.step == step).count()
    }

    #[test]
    fn frame_shape_per_key() {
        // [3, 1, 2]: key 1 shifts once, key 2 shifts once.
        let trace = insertion_sort(&[3, 1, 2]).unwrap();
        assert_eq!(count(&trace, SortStep::PickKey), 2);
        assert_eq!(count(&trace, SortStep::Shift), 2);
        assert_eq!(count(&trace, SortStep::Place), 2);
        // start + 2 × (pick + place) + 2 shifts + done
        assert_eq!(trace.len(), 8);
        assert_eq!(trace.last().payload.array, vec![1, 2, 3]);
    }

    #[test]
    fn shifts_equal_inversions() {
        let trace = insertion_sort(&[5, 4, 3, 2, 1]).unwrap();
        assert_eq!(count(&trace, SortStep::Shift), 10);
    }

    #[test]
    fn equal_keys_do_not_shift() {
        let trace = insertion_sort(&[2, 2, 2]).unwrap();
        assert_eq!(count(&trace, SortStep::Shift), 0);
    }

    #[test]
    fn every_snapshot_is_a_permutation() {
        let input = [9, -4, 7, 7, 0, 3];
        let mut expected = input.to_vec();
        expected.sort();
        let trace = insertion_sort(&input).unwrap();
        for frame in &trace {
            let mut seen = frame.payload.array.clone();
            seen.sort();
            assert_eq!(seen, expected);
        }
    }
}
