//! Instrumented recursive functions.

use stepwise_trace::{Result, Trace, TraceError};

use crate::recorder::CallRecorder;
use crate::stack::{frames_from_events, CallStackState};

/// Largest `n` accepted by [`factorial`]; 21! overflows `i64`.
pub const MAX_FACTORIAL: u32 = 20;

/// Largest `n` accepted by [`fibonacci`]. The naive recursion makes
/// `2 * fib(n + 1) - 1` calls, so this keeps traces under 50k frames.
pub const MAX_FIBONACCI: u32 = 20;

/// Longest array accepted by [`binary_search`].
pub const MAX_SEARCH_LEN: usize = 1024;

/// Sorted array searched when the caller supplies none.
pub const DEFAULT_SEARCH_ARRAY: [i64; 10] = [1, 3, 5, 7, 9, 11, 13, 15, 17, 19];

fn factorial_rec(rec: &mut CallRecorder, n: u32) -> Option<i64> {
    rec.call(format!("factorial({})", n), |rec| {
        if n <= 1 {
            Some(1)
        } else {
            let rest = factorial_rec(rec, n - 1)?;
            Some(i64::from(n) * rest)
        }
    })
}

fn fibonacci_rec(rec: &mut CallRecorder, n: u32) -> Option<i64> {
    rec.call(format!("fib({})", n), |rec| {
        if n < 2 {
            Some(i64::from(n))
        } else {
            let a = fibonacci_rec(rec, n - 1)?;
            let b = fibonacci_rec(rec, n - 2)?;
            Some(a + b)
        }
    })
}

/// Search `array[lo..hi]`, returning the index of `target`.
fn search_rec(rec: &mut CallRecorder, array: &[i64], target: i64, lo: usize, hi: usize) -> Option<i64> {
    rec.call(format!("search({}..{})", lo, hi), |rec| {
        if lo >= hi {
            return None;
        }
        let mid = lo + (hi - lo) / 2;
        match array[mid].cmp(&target) {
            std::cmp::Ordering::Equal => i64::try_from(mid).ok(),
            std::cmp::Ordering::Less => search_rec(rec, array, target, mid + 1, hi),
            std::cmp::Ordering::Greater => search_rec(rec, array, target, lo, mid),
        }
    })
}

/// Trace `factorial(n)`.
pub fn factorial(n: u32) -> Result<Trace<CallStackState>> {
    if n > MAX_FACTORIAL {
        return Err(TraceError::InvalidInput(format!(
            "factorial({}) exceeds the limit of {}",
            n, MAX_FACTORIAL
        )));
    }
    let mut rec = CallRecorder::new();
    factorial_rec(&mut rec, n);
    frames_from_events("factorial", rec.events())
}

/// Trace the naive doubly recursive `fibonacci(n)`.
pub fn fibonacci(n: u32) -> Result<Trace<CallStackState>> {
    if n > MAX_FIBONACCI {
        return Err(TraceError::InvalidInput(format!(
            "fibonacci({}) exceeds the limit of {}",
            n, MAX_FIBONACCI
        )));
    }
    let mut rec = CallRecorder::new();
    fibonacci_rec(&mut rec, n);
    frames_from_events("fibonacci", rec.events())
}

/// Trace a recursive binary search for `target` in an ascending `array`.
///
/// The closing frame's result is the index of a matching element, or `None`
/// when `target` is absent.
pub fn binary_search(array: &[i64], target: i64) -> Result<Trace<CallStackState>> {
    if array.len() > MAX_SEARCH_LEN {
        return Err(TraceError::InvalidInput(format!(
            "array of {} elements exceeds the limit of {}",
            array.len(),
            MAX_SEARCH_LEN
        )));
    }
    if let Some(i) = array.windows(2).position(|w| w[0] > w[1]) {
        return Err(TraceError::InvalidInput(format!(
            "array is not sorted ascending at index {} ({} > {})",
            i + 1,
            array[i],
            array[i + 1]
        )));
    }
    let mut rec = CallRecorder::new();
    search_rec(&mut rec, array, target, 0, array.len());
    frames_from_events("binary_search", rec.events())
}
