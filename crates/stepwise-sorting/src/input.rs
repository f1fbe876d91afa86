//! Input validation and parsing for sorting tracers.

use stepwise_trace::{Result, TraceError};

/// Largest array a sorting tracer accepts.
///
/// Every frame owns a copy of the array and bubble or quick sort can emit
/// about n² frames, so trace memory grows with n³.
pub const MAX_LEN: usize = 100;

pub(crate) fn validate(array: &[i64]) -> Result<()> {
    if array.len() > MAX_LEN {
        tracing::warn!(len = array.len(), max = MAX_LEN, "sort input too long");
        return Err(TraceError::InvalidInput(format!(
            "array has {} elements, at most {} are supported",
            array.len(),
            MAX_LEN
        )));
    }
    Ok(())
}

/// Parse a list of integers separated by commas and/or whitespace.
///
/// ```
/// use stepwise_sorting::parse_array;
///
/// assert_eq!(parse_array("3, 1 2").unwrap(), vec![3, 1, 2]);
/// assert!(parse_array("3, x").is_err());
/// ```
pub fn parse_array(text: &str) -> Result<Vec<i64>> {
    let values = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<i64>().map_err(|_| {
                TraceError::InvalidInput(format!("'{}' is not an integer", token))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    validate(&values)?;
    Ok(values)
}
