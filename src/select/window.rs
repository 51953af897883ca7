//! Local baseline measurement around a phase start.
//!
//! The window spans `BASELINE_HALF_WINDOW` samples on each side of the start
//! sample: `[max(idx - 3, 0), idx + 3)`. The left edge is clipped at zero; the
//! right edge is clipped at the series length, so near the tail of a series the
//! window silently holds fewer samples.

use std::ops::Range;

/// Samples taken on each side of the phase start.
pub const BASELINE_HALF_WINDOW: usize = 3;

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Index of the first timestamp exactly equal to `t`.
///
/// No tolerance is applied: a phase boundary that is not a sample time is a
/// lookup failure, not an approximation.
pub fn find_time_index(times: &[f64], t: f64) -> Option<usize> {
    times.iter().position(|&x| x == t)
}

/// Sample range used to measure the baseline at index `idx`.
pub fn baseline_window(idx: usize, len: usize) -> Range<usize> {
    let lo = idx.saturating_sub(BASELINE_HALF_WINDOW);
    let hi = (idx + BASELINE_HALF_WINDOW).min(len);
    lo.min(hi)..hi
}

/// Mean of `values` over the baseline window at `idx`.
pub fn local_baseline(values: &[f64], idx: usize) -> Option<f64> {
    mean(&values[baseline_window(idx, values.len())])
}
