//! Custom assertions for testing
//!
//! Cursor geometry is computed in floating point, so most assertions here
//! compare with a tolerance rather than exactly.

// These assertions are designed to panic on failure
#![allow(clippy::missing_panics_doc)]

use std::time::Duration;

/// Assert that two floating point numbers are approximately equal
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "runtime")]
/// # {
/// use tikus_common::testing::assertions::assert_approx_eq;
///
/// assert_approx_eq(3.14159, 3.14160, 0.001);
/// # }
/// ```
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff < epsilon,
        "Values not approximately equal: {actual} vs {expected} (diff: {diff})"
    );
}

/// Assert that a duration is within `tolerance` of `expected`
pub fn assert_duration_in_range(actual: Duration, expected: Duration, tolerance: Duration) {
    let min = expected.saturating_sub(tolerance);
    let max = expected + tolerance;
    assert!(
        actual >= min && actual <= max,
        "Duration {actual:?} not within {tolerance:?} of {expected:?}"
    );
}

/// Assert that `(x, y)` lies inside the closed rectangle `[min, max]`
pub fn assert_point_within(point: (f64, f64), min: (f64, f64), max: (f64, f64)) {
    let (x, y) = point;
    assert!(
        x >= min.0 && x <= max.0 && y >= min.1 && y <= max.1,
        "Point ({x}, {y}) outside [{:?} .. {:?}]",
        min,
        max
    );
}
