//! Assertion utilities for testing.
//!
//! Floating-point and color comparisons shared by the integration tests.

#![allow(dead_code)]

use cmip6kit::colormaps::Rgba;

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that two colors differ by at most `max_diff` per channel.
pub fn assert_color_close(actual: Rgba, expected: Rgba, max_diff: u8) {
    for (channel, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = a.abs_diff(*e);
        assert!(
            diff <= max_diff,
            "Colors differ in channel {}: actual = {:?}, expected = {:?}, max_diff = {}",
            channel,
            actual,
            expected,
            max_diff
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(1.0, 1.0000001, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_assert_color_close() {
        assert_color_close([68, 1, 84, 255], [68, 1, 84, 255], 0);
        assert_color_close([68, 1, 84, 255], [70, 0, 83, 255], 2);
    }
}
