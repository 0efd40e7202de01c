//! Mathematical primitives for bearing geometry.
//!
//! Functions for angle normalization and angular arithmetic.

use std::f64::consts::{PI, TAU};

/// Normalize angle to (-π, π].
///
/// Closed form, so arbitrarily large inputs cost the same as small ones.
/// Non-finite inputs yield NaN.
///
/// # Example
/// ```
/// use dhvani::core::math::normalize_angle;
/// use std::f64::consts::PI;
///
/// assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-12);
/// assert!((normalize_angle(-PI) - PI).abs() < 1e-12);
/// ```
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    angle - TAU * ((angle - PI) / TAU).ceil()
}

/// Shortest signed angular difference from angle `a` to angle `b`.
///
/// Returns the angle you need to add to `a` to reach `b`, in (-π, π].
///
/// # Example
/// ```
/// use dhvani::core::math::angle_diff;
/// use std::f64::consts::PI;
///
/// let diff = angle_diff(PI - 0.1, -PI + 0.1);
/// assert!((diff - 0.2).abs() < 1e-12);
/// ```
#[inline]
pub fn angle_diff(a: f64, b: f64) -> f64 {
    normalize_angle(b - a)
}

/// Heading from one planar position to another (`atan2(Δy, Δx)`).
#[inline]
pub fn heading(from_x: f64, from_y: f64, to_x: f64, to_y: f64) -> f64 {
    (to_y - from_y).atan2(to_x - from_x)
}
