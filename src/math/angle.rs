use std::f64::consts::{FRAC_PI_2, PI};

use super::Position;

/// Wraps an angle into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(2.0 * PI);
    // rem_euclid can round up to exactly 2π for tiny negative inputs.
    if wrapped >= 2.0 * PI {
        0.0
    } else {
        wrapped
    }
}

/// Bearing of the direction `from → to`, in `[0, 2π)`.
///
/// Coincident positions have a bearing of `0`.
#[must_use]
pub fn bearing(from: &Position, to: &Position) -> f64 {
    normalize_angle((to.y - from.y).atan2(to.x - from.x))
}

/// Smallest absolute difference between two angles, in `[0, π]`.
#[must_use]
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let d = normalize_angle(a - b);
    if d > PI {
        2.0 * PI - d
    } else {
        d
    }
}

/// Whether two bearings point the same way (less than a quarter turn apart).
#[must_use]
pub fn same_heading(a: f64, b: f64) -> bool {
    angular_difference(a, b) < FRAC_PI_2
}
