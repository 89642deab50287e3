//! Epsilon comparisons used by every coordinate test in the kernel.
//!
//! Each comparison names its boundary behaviour: the `_eq`, `_ge` and `_le`
//! forms include the tolerance band, `_gt` and `_lt` exclude it.

use super::Position;

/// Absolute tolerance used when no coordinate magnitude dominates.
pub const DEFAULT_GLOBAL_EPSILON: f64 = 1e-8;

/// Relative factor applied to the largest coordinate magnitude.
pub const DEFAULT_EPSILON_MULTIPLIER: f64 = 1e-11;

/// `a` equals `b` within `tolerance` (inclusive).
#[must_use]
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    a <= b + tolerance && a >= b - tolerance
}

/// `a` is zero within `tolerance` (inclusive).
#[must_use]
pub fn approx_zero(a: f64, tolerance: f64) -> bool {
    a.abs() <= tolerance
}

/// `a` is greater than `b` by more than `tolerance`.
#[must_use]
pub fn approx_gt(a: f64, b: f64, tolerance: f64) -> bool {
    a > b + tolerance
}

/// `a` is greater than or equal to `b` within `tolerance`.
#[must_use]
pub fn approx_ge(a: f64, b: f64, tolerance: f64) -> bool {
    a >= b - tolerance
}

/// `a` is smaller than `b` by more than `tolerance`.
#[must_use]
pub fn approx_lt(a: f64, b: f64, tolerance: f64) -> bool {
    a < b - tolerance
}

/// `a` is smaller than or equal to `b` within `tolerance`.
#[must_use]
pub fn approx_le(a: f64, b: f64, tolerance: f64) -> bool {
    a <= b + tolerance
}

/// Tolerance governing a query between two operands: the tighter one wins.
#[must_use]
pub fn combined_tolerance(a: f64, b: f64) -> f64 {
    a.min(b)
}

/// Coordinate-wise equality of two positions within `tolerance`.
#[must_use]
pub fn positions_equal(a: &Position, b: &Position, tolerance: f64) -> bool {
    approx_eq(a.x, b.x, tolerance) && approx_eq(a.y, b.y, tolerance)
}

/// Precision setting from which automatic tolerances are derived.
///
/// The derived tolerance grows with coordinate magnitude so that geometry far
/// from the origin is not compared at a resolution finer than `f64` can carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Precision {
    /// Lower bound of every derived tolerance.
    pub global_epsilon: f64,
    /// Factor applied to the largest absolute coordinate.
    pub epsilon_multiplier: f64,
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            global_epsilon: DEFAULT_GLOBAL_EPSILON,
            epsilon_multiplier: DEFAULT_EPSILON_MULTIPLIER,
        }
    }
}

impl Precision {
    /// Creates a precision setting.
    #[must_use]
    pub fn new(global_epsilon: f64, epsilon_multiplier: f64) -> Self {
        Self {
            global_epsilon,
            epsilon_multiplier,
        }
    }

    /// Tolerance suited to geometry spanning the given positions.
    #[must_use]
    pub fn tolerance_for(&self, points: &[Position]) -> f64 {
        let magnitude = points
            .iter()
            .flat_map(|p| [p.x.abs(), p.y.abs()])
            .fold(0.0_f64, f64::max);
        self.global_epsilon.max(magnitude * self.epsilon_multiplier)
    }
}
