use crate::math::tolerance::{approx_ge, approx_le};
use crate::math::Position;

/// Axis-aligned bounding box of a 2D vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Extent {
    /// Smallest extent containing both positions.
    #[must_use]
    pub fn from_points(a: &Position, b: &Position) -> Self {
        Self {
            x_min: a.x.min(b.x),
            y_min: a.y.min(b.y),
            x_max: a.x.max(b.x),
            y_max: a.y.max(b.y),
        }
    }

    /// Grows this extent to include `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Whether the two extents share at least one point, boundaries included.
    #[must_use]
    pub fn overlaps(&self, other: &Self, tolerance: f64) -> bool {
        approx_le(self.x_min, other.x_max, tolerance)
            && approx_ge(self.x_max, other.x_min, tolerance)
            && approx_le(self.y_min, other.y_max, tolerance)
            && approx_ge(self.y_max, other.y_min, tolerance)
    }

    /// Whether `point` lies inside the extent, boundaries included.
    #[must_use]
    pub fn contains(&self, point: &Position, tolerance: f64) -> bool {
        approx_ge(point.x, self.x_min, tolerance)
            && approx_le(point.x, self.x_max, tolerance)
            && approx_ge(point.y, self.y_min, tolerance)
            && approx_le(point.y, self.y_max, tolerance)
    }
}
