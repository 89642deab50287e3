use crate::math::tolerance::approx_zero;
use crate::math::Position;

use super::CrossState;

/// Infinite line in slope/intercept form.
///
/// Lines through two points with bit-identical X coordinates are `Vertical`;
/// every other line, however steep, is `Sloped`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Line {
    Vertical { x: f64 },
    Sloped { slope: f64, intercept: f64 },
}

impl Line {
    /// Line through two positions.
    ///
    /// Coincident positions yield a vertical line through them.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn from_points(a: &Position, b: &Position) -> Self {
        if a.x == b.x {
            Self::Vertical { x: a.x }
        } else {
            let slope = (b.y - a.y) / (b.x - a.x);
            Self::Sloped {
                slope,
                intercept: a.y - slope * a.x,
            }
        }
    }

    #[must_use]
    pub fn is_vertical(&self) -> bool {
        matches!(self, Self::Vertical { .. })
    }

    /// Slope of the line, `None` when vertical.
    #[must_use]
    pub fn slope(&self) -> Option<f64> {
        match *self {
            Self::Vertical { .. } => None,
            Self::Sloped { slope, .. } => Some(slope),
        }
    }

    /// Y intercept of the line, `None` when vertical.
    #[must_use]
    pub fn intercept(&self) -> Option<f64> {
        match *self {
            Self::Vertical { .. } => None,
            Self::Sloped { intercept, .. } => Some(intercept),
        }
    }

    /// Y coordinate of the line at `x`, `None` when vertical.
    #[must_use]
    pub fn y_at(&self, x: f64) -> Option<f64> {
        match *self {
            Self::Vertical { .. } => None,
            Self::Sloped { slope, intercept } => Some(slope * x + intercept),
        }
    }

    /// Perpendicular distance from `point` to the line.
    #[must_use]
    pub fn distance_to(&self, point: &Position) -> f64 {
        match *self {
            Self::Vertical { x } => (point.x - x).abs(),
            Self::Sloped { slope, intercept } => {
                ((slope * point.x - point.y + intercept) / (slope * slope + 1.0).sqrt()).abs()
            }
        }
    }

    /// Whether the two lines never meet.
    ///
    /// Slopes are compared exactly, except that two slopes both within
    /// `tolerance` of zero are considered parallel.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_parallel_to(&self, other: &Self, tolerance: f64) -> bool {
        match (*self, *other) {
            (Self::Vertical { .. }, Self::Vertical { .. }) => true,
            (Self::Vertical { .. }, Self::Sloped { .. })
            | (Self::Sloped { .. }, Self::Vertical { .. }) => false,
            (Self::Sloped { slope: m1, .. }, Self::Sloped { slope: m2, .. }) => {
                m1 == m2 || (approx_zero(m1, tolerance) && approx_zero(m2, tolerance))
            }
        }
    }

    /// Intersection of two infinite lines.
    ///
    /// Returns [`CrossState::Parallel`] when the lines are parallel (see
    /// [`Line::is_parallel_to`]), otherwise [`CrossState::CrossFound`] with the
    /// crossing point.
    #[must_use]
    pub fn intersect(&self, other: &Self, tolerance: f64) -> (CrossState, Option<Position>) {
        if self.is_parallel_to(other, tolerance) {
            return (CrossState::Parallel, None);
        }
        let point = match (*self, *other) {
            (Self::Vertical { x }, Self::Sloped { slope, intercept })
            | (Self::Sloped { slope, intercept }, Self::Vertical { x }) => {
                Position::new(x, slope * x + intercept)
            }
            (
                Self::Sloped {
                    slope: m1,
                    intercept: b1,
                },
                Self::Sloped {
                    slope: m2,
                    intercept: b2,
                },
            ) => {
                let x = (b2 - b1) / (m1 - m2);
                Position::new(x, m1 * x + b1)
            }
            (Self::Vertical { .. }, Self::Vertical { .. }) => return (CrossState::Parallel, None),
        };
        (CrossState::CrossFound, Some(point))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn vertical_from_identical_x() {
        let l = Line::from_points(&Position::new(0.1, 0.1), &Position::new(0.1, 10.1));
        assert!(l.is_vertical());
        assert_eq!(l.slope(), None);
        assert_eq!(l.intercept(), None);
    }

    #[test]
    fn sloped_line_coefficients() {
        let l = Line::from_points(&Position::new(0.0, 1.0), &Position::new(2.0, 5.0));
        assert_relative_eq!(l.slope().unwrap(), 2.0);
        assert_relative_eq!(l.intercept().unwrap(), 1.0);
        assert_relative_eq!(l.y_at(3.0).unwrap(), 7.0);
    }

    #[test]
    fn nearly_vertical_stays_sloped() {
        let l = Line::from_points(&Position::new(0.0, 0.0), &Position::new(1e-9, 10.0));
        assert!(!l.is_vertical());
        assert!(l.slope().unwrap() > 1e9);
    }

    #[test]
    fn distance_to_sloped_line() {
        let l = Line::from_points(&Position::new(0.0, 0.0), &Position::new(1.0, 1.0));
        assert_relative_eq!(l.distance_to(&Position::new(1.0, 0.0)), 0.5_f64.sqrt());
        let v = Line::Vertical { x: 2.0 };
        assert_relative_eq!(v.distance_to(&Position::new(-1.0, 7.0)), 3.0);
    }

    #[test]
    fn perpendicular_lines_cross() {
        let h = Line::from_points(&Position::new(0.0, 0.0), &Position::new(10.0, 0.0));
        let v = Line::Vertical { x: 5.0 };
        let (state, p) = h.intersect(&v, 1e-8);
        assert_eq!(state, CrossState::CrossFound);
        let p = p.unwrap();
        assert_relative_eq!(p.x, 5.0);
        assert_relative_eq!(p.y, 0.0);
    }

    #[test]
    fn oblique_lines_cross() {
        let a = Line::from_points(&Position::new(0.0, 0.0), &Position::new(2.0, 2.0));
        let b = Line::from_points(&Position::new(0.0, 2.0), &Position::new(2.0, 0.0));
        let (state, p) = a.intersect(&b, 1e-8);
        assert_eq!(state, CrossState::CrossFound);
        let p = p.unwrap();
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 1.0);
    }

    #[test]
    fn identical_slopes_are_parallel() {
        let a = Line::from_points(&Position::new(0.0, 0.0), &Position::new(10.0, 0.0));
        let b = Line::from_points(&Position::new(0.0, 5.0), &Position::new(10.0, 5.0));
        assert_eq!(a.intersect(&b, 1e-8), (CrossState::Parallel, None));
        let v1 = Line::Vertical { x: 0.0 };
        let v2 = Line::Vertical { x: 1.0 };
        assert_eq!(v1.intersect(&v2, 1e-8).0, CrossState::Parallel);
    }

    #[test]
    fn shallow_slopes_fall_back_to_tolerance() {
        let a = Line::Sloped {
            slope: 1e-10,
            intercept: 0.0,
        };
        let b = Line::Sloped {
            slope: -1e-10,
            intercept: 1.0,
        };
        assert!(a.is_parallel_to(&b, 1e-8));
        let c = Line::Sloped {
            slope: 1.0,
            intercept: 0.0,
        };
        let d = Line::Sloped {
            slope: 1.0 + 1e-12,
            intercept: 1.0,
        };
        assert!(!c.is_parallel_to(&d, 1e-8));
    }
}
