//! Crossing computations between a segment and a line or another segment.
//!
//! The segment/segment path works on slope/intercept lines and carries a
//! handful of recovery branches for numerically vertical or nearly parallel
//! inputs, where the closed-form crossing would otherwise be lost or placed
//! far from both operands.

use tracing::trace;

use crate::geometry::{CrossState, Line, LinearVector};
use crate::math::tolerance::{approx_ge, approx_gt, approx_le, approx_lt, combined_tolerance};
use crate::math::{Position, NEAR_VERTICAL_SLOPE};

use super::Segment;

/// Both lines vertical, or sloped with bit-identical slopes.
#[allow(clippy::float_cmp)]
fn exactly_parallel(a: &Line, b: &Line) -> bool {
    match (a, b) {
        (Line::Vertical { .. }, Line::Vertical { .. }) => true,
        (Line::Sloped { slope: m1, .. }, Line::Sloped { slope: m2, .. }) => m1 == m2,
        _ => false,
    }
}

impl Segment {
    /// Crossing of the segment with an infinite line.
    ///
    /// A crossing point at either extremity of the segment, or outside it,
    /// yields [`CrossState::NoCross`].
    #[must_use]
    pub fn intersect_line(
        &self,
        line: &Line,
        tolerance: Option<f64>,
    ) -> (CrossState, Option<Position>) {
        let tol = tolerance.unwrap_or(self.tolerance);
        match self.calculate_line().intersect(line, tol) {
            (CrossState::CrossFound, Some(point)) => {
                if self.is_point_on_line_on_segment(&point, Some(tol))
                    && !self.is_extremity(&point, tol)
                {
                    (CrossState::CrossFound, Some(point))
                } else {
                    (CrossState::NoCross, None)
                }
            }
            (state, _) => (state, None),
        }
    }

    /// Whether the two segments cross at a point interior to both.
    #[must_use]
    pub fn are_segments_crossing(&self, other: &Segment) -> bool {
        self.intersect_segment(other).0 == CrossState::CrossFound
    }

    /// Crossing of two segments, excluding crossings at an extremity.
    #[must_use]
    pub fn intersect_segment(&self, other: &Segment) -> (CrossState, Option<Position>) {
        match self.intersect_segment_extremity_included(other) {
            (CrossState::CrossFound, _, true) => (CrossState::NoCross, None),
            (state, point, _) => (state, point),
        }
    }

    /// Crossing of two segments, extremities included.
    ///
    /// The flag reports whether the crossing point coincides with an extremity
    /// of either segment, or whether the two segments are linked.
    #[must_use]
    pub fn intersect_segment_extremity_included(
        &self,
        other: &Segment,
    ) -> (CrossState, Option<Position>, bool) {
        let tol = combined_tolerance(self.tolerance, other.tolerance);
        let own_line = self.calculate_line();
        let other_line = other.calculate_line();

        if !self.extent().overlaps(&other.extent(), tol) {
            let state = if exactly_parallel(&own_line, &other_line) {
                CrossState::Parallel
            } else {
                CrossState::NoCross
            };
            return (state, None, false);
        }

        let (state, point) = match (own_line, other_line) {
            (Line::Vertical { .. }, Line::Vertical { .. }) => (CrossState::Parallel, None),
            (Line::Vertical { .. }, Line::Sloped { slope, .. })
            | (Line::Sloped { slope, .. }, Line::Vertical { .. })
                if slope.abs() > NEAR_VERTICAL_SLOPE =>
            {
                trace!(slope, "vertical segment against numerically vertical segment");
                if self.contiguous_with(other, tol) {
                    (CrossState::Parallel, None)
                } else {
                    own_line.intersect(&other_line, tol)
                }
            }
            (Line::Sloped { slope: m1, .. }, Line::Sloped { slope: m2, .. })
                if m1.abs() > NEAR_VERTICAL_SLOPE && m2.abs() > NEAR_VERTICAL_SLOPE =>
            {
                trace!(m1, m2, "two numerically vertical segments");
                if !self.x_ranges_interleave(other, tol) {
                    (CrossState::NoCross, None)
                } else if self.contiguous_with(other, tol) {
                    (CrossState::Parallel, None)
                } else {
                    self.parametric_crossing(other)
                }
            }
            _ => own_line.intersect(&other_line, tol),
        };

        let (state, point) = if state == CrossState::Parallel {
            match self.recover_near_parallel(other, &own_line, &other_line, tol) {
                Some(recovered) => (CrossState::CrossFound, Some(recovered)),
                None => (state, point),
            }
        } else {
            (state, point)
        };

        let (state, point) = match (state, point) {
            (CrossState::CrossFound, Some(p)) => {
                if self.extent().contains(&p, tol) && other.extent().contains(&p, tol) {
                    (CrossState::CrossFound, Some(p))
                } else {
                    (CrossState::NoCross, None)
                }
            }
            (CrossState::CrossFound, None) => (CrossState::NoCross, None),
            (state, _) => (state, None),
        };

        let at_extremity = point
            .is_some_and(|p| self.is_extremity(&p, tol) || other.is_extremity(&p, tol))
            || self.links_to(other);
        (state, point, at_extremity)
    }

    /// Whether an extremity X of either segment falls strictly inside the
    /// other's X range.
    fn x_ranges_interleave(&self, other: &Segment, tol: f64) -> bool {
        let inside = |x: f64, lo: f64, hi: f64| approx_gt(x, lo, tol) && approx_lt(x, hi, tol);
        let own = self.extent();
        let theirs = other.extent();
        inside(self.start.x, theirs.x_min, theirs.x_max)
            || inside(self.end.x, theirs.x_min, theirs.x_max)
            || inside(other.start.x, own.x_min, own.x_max)
            || inside(other.end.x, own.x_min, own.x_max)
    }

    /// Crossing from the direction vectors, without going through slopes.
    #[allow(clippy::float_cmp)]
    fn parametric_crossing(&self, other: &Segment) -> (CrossState, Option<Position>) {
        let d1 = self.end - self.start;
        let d2 = other.end - other.start;
        let cross = d1.perp(&d2);
        if cross == 0.0 {
            return (CrossState::Parallel, None);
        }
        let t = (other.start - self.start).perp(&d2) / cross;
        (CrossState::CrossFound, Some(self.start + d1 * t))
    }

    /// Crossing of two sloped lines that the tolerance test reported parallel
    /// although their slopes differ.
    #[allow(clippy::float_cmp)]
    fn recover_near_parallel(
        &self,
        other: &Segment,
        own_line: &Line,
        other_line: &Line,
        tol: f64,
    ) -> Option<Position> {
        let (
            Line::Sloped {
                slope: m1,
                intercept: b1,
            },
            Line::Sloped {
                slope: m2,
                intercept: b2,
            },
        ) = (*own_line, *other_line)
        else {
            return None;
        };
        if m1 == m2 || self.contiguous_with(other, tol) {
            return None;
        }
        trace!(m1, m2, "recovering crossing of nearly parallel segments");

        let within_y = |y: f64, segment: &Segment| {
            let extent = segment.extent();
            approx_ge(y, extent.y_min, tol) && approx_le(y, extent.y_max, tol)
        };
        if m1 == 0.0 {
            let y = self.start.y;
            within_y(y, other).then(|| Position::new((y - b2) / m2, y))
        } else if m2 == 0.0 {
            let y = other.start.y;
            within_y(y, self).then(|| Position::new((y - b1) / m1, y))
        } else {
            let x = (b2 - b1) / (m1 - m2);
            // The shallower line loses less precision in y.
            let y = if m1.abs() < m2.abs() {
                m1 * x + b1
            } else {
                m2 * x + b2
            };
            Some(Position::new(x, y))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    const EPS: f64 = 1e-7;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment::with_tolerance(Position::new(x0, y0), Position::new(x1, y1), EPS)
    }

    #[test]
    fn line_crossing_inside_segment() {
        let s = seg(0.0, 0.0, 10.0, 10.0);
        let line = Line::from_points(&Position::new(0.0, 10.0), &Position::new(10.0, 0.0));
        let (state, point) = s.intersect_line(&line, None);
        assert_eq!(state, CrossState::CrossFound);
        let point = point.unwrap();
        assert_relative_eq!(point.x, 5.0);
        assert_relative_eq!(point.y, 5.0);
    }

    #[test]
    fn line_crossing_at_extremity_or_outside() {
        let s = seg(0.0, 0.0, 10.0, 10.0);
        let through_start = Line::Vertical { x: 0.0 };
        assert_eq!(s.intersect_line(&through_start, None), (CrossState::NoCross, None));
        let beyond = Line::Vertical { x: 20.0 };
        assert_eq!(s.intersect_line(&beyond, None), (CrossState::NoCross, None));
        let parallel = Line::from_points(&Position::new(0.0, 1.0), &Position::new(1.0, 2.0));
        assert_eq!(s.intersect_line(&parallel, None), (CrossState::Parallel, None));
    }

    #[test]
    fn perpendicular_crossing() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(5.0, -5.0, 5.0, 5.0);
        let (state, point, at_extremity) = a.intersect_segment_extremity_included(&b);
        assert_eq!(state, CrossState::CrossFound);
        assert!(!at_extremity);
        let point = point.unwrap();
        assert_relative_eq!(point.x, 5.0);
        assert_abs_diff_eq!(point.y, 0.0);
        assert!(a.are_segments_crossing(&b));
    }

    #[test]
    fn disjoint_extents() {
        let a = seg(0.0, 0.0, 1.0, 1.0);
        assert_eq!(
            a.intersect_segment(&seg(5.0, 0.0, 6.0, -3.0)),
            (CrossState::NoCross, None)
        );
        assert_eq!(
            a.intersect_segment(&seg(5.0, 5.0, 6.0, 6.0)),
            (CrossState::Parallel, None)
        );
        assert_eq!(
            seg(0.0, 0.0, 0.0, 1.0).intersect_segment(&seg(3.0, 0.0, 3.0, 1.0)),
            (CrossState::Parallel, None)
        );
    }

    #[test]
    fn extents_touching_by_a_side() {
        let a = seg(0.1, 0.1, 10.1, 0.1);
        let b = seg(0.1, 10.1, 10.1, 10.1);
        let c = seg(0.1, 10.1, 0.1, 20.1);
        let d = seg(10.1, 10.1, 10.1, 0.1);
        assert_eq!(b.intersect_segment(&a).0, CrossState::Parallel);
        assert_eq!(c.intersect_segment(&a).0, CrossState::NoCross);
        assert_eq!(d.intersect_segment(&a).0, CrossState::NoCross);
    }

    #[test]
    fn touching_at_extremity() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(0.0, 0.0, 0.0, 10.0);
        let (state, point, at_extremity) = a.intersect_segment_extremity_included(&b);
        assert_eq!(state, CrossState::CrossFound);
        assert_eq!(point, Some(Position::new(0.0, 0.0)));
        assert!(at_extremity);
        assert_eq!(a.intersect_segment(&b), (CrossState::NoCross, None));
        assert!(!a.are_segments_crossing(&b));
    }

    #[test]
    fn t_junction_on_interior() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(5.0, 0.0, 5.0, 10.0);
        let (state, _, at_extremity) = a.intersect_segment_extremity_included(&b);
        assert_eq!(state, CrossState::CrossFound);
        assert!(at_extremity);
        assert!(!a.are_segments_crossing(&b));
    }

    #[test]
    fn linked_segments_never_cross() {
        let a = seg(0.0, 0.0, 10.0, 10.0);
        let b = seg(10.0, 10.0, 20.0, 0.0);
        assert!(!a.are_segments_crossing(&b));
        assert!(!b.are_segments_crossing(&a));
        let (_, _, at_extremity) = a.intersect_segment_extremity_included(&b);
        assert!(at_extremity);
    }

    #[test]
    fn line_crossing_outside_segments() {
        let a = seg(0.0, 0.0, 10.0, 10.0);
        let b = seg(8.0, 0.0, 10.0, 1.0);
        assert_eq!(a.intersect_segment(&b), (CrossState::NoCross, None));
    }

    #[test]
    fn collinear_overlap_is_parallel() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(5.0, 0.0, 15.0, 0.0);
        assert_eq!(a.intersect_segment(&b).0, CrossState::Parallel);
        let v1 = seg(0.1, 0.1, 0.1, 10.1);
        assert_eq!(v1.intersect_segment(&v1.reversed()).0, CrossState::Parallel);
    }

    #[test]
    fn vertical_against_numerically_vertical() {
        let vertical = seg(0.0, 0.0, 0.0, 10.0);
        let steep = seg(-1e-3, -5.0, 1e-3, 15.0);
        assert!(steep.calculate_line().slope().unwrap() > NEAR_VERTICAL_SLOPE);
        let (state, point) = vertical.intersect_segment(&steep);
        assert_eq!(state, CrossState::CrossFound);
        let point = point.unwrap();
        assert_abs_diff_eq!(point.x, 0.0);
        assert_relative_eq!(point.y, 5.0, epsilon = 1e-9);
        assert!(steep.are_segments_crossing(&vertical));
    }

    #[test]
    fn vertical_collinear_with_numerically_vertical() {
        let vertical = seg(0.0, 0.0, 0.0, 10.0);
        let steep = seg(0.0, 2.0, 0.5e-7, 8.0);
        assert_eq!(vertical.intersect_segment(&steep).0, CrossState::Parallel);
        assert_eq!(steep.intersect_segment(&vertical).0, CrossState::Parallel);
    }

    #[test]
    fn two_numerically_vertical_segments_crossing() {
        let a = seg(0.0, 0.0, 0.01, 100.0);
        let b = seg(0.008, 0.0, 0.002, 100.0);
        let (state, point) = a.intersect_segment(&b);
        assert_eq!(state, CrossState::CrossFound);
        let point = point.unwrap();
        assert_relative_eq!(point.x, 0.005, epsilon = 1e-12);
        assert_relative_eq!(point.y, 50.0, epsilon = 1e-9);
        assert!(b.are_segments_crossing(&a));
    }

    #[test]
    fn two_numerically_vertical_segments_apart() {
        // X ranges only touch, so neither extremity is strictly inside.
        let a = seg(0.0, 0.0, 0.001, 10.0);
        let b = seg(0.001, 5.0, 0.002, 15.0);
        assert_eq!(a.intersect_segment(&b), (CrossState::NoCross, None));
    }

    #[test]
    fn shallow_non_parallel_segments_recovered() {
        // Both slopes within tolerance of zero but different.
        let a = seg(0.0, 0.0, 10.0, 5e-7);
        let b = seg(0.0, 5e-7, 10.0, 0.0);
        let (state, point) = a.intersect_segment(&b);
        assert_eq!(state, CrossState::CrossFound);
        let point = point.unwrap();
        assert_relative_eq!(point.x, 5.0, epsilon = 1e-6);
        assert_relative_eq!(point.y, 2.5e-7, epsilon = 1e-12);
    }

    #[test]
    fn horizontal_against_shallow_recovered() {
        let horizontal = seg(0.0, 2e-7, 10.0, 2e-7);
        let shallow = seg(0.0, 0.0, 10.0, 8e-7);
        let (state, point) = horizontal.intersect_segment(&shallow);
        assert_eq!(state, CrossState::CrossFound);
        let point = point.unwrap();
        assert_relative_eq!(point.x, 2.5, epsilon = 1e-6);
        assert_relative_eq!(point.y, 2e-7);

        let (state, point) = shallow.intersect_segment(&horizontal);
        assert_eq!(state, CrossState::CrossFound);
        assert_relative_eq!(point.unwrap().x, 2.5, epsilon = 1e-6);
    }

    #[test]
    fn parallel_with_identical_slopes() {
        let a = seg(0.0, 0.0, 10.0, 10.0);
        let b = seg(0.0, 1.0, 10.0, 11.0);
        assert_eq!(a.intersect_segment(&b), (CrossState::Parallel, None));
    }

    #[test]
    fn null_segment_never_crosses() {
        let a = seg(0.0, 0.0, 10.0, 10.0);
        let null = seg(5.0, 5.0, 5.0, 5.0);
        assert!(!a.are_segments_crossing(&null));
        assert!(!null.are_segments_crossing(&a));
    }

    #[test]
    fn coincident_null_segments_are_linked_parallels() {
        let a = seg(3.0, 3.0, 3.0, 3.0);
        let b = seg(3.0, 3.0, 3.0, 3.0);
        assert_eq!(a.intersect_segment_extremity_included(&b), (CrossState::Parallel, None, true));
        assert_eq!(a.intersect_segment(&b), (CrossState::Parallel, None));
        assert!(!a.are_segments_crossing(&b));
    }

    #[test]
    fn distinct_null_segments_are_unlinked_parallels() {
        let a = seg(3.0, 3.0, 3.0, 3.0);
        let b = seg(4.0, 3.0, 4.0, 3.0);
        assert_eq!(a.intersect_segment_extremity_included(&b), (CrossState::Parallel, None, false));
        assert_eq!(b.intersect_segment_extremity_included(&a), (CrossState::Parallel, None, false));
        assert_eq!(a.intersect_segment(&b), (CrossState::Parallel, None));
    }

    /// Jointly near-vertical segments over the same X range never interleave
    /// strictly, so they report no crossing even though they meet at
    /// (0.0005, 5).
    #[test]
    fn near_vertical_pair_over_identical_x_range_does_not_cross() {
        let a = seg(0.0, 0.0, 0.001, 10.0);
        let b = seg(0.001, 0.0, 0.0, 10.0);
        assert!(a.calculate_line().slope().unwrap().abs() > NEAR_VERTICAL_SLOPE);
        assert!(b.calculate_line().slope().unwrap().abs() > NEAR_VERTICAL_SLOPE);
        assert_eq!(a.intersect_segment(&b), (CrossState::NoCross, None));
        assert_eq!(b.intersect_segment(&a), (CrossState::NoCross, None));
        assert!(!a.crosses(&b));
    }
}
