use crate::error::{GeometryError, Result};
use crate::geometry::{ExtremityPolicy, LinearVector};
use crate::math::angle::{bearing, same_heading};
use crate::math::tolerance::{combined_tolerance, positions_equal};
use crate::math::Position;

use super::Segment;

impl Segment {
    /// Whether the two segments overlap along a common line over a
    /// non-degenerate stretch.
    ///
    /// Segments that only touch at a shared extremity are not contiguous.
    ///
    /// # Panics
    ///
    /// Panics if either segment is null.
    #[must_use]
    pub fn are_segments_contiguous(&self, other: &Segment) -> bool {
        assert!(
            !self.is_null() && !other.is_null(),
            "contiguousness is undefined for null segments"
        );
        self.contiguous_with(other, combined_tolerance(self.tolerance, other.tolerance))
    }

    /// Contiguousness test without the null-segment precondition.
    pub(super) fn contiguous_with(&self, other: &Segment, tolerance: f64) -> bool {
        if !self.extent().overlaps(&other.extent(), tolerance) {
            return false;
        }
        let on_other =
            |p: &Position| other.is_point_on_with(p, ExtremityPolicy::AsComputed, Some(tolerance));
        let on_self =
            |p: &Position| self.is_point_on_with(p, ExtremityPolicy::AsComputed, Some(tolerance));
        let same = |a: &Position, b: &Position| positions_equal(a, b, tolerance);

        if same(&self.start, &other.start) {
            on_other(&self.end) || on_self(&other.end)
        } else if same(&self.end, &other.end) {
            on_other(&self.start) || on_self(&other.start)
        } else if same(&self.start, &other.end) {
            on_other(&self.end) || on_self(&other.start)
        } else if same(&self.end, &other.start) {
            on_other(&self.start) || on_self(&other.end)
        } else {
            let matches = [
                on_other(&self.start),
                on_other(&self.end),
                on_self(&other.start),
                on_self(&other.end),
            ];
            matches.iter().filter(|&&on| on).count() == 2
        }
    }

    /// The two extremities of the overlap with `other`, ordered from the
    /// start of `self`.
    ///
    /// # Panics
    ///
    /// Panics if the segments are not contiguous.
    #[must_use]
    pub fn obtain_contiguousness_points_with_segment(&self, other: &Segment) -> [Position; 2] {
        let tolerance = combined_tolerance(self.tolerance, other.tolerance);
        match self.collect_contiguousness_points(other, tolerance).as_slice() {
            [first, second] => [*first, *second],
            _ => panic!("segments are not contiguous"),
        }
    }

    /// Fallible form of [`Segment::obtain_contiguousness_points_with_segment`].
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if either segment is null and
    /// [`GeometryError::NotContiguous`] if the segments do not overlap.
    pub fn try_contiguousness_points(&self, other: &Segment) -> Result<[Position; 2]> {
        if self.is_null() || other.is_null() {
            let reason = "null segment has no overlap".to_owned();
            return Err(GeometryError::Degenerate(reason).into());
        }
        let tolerance = combined_tolerance(self.tolerance, other.tolerance);
        match self.collect_contiguousness_points(other, tolerance).as_slice() {
            [first, second] => Ok([*first, *second]),
            _ => Err(GeometryError::NotContiguous.into()),
        }
    }

    /// Walks the same cases as [`Segment::contiguous_with`] and keeps the
    /// points behind each match. Empty unless exactly two points qualify.
    fn collect_contiguousness_points(&self, other: &Segment, tolerance: f64) -> Vec<Position> {
        if !self.extent().overlaps(&other.extent(), tolerance) {
            return Vec::new();
        }
        let on_other =
            |p: &Position| other.is_point_on_with(p, ExtremityPolicy::AsComputed, Some(tolerance));
        let on_self =
            |p: &Position| self.is_point_on_with(p, ExtremityPolicy::AsComputed, Some(tolerance));
        let same = |a: &Position, b: &Position| positions_equal(a, b, tolerance);
        // Own extremity first, then the other's.
        let pick = |own: Position, theirs: Position| {
            if on_other(&own) {
                Some(own)
            } else if on_self(&theirs) {
                Some(theirs)
            } else {
                None
            }
        };

        let shared = if same(&self.start, &other.start) {
            Some((true, pick(self.end, other.end)))
        } else if same(&self.end, &other.end) {
            Some((false, pick(self.start, other.start)))
        } else if same(&self.start, &other.end) {
            Some((true, pick(self.end, other.start)))
        } else if same(&self.end, &other.start) {
            Some((false, pick(self.start, other.end)))
        } else {
            None
        };

        match shared {
            Some((_, None)) => Vec::new(),
            Some((true, Some(second))) => vec![self.start, second],
            Some((false, Some(first))) => vec![first, self.end],
            None => {
                let mut points = Vec::with_capacity(4);
                if on_other(&self.start) {
                    points.push(self.start);
                }
                let (near, far) = if same_heading(
                    bearing(&self.start, &self.end),
                    bearing(&other.start, &other.end),
                ) {
                    (other.start, other.end)
                } else {
                    (other.end, other.start)
                };
                points.extend([near, far].into_iter().filter(|p| on_self(p)));
                if on_other(&self.end) {
                    points.push(self.end);
                }
                if points.len() == 2 {
                    points
                } else {
                    Vec::new()
                }
            }
        }
    }
}
