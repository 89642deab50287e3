//! Straight 2D segment and its predicate/query surface.
//!
//! All coordinate comparisons go through [`crate::math::tolerance`]. The only
//! exact comparisons are the axis-alignment tests and the slope tests called
//! out in [`intersect`]; binary queries always use the smaller tolerance of the
//! two operands.

mod contiguous;
mod intersect;

use nalgebra::Rotation2;

use crate::error::{GeometryError, Result};
use crate::math::angle::{bearing, same_heading};
use crate::math::tolerance::{combined_tolerance, positions_equal};
use crate::math::{Displacement, Position, Precision};

use super::{ArbitraryDirection, CrossState, Extent, ExtremityPolicy, Line, LinearVector};

/// A straight segment between two positions, with the tolerance used by all
/// of its comparisons.
///
/// With automatic tolerance (the default) the tolerance is derived from the
/// endpoint coordinates through a [`Precision`] and recomputed whenever the
/// endpoints move. An explicit tolerance is kept as given.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    start: Position,
    end: Position,
    tolerance: f64,
    precision: Precision,
    auto_tolerance: bool,
}

impl Segment {
    /// Creates a segment with a tolerance derived from the default [`Precision`].
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self::with_precision(start, end, &Precision::default())
    }

    /// Creates a segment with a tolerance derived from `precision`.
    #[must_use]
    pub fn with_precision(start: Position, end: Position, precision: &Precision) -> Self {
        Self {
            start,
            end,
            tolerance: precision.tolerance_for(&[start, end]),
            precision: *precision,
            auto_tolerance: true,
        }
    }

    /// Creates a segment with a fixed tolerance.
    #[must_use]
    pub fn with_tolerance(start: Position, end: Position, tolerance: f64) -> Self {
        Self {
            start,
            end,
            tolerance,
            precision: Precision::default(),
            auto_tolerance: false,
        }
    }

    /// Creates a segment from a start point and a displacement to its end.
    #[must_use]
    pub fn from_displacement(start: Position, displacement: Displacement) -> Self {
        Self::new(start, start + displacement)
    }

    /// Fixes the tolerance, disabling automatic tolerance.
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance;
        self.auto_tolerance = false;
    }

    #[must_use]
    pub fn is_auto_tolerance(&self) -> bool {
        self.auto_tolerance
    }

    /// Enables or disables automatic tolerance. Enabling it recomputes the
    /// tolerance immediately.
    pub fn set_auto_tolerance(&mut self, active: bool) {
        self.auto_tolerance = active;
        self.reset_tolerance();
    }

    fn reset_tolerance(&mut self) {
        if self.auto_tolerance {
            self.tolerance = self.precision.tolerance_for(&[self.start, self.end]);
        }
    }

    /// Whether start and end coincide within tolerance.
    #[must_use]
    pub fn is_null(&self) -> bool {
        positions_equal(&self.start, &self.end, self.tolerance)
    }

    /// Whether both operands have the same endpoints, in the same order.
    #[must_use]
    pub fn is_equivalent_to(&self, other: &Segment) -> bool {
        let tol = combined_tolerance(self.tolerance, other.tolerance);
        positions_equal(&self.start, &other.start, tol)
            && positions_equal(&self.end, &other.end, tol)
    }

    /// The same segment traversed from end to start.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            ..*self
        }
    }

    /// Infinite line through the endpoints.
    #[must_use]
    pub fn calculate_line(&self) -> Line {
        Line::from_points(&self.start, &self.end)
    }

    /// Exactly vertical or exactly horizontal.
    #[allow(clippy::float_cmp)]
    fn is_axis_aligned(&self) -> bool {
        self.start.x == self.end.x || self.start.y == self.end.y
    }

    fn is_extremity(&self, point: &Position, tolerance: f64) -> bool {
        positions_equal(point, &self.start, tolerance)
            || positions_equal(point, &self.end, tolerance)
    }

    /// Point test against the segment.
    ///
    /// The point must be inside the tolerance-inflated extent and, unless the
    /// segment is axis-aligned, within `tolerance` of the supporting line.
    /// `policy` then overrides the result for points at an extremity. Without
    /// an explicit `tolerance` the segment's own is used.
    #[must_use]
    pub fn is_point_on_with(
        &self,
        point: &Position,
        policy: ExtremityPolicy,
        tolerance: Option<f64>,
    ) -> bool {
        let tol = tolerance.unwrap_or(self.tolerance);
        let on = self.extent().contains(point, tol)
            && (self.is_axis_aligned() || self.calculate_line().distance_to(point) <= tol);
        match policy {
            ExtremityPolicy::AsComputed => on,
            ExtremityPolicy::IncludeExtremities => on || self.is_extremity(point, tol),
            ExtremityPolicy::ExcludeExtremities => on && !self.is_extremity(point, tol),
        }
    }

    /// Extent-only point test for a point already known to be on the
    /// supporting line.
    #[must_use]
    pub fn is_point_on_line_on_segment(&self, point: &Position, tolerance: Option<f64>) -> bool {
        self.extent().contains(point, tolerance.unwrap_or(self.tolerance))
    }

    /// Signed area swept by the ray from `point` along the segment, the
    /// per-component term of a shoelace sum.
    #[must_use]
    pub fn calculate_ray_area(&self, point: &Position) -> f64 {
        self.start.x * (self.end.y - point.y) / 2.0
    }

    /// A single segment can never cross itself.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn auto_crosses(&self) -> bool {
        false
    }

    /// Position at parameter `relative_position` (0 at start, 1 at end).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] outside `[0, 1]`.
    pub fn calculate_relative_point(&self, relative_position: f64) -> Result<Position> {
        if !(0.0..=1.0).contains(&relative_position) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "relative_position",
                value: relative_position,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        Ok(self.start + (self.end - self.start) * relative_position)
    }

    /// Rotates both endpoints by `angle` radians (counter-clockwise) around `pivot`.
    pub fn rotate(&mut self, angle: f64, pivot: &Position) {
        let rotation = Rotation2::new(angle);
        self.start = pivot + rotation * (self.start - pivot);
        self.end = pivot + rotation * (self.end - pivot);
        self.reset_tolerance();
    }

    /// Keeps only the part between two relative positions.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] unless
    /// `0 <= start_relative <= end_relative <= 1`.
    pub fn shorten(&mut self, start_relative: f64, end_relative: f64) -> Result<()> {
        if !(0.0..=end_relative).contains(&start_relative) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "start_relative",
                value: start_relative,
                min: 0.0,
                max: end_relative,
            }
            .into());
        }
        let new_end = self.calculate_relative_point(end_relative)?;
        let new_start = self.calculate_relative_point(start_relative)?;
        self.start = new_start;
        self.end = new_end;
        self.reset_tolerance();
        Ok(())
    }

    /// Moves the start point to `new_start`, which must lie on the segment.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::PointNotOnSegment`] if `new_start` is off the segment.
    pub fn shorten_from(&mut self, new_start: &Position) -> Result<()> {
        self.ensure_on_segment(new_start)?;
        self.start = *new_start;
        self.reset_tolerance();
        Ok(())
    }

    /// Moves the end point to `new_end`, which must lie on the segment.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::PointNotOnSegment`] if `new_end` is off the segment.
    pub fn shorten_to(&mut self, new_end: &Position) -> Result<()> {
        self.ensure_on_segment(new_end)?;
        self.end = *new_end;
        self.reset_tolerance();
        Ok(())
    }

    /// Moves the start point to the given relative position.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] outside `[0, 1]`.
    pub fn shorten_from_relative(&mut self, start_relative: f64) -> Result<()> {
        self.start = self.calculate_relative_point(start_relative)?;
        self.reset_tolerance();
        Ok(())
    }

    /// Moves the end point to the given relative position.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] outside `[0, 1]`.
    pub fn shorten_to_relative(&mut self, end_relative: f64) -> Result<()> {
        self.end = self.calculate_relative_point(end_relative)?;
        self.reset_tolerance();
        Ok(())
    }

    /// Keeps only the part between two positions on the segment.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::PointNotOnSegment`] if either point is off the
    /// segment, and [`GeometryError::ParameterOutOfRange`] if `new_start` lies
    /// past `new_end`.
    pub fn shorten_between(&mut self, new_start: &Position, new_end: &Position) -> Result<()> {
        self.ensure_on_segment(new_start)?;
        self.ensure_on_segment(new_end)?;
        let start_relative = self.calculate_relative_position(new_start);
        let end_relative = self.calculate_relative_position(new_end);
        if start_relative > end_relative {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "start_relative",
                value: start_relative,
                min: 0.0,
                max: end_relative,
            }
            .into());
        }
        self.start = *new_start;
        self.end = *new_end;
        self.reset_tolerance();
        Ok(())
    }

    fn ensure_on_segment(&self, point: &Position) -> Result<()> {
        if self.is_point_on_with(point, ExtremityPolicy::IncludeExtremities, None) {
            Ok(())
        } else {
            Err(GeometryError::PointNotOnSegment {
                x: point.x,
                y: point.y,
            }
            .into())
        }
    }

    /// Whether an extremity of one segment coincides with an extremity of the other.
    #[must_use]
    pub fn links_to(&self, other: &Segment) -> bool {
        let tol = combined_tolerance(self.tolerance, other.tolerance);
        self.is_extremity(&other.start, tol) || self.is_extremity(&other.end, tol)
    }

    /// Whether the supporting lines are parallel. Null segments have no
    /// direction and are never parallel.
    #[must_use]
    pub fn is_parallel_to(&self, other: &Segment) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        let tol = combined_tolerance(self.tolerance, other.tolerance);
        self.calculate_line().is_parallel_to(&other.calculate_line(), tol)
    }

    /// Whether the two segments lie along a common line and touch.
    ///
    /// Collinearity is accepted if either segment's endpoints are both within
    /// tolerance of the other's supporting line. Null segments are never adjacent.
    #[must_use]
    pub fn are_segments_adjacent(&self, other: &Segment) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        let tol = combined_tolerance(self.tolerance, other.tolerance);
        if !self.extent().overlaps(&other.extent(), tol) {
            return false;
        }

        let own_line = self.calculate_line();
        let other_line = other.calculate_line();
        let collinear = (own_line.distance_to(&other.start) <= tol
            && own_line.distance_to(&other.end) <= tol)
            || (other_line.distance_to(&self.start) <= tol
                && other_line.distance_to(&self.end) <= tol);
        if !collinear {
            return false;
        }

        let on_other =
            |p: &Position| other.is_point_on_with(p, ExtremityPolicy::AsComputed, Some(tol));
        let on_self =
            |p: &Position| self.is_point_on_with(p, ExtremityPolicy::AsComputed, Some(tol));
        on_other(&self.start) || on_other(&self.end) || on_self(&other.start) || on_self(&other.end)
    }

    /// Orders two points on `self` from start to end.
    fn order_along(&self, (a, b): (Position, Position)) -> (Position, Position) {
        if self.calculate_relative_position(&a) > self.calculate_relative_position(&b) {
            (b, a)
        } else {
            (a, b)
        }
    }

    fn sort_along(&self, points: &mut [Position]) {
        let key = |p: &Position| self.calculate_relative_position(p);
        points.sort_by(|a, b| key(a).total_cmp(&key(b)));
    }

    fn assert_on_both(&self, other: &dyn LinearVector, point: &Position) {
        assert!(
            self.is_point_on_with(point, ExtremityPolicy::IncludeExtremities, None)
                && other.is_point_on(point, ExtremityPolicy::IncludeExtremities),
            "point ({}, {}) must lie on both vectors",
            point.x,
            point.y
        );
    }
}

impl LinearVector for Segment {
    fn start_point(&self) -> Position {
        self.start
    }

    fn end_point(&self) -> Position {
        self.end
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Bounding box of the two endpoints.
    fn extent(&self) -> Extent {
        Extent::from_points(&self.start, &self.end)
    }

    fn calculate_length(&self) -> f64 {
        nalgebra::distance(&self.start, &self.end)
    }

    fn is_point_on(&self, point: &Position, policy: ExtremityPolicy) -> bool {
        self.is_point_on_with(point, policy, None)
    }

    /// The foot of the perpendicular on the supporting line is returned when it
    /// falls on the segment, otherwise the nearer endpoint.
    #[allow(clippy::float_cmp)]
    fn calculate_closest_point(&self, point: &Position) -> Position {
        let direction = self.end - self.start;
        let length_sq = direction.norm_squared();
        if length_sq == 0.0 {
            return self.start;
        }

        let t = (point - self.start).dot(&direction) / length_sq;
        let on_line = self.start + direction * t;
        if self.is_point_on_line_on_segment(&on_line, None) {
            return on_line;
        }

        let to_start = nalgebra::distance(&on_line, &self.start);
        let to_end = nalgebra::distance(&on_line, &self.end);
        if to_start < to_end {
            self.start
        } else if to_end < to_start {
            self.end
        } else if self.calculate_length() == 0.0 || !to_start.is_finite() {
            self.start
        } else if same_heading(bearing(&on_line, &self.start), bearing(&self.start, &self.end)) {
            // The foot lies before the start.
            self.start
        } else {
            self.end
        }
    }

    /// Parameter of the projection of `point` (0 at start, 1 at end). A
    /// segment of zero length maps every point to 0.
    #[allow(clippy::float_cmp)]
    fn calculate_relative_position(&self, point: &Position) -> f64 {
        let direction = self.end - self.start;
        let length_sq = direction.norm_squared();
        if length_sq == 0.0 {
            return 0.0;
        }
        (point - self.start).dot(&direction) / length_sq
    }

    /// The bearing of a segment is the same everywhere, so `point` is ignored.
    fn calculate_bearing(&self, _point: &Position, direction: ArbitraryDirection) -> f64 {
        match direction {
            ArbitraryDirection::Beta => bearing(&self.start, &self.end),
            ArbitraryDirection::Alpha => bearing(&self.end, &self.start),
        }
    }

    fn as_segment(&self) -> Option<&Segment> {
        Some(self)
    }

    fn crosses(&self, other: &dyn LinearVector) -> bool {
        match other.as_segment() {
            Some(segment) => self.are_segments_crossing(segment),
            None => other.crosses(self),
        }
    }

    fn are_adjacent(&self, other: &dyn LinearVector) -> bool {
        match other.as_segment() {
            Some(segment) => self.are_segments_adjacent(segment),
            None => other.are_adjacent(self),
        }
    }

    fn intersect(&self, other: &dyn LinearVector) -> Vec<Position> {
        match other.as_segment() {
            Some(segment) => match self.intersect_segment(segment) {
                (CrossState::CrossFound, Some(point)) => vec![point],
                _ => Vec::new(),
            },
            None => {
                let mut points = other.intersect(self);
                self.sort_along(&mut points);
                points
            }
        }
    }

    fn are_contiguous(&self, other: &dyn LinearVector) -> bool {
        match other.as_segment() {
            Some(segment) => self.are_segments_contiguous(segment),
            None => other.are_contiguous(self),
        }
    }

    fn obtain_contiguousness_points(&self, other: &dyn LinearVector) -> Vec<Position> {
        match other.as_segment() {
            Some(segment) => {
                if self.are_segments_contiguous(segment) {
                    self.obtain_contiguousness_points_with_segment(segment).to_vec()
                } else {
                    Vec::new()
                }
            }
            None => {
                let mut points = other.obtain_contiguousness_points(self);
                self.sort_along(&mut points);
                points
            }
        }
    }

    fn are_contiguous_at(&self, other: &dyn LinearVector, point: &Position) -> bool {
        self.assert_on_both(other, point);
        match other.as_segment() {
            Some(segment) => self.are_segments_contiguous(segment),
            None => other.are_contiguous_at(self, point),
        }
    }

    fn are_contiguous_at_and_get(
        &self,
        other: &dyn LinearVector,
        point: &Position,
    ) -> Option<(Position, Position)> {
        self.assert_on_both(other, point);
        let points = match other.as_segment() {
            Some(segment) => {
                if self.are_segments_contiguous(segment) {
                    let [first, second] = self.obtain_contiguousness_points_with_segment(segment);
                    Some((first, second))
                } else {
                    None
                }
            }
            None => other.are_contiguous_at_and_get(self, point),
        };
        points.map(|pair| self.order_along(pair))
    }
}
