use crate::error::{GeometryError, Result};
use crate::math::tolerance::positions_equal;
use crate::math::{Position, Precision};

use super::{ArbitraryDirection, Extent, ExtremityPolicy, LinearVector, Segment};

/// Open chain of straight segments sharing one tolerance.
///
/// Binary queries are answered component by component: the chain crosses,
/// touches or overlaps another vector when any of its segments does. Point
/// results are merged, ordered along the chain and de-duplicated.
#[derive(Debug, Clone)]
pub struct PolySegment {
    points: Vec<Position>,
    tolerance: f64,
}

impl PolySegment {
    /// Creates a chain with a tolerance derived from the default [`Precision`].
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if fewer than two points are given.
    pub fn new(points: Vec<Position>) -> Result<Self> {
        let tolerance = Precision::default().tolerance_for(&points);
        Self::with_tolerance(points, tolerance)
    }

    /// Creates a chain with a fixed tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if fewer than two points are given.
    pub fn with_tolerance(points: Vec<Position>, tolerance: f64) -> Result<Self> {
        if points.len() < 2 {
            return Err(GeometryError::Degenerate(format!(
                "a chain needs at least 2 points, got {}",
                points.len()
            ))
            .into());
        }
        Ok(Self { points, tolerance })
    }

    #[must_use]
    pub fn points(&self) -> &[Position] {
        &self.points
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Component segments, in chain order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points
            .windows(2)
            .map(|pair| Segment::with_tolerance(pair[0], pair[1], self.tolerance))
    }

    /// Signed ray area of the chain, summed over its components.
    ///
    /// The first component's ray starts at `point`, every later one at the
    /// start of the component before it. A closed counter-clockwise ring
    /// yields its enclosed area.
    #[must_use]
    pub fn calculate_ray_area(&self, point: &Position) -> f64 {
        let mut ray = *point;
        let mut area = 0.0;
        for segment in self.segments() {
            area += segment.calculate_ray_area(&ray);
            ray = segment.start_point();
        }
        area
    }

    /// Whether two components of the chain cross each other. Components that
    /// only meet at a vertex do not cross.
    #[must_use]
    pub fn auto_crosses(&self) -> bool {
        if self.points.len() < 4 {
            return false;
        }
        let segments: Vec<Segment> = self.segments().collect();
        segments.iter().enumerate().any(|(index, segment)| {
            segments[index + 1..]
                .iter()
                .any(|other| segment.are_segments_crossing(other))
        })
    }

    /// Components that can take part in contiguousness queries.
    fn solid_segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.segments().filter(|segment| !segment.is_null())
    }

    /// Components on which `point` lies, extremities included.
    fn segments_through<'a>(&'a self, point: &'a Position) -> impl Iterator<Item = Segment> + 'a {
        self.solid_segments().filter(move |segment| {
            segment.is_point_on_with(point, ExtremityPolicy::IncludeExtremities, None)
        })
    }

    /// Index of the component closest to `point`, with the closest position on it.
    fn closest_component(&self, point: &Position) -> (usize, Position) {
        let mut best = (0, self.points[0], f64::INFINITY);
        for (index, segment) in self.segments().enumerate() {
            let candidate = segment.calculate_closest_point(point);
            let distance = nalgebra::distance(&candidate, point);
            if distance < best.2 {
                best = (index, candidate, distance);
            }
        }
        (best.0, best.1)
    }

    /// Orders points along the chain and drops repeats.
    fn normalize(&self, mut points: Vec<Position>) -> Vec<Position> {
        let key = |p: &Position| self.calculate_relative_position(p);
        points.sort_by(|a, b| key(a).total_cmp(&key(b)));
        points.dedup_by(|a, b| positions_equal(a, b, self.tolerance));
        points
    }

    fn assert_on_both(&self, other: &dyn LinearVector, point: &Position) {
        assert!(
            self.is_point_on(point, ExtremityPolicy::IncludeExtremities)
                && other.is_point_on(point, ExtremityPolicy::IncludeExtremities),
            "point ({}, {}) must lie on both vectors",
            point.x,
            point.y
        );
    }
}

impl LinearVector for PolySegment {
    fn start_point(&self) -> Position {
        self.points[0]
    }

    fn end_point(&self) -> Position {
        self.points[self.points.len() - 1]
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn extent(&self) -> Extent {
        self.segments()
            .map(|segment| segment.extent())
            .reduce(|acc, extent| acc.union(&extent))
            .unwrap_or_else(|| Extent::from_points(&self.points[0], &self.points[0]))
    }

    fn calculate_length(&self) -> f64 {
        self.segments().map(|segment| segment.calculate_length()).sum()
    }

    fn is_point_on(&self, point: &Position, policy: ExtremityPolicy) -> bool {
        let on = self
            .segments()
            .any(|segment| segment.is_point_on_with(point, ExtremityPolicy::AsComputed, None));
        let at_extremity = positions_equal(point, &self.start_point(), self.tolerance)
            || positions_equal(point, &self.end_point(), self.tolerance);
        match policy {
            ExtremityPolicy::AsComputed => on,
            ExtremityPolicy::IncludeExtremities => on || at_extremity,
            ExtremityPolicy::ExcludeExtremities => on && !at_extremity,
        }
    }

    fn calculate_closest_point(&self, point: &Position) -> Position {
        self.closest_component(point).1
    }

    /// Length along the chain to the closest position, over the total length.
    fn calculate_relative_position(&self, point: &Position) -> f64 {
        let total = self.calculate_length();
        if total <= 0.0 {
            return 0.0;
        }
        let (index, closest) = self.closest_component(point);
        let before: f64 = self
            .segments()
            .take(index)
            .map(|segment| segment.calculate_length())
            .sum();
        (before + nalgebra::distance(&self.points[index], &closest)) / total
    }

    fn calculate_bearing(&self, point: &Position, direction: ArbitraryDirection) -> f64 {
        let index = self
            .segments()
            .position(|segment| {
                !segment.is_null()
                    && segment.is_point_on_with(point, ExtremityPolicy::IncludeExtremities, None)
            })
            .unwrap_or_else(|| self.closest_component(point).0);
        self.segments()
            .nth(index)
            .map_or(0.0, |segment| segment.calculate_bearing(point, direction))
    }

    fn crosses(&self, other: &dyn LinearVector) -> bool {
        self.segments().any(|segment| segment.crosses(other))
    }

    fn are_adjacent(&self, other: &dyn LinearVector) -> bool {
        self.solid_segments().any(|segment| segment.are_adjacent(other))
    }

    fn intersect(&self, other: &dyn LinearVector) -> Vec<Position> {
        let points = self
            .segments()
            .flat_map(|segment| segment.intersect(other))
            .collect();
        self.normalize(points)
    }

    fn are_contiguous(&self, other: &dyn LinearVector) -> bool {
        self.solid_segments().any(|segment| segment.are_contiguous(other))
    }

    fn obtain_contiguousness_points(&self, other: &dyn LinearVector) -> Vec<Position> {
        let points = self
            .solid_segments()
            .flat_map(|segment| segment.obtain_contiguousness_points(other))
            .collect();
        self.normalize(points)
    }

    fn are_contiguous_at(&self, other: &dyn LinearVector, point: &Position) -> bool {
        self.assert_on_both(other, point);
        self.segments_through(point).any(|segment| segment.are_contiguous_at(other, point))
    }

    fn are_contiguous_at_and_get(
        &self,
        other: &dyn LinearVector,
        point: &Position,
    ) -> Option<(Position, Position)> {
        self.assert_on_both(other, point);
        self.segments_through(point)
            .find_map(|segment| segment.are_contiguous_at_and_get(other, point))
            .map(|(a, b)| {
                if self.calculate_relative_position(&a) > self.calculate_relative_position(&b) {
                    (b, a)
                } else {
                    (a, b)
                }
            })
    }
}
