use crate::math::Position;

use super::{Extent, Segment};

/// Outcome of a line or segment intersection query.
///
/// `Parallel` (the supporting lines never meet) and `NoCross` (they meet,
/// but not inside the operands) are distinct answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossState {
    CrossFound,
    Parallel,
    NoCross,
}

/// How a point test treats the extremities of a linear vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtremityPolicy {
    /// Report the raw extent and line-distance result.
    #[default]
    AsComputed,
    /// A point coinciding with an extremity is always on the vector.
    IncludeExtremities,
    /// A point coinciding with an extremity is never on the vector.
    ExcludeExtremities,
}

/// Direction of travel along a linear vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArbitraryDirection {
    /// Towards the start point.
    Alpha,
    /// Towards the end point.
    Beta,
}

/// Capability shared by every open linear vector (segments, chains of segments).
///
/// Binary queries take `&dyn LinearVector`. An implementation that does not
/// know the concrete type of `other` hands the query to `other` with the roles
/// swapped, so every pair of kinds is covered as long as one side knows how to
/// combine with the other. All binary queries are evaluated with the smaller
/// of the two operands' tolerances and are symmetric in their boolean result.
pub trait LinearVector {
    fn start_point(&self) -> Position;

    fn end_point(&self) -> Position;

    fn tolerance(&self) -> f64;

    fn extent(&self) -> Extent;

    fn calculate_length(&self) -> f64;

    /// Whether `point` lies on the vector, filtered by `policy`.
    fn is_point_on(&self, point: &Position, policy: ExtremityPolicy) -> bool;

    fn calculate_closest_point(&self, point: &Position) -> Position;

    /// Monotonic parametric coordinate of a point on the vector, from start to end.
    fn calculate_relative_position(&self, point: &Position) -> f64;

    /// Bearing, in `[0, 2π)`, of the vector at `point` in the given direction.
    fn calculate_bearing(&self, point: &Position, direction: ArbitraryDirection) -> f64;

    /// Same-type fast path used by [`Segment`]'s binary queries.
    fn as_segment(&self) -> Option<&Segment> {
        None
    }

    /// Whether the two vectors cross at a point interior to both.
    fn crosses(&self, other: &dyn LinearVector) -> bool;

    /// Whether the two vectors lie along a common line and touch.
    fn are_adjacent(&self, other: &dyn LinearVector) -> bool;

    /// Interior crossing points with `other`.
    fn intersect(&self, other: &dyn LinearVector) -> Vec<Position>;

    /// Whether the two vectors overlap along a common line.
    fn are_contiguous(&self, other: &dyn LinearVector) -> bool;

    /// Extremities of the overlap with `other`, ordered along `self`.
    ///
    /// Empty when the vectors are not contiguous.
    fn obtain_contiguousness_points(&self, other: &dyn LinearVector) -> Vec<Position>;

    /// Whether the vectors are contiguous at `point`.
    ///
    /// # Panics
    ///
    /// Panics if `point` does not lie on both vectors.
    fn are_contiguous_at(&self, other: &dyn LinearVector, point: &Position) -> bool;

    /// Contiguousness region around `point`, ordered along `self`.
    ///
    /// # Panics
    ///
    /// Panics if `point` does not lie on both vectors.
    fn are_contiguous_at_and_get(
        &self,
        other: &dyn LinearVector,
        point: &Position,
    ) -> Option<(Position, Position)>;

    /// Contiguousness region around `point`, ordered along `self`.
    ///
    /// # Panics
    ///
    /// Panics if `point` does not lie on both vectors or if the vectors are not
    /// contiguous there.
    fn obtain_contiguousness_points_at(
        &self,
        other: &dyn LinearVector,
        point: &Position,
    ) -> (Position, Position) {
        match self.are_contiguous_at_and_get(other, point) {
            Some(points) => points,
            None => panic!("vectors are not contiguous at ({}, {})", point.x, point.y),
        }
    }
}
