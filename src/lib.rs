pub mod error;
pub mod geometry;
pub mod math;

pub use error::{GeometryError, LinsegError, Result};
pub use geometry::{
    ArbitraryDirection, CrossState, Extent, ExtremityPolicy, Line, LinearVector, PolySegment,
    Segment,
};
pub use math::{Displacement, Position, Precision};
