pub mod extent;
pub mod line;
pub mod linear;
pub mod poly_segment;
pub mod segment;

pub use extent::Extent;
pub use line::Line;
pub use linear::{ArbitraryDirection, CrossState, ExtremityPolicy, LinearVector};
pub use poly_segment::PolySegment;
pub use segment::Segment;
