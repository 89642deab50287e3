pub mod angle;
pub mod tolerance;

pub use tolerance::Precision;

/// 2D position type.
pub type Position = nalgebra::Point2<f64>;

/// 2D displacement (difference of two positions).
pub type Displacement = nalgebra::Vector2<f64>;

/// Slope magnitude above which a non-vertical line is treated as numerically vertical.
pub const NEAR_VERTICAL_SLOPE: f64 = 1000.0;
