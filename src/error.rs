use thiserror::Error;

/// Top-level error type for the segment kernel.
#[derive(Debug, Error, PartialEq)]
pub enum LinsegError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("segments are not contiguous")]
    NotContiguous,

    #[error("point ({x}, {y}) does not lie on the segment")]
    PointNotOnSegment { x: f64, y: f64 },
}

/// Convenience type alias for results using [`LinsegError`].
pub type Result<T> = std::result::Result<T, LinsegError>;
