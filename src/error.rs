//! Error types for filter invocations.
//!
//! Every entry point validates its inputs before touching the buffer, so a
//! returned error always means the caller's pixels are unchanged.

use thiserror::Error;

/// Error type for filter operations.
#[derive(Error, Debug)]
pub enum FilterError {
    /// Width or height is zero or negative.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    /// A filter parameter or the buffer length is unusable.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A computed pixel coordinate fell outside the image.
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} image")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    /// The flat buffer could not be viewed as (height, width, 4).
    #[error("buffer shape: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;
