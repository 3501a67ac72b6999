//! Grid errors

use thiserror::Error;

/// Errors raised by fallible grid operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Linear index outside a [`BitVec`](crate::BitVec)
    #[error("index {index} is out of bounds for a bit vector of size {size}")]
    OutOfBounds { index: usize, size: usize },
    /// Coordinates outside a 2D grid
    #[error("position ({x}, {y}) is out of bounds for a {width}x{height} grid")]
    CoordinatesOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// Raw buffer length does not match the declared dimensions
    #[error("expected {expected} bytes of raw data, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// Text could not be laid out as ASCII
    #[error("character {char:?} at index {index} is not ASCII")]
    NonAsciiChar { index: usize, char: char },
    /// A text layout needs at least one column
    #[error("grid width must be greater than zero")]
    ZeroWidth,
}
