//! Argument-error taxonomy for the core engine.

use thiserror::Error;

/// Catch-all error for this crate. The core engine never reaches any of
/// these once its arguments are validated; they are reported at the API
/// boundary before any computation starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// `L` must be at least 1 (a length-1 path is just the pixel itself).
    #[error("path length L must be at least 1, got {0}")]
    InvalidPathLength(u32),
    /// Width or height is zero.
    #[error("raster dimensions must be non-zero, got {nx}x{ny}")]
    InvalidDimensions {
        /// Width.
        nx: usize,
        /// Height.
        ny: usize,
    },
    /// The supplied pixel buffer doesn't match `nx * ny`.
    #[error("pixel buffer length {actual} does not match {nx}x{ny} = {expected}")]
    BufferSizeMismatch {
        /// Width.
        nx: usize,
        /// Height.
        ny: usize,
        /// Expected buffer length, `nx * ny`.
        expected: usize,
        /// Buffer length actually supplied.
        actual: usize,
    },
}

/// Convenience alias for this crate's fallible operations.
pub type Result<T> = std::result::Result<T, Error>;
