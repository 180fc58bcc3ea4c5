//! # Image Error Types
//!
//! Failures while constructing or copying pixel buffers.

use thiserror::Error;

/// Errors that can occur while building an [`Image`](crate::Image).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// The pixel buffer does not hold exactly `width * height` pixels.
    #[error("pixel buffer holds {actual} pixels, {width}x{height} needs {expected}")]
    LengthMismatch {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
        /// Pixels required by the declared dimensions.
        expected: usize,
        /// Pixels actually supplied.
        actual: usize,
    },

    /// One of the dimensions is zero.
    #[error("image dimensions {width}x{height} are empty")]
    ZeroSized {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },

    /// Raw bytes are not a whole number of BGRA pixels.
    #[error("raw pixel data is {0} bytes, not a multiple of 4")]
    Truncated(usize),

    /// An encoded image is too short to hold its own header.
    #[error("encoded image of {0} bytes is shorter than its header")]
    HeaderTruncated(usize),

    /// The pixel buffer could not be allocated.
    #[error("out of memory allocating {0} pixels")]
    OutOfMemory(usize),
}

/// Result type for image operations.
pub type ImageResult<T> = Result<T, ImageError>;
