//! # Picker Error Types
//!
//! All errors that can occur while building or driving the boot picker.

use bootpick_core::ImageError;
use thiserror::Error;

use crate::label::EntryKind;

/// Errors that can occur in the boot picker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    /// An entry, its label or a scene slot could not be allocated.
    #[error("out of memory")]
    OutOfMemory,

    /// Decoded image dimensions or byte length disagree with the header.
    #[error("invalid image data: {0}")]
    InvalidImageData(ImageError),

    /// No labeling strategy could produce a label for the entry.
    #[error("entry kind {0:?} has no usable label")]
    UnsupportedEntryKind(EntryKind),

    /// A reference asset does not match the fixed layout metrics.
    #[error("{asset} is {actual}, layout requires {expected}")]
    ConfigurationMismatch {
        /// Which asset dimension mismatched.
        asset: &'static str,
        /// Required value.
        expected: u32,
        /// Supplied value.
        actual: u32,
    },

    /// An internal scene invariant does not hold.
    #[error("scene invariant violated: {0}")]
    StructuralViolation(&'static str),

    /// The TOML configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PickerError {
    /// Reports a broken scene invariant.
    ///
    /// Fatal in debug builds. Release builds hand the error back so the
    /// current operation stops before it corrupts more state.
    pub(crate) fn structural(what: &'static str) -> Self {
        tracing::error!(what, "scene invariant violated");
        if cfg!(debug_assertions) {
            panic!("scene invariant violated: {what}");
        }
        Self::StructuralViolation(what)
    }
}

impl From<ImageError> for PickerError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::OutOfMemory(_) => Self::OutOfMemory,
            other => Self::InvalidImageData(other),
        }
    }
}

/// Result type for picker operations.
pub type PickerResult<T> = Result<T, PickerError>;
