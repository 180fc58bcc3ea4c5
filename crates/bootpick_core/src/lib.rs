//! # Boot Picker Core
//!
//! Building blocks underneath the boot picker scene graph:
//! - A generational slot pool that stores scene objects behind stable handles
//! - The BGRA pixel/image model handed to the firmware compositor
//! - Integer rectangles and the child clipping primitive
//!
//! ## Architecture Rules
//!
//! 1. **No UI semantics** - nothing here knows what a boot entry is
//! 2. **Fallible allocation** - exhausting memory yields an error value
//! 3. **Integer geometry** - screen space is `i64` positions and `u32` extents
//!
//! ## Example
//!
//! ```rust,ignore
//! use bootpick_core::{Image, Pixel};
//!
//! let icon = Image::filled(128, 128, Pixel::BLACK)?;
//! assert!(icon.pixel(0, 0).unwrap().is_opaque());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod geometry;
pub mod image;
pub mod memory;

pub use error::ImageError;
pub use geometry::{clip_child_bounds, Rect};
pub use image::{Image, Pixel};
pub use memory::{Handle, Pool};
