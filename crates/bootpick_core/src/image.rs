//! # Images
//!
//! Rectangular BGRA pixel buffers. The fourth channel of every pixel doubles
//! as the "painted" marker the hit-tester reads: zero is transparent, anything
//! else is visible content.

use bytemuck::{Pod, Zeroable};

use crate::error::{ImageError, ImageResult};

/// A single framebuffer pixel in firmware BGRA order.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Pixel {
    /// Blue channel.
    pub blue: u8,
    /// Green channel.
    pub green: u8,
    /// Red channel.
    pub red: u8,
    /// Alpha channel, also the hit-test marker.
    pub reserved: u8,
}

impl Pixel {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 0xFF);
    /// Opaque white.
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF, 0xFF);

    /// Creates a pixel from its channels in memory order.
    #[must_use]
    pub const fn new(blue: u8, green: u8, red: u8, reserved: u8) -> Self {
        Self {
            blue,
            green,
            red,
            reserved,
        }
    }

    /// Creates an opaque grey pixel.
    #[must_use]
    pub const fn grey(level: u8) -> Self {
        Self::new(level, level, level, 0xFF)
    }

    /// Returns true if this pixel carries visible content.
    #[inline]
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.reserved != 0
    }
}

/// An owned rectangular pixel buffer.
///
/// Invariant: `pixels.len() == width * height`, both dimensions non-zero.
/// Images that several scene objects show at once are shared through
/// `Rc<Image>` by the owner rather than copied.
#[derive(Debug, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Image {
    /// Wraps an existing pixel buffer, validating its length.
    ///
    /// # Errors
    ///
    /// [`ImageError::ZeroSized`] for empty dimensions and
    /// [`ImageError::LengthMismatch`] if the buffer size disagrees with them.
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> ImageResult<Self> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(ImageError::LengthMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates an image with every pixel set to `pixel`.
    ///
    /// # Errors
    ///
    /// Fails on empty dimensions or when the buffer cannot be allocated.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> ImageResult<Self> {
        let count = pixel_count(width, height)?;
        let mut pixels = try_alloc(count)?;
        pixels.resize(count, pixel);
        Self::new(width, height, pixels)
    }

    /// Copies raw BGRA bytes (4 bytes per pixel, row-major) into an image.
    ///
    /// # Errors
    ///
    /// [`ImageError::Truncated`] if `bytes` is not whole pixels, otherwise the
    /// same failures as [`Image::new`].
    pub fn from_bgra_bytes(width: u32, height: u32, bytes: &[u8]) -> ImageResult<Self> {
        let source: &[Pixel] =
            bytemuck::try_cast_slice(bytes).map_err(|_| ImageError::Truncated(bytes.len()))?;
        let mut pixels = try_alloc(source.len())?;
        pixels.extend_from_slice(source);
        Self::new(width, height, pixels)
    }

    /// Returns a deep copy, reporting allocation failure instead of aborting.
    ///
    /// # Errors
    ///
    /// [`ImageError::OutOfMemory`] if the copy cannot be allocated.
    pub fn try_clone(&self) -> ImageResult<Self> {
        let mut pixels = try_alloc(self.pixels.len())?;
        pixels.extend_from_slice(&self.pixels);
        Ok(Self {
            width: self.width,
            height: self.height,
            pixels,
        })
    }

    /// Image width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// All pixels in row-major order.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// The pixels as raw BGRA bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// One row of pixels, or `None` past the bottom edge.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[Pixel]> {
        if y >= self.height {
            return None;
        }
        let width = self.width as usize;
        let start = y as usize * width;
        self.pixels.get(start..start + width)
    }

    /// The pixel at `(x, y)`, or `None` out of bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width {
            return None;
        }
        self.row(y).map(|row| row[x as usize])
    }
}

fn pixel_count(width: u32, height: u32) -> ImageResult<usize> {
    if width == 0 || height == 0 {
        return Err(ImageError::ZeroSized { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(ImageError::OutOfMemory(usize::MAX))
}

fn try_alloc(count: usize) -> ImageResult<Vec<Pixel>> {
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(count)
        .map_err(|_| ImageError::OutOfMemory(count))?;
    Ok(pixels)
}
