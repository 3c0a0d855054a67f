//! RGBA pixel buffer.
//!
//! [`PixelBuffer`] is the only image container in tonekit. It stores
//! unsigned 8-bit samples interleaved as `R G B A`, row-major, top to bottom:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! # Ownership
//!
//! Unlike a copy-on-write image, a `PixelBuffer` always owns its samples
//! outright. [`Clone`] duplicates the sample vector and [`copy_from`]
//! overwrites in place, so no two live buffers ever alias.
//!
//! [`copy_from`]: PixelBuffer::copy_from
//!
//! # Usage
//!
//! ```rust
//! use tonekit_core::PixelBuffer;
//!
//! let mut buf = PixelBuffer::new(2, 1).unwrap();
//! buf.set_pixel(1, 0, [200, 100, 50, 255]).unwrap();
//! assert_eq!(buf.pixel(1, 0).unwrap(), [200, 100, 50, 255]);
//! assert_eq!(buf.data().len(), 2 * 1 * 4);
//! ```

use crate::{Error, Result};

/// Number of interleaved channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Exclusively owned RGBA8 sample buffer.
///
/// Invariant: `data.len() == width * height * 4` and both dimensions are
/// positive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    /// Interleaved RGBA samples
    data: Vec<u8>,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
}

/// Computes the sample count for the given dimensions.
fn sample_count(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            "width and height must be > 0",
        ));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "sample count overflows usize"))
}

impl PixelBuffer {
    /// Creates a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = sample_count(width, height)?;
        Ok(Self {
            data: vec![0; len],
            width,
            height,
        })
    }

    /// Tagged constructor for a fresh buffer of the given size.
    ///
    /// Same as [`PixelBuffer::new`].
    #[inline]
    pub fn from_dimensions(width: u32, height: u32) -> Result<Self> {
        Self::new(width, height)
    }

    /// Tagged constructor duplicating an existing buffer.
    #[inline]
    pub fn from_existing(other: &PixelBuffer) -> Self {
        other.clone()
    }

    /// Creates a buffer from existing interleaved RGBA samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if a dimension is zero or
    /// `data.len() != width * height * 4`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tonekit_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::from_data(1, 1, vec![1, 2, 3, 4]).unwrap();
    /// assert!(PixelBuffer::from_data(1, 1, vec![1, 2, 3]).is_err());
    /// ```
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = sample_count(width, height)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a buffer with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: [u8; 4]) -> Result<Self> {
        let len = sample_count(width, height)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / CHANNELS {
            data.extend_from_slice(&pixel);
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the raw interleaved samples mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer, returning its samples.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Iterates over pixels as 4-sample slices.
    #[inline]
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(CHANNELS)
    }

    /// Iterates mutably over pixels as 4-sample slices.
    #[inline]
    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(CHANNELS)
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        Ok((y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    /// Returns the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Result<[u8; 4]> {
        let i = self.offset(x, y)?;
        Ok([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Sets the pixel at (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: [u8; 4]) -> Result<()> {
        let i = self.offset(x, y)?;
        self.data[i..i + CHANNELS].copy_from_slice(&pixel);
        Ok(())
    }

    /// Replaces this buffer's contents with a full duplicate of `source`.
    ///
    /// Shapes may differ; this buffer takes on the source's dimensions and
    /// reuses its allocation when the sample count already matches.
    pub fn copy_from(&mut self, source: &PixelBuffer) {
        self.match_shape(source);
        self.data.copy_from_slice(&source.data);
    }

    /// Resizes this buffer to `other`'s dimensions without copying samples.
    ///
    /// Samples are left untouched when the shapes already match; otherwise
    /// the buffer is reallocated zero-filled. Used by transforms that are
    /// about to overwrite every sample.
    pub fn match_shape(&mut self, other: &PixelBuffer) {
        if self.dimensions() != other.dimensions() {
            self.width = other.width;
            self.height = other.height;
            self.data.clear();
            self.data.resize(other.data.len(), 0);
        }
    }
}
