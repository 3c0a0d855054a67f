//! Per-channel tone lookup table.

use tonekit_core::PixelBuffer;

use crate::{ToneLut, map_pixels};

/// Three independent tone tables, one each for R, G and B.
///
/// Each channel is built and clamped on its own; no channel's output feeds
/// another channel's clamp.
///
/// # Example
///
/// ```rust
/// use tonekit_lut::{RgbToneLut, ToneLut};
///
/// let lut = RgbToneLut::new(
///     ToneLut::build(|k| k as f64 + 90.0),
///     ToneLut::identity(),
///     ToneLut::build(|k| k as f64 - 90.0),
/// );
/// assert_eq!(lut.apply_pixel([200, 100, 50, 255]), [255, 100, 0, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RgbToneLut {
    /// Red channel table
    pub r: ToneLut,
    /// Green channel table
    pub g: ToneLut,
    /// Blue channel table
    pub b: ToneLut,
}

impl RgbToneLut {
    /// Creates a per-channel table from three curves.
    pub fn new(r: ToneLut, g: ToneLut, b: ToneLut) -> Self {
        Self { r, g, b }
    }

    /// Uses the same curve on all three channels.
    pub fn uniform(lut: ToneLut) -> Self {
        Self {
            r: lut.clone(),
            g: lut.clone(),
            b: lut,
        }
    }

    /// Maps one RGBA pixel; alpha passes through.
    #[inline]
    pub fn apply_pixel(&self, px: [u8; 4]) -> [u8; 4] {
        [self.r.get(px[0]), self.g.get(px[1]), self.b.get(px[2]), px[3]]
    }

    /// Applies the tables to `src`, returning a new buffer.
    pub fn apply(&self, src: &PixelBuffer) -> PixelBuffer {
        let mut dst = src.clone();
        self.apply_into(src, &mut dst);
        dst
    }

    /// Applies the tables to `src`, writing every sample of `dst`.
    pub fn apply_into(&self, src: &PixelBuffer, dst: &mut PixelBuffer) {
        map_pixels(src, dst, |s, d| {
            d[0] = self.r.get(s[0]);
            d[1] = self.g.get(s[1]);
            d[2] = self.b.get(s[2]);
            d[3] = s[3];
        });
    }
}
