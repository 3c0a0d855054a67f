//! Single-curve tone lookup table.

use tonekit_core::PixelBuffer;

use crate::map_pixels;

/// Number of entries in a tone table (one per 8-bit input value).
pub const LUT_SIZE: usize = 256;

/// Clamps a mapped value into [0, 255] and rounds half away from zero.
///
/// NaN maps to 0.
///
/// # Example
///
/// ```rust
/// use tonekit_lut::quantize;
///
/// assert_eq!(quantize(-3.0), 0);
/// assert_eq!(quantize(127.5), 128);
/// assert_eq!(quantize(300.0), 255);
/// ```
#[inline]
pub fn quantize(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round() as u8
}

/// A 256-entry lookup table applied identically to R, G and B.
///
/// # Example
///
/// ```rust
/// use tonekit_lut::ToneLut;
///
/// // Brightness +50: delta = 50 * 0.9
/// let lut = ToneLut::build(|k| k as f64 + 45.0);
/// assert_eq!(lut.get(200), 245);
/// assert_eq!(lut.get(250), 255);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneLut {
    entries: [u8; LUT_SIZE],
}

impl Default for ToneLut {
    fn default() -> Self {
        Self::identity()
    }
}

impl ToneLut {
    /// Builds a table by evaluating `mapping` once for every input 0..=255.
    ///
    /// Each result is clamped to [0, 255] and rounded (see [`quantize`]).
    pub fn build<F>(mapping: F) -> Self
    where
        F: Fn(u8) -> f64,
    {
        let mut entries = [0u8; LUT_SIZE];
        for (k, entry) in entries.iter_mut().enumerate() {
            *entry = quantize(mapping(k as u8));
        }
        Self { entries }
    }

    /// Creates the pass-through table.
    pub fn identity() -> Self {
        Self::build(|k| k as f64)
    }

    /// Creates the negative table `255 - k`.
    pub fn invert() -> Self {
        Self::build(|k| 255.0 - k as f64)
    }

    /// Creates a table from precomputed entries.
    pub fn from_entries(entries: [u8; LUT_SIZE]) -> Self {
        Self { entries }
    }

    /// Returns the table entries.
    #[inline]
    pub fn entries(&self) -> &[u8; LUT_SIZE] {
        &self.entries
    }

    /// Looks up the output for one input value.
    #[inline]
    pub fn get(&self, input: u8) -> u8 {
        self.entries[input as usize]
    }

    /// Returns `true` if every entry maps to itself.
    pub fn is_identity(&self) -> bool {
        self.entries.iter().enumerate().all(|(k, &v)| k == v as usize)
    }

    /// Maps one RGBA pixel; alpha passes through.
    #[inline]
    pub fn apply_pixel(&self, px: [u8; 4]) -> [u8; 4] {
        [self.get(px[0]), self.get(px[1]), self.get(px[2]), px[3]]
    }

    /// Applies the table to `src`, returning a new buffer.
    pub fn apply(&self, src: &PixelBuffer) -> PixelBuffer {
        let mut dst = src.clone();
        self.apply_into(src, &mut dst);
        dst
    }

    /// Applies the table to `src`, writing every sample of `dst`.
    ///
    /// `dst` takes on `src`'s dimensions.
    pub fn apply_into(&self, src: &PixelBuffer, dst: &mut PixelBuffer) {
        map_pixels(src, dst, |s, d| {
            d[0] = self.entries[s[0] as usize];
            d[1] = self.entries[s[1] as usize];
            d[2] = self.entries[s[2] as usize];
            d[3] = s[3];
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let lut = ToneLut::identity();
        assert!(lut.is_identity());
        assert_eq!(lut, ToneLut::default());
    }

    #[test]
    fn test_build_clamps_and_rounds() {
        let lut = ToneLut::build(|k| k as f64 * 2.0 - 10.25);
        assert_eq!(lut.get(0), 0);
        assert_eq!(lut.get(10), 10); // 9.75 -> 10
        assert_eq!(lut.get(200), 255);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        let lut = ToneLut::build(|k| k as f64 + 0.5);
        assert_eq!(lut.get(0), 1);
        assert_eq!(lut.get(1), 2);
        assert_eq!(lut.get(255), 255);
    }

    #[test]
    fn test_invert_scenario() {
        let src = PixelBuffer::from_data(2, 1, vec![10, 20, 30, 255, 200, 100, 50, 255]).unwrap();
        let out = ToneLut::invert().apply(&src);
        assert_eq!(out.data(), &[245, 235, 225, 255, 55, 155, 205, 255]);
    }

    #[test]
    fn test_alpha_untouched() {
        let src = PixelBuffer::from_data(1, 2, vec![0, 0, 0, 7, 255, 255, 255, 0]).unwrap();
        let out = ToneLut::build(|_| 128.0).apply(&src);
        assert_eq!(out.data(), &[128, 128, 128, 7, 128, 128, 128, 0]);
    }

    #[test]
    fn test_apply_into_reshapes_destination() {
        let src = PixelBuffer::filled(3, 3, [1, 2, 3, 4]).unwrap();
        let mut dst = PixelBuffer::new(1, 1).unwrap();
        ToneLut::identity().apply_into(&src, &mut dst);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_nan_quantizes_to_zero() {
        assert_eq!(quantize(f64::NAN), 0);
        assert_eq!(quantize(f64::INFINITY), 255);
        assert_eq!(quantize(f64::NEG_INFINITY), 0);
    }
}
