//! Luma and HSL helpers for 8-bit RGB.
//!
//! - [`luma`] - Rec.601 weighted intensity, rounded to the nearest integer
//! - [`mean_luma`] - average luma of a whole buffer (contrast anchor)
//! - [`rgb_to_hsl`] / [`hsl_to_rgb`] - standard HSL with hue in [0, 1)
//!
//! Rounding is half-away-from-zero throughout ([`f64::round`]).

use crate::PixelBuffer;

/// Rec.601 luma weights, in thousandths.
pub const LUMA_WEIGHTS: [u32; 3] = [299, 587, 114];

/// Weighted grayscale intensity: `round((299 r + 587 g + 114 b) / 1000)`.
///
/// # Example
///
/// ```rust
/// use tonekit_core::luma;
///
/// assert_eq!(luma(255, 255, 255), 255);
/// assert_eq!(luma(10, 20, 30), 18);
/// ```
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let sum = LUMA_WEIGHTS[0] * r as u32 + LUMA_WEIGHTS[1] * g as u32 + LUMA_WEIGHTS[2] * b as u32;
    // Non-negative, so +500 then truncate is round-half-away-from-zero.
    ((sum + 500) / 1000) as u8
}

/// Mean of the per-pixel (rounded) luma over every pixel of `buffer`.
pub fn mean_luma(buffer: &PixelBuffer) -> f64 {
    let total: u64 = buffer
        .pixels()
        .map(|px| luma(px[0], px[1], px[2]) as u64)
        .sum();
    total as f64 / buffer.pixel_count() as f64
}

/// Converts 8-bit RGB to `[hue, saturation, lightness]`, each in [0, 1].
///
/// Hue is expressed as a fraction of a full turn (60 degree sectors are
/// sixths). Achromatic inputs have hue and saturation 0.
pub fn rgb_to_hsl(rgb: [u8; 3]) -> [f64; 3] {
    let r = rgb[0] as f64 / 255.0;
    let g = rgb[1] as f64 / 255.0;
    let b = rgb[2] as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return [0.0, 0.0, l];
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    [h / 6.0, s, l]
}

/// Converts `[hue, saturation, lightness]` back to 8-bit RGB.
pub fn hsl_to_rgb(hsl: [f64; 3]) -> [u8; 3] {
    let [h, s, l] = hsl;

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    };

    [to_u8(r), to_u8(g), to_u8(b)]
}

/// Reconstructs one channel from the HSL intermediates.
#[inline]
fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

#[inline]
fn to_u8(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_luma_rounding() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(255, 255, 255), 255);
        // 299*200 + 587*100 + 114*50 = 124200 -> 124.2
        assert_eq!(luma(200, 100, 50), 124);
        // 299*1 + 587*1 + 114*0 = 886 -> 0.886
        assert_eq!(luma(1, 1, 0), 1);
    }

    #[test]
    fn test_mean_luma() {
        let buf = PixelBuffer::from_data(2, 1, vec![10, 20, 30, 255, 200, 100, 50, 255]).unwrap();
        assert_abs_diff_eq!(mean_luma(&buf), (18.0 + 124.0) / 2.0);
    }

    #[test]
    fn test_hsl_primaries() {
        let red = rgb_to_hsl([255, 0, 0]);
        assert_abs_diff_eq!(red[0], 0.0);
        assert_abs_diff_eq!(red[1], 1.0);
        assert_abs_diff_eq!(red[2], 0.5);

        let green = rgb_to_hsl([0, 255, 0]);
        assert_abs_diff_eq!(green[0], 1.0 / 3.0, epsilon = 1e-12);

        let blue = rgb_to_hsl([0, 0, 255]);
        assert_abs_diff_eq!(blue[0], 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hsl_gray_is_achromatic() {
        let gray = rgb_to_hsl([128, 128, 128]);
        assert_eq!(gray[0], 0.0);
        assert_eq!(gray[1], 0.0);
        assert_eq!(hsl_to_rgb(gray), [128, 128, 128]);
    }

    #[test]
    fn test_hsl_roundtrip_exact_on_u8() {
        for &rgb in &[[10u8, 20, 30], [200, 100, 50], [0, 255, 128], [1, 2, 3], [254, 0, 1]] {
            assert_eq!(hsl_to_rgb(rgb_to_hsl(rgb)), rgb, "roundtrip {:?}", rgb);
        }
    }
}
