//! Mapping functions behind each adjustment operator.
//!
//! Channel-independent operators reduce to a [`ToneLut`] built from a
//! `u8 -> f64` mapping. Grayscale and color balance look at all three
//! channels of a pixel at once and are applied with [`map_pixels`].
//!
//! | Operator     | Mapping (k = input sample)                                   |
//! |--------------|--------------------------------------------------------------|
//! | Invert       | `255 - k`                                                    |
//! | Brightness   | `k + level * 0.9`                                            |
//! | Contrast > 0 | `k + (k - avg) * (1 / (1 - level / 100) - 1)`                |
//! | Contrast <= 0| `k + (k - avg) * level / 100`                                |
//! | Balance      | `k + level_c * 0.9`, per channel, then lightness restored    |
//!
//! `avg` is the mean luma of the buffer the curve will be applied to.

use tonekit_core::{PixelBuffer, hsl_to_rgb, luma, rgb_to_hsl};
use tonekit_lut::{RgbToneLut, ToneLut, map_pixels};

use crate::{ContrastBoundary, OpsError, OpsResult};

/// Lowest accepted slider level.
pub const LEVEL_MIN: f64 = -100.0;

/// Highest accepted slider level.
pub const LEVEL_MAX: f64 = 100.0;

/// Sample shift per unit of brightness or balance level.
pub const LEVEL_SCALE: f64 = 0.9;

/// Clamps a slider level into [-100, 100]. NaN becomes 0.
#[inline]
pub fn clamp_level(level: f64) -> f64 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(LEVEL_MIN, LEVEL_MAX)
    }
}

/// Brightness curve: `k + level * 0.9`.
pub fn brightness_lut(level: f64) -> ToneLut {
    let delta = clamp_level(level) * LEVEL_SCALE;
    ToneLut::build(|k| k as f64 + delta)
}

/// Contrast curve anchored at `gray_avg`.
///
/// At level 100 the stretch factor is infinite. With
/// [`ContrastBoundary::Saturate`] the curve becomes its limit, a threshold
/// at `gray_avg`; with [`ContrastBoundary::Reject`] this returns
/// [`OpsError::ContrastSingularity`].
pub fn contrast_lut(level: f64, gray_avg: f64, boundary: ContrastBoundary) -> OpsResult<ToneLut> {
    let level = clamp_level(level);

    if level >= LEVEL_MAX {
        return match boundary {
            ContrastBoundary::Reject => Err(OpsError::ContrastSingularity { level }),
            ContrastBoundary::Saturate => Ok(ToneLut::build(|k| {
                let k = k as f64;
                if k < gray_avg {
                    0.0
                } else if k > gray_avg {
                    255.0
                } else {
                    k
                }
            })),
        };
    }

    let factor = if level > 0.0 {
        1.0 / (1.0 - level / 100.0) - 1.0
    } else {
        level / 100.0
    };

    Ok(ToneLut::build(|k| {
        let k = k as f64;
        k + (k - gray_avg) * factor
    }))
}

/// Independent per-channel shift used as the first stage of color balance.
pub fn color_balance_lut(red: f64, green: f64, blue: f64) -> RgbToneLut {
    RgbToneLut::new(brightness_lut(red), brightness_lut(green), brightness_lut(blue))
}

/// Writes the grayscale version of `src` into `dst`.
pub fn grayscale_into(src: &PixelBuffer, dst: &mut PixelBuffer) {
    map_pixels(src, dst, |s, d| {
        let y = luma(s[0], s[1], s[2]);
        d[0] = y;
        d[1] = y;
        d[2] = y;
        d[3] = s[3];
    });
}

/// Color-balances one pixel: shift each channel through `lut`, then put
/// back the source pixel's HSL lightness.
#[inline]
pub fn color_balance_pixel(lut: &RgbToneLut, px: [u8; 4]) -> [u8; 4] {
    let shifted = lut.apply_pixel(px);
    let [_, _, lightness] = rgb_to_hsl([px[0], px[1], px[2]]);
    let [hue, saturation, _] = rgb_to_hsl([shifted[0], shifted[1], shifted[2]]);
    let [r, g, b] = hsl_to_rgb([hue, saturation, lightness]);
    [r, g, b, px[3]]
}

/// Writes the color-balanced version of `src` into `dst`.
pub fn color_balance_into(lut: &RgbToneLut, src: &PixelBuffer, dst: &mut PixelBuffer) {
    map_pixels(src, dst, |s, d| {
        let out = color_balance_pixel(lut, [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_level() {
        assert_eq!(clamp_level(150.0), 100.0);
        assert_eq!(clamp_level(-1e9), -100.0);
        assert_eq!(clamp_level(f64::NAN), 0.0);
        assert_eq!(clamp_level(12.5), 12.5);
    }

    #[test]
    fn test_brightness_scenario() {
        // level 50 on 200: clamp(200 + 45) = 245
        assert_eq!(brightness_lut(50.0).get(200), 245);
        assert_eq!(brightness_lut(100.0).get(200), 255);
        assert_eq!(brightness_lut(-100.0).get(50), 0);
        assert!(brightness_lut(0.0).is_identity());
    }

    #[test]
    fn test_brightness_out_of_range_clamps() {
        assert_eq!(brightness_lut(500.0), brightness_lut(100.0));
    }

    #[test]
    fn test_contrast_zero_is_identity() {
        let lut = contrast_lut(0.0, 87.3, ContrastBoundary::Reject).unwrap();
        assert!(lut.is_identity());
    }

    #[test]
    fn test_contrast_positive_stretches_around_mean() {
        // level 50: factor = 1 / 0.5 - 1 = 1
        let lut = contrast_lut(50.0, 100.0, ContrastBoundary::Saturate).unwrap();
        assert_eq!(lut.get(100), 100);
        assert_eq!(lut.get(120), 140);
        assert_eq!(lut.get(80), 60);
        assert_eq!(lut.get(250), 255);
    }

    #[test]
    fn test_contrast_negative_compresses() {
        // level -50: factor = -0.5
        let lut = contrast_lut(-50.0, 100.0, ContrastBoundary::Saturate).unwrap();
        assert_eq!(lut.get(200), 150);
        assert_eq!(lut.get(0), 50);
        // level -100 flattens to the mean
        let flat = contrast_lut(-100.0, 100.0, ContrastBoundary::Saturate).unwrap();
        assert!(flat.entries().iter().all(|&v| v == 100));
    }

    #[test]
    fn test_contrast_boundary_saturate_thresholds() {
        let lut = contrast_lut(100.0, 127.0, ContrastBoundary::Saturate).unwrap();
        assert_eq!(lut.get(0), 0);
        assert_eq!(lut.get(126), 0);
        assert_eq!(lut.get(127), 127);
        assert_eq!(lut.get(128), 255);
    }

    #[test]
    fn test_contrast_boundary_reject() {
        let err = contrast_lut(100.0, 127.0, ContrastBoundary::Reject).unwrap_err();
        assert!(matches!(err, OpsError::ContrastSingularity { level } if level == 100.0));
        // Out-of-range levels clamp onto the boundary.
        assert!(contrast_lut(250.0, 127.0, ContrastBoundary::Reject).is_err());
        assert!(contrast_lut(99.9, 127.0, ContrastBoundary::Reject).is_ok());
    }

    #[test]
    fn test_grayscale_pixel() {
        let src = PixelBuffer::from_data(1, 1, vec![200, 100, 50, 9]).unwrap();
        let mut dst = src.clone();
        grayscale_into(&src, &mut dst);
        assert_eq!(dst.data(), &[124, 124, 124, 9]);
    }

    #[test]
    fn test_balance_channels_clamp_independently() {
        // Red saturates at 255 but must not gate green/blue.
        let lut = color_balance_lut(100.0, 10.0, -10.0);
        assert_eq!(lut.apply_pixel([250, 100, 100, 255]), [255, 109, 91, 255]);
    }

    #[test]
    fn test_balance_preserves_lightness() {
        let lut = color_balance_lut(40.0, -20.0, 0.0);
        let px = [120, 130, 140, 200];
        let out = color_balance_pixel(&lut, px);
        let before = rgb_to_hsl([px[0], px[1], px[2]])[2];
        let after = rgb_to_hsl([out[0], out[1], out[2]])[2];
        assert!((before - after).abs() <= 1.0 / 255.0);
        assert_eq!(out[3], 200);
        assert!(out[0] > out[1], "red should now dominate green: {:?}", out);
    }

    #[test]
    fn test_balance_zero_is_identity() {
        let lut = color_balance_lut(0.0, 0.0, 0.0);
        for px in [[0, 0, 0, 255], [10, 20, 30, 255], [200, 100, 50, 1], [255, 255, 255, 0]] {
            assert_eq!(color_balance_pixel(&lut, px), px);
        }
    }
}
