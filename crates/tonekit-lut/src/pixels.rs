//! Pixel-wise buffer mapping, parallel across rows when the `parallel`
//! feature is enabled.

use tonekit_core::{CHANNELS, PixelBuffer};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Maps every pixel of `src` into the same position of `dst`.
///
/// `dst` is reshaped to `src`'s dimensions first. `f` receives one source
/// pixel and the matching destination pixel (both 4 samples) and must
/// write all four destination samples. Pixels are independent, so the
/// result does not depend on scheduling.
///
/// # Example
///
/// ```rust
/// use tonekit_core::PixelBuffer;
/// use tonekit_lut::map_pixels;
///
/// let src = PixelBuffer::from_data(1, 1, vec![1, 2, 3, 4]).unwrap();
/// let mut dst = PixelBuffer::new(1, 1).unwrap();
/// map_pixels(&src, &mut dst, |s, d| {
///     d[0] = s[2];
///     d[1] = s[1];
///     d[2] = s[0];
///     d[3] = s[3];
/// });
/// assert_eq!(dst.data(), &[3, 2, 1, 4]);
/// ```
pub fn map_pixels<F>(src: &PixelBuffer, dst: &mut PixelBuffer, f: F)
where
    F: Fn(&[u8], &mut [u8]) + Sync + Send,
{
    dst.match_shape(src);
    let row_len = src.width() as usize * CHANNELS;

    #[cfg(feature = "parallel")]
    {
        dst.data_mut()
            .par_chunks_mut(row_len)
            .zip(src.data().par_chunks(row_len))
            .for_each(|(d_row, s_row)| map_row(s_row, d_row, &f));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (d_row, s_row) in dst.data_mut().chunks_mut(row_len).zip(src.data().chunks(row_len)) {
            map_row(s_row, d_row, &f);
        }
    }
}

#[inline]
fn map_row<F>(src: &[u8], dst: &mut [u8], f: &F)
where
    F: Fn(&[u8], &mut [u8]),
{
    for (d, s) in dst
        .chunks_exact_mut(CHANNELS)
        .zip(src.chunks_exact(CHANNELS))
    {
        f(s, d);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_pixels_covers_every_pixel() {
        let src = PixelBuffer::filled(17, 9, [1, 1, 1, 1]).unwrap();
        let mut dst = PixelBuffer::new(2, 2).unwrap();
        map_pixels(&src, &mut dst, |s, d| {
            for c in 0..4 {
                d[c] = s[c] + 1;
            }
        });
        assert_eq!(dst.dimensions(), (17, 9));
        assert!(dst.data().iter().all(|&v| v == 2));
    }
}
