//! # tonekit-lut
//!
//! Tone lookup tables for 8-bit RGBA editing.
//!
//! Every channel-independent adjustment in tonekit (invert, brightness,
//! contrast, the color-balance shift) is a mapping `u8 -> f64` evaluated
//! once per input value, clamped to [0, 255] and rounded. The resulting
//! 256 entries are then applied per pixel with an O(1) lookup.
//!
//! # LUT Types
//!
//! - [`ToneLut`] - one curve shared by R, G and B
//! - [`RgbToneLut`] - an independent curve per channel
//!
//! [`map_pixels`] is the shared per-pixel driver; the adjustment engine also
//! uses it for the joint-channel operators (grayscale, color balance).
//!
//! Alpha is never looked up; it is copied through unchanged.
//!
//! # Usage
//!
//! ```rust
//! use tonekit_core::PixelBuffer;
//! use tonekit_lut::ToneLut;
//!
//! let lut = ToneLut::build(|k| 255.0 - k as f64);
//! let src = PixelBuffer::from_data(1, 1, vec![10, 20, 30, 255]).unwrap();
//! let out = lut.apply(&src);
//! assert_eq!(out.data(), &[245, 235, 225, 255]);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - apply tables across pixels with rayon

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod pixels;
mod rgb;
mod tone;

pub use pixels::map_pixels;
pub use rgb::RgbToneLut;
pub use tone::{LUT_SIZE, ToneLut, quantize};

/// `true` when per-pixel loops run on rayon in this build.
pub const PARALLEL: bool = cfg!(feature = "parallel");
