//! # tonekit-core
//!
//! Core types for interactive tonal editing of 8-bit RGBA images.
//!
//! This crate provides the foundational types used throughout tonekit:
//!
//! - [`PixelBuffer`] - Exclusively owned, interleaved RGBA sample buffer
//! - [`luma`], [`mean_luma`] - Rec.601 integer luma
//! - [`rgb_to_hsl`], [`hsl_to_rgb`] - HSL conversion used by color balance
//! - [`Error`], [`Result`] - Precondition violations on buffer construction
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. All other tonekit crates
//! depend on `tonekit-core`:
//!
//! ```text
//! tonekit-core (this crate)
//!    ^
//!    |
//!    +-- tonekit-lut (256-entry tone lookup tables)
//!    +-- tonekit-ops (adjustment engine, histogram, history)
//!    +-- tonekit-cli (PNG front end)
//! ```
//!
//! ## Ownership
//!
//! A [`PixelBuffer`] never shares its samples. Cloning always duplicates the
//! sample vector, so a history snapshot, an adjustment baseline and the live
//! buffer can never observe each other's writes.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod color;
pub mod error;

// Re-exports for convenience
pub use buffer::{CHANNELS, PixelBuffer};
pub use color::{hsl_to_rgb, luma, mean_luma, rgb_to_hsl};
pub use error::{Error, Result};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use tonekit_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::{CHANNELS, PixelBuffer};
    pub use crate::color::{hsl_to_rgb, luma, mean_luma, rgb_to_hsl};
    pub use crate::error::{Error, Result};
}
