//! Per-channel brightness histograms.
//!
//! [`HistogramCounts`] holds three 256-bin counts (red, green, blue) and
//! their maxima. It is always recomputed from scratch; there is no
//! incremental update.
//!
//! [`HistogramCounts::normalize`] turns counts into bar heights. Each
//! channel is stretched independently so its tallest bin reaches the target
//! height, regardless of how it compares to the other channels:
//!
//! ```text
//! height[k] = round(count[k] / (channel_max / target_height))
//! ```
//!
//! [`HistogramEngine`] applies the configured height and headroom (default
//! `100 * 0.9`, leaving a margin at the top of the chart).

use tonekit_core::{CHANNELS, PixelBuffer};
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::SessionConfig;
use crate::config::{DEFAULT_HISTOGRAM_HEADROOM, DEFAULT_HISTOGRAM_HEIGHT};

/// Number of bins per channel.
pub const BINS: usize = 256;

/// Samples per parallel work item.
#[cfg(feature = "parallel")]
const CHUNK_SAMPLES: usize = 64 * 1024;

/// Color channel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red samples
    Red,
    /// Green samples
    Green,
    /// Blue samples
    Blue,
}

impl Channel {
    /// All color channels in storage order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    #[inline]
    const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

type Bins = [[u64; BINS]; 3];

/// Raw per-channel bin counts of one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramCounts {
    bins: Bins,
    maxima: [u64; 3],
}

fn count_samples(samples: &[u8], bins: &mut Bins) {
    for px in samples.chunks_exact(CHANNELS) {
        bins[0][px[0] as usize] += 1;
        bins[1][px[1] as usize] += 1;
        bins[2][px[2] as usize] += 1;
    }
}

#[cfg(feature = "parallel")]
fn merge(mut a: Bins, b: Bins) -> Bins {
    for (ca, cb) in a.iter_mut().zip(b.iter()) {
        for (x, y) in ca.iter_mut().zip(cb.iter()) {
            *x += *y;
        }
    }
    a
}

impl HistogramCounts {
    /// Counts every pixel of `buffer`.
    pub fn compute(buffer: &PixelBuffer) -> Self {
        let (width, height) = buffer.dimensions();
        trace!(width, height, "histogram::compute");

        #[cfg(feature = "parallel")]
        let bins = buffer
            .data()
            .par_chunks(CHUNK_SAMPLES)
            .fold(
                || [[0u64; BINS]; 3],
                |mut acc, chunk| {
                    count_samples(chunk, &mut acc);
                    acc
                },
            )
            .reduce(|| [[0u64; BINS]; 3], merge);

        #[cfg(not(feature = "parallel"))]
        let bins = {
            let mut acc = [[0u64; BINS]; 3];
            count_samples(buffer.data(), &mut acc);
            acc
        };

        Self::from_bins(bins)
    }

    fn from_bins(bins: Bins) -> Self {
        let max_of = |c: &[u64; BINS]| c.iter().copied().max().unwrap_or(0);
        let maxima = [max_of(&bins[0]), max_of(&bins[1]), max_of(&bins[2])];
        Self { bins, maxima }
    }

    /// Bin counts for one channel.
    #[inline]
    pub fn channel(&self, channel: Channel) -> &[u64; BINS] {
        &self.bins[channel.index()]
    }

    /// Red bin counts.
    #[inline]
    pub fn red(&self) -> &[u64; BINS] {
        self.channel(Channel::Red)
    }

    /// Green bin counts.
    #[inline]
    pub fn green(&self) -> &[u64; BINS] {
        self.channel(Channel::Green)
    }

    /// Blue bin counts.
    #[inline]
    pub fn blue(&self) -> &[u64; BINS] {
        self.channel(Channel::Blue)
    }

    /// Largest bin count of one channel.
    #[inline]
    pub fn max(&self, channel: Channel) -> u64 {
        self.maxima[channel.index()]
    }

    /// Largest bin count across all three channels.
    #[inline]
    pub fn global_max(&self) -> u64 {
        self.maxima.iter().copied().max().unwrap_or(0)
    }

    /// Sum of one channel's bins (equals the pixel count).
    pub fn total(&self, channel: Channel) -> u64 {
        self.channel(channel).iter().sum()
    }

    /// Scales each channel so its tallest bin is `target_height`.
    ///
    /// A channel whose maximum is zero yields all-zero bars.
    pub fn normalize(&self, target_height: f64) -> HistogramBars {
        let scale = |channel: Channel| -> [u32; BINS] {
            let max = self.max(channel);
            let mut bars = [0u32; BINS];
            if max == 0 {
                return bars;
            }
            let per_unit = max as f64 / target_height;
            for (bar, &count) in bars.iter_mut().zip(self.channel(channel).iter()) {
                *bar = (count as f64 / per_unit).round() as u32;
            }
            bars
        };
        HistogramBars {
            red: scale(Channel::Red),
            green: scale(Channel::Green),
            blue: scale(Channel::Blue),
            target_height,
        }
    }
}

/// Rendered bar heights, one array per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBars {
    /// Red bar heights
    pub red: [u32; BINS],
    /// Green bar heights
    pub green: [u32; BINS],
    /// Blue bar heights
    pub blue: [u32; BINS],
    /// Height the tallest bar of each channel was scaled to
    pub target_height: f64,
}

impl HistogramBars {
    /// Bar heights for one channel.
    pub fn channel(&self, channel: Channel) -> &[u32; BINS] {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }
}

/// Counts plus the bars derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Raw counts
    pub counts: HistogramCounts,
    /// Normalized bars
    pub bars: HistogramBars,
}

/// Computes counts and bars normalized to exactly `target_height`.
pub fn compute_histogram(buffer: &PixelBuffer, target_height: f64) -> Histogram {
    let counts = HistogramCounts::compute(buffer);
    let bars = counts.normalize(target_height);
    Histogram { counts, bars }
}

/// Histogram renderer settings: chart height and the fraction of it used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramEngine {
    height: f64,
    headroom: f64,
}

impl Default for HistogramEngine {
    fn default() -> Self {
        Self {
            height: DEFAULT_HISTOGRAM_HEIGHT,
            headroom: DEFAULT_HISTOGRAM_HEADROOM,
        }
    }
}

impl HistogramEngine {
    /// Creates an engine with explicit height and headroom.
    pub fn new(height: f64, headroom: f64) -> Self {
        Self { height, headroom }
    }

    /// Takes height and headroom from a session config.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.histogram_height, config.histogram_headroom)
    }

    /// Height the tallest bar reaches: `height * headroom`.
    #[inline]
    pub fn bar_height(&self) -> f64 {
        self.height * self.headroom
    }

    /// Full chart height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Computes counts and bars for `buffer`.
    pub fn compute(&self, buffer: &PixelBuffer) -> Histogram {
        compute_histogram(buffer, self.bar_height())
    }
}
