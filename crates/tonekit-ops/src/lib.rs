//! # tonekit-ops
//!
//! Interactive tonal adjustments for 8-bit RGBA buffers.
//!
//! This crate holds the editing logic: the adjustment operators, the
//! operator-coalescing state machine that keeps slider drags drift-free,
//! per-channel histograms and a bounded undo history.
//!
//! # Modules
//!
//! - [`curves`] - Mapping functions behind each operator
//! - [`config`] - RON-backed [`SessionConfig`]
//! - [`AdjustmentEngine`] - Operator state, origin snapshot, history
//! - [`HistogramEngine`] - Counts and normalized bars
//! - [`HistoryLog`] - Capped FIFO of titled snapshots
//! - [`EditSession`], [`SharedSession`] - Buffer plus engines, optionally behind a mutex
//!
//! # Example
//!
//! ```rust
//! use tonekit_core::PixelBuffer;
//! use tonekit_ops::{Adjustment, EditSession, SessionConfig};
//!
//! let image = PixelBuffer::filled(8, 8, [90, 120, 160, 255]).unwrap();
//! let mut session = EditSession::open(image, &SessionConfig::default()).unwrap();
//!
//! session.apply(Adjustment::Contrast(30.0)).unwrap();
//! session.apply(Adjustment::Contrast(0.0)).unwrap();
//! assert_eq!(session.buffer().pixel(0, 0).unwrap(), [90, 120, 160, 255]);
//!
//! let titles: Vec<_> = session.history_entries().into_iter().map(|e| e.title).collect();
//! assert_eq!(titles, ["Contrast", "Contrast"]);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - per-pixel loops and histogram counting on rayon

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod engine;
mod error;
mod histogram;
mod history;
mod operator;
mod session;

pub mod config;
pub mod curves;

pub use config::{ContrastBoundary, SessionConfig};
pub use engine::AdjustmentEngine;
pub use error::{OpsError, OpsResult};
pub use histogram::{
    BINS, Channel, Histogram, HistogramBars, HistogramCounts, HistogramEngine, compute_histogram,
};
pub use history::{HistoryEntry, HistoryLog, HistorySummary};
pub use operator::{Adjustment, Operator};
pub use session::{EditSession, SharedSession};
