//! Error types for adjustment operations.

use thiserror::Error;

/// Error type for adjustment, history and configuration operations.
///
/// Every variant is raised before any buffer, history entry or operator
/// state is touched.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Restore was requested before an origin snapshot was captured.
    #[error("no origin captured: call capture_origin before restore")]
    NoOriginCaptured,

    /// Contrast reached the singular point of its curve and the engine is
    /// configured to reject it.
    #[error("contrast level {level} is at the singular boundary (100)")]
    ContrastSingularity {
        /// Requested level after range clamping
        level: f64,
    },

    /// A history index does not name an entry.
    #[error("history index {index} out of range (len {len})")]
    HistoryIndex {
        /// Requested index
        index: usize,
        /// Current history length
        len: usize,
    },

    /// Configuration value out of range or unparsable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// An adjustment string could not be parsed.
    #[error("invalid adjustment '{input}': {reason}")]
    InvalidAdjustment {
        /// Text that failed to parse
        input: String,
        /// What was wrong with it
        reason: String,
    },

    /// Buffer construction error.
    #[error(transparent)]
    Core(#[from] tonekit_core::Error),

    /// I/O error while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for adjustment operations.
pub type OpsResult<T> = Result<T, OpsError>;
