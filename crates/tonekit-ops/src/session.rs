//! Editing sessions: live buffer plus the engines that act on it.
//!
//! [`EditSession`] is the single-threaded unit of editing. [`SharedSession`]
//! puts one behind a mutex so every call, including the baseline capture
//! inside the engine, happens atomically when calls come from several
//! threads.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tonekit_core::PixelBuffer;
use tracing::debug;

use crate::{
    Adjustment, AdjustmentEngine, Histogram, HistogramEngine, HistorySummary, OpsResult,
    SessionConfig,
};

/// Live buffer with its adjustment and histogram engines.
#[derive(Debug, Clone)]
pub struct EditSession {
    buffer: PixelBuffer,
    engine: AdjustmentEngine,
    histogram: HistogramEngine,
}

impl EditSession {
    /// Starts a session on `buffer`, capturing it as the origin.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidConfig`](crate::OpsError::InvalidConfig) if the
    /// config fails validation.
    pub fn open(buffer: PixelBuffer, config: &SessionConfig) -> OpsResult<Self> {
        config.validate()?;
        let mut engine = AdjustmentEngine::with_config(config);
        engine.capture_origin(&buffer);
        let (width, height) = buffer.dimensions();
        debug!(width, height, capacity = config.history_capacity, "Opened edit session");
        Ok(Self {
            buffer,
            engine,
            histogram: HistogramEngine::from_config(config),
        })
    }

    /// Runs one adjustment against the live buffer.
    pub fn apply(&mut self, adjustment: Adjustment) -> OpsResult<()> {
        self.engine.apply(adjustment, &mut self.buffer)
    }

    /// Steps back one history entry. Returns `false` if there was none.
    pub fn undo(&mut self) -> OpsResult<bool> {
        self.engine.undo(&mut self.buffer)
    }

    /// Returns to history entry `index`, dropping it and later entries.
    pub fn revert_to(&mut self, index: usize) -> OpsResult<()> {
        self.engine.revert_to(index, &mut self.buffer)
    }

    /// Histogram of the live buffer.
    pub fn histogram(&self) -> Histogram {
        self.histogram.compute(&self.buffer)
    }

    /// Ordered history titles and timestamps.
    pub fn history_entries(&self) -> Vec<HistorySummary> {
        self.engine.history_entries()
    }

    /// Live buffer.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Independent copy of the live buffer.
    pub fn snapshot(&self) -> PixelBuffer {
        self.buffer.clone()
    }

    /// Adjustment engine.
    pub fn engine(&self) -> &AdjustmentEngine {
        &self.engine
    }

    /// Histogram settings.
    pub fn histogram_engine(&self) -> &HistogramEngine {
        &self.histogram
    }

    /// Ends the session, returning the live buffer.
    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }
}

/// Thread-safe handle to an [`EditSession`].
///
/// Clones share the same session.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<EditSession>>,
}

impl SharedSession {
    /// Wraps an existing session.
    pub fn new(session: EditSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Opens a session and wraps it.
    pub fn open(buffer: PixelBuffer, config: &SessionConfig) -> OpsResult<Self> {
        EditSession::open(buffer, config).map(Self::new)
    }

    // A panic mid-call can only happen after validation, and every write
    // path leaves the session consistent, so a poisoned lock is recovered.
    fn lock(&self) -> MutexGuard<'_, EditSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`EditSession::apply`].
    pub fn apply(&self, adjustment: Adjustment) -> OpsResult<()> {
        self.lock().apply(adjustment)
    }

    /// See [`EditSession::undo`].
    pub fn undo(&self) -> OpsResult<bool> {
        self.lock().undo()
    }

    /// See [`EditSession::revert_to`].
    pub fn revert_to(&self, index: usize) -> OpsResult<()> {
        self.lock().revert_to(index)
    }

    /// See [`EditSession::histogram`].
    pub fn histogram(&self) -> Histogram {
        self.lock().histogram()
    }

    /// See [`EditSession::history_entries`].
    pub fn history_entries(&self) -> Vec<HistorySummary> {
        self.lock().history_entries()
    }

    /// See [`EditSession::snapshot`].
    pub fn snapshot(&self) -> PixelBuffer {
        self.lock().snapshot()
    }

    /// Runs `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut EditSession) -> R) -> R {
        f(&mut self.lock())
    }
}
