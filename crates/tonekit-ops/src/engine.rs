//! Adjustment engine and operator-coalescing state machine.
//!
//! Dragging a slider produces a stream of calls for the same operator with
//! different levels. Each call recomputes the whole transform from the
//! *baseline* captured when that operator started, not from the previous
//! call's output, so moving a slider back and forth never accumulates
//! rounding drift.
//!
//! # States
//!
//! ```text
//!             apply(op)                      apply(op), same op
//!   Idle ----------------> Active(op, base) ---------------------+
//!    ^                        |      ^                            |
//!    |   restore/undo/reset   |      +----------------------------+
//!    +------------------------+      apply(other) -> Active(other, live clone)
//! ```
//!
//! One-shot operators (grayscale, invert) always capture a fresh baseline.
//! Restore reads the immutable origin snapshot and returns to `Idle`.
//!
//! Every successful call records the *pre-operation* buffer in the history
//! log before writing its result. A failing call changes nothing.
//!
//! # Example
//!
//! ```rust
//! use tonekit_core::PixelBuffer;
//! use tonekit_ops::AdjustmentEngine;
//!
//! let mut buf = PixelBuffer::filled(2, 2, [100, 150, 200, 255]).unwrap();
//! let mut engine = AdjustmentEngine::new();
//! engine.capture_origin(&buf);
//!
//! engine.apply_brightness(&mut buf, 20.0).unwrap();
//! engine.apply_brightness(&mut buf, 0.0).unwrap();
//! assert_eq!(buf.pixel(0, 0).unwrap(), [100, 150, 200, 255]);
//! ```

use tonekit_core::{PixelBuffer, mean_luma};
use tonekit_lut::ToneLut;
use tracing::{debug, trace};

use crate::curves::{
    brightness_lut, color_balance_into, color_balance_lut, contrast_lut, grayscale_into,
};
use crate::{
    Adjustment, ContrastBoundary, HistoryLog, HistorySummary, Operator, OpsError, OpsResult,
    SessionConfig,
};

/// Which operator is running and the buffer it computes from.
#[derive(Debug, Clone, Default)]
enum OperatorState {
    #[default]
    Idle,
    Active {
        operator: Operator,
        baseline: PixelBuffer,
    },
}

/// Applies tonal adjustments to a caller-owned buffer.
///
/// The engine owns its operator state, the origin snapshot and the history
/// log; the live buffer stays with the caller and is passed to every call.
#[derive(Debug, Clone)]
pub struct AdjustmentEngine {
    state: OperatorState,
    origin: Option<PixelBuffer>,
    history: HistoryLog,
    contrast_boundary: ContrastBoundary,
}

impl Default for AdjustmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AdjustmentEngine {
    /// Creates an idle engine with default settings.
    pub fn new() -> Self {
        Self {
            state: OperatorState::Idle,
            origin: None,
            history: HistoryLog::new(),
            contrast_boundary: ContrastBoundary::default(),
        }
    }

    /// Creates an idle engine using the config's history capacity and
    /// contrast boundary policy.
    pub fn with_config(config: &SessionConfig) -> Self {
        let mut engine = Self::new();
        engine.history.set_max_length(config.history_capacity);
        engine.contrast_boundary = config.contrast_boundary;
        engine
    }

    /// Records the origin snapshot used by [`restore_origin`].
    ///
    /// Called once after the image is loaded; calling again replaces it.
    ///
    /// [`restore_origin`]: Self::restore_origin
    pub fn capture_origin(&mut self, buffer: &PixelBuffer) {
        let (width, height) = buffer.dimensions();
        debug!(width, height, "Captured origin snapshot");
        self.origin = Some(buffer.clone());
    }

    /// Dispatches one [`Adjustment`].
    pub fn apply(&mut self, adjustment: Adjustment, buffer: &mut PixelBuffer) -> OpsResult<()> {
        match adjustment {
            Adjustment::Grayscale => self.apply_grayscale(buffer),
            Adjustment::Invert => self.apply_invert(buffer),
            Adjustment::Brightness(level) => self.apply_brightness(buffer, level),
            Adjustment::Contrast(level) => self.apply_contrast(buffer, level),
            Adjustment::ColorBalance { red, green, blue } => {
                self.apply_color_balance(buffer, red, green, blue)
            }
            Adjustment::RestoreOrigin => self.restore_origin(buffer),
        }
    }

    /// Replaces every pixel's color channels with its Rec.601 luma.
    pub fn apply_grayscale(&mut self, buffer: &mut PixelBuffer) -> OpsResult<()> {
        trace!(width = buffer.width(), height = buffer.height(), "engine::grayscale");
        self.run(Operator::Grayscale, buffer, grayscale_into);
        Ok(())
    }

    /// Inverts the color channels.
    pub fn apply_invert(&mut self, buffer: &mut PixelBuffer) -> OpsResult<()> {
        trace!(width = buffer.width(), height = buffer.height(), "engine::invert");
        let lut = ToneLut::invert();
        self.run(Operator::Invert, buffer, |src, dst| lut.apply_into(src, dst));
        Ok(())
    }

    /// Shifts every color channel by `level * 0.9`.
    pub fn apply_brightness(&mut self, buffer: &mut PixelBuffer, level: f64) -> OpsResult<()> {
        trace!(width = buffer.width(), height = buffer.height(), level, "engine::brightness");
        let lut = brightness_lut(level);
        self.run(Operator::Brightness, buffer, |src, dst| lut.apply_into(src, dst));
        Ok(())
    }

    /// Stretches or compresses around the baseline's mean luma.
    ///
    /// # Errors
    ///
    /// [`OpsError::ContrastSingularity`] if the level reaches 100 and the
    /// engine is configured with [`ContrastBoundary::Reject`]. Nothing is
    /// recorded or modified in that case.
    pub fn apply_contrast(&mut self, buffer: &mut PixelBuffer, level: f64) -> OpsResult<()> {
        trace!(width = buffer.width(), height = buffer.height(), level, "engine::contrast");

        // The anchor comes from the baseline this call will use, which is the
        // live buffer unless a contrast drag is already in progress.
        let gray_avg = match self.reusable_baseline(Operator::Contrast) {
            Some(baseline) => mean_luma(baseline),
            None => mean_luma(buffer),
        };
        let lut = contrast_lut(level, gray_avg, self.contrast_boundary)?;

        self.run(Operator::Contrast, buffer, |src, dst| lut.apply_into(src, dst));
        Ok(())
    }

    /// Shifts each channel by its own level, then restores each pixel's
    /// original HSL lightness.
    pub fn apply_color_balance(
        &mut self,
        buffer: &mut PixelBuffer,
        red: f64,
        green: f64,
        blue: f64,
    ) -> OpsResult<()> {
        trace!(
            width = buffer.width(),
            height = buffer.height(),
            red,
            green,
            blue,
            "engine::color_balance"
        );
        let lut = color_balance_lut(red, green, blue);
        self.run(Operator::ColorBalance, buffer, |src, dst| {
            color_balance_into(&lut, src, dst)
        });
        Ok(())
    }

    /// Writes the origin snapshot into `buffer` and returns to idle.
    ///
    /// # Errors
    ///
    /// [`OpsError::NoOriginCaptured`] if [`capture_origin`] was never called.
    ///
    /// [`capture_origin`]: Self::capture_origin
    pub fn restore_origin(&mut self, buffer: &mut PixelBuffer) -> OpsResult<()> {
        let origin = self.origin.as_ref().ok_or(OpsError::NoOriginCaptured)?;
        trace!(width = origin.width(), height = origin.height(), "engine::restore_origin");

        self.history.add(Operator::RestoreOrigin.title(), buffer);
        buffer.copy_from(origin);
        self.state = OperatorState::Idle;
        debug!("Restored origin, operator state idle");
        Ok(())
    }

    /// Pops the most recent history entry and writes its snapshot into
    /// `buffer`.
    ///
    /// Returns `false` (buffer untouched) when the history is empty.
    pub fn undo(&mut self, buffer: &mut PixelBuffer) -> OpsResult<bool> {
        match self.history.remove(None) {
            Some(entry) => {
                debug!(title = entry.title(), "Undo");
                buffer.copy_from(entry.snapshot());
                self.state = OperatorState::Idle;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Writes history entry `index`'s snapshot into `buffer`, dropping that
    /// entry and every later one.
    ///
    /// # Errors
    ///
    /// [`OpsError::HistoryIndex`] if no such entry exists.
    pub fn revert_to(&mut self, index: usize, buffer: &mut PixelBuffer) -> OpsResult<()> {
        let len = self.history.len();
        if !self.history.restore(Some(index), buffer) {
            return Err(OpsError::HistoryIndex { index, len });
        }
        self.history.truncate(index);
        self.state = OperatorState::Idle;
        debug!(index, dropped = len - index, "Reverted to history entry");
        Ok(())
    }

    /// Returns to idle, forgets the origin and clears history.
    ///
    /// History capacity and the contrast policy are kept.
    pub fn reset(&mut self) {
        self.state = OperatorState::Idle;
        self.origin = None;
        self.history.clear();
        debug!("Engine reset");
    }

    /// Operator currently coalescing calls, if any.
    pub fn active_operator(&self) -> Option<Operator> {
        match &self.state {
            OperatorState::Idle => None,
            OperatorState::Active { operator, .. } => Some(*operator),
        }
    }

    /// Baseline of the active operator, if any.
    pub fn baseline(&self) -> Option<&PixelBuffer> {
        match &self.state {
            OperatorState::Idle => None,
            OperatorState::Active { baseline, .. } => Some(baseline),
        }
    }

    /// Origin snapshot, if captured.
    pub fn origin(&self) -> Option<&PixelBuffer> {
        self.origin.as_ref()
    }

    /// History log.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// History log, mutably (e.g. to change its capacity).
    pub fn history_mut(&mut self) -> &mut HistoryLog {
        &mut self.history
    }

    /// Ordered titles and timestamps of the history log.
    pub fn history_entries(&self) -> Vec<HistorySummary> {
        self.history.summaries()
    }

    /// Contrast level-100 policy in effect.
    pub fn contrast_boundary(&self) -> ContrastBoundary {
        self.contrast_boundary
    }

    /// Baseline a call for `operator` would reuse without re-capturing.
    fn reusable_baseline(&self, operator: Operator) -> Option<&PixelBuffer> {
        match &self.state {
            OperatorState::Active {
                operator: active,
                baseline,
            } if *active == operator && !operator.is_one_shot() => Some(baseline),
            _ => None,
        }
    }

    /// Runs the transition rule for one call, logs the pre-operation buffer
    /// and writes `transform(baseline)` into `buffer`.
    ///
    /// Callers must have validated everything that can fail beforehand.
    fn run<F>(&mut self, operator: Operator, buffer: &mut PixelBuffer, transform: F)
    where
        F: FnOnce(&PixelBuffer, &mut PixelBuffer),
    {
        let previous = self.active_operator();
        let baseline = match std::mem::take(&mut self.state) {
            OperatorState::Active {
                operator: active,
                baseline,
            } if active == operator && !operator.is_one_shot() => baseline,
            _ => {
                debug!(from = ?previous, to = %operator, "Operator changed, capturing new baseline");
                buffer.clone()
            }
        };

        self.history.add(operator.title(), buffer);
        transform(&baseline, buffer);
        self.state = OperatorState::Active { operator, baseline };
    }
}
