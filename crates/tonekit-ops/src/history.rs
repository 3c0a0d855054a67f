//! Bounded, chronologically ordered history of titled buffer snapshots.
//!
//! The log is strictly linear: entries are appended at the back and the
//! oldest entry is evicted from the front once the capacity is exceeded.
//! Entries are never mutated after creation.
//!
//! Index arguments default to the most recent entry when `None`.
//!
//! # Example
//!
//! ```rust
//! use tonekit_core::PixelBuffer;
//! use tonekit_ops::HistoryLog;
//!
//! let buf = PixelBuffer::new(1, 1).unwrap();
//! let mut log = HistoryLog::new();
//! log.set_max_length(2);
//! log.add("A", &buf);
//! log.add("B", &buf);
//! log.add("C", &buf);
//! let titles: Vec<_> = log.iter().map(|e| e.title()).collect();
//! assert_eq!(titles, ["B", "C"]);
//! ```

use std::collections::VecDeque;
use std::time::SystemTime;

use tonekit_core::PixelBuffer;
use tracing::debug;

use crate::config::DEFAULT_HISTORY_CAPACITY;

/// One recorded snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    title: String,
    snapshot: PixelBuffer,
    timestamp: SystemTime,
}

impl HistoryEntry {
    /// Label shown in a history list.
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Buffer state captured when the entry was added.
    #[inline]
    pub fn snapshot(&self) -> &PixelBuffer {
        &self.snapshot
    }

    /// Wall-clock instant the entry was added.
    #[inline]
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    /// Title and timestamp without the snapshot.
    pub fn summary(&self) -> HistorySummary {
        HistorySummary {
            title: self.title.clone(),
            timestamp: self.timestamp,
        }
    }

    /// Consumes the entry, returning its snapshot.
    pub fn into_snapshot(self) -> PixelBuffer {
        self.snapshot
    }
}

/// Title and timestamp of a history entry, for list rendering.
///
/// The timestamp is a raw instant; formatting is the renderer's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySummary {
    /// Entry title
    pub title: String,
    /// Entry creation instant
    pub timestamp: SystemTime,
}

/// Capped FIFO log of [`HistoryEntry`] values.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    max_length: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog {
    /// Creates an empty log holding at most 10 entries.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(DEFAULT_HISTORY_CAPACITY + 1),
            max_length: DEFAULT_HISTORY_CAPACITY,
        }
    }

    /// Creates an empty log with the given capacity.
    ///
    /// A zero capacity is ignored and the default is kept.
    pub fn with_max_length(max_length: usize) -> Self {
        let mut log = Self::new();
        log.set_max_length(max_length);
        log
    }

    /// Appends a snapshot of `buffer`, evicting the oldest entry if the log
    /// is over capacity.
    pub fn add(&mut self, title: impl Into<String>, buffer: &PixelBuffer) {
        self.entries.push_back(HistoryEntry {
            title: title.into(),
            snapshot: buffer.clone(),
            timestamp: SystemTime::now(),
        });
        self.evict();
    }

    /// Removes and returns the entry at `index` (default: most recent).
    ///
    /// Returns `None` when the index names no entry.
    pub fn remove(&mut self, index: Option<usize>) -> Option<HistoryEntry> {
        let index = self.resolve(index)?;
        self.entries.remove(index)
    }

    /// Returns the entry at `index` (default: most recent).
    pub fn get(&self, index: Option<usize>) -> Option<&HistoryEntry> {
        let index = self.resolve(index)?;
        self.entries.get(index)
    }

    /// Copies the snapshot at `index` (default: most recent) into `target`.
    ///
    /// The log itself is unchanged. Returns `false` if no such entry exists.
    pub fn restore(&self, index: Option<usize>, target: &mut PixelBuffer) -> bool {
        match self.get(index) {
            Some(entry) => {
                target.copy_from(&entry.snapshot);
                true
            }
            None => false,
        }
    }

    /// Drops the entry at `index` and every later entry.
    pub fn truncate(&mut self, index: usize) {
        self.entries.truncate(index);
    }

    /// Sets the capacity. Zero is silently ignored.
    ///
    /// Shrinking below the current length evicts the oldest entries.
    pub fn set_max_length(&mut self, max_length: usize) {
        if max_length == 0 {
            return;
        }
        self.max_length = max_length;
        self.evict();
    }

    /// Current capacity.
    #[inline]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the log has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry; capacity is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Ordered titles and timestamps, oldest first.
    pub fn summaries(&self) -> Vec<HistorySummary> {
        self.entries.iter().map(HistoryEntry::summary).collect()
    }

    fn resolve(&self, index: Option<usize>) -> Option<usize> {
        let index = match index {
            Some(i) => i,
            None => self.entries.len().checked_sub(1)?,
        };
        (index < self.entries.len()).then_some(index)
    }

    fn evict(&mut self) {
        while self.entries.len() > self.max_length {
            if let Some(old) = self.entries.pop_front() {
                debug!(title = %old.title, max = self.max_length, "Evicted oldest history entry");
            }
        }
    }
}
