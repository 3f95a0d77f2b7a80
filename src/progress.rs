//! Progress state and derived timing metrics.
//!
//! [`ProgressState`] follows a "Hot/Cold" split:
//!
//! * **Hot Data:** Position, total and the render frame counter are `Atomic` primitives,
//!   so workers on many threads can advance the same counter without a lock.
//! * **Cold Data:** Description, unit and timestamps sit behind an
//!   [`RwLock`](parking_lot::RwLock). They change at lifecycle boundaries and on render.
//!
//! Rendering works from a [`ProgressSnapshot`], an owned copy of the state taken at one
//! instant, which carries the derived reads (percentage, ETA) as pure functions.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use compact_str::CompactString;
use parking_lot::RwLock;
use web_time::Instant;

/// Internal marker for an indeterminate total.
const INDETERMINATE: u64 = 0;

/// Shared, thread-safe progress counter with its timing metadata.
///
/// The position is clamped to the total when the total is known and only ever moves
/// backwards through [`reset`](Self::reset).
#[derive(Debug)]
pub struct ProgressState {
    position: AtomicU64,
    total: AtomicU64,
    frames: AtomicU64,
    cold: RwLock<Cold>,
}

/// Infrequently written metadata.
#[derive(Debug)]
struct Cold {
    description: CompactString,
    unit: CompactString,
    start: Option<Instant>,
    last_render: Option<Instant>,
}

impl ProgressState {
    /// Creates a state at position zero.
    ///
    /// `total` of `None` (or `Some(0)`) means the total is indeterminate.
    pub fn new(
        total: Option<u64>,
        description: impl Into<CompactString>,
        unit: impl Into<CompactString>,
    ) -> Self {
        Self {
            position: AtomicU64::new(0),
            total: AtomicU64::new(total.unwrap_or(INDETERMINATE)),
            frames: AtomicU64::new(0),
            cold: RwLock::new(Cold {
                description: description.into(),
                unit: unit.into(),
                start: None,
                last_render: None,
            }),
        }
    }

    // ========================================================================
    // Hot Path
    // ========================================================================

    /// Advances the position by `amount`, clamping to the total when it is known.
    ///
    /// Concurrent callers never lose increments. Returns the new position.
    pub fn update(&self, amount: u64) -> u64 {
        let total = self.total.load(Ordering::Relaxed);
        let advance = |pos: u64| {
            let next = pos.saturating_add(amount);
            if total == INDETERMINATE {
                next
            } else {
                next.min(total)
            }
        };

        match self
            .position
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |pos| Some(advance(pos)))
        {
            Ok(prev) | Err(prev) => advance(prev),
        }
    }

    /// Rewinds the position to zero and restarts the clock.
    pub fn reset(&self) {
        self.position.store(0, Ordering::Release);
        let mut cold = self.cold.write();
        cold.start = Some(Instant::now());
        cold.last_render = None;
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position.load(Ordering::Acquire)
    }

    /// The total, or `None` when indeterminate.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        match self.total.load(Ordering::Relaxed) {
            INDETERMINATE => None,
            total => Some(total),
        }
    }

    /// Whether a known total has been reached.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total().is_some_and(|total| self.position() >= total)
    }

    /// Returns the current frame number and advances the frame counter.
    pub(crate) fn next_frame(&self) -> u64 {
        self.frames.fetch_add(1, Ordering::Relaxed)
    }

    /// Number of frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    // ========================================================================
    // Cold Path
    // ========================================================================

    /// Label shown before the indicator.
    #[must_use]
    pub fn description(&self) -> CompactString {
        self.cold.read().description.clone()
    }

    /// Replaces the label.
    pub fn set_description(&self, description: impl Into<CompactString>) {
        self.cold.write().description = description.into();
    }

    /// Label for the counted items.
    #[must_use]
    pub fn unit(&self) -> CompactString {
        self.cold.read().unit.clone()
    }

    /// Records the start time, unless one is already set.
    pub(crate) fn mark_started(&self) {
        let mut cold = self.cold.write();
        if cold.start.is_none() {
            cold.start = Some(Instant::now());
        }
    }

    /// Records that a frame was just drawn.
    pub(crate) fn mark_rendered(&self, at: Instant) {
        self.cold.write().last_render = Some(at);
    }

    /// Time since the last drawn frame, or `None` if nothing was drawn yet.
    #[must_use]
    pub fn since_last_render(&self) -> Option<Duration> {
        self.cold.read().last_render.map(|at| at.elapsed())
    }

    // ========================================================================
    // Derived Reads
    // ========================================================================

    /// Time since start, or zero before the session has started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.cold
            .read()
            .start
            .map_or(Duration::ZERO, |start| start.elapsed())
    }

    /// Completion percentage in `[0, 100]`, or `0.0` when the total is indeterminate.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        percentage_of(self.position(), self.total())
    }

    /// Estimated time remaining, see [`ProgressSnapshot::eta`].
    #[must_use]
    pub fn eta(&self) -> Option<Duration> {
        self.snapshot().eta()
    }

    /// Creates a consistent snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.into()
    }
}

/// A plain-data copy of a [`ProgressState`] at a specific point in time.
///
/// Holds owned data and needs no locking, so renderers and callbacks can read it freely.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressSnapshot {
    description: CompactString,
    unit: CompactString,

    elapsed: Option<Duration>,

    position: u64,
    total: Option<u64>,
}

impl From<&ProgressState> for ProgressSnapshot {
    fn from(state: &ProgressState) -> Self {
        let cold = state.cold.read();
        let description = cold.description.clone();
        let unit = cold.unit.clone();
        let elapsed = cold.start.map(|start| start.elapsed());
        drop(cold);

        Self {
            description,
            unit,
            elapsed,
            position: state.position(),
            total: state.total(),
        }
    }
}

impl ProgressSnapshot {
    /// Builds a snapshot from raw values, mostly useful for rendering a single frame.
    #[must_use]
    pub fn new(
        description: impl Into<CompactString>,
        unit: impl Into<CompactString>,
        position: u64,
        total: Option<u64>,
        elapsed: Option<Duration>,
    ) -> Self {
        let total = total.filter(|&t| t != INDETERMINATE);
        Self {
            description: description.into(),
            unit: unit.into(),
            elapsed,
            position: total.map_or(position, |t| position.min(t)),
            total,
        }
    }

    /// Label shown before the indicator.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Label for the counted items.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Time since start, `None` if the session had not started.
    #[must_use]
    pub const fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Position at the time of the snapshot.
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// Total, `None` when indeterminate.
    #[must_use]
    pub const fn total(&self) -> Option<u64> {
        self.total
    }

    /// Whether a known total had been reached.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total.is_some_and(|total| self.position >= total)
    }

    /// Completion percentage in `[0, 100]`, `0.0` when the total is indeterminate.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        percentage_of(self.position, self.total)
    }

    /// Estimated time remaining: `elapsed * (total - position) / position`.
    ///
    /// Returns `None` if:
    /// * The total is indeterminate.
    /// * No progress has been made.
    /// * The session has not started.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn eta(&self) -> Option<Duration> {
        let total = self.total?;
        if self.position == 0 {
            return None;
        }
        let elapsed = self.elapsed?;

        let remaining = total.saturating_sub(self.position) as f64;
        let secs = elapsed.as_secs_f64() * remaining / self.position as f64;

        Some(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
    }

    /// Average items per second since start.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn throughput(&self) -> f64 {
        match self.elapsed {
            Some(elapsed) if elapsed.as_secs_f64() > 0.0 => {
                self.position as f64 / elapsed.as_secs_f64()
            }
            _ => 0.0,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage_of(position: u64, total: Option<u64>) -> f64 {
    match total {
        Some(total) if total > 0 => (position.min(total) as f64 / total as f64) * 100.0,
        _ => 0.0,
    }
}
