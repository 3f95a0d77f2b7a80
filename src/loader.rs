//! The driver: lifecycle, throttled redraws and scoped sessions.
//!
//! A [`ProgressLoader`] moves through `Created → Started → Closed`:
//!
//! * [`start`](ProgressLoader::start) records the start time and draws the first frame.
//! * [`update`](ProgressLoader::update) advances the counter and redraws at most once per
//!   refresh interval, plus whenever the total has been reached. An update before
//!   `start` starts the session; an update after `close` is ignored.
//! * [`close`](ProgressLoader::close) draws the final frame followed by a newline. It is
//!   idempotent.
//!
//! Handles are cheap to clone and can be shared with worker threads. Updates advance the
//! counter while holding the output mutex, so no increment lands after the final frame;
//! reads of the counter stay lock-free. Drawing and lifecycle changes share the same
//! mutex so frames never interleave and nothing is drawn after the final newline.
//!
//! Terminal escape codes (line clearing and color) are only written when the target
//! supports them; see [`ProgressTarget::supports_ansi`].

use std::{
    fmt,
    ops::Deref,
    sync::{Arc, Weak},
    thread,
    time::Duration,
};

use compact_str::CompactString;
use parking_lot::Mutex;
use web_time::Instant;

use crate::{
    builder::{Callback, ProgressBuilder, RenderCallback},
    error::{Error, Result},
    progress::{ProgressSnapshot, ProgressState},
    render::{RenderConfig, render_line},
    target::ProgressTarget,
};

/// Clears the current line, written after the carriage return on ANSI targets.
const CLEAR_LINE: &str = "\x1b[2K";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Lifecycle {
    Created,
    Started,
    Closed,
}

struct Output {
    target: ProgressTarget,
    lifecycle: Lifecycle,
}

struct Inner {
    state: ProgressState,
    render: RenderConfig,
    refresh_rate: Duration,
    steady_tick: bool,
    callback: Option<Callback>,
    render_callback: Option<RenderCallback>,
    output: Mutex<Output>,
}

/// A thread-safe, cloneable handle to a live progress line.
///
/// Cloning is cheap (Arc bump) and all clones drive the same line. When the last handle
/// of a started loader is dropped, the loader is closed.
#[derive(Clone)]
pub struct ProgressLoader {
    inner: Arc<Inner>,
}

impl fmt::Debug for ProgressLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressLoader")
            .field("position", &self.position())
            .field("total", &self.total())
            .field("style", &self.inner.render.style)
            .field("lifecycle", &self.inner.output.lock().lifecycle)
            .finish_non_exhaustive()
    }
}

impl Inner {
    /// Draws one frame. The caller holds the output lock.
    fn draw(&self, out: &mut Output, last: bool) -> Result<()> {
        let frame = self.state.next_frame();
        let snapshot = self.state.snapshot();
        let line = match &self.render_callback {
            Some(render) => render(&snapshot),
            None => render_line(&self.render, &snapshot, frame),
        };

        let mut bytes = String::with_capacity(CLEAR_LINE.len() + line.len() + 16);
        bytes.push('\r');
        if out.target.supports_ansi() {
            bytes.push_str(CLEAR_LINE);
        }
        bytes.push_str(&self.render.color.paint_for(&line, out.target.color_stream()));
        if last {
            bytes.push('\n');
        }

        self.state.mark_rendered(Instant::now());
        log::trace!("frame {frame}: {line}");
        out.target.write_all(bytes.as_bytes())?;
        Ok(())
    }

    fn start_locked(&self, out: &mut Output) -> Result<()> {
        self.state.mark_started();
        out.lifecycle = Lifecycle::Started;
        log::debug!(
            "started '{}' (total: {:?})",
            self.state.description(),
            self.state.total()
        );
        self.draw(out, false)
    }

    fn close_locked(&self, out: &mut Output) -> Result<()> {
        if out.lifecycle == Lifecycle::Closed {
            return Ok(());
        }
        out.lifecycle = Lifecycle::Closed;
        log::debug!(
            "closed '{}' at {}/{:?} after {:?}",
            self.state.description(),
            self.state.position(),
            self.state.total(),
            self.state.elapsed()
        );
        self.draw(out, true)
    }

    fn is_due(&self) -> bool {
        self.state
            .since_last_render()
            .is_none_or(|since| since >= self.refresh_rate)
            || self.state.is_complete()
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let mut out = self.output.lock();
        if out.lifecycle == Lifecycle::Started {
            if let Err(err) = self.close_locked(&mut out) {
                log::warn!("failed to close progress line on drop: {err}");
            }
        }
    }
}

impl ProgressLoader {
    pub(crate) fn from_builder(builder: ProgressBuilder) -> Self {
        let ProgressBuilder {
            total,
            description,
            unit,
            render,
            refresh_rate,
            callback,
            render_callback,
            target,
            steady_tick,
        } = builder;

        Self {
            inner: Arc::new(Inner {
                state: ProgressState::new(total, description, unit),
                render,
                refresh_rate,
                steady_tick,
                callback,
                render_callback,
                output: Mutex::new(Output {
                    target,
                    lifecycle: Lifecycle::Created,
                }),
            }),
        }
    }

    /// Builds a loader with a known total and default settings, without starting it.
    ///
    /// # Errors
    ///
    /// Fails if `total` is zero.
    pub fn new(total: u64) -> Result<Self> {
        ProgressBuilder::new(total).build()
    }

    /// Starts configuring a loader.
    #[must_use]
    pub fn builder(total: u64) -> ProgressBuilder {
        ProgressBuilder::new(total)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Records the start time and draws the first frame.
    ///
    /// Does nothing if the loader is already started or closed.
    ///
    /// # Errors
    ///
    /// Returns output errors.
    pub fn start(&self) -> Result<()> {
        let mut out = self.inner.output.lock();
        if out.lifecycle != Lifecycle::Created {
            return Ok(());
        }
        self.begin(&mut out)
    }

    fn begin(&self, out: &mut Output) -> Result<()> {
        let result = self.inner.start_locked(out);
        if self.inner.steady_tick {
            self.spawn_ticker();
        }
        result
    }

    /// Advances the counter by `amount` and redraws when due.
    ///
    /// A redraw is due once `refresh_rate` has passed since the previous frame, and
    /// always when the total has been reached. The configured callback runs after the
    /// counter moves, before the redraw. Starts the session if it was not started;
    /// does nothing once closed.
    ///
    /// # Errors
    ///
    /// Returns output errors.
    pub fn update(&self, amount: u64) -> Result<()> {
        {
            let mut out = self.inner.output.lock();
            match out.lifecycle {
                Lifecycle::Closed => return Ok(()),
                Lifecycle::Created => self.begin(&mut out)?,
                Lifecycle::Started => {}
            }
            self.inner.state.update(amount);
        }

        if let Some(callback) = &self.inner.callback {
            callback(self);
        }

        let mut out = self.inner.output.lock();
        if out.lifecycle == Lifecycle::Started && self.inner.is_due() {
            self.inner.draw(&mut out, false)?;
        }
        Ok(())
    }

    /// Advances the counter by one.
    ///
    /// # Errors
    ///
    /// Returns output errors.
    pub fn inc(&self) -> Result<()> {
        self.update(1)
    }

    /// Draws the final frame and a newline. Later calls do nothing.
    ///
    /// # Errors
    ///
    /// Returns output errors from the final draw.
    pub fn close(&self) -> Result<()> {
        let mut out = self.inner.output.lock();
        self.inner.close_locked(&mut out)
    }

    /// Rewinds the counter to zero, restarts the clock and redraws.
    ///
    /// Only a started session is rewound; before `start` the counter is already zero, and
    /// a closed loader keeps its final state.
    ///
    /// # Errors
    ///
    /// Returns output errors from the redraw.
    pub fn reset(&self) -> Result<()> {
        let mut out = self.inner.output.lock();
        if out.lifecycle != Lifecycle::Started {
            return Ok(());
        }
        self.inner.state.reset();
        self.inner.draw(&mut out, false)
    }

    /// Whether the session is running.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.inner.output.lock().lifecycle == Lifecycle::Started
    }

    /// Whether the session has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.output.lock().lifecycle == Lifecycle::Closed
    }

    fn spawn_ticker(&self) {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let interval = self.inner.refresh_rate;

        let spawned = thread::Builder::new()
            .name("progress-ticker".into())
            .spawn(move || {
                loop {
                    thread::sleep(interval);
                    let Some(inner) = weak.upgrade() else {
                        break;
                    };
                    let mut out = inner.output.lock();
                    if out.lifecycle != Lifecycle::Started {
                        break;
                    }
                    if let Err(err) = inner.draw(&mut out, false) {
                        log::warn!("steady tick stopped: {err}");
                        break;
                    }
                }
            });

        if let Err(err) = spawned {
            log::warn!("failed to spawn progress ticker: {err}");
        }
    }

    // ========================================================================
    // Scoped Sessions
    // ========================================================================

    /// Starts the loader and returns a guard that closes it when dropped.
    ///
    /// The guard closes the loader even while unwinding from a panic.
    ///
    /// # Errors
    ///
    /// Returns output errors from the first draw.
    pub fn session(&self) -> Result<Session<'_>> {
        self.start()?;
        Ok(Session { loader: self })
    }

    /// Runs `f` inside a session and closes the loader afterwards.
    ///
    /// If `f` fails, its error is returned and close failures are only logged.
    ///
    /// # Errors
    ///
    /// Returns errors from `f`, and output errors from starting or closing.
    pub fn scope<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&Self) -> std::result::Result<T, E>,
        E: From<Error>,
    {
        let session = self.session()?;
        match f(self) {
            Ok(value) => {
                session.finish()?;
                Ok(value)
            }
            Err(err) => {
                drop(session);
                Err(err)
            }
        }
    }

    /// Calls `f` for every item, advancing by one after each, inside a session.
    ///
    /// Stops at the first error. The loader is closed either way.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] if there are no items, errors from `f`, and output
    /// errors.
    pub fn with_function<I, F, E>(&self, mut f: F, items: I) -> std::result::Result<(), E>
    where
        I: IntoIterator,
        F: FnMut(I::Item, &Self) -> std::result::Result<(), E>,
        E: From<Error>,
    {
        let mut items = items.into_iter().peekable();
        if items.peek().is_none() {
            return Err(Error::EmptyData.into());
        }

        self.scope(|loader| {
            for item in items {
                f(item, loader)?;
                loader.update(1)?;
            }
            Ok(())
        })
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Current position.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.inner.state.position()
    }

    /// The total, or `None` when indeterminate.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.inner.state.total()
    }

    /// Completion percentage, `0.0` when the total is indeterminate.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.inner.state.percentage()
    }

    /// Time since start, zero before the session started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.inner.state.elapsed()
    }

    /// Estimated time remaining, `None` while undefined.
    #[must_use]
    pub fn eta(&self) -> Option<Duration> {
        self.inner.state.eta()
    }

    /// Number of frames drawn so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.inner.state.frames()
    }

    /// Replaces the label shown before the indicator.
    pub fn set_description(&self, description: impl Into<CompactString>) {
        self.inner.state.set_description(description);
    }

    /// Creates a consistent snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.inner.state.snapshot()
    }
}

/// Guard for a started [`ProgressLoader`]; closes it on drop.
///
/// Derefs to the loader, so updates can go through the guard.
#[must_use = "the session closes as soon as the guard is dropped"]
pub struct Session<'a> {
    loader: &'a ProgressLoader,
}

impl Session<'_> {
    /// Closes the loader now, returning any output error instead of logging it.
    ///
    /// # Errors
    ///
    /// Returns output errors from the final draw.
    pub fn finish(self) -> Result<()> {
        self.loader.close()
    }
}

impl Deref for Session<'_> {
    type Target = ProgressLoader;

    fn deref(&self) -> &Self::Target {
        self.loader
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.loader.close() {
            log::warn!("failed to close progress line: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        panic::{AssertUnwindSafe, catch_unwind},
        sync::{
            Arc,
            atomic::{AtomicU64, Ordering},
        },
        thread,
        time::Duration,
    };

    use super::ProgressLoader;
    use crate::{Color, Error, OutputBuffer, ProgressBuilder, ProgressTarget, Style};

    /// A loader writing into memory that redraws on every update.
    fn buffered(builder: ProgressBuilder) -> (ProgressLoader, OutputBuffer) {
        let (target, buffer) = ProgressTarget::buffer();
        let loader = builder
            .refresh_rate(Duration::from_nanos(1))
            .target(target)
            .build()
            .unwrap();
        (loader, buffer)
    }

    /// Last drawn line, without redraw codes or the trailing newline.
    fn last_line(buffer: &OutputBuffer) -> String {
        let contents = buffer.contents();
        let last = contents.rsplit('\r').next().unwrap_or_default();
        last.trim_start_matches("\x1b[2K").trim_end_matches('\n').to_owned()
    }

    /// Basic Lifecycle
    /// Created -> Started -> Closed, with the final frame newline-terminated.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_basic_lifecycle() {
        let (loader, buffer) = buffered(ProgressBuilder::new(10).desc("Job"));
        assert!(!loader.is_started());
        assert!(buffer.contents().is_empty());

        loader.start().unwrap();
        assert!(loader.is_started());
        assert!(buffer.contents().starts_with("\r\x1b[2KJob: ["));

        for _ in 0..5 {
            loader.update(1).unwrap();
        }
        assert_eq!(loader.position(), 5);
        assert_eq!(loader.percentage(), 50.0);

        loader.close().unwrap();
        assert!(loader.is_closed());
        assert!(buffer.contents().ends_with('\n'));
        assert!(last_line(&buffer).contains("50.0% (5/10 items)"));
    }

    /// Clamp
    /// Overshooting renders the complete state.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_overshoot_clamps() {
        let (loader, buffer) = buffered(ProgressBuilder::new(5).width(5));
        loader.start().unwrap();
        loader.update(10).unwrap();

        assert_eq!(loader.position(), 5);
        assert_eq!(loader.percentage(), 100.0);
        assert!(last_line(&buffer).contains("[#####] 100.0% (5/5 items)"));
    }

    /// Idempotent Close
    /// A second close writes nothing.
    #[test]
    fn test_double_close() {
        let (loader, buffer) = buffered(ProgressBuilder::new(3));
        loader.start().unwrap();
        loader.close().unwrap();
        let once = buffer.contents();

        loader.close().unwrap();
        assert_eq!(buffer.contents(), once);
        assert_eq!(once.matches('\n').count(), 1);
    }

    /// Lazy Start
    /// An update before start starts the session.
    #[test]
    fn test_update_before_start_starts() {
        let (loader, buffer) = buffered(ProgressBuilder::new(4));
        loader.update(1).unwrap();

        assert!(loader.is_started());
        assert_eq!(loader.position(), 1);
        assert!(loader.snapshot().elapsed().is_some());
        assert!(!buffer.contents().is_empty());
    }

    /// Updates After Close
    /// Ignored: neither the counter nor the output changes.
    #[test]
    fn test_update_after_close_is_ignored() {
        let (loader, buffer) = buffered(ProgressBuilder::new(4));
        loader.start().unwrap();
        loader.update(1).unwrap();
        loader.close().unwrap();
        let closed = buffer.contents();

        loader.update(2).unwrap();
        loader.start().unwrap();
        assert_eq!(loader.position(), 1);
        assert_eq!(buffer.contents(), closed);
        assert!(loader.is_closed());
    }

    /// Reset After Close
    /// A closed loader keeps its final position and output.
    #[test]
    fn test_reset_after_close_is_ignored() {
        let (loader, buffer) = buffered(ProgressBuilder::new(5));
        loader.update(3).unwrap();
        loader.close().unwrap();
        let closed = buffer.contents();

        loader.reset().unwrap();
        assert!(loader.is_closed());
        assert_eq!(loader.position(), 3);
        assert_eq!(buffer.contents(), closed);
        assert!(last_line(&buffer).contains("(3/5 items)"));
    }

    /// Reset While Started
    /// Rewinds the counter and redraws the line at zero.
    #[test]
    fn test_reset_redraws_while_started() {
        let (loader, buffer) = buffered(ProgressBuilder::new(5));
        loader.update(4).unwrap();
        let frames = loader.frames();

        loader.reset().unwrap();
        assert!(loader.is_started());
        assert_eq!(loader.position(), 0);
        assert_eq!(loader.frames(), frames + 1);
        assert!(last_line(&buffer).contains("(0/5 items)"));
    }

    /// Reset Before Start
    /// Nothing to rewind: no start, no output.
    #[test]
    fn test_reset_before_start_is_noop() {
        let (loader, buffer) = buffered(ProgressBuilder::new(5));
        loader.reset().unwrap();

        assert!(!loader.is_started());
        assert!(loader.snapshot().elapsed().is_none());
        assert!(buffer.contents().is_empty());
    }

    /// Close Before Start
    /// An explicit close still draws the final line once.
    #[test]
    fn test_close_before_start_draws_final_line() {
        let (loader, buffer) = buffered(ProgressBuilder::new(5));
        loader.close().unwrap();
        loader.close().unwrap();

        assert!(loader.is_closed());
        let contents = buffer.contents();
        assert_eq!(contents.matches('\n').count(), 1);
        assert!(last_line(&buffer).contains("(0/5 items) [0s]"));
    }

    /// Throttling
    /// Within the refresh interval only the completing update redraws.
    #[test]
    fn test_refresh_throttling() {
        let (target, buffer) = ProgressTarget::buffer();
        let loader = ProgressBuilder::new(3)
            .refresh_rate(Duration::from_secs(3600))
            .target(target)
            .build()
            .unwrap();

        loader.start().unwrap();
        assert_eq!(loader.frames(), 1);

        loader.update(1).unwrap();
        loader.update(1).unwrap();
        assert_eq!(loader.frames(), 1, "updates inside the interval are not drawn");

        loader.update(1).unwrap();
        assert_eq!(loader.frames(), 2, "the complete state is always drawn");
        assert!(last_line(&buffer).contains("(3/3 items)"));
    }

    /// Spinner Frames
    /// The glyph follows the number of draws, not the amounts.
    #[test]
    fn test_spinner_advances_per_draw() {
        let (loader, buffer) = buffered(ProgressBuilder::indeterminate().style(Style::Spinner));
        let glyph = |buffer: &OutputBuffer| last_line(buffer).chars().nth("Progress: ".len()).unwrap();

        loader.start().unwrap();
        assert_eq!(glyph(&buffer), '-');
        loader.update(100).unwrap();
        assert_eq!(glyph(&buffer), '\\');
        loader.update(0).unwrap();
        assert_eq!(glyph(&buffer), '|');
        loader.update(7).unwrap();
        assert_eq!(glyph(&buffer), '/');
    }

    /// Color
    /// The whole line is wrapped in the color codes.
    #[test]
    fn test_color_wraps_line() {
        let (loader, buffer) = buffered(ProgressBuilder::new(2).color(Color::Green));
        loader.start().unwrap();

        let line = last_line(&buffer);
        assert!(line.starts_with("\x1b[92mProgress: "));
        assert!(line.ends_with("\x1b[39m"));
    }

    /// Callback
    /// Invoked once per update with the advanced loader.
    #[test]
    fn test_callback_sees_loader() {
        let seen = Arc::new(AtomicU64::new(0));
        let hook = Arc::clone(&seen);
        let (loader, _buffer) = buffered(
            ProgressBuilder::new(10).callback(move |loader| {
                hook.store(loader.position(), Ordering::Relaxed);
            }),
        );

        loader.update(3).unwrap();
        assert_eq!(seen.load(Ordering::Relaxed), 3);
        loader.update(2).unwrap();
        assert_eq!(seen.load(Ordering::Relaxed), 5);
    }

    /// Custom Renderer
    /// Replaces the built-in line.
    #[test]
    fn test_render_callback() {
        let (loader, buffer) = buffered(
            ProgressBuilder::new(4)
                .render_callback(|snap| format!("{} of {:?}", snap.position(), snap.total())),
        );
        loader.update(2).unwrap();
        assert_eq!(last_line(&buffer), "2 of Some(4)");
    }

    /// Scoped Session
    /// The guard closes on normal exit and while unwinding.
    #[test]
    fn test_session_closes_on_panic() {
        let (loader, buffer) = buffered(ProgressBuilder::new(10));

        let result = catch_unwind(AssertUnwindSafe(|| {
            let session = loader.session().unwrap();
            session.update(4).unwrap();
            panic!("work failed");
        }));

        assert!(result.is_err());
        assert!(loader.is_closed());
        let contents = buffer.contents();
        assert!(contents.ends_with('\n'));
        assert_eq!(contents.matches('\n').count(), 1);
        assert!(last_line(&buffer).contains("(4/10 items)"));
    }

    /// Scope Errors
    /// An error from the body is returned after the loader closes.
    #[test]
    fn test_scope_closes_on_error() {
        let (loader, buffer) = buffered(ProgressBuilder::new(10));

        let result: Result<(), Error> = loader.scope(|loader| {
            loader.update(2)?;
            Err(Error::Io(io::Error::other("disk full")))
        });

        assert!(matches!(result, Err(Error::Io(_))));
        assert!(loader.is_closed());
        assert_eq!(buffer.contents().matches('\n').count(), 1);
    }

    /// With Function
    /// Every item is processed and counted, then the loader closes.
    #[test]
    fn test_with_function() {
        let (loader, buffer) = buffered(ProgressBuilder::new(4));
        let mut seen = Vec::new();

        loader
            .with_function(
                |item: u32, loader: &ProgressLoader| -> Result<(), Error> {
                    seen.push((item, loader.position()));
                    Ok(())
                },
                [10, 20, 30, 40],
            )
            .unwrap();

        assert_eq!(seen, vec![(10, 0), (20, 1), (30, 2), (40, 3)]);
        assert_eq!(loader.position(), 4);
        assert!(loader.is_closed());
        assert!(last_line(&buffer).contains("(4/4 items)"));
    }

    /// With Function Errors
    /// Processing stops at the first failing item and the loader still closes.
    #[test]
    fn test_with_function_stops_at_error() {
        let (loader, buffer) = buffered(ProgressBuilder::new(5));

        let result = loader.with_function(
            |item: u32, _: &ProgressLoader| {
                if item == 3 {
                    Err(Error::EmptyData)
                } else {
                    Ok(())
                }
            },
            1..=5,
        );

        assert!(result.is_err());
        assert_eq!(loader.position(), 2);
        assert!(loader.is_closed());
        assert_eq!(buffer.contents().matches('\n').count(), 1);
    }

    /// With Function Input
    /// No items is an error, and nothing is drawn.
    #[test]
    fn test_with_function_rejects_empty() {
        let (loader, buffer) = buffered(ProgressBuilder::new(5));
        let result = loader.with_function(|_: u32, _: &ProgressLoader| Ok::<(), Error>(()), []);

        assert!(matches!(result, Err(Error::EmptyData)));
        assert!(buffer.contents().is_empty());
    }

    /// Shared Across Threads
    /// Workers advancing one loader lose no updates.
    #[test]
    fn test_threads_share_loader() {
        let (loader, buffer) = buffered(ProgressBuilder::new(1_000));
        loader.start().unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let loader = loader.clone();
                thread::spawn(move || {
                    for _ in 0..200 {
                        loader.update(1).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(loader.position(), 1_000);
        loader.close().unwrap();
        assert!(last_line(&buffer).contains("(1000/1000 items)"));
    }

    /// Drop
    /// Dropping the last handle of a started loader closes it.
    #[test]
    fn test_drop_closes_started_loader() {
        let (target, buffer) = ProgressTarget::buffer();
        let loader = ProgressBuilder::new(2).target(target.clone()).build().unwrap();
        loader.start().unwrap();
        drop(loader);
        assert!(buffer.contents().ends_with('\n'));

        buffer.clear();
        let untouched = ProgressBuilder::new(2).target(target).build().unwrap();
        drop(untouched);
        assert!(buffer.contents().is_empty());
    }

    /// Steady Tick
    /// The ticker redraws without updates and stops after close.
    #[test]
    fn test_steady_tick() {
        let (target, _buffer) = ProgressTarget::buffer();
        let loader = ProgressBuilder::indeterminate()
            .style(Style::Spinner)
            .refresh_rate(Duration::from_millis(5))
            .steady_tick(true)
            .target(target)
            .build()
            .unwrap();

        loader.start().unwrap();
        thread::sleep(Duration::from_millis(100));
        assert!(loader.frames() > 1);

        loader.close().unwrap();
        let frames = loader.frames();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(loader.frames(), frames);
    }
}
