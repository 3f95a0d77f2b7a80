//! Turning a [`ProgressSnapshot`] into one line of text.
//!
//! Rendering is a pure function of the configuration, the snapshot and a frame number,
//! so every style can be checked without a terminal. The driver owns the side effects:
//! carriage return, line clearing, color and flushing.

use std::{fmt::Write as _, time::Duration};

use compact_str::CompactString;

use crate::{
    progress::ProgressSnapshot,
    style::{CLOCK_GLYPHS, Color, DOTS_MODULUS, SPINNER_GLYPHS, Style},
};

/// Everything about a loader's appearance that does not change while it runs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderConfig {
    /// Indicator style.
    pub style: Style,
    /// Line color.
    pub color: Color,
    /// Glyph for completed cells and dots.
    pub fill_char: char,
    /// Glyph for remaining cells and dot padding.
    pub empty_char: char,
    /// Number of cells in the bar.
    pub width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            style: Style::Bar,
            color: Color::Default,
            fill_char: '#',
            empty_char: '-',
            width: 20,
        }
    }
}

/// Renders the uncolored line for `snapshot`.
///
/// `frame` is the number of frames drawn before this one; the spinner (and a clock with
/// an indeterminate total) animate off it.
#[must_use]
pub fn render_line(config: &RenderConfig, snapshot: &ProgressSnapshot, frame: u64) -> String {
    let mut line = String::with_capacity(64);
    let _ = write!(line, "{}: ", snapshot.description());

    match config.style {
        Style::Bar => {
            let cells = match snapshot.total() {
                Some(total) => bar_cells(
                    config.width,
                    config.fill_char,
                    config.empty_char,
                    snapshot.position(),
                    total,
                ),
                None => std::iter::repeat_n(config.empty_char, config.width).collect(),
            };
            let _ = write!(line, "[{cells}]");
            if snapshot.total().is_some() {
                let _ = write!(line, " {:.1}%", snapshot.percentage());
            }
        }
        Style::Spinner => line.push(spinner_glyph(frame)),
        Style::Dots => {
            line.push_str(&dots_run(config.fill_char, config.empty_char, snapshot.position()));
        }
        Style::Clock => {
            let glyph = match snapshot.total() {
                Some(_) => clock_glyph(snapshot.percentage()),
                #[allow(clippy::cast_possible_truncation)]
                None => CLOCK_GLYPHS[(frame % CLOCK_GLYPHS.len() as u64) as usize],
            };
            line.push_str(glyph);
        }
    }

    let _ = write!(line, " ({})", counter(snapshot));
    line.push_str(&timing(snapshot));
    line
}

/// Fill and empty cells for a bar of `width` cells at `position` out of `total`.
///
/// The filled length is `round(width * position / total)`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn bar_cells(width: usize, fill: char, empty: char, position: u64, total: u64) -> String {
    let filled = if total == 0 {
        0
    } else {
        let ratio = position.min(total) as f64 / total as f64;
        ((width as f64 * ratio).round() as usize).min(width)
    };

    let mut cells = CompactString::default();
    cells.extend(std::iter::repeat_n(fill, filled));
    cells.extend(std::iter::repeat_n(empty, width - filled));
    cells.into()
}

/// Spinner glyph for the given frame.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub const fn spinner_glyph(frame: u64) -> char {
    SPINNER_GLYPHS[(frame % SPINNER_GLYPHS.len() as u64) as usize]
}

/// Index into [`CLOCK_GLYPHS`] for a percentage: twelve equal buckets over `[0, 100)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn clock_index(percentage: f64) -> usize {
    let buckets = CLOCK_GLYPHS.len();
    let pct = percentage.clamp(0.0, 100.0);
    ((pct * buckets as f64 / 100.0).floor() as usize).min(buckets - 1)
}

/// Clock face for a percentage.
#[must_use]
pub fn clock_glyph(percentage: f64) -> &'static str {
    CLOCK_GLYPHS[clock_index(percentage)]
}

/// A run of `position % 4` fill glyphs, padded to three with empty glyphs.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn dots_run(fill: char, empty: char, position: u64) -> String {
    let width = (DOTS_MODULUS - 1) as usize;
    let run = (position % DOTS_MODULUS) as usize;
    std::iter::repeat_n(fill, run)
        .chain(std::iter::repeat_n(empty, width - run))
        .collect()
}

fn counter(snapshot: &ProgressSnapshot) -> String {
    match snapshot.total() {
        Some(total) => format!("{}/{} {}", snapshot.position(), total, snapshot.unit()),
        None => format!("{} {}", snapshot.position(), snapshot.unit()),
    }
}

fn timing(snapshot: &ProgressSnapshot) -> String {
    let elapsed = format_duration(snapshot.elapsed().unwrap_or_default());
    match snapshot.eta() {
        Some(eta) => format!(" [{elapsed} < {}]", format_duration(eta)),
        None => format!(" [{elapsed}]"),
    }
}

/// Formats a duration as `5s`, `1m 30s` or `2h 5m`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.as_secs();
    if seconds < 60 {
        format!("{seconds}s")
    } else if seconds < 3600 {
        let minutes = seconds / 60;
        match seconds % 60 {
            0 => format!("{minutes}m"),
            rest => format!("{minutes}m {rest}s"),
        }
    } else {
        let hours = seconds / 3600;
        match (seconds % 3600) / 60 {
            0 => format!("{hours}h"),
            minutes => format!("{hours}h {minutes}m"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{
        RenderConfig, bar_cells, clock_glyph, clock_index, dots_run, format_duration,
        render_line, spinner_glyph,
    };
    use crate::{ProgressSnapshot, Style};

    fn snap(position: u64, total: Option<u64>) -> ProgressSnapshot {
        ProgressSnapshot::new("Loading", "items", position, total, None)
    }

    /// Bar Cells
    /// Three out of ten on a ten-cell bar.
    #[test]
    fn test_bar_cells() {
        assert_eq!(bar_cells(10, '#', '-', 3, 10), "###-------");
        assert_eq!(bar_cells(10, '#', '-', 0, 10), "----------");
        assert_eq!(bar_cells(10, '#', '-', 10, 10), "##########");
        // round(20 * 1/3) = 7
        assert_eq!(bar_cells(20, '=', ' ', 1, 3).matches('=').count(), 7);
    }

    /// Bar Line
    /// Bar, percentage, counter and timing in one line.
    #[test]
    fn test_bar_line() {
        let config = RenderConfig {
            width: 10,
            ..RenderConfig::default()
        };
        let line = render_line(&config, &snap(3, Some(10)), 0);
        assert_eq!(line, "Loading: [###-------] 30.0% (3/10 items) [0s]");
    }

    /// Indeterminate Bar
    /// An unknown total draws an empty bar and a bare counter.
    #[test]
    fn test_bar_indeterminate() {
        let config = RenderConfig {
            width: 4,
            ..RenderConfig::default()
        };
        let line = render_line(&config, &snap(42, None), 0);
        assert_eq!(line, "Loading: [----] (42 items) [0s]");
    }

    /// Spinner
    /// Frames cycle through four glyphs regardless of progress.
    #[test]
    fn test_spinner_cycles_by_frame() {
        let config = RenderConfig {
            style: Style::Spinner,
            ..RenderConfig::default()
        };
        let glyphs: String = (0..5).map(spinner_glyph).collect();
        assert_eq!(glyphs, "-\\|/-");

        let a = render_line(&config, &snap(1, Some(10)), 2);
        let b = render_line(&config, &snap(9, Some(10)), 2);
        assert!(a.starts_with("Loading: | "));
        assert!(b.starts_with("Loading: | "));
    }

    /// Dots
    /// A wrapping run of fill glyphs padded with empty glyphs.
    #[test]
    fn test_dots_run() {
        assert_eq!(dots_run('*', '.', 0), "...");
        assert_eq!(dots_run('*', '.', 1), "*..");
        assert_eq!(dots_run('*', '.', 3), "***");
        assert_eq!(dots_run('*', '.', 4), "...");
        assert_eq!(dots_run('*', '.', 6), "**.");
    }

    /// Clock
    /// Percentages fall into twelve buckets; half way is six o'clock.
    #[test]
    fn test_clock_buckets() {
        assert_eq!(clock_index(0.0), 0);
        assert_eq!(clock_index(8.0), 0);
        assert_eq!(clock_index(8.34), 1);
        assert_eq!(clock_index(50.0), 6);
        assert_eq!(clock_glyph(50.0), "🕕");
        assert_eq!(clock_index(99.9), 11);
        assert_eq!(clock_index(100.0), 11);
    }

    /// Clock Line
    /// Half way renders the six o'clock face.
    #[test]
    fn test_clock_line() {
        let config = RenderConfig {
            style: Style::Clock,
            ..RenderConfig::default()
        };
        let line = render_line(&config, &snap(5, Some(10)), 0);
        assert_eq!(line, "Loading: 🕕 (5/10 items) [0s]");
    }

    /// Timing Segment
    /// Elapsed time is always shown, ETA only once it is defined.
    #[test]
    fn test_timing_segment() {
        let config = RenderConfig {
            style: Style::Dots,
            ..RenderConfig::default()
        };
        let started = ProgressSnapshot::new("Copy", "files", 2, Some(4), Some(Duration::from_secs(10)));
        assert_eq!(render_line(&config, &started, 0), "Copy: ##- (2/4 files) [10s < 10s]");
    }

    /// Duration Formatting
    /// Seconds, minutes and hours, dropping zero remainders.
    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_secs(59)), "59s");
        assert_eq!(format_duration(Duration::from_secs(60)), "1m");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h");
        assert_eq!(format_duration(Duration::from_secs(7500)), "2h 5m");
    }
}
