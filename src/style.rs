//! Visual styles and colors.
//!
//! A [`Style`] picks how the progress line is drawn; a [`Color`] optionally wraps the
//! whole line in an ANSI foreground color. Both parse from the lowercase names used
//! on the command line and in configuration files.

use std::{fmt, str::FromStr};

use owo_colors::{OwoColorize, Stream};

use crate::error::Error;

/// Spinner frames, advanced once per render.
pub const SPINNER_GLYPHS: [char; 4] = ['-', '\\', '|', '/'];

/// Clock faces from 12 o'clock round to 11 o'clock.
pub const CLOCK_GLYPHS: [&str; 12] = [
    "🕛", "🕐", "🕑", "🕒", "🕓", "🕔", "🕕", "🕖", "🕗", "🕘", "🕙", "🕚",
];

/// Length of the wrapping run drawn by [`Style::Dots`].
pub const DOTS_MODULUS: u64 = 4;

/// How the progress line is drawn.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Style {
    /// A fixed-width bar filled in proportion to the percentage.
    #[default]
    Bar,
    /// A rotating glyph, advanced on every render.
    Spinner,
    /// A run of fill glyphs that grows with each item and wraps.
    Dots,
    /// A clock face whose hour hand follows the percentage.
    #[cfg_attr(feature = "serde", serde(alias = "time_clock"))]
    Clock,
}

impl Style {
    /// All styles, in display order.
    pub const ALL: [Self; 4] = [Self::Bar, Self::Spinner, Self::Dots, Self::Clock];

    /// The lowercase name of the style.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Spinner => "spinner",
            Self::Dots => "dots",
            Self::Clock => "clock",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(Self::Bar),
            "spinner" => Ok(Self::Spinner),
            "dots" => Ok(Self::Dots),
            "clock" | "time_clock" => Ok(Self::Clock),
            _ => Err(Error::InvalidStyle(s.to_owned())),
        }
    }
}

/// Foreground color applied to the whole progress line.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Color {
    /// No escape sequences; the terminal's own color.
    #[default]
    Default,
    /// Bright blue.
    Blue,
    /// Bright green.
    Green,
    /// Bright red.
    Red,
}

impl Color {
    /// The lowercase name of the color.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Red => "red",
        }
    }

    /// Wraps `line` in this color's escape sequences.
    #[must_use]
    pub fn paint(self, line: &str) -> String {
        match self {
            Self::Default => line.to_owned(),
            Self::Blue => line.bright_blue().to_string(),
            Self::Green => line.bright_green().to_string(),
            Self::Red => line.bright_red().to_string(),
        }
    }

    /// Like [`paint`](Self::paint), but only when `stream` supports color.
    ///
    /// `None` paints unconditionally. Color support follows the `NO_COLOR` and
    /// `FORCE_COLOR` conventions and whether the stream is a terminal.
    #[must_use]
    pub fn paint_for(self, line: &str, stream: Option<Stream>) -> String {
        let Some(stream) = stream else {
            return self.paint(line);
        };
        match self {
            Self::Default => line.to_owned(),
            Self::Blue => line.if_supports_color(stream, |l| l.bright_blue()).to_string(),
            Self::Green => line.if_supports_color(stream, |l| l.bright_green()).to_string(),
            Self::Red => line.if_supports_color(stream, |l| l.bright_red()).to_string(),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" | "none" | "" => Ok(Self::Default),
            "blue" => Ok(Self::Blue),
            "green" => Ok(Self::Green),
            "red" => Ok(Self::Red),
            _ => Err(Error::InvalidColor(s.to_owned())),
        }
    }
}
