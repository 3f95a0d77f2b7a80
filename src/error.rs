//! Error types for progress loaders.
//!
//! Configuration problems are reported when a [`ProgressBuilder`](crate::ProgressBuilder)
//! is built (or when a [`Style`](crate::Style) / [`Color`](crate::Color) is parsed from a
//! string). Output failures surface from the driver operations that write to the
//! terminal.

use std::io;

use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while configuring or driving a progress loader.
#[derive(Error, Debug)]
pub enum Error {
    /// The style name is not one of the known styles.
    #[error("invalid style '{0}', expected one of: bar, spinner, dots, clock")]
    InvalidStyle(String),

    /// The color name is not one of the known colors.
    #[error("invalid color '{0}', expected one of: default, blue, green, red")]
    InvalidColor(String),

    /// A fill or empty glyph is not a single printable character.
    #[error("invalid {which} character {value:?}: must be a single printable character")]
    InvalidChar {
        /// Which glyph was rejected (`fill` or `empty`).
        which: &'static str,
        /// The rejected character.
        value: char,
    },

    /// A known total must be strictly positive.
    #[error("invalid total {0}: a known total must be greater than zero")]
    InvalidTotal(u64),

    /// The bar width must be strictly positive.
    #[error("invalid bar width {0}: must be greater than zero")]
    InvalidWidth(usize),

    /// The refresh rate must be strictly positive.
    #[error("invalid refresh rate {0:?}: must be greater than zero")]
    InvalidRefreshRate(std::time::Duration),

    /// `with_function` was given nothing to process.
    #[error("no items to process")]
    EmptyData,

    /// Writing to the output stream failed.
    #[error("failed to write progress output: {0}")]
    Io(#[from] io::Error),
}
