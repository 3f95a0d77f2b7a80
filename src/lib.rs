//! # `progress_loader`
//!
//! Live-updating terminal progress indicators for long-running work.
//!
//! A [`ProgressLoader`] tracks a counter against a known or unknown total and redraws a
//! single terminal line in place: a bar, a spinner, a run of dots or a clock face,
//! followed by the counter, elapsed time and an ETA. It is designed to be:
//!
//! * **Scoped**: sessions are closed by guards and closures, so the terminal is left on a
//!   clean line even when the work fails or panics.
//! * **Concurrent**: handles are cheap to clone ([`Arc`](std::sync::Arc)-based) and safe to
//!   share across threads; counter updates are atomic.
//! * **Throttled**: redraws happen at most once per refresh interval, plus once the total
//!   is reached.
//!
//! ```no_run
//! use progress_loader::{Color, Error, ProgressBuilder, Style};
//!
//! # fn main() -> Result<(), Error> {
//! let loader = ProgressBuilder::new(10)
//!     .desc("Processing data")
//!     .style(Style::Bar)
//!     .color(Color::Blue)
//!     .build()?;
//!
//! loader.with_function(
//!     |item: u32, _loader| {
//!         let _ = item * 2;
//!         Ok::<(), Error>(())
//!     },
//!     1..=10,
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! * [`builder`]: Fluent, validating configuration and the function-wrapping helper.
//! * [`loader`]: The [`ProgressLoader`] driver and scoped [`Session`]s.
//! * [`progress`]: The shared counter and [`ProgressSnapshot`] with its derived metrics.
//! * [`render`]: Pure rendering of a snapshot into a line of text.
//! * [`style`]: [`Style`] and [`Color`] with their glyph tables.
//! * [`target`]: Output streams.
//! * [`iter`]: Extension traits for tracking progress on Iterators.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod builder;
pub mod error;
pub mod iter;
pub mod loader;
pub mod progress;
pub mod render;
pub mod style;
pub mod target;

pub use builder::{ProgressBuilder, with_progress};
pub use error::{Error, Result};
pub use iter::{ProgressIter, ProgressIteratorExt};
pub use loader::{ProgressLoader, Session};
pub use progress::{ProgressSnapshot, ProgressState};
pub use render::{RenderConfig, render_line};
pub use style::{Color, Style};
pub use target::{OutputBuffer, ProgressTarget};
