//! Fluent configuration for [`ProgressLoader`] instances.
//!
//! A [`ProgressBuilder`] collects every option a loader understands, validates them in
//! [`build`](ProgressBuilder::build), and is cheap to clone. Cloning is what makes
//! [`wrap`](ProgressBuilder::wrap) work: each call of the wrapped function builds a
//! fresh loader from its own copy of the configuration.
//!
//! # Example
//!
//! ```no_run
//! use progress_loader::{Color, ProgressBuilder, Style};
//!
//! # fn main() -> progress_loader::Result<()> {
//! let loader = ProgressBuilder::new(10)
//!     .desc("Processing data")
//!     .style(Style::Bar)
//!     .color(Color::Blue)
//!     .build()?;
//!
//! loader.start()?;
//! for _ in 0..10 {
//!     loader.update(1)?;
//! }
//! loader.close()?;
//! # Ok(())
//! # }
//! ```

use std::{fmt, sync::Arc, time::Duration};

use compact_str::CompactString;

use crate::{
    error::{Error, Result},
    loader::ProgressLoader,
    progress::ProgressSnapshot,
    render::RenderConfig,
    style::{Color, Style},
    target::ProgressTarget,
};

/// Hook invoked after every update with the loader that was advanced.
pub type Callback = Arc<dyn Fn(&ProgressLoader) + Send + Sync>;

/// Custom line renderer replacing the built-in styles.
pub type RenderCallback = Arc<dyn Fn(&ProgressSnapshot) -> String + Send + Sync>;

/// Default pause between redraws.
pub const DEFAULT_REFRESH_RATE: Duration = Duration::from_millis(100);

/// A builder for [`ProgressLoader`] configuration.
#[derive(Clone)]
pub struct ProgressBuilder {
    pub(crate) total: Option<u64>,
    pub(crate) description: CompactString,
    pub(crate) unit: CompactString,
    pub(crate) render: RenderConfig,
    pub(crate) refresh_rate: Duration,
    pub(crate) callback: Option<Callback>,
    pub(crate) render_callback: Option<RenderCallback>,
    pub(crate) target: ProgressTarget,
    pub(crate) steady_tick: bool,
}

impl Default for ProgressBuilder {
    fn default() -> Self {
        Self {
            total: None,
            description: CompactString::const_new("Progress"),
            unit: CompactString::const_new("items"),
            render: RenderConfig::default(),
            refresh_rate: DEFAULT_REFRESH_RATE,
            callback: None,
            render_callback: None,
            target: ProgressTarget::default(),
            steady_tick: false,
        }
    }
}

impl fmt::Debug for ProgressBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressBuilder")
            .field("total", &self.total)
            .field("description", &self.description)
            .field("unit", &self.unit)
            .field("render", &self.render)
            .field("refresh_rate", &self.refresh_rate)
            .field("callback", &self.callback.is_some())
            .field("render_callback", &self.render_callback.is_some())
            .field("target", &self.target)
            .field("steady_tick", &self.steady_tick)
            .finish()
    }
}

impl ProgressBuilder {
    /// Starts building a loader with a known total.
    ///
    /// A total of zero is rejected by [`build`](Self::build).
    #[must_use]
    pub fn new(total: u64) -> Self {
        Self {
            total: Some(total),
            ..Default::default()
        }
    }

    /// Starts building a loader whose total is unknown.
    #[must_use]
    pub fn indeterminate() -> Self {
        Self::default()
    }

    /// Sets the label shown before the indicator.
    #[must_use]
    pub fn desc(mut self, description: impl Into<CompactString>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the label for the counted items.
    #[must_use]
    pub fn unit(mut self, unit: impl Into<CompactString>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Sets the indicator style.
    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.render.style = style;
        self
    }

    /// Sets the line color.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.render.color = color;
        self
    }

    /// Sets the glyph for completed cells.
    #[must_use]
    pub const fn fill_char(mut self, fill: char) -> Self {
        self.render.fill_char = fill;
        self
    }

    /// Sets the glyph for remaining cells.
    #[must_use]
    pub const fn empty_char(mut self, empty: char) -> Self {
        self.render.empty_char = empty;
        self
    }

    /// Sets the number of cells in the bar.
    #[must_use]
    pub const fn width(mut self, width: usize) -> Self {
        self.render.width = width;
        self
    }

    /// Sets the minimum pause between redraws (and the steady tick interval).
    #[must_use]
    pub const fn refresh_rate(mut self, refresh_rate: Duration) -> Self {
        self.refresh_rate = refresh_rate;
        self
    }

    /// Sets a hook called after every update.
    #[must_use]
    pub fn callback(mut self, callback: impl Fn(&ProgressLoader) + Send + Sync + 'static) -> Self {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Replaces the built-in line with a custom one.
    ///
    /// Redrawing in place and the configured color still apply.
    #[must_use]
    pub fn render_callback(
        mut self,
        render: impl Fn(&ProgressSnapshot) -> String + Send + Sync + 'static,
    ) -> Self {
        self.render_callback = Some(Arc::new(render));
        self
    }

    /// Sets the output stream.
    #[must_use]
    pub fn target(mut self, target: ProgressTarget) -> Self {
        self.target = target;
        self
    }

    /// Redraws from a background thread every refresh interval while started,
    /// so spinners keep moving between updates.
    #[must_use]
    pub const fn steady_tick(mut self, enabled: bool) -> Self {
        self.steady_tick = enabled;
        self
    }

    /// Validates the configuration and constructs the loader.
    ///
    /// # Errors
    ///
    /// Fails if the total is zero, the width or refresh rate is zero, or a glyph is
    /// a control character.
    pub fn build(self) -> Result<ProgressLoader> {
        self.validate()?;
        Ok(self.assemble())
    }

    fn validate(&self) -> Result<()> {
        if self.total == Some(0) {
            return Err(Error::InvalidTotal(0));
        }
        if self.render.width == 0 {
            return Err(Error::InvalidWidth(0));
        }
        if self.refresh_rate.is_zero() {
            return Err(Error::InvalidRefreshRate(self.refresh_rate));
        }
        for (which, value) in [("fill", self.render.fill_char), ("empty", self.render.empty_char)] {
            if value.is_control() {
                return Err(Error::InvalidChar { which, value });
            }
        }
        Ok(())
    }

    /// Constructs the loader without validation; callers guarantee valid settings.
    pub(crate) fn assemble(self) -> ProgressLoader {
        ProgressLoader::from_builder(self)
    }

    /// Wraps `f` so every call runs inside a fresh, started loader.
    ///
    /// The loader is passed to `f` as an extra argument and closed after `f` returns,
    /// fails or panics.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use progress_loader::{Error, ProgressBuilder};
    ///
    /// let process = ProgressBuilder::new(3).desc("Processing").wrap(
    ///     |data: Vec<u32>, loader| -> Result<u32, Error> {
    ///         let mut sum = 0;
    ///         for n in data {
    ///             sum += n;
    ///             loader.update(1)?;
    ///         }
    ///         Ok(sum)
    ///     },
    /// );
    ///
    /// assert_eq!(process(vec![1, 2, 3]).unwrap(), 6);
    /// ```
    pub fn wrap<A, T, E, F>(self, f: F) -> impl Fn(A) -> std::result::Result<T, E>
    where
        F: Fn(A, &ProgressLoader) -> std::result::Result<T, E>,
        E: From<Error>,
    {
        move |args| with_progress(self.clone(), |loader| f(args, loader))
    }
}

/// Builds a loader from `builder`, runs `f` inside its scoped session and closes it.
///
/// # Errors
///
/// Returns configuration errors from `builder`, errors from `f`, and output errors.
pub fn with_progress<T, E, F>(builder: ProgressBuilder, f: F) -> std::result::Result<T, E>
where
    F: FnOnce(&ProgressLoader) -> std::result::Result<T, E>,
    E: From<Error>,
{
    let loader = builder.build()?;
    loader.scope(f)
}
