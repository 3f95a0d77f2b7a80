//! Iterator adapters that advance a loader as items are consumed.
//!
//! An item counts as done when the next one is requested, so the line reflects work
//! that has finished rather than work that has merely been handed out. Exhausting the
//! iterator counts the last item and closes the loader. An iterator that yields nothing
//! never starts its loader and writes nothing.
//!
//! # Heuristics
//!
//! [`ProgressIteratorExt::progress`] checks [`Iterator::size_hint`]:
//! * An exact, non-zero size becomes a known total.
//! * Anything else is indeterminate.
//!
//! # Example
//!
//! ```no_run
//! use progress_loader::ProgressIteratorExt;
//!
//! for file in ["a.txt", "b.txt", "c.txt"].into_iter().progress() {
//!     // ...
//! #   let _ = file;
//! }
//! ```

use crate::{builder::ProgressBuilder, loader::ProgressLoader};

/// An iterator adapter that advances a [`ProgressLoader`] per item.
pub struct ProgressIter<I> {
    iter: I,
    loader: ProgressLoader,
    pending: bool,
}

impl<I> ProgressIter<I> {
    /// Creates a new `ProgressIter`.
    ///
    /// Note: This is usually constructed via [`ProgressIteratorExt`] methods.
    pub const fn new(iter: I, loader: ProgressLoader) -> Self {
        Self {
            iter,
            loader,
            pending: false,
        }
    }

    /// The loader being advanced.
    pub const fn loader(&self) -> &ProgressLoader {
        &self.loader
    }

    fn settle(&mut self) {
        if std::mem::take(&mut self.pending) {
            if let Err(err) = self.loader.update(1) {
                log::warn!("progress update failed: {err}");
            }
        }
    }
}

impl<I: Iterator> Iterator for ProgressIter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.settle();
        let item = self.iter.next();

        if item.is_some() {
            if !self.loader.is_started() {
                if let Err(err) = self.loader.start() {
                    log::warn!("progress start failed: {err}");
                }
            }
            self.pending = true;
        } else if self.loader.is_started() {
            if let Err(err) = self.loader.close() {
                log::warn!("progress close failed: {err}");
            }
        }

        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Extension trait to attach a progress line to any Iterator.
pub trait ProgressIteratorExt: Iterator + Sized {
    /// Wraps the iterator in a loader sized from `size_hint`, drawing to stdout.
    fn progress(self) -> ProgressIter<Self> {
        let builder = match self.total_from_size_hint() {
            Some(total) => ProgressBuilder::new(total),
            None => ProgressBuilder::indeterminate(),
        };
        ProgressIter::new(self, builder.assemble())
    }

    /// Wraps the iterator using an existing loader.
    fn progress_with(self, loader: ProgressLoader) -> ProgressIter<Self> {
        ProgressIter::new(self, loader)
    }

    /// The exact, non-zero length reported by `size_hint`, if any.
    fn total_from_size_hint(&self) -> Option<u64> {
        match self.size_hint() {
            (lower, Some(upper)) if lower == upper && upper > 0 => Some(upper as u64),
            _ => None,
        }
    }
}

impl<I: Iterator> ProgressIteratorExt for I {}
