//! Where progress lines are written.
//!
//! A [`ProgressTarget`] is cheap to clone so a [`ProgressBuilder`](crate::ProgressBuilder)
//! can be reused for many loaders. Custom writers are shared behind a
//! [`Mutex`](parking_lot::Mutex); [`ProgressTarget::buffer`] gives an in-memory sink whose
//! contents can be read back, which is how the tests observe rendered output.

use std::{
    fmt,
    io::{self, IsTerminal, Write},
    sync::Arc,
};

use owo_colors::Stream;
use parking_lot::Mutex;

/// Output stream for a progress loader.
#[derive(Clone, Default)]
pub enum ProgressTarget {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
    /// Any writer, shared between clones.
    Writer(Arc<Mutex<dyn Write + Send>>),
}

impl fmt::Debug for ProgressTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("Stdout"),
            Self::Stderr => f.write_str("Stderr"),
            Self::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

impl ProgressTarget {
    /// Wraps a custom writer.
    pub fn writer(writer: impl Write + Send + 'static) -> Self {
        Self::Writer(Arc::new(Mutex::new(writer)))
    }

    /// An in-memory target and a handle for reading what was written to it.
    #[must_use]
    pub fn buffer() -> (Self, OutputBuffer) {
        let buffer = OutputBuffer::default();
        (Self::writer(buffer.clone()), buffer)
    }

    /// Whether line-clearing escape codes should be written.
    ///
    /// Standard streams qualify only when attached to a terminal. Custom writers are
    /// assumed to want the same bytes a terminal would get.
    #[must_use]
    pub fn supports_ansi(&self) -> bool {
        match self {
            Self::Stdout => io::stdout().is_terminal(),
            Self::Stderr => io::stderr().is_terminal(),
            Self::Writer(_) => true,
        }
    }

    /// The standard stream whose color support gates painting, `None` for custom writers.
    #[must_use]
    pub const fn color_stream(&self) -> Option<Stream> {
        match self {
            Self::Stdout => Some(Stream::Stdout),
            Self::Stderr => Some(Stream::Stderr),
            Self::Writer(_) => None,
        }
    }

    /// Writes `bytes` and flushes, so the redraw is visible immediately.
    pub(crate) fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
        match self {
            Self::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(bytes)?;
                out.flush()
            }
            Self::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(bytes)?;
                err.flush()
            }
            Self::Writer(writer) => {
                let mut writer = writer.lock();
                writer.write_all(bytes)?;
                writer.flush()
            }
        }
    }
}

/// A cloneable in-memory writer.
#[derive(Clone, Default)]
pub struct OutputBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl OutputBuffer {
    /// Everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use super::ProgressTarget;

    /// Buffer Tracking
    /// Clones of the target write into the same buffer.
    #[test]
    fn test_buffer_shared_between_clones() {
        let (target, buffer) = ProgressTarget::buffer();
        let clone = target.clone();

        target.write_all(b"\rone").unwrap();
        clone.write_all(b"\rtwo").unwrap();

        assert_eq!(buffer.contents(), "\rone\rtwo");
        buffer.clear();
        assert!(buffer.contents().is_empty());
    }

    /// Escape Code Gating
    /// Custom writers always receive escape codes and are not tied to a stream.
    #[test]
    fn test_writer_targets_take_ansi() {
        let (target, _buffer) = ProgressTarget::buffer();
        assert!(target.supports_ansi());
        assert!(target.color_stream().is_none());
        assert!(ProgressTarget::Stdout.color_stream().is_some());
        assert!(ProgressTarget::Stderr.color_stream().is_some());
    }

    /// Writer Failures
    /// Errors from the underlying writer are returned to the caller.
    #[test]
    fn test_writer_errors_propagate() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let target = ProgressTarget::writer(Broken);
        let err = target.write_all(b"x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
