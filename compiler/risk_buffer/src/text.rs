//! Byte buffer specialized for building text.
//!
//! [`StrBuf`] accumulates formatted output in a [`Buffer<u8>`] and writes
//! it out in one go with [`StrBuf::flush`]. Only `&str` data is ever
//! appended, so the contents are always valid UTF-8.

use std::fmt;
use std::io;

use risk_diagnostic::{risk_assert, risk_unreachable};
use tracing::debug;

use crate::{Buffer, BufferError, IndexedRange};

/// `n` kibibytes.
pub const fn kb(n: usize) -> usize {
    n * 1024
}

/// `n` mebibytes.
pub const fn mb(n: usize) -> usize {
    kb(n) * 1024
}

/// `n` gibibytes.
pub const fn gb(n: usize) -> usize {
    mb(n) * 1024
}

/// Default capacity for output buffers.
pub const PAGE_SIZE: usize = kb(4);

/// Growable UTF-8 text buffer.
#[derive(Clone, Default)]
pub struct StrBuf {
    bytes: Buffer<u8>,
}

impl StrBuf {
    /// Buffer with room for exactly `capacity` bytes.
    #[track_caller]
    pub fn alloc(capacity: usize) -> Self {
        StrBuf {
            bytes: Buffer::alloc(capacity),
        }
    }

    /// Buffer with one page of capacity.
    #[track_caller]
    pub fn page() -> Self {
        Self::alloc(PAGE_SIZE)
    }

    /// Release the storage.
    pub fn dealloc(self) {
        self.bytes.dealloc();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// Append `s`.
    #[track_caller]
    pub fn push_str(&mut self, s: &str) {
        self.bytes.extend(s.as_bytes());
    }

    /// Append formatted text. Use with `format_args!` or [`sb_printf!`](crate::sb_printf).
    ///
    /// On failure nothing of this call's text is kept. Running out of
    /// storage is reported as the buffer's `AllocationFailure`; an error
    /// from a `Display` impl as `fmt error`.
    #[track_caller]
    pub fn printf(&mut self, args: fmt::Arguments<'_>) {
        let start = self.len();
        let mut out = Appender {
            bytes: &mut self.bytes,
            failure: None,
        };
        let result = fmt::Write::write_fmt(&mut out, args);
        let failure = out.failure;

        if result.is_err() {
            self.bytes.pop_n(self.bytes.len() - start);
        }
        if let Some(err) = failure {
            err.report();
        }
        risk_assert!(result.is_ok(), "fmt error");
    }

    /// Append `n` copies of the formatted text. The arguments are formatted
    /// once; `n == 0` appends nothing.
    #[track_caller]
    pub fn printf_repeat(&mut self, n: usize, args: fmt::Arguments<'_>) {
        if n == 0 {
            return;
        }

        let start = self.len();
        self.printf(args);
        let chunk = IndexedRange::new(start, self.len() - start);
        if chunk.is_empty() {
            return;
        }
        self.bytes.reserve(chunk.len().saturating_mul(n - 1));
        for _ in 1..n {
            self.bytes.extend_from_range(chunk);
        }
    }

    /// Write the contents to `out` and empty the buffer. Capacity is kept.
    ///
    /// On an I/O error the contents are left in place.
    pub fn flush<W: io::Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.is_empty() {
            return Ok(());
        }

        out.write_all(self.bytes.as_slice().as_slice())?;
        debug!(bytes = self.len(), "string buffer flushed");
        self.bytes.pop_n(self.bytes.len());
        Ok(())
    }

    /// The contents as text.
    pub fn as_str(&self) -> &str {
        match std::str::from_utf8(self.bytes.as_slice().as_slice()) {
            Ok(text) => text,
            Err(err) => risk_unreachable!("string buffer holds invalid UTF-8: {err}"),
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice().as_slice()
    }
}

/// Formatting sink that keeps the buffer error a `fmt::Error` stands for.
struct Appender<'a> {
    bytes: &'a mut Buffer<u8>,
    failure: Option<BufferError>,
}

impl fmt::Write for Appender<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self.bytes.try_extend(s.as_bytes()) {
            Ok(_) => Ok(()),
            Err(err) => {
                self.failure = Some(err);
                Err(fmt::Error)
            }
        }
    }
}

impl fmt::Write for StrBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.bytes
            .try_extend(s.as_bytes())
            .map(|_| ())
            .map_err(|_| fmt::Error)
    }
}

impl fmt::Display for StrBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for StrBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrBuf")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("text", &self.as_str())
            .finish()
    }
}

/// Append formatted text to a [`StrBuf`].
///
/// ```
/// use risk_buffer::{sb_printf, StrBuf};
///
/// let mut sb = StrBuf::page();
/// sb_printf!(sb, "{} is {}", "RISK", "self-known");
/// assert_eq!(sb.as_str(), "RISK is self-known");
/// ```
#[macro_export]
macro_rules! sb_printf {
    ($sb:expr, $($arg:tt)+) => {
        $sb.printf(::std::format_args!($($arg)+))
    };
}
