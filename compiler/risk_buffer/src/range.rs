//! Index-space ranges.

use std::fmt;

use crate::BufferIndex;

/// A `start`/`len` locator in a buffer's index space.
///
/// Holds offsets rather than a pointer, so it stays valid across
/// reallocation of the buffer. It becomes stale if elements before `start`
/// are popped or truncated away. Resolve it with
/// [`Buffer::resolve`](crate::Buffer::resolve).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexedRange<I> {
    start: I,
    len: I,
}

impl<I: BufferIndex> IndexedRange<I> {
    #[inline]
    pub const fn new(start: I, len: I) -> Self {
        IndexedRange { start, len }
    }

    /// The stored `start` and `len` in the index type.
    #[inline]
    pub fn into_parts(self) -> (I, I) {
        (self.start, self.len)
    }

    /// First position covered by the range.
    #[inline]
    pub fn start(&self) -> usize {
        self.start.index()
    }

    /// Number of elements covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.len.index()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One past the last position covered, saturating at `usize::MAX`.
    #[inline]
    pub fn end(&self) -> usize {
        self.start().saturating_add(self.len())
    }
}

impl<I: BufferIndex> fmt::Debug for IndexedRange<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndexedRange({}..{})", self.start(), self.end())
    }
}
