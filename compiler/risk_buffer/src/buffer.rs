//! The owning growable buffer.

use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::error::OrFatal;
use crate::growth::grow_capacity;
use crate::{BufferError, BufferIndex, IndexedRange, Slice};

/// Owning, growable, contiguous buffer of `T` addressed by index type `I`.
///
/// # Capacity
///
/// `capacity` is the policy capacity from [`grow_capacity`]: it only ever
/// increases and the backing storage always holds at least that many slots.
/// Live elements occupy `[0, len)` with `len <= capacity`.
///
/// # Failure
///
/// Plain operations report violated preconditions through
/// `risk_diagnostic` and do not return. The `try_*` twins return
/// [`BufferError`] instead and leave the buffer untouched on error.
pub struct Buffer<T, I: BufferIndex = usize> {
    items: Vec<T>,
    capacity: usize,
    index: PhantomData<I>,
}

impl<T, I: BufferIndex> Buffer<T, I> {
    /// Empty buffer with no storage.
    pub const fn new() -> Self {
        Buffer {
            items: Vec::new(),
            capacity: 0,
            index: PhantomData,
        }
    }

    // ===== Lifecycle =====

    /// Allocate storage for exactly `capacity` elements. `0` allocates nothing.
    #[track_caller]
    pub fn alloc(capacity: usize) -> Self {
        Self::try_alloc(capacity).or_fatal()
    }

    pub fn try_alloc(capacity: usize) -> Result<Self, BufferError> {
        let mut items = Vec::new();
        if capacity > 0 {
            items
                .try_reserve_exact(capacity)
                .map_err(|_| BufferError::AllocationFailure {
                    requested: capacity,
                })?;
        }
        Ok(Buffer {
            items,
            capacity,
            index: PhantomData,
        })
    }

    /// Release the storage.
    pub fn dealloc(self) {
        drop(self);
    }

    // ===== Queries =====

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Policy capacity (see the type docs).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All live elements.
    #[inline]
    pub fn as_slice(&self) -> Slice<'_, T> {
        Slice::new(&self.items)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    // ===== Growth =====

    /// Ensure room for `additional` more elements.
    #[track_caller]
    pub fn reserve(&mut self, additional: usize) {
        self.try_reserve(additional).or_fatal();
    }

    pub fn try_reserve(&mut self, additional: usize) -> Result<(), BufferError> {
        let len = self.items.len();
        let target = grow_capacity(self.capacity, len, additional).ok_or(
            BufferError::AllocationFailure {
                requested: len.saturating_add(additional),
            },
        )?;
        if target == self.capacity {
            return Ok(());
        }

        self.items
            .try_reserve_exact(target - len)
            .map_err(|_| BufferError::AllocationFailure { requested: target })?;
        trace!(
            old_capacity = self.capacity,
            new_capacity = target,
            len,
            "buffer grown"
        );
        self.capacity = target;
        Ok(())
    }

    // ===== Push / pop =====

    /// Append `value`.
    #[track_caller]
    pub fn push(&mut self, value: T) {
        self.try_push(value).or_fatal();
    }

    pub fn try_push(&mut self, value: T) -> Result<(), BufferError> {
        self.try_reserve(1)?;
        self.items.push(value);
        Ok(())
    }

    /// Append `value` and return its id: the length before the push.
    ///
    /// The id is stable for as long as no earlier element is removed.
    #[track_caller]
    pub fn push_with_id(&mut self, value: T) -> I {
        self.try_push_with_id(value).or_fatal()
    }

    pub fn try_push_with_id(&mut self, value: T) -> Result<I, BufferError> {
        let id = self.try_id()?;
        self.try_push(value)?;
        Ok(id)
    }

    /// The id the next [`push_with_id`](Self::push_with_id) would return.
    #[track_caller]
    pub fn id(&self) -> I {
        self.try_id().or_fatal()
    }

    pub fn try_id(&self) -> Result<I, BufferError> {
        let len = self.items.len();
        let overflow = BufferError::IndexOverflow {
            len,
            limit: I::limit(),
        };
        if len >= I::limit() {
            return Err(overflow);
        }
        I::from_usize(len).ok_or(overflow)
    }

    /// Remove and return the last element.
    #[track_caller]
    pub fn pop(&mut self) -> T {
        self.try_pop().or_fatal()
    }

    pub fn try_pop(&mut self) -> Result<T, BufferError> {
        self.items
            .pop()
            .ok_or(BufferError::Empty)
    }

    /// Drop the last `n` elements.
    #[track_caller]
    pub fn pop_n(&mut self, n: usize) {
        self.try_pop_n(n).or_fatal();
    }

    pub fn try_pop_n(&mut self, n: usize) -> Result<(), BufferError> {
        let len = self.items.len();
        if n > len {
            return Err(BufferError::Underflow { requested: n, len });
        }
        self.items.truncate(len - n);
        Ok(())
    }

    // ===== Element access =====

    /// Mutable reference to the element at `index`.
    #[track_caller]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        self.try_at_mut(index).or_fatal()
    }

    pub fn try_at_mut(&mut self, index: usize) -> Result<&mut T, BufferError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(BufferError::OutOfBounds { index, len })
    }

    /// View of `len` elements starting at `start`.
    #[track_caller]
    pub fn slice(&self, start: usize, len: usize) -> Slice<'_, T> {
        self.try_slice(start, len).or_fatal()
    }

    pub fn try_slice(&self, start: usize, len: usize) -> Result<Slice<'_, T>, BufferError> {
        let live = self.items.len();
        match start.checked_add(len) {
            Some(end) if end <= live => Ok(Slice::new(&self.items[start..end])),
            _ => Err(BufferError::RangeOutOfBounds {
                start,
                len,
                buffer_len: live,
            }),
        }
    }

    /// View of the elements a range locates.
    #[track_caller]
    pub fn resolve(&self, range: IndexedRange<I>) -> Slice<'_, T> {
        self.try_resolve(range).or_fatal()
    }

    pub fn try_resolve(&self, range: IndexedRange<I>) -> Result<Slice<'_, T>, BufferError> {
        self.try_slice(range.start(), range.len())
    }

    /// Range covering `[start, start + len)` in this buffer's index type.
    fn range_at(start: usize, len: usize) -> Result<IndexedRange<I>, BufferError> {
        let overflow = |at: usize| BufferError::IndexOverflow {
            len: at,
            limit: I::limit(),
        };
        let start_id = I::from_usize(start).ok_or_else(|| overflow(start))?;
        let len_id = I::from_usize(len).ok_or_else(|| overflow(len))?;
        Ok(IndexedRange::new(start_id, len_id))
    }
}

impl<T: Clone, I: BufferIndex> Buffer<T, I> {
    /// Copy of the element at `index`.
    #[track_caller]
    pub fn at(&self, index: usize) -> T {
        self.try_at(index).or_fatal()
    }

    pub fn try_at(&self, index: usize) -> Result<T, BufferError> {
        self.items
            .get(index)
            .cloned()
            .ok_or(BufferError::OutOfBounds {
                index,
                len: self.items.len(),
            })
    }

    // ===== Extend =====

    /// Append all of `slice`, returning a view of the appended region.
    ///
    /// The view borrows the buffer; use [`extend_indexed`](Self::extend_indexed)
    /// to keep a reference across later growth.
    #[track_caller]
    pub fn extend(&mut self, slice: &[T]) -> Slice<'_, T> {
        self.try_extend(slice).or_fatal()
    }

    pub fn try_extend(&mut self, slice: &[T]) -> Result<Slice<'_, T>, BufferError> {
        let start = self.items.len();
        self.try_reserve(slice.len())?;
        self.items.extend_from_slice(slice);
        Ok(Slice::new(&self.items[start..]))
    }

    /// Append all of `slice`, returning the range it now occupies.
    #[track_caller]
    pub fn extend_indexed(&mut self, slice: &[T]) -> IndexedRange<I> {
        self.try_extend_indexed(slice).or_fatal()
    }

    pub fn try_extend_indexed(&mut self, slice: &[T]) -> Result<IndexedRange<I>, BufferError> {
        let range = Self::range_at(self.items.len(), slice.len())?;
        self.try_extend(slice)?;
        Ok(range)
    }

    /// Append a copy of the elements `range` locates in this same buffer.
    ///
    /// Returns the range of the copy.
    #[track_caller]
    pub fn extend_from_range(&mut self, range: IndexedRange<I>) -> IndexedRange<I> {
        self.try_extend_from_range(range).or_fatal()
    }

    pub fn try_extend_from_range(
        &mut self,
        range: IndexedRange<I>,
    ) -> Result<IndexedRange<I>, BufferError> {
        self.try_resolve(range)?;
        let copy = Self::range_at(self.items.len(), range.len())?;
        self.try_reserve(range.len())?;
        self.items.extend_from_within(range.start()..range.end());
        Ok(copy)
    }
}

impl<T, I: BufferIndex> Default for Buffer<T, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, I: BufferIndex> Clone for Buffer<T, I> {
    #[track_caller]
    fn clone(&self) -> Self {
        let mut copy = Self::alloc(self.capacity);
        copy.items.extend_from_slice(&self.items);
        copy
    }
}

impl<T: fmt::Debug, I: BufferIndex> fmt::Debug for Buffer<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.items.len())
            .field("capacity", &self.capacity)
            .field("items", &self.items)
            .finish()
    }
}

impl<'a, T, I: BufferIndex> IntoIterator for &'a Buffer<T, I> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests;
