//! Borrowed read-only views.

use std::ops::Deref;

/// Read-only view of a contiguous run of `T` inside a [`Buffer`](crate::Buffer).
///
/// The lifetime ties the view to a shared borrow of the buffer, so the
/// buffer cannot grow (and reallocate) while the view is alive.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Slice<'a, T> {
    items: &'a [T],
}

impl<'a, T> Slice<'a, T> {
    #[inline]
    pub const fn new(items: &'a [T]) -> Self {
        Slice { items }
    }

    /// The viewed elements, with the full borrow lifetime.
    #[inline]
    pub const fn as_slice(&self) -> &'a [T] {
        self.items
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Clone for Slice<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slice<'_, T> {}

impl<T> Deref for Slice<'_, T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.items
    }
}

impl<'a, T> From<&'a [T]> for Slice<'a, T> {
    fn from(items: &'a [T]) -> Self {
        Slice::new(items)
    }
}

impl<'a, T> IntoIterator for Slice<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: PartialEq> PartialEq<[T]> for Slice<'_, T> {
    fn eq(&self, other: &[T]) -> bool {
        self.items == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Slice<'_, T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.items == other
    }
}
