//! Index types for buffers.
//!
//! A [`BufferIndex`] is a fixed-width unsigned integer with a known maximum.
//! The maximum bounds how many elements a buffer may hand out ids for:
//! the buffer length must stay below `MAX` for an id to be issued.

use std::fmt::Debug;
use std::hash::Hash;

/// Fixed-width unsigned index with a known maximum.
pub trait BufferIndex: Copy + Eq + Ord + Hash + Debug {
    /// Largest representable value.
    const MAX: Self;

    /// `MAX` widened to `usize`, saturating where it does not fit.
    fn limit() -> usize;

    /// Narrow a position to this index type; `None` if it does not fit.
    fn from_usize(value: usize) -> Option<Self>;

    /// Widen to a position in the buffer.
    fn index(self) -> usize;
}

macro_rules! impl_primitive_index {
    ($($ty:ty),* $(,)?) => { $(
        impl BufferIndex for $ty {
            const MAX: Self = <$ty>::MAX;

            #[inline]
            fn limit() -> usize {
                usize::try_from(<$ty>::MAX).unwrap_or(usize::MAX)
            }

            #[inline]
            fn from_usize(value: usize) -> Option<Self> {
                <$ty>::try_from(value).ok()
            }

            #[inline]
            fn index(self) -> usize {
                usize::try_from(self).unwrap_or(usize::MAX)
            }
        }
    )* };
}

impl_primitive_index!(u8, u16, u32, u64);

impl BufferIndex for usize {
    const MAX: Self = usize::MAX;

    #[inline]
    fn limit() -> usize {
        usize::MAX
    }

    #[inline]
    fn from_usize(value: usize) -> Option<Self> {
        Some(value)
    }

    #[inline]
    fn index(self) -> usize {
        self
    }
}

/// Declare a newtype id usable as a buffer index.
///
/// The generated type wraps the given unsigned integer and inherits its
/// maximum, so `Buffer<Node, NodeId>` hands out distinct `NodeId`s that
/// cannot be confused with ids from another buffer.
///
/// ```
/// risk_buffer::define_index! {
///     /// Index into the node table.
///     pub struct NodeId(u16);
/// }
///
/// let mut nodes = risk_buffer::Buffer::<&str, NodeId>::alloc(0);
/// let root = nodes.push_with_id("root");
/// assert_eq!(root, NodeId::new(0));
/// assert_eq!(format!("{root:?}"), "NodeId(0)");
/// ```
#[macro_export]
macro_rules! define_index {
    ($(#[$meta:meta])* $vis:vis struct $name:ident($repr:ty);) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
        #[repr(transparent)]
        $vis struct $name($repr);

        impl $name {
            /// Create an id from its raw value.
            #[inline]
            pub const fn new(raw: $repr) -> Self {
                Self(raw)
            }

            /// Get the raw value.
            #[inline]
            pub const fn raw(self) -> $repr {
                self.0
            }
        }

        impl $crate::BufferIndex for $name {
            const MAX: Self = Self(<$repr>::MAX);

            #[inline]
            fn limit() -> usize {
                <$repr as $crate::BufferIndex>::limit()
            }

            #[inline]
            fn from_usize(value: usize) -> Option<Self> {
                <$repr as $crate::BufferIndex>::from_usize(value).map(Self)
            }

            #[inline]
            fn index(self) -> usize {
                <$repr as $crate::BufferIndex>::index(self.0)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", ::std::stringify!($name), self.0)
            }
        }
    };
}
