//! Growable typed buffers for the risk toolkit.
//!
//! Three cooperating types, generic over the element type `T` and an index
//! type `I`:
//!
//! - [`Buffer<T, I>`]: owns a contiguous heap run of `T`.
//! - [`Slice<'a, T>`]: read-only view borrowed from a buffer. The borrow
//!   ends before the buffer can grow, so a view never outlives the storage
//!   it points into.
//! - [`IndexedRange<I>`]: `start`/`len` locator in a buffer's index space.
//!   Survives reallocation; goes stale only if earlier elements are removed.
//!
//! The index type bounds how many elements a buffer may hand out ids for.
//! `Buffer<T, u8>` can give out ids `0..=254`; the next `push_with_id` is a
//! fatal `IndexOverflow`.
//!
//! # Failure
//!
//! Every violated precondition (bounds, emptiness, index overflow,
//! allocation failure) is reported through `risk_diagnostic` and never
//! returns. Each such operation has a `try_*` twin returning
//! [`BufferError`] for embedders that need to recover.
//!
//! # Growth
//!
//! See [`growth`]: capacity starts at 3 and doubles.

mod buffer;
mod error;
pub mod growth;
mod index;
mod range;
mod slice;
pub mod text;

pub use buffer::Buffer;
pub use error::BufferError;
pub use index::BufferIndex;
pub use range::IndexedRange;
pub use slice::Slice;
pub use text::StrBuf;
