//! Capacity growth policy.
//!
//! Geometric growth amortizes reallocation across single-element pushes.
//! Doubling starts at [`INITIAL_CAPACITY`] rather than 1 so the first few
//! pushes into an empty buffer do not each reallocate.
//!
//! Growing one push at a time from empty gives `0 → 3 → 6 → 12 → 24 → 48`.

/// Capacity chosen for the first allocation of an empty buffer.
pub const INITIAL_CAPACITY: usize = 3;

/// Capacity needed to hold `len + additional` elements.
///
/// Returns `capacity` unchanged when it is already large enough. Returns
/// `None` when the request cannot be represented in `usize`.
pub fn grow_capacity(capacity: usize, len: usize, additional: usize) -> Option<usize> {
    let required = len.checked_add(additional)?;
    if capacity >= required {
        return Some(capacity);
    }

    let mut next = if capacity == 0 {
        INITIAL_CAPACITY
    } else {
        capacity
    };
    while next < required {
        next = next.checked_mul(2)?;
    }
    Some(next)
}
