//! Buffer precondition failures.

use risk_diagnostic::{report_fatal, Caller, FatalReport};

/// A violated buffer precondition.
///
/// Returned by the `try_*` operations. The plain operations report the
/// same value through `risk_diagnostic` and terminate.
///
/// Each variant names the check that failed; [`name`](Self::name) groups
/// them into the four failure classes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum BufferError {
    /// Access at or past the live length.
    #[error("index `{index}` out of bounds (len {len})")]
    OutOfBounds { index: usize, len: usize },
    /// A `start`/`len` view reaching past the live length.
    #[error("range `{start}` + {len} out of bounds (len {buffer_len})")]
    RangeOutOfBounds {
        start: usize,
        len: usize,
        buffer_len: usize,
    },
    /// Pop from an empty buffer.
    #[error("buffer is empty")]
    Empty,
    /// Removal of more elements than are live.
    #[error("cannot pop {requested} from a buffer of len {len}")]
    Underflow { requested: usize, len: usize },
    /// The length no longer fits the buffer's index type.
    #[error("buffer overflow: len {len} reached index limit {limit}")]
    IndexOverflow { len: usize, limit: usize },
    /// Storage for the requested capacity could not be acquired.
    #[error("failed to allocate storage for {requested} items")]
    AllocationFailure { requested: usize },
}

impl BufferError {
    /// Name of the failure class.
    pub const fn name(self) -> &'static str {
        match self {
            BufferError::OutOfBounds { .. } | BufferError::RangeOutOfBounds { .. } => {
                "OutOfBounds"
            }
            BufferError::Empty | BufferError::Underflow { .. } => "Underflow",
            BufferError::IndexOverflow { .. } => "IndexOverflow",
            BufferError::AllocationFailure { .. } => "AllocationFailure",
        }
    }

    /// The condition that did not hold, shown underlined in the report.
    pub const fn condition(self) -> &'static str {
        match self {
            BufferError::OutOfBounds { .. } => "index < self.len()",
            BufferError::RangeOutOfBounds { .. } => "start + len <= self.len()",
            BufferError::Empty => "!self.is_empty()",
            BufferError::Underflow { .. } => "n <= self.len()",
            BufferError::IndexOverflow { .. } => "self.len() < I::MAX",
            BufferError::AllocationFailure { .. } => {
                "storage.try_reserve_exact(additional).is_ok()"
            }
        }
    }

    /// Build the fatal report for this failure at `caller`.
    pub fn to_report(self, caller: Caller) -> FatalReport {
        FatalReport::assertion(self.condition(), format!("{}: {self}", self.name()), caller)
    }

    /// Report this failure at the caller's location and terminate.
    #[track_caller]
    pub fn report(self) -> ! {
        report_fatal(self.to_report(Caller::here()))
    }
}

/// Turns a `try_*` result into the fatal behavior of the plain operation.
pub(crate) trait OrFatal<T> {
    fn or_fatal(self) -> T;
}

impl<T> OrFatal<T> for Result<T, BufferError> {
    #[inline]
    #[track_caller]
    fn or_fatal(self) -> T {
        match self {
            Ok(value) => value,
            Err(err) => err.report(),
        }
    }
}
