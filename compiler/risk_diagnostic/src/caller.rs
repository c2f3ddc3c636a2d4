//! Call-site locations.

use std::fmt;
use std::panic::Location;

/// Source location of the code that failed a check.
///
/// Captured with `#[track_caller]`, so a chain of tracked functions reports
/// the outermost untracked call site rather than the toolkit internals.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Caller {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl Caller {
    /// Create a location from explicit parts.
    #[inline]
    pub const fn new(file: &'static str, line: u32, column: u32) -> Self {
        Caller { file, line, column }
    }

    /// Location of the (tracked) caller.
    #[inline]
    #[track_caller]
    pub fn here() -> Self {
        Self::from_location(Location::caller())
    }

    /// Convert a `std::panic::Location`.
    #[inline]
    pub fn from_location(location: &Location<'static>) -> Self {
        Caller {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }

    /// Number of decimal digits in the line number.
    ///
    /// Used to size the gutter of rendered assertion snippets.
    pub fn line_width(self) -> usize {
        let mut line = self.line;
        let mut width = 1;
        while line >= 10 {
            line /= 10;
            width += 1;
        }
        width
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
