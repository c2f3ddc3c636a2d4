use std::fmt;

/// Category tag of a fatal report.
///
/// Purely a classification for the rendered message: every kind terminates
/// the same way.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FatalKind {
    /// A checked condition was false.
    Assert,
    /// Reached code that is planned but not written yet.
    Todo,
    /// Reached a feature that is deliberately not supported.
    Unimplemented,
    /// Generic unrecoverable failure.
    Panic,
    /// Reached code that was assumed to be dead.
    Unreachable,
}

impl FatalKind {
    /// The tag printed in front of the message.
    pub const fn as_str(self) -> &'static str {
        match self {
            FatalKind::Assert => "assert",
            FatalKind::Todo => "todo",
            FatalKind::Unimplemented => "unimplemented",
            FatalKind::Panic => "panic",
            FatalKind::Unreachable => "unreachable",
        }
    }
}

impl fmt::Display for FatalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
