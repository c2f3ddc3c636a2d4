use std::fmt;

use crate::{Caller, FatalKind};

/// The literal source text of a failed assertion.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Assertion {
    pub expr: &'static str,
}

impl Assertion {
    #[inline]
    pub const fn new(expr: &'static str) -> Self {
        Assertion { expr }
    }

    /// Width of the caret underline drawn beneath the expression.
    pub fn underline_width(&self) -> usize {
        self.expr.chars().count()
    }
}

/// Everything needed to render a fatal condition.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FatalReport {
    pub kind: FatalKind,
    pub message: String,
    pub caller: Caller,
    /// Present only for assertion failures that carry a message.
    pub assertion: Option<Assertion>,
}

impl FatalReport {
    pub fn new(kind: FatalKind, message: impl Into<String>, caller: Caller) -> Self {
        FatalReport {
            kind,
            message: message.into(),
            caller,
            assertion: None,
        }
    }

    /// An assertion failure annotated with the checked expression.
    pub fn assertion(expr: &'static str, message: impl Into<String>, caller: Caller) -> Self {
        FatalReport {
            kind: FatalKind::Assert,
            message: message.into(),
            caller,
            assertion: Some(Assertion::new(expr)),
        }
    }
}

impl fmt::Display for FatalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.kind, self.message, self.caller)
    }
}

impl std::error::Error for FatalReport {}
