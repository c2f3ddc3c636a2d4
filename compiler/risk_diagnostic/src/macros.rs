//! Check macros.
//!
//! Each macro routes through [`fail`](crate::fail) or
//! [`fail_assert`](crate::fail_assert), which are `#[track_caller]`, so the
//! reported location is the macro invocation site.

/// Fatal unless `cond` holds.
///
/// Without a message the report is a single line naming the expression.
/// With a message the report also shows the expression with a caret
/// underline.
#[macro_export]
macro_rules! risk_assert {
    ($cond:expr $(,)?) => {
        if !$cond {
            $crate::fail($crate::FatalKind::Assert, ::std::stringify!($cond))
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::fail_assert(::std::stringify!($cond), ::std::format!($($arg)+))
        }
    };
}

/// Planned but unwritten code.
#[macro_export]
macro_rules! risk_todo {
    () => {
        $crate::fail(
            $crate::FatalKind::Todo,
            ::std::format!("`{}` not implemented yet!", ::std::module_path!()),
        )
    };
    ($($arg:tt)+) => {
        $crate::fail($crate::FatalKind::Todo, ::std::format!($($arg)+))
    };
}

/// Deliberately unsupported code path.
#[macro_export]
macro_rules! risk_unimplemented {
    () => {
        $crate::fail($crate::FatalKind::Panic, "not implemented!")
    };
    ($($arg:tt)+) => {
        $crate::fail($crate::FatalKind::Unimplemented, ::std::format!($($arg)+))
    };
}

/// Unrecoverable failure.
#[macro_export]
macro_rules! risk_panic {
    () => {
        $crate::fail($crate::FatalKind::Panic, "something went wrong!")
    };
    ($($arg:tt)+) => {
        $crate::fail($crate::FatalKind::Panic, ::std::format!($($arg)+))
    };
}

/// Code assumed to be dead.
#[macro_export]
macro_rules! risk_unreachable {
    () => {
        $crate::fail($crate::FatalKind::Panic, "reached the unreachable!")
    };
    ($($arg:tt)+) => {
        $crate::fail($crate::FatalKind::Unreachable, ::std::format!($($arg)+))
    };
}
