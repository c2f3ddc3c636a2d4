//! The single reporting path for fatal conditions.

use std::cell::Cell;
use std::io::{self, IsTerminal};
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;

use crate::{Caller, ColorMode, FatalEmitter, FatalKind, FatalReport};

/// What happens after a fatal report has been written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FatalMode {
    /// `std::process::exit(1)`.
    #[default]
    Exit,
    /// `std::process::abort()`, for core dumps and debuggers.
    Abort,
    /// Unwind the current thread with the [`FatalReport`] as payload.
    Unwind,
}

impl FatalMode {
    /// Environment variable consulted for the process-wide default.
    pub const ENV_VAR: &'static str = "RISK_FATAL";

    /// Parse a `RISK_FATAL` value. Case-insensitive; unknown values yield `None`.
    pub fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exit" => Some(FatalMode::Exit),
            "abort" => Some(FatalMode::Abort),
            "unwind" => Some(FatalMode::Unwind),
            _ => None,
        }
    }

    /// Process-wide default, read from `RISK_FATAL` once.
    pub fn process_default() -> Self {
        static DEFAULT: OnceLock<FatalMode> = OnceLock::new();
        *DEFAULT.get_or_init(|| {
            std::env::var(Self::ENV_VAR)
                .ok()
                .and_then(|value| Self::from_env_value(&value))
                .unwrap_or_default()
        })
    }

    /// Mode in effect on the current thread.
    pub fn current() -> Self {
        MODE_OVERRIDE
            .with(Cell::get)
            .unwrap_or_else(Self::process_default)
    }
}

thread_local! {
    static MODE_OVERRIDE: Cell<Option<FatalMode>> = const { Cell::new(None) };
    /// Number of active `catch_fatal` frames on this thread.
    static CATCH_DEPTH: Cell<u32> = const { Cell::new(0) };
}

/// Override the termination mode for the current thread.
///
/// `None` restores the process-wide default. Returns the previous override.
pub fn set_thread_fatal_mode(mode: Option<FatalMode>) -> Option<FatalMode> {
    MODE_OVERRIDE.with(|cell| cell.replace(mode))
}

/// Emit `report` and terminate. Never returns.
///
/// Inside [`catch_fatal`] the report is not printed; it is handed to the
/// enclosing `catch_fatal` instead.
pub fn report_fatal(report: FatalReport) -> ! {
    tracing::error!(
        category = report.kind.as_str(),
        file = report.caller.file,
        line = report.caller.line,
        "{}",
        report.message
    );

    if CATCH_DEPTH.with(Cell::get) > 0 {
        panic::resume_unwind(Box::new(report));
    }

    let stderr = io::stderr();
    let is_tty = stderr.is_terminal();
    let mut emitter =
        FatalEmitter::<io::Stderr>::stderr(ColorMode::process_default(), is_tty);
    emitter.emit(&report);
    emitter.flush();

    match FatalMode::current() {
        FatalMode::Exit => std::process::exit(1),
        FatalMode::Abort => std::process::abort(),
        FatalMode::Unwind => panic::resume_unwind(Box::new(report)),
    }
}

/// Report a fatal condition of `kind` at the caller's location.
#[track_caller]
pub fn fail(kind: FatalKind, message: impl Into<String>) -> ! {
    report_fatal(FatalReport::new(kind, message, Caller::here()))
}

/// Report a failed assertion of `expr` at the caller's location.
#[track_caller]
pub fn fail_assert(expr: &'static str, message: impl Into<String>) -> ! {
    report_fatal(FatalReport::assertion(expr, message, Caller::here()))
}

/// Decrements `CATCH_DEPTH` even when `f` unwinds.
struct CatchGuard;

impl CatchGuard {
    fn enter() -> Self {
        CATCH_DEPTH.with(|depth| depth.set(depth.get() + 1));
        CatchGuard
    }
}

impl Drop for CatchGuard {
    fn drop(&mut self) {
        CATCH_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Run `f`, turning a fatal report raised on this thread into `Err`.
///
/// For embedders that must not lose the whole process to one invariant
/// violation. Ordinary panics are propagated unchanged. Requires
/// `panic = "unwind"`.
pub fn catch_fatal<R>(f: impl FnOnce() -> R) -> Result<R, FatalReport> {
    let guard = CatchGuard::enter();
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    drop(guard);

    match result {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<FatalReport>() {
            Ok(report) => Err(*report),
            Err(other) => panic::resume_unwind(other),
        },
    }
}
