//! Fatal diagnostics for the risk toolkit.
//!
//! Every invariant check in the toolkit ends up here. A failed check builds
//! a [`FatalReport`] (category, message, call site and, for assertions, the
//! checked expression), renders it to stderr and terminates. Nothing in this
//! crate returns control to the code that failed the check.
//!
//! # Checks
//!
//! ```text
//! risk_assert!(index < len, "index `{index}` out of bounds");
//! risk_unreachable!();
//! ```
//!
//! The check macros capture the call site through `#[track_caller]`, so the
//! reported location is the line that invoked the macro.
//!
//! # Termination
//!
//! [`FatalMode`] selects what happens after the report is written:
//! `exit(1)` (the default), `abort()`, or unwinding with the report as the
//! payload. [`catch_fatal`] contains a fatal report on the current thread
//! and hands it back to the embedder as an `Err`.
//!
//! # Environment
//!
//! - `RISK_COLOR=always|never|auto`: color mode for rendered reports.
//! - `RISK_FATAL=exit|abort|unwind`: process-wide termination mode.
//! - `RUST_LOG=risk_buffer=trace`: tracing filter, see [`init_tracing`].

mod caller;
mod emitter;
mod fatal;
mod kind;
mod macros;
mod report;

use std::sync::Once;

pub use caller::Caller;
pub use emitter::{ColorMode, FatalEmitter};
pub use fatal::{catch_fatal, fail, fail_assert, report_fatal, set_thread_fatal_mode, FatalMode};
pub use kind::FatalKind;
pub use report::{Assertion, FatalReport};

static TRACING_INIT: Once = Once::new();

/// Install a stderr subscriber for the toolkit's tracing events.
///
/// Events: `trace!` when a buffer grows, `debug!` when a `StrBuf` is
/// flushed, `error!` just before a fatal report is rendered. An embedder
/// calls this once from `main`, before creating buffers; later calls do
/// nothing. Nothing is installed unless `RUST_LOG` holds a valid filter,
/// e.g. `RUST_LOG=risk_buffer=trace`. An embedder that already set its
/// own global subscriber keeps it.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(filter) = EnvFilter::try_from_default_env() else {
            return;
        };
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .try_init();
    });
}
