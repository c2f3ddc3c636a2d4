//! Terminal rendering of fatal reports.
//!
//! Human-readable output with optional ANSI color support. Plain reports
//! take two lines:
//!
//! ```text
//! panic: something went wrong!
//!  --> src/main.rs:12
//! ```
//!
//! Assertion reports add a snippet of the checked expression with a caret
//! underline of the same width:
//!
//! ```text
//! assert: index `7` out of bounds
//!   --> src/main.rs:12
//!    |
//! 12 | risk_assert!(index < len, ...)
//!    |              ^^^^^^^^^^^ must be true
//! ```

use std::io::{self, Write};
use std::sync::OnceLock;

use crate::{Assertion, Caller, FatalReport};

/// ANSI color codes for terminal output.
mod colors {
    pub const TAG: &str = "\x1b[1;31m"; // Bold red
    pub const MESSAGE: &str = "\x1b[1;37m"; // Bold white
    pub const LOCATION: &str = "\x1b[1;36m"; // Bold cyan
    pub const SNIPPET: &str = "\x1b[1;35m"; // Bold magenta
    pub const UNDERLINE: &str = "\x1b[1;31m"; // Bold red
    pub const RESET: &str = "\x1b[0m";
}

/// Text that precedes the expression on the snippet line.
const ASSERT_PREFIX: &str = "risk_assert!(";

/// Color output mode for the fatal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Environment variable consulted by [`ColorMode::process_default`].
    pub const ENV_VAR: &'static str = "RISK_COLOR";

    /// Resolve to a boolean based on terminal detection.
    ///
    /// For `Auto` mode, `is_tty` determines whether colors should be used.
    /// This parameter is ignored for `Always` and `Never` modes.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse a `RISK_COLOR` value. Case-insensitive; unknown values yield `None`.
    pub fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }

    /// Process-wide mode, read from `RISK_COLOR` once. Falls back to `Auto`
    /// when unset or unrecognized.
    pub fn process_default() -> Self {
        static DEFAULT: OnceLock<ColorMode> = OnceLock::new();
        *DEFAULT.get_or_init(|| {
            std::env::var(Self::ENV_VAR)
                .ok()
                .and_then(|value| Self::from_env_value(&value))
                .unwrap_or_default()
        })
    }
}

/// Renders [`FatalReport`]s to a writer.
pub struct FatalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> FatalEmitter<W> {
    /// Create a new emitter with explicit color mode.
    ///
    /// * `writer` - The output writer
    /// * `mode` - Color mode selection
    /// * `is_tty` - Whether output is a TTY (used for `ColorMode::Auto`)
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        FatalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    /// Create an emitter for stderr with explicit color mode.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> FatalEmitter<io::Stderr> {
        FatalEmitter {
            writer: io::stderr(),
            colors: mode.should_use_colors(is_tty),
        }
    }

    /// Consume the emitter, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_header(&mut self, report: &FatalReport) {
        self.write_colored(report.kind.as_str(), colors::TAG);
        self.write_colored(": ", colors::MESSAGE);
        self.write_colored(&report.message, colors::MESSAGE);
        let _ = writeln!(self.writer);
    }

    fn write_location(&mut self, caller: Caller, indent: usize) {
        let _ = write!(self.writer, "{:indent$}", "");
        self.write_colored(&format!(" --> {caller}"), colors::LOCATION);
        let _ = writeln!(self.writer);
    }

    fn write_snippet(&mut self, caller: Caller, assertion: Assertion) {
        let gutter = " ".repeat(caller.line_width());

        self.write_colored(&format!("{gutter} |"), colors::LOCATION);
        let _ = writeln!(self.writer);

        self.write_colored(&format!("{} | ", caller.line), colors::LOCATION);
        self.write_colored(
            &format!("{ASSERT_PREFIX}{}, ...)", assertion.expr),
            colors::SNIPPET,
        );
        let _ = writeln!(self.writer);

        self.write_colored(&format!("{gutter} | "), colors::LOCATION);
        let _ = write!(self.writer, "{:width$}", "", width = ASSERT_PREFIX.len());
        let carets = "^".repeat(assertion.underline_width());
        self.write_colored(&format!("{carets} must be true"), colors::UNDERLINE);
        let _ = writeln!(self.writer);
        let _ = writeln!(self.writer);
    }

    /// Render a single report.
    pub fn emit(&mut self, report: &FatalReport) {
        self.write_header(report);
        match report.assertion {
            Some(assertion) => {
                // Arrow lines up with the snippet gutter.
                self.write_location(report.caller, report.caller.line_width() - 1);
                self.write_snippet(report.caller, assertion);
            }
            None => self.write_location(report.caller, 0),
        }
    }

    /// Flush any buffered output.
    pub fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}
