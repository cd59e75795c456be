#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(clippy::undocumented_unsafe_blocks)]

//! # Overview
//!
//! Renders [`tscore::message::Message`] values to the console. The engine
//! crates only ever produce a [`tscore::message::Message`]; this crate is
//! the one place that decides where it lands (stdout vs. stderr) and
//! whether it gets colored.
//!
//! # Design
//!
//! [`Sink`] is a one-method trait so a caller embedding this engine (a
//! library consumer, a test harness) can supply its own instead of
//! [`ConsoleSink`]. [`ConsoleSink::auto`] detects whether stdout is a
//! terminal on unix (the only platform this crate has a detection path
//! for) and colors accordingly; everywhere else it stays plain, since a
//! wrong guess there is far more annoying than an unwanted color escape.

use std::io::{self, Write};

use tscore::message::{Message, Severity};

/// Something a [`Message`] can be handed to.
pub trait Sink {
    /// Renders one message. Implementations should not panic on a write
    /// failure to stdout/stderr — there is nowhere further to report it.
    fn emit(&self, message: &Message);
}

/// Writes messages to stdout (info) or stderr (warning/error), optionally
/// colored by severity.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    color: bool,
}

impl ConsoleSink {
    /// Builds a sink with coloring forced on or off.
    #[must_use]
    pub const fn new(color: bool) -> Self {
        Self { color }
    }

    /// Builds a sink that colors output only when standard output is a
    /// terminal. Always plain on a platform this crate has no detection
    /// path for.
    #[must_use]
    pub fn auto() -> Self {
        Self::new(stdout_is_terminal())
    }

    fn write(&self, stream: &mut dyn Write, message: &Message) {
        let rendered = if self.color {
            format!("{}{message}{}", color_code(message.severity()), RESET)
        } else {
            message.to_string()
        };
        // A diagnostic sink that fails because stdout/stderr is gone has no
        // further channel to report that failure through.
        let _ = writeln!(stream, "{rendered}");
    }
}

impl Sink for ConsoleSink {
    fn emit(&self, message: &Message) {
        match message.severity() {
            Severity::Info => self.write(&mut io::stdout(), message),
            Severity::Warning | Severity::Error => self.write(&mut io::stderr(), message),
        }
    }
}

const RESET: &str = "\x1b[0m";

const fn color_code(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "\x1b[36m",
        Severity::Warning => "\x1b[33m",
        Severity::Error => "\x1b[31m",
    }
}

#[cfg(unix)]
fn stdout_is_terminal() -> bool {
    // SAFETY: `STDOUT_FILENO` is always a valid (if possibly closed) file
    // descriptor to query; `isatty` performs no write and returns `0` on
    // any non-terminal fd, closed or not.
    unsafe { libc::isatty(libc::STDOUT_FILENO) != 0 }
}

#[cfg(not(unix))]
fn stdout_is_terminal() -> bool {
    false
}

/// Emits every message in `messages`, in order, to `sink`.
pub fn emit_all(sink: &dyn Sink, messages: &[Message]) {
    for message in messages {
        sink.emit(message);
    }
}
