//! Terminal Port: the small capability set the editor core depends on
//! (`spec.md` §6). Everything platform-specific — raw mode, byte I/O,
//! column count, screen clear — lives behind the [`TerminalPort`] trait
//! so the core itself never touches `libc` directly.

mod fallback;
#[cfg(unix)]
mod unix;

use derive_more::{Display, Error, From};

/// Outcome of a single [`TerminalPort::read_byte`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A byte was read.
    Byte(u8),
    /// The timeout elapsed with no byte available.
    Timeout,
    /// The input handle reached end-of-file.
    Eof,
}

/// Errors surfaced by the Terminal Port. Matches the `Read`/`Write`/
/// `NotTty` members of `spec.md` §7's error taxonomy; `Eof`/
/// `Interrupted` are not Terminal Port concerns, they are raised by the
/// editor core itself on `Ctrl-D`/`Ctrl-C`.
#[derive(Debug, Display, Error, From)]
pub enum TermError {
    #[display("terminal handle is not a tty")]
    NotATty,
    #[display("terminal I/O error: {_0}")]
    Io(std::io::Error),
}

/// The capability set `spec.md` §6 requires of a terminal backend.
pub trait TerminalPort {
    /// Disable canonical mode / echo / signal generation; enable
    /// byte-at-a-time input. Idempotent. Returns [`TermError::NotATty`]
    /// if the input handle is not a terminal.
    fn enter_raw(&mut self) -> Result<(), TermError>;

    /// Restore the mode saved by the matching [`TerminalPort::enter_raw`].
    fn leave_raw(&mut self) -> Result<(), TermError>;

    /// Read exactly one byte, honoring a millisecond timeout.
    /// `timeout_ms == 0` is a non-blocking poll; negative blocks
    /// forever.
    fn read_byte(&mut self, timeout_ms: i32) -> Result<ReadOutcome, TermError>;

    /// Write the full buffer.
    fn write(&mut self, bytes: &[u8]) -> Result<(), TermError>;

    /// Is the input handle a terminal?
    fn is_tty(&self) -> bool;

    /// Current terminal column count (80 as a fallback).
    fn columns(&self) -> u16;

    /// Emit home + erase-display (or the platform equivalent).
    fn clear_screen(&mut self) -> Result<(), TermError>;
}

#[cfg(unix)]
pub use unix::UnixTerminal;

pub use fallback::NullTerminal;

/// The terminal backend this platform uses by default.
#[cfg(unix)]
pub type DefaultTerminal = UnixTerminal;

#[cfg(not(unix))]
pub type DefaultTerminal = NullTerminal;
