//! Non-Unix fallback Terminal Port. There is no portable raw-mode API
//! in `libc` outside Unix; platforms without a real backend get a
//! terminal that always reports "not a tty" so the editor core falls
//! back to the line-oriented read path (`spec.md` §4.7).

use crate::{ReadOutcome, TermError, TerminalPort};

/// A Terminal Port that never claims to be a tty. Useful for tests and
/// as the `TerminalPort` on platforms `ledit-term` has no raw-mode
/// backend for.
#[derive(Debug, Default)]
pub struct NullTerminal {
    raw: bool,
}

impl TerminalPort for NullTerminal {
    fn enter_raw(&mut self) -> Result<(), TermError> {
        Err(TermError::NotATty)
    }

    fn leave_raw(&mut self) -> Result<(), TermError> {
        self.raw = false;
        Ok(())
    }

    fn read_byte(&mut self, _timeout_ms: i32) -> Result<ReadOutcome, TermError> {
        use std::io::Read;
        let mut buf = [0u8; 1];
        match std::io::stdin().read(&mut buf) {
            Ok(0) => Ok(ReadOutcome::Eof),
            Ok(_) => Ok(ReadOutcome::Byte(buf[0])),
            Err(e) => Err(TermError::Io(e)),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TermError> {
        use std::io::Write;
        std::io::stdout().write_all(bytes).map_err(TermError::Io)
    }

    fn is_tty(&self) -> bool {
        false
    }

    fn columns(&self) -> u16 {
        80
    }

    fn clear_screen(&mut self) -> Result<(), TermError> {
        self.write(b"\x1b[H\x1b[2J")
    }
}
