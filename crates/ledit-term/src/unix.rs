//! Unix `TerminalPort` backed directly by `libc` termios/poll, the same
//! FFI surface `vtio/examples/vtev.rs`'s `raw_mode` module uses.

use std::os::unix::io::RawFd;
use std::sync::Mutex;
use std::sync::Once;

use crate::{ReadOutcome, TermError, TerminalPort};

struct SavedTermios {
    fd: RawFd,
    termios: libc::termios,
}

static EXIT_HOOK_INSTALLED: Once = Once::new();
static SAVED_FOR_EXIT: Mutex<Option<SavedTermios>> = Mutex::new(None);

extern "C" fn restore_raw_mode_on_exit() {
    if let Ok(mut guard) = SAVED_FOR_EXIT.lock()
        && let Some(saved) = guard.take()
    {
        unsafe {
            libc::tcsetattr(saved.fd, libc::TCSANOW, &saved.termios);
        }
    }
}

fn ensure_exit_hook_installed() {
    EXIT_HOOK_INSTALLED.call_once(|| unsafe {
        libc::atexit(restore_raw_mode_on_exit);
    });
}

/// A `TerminalPort` backed by `stdin`/`stdout` on Unix-like platforms.
pub struct UnixTerminal {
    in_fd: RawFd,
    out_fd: RawFd,
    original_termios: Option<libc::termios>,
}

impl UnixTerminal {
    /// Build a port over the process's standard input/output.
    #[must_use]
    pub fn stdio() -> Self {
        Self {
            in_fd: libc::STDIN_FILENO,
            out_fd: libc::STDOUT_FILENO,
            original_termios: None,
        }
    }

    fn poll(&self, timeout_ms: i32) -> Result<bool, TermError> {
        let mut pollfd = libc::pollfd {
            fd: self.in_fd,
            events: libc::POLLIN,
            revents: 0,
        };
        let rv = unsafe { libc::poll(&mut pollfd, 1, timeout_ms) };
        if rv < 0 {
            return Err(TermError::Io(std::io::Error::last_os_error()));
        }
        Ok(rv > 0)
    }
}

impl Default for UnixTerminal {
    fn default() -> Self {
        Self::stdio()
    }
}

impl TerminalPort for UnixTerminal {
    fn enter_raw(&mut self) -> Result<(), TermError> {
        if !self.is_tty() {
            return Err(TermError::NotATty);
        }
        if self.original_termios.is_some() {
            return Ok(());
        }

        let mut original: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(self.in_fd, &mut original) } != 0 {
            return Err(TermError::Io(std::io::Error::last_os_error()));
        }

        let mut raw = original;
        raw.c_lflag &= !(libc::ICANON | libc::ECHO | libc::ECHONL | libc::IEXTEN | libc::ISIG);
        raw.c_iflag &=
            !(libc::IXON | libc::ICRNL | libc::INLCR | libc::IGNCR | libc::BRKINT | libc::INPCK | libc::ISTRIP);
        raw.c_oflag &= !(libc::OPOST);
        raw.c_cflag &= !(libc::CSIZE | libc::PARENB);
        raw.c_cflag |= libc::CS8;
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;

        if unsafe { libc::tcsetattr(self.in_fd, libc::TCSANOW, &raw) } != 0 {
            return Err(TermError::Io(std::io::Error::last_os_error()));
        }

        ensure_exit_hook_installed();
        if let Ok(mut guard) = SAVED_FOR_EXIT.lock() {
            *guard = Some(SavedTermios {
                fd: self.in_fd,
                termios: original,
            });
        }
        self.original_termios = Some(original);
        tracing::debug!(fd = self.in_fd, "entered raw mode");
        Ok(())
    }

    fn leave_raw(&mut self) -> Result<(), TermError> {
        let Some(original) = self.original_termios.take() else {
            return Ok(());
        };
        if unsafe { libc::tcsetattr(self.in_fd, libc::TCSANOW, &original) } != 0 {
            return Err(TermError::Io(std::io::Error::last_os_error()));
        }
        if let Ok(mut guard) = SAVED_FOR_EXIT.lock() {
            *guard = None;
        }
        tracing::debug!(fd = self.in_fd, "left raw mode");
        Ok(())
    }

    fn read_byte(&mut self, timeout_ms: i32) -> Result<ReadOutcome, TermError> {
        if !self.poll(timeout_ms)? {
            tracing::trace!(timeout_ms, "read_byte: timed out");
            return Ok(ReadOutcome::Timeout);
        }
        let mut buf = [0u8; 1];
        let n = unsafe { libc::read(self.in_fd, buf.as_mut_ptr().cast(), 1) };
        if n < 0 {
            return Err(TermError::Io(std::io::Error::last_os_error()));
        }
        if n == 0 {
            return Ok(ReadOutcome::Eof);
        }
        Ok(ReadOutcome::Byte(buf[0]))
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TermError> {
        let mut total = 0usize;
        while total < bytes.len() {
            let n = unsafe {
                libc::write(
                    self.out_fd,
                    bytes[total..].as_ptr().cast(),
                    bytes.len() - total,
                )
            };
            if n < 0 {
                return Err(TermError::Io(std::io::Error::last_os_error()));
            }
            if n == 0 {
                break;
            }
            total += n as usize;
        }
        Ok(())
    }

    fn is_tty(&self) -> bool {
        unsafe { libc::isatty(self.in_fd) == 1 }
    }

    fn columns(&self) -> u16 {
        let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
        let rv = unsafe { libc::ioctl(self.out_fd, libc::TIOCGWINSZ, &mut ws) };
        if rv == 0 && ws.ws_col > 0 {
            ws.ws_col
        } else {
            80
        }
    }

    fn clear_screen(&mut self) -> Result<(), TermError> {
        self.write(b"\x1b[H\x1b[2J")
    }
}

impl Drop for UnixTerminal {
    fn drop(&mut self) {
        let _ = self.leave_raw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_falls_back_to_eighty_when_not_a_tty() {
        // Under the test harness stdin/stdout are usually not a tty;
        // this is exercising the fallback path, not a real terminal.
        let term = UnixTerminal::stdio();
        if !term.is_tty() {
            assert_eq!(term.columns(), 80);
        }
    }
}
