//! `ledit`: the facade crate tying the editor core together — Context,
//! the Completion Loop, and the Public API (`spec.md` §4.5, §4.7, §5,
//! §7). Grounded in `vtio/src/lib.rs`'s role as a thin crate that
//! re-exports the focused crates beneath it and adds the
//! orchestration/state-machine layer on top.

mod callbacks;
mod dispatch;
mod error;
mod render;
mod session;

pub use callbacks::{CompletionCallback, Hint, HintsCallback, HighlightCallback};
pub use error::ReadError;
pub use ledit_history::HistoryStore;

use ledit_term::TerminalPort;
use session::Session;
use std::path::Path;

/// Outcome of one [`LineEditor::feed`] call — the non-blocking
/// counterpart of [`LineEditor::read`]'s return value (`spec.md`
/// §4.7, §9's "coroutine-like editing" note: this is an explicit
/// state machine, not a coroutine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    /// Editing continues; call `feed` again once more input is ready.
    More,
    /// `Enter` was pressed; the session is finished and `stop` has
    /// already run.
    Done(String),
}

/// One editor instance: owns the Terminal Port, the history store,
/// configuration, callbacks, and (while editing) the active session.
/// `spec.md` §5's "single-threaded cooperative per context" model: at
/// most one session is active at a time.
pub struct LineEditor<T: TerminalPort> {
    term: T,
    history: HistoryStore,
    multiline: bool,
    mask: bool,
    escape_timeout_ms: i32,
    completion_cb: Option<CompletionCallback>,
    hints_cb: Option<HintsCallback>,
    highlight_cb: Option<HighlightCallback>,
    last_error: Option<ReadErrorKind>,
    session: Option<Session>,
}

/// A cheap, `Copy`-able summary of the last error, queryable via
/// [`LineEditor::last_error`] (`spec.md` §7's "the blocking read
/// returns NULL and sets the last-error kind on the context").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadErrorKind {
    Eof,
    Interrupted,
    NotTty,
    Read,
    Write,
    Memory,
    Invalid,
}

impl From<&ReadError> for ReadErrorKind {
    fn from(e: &ReadError) -> Self {
        match e {
            ReadError::Eof => ReadErrorKind::Eof,
            ReadError::Interrupted => ReadErrorKind::Interrupted,
            ReadError::NotTty => ReadErrorKind::NotTty,
            ReadError::Term(_) => ReadErrorKind::Read,
            ReadError::Memory => ReadErrorKind::Memory,
            ReadError::History(_) => ReadErrorKind::Write,
            ReadError::Invalid(_) => ReadErrorKind::Invalid,
        }
    }
}

impl<T: TerminalPort> LineEditor<T> {
    #[must_use]
    pub fn new(term: T) -> Self {
        Self {
            term,
            history: HistoryStore::default(),
            multiline: false,
            mask: false,
            escape_timeout_ms: ledit_key::DEFAULT_ESCAPE_TIMEOUT_MS,
            completion_cb: None,
            hints_cb: None,
            highlight_cb: None,
            last_error: None,
            session: None,
        }
    }

    #[must_use]
    pub fn terminal(&self) -> &T {
        &self.term
    }

    #[must_use]
    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.term
    }

    #[must_use]
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn set_multiline(&mut self, on: bool) {
        self.multiline = on;
    }

    pub fn set_mask_mode(&mut self, on: bool) {
        self.mask = on;
    }

    pub fn set_completion_callback(&mut self, cb: CompletionCallback) {
        self.completion_cb = Some(cb);
    }

    pub fn set_hints_callback(&mut self, cb: HintsCallback) {
        self.hints_cb = Some(cb);
    }

    pub fn set_highlight_callback(&mut self, cb: HighlightCallback) {
        self.highlight_cb = Some(cb);
    }

    /// `spec.md` §9's open question on escape-timeout tunability,
    /// decided in `DESIGN.md`: exposed, default
    /// [`ledit_key::DEFAULT_ESCAPE_TIMEOUT_MS`].
    pub fn set_escape_timeout_ms(&mut self, ms: i32) {
        self.escape_timeout_ms = ms;
    }

    #[must_use]
    pub fn last_error(&self) -> Option<ReadErrorKind> {
        self.last_error
    }

    pub fn history_add(&mut self, line: &str) {
        self.history.add(line);
    }

    pub fn history_set_max_len(&mut self, n: usize) {
        self.history.set_max_len(n);
    }

    /// # Errors
    /// Propagates file I/O failures.
    pub fn history_save(&self, path: impl AsRef<Path>) -> Result<(), ReadError> {
        self.history.save(path).map_err(ReadError::History)
    }

    /// # Errors
    /// Propagates file I/O failures.
    pub fn history_load(&mut self, path: impl AsRef<Path>) -> Result<(), ReadError> {
        self.history.load(path).map_err(ReadError::History)
    }

    pub(crate) fn session_mut(&mut self) -> Result<&mut Session, ReadError> {
        self.session.as_mut().ok_or(ReadError::Invalid("no active editing session"))
    }

    pub(crate) fn session_ref(&self) -> Result<&Session, ReadError> {
        self.session.as_ref().ok_or(ReadError::Invalid("no active editing session"))
    }

    /// Blocking read of one line (`spec.md` §4.7). Degrades to a
    /// line-oriented read with no editing when the input handle is not
    /// a terminal.
    ///
    /// # Errors
    /// [`ReadError::Eof`] / [`ReadError::Interrupted`] on `Ctrl-D`/
    /// `Ctrl-C`; I/O failures otherwise.
    pub fn read(&mut self, prompt: &str) -> Result<String, ReadError> {
        let result = self.read_inner(prompt);
        if let Err(ref e) = result {
            self.last_error = Some(e.into());
        }
        result
    }

    fn read_inner(&mut self, prompt: &str) -> Result<String, ReadError> {
        if !self.term.is_tty() {
            return self.read_line_fallback();
        }
        self.start(prompt)?;
        loop {
            match self.feed() {
                Ok(Feed::More) => continue,
                Ok(Feed::Done(line)) => {
                    self.finish_line(&line)?;
                    return Ok(line);
                }
                Err(e) => {
                    self.cancel_session();
                    let _ = self.stop_raw_mode();
                    return Err(e);
                }
            }
        }
    }

    /// Non-blocking session start: enter raw mode, print the prompt,
    /// install the tentative history slot (`spec.md` §4.7 `start`).
    ///
    /// # Errors
    /// Propagates Terminal Port failures.
    pub fn start(&mut self, prompt: &str) -> Result<(), ReadError> {
        if !self.term.is_tty() {
            return Err(ReadError::NotTty);
        }
        self.term.enter_raw().map_err(ReadError::Term)?;
        let cols = self.term.columns();
        self.session = Some(Session::new(prompt, cols, self.escape_timeout_ms));
        self.history.push_tentative(String::new());
        self.render()?;
        Ok(())
    }

    /// Process one input event (`spec.md` §4.7 `feed`).
    ///
    /// # Errors
    /// [`ReadError::Eof`]/[`ReadError::Interrupted`] end the session
    /// (the caller should treat these as terminal, not call `feed`
    /// again); other errors propagate from the Terminal Port.
    pub fn feed(&mut self) -> Result<Feed, ReadError> {
        let session = self.session_ref()?;
        let decoder = session.decoder;
        match decoder.next_key(&mut self.term).map_err(ReadError::Term)? {
            ledit_key::DecodeOutcome::Eof => Err(ReadError::Eof),
            ledit_key::DecodeOutcome::Key(key) => self.apply_key(key),
        }
    }

    /// Restore the terminal and emit a trailing newline (`spec.md`
    /// §4.7 `stop`).
    ///
    /// # Errors
    /// Propagates Terminal Port failures.
    pub fn stop(&mut self) -> Result<(), ReadError> {
        self.stop_raw_mode()?;
        self.session = None;
        Ok(())
    }

    fn stop_raw_mode(&mut self) -> Result<(), ReadError> {
        self.term.leave_raw().map_err(ReadError::Term)?;
        self.term.write(b"\r\n").map_err(ReadError::Term)?;
        Ok(())
    }

    fn finish_line(&mut self, _line: &str) -> Result<(), ReadError> {
        // Drop the tentative tail slot `start` pushed for
        // history-prev/next addressing during the session. Whether a
        // committed line becomes a permanent history entry is the
        // application's call (it gets the returned line and can call
        // `history_add` itself), matching the source's behavior of
        // never auto-adding on read.
        self.history.pop_tentative();
        self.stop()
    }

    /// `spec.md` §5 cancellation: drop the tentative tail history
    /// entry created at session start.
    fn cancel_session(&mut self) {
        self.history.pop_tentative();
        self.session = None;
    }

    fn read_line_fallback(&mut self) -> Result<String, ReadError> {
        let mut line = String::new();
        let mut saw_any_byte = false;
        loop {
            match self.term.read_byte(-1).map_err(ReadError::Term)? {
                ledit_term::ReadOutcome::Byte(b'\n') => break,
                ledit_term::ReadOutcome::Byte(b) => {
                    saw_any_byte = true;
                    line.push(b as char);
                }
                ledit_term::ReadOutcome::Eof => {
                    if !saw_any_byte && line.is_empty() {
                        return Err(ReadError::Eof);
                    }
                    break;
                }
                ledit_term::ReadOutcome::Timeout => continue,
            }
        }
        if line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}
