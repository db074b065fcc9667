//! `spec.md` §7's error taxonomy, collapsed into one enum at the
//! facade boundary the way `vtansi::encode::EncodeError` collapses its
//! failure modes into one `derive_more`-powered type.

use derive_more::{Display, Error};

/// Everything a [`crate::LineEditor::read`] or
/// [`crate::LineEditor::feed`] call can fail with.
///
/// No `#[derive(From)]` here: four of these variants are field-less, and
/// `derive_more`'s `From` derive would generate one conflicting
/// `impl From<()>` per field-less variant. Conversions are hand-written
/// below instead, the way the teacher writes them for its own
/// unit-heavy error enums.
#[derive(Debug, Display, Error)]
pub enum ReadError {
    /// `Ctrl-D` on an empty buffer, or EOF on a non-tty fallback read.
    /// Expected control flow, not a bug.
    #[display("end of input")]
    Eof,
    /// `Ctrl-C`. Expected control flow.
    #[display("interrupted")]
    Interrupted,
    /// Editing was requested on a handle that isn't a terminal; the
    /// caller should not see this directly — [`crate::LineEditor::read`]
    /// degrades to the line-oriented fallback instead of surfacing it,
    /// but non-blocking `start` can still return it if called directly
    /// on a non-tty handle.
    #[display("input handle is not a terminal")]
    NotTty,
    /// Terminal Port I/O failure.
    #[display("terminal I/O error: {_0}")]
    Term(ledit_term::TermError),
    /// Allocation failure growing the edit buffer.
    #[display("allocation failure")]
    Memory,
    /// History file I/O failure.
    #[display("history error: {_0}")]
    History(ledit_history::HistoryError),
    /// Misuse: e.g. an empty prompt buffer passed where one is
    /// required.
    #[display("invalid argument: {_0}")]
    Invalid(&'static str),
}

impl From<ledit_edit::MemoryError> for ReadError {
    fn from(_: ledit_edit::MemoryError) -> Self {
        ReadError::Memory
    }
}

impl From<ledit_term::TermError> for ReadError {
    fn from(e: ledit_term::TermError) -> Self {
        ReadError::Term(e)
    }
}

impl From<ledit_history::HistoryError> for ReadError {
    fn from(e: ledit_history::HistoryError) -> Self {
        ReadError::History(e)
    }
}
