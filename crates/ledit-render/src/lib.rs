//! Renderer: single-line and multi-line frame assembly, plus the
//! Append Buffer they write into (`spec.md` §4.4). Uses only the six
//! VT100 sequences `spec.md` names: `\r`, `ESC[nK`, `ESC[nC`/`ESC[nD`,
//! `ESC[nA`/`ESC[nB`, and `ESC[H`+`ESC[2J` (the latter pair lives
//! behind `ledit_term::TerminalPort::clear_screen`, not here — this
//! crate never clears the whole screen itself).

mod append;
mod colorize;
mod fastpath;
mod hint;
mod multi_line;
mod single_line;

pub use append::AppendBuffer;
pub use colorize::push_colored;
pub use fastpath::fits_as_fast_append;
pub use hint::{HintSpec, fit_hint, render_hint};
pub use multi_line::render_multi_line;
pub use single_line::render_single_line;
