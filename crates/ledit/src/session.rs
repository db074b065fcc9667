//! Per-session editing state (`spec.md` §3's "Edit State"). Lives
//! inside [`crate::LineEditor`] rather than as a separate `EditState`
//! value with a borrowed prompt: the facade's `read`/`start` take
//! `prompt: &str` with a caller-chosen lifetime that would otherwise
//! have to infect `LineEditor`'s own type parameter across repeated
//! calls, so the prompt is cloned once per session instead (`spec.md`
//! §9's "shared-vs-owned strings" note already treats the prompt as
//! borrowed only for the *session's* lifetime, which this still
//! honors — it just copies rather than borrows across that lifetime).

use ledit_edit::{CompletionState, EditBuffer, RenderMetrics};
use ledit_key::KeyDecoder;

pub(crate) struct Session {
    pub buffer: EditBuffer,
    pub prompt: String,
    pub cols: u16,
    pub render: RenderMetrics,
    pub history_index: usize,
    pub completion: CompletionState,
    pub completion_candidates: Vec<String>,
    pub completion_saved: Option<String>,
    pub decoder: KeyDecoder,
}

impl Session {
    pub fn new(prompt: &str, cols: u16, escape_timeout_ms: i32) -> Self {
        Self {
            buffer: EditBuffer::new(),
            prompt: prompt.to_owned(),
            cols: cols.max(1),
            render: RenderMetrics::default(),
            history_index: 0,
            completion: CompletionState::default(),
            completion_candidates: Vec::new(),
            completion_saved: None,
            decoder: KeyDecoder::new(escape_timeout_ms),
        }
    }
}
