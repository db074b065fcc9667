//! Key-event dispatch: the bridge between a decoded [`ledit_key::Key`]
//! and the Editor Operations in `ledit_edit::ops` (`spec.md` §4.3, the
//! key-binding matrix in §6).

use ledit_edit::{CompletionState, RenderMetrics};
use ledit_key::{Arrow, Key};

use crate::{Feed, LineEditor, ReadError};
use ledit_term::TerminalPort;

impl<T: TerminalPort> LineEditor<T> {
    pub(crate) fn apply_key(&mut self, key: Key) -> Result<Feed, ReadError> {
        if self.in_completion() {
            if let Some(outcome) = self.apply_completion_key(&key)? {
                return Ok(outcome);
            }
            // Falls through: the key that ended completion mode is
            // still delivered to normal processing (`spec.md` §4.5
            // step 4: "deliver the key to normal processing").
        }

        match key {
            Key::Enter => {
                let line = self.session_mut()?.buffer.as_str().to_owned();
                return Ok(Feed::Done(line));
            }
            Key::Ctrl('c') => return Err(ReadError::Interrupted),
            Key::Ctrl('d') => {
                let session = self.session_mut()?;
                if session.buffer.is_empty() {
                    return Err(ReadError::Eof);
                }
                ledit_edit::delete_forward(&mut session.buffer);
            }
            Key::Backspace | Key::Ctrl('h') => {
                ledit_edit::backspace(&mut self.session_mut()?.buffer);
            }
            Key::Delete => {
                ledit_edit::delete_forward(&mut self.session_mut()?.buffer);
            }
            Key::Arrow(Arrow::Left) | Key::Ctrl('b') => {
                ledit_edit::move_left(&mut self.session_mut()?.buffer);
            }
            Key::Arrow(Arrow::Right) | Key::Ctrl('f') => {
                ledit_edit::move_right(&mut self.session_mut()?.buffer);
            }
            Key::Home | Key::Ctrl('a') => {
                ledit_edit::move_home(&mut self.session_mut()?.buffer);
            }
            Key::End | Key::Ctrl('e') => {
                ledit_edit::move_end(&mut self.session_mut()?.buffer);
            }
            Key::Ctrl('k') => {
                ledit_edit::delete_to_end(&mut self.session_mut()?.buffer);
            }
            Key::Ctrl('u') => {
                ledit_edit::delete_line(&mut self.session_mut()?.buffer);
            }
            Key::Ctrl('w') => {
                ledit_edit::delete_previous_word(&mut self.session_mut()?.buffer);
            }
            Key::Ctrl('t') => {
                ledit_edit::transpose(&mut self.session_mut()?.buffer);
            }
            Key::Arrow(Arrow::Up) | Key::Ctrl('p') => self.history_prev(),
            Key::Arrow(Arrow::Down) | Key::Ctrl('n') => self.history_next(),
            Key::Ctrl('l') => {
                self.term.clear_screen().map_err(ReadError::Term)?;
                self.session_mut()?.render = RenderMetrics::default();
            }
            Key::Tab => self.begin_completion()?,
            Key::Grapheme(bytes) => {
                return self.apply_insert(&bytes);
            }
            // Standalone Escape, C0 codes with no binding, Ctrl-G/J/..
            // etc: no-op, matching §4.2's "any other ... is discarded
            // silently" posture for unbound input.
            _ => {}
        }

        self.render()?;
        Ok(Feed::More)
    }

    /// `spec.md` §4.3 insert fast-path: appending at end-of-line in
    /// single-line mode, with no hint callback active, whose new total
    /// width still fits the terminal, writes the new bytes directly
    /// instead of re-running the full renderer. Mask mode and an active
    /// highlight callback are both excluded from the fast path (not
    /// named by the spec, but writing raw, uncolored bytes under either
    /// would leak the real content or skip its color painting — a
    /// correctness requirement, not a style choice).
    fn apply_insert(&mut self, bytes: &[u8]) -> Result<Feed, ReadError> {
        let session = self.session_mut()?;
        let at_end = session.buffer.pos() == session.buffer.len();
        let fast_path_eligible = at_end
            && !self.multiline
            && !self.mask
            && self.hints_cb.is_none()
            && self.highlight_cb.is_none();

        let fast_write = if fast_path_eligible {
            let prompt_width = ledit_text::display_width(session.prompt.as_bytes());
            let buf_width_before = ledit_text::display_width(session.buffer.as_bytes());
            let new_width = ledit_text::display_width(bytes);
            ledit_render::fits_as_fast_append(prompt_width, buf_width_before, new_width, session.cols)
        } else {
            false
        };

        ledit_edit::insert(&mut session.buffer, bytes)?;

        if fast_write {
            self.term.write(bytes).map_err(ReadError::Term)?;
        } else {
            self.render()?;
        }
        Ok(Feed::More)
    }

    /// Handles one key while a completion cycle is active. Returns
    /// `Ok(Some(outcome))` if the key was consumed by the completion
    /// loop, `Ok(None)` if the caller should fall through to normal
    /// dispatch (the candidate was accepted, §4.5 step 4).
    fn apply_completion_key(&mut self, key: &Key) -> Result<Option<Feed>, ReadError> {
        match key {
            Key::Tab => {
                let session = self.session_mut()?;
                let n = session.completion_candidates.len();
                session.completion.index = (session.completion.index + 1) % (n + 1);
                let index = session.completion.index;
                if index == n {
                    self.term.write(b"\x07").map_err(ReadError::Term)?;
                    let session = self.session_mut()?;
                    let saved = session.completion_saved.clone().unwrap_or_default();
                    session.buffer.replace(&saved);
                } else {
                    let session = self.session_mut()?;
                    let candidate = session.completion_candidates[index].clone();
                    session.buffer.replace(&candidate);
                }
                self.render()?;
                Ok(Some(Feed::More))
            }
            Key::Escape => {
                let saved = self.session_mut()?.completion_saved.take();
                if let Some(saved) = saved {
                    self.session_mut()?.buffer.replace(&saved);
                }
                self.end_completion();
                self.render()?;
                Ok(Some(Feed::More))
            }
            _ => {
                self.end_completion();
                Ok(None)
            }
        }
    }

    fn in_completion(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.completion.active)
    }

    fn end_completion(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.completion = CompletionState::default();
            session.completion_candidates.clear();
            session.completion_saved = None;
        }
    }

    /// `spec.md` §4.5: invoke the completion callback; enter
    /// completion mode if it returns at least one candidate, else bell.
    pub(crate) fn begin_completion(&mut self) -> Result<(), ReadError> {
        let Some(cb) = self.completion_cb.as_mut() else {
            return Ok(());
        };
        let current = self.session_ref()?.buffer.as_str().to_owned();
        let candidates = cb(&current);
        if candidates.is_empty() {
            self.term.write(b"\x07").map_err(ReadError::Term)?;
            return Ok(());
        }
        let session = self.session_mut()?;
        session.completion_saved = Some(current);
        session.completion_candidates = candidates;
        session.completion.active = true;
        session.completion.index = 0;
        let first = session.completion_candidates[0].clone();
        session.buffer.replace(&first);
        self.render()?;
        Ok(())
    }

    /// `spec.md` §4.3 history-prev: save the in-progress edit into its
    /// history slot, step one entry further back, and load it.
    pub(crate) fn history_prev(&mut self) {
        let Some(session) = self.session.as_mut() else { return };
        if session.history_index + 1 >= self.history.len() {
            return;
        }
        let current = session.buffer.as_str().to_owned();
        self.history.set_nth_from_newest(session.history_index, current);
        session.history_index += 1;
        if let Some(entry) = self.history.nth_from_newest(session.history_index) {
            let entry = entry.to_owned();
            session.buffer.replace(&entry);
        }
    }

    /// `spec.md` §4.3 history-next: symmetric counterpart, stepping
    /// toward the in-progress edit (`history_index == 0`).
    pub(crate) fn history_next(&mut self) {
        let Some(session) = self.session.as_mut() else { return };
        if session.history_index == 0 {
            return;
        }
        let current = session.buffer.as_str().to_owned();
        self.history.set_nth_from_newest(session.history_index, current);
        session.history_index -= 1;
        if let Some(entry) = self.history.nth_from_newest(session.history_index) {
            let entry = entry.to_owned();
            session.buffer.replace(&entry);
        }
    }
}
