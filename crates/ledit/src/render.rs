//! Wires `ledit-render`'s single-line/multi-line renderers to a live
//! session: builds the hint via the application callback, picks the
//! renderer by `multiline`, and issues the one write `spec.md` §4.4
//! calls for.

use ledit_render::{AppendBuffer, HintSpec, render_multi_line, render_single_line};
use ledit_term::TerminalPort;

use crate::{LineEditor, ReadError};

impl<T: TerminalPort> LineEditor<T> {
    pub(crate) fn render(&mut self) -> Result<(), ReadError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        let hint = self.hints_cb.as_mut().and_then(|cb| cb(session.buffer.as_str()));
        let hint_spec = hint.as_ref().map(|h| HintSpec {
            text: h.text.as_str(),
            color: h.color,
            bold: h.bold,
        });

        // §4.5/§6: the highlight callback fills a color-code-per-byte
        // array alongside the buffer. Skipped under mask mode: painting
        // the stars with the real content's colors would leak it
        // through a side channel the mask is meant to hide.
        let colors = if self.mask {
            None
        } else {
            self.highlight_cb.as_mut().map(|cb| {
                let mut colors = vec![0u8; session.buffer.as_bytes().len()];
                cb(session.buffer.as_str(), &mut colors);
                colors
            })
        };

        let mut out = AppendBuffer::new();
        if self.multiline {
            render_multi_line(
                &mut out,
                &session.prompt,
                session.buffer.as_bytes(),
                session.buffer.pos(),
                session.cols,
                self.mask,
                hint_spec.as_ref(),
                colors.as_deref(),
                &mut session.render,
            );
        } else {
            render_single_line(
                &mut out,
                &session.prompt,
                session.buffer.as_bytes(),
                session.buffer.pos(),
                session.cols,
                self.mask,
                hint_spec.as_ref(),
                colors.as_deref(),
            );
        }

        // §7: render-time write failures are silently swallowed — the
        // display may become inconsistent but the edit state is
        // unchanged.
        if let Err(err) = self.term.write(out.as_bytes()) {
            tracing::debug!(?err, "render write failed, swallowing per spec");
        }
        Ok(())
    }

    /// Erase the currently rendered prompt/line without destroying
    /// session state (`spec.md` §4.7 `hide`), for async output that
    /// needs the line out of the way temporarily.
    pub fn hide(&mut self) -> Result<(), ReadError> {
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };
        let mut out = AppendBuffer::new();
        if self.multiline && session.render.old_rows > 0 {
            let down = session.render.old_rows.saturating_sub(session.render.old_rpos);
            if down > 0 {
                out.push_str(&format!("\x1b[{down}B"));
            }
            for _ in 0..session.render.old_rows {
                out.push_str("\r\x1b[0K\x1b[1A");
            }
            out.push_str("\r\x1b[0K");
        } else {
            out.push_str("\r\x1b[0K");
        }
        self.term.write(out.as_bytes()).map_err(ReadError::Term)?;
        Ok(())
    }

    /// Re-render after [`LineEditor::hide`].
    pub fn show(&mut self) -> Result<(), ReadError> {
        if let Some(session) = self.session.as_mut() {
            session.render = Default::default();
        }
        self.render()
    }
}
