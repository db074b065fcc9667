//! Single-line renderer with horizontal scroll (`spec.md` §4.4). Never
//! mutates the real buffer — the scroll/trim windowing is computed
//! over a shadow `[start, end)` byte range.

use crate::append::AppendBuffer;
use crate::colorize::push_colored;
use crate::hint::{HintSpec, render_hint};

/// Render one single-line frame into `out`. Returns the display column
/// the cursor ends up at (`pwidth + poscol`, the value the caller may
/// want for bookkeeping; the renderer already positions the real
/// terminal cursor there via the emitted escape sequence).
///
/// `colors`, when present, is the highlight callback's per-byte color
/// array (`spec.md` §4.5/§6); ignored when `mask` is set, since
/// painting stars by the real content's colors would leak it.
#[allow(clippy::too_many_arguments)]
pub fn render_single_line(
    out: &mut AppendBuffer,
    prompt: &str,
    buf: &[u8],
    pos: usize,
    cols: u16,
    mask: bool,
    hint: Option<&HintSpec<'_>>,
    colors: Option<&[u8]>,
) -> usize {
    let cols = usize::from(cols.max(1));
    let pwidth = ledit_text::display_width(prompt.as_bytes());

    let mut start = 0usize;
    let mut end = buf.len();
    let mut poscol = ledit_text::display_width(&buf[start..pos]);
    let mut lencol = ledit_text::display_width(&buf[start..end]);

    // Left-scroll: drop graphemes from the window's left edge until the
    // cursor fits.
    while pwidth + poscol >= cols {
        let clen = ledit_text::next_grapheme_len(buf, start, end);
        if clen == 0 {
            break;
        }
        let cwidth = ledit_text::single_cluster_width(&buf[start..start + clen]);
        start += clen;
        poscol = poscol.saturating_sub(cwidth);
        lencol = lencol.saturating_sub(cwidth);
    }

    // Right-trim: drop graphemes from the window's right edge until the
    // whole visible line fits.
    while pwidth + lencol > cols {
        let clen = ledit_text::prev_grapheme_len(buf, end);
        if clen == 0 || end - clen < start {
            break;
        }
        let cwidth = ledit_text::single_cluster_width(&buf[end - clen..end]);
        end -= clen;
        lencol = lencol.saturating_sub(cwidth);
    }

    out.push_byte(b'\r');
    out.push_str(prompt);

    if mask {
        let visible = &buf[start..end];
        let count = ledit_text::cluster_count(visible);
        for _ in 0..count {
            out.push_byte(b'*');
        }
    } else if let Some(colors) = colors {
        push_colored(out, buf, start, end, colors);
    } else {
        out.push_bytes(&buf[start..end]);
    }

    if let Some(hint) = hint {
        let available = cols.saturating_sub(pwidth + lencol);
        render_hint(out, hint, available);
    }

    out.push_str("\x1b[0K");
    out.push_byte(b'\r');
    let cursor_col = pwidth + poscol;
    if cursor_col > 0 {
        out.push_str(&format!("\x1b[{cursor_col}C"));
    }
    cursor_col
}
