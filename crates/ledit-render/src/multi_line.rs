//! Multi-line renderer with cursor-row tracking (`spec.md` §4.4).
//! Unlike the single-line renderer, this one needs state across frames
//! — `RenderMetrics` — to know how many rows the previous frame used
//! so it can climb up and erase them before repainting.

use crate::append::AppendBuffer;
use crate::colorize::push_colored;
use crate::hint::{HintSpec, render_hint};
use ledit_edit::RenderMetrics;

/// Render one multi-line frame into `out`, reading and updating
/// `metrics` in place.
///
/// `colors`, when present, is the highlight callback's per-byte color
/// array (`spec.md` §4.5/§6); ignored when `mask` is set.
#[allow(clippy::too_many_arguments)]
pub fn render_multi_line(
    out: &mut AppendBuffer,
    prompt: &str,
    buf: &[u8],
    pos: usize,
    cols: u16,
    mask: bool,
    hint: Option<&HintSpec<'_>>,
    colors: Option<&[u8]>,
    metrics: &mut RenderMetrics,
) {
    let cols = usize::from(cols.max(1));
    let pwidth = ledit_text::display_width(prompt.as_bytes());
    let bufwidth = ledit_text::display_width(buf);
    let poswidth = ledit_text::display_width(&buf[..pos]);

    let mut rows = (pwidth + bufwidth).div_ceil(cols).max(1);

    // Step 2: erase the previous frame, climbing from its last row.
    if metrics.old_rows > 0 {
        let down = metrics.old_rows.saturating_sub(metrics.old_rpos);
        if down > 0 {
            out.push_str(&format!("\x1b[{down}B"));
        }
        for _ in 1..metrics.old_rows {
            out.push_str("\r\x1b[0K\x1b[1A");
        }
    }
    out.push_str("\r\x1b[0K");

    // Step 3: paint prompt + buffer (+ hint).
    out.push_str(prompt);
    if mask {
        let count = ledit_text::cluster_count(buf);
        for _ in 0..count {
            out.push_byte(b'*');
        }
    } else if let Some(colors) = colors {
        push_colored(out, buf, 0, buf.len(), colors);
    } else {
        out.push_bytes(buf);
    }
    if let Some(hint) = hint {
        let last_row_used = (pwidth + bufwidth) % cols;
        let available = cols.saturating_sub(last_row_used);
        render_hint(out, hint, available);
    }

    // Step 4: reserve a trailing empty row if the cursor sits exactly
    // at the wrap boundary.
    if pos == buf.len() && (poswidth + pwidth) % cols == 0 {
        out.push_str("\n\r");
        rows += 1;
    }

    // Step 5: position the cursor.
    let rpos = (pwidth + poswidth + cols) / cols;
    if rows > rpos {
        out.push_str(&format!("\x1b[{}A", rows - rpos));
    }
    let col = (pwidth + poswidth) % cols;
    if col > 0 {
        out.push_str(&format!("\r\x1b[{col}C"));
    } else {
        out.push_byte(b'\r');
    }

    metrics.old_pos = pos;
    metrics.old_rows = rows;
    metrics.old_rpos = rpos;
}
