//! Hint rendering: the optional advisory text shown to the right of
//! the cursor when it sits at end-of-line (`spec.md` §4.4, §6).

use crate::append::AppendBuffer;

/// One hint result from the application's hints callback.
#[derive(Debug, Clone, Copy)]
pub struct HintSpec<'a> {
    pub text: &'a str,
    /// `spec.md` §6 color map: 0=default, 1=red .. 7=white.
    pub color: Option<u8>,
    pub bold: bool,
}

/// Truncate `hint` to fit in `available_cols` display columns, at a
/// grapheme-cluster boundary.
///
/// Open-question decision (`spec.md` §9, `DESIGN.md`): truncate
/// greedily at the last fully-fitting grapheme cluster; a cluster that
/// would straddle or exceed the right edge is dropped entirely rather
/// than rendered partially.
#[must_use]
pub fn fit_hint(hint: &str, available_cols: usize) -> &str {
    if available_cols == 0 {
        return "";
    }
    let bytes = hint.as_bytes();
    let mut pos = 0usize;
    let mut width = 0usize;
    let mut end = 0usize;
    while pos < bytes.len() {
        let clen = ledit_text::next_grapheme_len(bytes, pos, bytes.len());
        if clen == 0 {
            break;
        }
        let cwidth = ledit_text::single_cluster_width(&bytes[pos..pos + clen]);
        if width + cwidth > available_cols {
            break;
        }
        width += cwidth;
        pos += clen;
        end = pos;
    }
    &hint[..end]
}

/// Render `hint` into `out`, wrapped in an SGR color/bold sequence if
/// requested, then reset. No-op if the hint doesn't fit at all.
pub fn render_hint(out: &mut AppendBuffer, hint: &HintSpec<'_>, available_cols: usize) {
    let fitted = fit_hint(hint.text, available_cols);
    if fitted.is_empty() {
        return;
    }
    let mut wrote_sgr = false;
    if let Some(color) = hint.color {
        out.push_str(&format!("\x1b[{}m", 30 + u32::from(color.min(7))));
        wrote_sgr = true;
    }
    if hint.bold {
        out.push_str("\x1b[1m");
        wrote_sgr = true;
    }
    out.push_str(fitted);
    if wrote_sgr {
        out.push_str("\x1b[0m");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_that_fits_is_unchanged() {
        assert_eq!(fit_hint("abc", 10), "abc");
    }

    #[test]
    fn hint_truncates_at_grapheme_boundary() {
        assert_eq!(fit_hint("hello", 3), "hel");
    }

    #[test]
    fn wide_cluster_that_would_straddle_edge_is_dropped() {
        // "a" (1 col) + party-popper (2 cols); budget 2 only fits "a".
        let s = "a\u{1F389}";
        assert_eq!(fit_hint(s, 2), "a");
    }

    #[test]
    fn zero_budget_yields_empty() {
        assert_eq!(fit_hint("abc", 0), "");
    }

    #[test]
    fn render_wraps_in_sgr_and_resets() {
        let mut out = AppendBuffer::new();
        render_hint(
            &mut out,
            &HintSpec {
                text: "hint",
                color: Some(2),
                bold: true,
            },
            10,
        );
        let rendered = std::str::from_utf8(out.as_bytes()).unwrap();
        assert!(rendered.starts_with("\x1b[32m\x1b[1m"));
        assert!(rendered.ends_with("\x1b[0m"));
        assert!(rendered.contains("hint"));
    }

    #[test]
    fn render_skips_entirely_when_nothing_fits() {
        let mut out = AppendBuffer::new();
        render_hint(
            &mut out,
            &HintSpec {
                text: "hint",
                color: None,
                bold: false,
            },
            0,
        );
        assert!(out.is_empty());
    }
}
