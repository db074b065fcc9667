//! Per-position syntax-highlight color painting (`spec.md` §4.5/§6):
//! the optional highlight callback fills a color-code-per-byte array
//! alongside the buffer; this module turns that array into SGR runs
//! wrapped around the buffer's grapheme clusters.

use crate::append::AppendBuffer;

/// Write `buf[start..end]` into `out`, one grapheme cluster at a time,
/// wrapping each run of same-colored clusters in an SGR sequence per
/// `spec.md` §6's color map (0=default, 1..7=color, +8=bold). The color
/// of a cluster is read from `colors` at the cluster's first byte; a
/// cluster is never split across two SGR runs. Bytes past the end of
/// `colors` are treated as color 0 (default).
pub fn push_colored(out: &mut AppendBuffer, buf: &[u8], start: usize, end: usize, colors: &[u8]) {
    let mut pos = start;
    let mut open = false;
    while pos < end {
        let clen = ledit_text::next_grapheme_len(buf, pos, end);
        if clen == 0 {
            break;
        }
        let code = colors.get(pos).copied().unwrap_or(0);
        if open {
            out.push_str("\x1b[0m");
            open = false;
        }
        if code != 0 {
            let base = code & 0x07;
            let bold = code & 0x08 != 0;
            if base != 0 {
                out.push_str(&format!("\x1b[{}m", 30 + u32::from(base)));
            }
            if bold {
                out.push_str("\x1b[1m");
            }
            open = true;
        }
        out.push_bytes(&buf[pos..pos + clen]);
        pos += clen;
    }
    if open {
        out.push_str("\x1b[0m");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncolored_run_passes_through_unchanged() {
        let mut out = AppendBuffer::new();
        push_colored(&mut out, b"abc", 0, 3, &[0, 0, 0]);
        assert_eq!(out.as_bytes(), b"abc");
    }

    #[test]
    fn colored_byte_is_wrapped_in_sgr_and_reset() {
        let mut out = AppendBuffer::new();
        push_colored(&mut out, b"abc", 0, 3, &[0, 1, 0]);
        let frame = std::str::from_utf8(out.as_bytes()).unwrap();
        assert_eq!(frame, "a\x1b[31mb\x1b[0mc");
    }

    #[test]
    fn bold_flag_adds_a_second_sgr_code() {
        let mut out = AppendBuffer::new();
        push_colored(&mut out, b"a", 0, 1, &[1 | 8]);
        let frame = std::str::from_utf8(out.as_bytes()).unwrap();
        assert_eq!(frame, "\x1b[31m\x1b[1ma\x1b[0m");
    }

    #[test]
    fn adjacent_same_color_clusters_share_one_run() {
        let mut out = AppendBuffer::new();
        push_colored(&mut out, b"ab", 0, 2, &[2, 2]);
        let frame = std::str::from_utf8(out.as_bytes()).unwrap();
        assert_eq!(frame, "\x1b[32mab\x1b[0m");
    }
}
