//! Grapheme-aware Editor Operations (`spec.md` §4.3). Each function
//! mutates an [`EditBuffer`] and returns whether anything changed, so
//! callers know whether a render is owed. `insert` is the only
//! operation that can allocate and so is the only one returning
//! `Result`.

use crate::buffer::{EditBuffer, MemoryError};

/// Insert `bytes` at the cursor. Per `spec.md` §4.3 this is the
/// fast-path candidate for single-character append; the fast-path
/// decision itself (skip full re-render when appending at end-of-line
/// in single-line mode) is made by `ledit-render`, which can see
/// `cols` and hint state that this crate does not.
pub fn insert(buffer: &mut EditBuffer, bytes: &[u8]) -> Result<bool, MemoryError> {
    if bytes.is_empty() {
        return Ok(false);
    }
    buffer.buf_mut().try_reserve(bytes.len()).map_err(|_| MemoryError)?;
    let pos = buffer.pos();
    buffer.buf_mut().splice(pos..pos, bytes.iter().copied());
    *buffer.pos_mut() += bytes.len();
    Ok(true)
}

/// Remove the grapheme cluster before the cursor.
pub fn backspace(buffer: &mut EditBuffer) -> bool {
    let pos = buffer.pos();
    let clen = ledit_text::prev_grapheme_len(buffer.as_bytes(), pos);
    if clen == 0 {
        return false;
    }
    let start = pos - clen;
    buffer.buf_mut().drain(start..pos);
    *buffer.pos_mut() = start;
    true
}

/// Remove the grapheme cluster under/after the cursor.
pub fn delete_forward(buffer: &mut EditBuffer) -> bool {
    let pos = buffer.pos();
    let clen = ledit_text::next_grapheme_len(buffer.as_bytes(), pos, buffer.len());
    if clen == 0 {
        return false;
    }
    buffer.buf_mut().drain(pos..pos + clen);
    true
}

/// Move the cursor one grapheme cluster to the left.
pub fn move_left(buffer: &mut EditBuffer) -> bool {
    let clen = ledit_text::prev_grapheme_len(buffer.as_bytes(), buffer.pos());
    if clen == 0 {
        return false;
    }
    *buffer.pos_mut() -= clen;
    true
}

/// Move the cursor one grapheme cluster to the right.
pub fn move_right(buffer: &mut EditBuffer) -> bool {
    let pos = buffer.pos();
    let clen = ledit_text::next_grapheme_len(buffer.as_bytes(), pos, buffer.len());
    if clen == 0 {
        return false;
    }
    *buffer.pos_mut() += clen;
    true
}

/// Move the cursor to the start of the buffer.
pub fn move_home(buffer: &mut EditBuffer) -> bool {
    if buffer.pos() == 0 {
        return false;
    }
    *buffer.pos_mut() = 0;
    true
}

/// Move the cursor to the end of the buffer.
pub fn move_end(buffer: &mut EditBuffer) -> bool {
    if buffer.pos() == buffer.len() {
        return false;
    }
    *buffer.pos_mut() = buffer.len();
    true
}

/// Delete the word before the cursor: skip ASCII spaces leftward, then
/// non-space graphemes, then remove the whole skipped range.
pub fn delete_previous_word(buffer: &mut EditBuffer) -> bool {
    let end = buffer.pos();
    if end == 0 {
        return false;
    }
    let bytes = buffer.as_bytes();
    let mut p = end;
    while p > 0 {
        let clen = ledit_text::prev_grapheme_len(bytes, p);
        if clen == 0 || bytes[p - clen..p] != *b" " {
            break;
        }
        p -= clen;
    }
    while p > 0 {
        let clen = ledit_text::prev_grapheme_len(bytes, p);
        if clen == 0 || bytes[p - clen..p] == *b" " {
            break;
        }
        p -= clen;
    }
    if p == end {
        return false;
    }
    buffer.buf_mut().drain(p..end);
    *buffer.pos_mut() = p;
    true
}

/// Truncate the buffer to the cursor, discarding everything after it.
pub fn delete_to_end(buffer: &mut EditBuffer) -> bool {
    let pos = buffer.pos();
    if pos == buffer.len() {
        return false;
    }
    buffer.buf_mut().truncate(pos);
    true
}

/// Clear the whole line.
pub fn delete_line(buffer: &mut EditBuffer) -> bool {
    if buffer.is_empty() {
        return false;
    }
    buffer.buf_mut().clear();
    *buffer.pos_mut() = 0;
    true
}

/// Swap the grapheme cluster at the cursor with the one before it
/// (`spec.md` §4.3's "transpose"). When the cursor is at end-of-line,
/// swaps the two preceding clusters instead.
///
/// Open-question decision (`DESIGN.md`, `spec.md` §9): at `pos == len`
/// the cursor is left at `len` afterward — there is nothing to advance
/// past.
pub fn transpose(buffer: &mut EditBuffer) -> bool {
    let len = buffer.len();
    let pos = buffer.pos();
    if pos == 0 {
        return false;
    }
    if pos == len {
        let bytes = buffer.as_bytes();
        let last_len = ledit_text::prev_grapheme_len(bytes, pos);
        if last_len == 0 {
            return false;
        }
        let mid = pos - last_len;
        let prev_len = ledit_text::prev_grapheme_len(bytes, mid);
        if prev_len == 0 {
            return false;
        }
        let start = mid - prev_len;
        swap_ranges(buffer, start, mid, pos);
        true
    } else {
        let bytes = buffer.as_bytes();
        let next_len = ledit_text::next_grapheme_len(bytes, pos, len);
        let prev_len = ledit_text::prev_grapheme_len(bytes, pos);
        if next_len == 0 || prev_len == 0 {
            return false;
        }
        let start = pos - prev_len;
        let end = pos + next_len;
        swap_ranges(buffer, start, pos, end);
        *buffer.pos_mut() = end;
        true
    }
}

/// Swap `buf[start..mid]` with `buf[mid..end]` in place.
fn swap_ranges(buffer: &mut EditBuffer, start: usize, mid: usize, end: usize) {
    let bytes = buffer.as_bytes();
    let mut swapped = Vec::with_capacity(end - start);
    swapped.extend_from_slice(&bytes[mid..end]);
    swapped.extend_from_slice(&bytes[start..mid]);
    buffer.buf_mut().splice(start..end, swapped);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_at_end_appends() {
        let mut b = EditBuffer::from_str("hi");
        assert!(insert(&mut b, b"!").unwrap());
        assert_eq!(b.as_str(), "hi!");
        assert_eq!(b.pos(), 3);
    }

    #[test]
    fn insert_empty_is_noop() {
        let mut b = EditBuffer::from_str("hi");
        assert!(!insert(&mut b, b"").unwrap());
    }

    #[test]
    fn backspace_is_inverse_of_insert() {
        let mut b = EditBuffer::from_str("ab");
        let before = b.as_str().to_string();
        insert(&mut b, "🎉".as_bytes()).unwrap();
        assert!(backspace(&mut b));
        assert_eq!(b.as_str(), before);
        assert_eq!(b.len(), before.len());
    }

    #[test]
    fn backspace_removes_whole_zwj_cluster() {
        let rainbow = "\u{1F3F3}\u{FE0F}\u{200D}\u{1F308}";
        let mut b = EditBuffer::from_str(rainbow);
        assert!(backspace(&mut b));
        assert_eq!(b.len(), 0);
        assert_eq!(b.pos(), 0);
    }

    #[test]
    fn delete_forward_removes_grapheme_under_cursor() {
        let mut b = EditBuffer::from_str("abc");
        b.set_pos(1);
        assert!(delete_forward(&mut b));
        assert_eq!(b.as_str(), "ac");
        assert_eq!(b.pos(), 1);
    }

    #[test]
    fn move_left_right_are_symmetric() {
        let mut b = EditBuffer::from_str("a🎉b");
        let end = b.pos();
        while move_left(&mut b) {}
        assert_eq!(b.pos(), 0);
        let mut steps = 0;
        while move_right(&mut b) {
            steps += 1;
        }
        assert_eq!(b.pos(), end);
        assert_eq!(steps, 3);
    }

    #[test]
    fn move_at_edges_is_noop() {
        let mut b = EditBuffer::from_str("a");
        b.set_pos(0);
        assert!(!move_left(&mut b));
        b.set_pos(1);
        assert!(!move_right(&mut b));
    }

    #[test]
    fn delete_previous_word_skips_trailing_spaces_then_word() {
        let mut b = EditBuffer::from_str("foo bar  ");
        assert!(delete_previous_word(&mut b));
        assert_eq!(b.as_str(), "foo ");
    }

    #[test]
    fn delete_to_end_truncates_at_cursor() {
        let mut b = EditBuffer::from_str("hello world");
        b.set_pos(5);
        assert!(delete_to_end(&mut b));
        assert_eq!(b.as_str(), "hello");
    }

    #[test]
    fn delete_line_clears_everything() {
        let mut b = EditBuffer::from_str("hello");
        assert!(delete_line(&mut b));
        assert_eq!(b.as_str(), "");
        assert_eq!(b.pos(), 0);
    }

    #[test]
    fn transpose_mid_line_swaps_and_advances() {
        let mut b = EditBuffer::from_str("ab");
        b.set_pos(1);
        assert!(transpose(&mut b));
        assert_eq!(b.as_str(), "ba");
        assert_eq!(b.pos(), 2);
    }

    #[test]
    fn transpose_at_end_swaps_preceding_pair_and_stays_at_end() {
        let mut b = EditBuffer::from_str("ab");
        assert!(transpose(&mut b));
        assert_eq!(b.as_str(), "ba");
        assert_eq!(b.pos(), 2);
    }

    #[test]
    fn transpose_with_single_grapheme_is_noop() {
        let mut b = EditBuffer::from_str("a");
        assert!(!transpose(&mut b));
        assert_eq!(b.as_str(), "a");
    }

    #[test]
    fn transpose_preserves_wide_clusters() {
        let mut b = EditBuffer::from_str("a🎉");
        assert!(transpose(&mut b));
        assert_eq!(b.as_str(), "🎉a");
    }
}
