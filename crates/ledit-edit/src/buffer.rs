//! The edit buffer: a growable, always-valid-UTF-8 byte sequence with a
//! cursor. `spec.md` §3 describes both a fixed-capacity and a dynamic
//! (growable) mode for the source's `buf`/`buflen`; this crate only
//! implements the dynamic mode — a bounded `[u8; N]` buffer is not the
//! idiomatic shape for owned, growable text in Rust, and nothing in
//! `spec.md`'s Non-goals requires a fixed-capacity variant.

use derive_more::{Display, Error};

/// Allocation failure while growing the buffer (`spec.md` §7's `Memory`
/// error kind). Operations that can only ever shrink or move the
/// cursor never return this.
#[derive(Debug, Display, Error, PartialEq, Eq, Clone, Copy)]
#[display("allocation failure growing the edit buffer")]
pub struct MemoryError;

/// Owned, contiguous, always-valid-UTF-8 edit buffer plus its cursor.
///
/// Invariant (`spec.md` §3): `buf[0..len)` is well-formed UTF-8 and
/// `pos` always sits on a grapheme boundary. The second half of that
/// invariant is the caller's responsibility — every mutator in
/// [`crate::ops`] preserves it, but nothing stops a caller from poking
/// `set_pos` with an arbitrary offset; `set_pos` clamps to the nearest
/// UTF-8 character boundary to avoid splitting a codepoint, but can
/// still land mid-cluster. Use the `ops` functions for grapheme-safe
/// movement.
#[derive(Debug, Default, Clone)]
pub struct EditBuffer {
    buf: Vec<u8>,
    pos: usize,
}

impl EditBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a buffer pre-loaded with `s`, cursor at the end (the shape
    /// history-prev/next and completion-acceptance need: `spec.md`
    /// §4.3/§4.5 both "load that entry/candidate into the buffer ...
    /// set `pos = len`").
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        Self {
            buf: s.as_bytes().to_vec(),
            pos: s.len(),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: every mutator maintains the well-formed-UTF-8
        // invariant; see the struct-level doc comment.
        unsafe { std::str::from_utf8_unchecked(&self.buf) }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Byte slice preceding the cursor.
    #[must_use]
    pub fn before_cursor(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Set the cursor to an arbitrary byte offset, clamped to `len` and
    /// snapped backward to the nearest UTF-8 char boundary.
    pub fn set_pos(&mut self, pos: usize) {
        let pos = pos.min(self.buf.len());
        self.pos = (0..=pos).rev().find(|&p| self.buf.is_char_boundary(p)).unwrap_or(0);
    }

    /// Replace the entire contents with `s`, cursor at the end. Used by
    /// history navigation and completion-candidate acceptance.
    pub fn replace(&mut self, s: &str) {
        self.buf.clear();
        self.buf.extend_from_slice(s.as_bytes());
        self.pos = self.buf.len();
    }

    pub(crate) fn buf_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }

    pub(crate) fn pos_mut(&mut self) -> &mut usize {
        &mut self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_puts_cursor_at_end() {
        let b = EditBuffer::from_str("hello");
        assert_eq!(b.pos(), 5);
        assert_eq!(b.as_str(), "hello");
    }

    #[test]
    fn replace_resets_cursor_to_new_end() {
        let mut b = EditBuffer::from_str("hello");
        b.replace("hi");
        assert_eq!(b.as_str(), "hi");
        assert_eq!(b.pos(), 2);
    }

    #[test]
    fn set_pos_snaps_to_char_boundary() {
        let mut b = EditBuffer::from_str("caf\u{00E9}"); // 'é' is bytes [3,5)
        b.set_pos(4); // lands mid-codepoint
        assert_eq!(b.pos(), 3);
    }
}
