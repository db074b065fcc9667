use smallvec::SmallVec;
use std::fmt;

/// Bytes of one decoded grapheme cluster (`spec.md` §4.2's "printable
/// grapheme cluster, carrying its UTF-8 bytes"). Inline-stored up to 16
/// bytes, which comfortably covers a base codepoint plus a handful of
/// combining/variation-selector/ZWJ-joined codepoints coalesced under
/// the escape timeout.
pub type GraphemeBytes = SmallVec<[u8; 16]>;

/// Arrow-key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

/// The closed set of logical key events `spec.md` §4.2 defines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// A printable grapheme cluster, e.g. a base character with
    /// coalesced combining marks.
    Grapheme(GraphemeBytes),
    Enter,
    Backspace,
    /// `Ctrl` + an ASCII letter (`a`..`z`) or digit (`4`..`7`) or space,
    /// per the C0 control-code mapping in `spec.md` §4.2.
    Ctrl(char),
    Tab,
    /// A standalone `ESC` byte (the timeout elapsed with no
    /// continuation byte).
    Escape,
    Arrow(Arrow),
    Home,
    End,
    Delete,
}

/// Terse, single-line rendering of a [`Key`] for development/debugging
/// (`SPEC_FULL.md` §C.2's key-code debug mode), grounded in the
/// teacher's `TerseDisplay` trait.
pub trait TerseKey {
    fn terse_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl TerseKey for Key {
    fn terse_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Grapheme(bytes) => match std::str::from_utf8(bytes) {
                Ok(s) => write!(f, "Char({s:?})"),
                Err(_) => write!(f, "Char(invalid-utf8:{bytes:02x?})"),
            },
            Key::Enter => write!(f, "Enter"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Ctrl(c) => write!(f, "Ctrl-{}", c.to_ascii_uppercase()),
            Key::Tab => write!(f, "Tab"),
            Key::Escape => write!(f, "Escape"),
            Key::Arrow(Arrow::Up) => write!(f, "Up"),
            Key::Arrow(Arrow::Down) => write!(f, "Down"),
            Key::Arrow(Arrow::Left) => write!(f, "Left"),
            Key::Arrow(Arrow::Right) => write!(f, "Right"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::Delete => write!(f, "Delete"),
        }
    }
}

pub struct TerseDisplay<'a>(pub &'a Key);

impl fmt::Display for TerseDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.terse_fmt(f)
    }
}
