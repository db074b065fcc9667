//! The three application-supplied callback contracts `spec.md` §6/§9
//! defines: completion, hints, and (optionally) highlight. Stored as
//! `Box<dyn FnMut>` per `spec.md` §9's "Dynamic dispatch" note — no
//! downcasting or registry is needed, so plain trait objects are
//! enough (this is why `better_any`/`linkme`, which the teacher uses
//! for a downcasting control-sequence registry, were dropped; see
//! `DESIGN.md`).

/// One hint result: advisory text plus the `spec.md` §6 color code
/// (0..7) and bold flag.
#[derive(Debug, Clone)]
pub struct Hint {
    pub text: String,
    pub color: Option<u8>,
    pub bold: bool,
}

pub type CompletionCallback = Box<dyn FnMut(&str) -> Vec<String> + Send>;
pub type HintsCallback = Box<dyn FnMut(&str) -> Option<Hint> + Send>;
/// Paints one color byte per buffer position: 0 = default, 1..7 =
/// color, +8 = bold (`spec.md` §6). `len` is implicit in the output
/// slice's length, which the callback must match exactly.
pub type HighlightCallback = Box<dyn FnMut(&str, &mut Vec<u8>) + Send>;
