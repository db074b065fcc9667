//! UTF-8 / grapheme-cluster model for the line editor core.
//!
//! This crate has no dependencies and is usable standalone: it answers
//! "how many bytes is the next/previous user-perceived character" and
//! "how many terminal columns does this byte range occupy", nothing
//! more.

mod grapheme;
mod width;

pub use grapheme::{
    byte_len_of_leader, cluster_count, decode_at, display_width, next_grapheme_len,
    prev_grapheme_len, single_cluster_width,
};
pub use width::{codepoint_width, is_grapheme_extender, is_zwj};
