//! The single-character append fast path `spec.md` §4.3 calls for:
//! when inserting at end-of-line in single-line mode with no hint
//! callback active and the new total width still fits the terminal,
//! write the new bytes directly instead of re-running the full
//! renderer.

/// Would appending `new_bytes` at end-of-line still fit without
/// triggering horizontal scroll? If so, the caller can skip a full
/// [`crate::render_single_line`] call and just write `new_bytes`
/// (after the cursor-position escape emitted by the previous frame).
#[must_use]
pub fn fits_as_fast_append(prompt_width: usize, buf_width_before: usize, new_width: usize, cols: u16) -> bool {
    prompt_width + buf_width_before + new_width < usize::from(cols.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_when_well_under_width() {
        assert!(fits_as_fast_append(2, 5, 1, 80));
    }

    #[test]
    fn does_not_fit_at_exact_boundary() {
        assert!(!fits_as_fast_append(2, 57, 1, 60));
    }
}
