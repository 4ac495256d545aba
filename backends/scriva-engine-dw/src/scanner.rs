// this_file: backends/scriva-engine-dw/src/scanner.rs

//! UTF-16 code units in, Unicode scalars out
//!
//! The framework hands the engine raw UTF-16-style code units. Before
//! anything can be resolved against the font, surrogate pairs have to
//! merge into single scalars, and right-to-left runs need each scalar
//! swapped for its canonical mirrored counterpart (a `(` becomes a `)`
//! when the line flows the other way).
//!
//! Unpaired surrogates are not an error here: they pass through
//! unchanged and the font simply won't have a glyph for them.

use unicode_bidi_mirroring::get_mirrored;

const HIGH_SURROGATE_START: u32 = 0xD800;
const LOW_SURROGATE_START: u32 = 0xDC00;
const LOW_SURROGATE_END: u32 = 0xE000;
const SUPPLEMENTARY_BASE: u32 = 0x10000;

/// Read one code point at `*i`, merging a valid high/low surrogate
/// pair into a single supplementary-plane scalar. Advances `*i` past
/// everything consumed (one unit, or two for a pair).
pub fn next_code_point(units: &[u16], i: &mut usize) -> u32 {
    let mut uc = units[*i] as u32;
    if (HIGH_SURROGATE_START..LOW_SURROGATE_START).contains(&uc) && *i < units.len() - 1 {
        let low = units[*i + 1] as u32;
        if (LOW_SURROGATE_START..LOW_SURROGATE_END).contains(&low) {
            uc = (uc - HIGH_SURROGATE_START) * 0x400 + (low - LOW_SURROGATE_START)
                + SUPPLEMENTARY_BASE;
            *i += 1;
        }
    }
    *i += 1;
    uc
}

/// Decode a whole code-unit sequence. With `mirror` set, each scalar is
/// replaced by its canonical bidi-mirrored counterpart; scalars without
/// one (the vast majority) stay as they are.
pub fn decode_code_units(units: &[u16], mirror: bool) -> Vec<u32> {
    let mut code_points = Vec::with_capacity(units.len());
    let mut i = 0;
    while i < units.len() {
        let mut uc = next_code_point(units, &mut i);
        if mirror {
            uc = mirrored(uc);
        }
        code_points.push(uc);
    }
    code_points
}

/// Canonical mirrored counterpart, identity when none exists. Lone
/// surrogates are not scalars and map to themselves.
fn mirrored(uc: u32) -> u32 {
    char::from_u32(uc)
        .and_then(get_mirrored)
        .map_or(uc, |c| c as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bmp_passthrough() {
        assert_eq!(decode_code_units(&[0x0041, 0x00E9, 0x4E2D], false), vec![
            0x0041, 0x00E9, 0x4E2D
        ]);
    }

    #[test]
    fn surrogate_pair_merges() {
        // U+1D11E MUSICAL SYMBOL G CLEF = D834 DD1E
        assert_eq!(decode_code_units(&[0xD834, 0xDD1E], false), vec![0x1D11E]);
    }

    #[test]
    fn pair_consumes_two_units_for_one_scalar() {
        let decoded = decode_code_units(&[0x0041, 0xD834, 0xDD1E, 0x0042], false);
        assert_eq!(decoded, vec![0x41, 0x1D11E, 0x42]);
    }

    #[test]
    fn lone_high_surrogate_at_end_passes_through() {
        assert_eq!(decode_code_units(&[0x0041, 0xD834], false), vec![
            0x41, 0xD834
        ]);
    }

    #[test]
    fn high_surrogate_without_low_passes_through() {
        assert_eq!(decode_code_units(&[0xD834, 0x0041], false), vec![
            0xD834, 0x41
        ]);
    }

    #[test]
    fn unpaired_low_surrogate_passes_through() {
        assert_eq!(decode_code_units(&[0xDD1E, 0x0041], false), vec![
            0xDD1E, 0x41
        ]);
    }

    #[test]
    fn mirroring_swaps_brackets() {
        assert_eq!(decode_code_units(&[b'(' as u16], true), vec![b')' as u32]);
        assert_eq!(decode_code_units(&[b'[' as u16], true), vec![b']' as u32]);
    }

    #[test]
    fn mirroring_is_identity_for_letters() {
        assert_eq!(decode_code_units(&[b'A' as u16], true), vec![b'A' as u32]);
    }

    proptest! {
        /// Every in-range surrogate pair decodes by the exact formula.
        #[test]
        fn surrogate_algebra(high in 0xD800u16..0xDC00, low in 0xDC00u16..0xE000) {
            let decoded = decode_code_units(&[high, low], false);
            let expected =
                (high as u32 - 0xD800) * 0x400 + (low as u32 - 0xDC00) + 0x10000;
            prop_assert_eq!(decoded, vec![expected]);
        }

        /// A lone trailing high surrogate always survives unchanged.
        #[test]
        fn trailing_surrogate_survives(high in 0xD800u16..0xDC00, prefix in any::<u16>()) {
            prop_assume!(!(0xD800..0xDC00).contains(&prefix));
            let decoded = decode_code_units(&[prefix, high], false);
            prop_assert_eq!(*decoded.last().unwrap(), high as u32);
        }
    }
}
