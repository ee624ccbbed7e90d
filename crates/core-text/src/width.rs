//! Display width of a grapheme cluster in terminal cells.
//!
//! Cursor placement, horizontal scrolling and the renderer's line slicing all
//! measure through `egc_width`. Base widths come from `unicode-width`; emoji
//! sequences (flags, keycaps, ZWJ and skin-tone composites) are forced to two
//! cells because terminals draw them as one glyph. Control characters (tab
//! included) count as one cell and are drawn as a blank.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

const KEYCAP: char = '\u{20E3}';
const GEAR: char = '\u{2699}';
const VS16: char = '\u{FE0F}';

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

// Emoji blocks plus the misc-symbol and dingbat ranges that carry legacy emoji.
fn is_pictographic(c: char) -> bool {
    ('\u{1F300}'..='\u{1FAFF}').contains(&c) || ('\u{2600}'..='\u{27BF}').contains(&c)
}

/// Width in cells of one grapheme cluster. Empty input is 0 cells.
pub fn egc_width(egc: &str) -> u16 {
    let mut chars = egc.chars();
    let Some(base) = chars.next() else {
        return 0;
    };
    // The gear stays narrow in common terminals, with or without VS16.
    if base == GEAR && chars.all(|c| c == VS16) {
        return 1;
    }
    if egc
        .chars()
        .any(|c| is_pictographic(c) || is_regional_indicator(c) || c == KEYCAP)
    {
        return 2;
    }
    match base.width() {
        Some(2) => 2,
        _ => 1,
    }
}

/// Width of a whole line: the sum of its cluster widths.
pub fn str_width(s: &str) -> usize {
    s.graphemes(true).map(|g| usize::from(egc_width(g))).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_and_control() {
        assert_eq!(egc_width("a"), 1);
        assert_eq!(egc_width("\t"), 1);
        assert_eq!(egc_width("\u{00DF}"), 1);
        assert_eq!(egc_width("e\u{0301}"), 1);
        assert_eq!(egc_width(""), 0);
    }

    #[test]
    fn east_asian_wide() {
        assert_eq!(egc_width("界"), 2);
        assert_eq!(egc_width("界\u{0301}"), 2);
    }

    #[test]
    fn emoji_sequences_are_two_cells() {
        assert_eq!(egc_width("😀"), 2);
        assert_eq!(egc_width("🇺🇸"), 2);
        assert_eq!(egc_width("🇺"), 2);
        assert_eq!(egc_width("1\u{FE0F}\u{20E3}"), 2);
        assert_eq!(egc_width("2\u{20E3}"), 2);
        assert_eq!(egc_width("👨‍👩‍👧‍👦"), 2);
        assert_eq!(egc_width("👍🏻"), 2);
        assert_eq!(egc_width("✈\u{FE0F}"), 2);
    }

    #[test]
    fn gear_is_narrow() {
        assert_eq!(egc_width("\u{2699}"), 1);
        assert_eq!(egc_width("\u{2699}\u{FE0F}"), 1);
    }

    #[test]
    fn line_width_sums_clusters() {
        assert_eq!(str_width("a漢😀e\u{0301}"), 6);
        assert_eq!(str_width(""), 0);
    }
}
