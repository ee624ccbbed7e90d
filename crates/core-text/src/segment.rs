//! Normalization of text arriving from outside the document (bracketed paste,
//! IME commits). Raw text is never logged.

use unicode_normalization::UnicodeNormalization;

/// Split pasted text into inline runs separated by line breaks (CRLF, CR, or LF).
/// Each run is NFC normalized; `n` breaks yield `n + 1` runs.
pub fn paste_runs(input: &str) -> Vec<String> {
    let normalized: String = input.nfc().collect();
    crate::normalize_line_endings(&normalized)
        .normalized
        .split('\n')
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::paste_runs;

    #[test]
    fn runs_split_on_any_terminator() {
        assert_eq!(paste_runs("a\r\nb\nc"), vec!["a", "b", "c"]);
        assert_eq!(paste_runs("x\n"), vec!["x", ""]);
        assert_eq!(paste_runs("plain"), vec!["plain"]);
    }

    #[test]
    fn runs_are_nfc() {
        assert_eq!(paste_runs("e\u{0301}"), vec!["\u{00E9}"]);
        assert_eq!(paste_runs("\u{00E9}\ne\u{0301}"), vec!["\u{00E9}", "\u{00E9}"]);
    }
}
