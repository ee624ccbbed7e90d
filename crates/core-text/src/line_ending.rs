//! Line ending detection, normalization and re-expansion.
//!
//! Files are normalized to LF on load; the majority style and the presence of a
//! final terminator are kept so a save writes the bytes back the way they came.

/// Line ending style detected from a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    Cr,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
            LineEnding::Crlf => "\r\n",
        }
    }

    /// Terminator used for documents that did not come from a file.
    pub const fn platform() -> Self {
        if cfg!(windows) {
            LineEnding::Crlf
        } else {
            LineEnding::Lf
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        Self::platform()
    }
}

/// Result of normalizing line endings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub normalized: String,         // LF-only content
    pub original: LineEnding,       // majority/origin style
    pub had_trailing_newline: bool, // original trailing newline presence
    pub mixed: bool,                // true if multiple styles encountered
}

impl NormalizedText {
    /// Document text: the normalized content without its final terminator.
    pub fn document_text(&self) -> &str {
        if self.had_trailing_newline {
            self.normalized
                .strip_suffix('\n')
                .unwrap_or(&self.normalized)
        } else {
            &self.normalized
        }
    }
}

/// Detect and normalize line endings of `input` to LF-only internal representation.
/// Counts CRLF, LF, and CR occurrences; picks the majority (ties resolved by precedence CRLF > LF > CR).
/// Mixed flag is true if more than one style observed and at least one count differs from majority.
/// Input without any terminator reports the platform style.
pub fn normalize_line_endings(input: &str) -> NormalizedText {
    let bytes = input.as_bytes();
    let mut i = 0usize;
    let mut crlf = 0usize;
    let mut lf = 0usize;
    let mut cr = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                if i + 1 < bytes.len() && bytes[i + 1] == b'\n' {
                    crlf += 1;
                    i += 2;
                } else {
                    cr += 1;
                    i += 1;
                }
            }
            b'\n' => {
                lf += 1;
                i += 1;
            }
            _ => i += 1,
        }
    }
    let had_trailing_newline = input.ends_with('\n') || input.ends_with('\r');
    let mut original = LineEnding::platform();
    let mut max = 0usize;
    for (style, count) in [
        (LineEnding::Crlf, crlf),
        (LineEnding::Lf, lf),
        (LineEnding::Cr, cr),
    ] {
        if count > max {
            max = count;
            original = style;
        }
    }
    let non_zero = [crlf, lf, cr].iter().filter(|c| **c > 0).count();
    let mixed = non_zero > 1 && [crlf, lf, cr].iter().any(|c| *c > 0 && *c != max);
    if crlf == 0 && cr == 0 {
        return NormalizedText {
            normalized: input.to_string(),
            original,
            had_trailing_newline,
            mixed,
        };
    }
    // Only slice at '\r' so multi-byte sequences stay intact.
    let mut out = String::with_capacity(input.len());
    let mut seg_start = 0usize;
    let mut j = 0usize;
    while j < bytes.len() {
        if bytes[j] == b'\r' {
            if seg_start < j {
                out.push_str(&input[seg_start..j]);
            }
            out.push('\n');
            if j + 1 < bytes.len() && bytes[j + 1] == b'\n' {
                j += 2;
            } else {
                j += 1;
            }
            seg_start = j;
        } else {
            j += 1;
        }
    }
    if seg_start < input.len() {
        out.push_str(&input[seg_start..]);
    }
    debug_assert!(!out.contains('\r'));
    NormalizedText {
        normalized: out,
        original,
        had_trailing_newline,
        mixed,
    }
}

/// Expand LF-joined document text back to `ending`, appending a final terminator when asked.
pub fn expand_line_endings(text: &str, ending: LineEnding, trailing_newline: bool) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push_str(ending.as_str());
        }
        out.push_str(line);
    }
    if trailing_newline {
        out.push_str(ending.as_str());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_crlf() {
        let n = normalize_line_endings("a\r\nb\r\n");
        assert_eq!(n.normalized, "a\nb\n");
        assert_eq!(n.original, LineEnding::Crlf);
        assert!(n.had_trailing_newline);
        assert!(!n.mixed);
        assert_eq!(n.document_text(), "a\nb");
    }

    #[test]
    fn normalize_cr() {
        let n = normalize_line_endings("a\rb\r");
        assert_eq!(n.normalized, "a\nb\n");
        assert_eq!(n.original, LineEnding::Cr);
        assert!(n.had_trailing_newline);
    }

    #[test]
    fn normalize_mixed_majority() {
        let n = normalize_line_endings("a\r\nb\nc\r\n");
        assert_eq!(n.normalized, "a\nb\nc\n");
        assert_eq!(n.original, LineEnding::Crlf);
        assert!(n.mixed);
    }

    #[test]
    fn normalize_trailing_newline_absent() {
        let n = normalize_line_endings("a\r\nb");
        assert_eq!(n.normalized, "a\nb");
        assert!(!n.had_trailing_newline);
        assert_eq!(n.document_text(), "a\nb");
    }

    #[test]
    fn normalize_unicode_crlf_preserves_multibyte() {
        let n = normalize_line_endings("⚙️ Gear\r\nNext\r\n");
        assert_eq!(n.normalized, "⚙️ Gear\nNext\n");
    }

    #[test]
    fn no_terminator_reports_platform_style() {
        let n = normalize_line_endings("single");
        assert_eq!(n.original, LineEnding::platform());
        assert!(!n.had_trailing_newline);
        assert_eq!(normalize_line_endings("").document_text(), "");
    }

    #[test]
    fn blank_last_line_survives_trailing_strip() {
        // "a\n\n" is the line "a" followed by one empty line, plus a final terminator.
        let n = normalize_line_endings("a\n\n");
        assert_eq!(n.document_text(), "a\n");
    }

    #[test]
    fn expand_restores_original_bytes() {
        for src in ["a\r\nb\r\n", "a\nb", "x\ry\r", "", "\n", "a\n\n"] {
            let n = normalize_line_endings(src);
            let back = expand_line_endings(n.document_text(), n.original, n.had_trailing_newline);
            assert_eq!(back, src, "round trip of {src:?}");
        }
    }
}
