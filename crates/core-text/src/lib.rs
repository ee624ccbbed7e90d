//! Line store: the document as an ordered sequence of lines backed by a `ropey::Rope`.
//!
//! Lines never carry their terminator. The rope joins them with a single LF and
//! holds no trailing terminator, so an empty rope is exactly one empty line and
//! `line_count() >= 1` always holds. Positions are `(line, byte)` pairs where the
//! byte offset sits on a grapheme cluster boundary of that line; every mutator
//! validates its position and reports `TextError::OutOfRange` otherwise.

use ropey::Rope;
use thiserror::Error;

pub mod line_ending;
pub mod motion;
pub mod segment;
pub mod width;

pub use line_ending::{LineEnding, NormalizedText, normalize_line_endings};
pub use width::egc_width;

/// Errors reported by line store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TextError {
    /// The position does not name a valid line / grapheme boundary.
    #[error("position {line}:{byte} is out of range")]
    OutOfRange { line: usize, byte: usize },
    /// Nothing to delete at the document start (backward) or end (forward).
    #[error("nothing to delete")]
    NoOp,
    /// Line breaks only enter the document through `split_line`.
    #[error("line terminator in inline text")]
    LineTerminator,
}

/// A position inside a document expressed as (line index, byte offset within that line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub byte: usize,
}

impl Position {
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }
    pub fn origin() -> Self {
        Self { line: 0, byte: 0 }
    }
    pub fn clamp_to<F>(&mut self, line_count: usize, mut line_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if line_count == 0 {
            self.line = 0;
            self.byte = 0;
            return;
        }
        if self.line >= line_count {
            self.line = line_count - 1;
        }
        let max_len = line_len_fn(self.line);
        if self.byte > max_len {
            self.byte = max_len;
        }
    }
}

/// Which side of the position `delete_char` removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDirection {
    /// Backspace: the cluster before the position; merges into the previous line at column 0.
    Backward,
    /// Delete: the cluster at the position; pulls the next line up at end of line.
    Forward,
}

/// The document owned by an editor session.
#[derive(Clone, Default)]
pub struct Document {
    rope: Rope,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Content is never formatted; only its shape.
        f.debug_struct("Document")
            .field("lines", &self.line_count())
            .field("bytes", &self.rope.len_bytes())
            .finish()
    }
}

impl Document {
    /// An empty document (one empty line).
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build a document from LF separated text. A trailing LF produces a final empty line;
    /// callers that track trailing-newline conventions strip it first.
    pub fn from_str(content: &str) -> Self {
        Self {
            rope: Rope::from_str(content),
        }
    }

    /// Build a document from already split lines. An empty slice yields one empty line.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let joined = lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        Self::from_str(&joined)
    }

    /// Total number of lines (never zero).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Return the line at `idx` without its terminator.
    pub fn line_at(&self, idx: usize) -> Result<String, TextError> {
        if idx >= self.line_count() {
            return Err(TextError::OutOfRange { line: idx, byte: 0 });
        }
        let mut s = self.rope.line(idx).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        Ok(s)
    }

    /// Byte length of a line (excluding the terminator); 0 for an invalid index.
    pub fn line_len(&self, idx: usize) -> usize {
        if idx >= self.line_count() {
            return 0;
        }
        let line = self.rope.line(idx);
        let len = line.len_bytes();
        if idx + 1 < self.line_count() {
            len - 1
        } else {
            len
        }
    }

    /// All lines in order (used for assertions and serialization).
    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count())
            .filter_map(|i| self.line_at(i).ok())
            .collect()
    }

    /// The whole document joined by LF, without a trailing terminator.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Check that `pos` names an existing line and a grapheme boundary within it.
    pub fn validate(&self, pos: Position) -> Result<(), TextError> {
        let out_of_range = TextError::OutOfRange {
            line: pos.line,
            byte: pos.byte,
        };
        let line = self.line_at(pos.line).map_err(|_| out_of_range)?;
        if pos.byte > line.len() || !grapheme::is_boundary(&line, pos.byte) {
            return Err(out_of_range);
        }
        Ok(())
    }

    /// An edit can fuse clusters across `pos` (combining marks, regional indicator
    /// pairs); move it forward past the fused cluster so it stays on a boundary.
    fn settle(&self, pos: &mut Position) {
        if let Ok(line) = self.line_at(pos.line)
            && !grapheme::is_boundary(&line, pos.byte)
        {
            pos.byte = grapheme::next_boundary(&line, pos.byte);
        }
    }

    fn char_index(&self, pos: Position) -> usize {
        let abs = self.rope.line_to_byte(pos.line) + pos.byte;
        self.rope.byte_to_char(abs)
    }

    /// Insert one character at `pos`; advances `pos` past it.
    pub fn insert_char(&mut self, pos: &mut Position, ch: char) -> Result<(), TextError> {
        let mut buf = [0u8; 4];
        self.insert_str(pos, ch.encode_utf8(&mut buf))
    }

    /// Insert an inline run of text at `pos`; advances `pos` past it.
    pub fn insert_str(&mut self, pos: &mut Position, text: &str) -> Result<(), TextError> {
        if text.contains(['\n', '\r']) {
            return Err(TextError::LineTerminator);
        }
        self.validate(*pos)?;
        let char_index = self.char_index(*pos);
        self.rope.insert(char_index, text);
        pos.byte += text.len();
        self.settle(pos);
        tracing::trace!(target: "text", line = pos.line, bytes = text.len(), "insert");
        Ok(())
    }

    /// Split the line at `pos` into two; `pos` moves to the start of the new line.
    pub fn split_line(&mut self, pos: &mut Position) -> Result<(), TextError> {
        self.validate(*pos)?;
        let char_index = self.char_index(*pos);
        self.rope.insert_char(char_index, '\n');
        pos.line += 1;
        pos.byte = 0;
        tracing::trace!(target: "text", line = pos.line, "split_line");
        Ok(())
    }

    /// Delete one grapheme cluster relative to `pos`, merging lines at the boundaries.
    pub fn delete_char(
        &mut self,
        pos: &mut Position,
        direction: DeleteDirection,
    ) -> Result<(), TextError> {
        match direction {
            DeleteDirection::Backward => self.delete_backward(pos),
            DeleteDirection::Forward => self.delete_forward(pos),
        }
    }

    /// Backspace. At column 0 of a non-first line the line is merged into the end of the
    /// previous one and `pos` lands at the join point.
    pub fn delete_backward(&mut self, pos: &mut Position) -> Result<(), TextError> {
        self.validate(*pos)?;
        if pos.line == 0 && pos.byte == 0 {
            return Err(TextError::NoOp);
        }
        if pos.byte == 0 {
            let prev_line = pos.line - 1;
            let prev_len = self.line_len(prev_line);
            let newline = self.char_index(Position::new(prev_line, prev_len));
            self.rope.remove(newline..newline + 1);
            pos.line = prev_line;
            pos.byte = prev_len;
            self.settle(pos);
            tracing::trace!(target: "text", line = pos.line, "merge_backward");
            return Ok(());
        }
        let line = self.line_at(pos.line)?;
        let prev = grapheme::prev_boundary(&line, pos.byte);
        let start = self.char_index(Position::new(pos.line, prev));
        let end = self.char_index(*pos);
        self.rope.remove(start..end);
        pos.byte = prev;
        self.settle(pos);
        Ok(())
    }

    /// Delete at the cursor. At end of a non-last line the next line is pulled up.
    /// `pos` only moves when the join fuses two clusters around it.
    pub fn delete_forward(&mut self, pos: &mut Position) -> Result<(), TextError> {
        self.validate(*pos)?;
        let line_len = self.line_len(pos.line);
        if pos.byte == line_len {
            if pos.line + 1 >= self.line_count() {
                return Err(TextError::NoOp);
            }
            let newline = self.char_index(*pos);
            self.rope.remove(newline..newline + 1);
            self.settle(pos);
            tracing::trace!(target: "text", line = pos.line, "merge_forward");
            return Ok(());
        }
        let line = self.line_at(pos.line)?;
        let next = grapheme::next_boundary(&line, pos.byte);
        let start = self.char_index(*pos);
        let end = self.char_index(Position::new(pos.line, next));
        self.rope.remove(start..end);
        self.settle(pos);
        Ok(())
    }

    /// Remove the line at `idx` and return its content. The only line of a document is
    /// cleared instead of removed.
    pub fn remove_line(&mut self, idx: usize) -> Result<String, TextError> {
        let removed = self.line_at(idx)?;
        let count = self.line_count();
        let (start, end) = if count == 1 {
            (0, self.rope.len_chars())
        } else if idx + 1 < count {
            (self.rope.line_to_char(idx), self.rope.line_to_char(idx + 1))
        } else {
            // Last line: take the terminator of the previous line with it.
            (self.rope.line_to_char(idx) - 1, self.rope.len_chars())
        };
        self.rope.remove(start..end);
        tracing::trace!(target: "text", line = idx, remaining = self.line_count(), "remove_line");
        Ok(removed)
    }

    /// Insert whole lines so that the first of them ends up at index `idx`.
    /// `idx == line_count()` appends after the last line.
    pub fn insert_lines<S: AsRef<str>>(&mut self, idx: usize, lines: &[S]) -> Result<(), TextError> {
        let count = self.line_count();
        if idx > count {
            return Err(TextError::OutOfRange { line: idx, byte: 0 });
        }
        if lines.is_empty() {
            return Ok(());
        }
        let mut payload = String::new();
        for line in lines {
            let line = line.as_ref();
            if line.contains(['\n', '\r']) {
                return Err(TextError::LineTerminator);
            }
            payload.push_str(line);
            payload.push('\n');
        }
        if idx == count {
            // Appending: the separator goes before the payload instead of after it.
            payload.pop();
            payload.insert(0, '\n');
            let end = self.rope.len_chars();
            self.rope.insert(end, &payload);
        } else {
            let at = self.rope.line_to_char(idx);
            self.rope.insert(at, &payload);
        }
        tracing::trace!(target: "text", line = idx, inserted = lines.len(), "insert_lines");
        Ok(())
    }
}

/// Grapheme and width utilities. These are pure helpers operating on a single line.
pub mod grapheme {
    use crate::egc_width;
    use unicode_segmentation::UnicodeSegmentation;

    /// Iterate grapheme clusters in a line.
    pub fn iter(line: &str) -> impl Iterator<Item = &str> {
        line.graphemes(true)
    }

    /// True when `byte` is 0, the line length, or the start of a cluster.
    pub fn is_boundary(line: &str, byte: usize) -> bool {
        if byte == 0 || byte == line.len() {
            return true;
        }
        if !line.is_char_boundary(byte) {
            return false;
        }
        line.grapheme_indices(true).any(|(idx, _)| idx == byte)
    }

    /// Previous grapheme boundary (returns 0 if already at or below 1st boundary).
    pub fn prev_boundary(line: &str, byte: usize) -> usize {
        if byte == 0 || byte > line.len() {
            return 0;
        }
        let mut last = 0;
        for (idx, _) in line.grapheme_indices(true) {
            if idx >= byte {
                break;
            }
            last = idx;
        }
        last
    }

    /// Next grapheme boundary (returns line.len() if at or beyond end).
    pub fn next_boundary(line: &str, byte: usize) -> usize {
        if byte >= line.len() {
            return line.len();
        }
        for (idx, _) in line.grapheme_indices(true) {
            if idx > byte {
                return idx;
            }
        }
        line.len()
    }

    /// Compute visual column (terminal cells) up to (but not including) byte offset.
    pub fn visual_col(line: &str, byte: usize) -> usize {
        let mut col = 0;
        for (idx, g) in line.grapheme_indices(true) {
            if idx >= byte {
                break;
            }
            col += egc_width(g) as usize;
        }
        col
    }

    /// Byte offset of the cluster covering visual column `target`, clamped to line end.
    pub fn byte_for_visual_col(line: &str, target: usize) -> usize {
        let mut col = 0;
        for (b, g) in line.grapheme_indices(true) {
            let w = cluster_width(g);
            if col + w > target {
                return b;
            }
            col += w;
        }
        line.len()
    }

    /// Width in terminal cells of this grapheme cluster.
    pub fn cluster_width(g: &str) -> usize {
        egc_width(g) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::grapheme;
    use super::*;

    fn doc(lines: &[&str]) -> Document {
        Document::from_lines(lines)
    }

    #[test]
    fn empty_document_has_one_line() {
        let d = Document::new();
        assert_eq!(d.line_count(), 1);
        assert_eq!(d.line_at(0).unwrap(), "");
        let d = Document::from_lines::<&str>(&[]);
        assert_eq!(d.line_count(), 1);
    }

    #[test]
    fn create_document_and_read_lines() {
        let d = Document::from_str("hello\nworld");
        assert_eq!(d.line_count(), 2);
        assert_eq!(d.line_at(0).unwrap(), "hello");
        assert_eq!(d.line_at(1).unwrap(), "world");
        assert_eq!(d.line_len(0), 5);
        assert_eq!(
            d.line_at(2),
            Err(TextError::OutOfRange { line: 2, byte: 0 })
        );
    }

    #[test]
    fn only_lf_breaks_lines() {
        // Form feed and vertical tab stay inside the line.
        let d = Document::from_str("a\u{000C}b\u{000B}c\nd");
        assert_eq!(d.line_count(), 2);
        assert_eq!(d.line_at(0).unwrap(), "a\u{000C}b\u{000B}c");
    }

    #[test]
    fn insert_char_middle_advances_position() {
        let mut d = doc(&["abc"]);
        let mut pos = Position::new(0, 1);
        d.insert_char(&mut pos, '😀').unwrap();
        assert_eq!(d.line_at(0).unwrap(), "a😀bc");
        assert_eq!(pos.byte, 1 + "😀".len());
    }

    #[test]
    fn insert_rejects_invalid_positions_and_terminators() {
        let mut d = doc(&["ab"]);
        let mut pos = Position::new(0, 3);
        assert_eq!(
            d.insert_char(&mut pos, 'x'),
            Err(TextError::OutOfRange { line: 0, byte: 3 })
        );
        let mut pos = Position::new(1, 0);
        assert!(d.insert_char(&mut pos, 'x').is_err());
        let mut pos = Position::new(0, 0);
        assert_eq!(
            d.insert_str(&mut pos, "x\ny"),
            Err(TextError::LineTerminator)
        );
        assert_eq!(d.lines(), vec!["ab"]);
    }

    #[test]
    fn insert_rejects_mid_cluster_offset() {
        let mut d = doc(&["e\u{0301}x"]);
        let mut pos = Position::new(0, 1);
        assert!(d.insert_char(&mut pos, 'z').is_err());
    }

    #[test]
    fn insert_before_leading_combining_mark_keeps_typing_order() {
        let mut d = doc(&["\u{0301}x"]);
        let mut pos = Position::origin();
        d.insert_char(&mut pos, 'e').unwrap();
        assert_eq!(pos, Position::new(0, "e\u{0301}".len()));
        d.insert_char(&mut pos, 'f').unwrap();
        assert_eq!(d.line_at(0).unwrap(), "e\u{0301}fx");
        assert_eq!(pos, Position::new(0, "e\u{0301}f".len()));
    }

    #[test]
    fn insert_completing_flag_lands_after_it() {
        let mut d = doc(&["\u{1F1F8}"]);
        let mut pos = Position::origin();
        d.insert_char(&mut pos, '\u{1F1FA}').unwrap();
        assert_eq!(pos.byte, d.line_len(0));
        assert!(grapheme::is_boundary(&d.line_at(0).unwrap(), pos.byte));
    }

    #[test]
    fn merges_that_fuse_clusters_land_on_a_boundary() {
        let mut d = doc(&["e", "\u{0301}x"]);
        let mut pos = Position::new(1, 0);
        d.delete_backward(&mut pos).unwrap();
        assert_eq!(d.lines(), vec!["e\u{0301}x"]);
        assert_eq!(pos, Position::new(0, "e\u{0301}".len()));

        let mut d = doc(&["e", "\u{0301}x"]);
        let mut pos = Position::new(0, 1);
        d.delete_forward(&mut pos).unwrap();
        assert_eq!(d.lines(), vec!["e\u{0301}x"]);
        assert_eq!(pos, Position::new(0, "e\u{0301}".len()));
        d.validate(pos).unwrap();
    }

    #[test]
    fn split_line_at_end() {
        let mut d = doc(&["abc", "def"]);
        let mut pos = Position::new(0, 3);
        d.split_line(&mut pos).unwrap();
        assert_eq!(d.lines(), vec!["abc", "", "def"]);
        assert_eq!(pos, Position::new(1, 0));
    }

    #[test]
    fn split_line_middle() {
        let mut d = doc(&["abcd"]);
        let mut pos = Position::new(0, 2);
        d.split_line(&mut pos).unwrap();
        assert_eq!(d.lines(), vec!["ab", "cd"]);
        assert_eq!(pos, Position::new(1, 0));
    }

    #[test]
    fn delete_backward_cluster() {
        let mut d = doc(&["ab😀c"]);
        let mut pos = Position::new(0, d.line_len(0));
        d.delete_backward(&mut pos).unwrap();
        d.delete_backward(&mut pos).unwrap();
        assert_eq!(d.line_at(0).unwrap(), "ab");
        assert_eq!(pos.byte, 2);
    }

    #[test]
    fn delete_backward_joins_lines() {
        let mut d = doc(&["ab", "cd"]);
        let mut pos = Position::new(1, 0);
        d.delete_char(&mut pos, DeleteDirection::Backward).unwrap();
        assert_eq!(d.lines(), vec!["abcd"]);
        assert_eq!(pos, Position::new(0, 2));
    }

    #[test]
    fn delete_backward_at_start_is_noop() {
        let mut d = doc(&["ab"]);
        let mut pos = Position::origin();
        assert_eq!(d.delete_backward(&mut pos), Err(TextError::NoOp));
        assert_eq!(d.lines(), vec!["ab"]);
    }

    #[test]
    fn delete_forward_cluster_and_merge() {
        let mut d = doc(&["e\u{0301}x", "yz"]);
        let mut pos = Position::origin();
        d.delete_forward(&mut pos).unwrap();
        assert_eq!(d.line_at(0).unwrap(), "x");
        pos.byte = 1;
        d.delete_char(&mut pos, DeleteDirection::Forward).unwrap();
        assert_eq!(d.lines(), vec!["xyz"]);
        assert_eq!(pos, Position::new(0, 1));
    }

    #[test]
    fn delete_forward_at_document_end_is_noop() {
        let mut d = doc(&["a", "b"]);
        let mut pos = Position::new(1, 1);
        assert_eq!(d.delete_forward(&mut pos), Err(TextError::NoOp));
    }

    #[test]
    fn remove_line_variants() {
        let mut d = doc(&["a", "b", "c"]);
        assert_eq!(d.remove_line(0).unwrap(), "a");
        assert_eq!(d.lines(), vec!["b", "c"]);
        assert_eq!(d.remove_line(1).unwrap(), "c");
        assert_eq!(d.lines(), vec!["b"]);
        assert_eq!(d.remove_line(0).unwrap(), "b");
        assert_eq!(d.lines(), vec![""]);
        assert_eq!(d.line_count(), 1);
        assert!(d.remove_line(1).is_err());
    }

    #[test]
    fn insert_lines_front_middle_and_end() {
        let mut d = doc(&["b", "d"]);
        d.insert_lines(0, &["a"]).unwrap();
        d.insert_lines(2, &["c"]).unwrap();
        d.insert_lines(4, &["e", "f"]).unwrap();
        assert_eq!(d.lines(), vec!["a", "b", "c", "d", "e", "f"]);
        assert!(d.insert_lines(7, &["x"]).is_err());
    }

    #[test]
    fn insert_lines_into_empty_document() {
        let mut d = Document::new();
        d.insert_lines(0, &["x"]).unwrap();
        assert_eq!(d.lines(), vec!["x", ""]);
    }

    #[test]
    fn grapheme_boundaries() {
        let s = "e\u{0301}漢";
        let nb = grapheme::next_boundary(s, 0);
        assert_eq!(nb, "e\u{0301}".len());
        assert_eq!(grapheme::prev_boundary(s, s.len()), nb);
        assert!(grapheme::is_boundary(s, nb));
        assert!(!grapheme::is_boundary(s, 1));
    }

    #[test]
    fn visual_col_and_back() {
        let s = "a漢b";
        assert_eq!(grapheme::visual_col(s, s.len()), 4);
        assert_eq!(grapheme::byte_for_visual_col(s, 1), 1);
        // Column 2 falls inside the wide cluster: it maps to the cluster start.
        assert_eq!(grapheme::byte_for_visual_col(s, 2), 1);
        assert_eq!(grapheme::byte_for_visual_col(s, 3), 4);
        assert_eq!(grapheme::byte_for_visual_col(s, 99), s.len());
    }
}
