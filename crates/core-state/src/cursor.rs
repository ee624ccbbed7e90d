//! Logical cursor into a `Document`.
//!
//! Invariant: after every public call `line < doc.line_count()` and `byte` is a
//! grapheme boundary no greater than the line length. Callers that mutate the
//! document behind the cursor's back restore this with `reclamp`.

use core_text::{Document, Position, motion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pos: Position,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn line(&self) -> usize {
        self.pos.line
    }

    pub fn byte(&self) -> usize {
        self.pos.byte
    }

    /// Relative movement: `delta_line` lines first, then `delta_col` grapheme clusters.
    /// Columns wrap across line ends like arrow keys; lines clamp to the document.
    pub fn move_by(&mut self, doc: &Document, delta_line: isize, delta_col: isize) -> bool {
        let mut moved = false;
        if delta_line != 0 {
            moved |= motion::vertical(doc, &mut self.pos, delta_line);
        }
        for _ in 0..delta_col.unsigned_abs() {
            let stepped = if delta_col < 0 {
                motion::left(doc, &mut self.pos)
            } else {
                motion::right(doc, &mut self.pos)
            };
            if !stepped {
                break;
            }
            moved = true;
        }
        moved
    }

    pub fn move_to_line_start(&mut self, doc: &Document) -> bool {
        motion::line_start(doc, &mut self.pos)
    }

    pub fn move_to_line_end(&mut self, doc: &Document) -> bool {
        motion::line_end(doc, &mut self.pos)
    }

    /// Absolute placement with the same clamping as `move_by`.
    pub fn goto(&mut self, doc: &Document, line: usize, byte: usize) {
        self.pos = Position::new(line, byte);
        motion::clamp(doc, &mut self.pos);
    }

    /// Adopt a position produced by a document mutation, clamped to validity.
    pub fn set(&mut self, doc: &Document, pos: Position) {
        self.goto(doc, pos.line, pos.byte);
    }

    /// Restore the invariant after the document changed underneath the cursor.
    pub fn reclamp(&mut self, doc: &Document) {
        motion::clamp(doc, &mut self.pos);
    }
}
