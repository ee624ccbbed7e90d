//! Cursor motion helpers.
//!
//! These operate purely on a `Document` + `Position` pair and are free of editor
//! state. Horizontal motions step one grapheme cluster and wrap across line
//! boundaries the way arrow keys do; vertical motions keep the display column
//! and clamp to the end of shorter lines. Every helper returns `true` when the
//! position changed.

use crate::{Document, Position, grapheme};

/// Move left one grapheme boundary; at column 0 wrap to the end of the previous line.
pub fn left(doc: &Document, pos: &mut Position) -> bool {
    if pos.byte == 0 {
        if pos.line == 0 {
            return false;
        }
        pos.line -= 1;
        pos.byte = doc.line_len(pos.line);
        return true;
    }
    let Ok(line) = doc.line_at(pos.line) else {
        return false;
    };
    pos.byte = grapheme::prev_boundary(&line, pos.byte);
    true
}

/// Move right one grapheme boundary; at line end wrap to the start of the next line.
pub fn right(doc: &Document, pos: &mut Position) -> bool {
    let line_len = doc.line_len(pos.line);
    if pos.byte >= line_len {
        if pos.line + 1 >= doc.line_count() {
            return false;
        }
        pos.line += 1;
        pos.byte = 0;
        return true;
    }
    let Ok(line) = doc.line_at(pos.line) else {
        return false;
    };
    pos.byte = grapheme::next_boundary(&line, pos.byte);
    true
}

/// Move to start of line.
pub fn line_start(_doc: &Document, pos: &mut Position) -> bool {
    let moved = pos.byte != 0;
    pos.byte = 0;
    moved
}

/// Move to end of line (after last grapheme).
pub fn line_end(doc: &Document, pos: &mut Position) -> bool {
    let end = doc.line_len(pos.line);
    let moved = pos.byte != end;
    pos.byte = end;
    moved
}

/// Move vertically by `delta` lines (negative is up), clamping to the first/last line and
/// keeping the display column where the target line is long enough.
pub fn vertical(doc: &Document, pos: &mut Position, delta: isize) -> bool {
    let last = doc.line_count().saturating_sub(1);
    let target = pos.line.saturating_add_signed(delta).min(last);
    if target == pos.line {
        return false;
    }
    let current = doc.line_at(pos.line).unwrap_or_default();
    let col = grapheme::visual_col(&current, pos.byte);
    pos.line = target;
    let line = doc.line_at(target).unwrap_or_default();
    pos.byte = grapheme::byte_for_visual_col(&line, col);
    true
}

/// Snap `pos` to the nearest valid position: last line at most, then the nearest
/// grapheme boundary at or before the byte offset.
pub fn clamp(doc: &Document, pos: &mut Position) {
    pos.clamp_to(doc.line_count(), |l| doc.line_len(l));
    if let Ok(line) = doc.line_at(pos.line)
        && !grapheme::is_boundary(&line, pos.byte)
    {
        pos.byte = grapheme::prev_boundary(&line, pos.byte);
    }
}
