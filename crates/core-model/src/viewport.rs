//! Viewport: the window of the document mapped onto the text rows of the screen.
//!
//! Invariants (after `ensure_visible` with a non-degenerate size):
//! * `cursor.line - top_line` lies in `[0, height)`.
//! * the cursor's display column minus `left_col` lies in `[0, width)`.
//!
//! Only `top_line` and `left_col` are adjusted; the cursor is never moved here.
//! Horizontal quantities are terminal cells, not bytes.

use core_text::{Document, Position, grapheme};

/// Compute the desired new first visible line to keep the cursor within the
/// vertical viewport subject to a top/bottom margin.
///
/// Inputs:
/// - first: current first visible line (top of viewport)
/// - cursor_line: current cursor line (0-based)
/// - text_height: number of text rows available
/// - margin: desired margin in rows (clamped to at most text_height/2)
///
/// Returns Some(new_first) if a scroll is needed, else None when the cursor is
/// already within the permitted band. With margin 0 this is the plain rule:
/// scroll up to the cursor line, or down until it is the last visible row.
pub fn compute_scroll_intent(
    first: usize,
    cursor_line: usize,
    text_height: usize,
    margin: usize,
) -> Option<usize> {
    if text_height == 0 {
        return None;
    }
    let m = margin.min(text_height / 2);
    let top = first;
    let bottom = first + text_height;
    if cursor_line < top + m {
        let new_first = cursor_line.saturating_sub(m);
        if new_first != first {
            return Some(new_first);
        }
    } else if cursor_line + m >= bottom {
        let new_first = cursor_line + m + 1 - text_height;
        if new_first != first {
            return Some(new_first);
        }
    }
    None
}

/// Horizontal counterpart of `compute_scroll_intent` (no margin). `span` is the
/// number of cells the cursor cluster occupies, so a wide cluster under the
/// cursor is scrolled fully into view when it fits.
pub fn compute_hscroll_intent(left: usize, col: usize, span: usize, width: usize) -> Option<usize> {
    if width == 0 {
        return None;
    }
    let span = span.clamp(1, width);
    if col < left {
        return Some(col);
    }
    if col + span > left + width {
        return Some(col + span - width);
    }
    None
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    top_line: usize,
    left_col: usize,
    height: usize,
    width: usize,
    margin: usize,
}

impl Viewport {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            top_line: 0,
            left_col: 0,
            height,
            width,
            margin: 0,
        }
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    pub fn left_col(&self) -> usize {
        self.left_col
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn margin(&self) -> usize {
        self.margin
    }

    /// Vertical scroll margin in rows; `compute_scroll_intent` caps it at half the height.
    pub fn set_margin(&mut self, margin: usize) {
        self.margin = margin;
    }

    /// New terminal text area size. Callers follow up with `ensure_visible`.
    pub fn resize(&mut self, height: usize, width: usize) {
        tracing::debug!(target: "model.viewport", height, width, "resize");
        self.height = height;
        self.width = width;
    }

    /// Adjust `top_line` / `left_col` so the cursor projects inside the viewport.
    /// Returns true when either offset changed.
    pub fn ensure_visible(&mut self, doc: &Document, cursor: Position) -> bool {
        if self.height == 0 || self.width == 0 {
            return false;
        }
        let mut changed = false;
        if let Some(first) =
            compute_scroll_intent(self.top_line, cursor.line, self.height, self.margin)
        {
            tracing::trace!(target: "model.viewport", from = self.top_line, to = first, "vscroll");
            self.top_line = first;
            changed = true;
        }
        let line = doc.line_at(cursor.line).unwrap_or_default();
        let col = grapheme::visual_col(&line, cursor.byte);
        let span = line
            .get(cursor.byte..)
            .and_then(|rest| grapheme::iter(rest).next())
            .map_or(1, grapheme::cluster_width);
        if let Some(left) = compute_hscroll_intent(self.left_col, col, span, self.width) {
            tracing::trace!(target: "model.viewport", from = self.left_col, to = left, "hscroll");
            self.left_col = left;
            changed = true;
        }
        changed
    }

    /// The lines to draw, top to bottom: at most `height` items, each already cut
    /// to the `[left_col, left_col + width)` cell window. Lazy and restartable.
    pub fn visible_slice<'a>(&self, doc: &'a Document) -> VisibleLines<'a> {
        let end = doc.line_count().min(self.top_line.saturating_add(self.height));
        VisibleLines {
            doc,
            next: self.top_line.min(end),
            end,
            left_col: self.left_col,
            width: self.width,
        }
    }

    /// Screen `(row, col)` of the cursor relative to the text area origin.
    /// `None` when the viewport is degenerate or the cursor is outside it.
    pub fn cursor_screen_position(&self, doc: &Document, cursor: Position) -> Option<(u16, u16)> {
        if self.height == 0 || self.width == 0 {
            return None;
        }
        let row = cursor.line.checked_sub(self.top_line)?;
        let line = doc.line_at(cursor.line).ok()?;
        let col = grapheme::visual_col(&line, cursor.byte).checked_sub(self.left_col)?;
        if row >= self.height || col >= self.width {
            return None;
        }
        Some((u16::try_from(row).ok()?, u16::try_from(col).ok()?))
    }
}

/// Iterator over the visible, cell-clipped lines of a viewport.
#[derive(Debug, Clone)]
pub struct VisibleLines<'a> {
    doc: &'a Document,
    next: usize,
    end: usize,
    left_col: usize,
    width: usize,
}

impl Iterator for VisibleLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.next >= self.end {
            return None;
        }
        let line = self.doc.line_at(self.next).unwrap_or_default();
        self.next += 1;
        Some(clip_cells(&line, self.left_col, self.width))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for VisibleLines<'_> {}

/// Cut `line` to the cell window `[left, left + width)`. Wide clusters split by
/// either edge become blanks; control characters draw as one blank.
pub fn clip_cells(line: &str, left: usize, width: usize) -> String {
    let right = left.saturating_add(width);
    let mut out = String::new();
    let mut col = 0usize;
    for g in grapheme::iter(line) {
        if col >= right {
            break;
        }
        let w = grapheme::cluster_width(g);
        let end = col + w;
        if col < left && end <= left {
            col = end;
            continue;
        }
        if col < left {
            out.extend(std::iter::repeat_n(' ', end.min(right) - left));
        } else if end > right {
            out.extend(std::iter::repeat_n(' ', right - col));
        } else if g.chars().any(char::is_control) {
            out.extend(std::iter::repeat_n(' ', w));
        } else {
            out.push_str(g);
        }
        col = end;
    }
    out
}
