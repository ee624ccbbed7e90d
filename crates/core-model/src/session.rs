//! Editor session: the single owner of the document and everything positioned on it.
//!
//! States: `Clean` and `Dirty` follow the modified flag (any mutation dirties, only
//! a successful save cleans). `Closed` is terminal and is reached through `close`.
//!
//! Every operation that can move the cursor ends in `settle`, which reclamps the
//! cursor against the document and then scrolls the viewport, so the invariants
//! hold before the next frame is drawn.

use std::path::{Path, PathBuf};

use core_state::{
    Clipboard, Cursor, SearchMatch, SearchState, StatusMessage, step_past,
};
use core_text::segment::paste_runs;
use core_text::{Document, LineEnding, Position};

use crate::io_ops::{FileStore, Loaded, load_document, save_document};
use crate::viewport::{Viewport, VisibleLines};
use crate::EditError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Clean,
    Dirty,
    Closed,
}

/// Cursor movement requests understood by `EditorSession::move_cursor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
    /// Absolute placement, clamped like every other motion.
    To(Position),
}

#[derive(Debug)]
pub struct EditorSession {
    document: Document,
    cursor: Cursor,
    viewport: Viewport,
    clipboard: Clipboard,
    search: SearchState,
    modified: bool,
    closed: bool,
    path: Option<PathBuf>,
    line_ending: LineEnding,
    had_trailing_newline: bool,
    status: Option<StatusMessage>,
}

impl EditorSession {
    /// Empty, unnamed session with a text area of `height` x `width` cells.
    pub fn new(height: usize, width: usize) -> Self {
        Self::with_document(Document::new(), height, width)
    }

    /// Session over an in-memory document (no path, platform line endings).
    pub fn with_document(document: Document, height: usize, width: usize) -> Self {
        Self {
            document,
            cursor: Cursor::new(),
            viewport: Viewport::new(height, width),
            clipboard: Clipboard::new(),
            search: SearchState::new(),
            modified: false,
            closed: false,
            path: None,
            line_ending: LineEnding::platform(),
            had_trailing_newline: true,
            status: None,
        }
    }

    /// Load `path` through `store`. A missing file opens as an empty document
    /// that will be created on the first save.
    pub fn open(
        store: &dyn FileStore,
        path: &Path,
        height: usize,
        width: usize,
    ) -> Result<Self, EditError> {
        let Loaded {
            document,
            line_ending,
            had_trailing_newline,
            existed,
            ..
        } = load_document(store, path)?;
        let mut session = Self::with_document(document, height, width);
        session.path = Some(path.to_path_buf());
        session.line_ending = line_ending;
        session.had_trailing_newline = had_trailing_newline;
        session.status = Some(if existed {
            StatusMessage::success(format!(
                "Read {} lines from {}",
                session.document.line_count(),
                path.display()
            ))
        } else {
            StatusMessage::info(format!("New File: {}", path.display()))
        });
        tracing::info!(
            target: "model.session",
            lines = session.document.line_count(),
            existed,
            "session_open"
        );
        Ok(session)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cursor(&self) -> Position {
        self.cursor.position()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn state(&self) -> SessionState {
        if self.closed {
            SessionState::Closed
        } else if self.modified {
            SessionState::Dirty
        } else {
            SessionState::Clean
        }
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, message: StatusMessage) {
        self.status = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn set_scroll_margin(&mut self, margin: usize) {
        self.viewport.set_margin(margin);
        self.settle();
    }

    // ---- queries for the renderer ----

    pub fn visible_slice(&self) -> VisibleLines<'_> {
        self.viewport.visible_slice(&self.document)
    }

    /// Cursor `(row, col)` relative to the text area, `None` for a degenerate viewport.
    pub fn cursor_screen_position(&self) -> Option<(u16, u16)> {
        self.viewport
            .cursor_screen_position(&self.document, self.cursor.position())
    }

    // ---- edits ----

    pub fn insert_char(&mut self, ch: char) -> Result<(), EditError> {
        let mut pos = self.cursor.position();
        self.document.insert_char(&mut pos, ch)?;
        self.after_edit(pos);
        Ok(())
    }

    /// Insert an inline run (no line breaks) at the cursor.
    pub fn insert_str(&mut self, text: &str) -> Result<(), EditError> {
        if text.is_empty() {
            return Ok(());
        }
        let mut pos = self.cursor.position();
        self.document.insert_str(&mut pos, text)?;
        self.after_edit(pos);
        Ok(())
    }

    /// Insert arbitrary text, turning each line break into `split_line`.
    pub fn insert_text(&mut self, text: &str) -> Result<(), EditError> {
        for (i, run) in paste_runs(text).iter().enumerate() {
            if i > 0 {
                self.split_line()?;
            }
            self.insert_str(run)?;
        }
        Ok(())
    }

    pub fn delete_backward(&mut self) -> Result<(), EditError> {
        let mut pos = self.cursor.position();
        self.document.delete_backward(&mut pos)?;
        self.after_edit(pos);
        Ok(())
    }

    pub fn delete_forward(&mut self) -> Result<(), EditError> {
        let mut pos = self.cursor.position();
        self.document.delete_forward(&mut pos)?;
        self.after_edit(pos);
        Ok(())
    }

    pub fn split_line(&mut self) -> Result<(), EditError> {
        let mut pos = self.cursor.position();
        self.document.split_line(&mut pos)?;
        self.after_edit(pos);
        Ok(())
    }

    /// Cut the cursor line into the clipboard; the cursor goes to column 0 of
    /// the line that takes its place.
    pub fn cut_line(&mut self) -> Result<(), EditError> {
        let line = self.cursor.line();
        self.clipboard.cut_line(&mut self.document, line)?;
        self.after_edit(Position::new(line, 0));
        Ok(())
    }

    /// Paste the clipboard above the cursor line. `Ok(false)` when the clipboard is empty.
    pub fn paste(&mut self) -> Result<bool, EditError> {
        let line = self.cursor.line();
        if !self.clipboard.paste(&mut self.document, line)? {
            return Ok(false);
        }
        self.after_edit(self.cursor.position());
        Ok(true)
    }

    // ---- motion ----

    /// Returns true when the cursor moved.
    pub fn move_cursor(&mut self, motion: Motion) -> bool {
        let before = self.cursor.position();
        let doc = &self.document;
        let page = isize::try_from(self.viewport.height().max(1)).unwrap_or(isize::MAX);
        match motion {
            Motion::Left => self.cursor.move_by(doc, 0, -1),
            Motion::Right => self.cursor.move_by(doc, 0, 1),
            Motion::Up => self.cursor.move_by(doc, -1, 0),
            Motion::Down => self.cursor.move_by(doc, 1, 0),
            Motion::LineStart => self.cursor.move_to_line_start(doc),
            Motion::LineEnd => self.cursor.move_to_line_end(doc),
            Motion::PageUp => self.cursor.move_by(doc, -page, 0),
            Motion::PageDown => self.cursor.move_by(doc, page, 0),
            Motion::To(pos) => {
                self.cursor.goto(doc, pos.line, pos.byte);
                false
            }
        };
        self.settle();
        self.cursor.position() != before
    }

    pub fn resize(&mut self, height: usize, width: usize) {
        self.viewport.resize(height, width);
        self.settle();
    }

    // ---- search ----

    /// Search forward from just past the cursor; on success the cursor jumps to the match.
    pub fn find(&mut self, query: &str) -> Result<SearchMatch, EditError> {
        let start = step_past(&self.document, self.cursor.position());
        let found = self.search.find(&self.document, query, start)?;
        self.jump_to(found.position);
        Ok(found)
    }

    /// Repeat the last query from just past the last match.
    pub fn find_next(&mut self) -> Result<SearchMatch, EditError> {
        let fallback = step_past(&self.document, self.cursor.position());
        let found = self.search.find_next(&self.document, fallback)?;
        self.jump_to(found.position);
        Ok(found)
    }

    // ---- lifecycle ----

    /// Write the document to `path`, or to the current path when `None`.
    /// On success the path is remembered and the session becomes Clean; on
    /// failure nothing changes.
    pub fn save(&mut self, store: &dyn FileStore, path: Option<&Path>) -> Result<usize, EditError> {
        let target = match (path, &self.path) {
            (Some(p), _) => p.to_path_buf(),
            (None, Some(p)) => p.clone(),
            (None, None) => return Err(EditError::NoFileName),
        };
        let written = save_document(
            store,
            &target,
            &self.document,
            self.line_ending,
            self.had_trailing_newline,
        )?;
        self.path = Some(target);
        self.modified = false;
        tracing::info!(target: "model.session", bytes = written, "saved");
        Ok(written)
    }

    /// Enter `Closed`. A Dirty session needs `discard = true`.
    pub fn close(&mut self, discard: bool) -> Result<(), EditError> {
        if self.modified && !discard {
            return Err(EditError::UnsavedChanges);
        }
        self.closed = true;
        tracing::info!(target: "model.session", discarded = self.modified, "closed");
        Ok(())
    }

    fn after_edit(&mut self, pos: Position) {
        if !self.modified {
            tracing::debug!(target: "model.session", "dirty");
        }
        self.modified = true;
        self.cursor.set(&self.document, pos);
        self.settle();
    }

    fn jump_to(&mut self, pos: Position) {
        self.cursor.set(&self.document, pos);
        self.settle();
    }

    fn settle(&mut self) {
        self.cursor.reclamp(&self.document);
        self.viewport
            .ensure_visible(&self.document, self.cursor.position());
    }
}
