//! Single-slot line clipboard (kill buffer).
//!
//! Each cut overwrites the slot wholesale; paste copies the stored lines into the
//! document and leaves the slot untouched, so repeated pastes insert repeated
//! copies. Pasting with nothing cut is a harmless no-op.

use core_text::{Document, TextError};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Clipboard {
    lines: Vec<String>,
    occupied: bool,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Remove line `idx` from `doc` (clearing it when it is the only line) and keep a copy.
    pub fn cut_line(&mut self, doc: &mut Document, idx: usize) -> Result<(), TextError> {
        let removed = doc.remove_line(idx)?;
        self.lines = vec![removed];
        self.occupied = true;
        tracing::debug!(target: "state.clipboard", line = idx, "cut_line");
        Ok(())
    }

    /// Insert a copy of the stored lines starting at `at`. Returns `Ok(false)` when empty.
    pub fn paste(&self, doc: &mut Document, at: usize) -> Result<bool, TextError> {
        if !self.occupied {
            tracing::debug!(target: "state.clipboard", "paste_empty");
            return Ok(false);
        }
        doc.insert_lines(at, &self.lines)?;
        tracing::debug!(target: "state.clipboard", line = at, lines = self.lines.len(), "paste");
        Ok(true)
    }
}
