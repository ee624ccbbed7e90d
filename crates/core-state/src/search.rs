//! Linear, case-sensitive substring search with a single wrap.
//!
//! `find` scans from the start position to the end of the document, then wraps to
//! (0,0) and continues up to (but not past) the start position, so every position
//! is examined at most once. Matches only start on grapheme cluster boundaries.

use core_text::{Document, Position, grapheme};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search query is empty")]
    InvalidQuery,
    #[error("no match")]
    NotFound,
    #[error("no previous search")]
    NoActiveQuery,
}

/// A successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    pub position: Position,
    /// True when the scan passed the end of the document before matching.
    pub wrapped: bool,
}

/// State kept between searches to support "find next".
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchState {
    last_query: Option<String>,
    last_match: Option<Position>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub fn last_match(&self) -> Option<Position> {
        self.last_match
    }

    /// Run `find` and remember the query and outcome.
    pub fn find(
        &mut self,
        doc: &Document,
        query: &str,
        start: Position,
    ) -> Result<SearchMatch, SearchError> {
        let result = find(doc, query, start);
        if !query.is_empty() {
            self.last_query = Some(query.to_string());
            self.last_match = result.as_ref().ok().map(|m| m.position);
        }
        result
    }

    /// Repeat the last query starting one cluster past the last match. Without a
    /// recorded match the scan starts at `fallback`.
    pub fn find_next(
        &mut self,
        doc: &Document,
        fallback: Position,
    ) -> Result<SearchMatch, SearchError> {
        let query = self.last_query.clone().ok_or(SearchError::NoActiveQuery)?;
        let start = match self.last_match {
            Some(pos) => step_past(doc, pos),
            None => fallback,
        };
        self.find(doc, &query, start)
    }
}

/// Find the first occurrence of `query` at or after `start`, wrapping once.
pub fn find(doc: &Document, query: &str, start: Position) -> Result<SearchMatch, SearchError> {
    if query.is_empty() {
        return Err(SearchError::InvalidQuery);
    }
    let count = doc.line_count();
    let start_line = start.line.min(count - 1);
    let first = doc.line_at(start_line).unwrap_or_default();
    let start_byte = snap(&first, start.byte);

    let hit = |line: usize, byte: usize, wrapped: bool| {
        tracing::debug!(target: "state.search", line, byte, wrapped, "match");
        Ok(SearchMatch {
            position: Position::new(line, byte),
            wrapped,
        })
    };

    if let Some(b) = first_match(&first, query, start_byte, first.len()) {
        return hit(start_line, b, false);
    }
    for idx in start_line + 1..count {
        let line = doc.line_at(idx).unwrap_or_default();
        if let Some(b) = first_match(&line, query, 0, line.len()) {
            return hit(idx, b, false);
        }
    }
    for idx in 0..start_line {
        let line = doc.line_at(idx).unwrap_or_default();
        if let Some(b) = first_match(&line, query, 0, line.len()) {
            return hit(idx, b, true);
        }
    }
    if start_byte > 0
        && let Some(b) = first_match(&first, query, 0, start_byte - 1)
    {
        return hit(start_line, b, true);
    }
    tracing::debug!(target: "state.search", query_len = query.len(), "not_found");
    Err(SearchError::NotFound)
}

/// First match starting in `[from, last_start]` on a cluster boundary.
fn first_match(line: &str, query: &str, from: usize, last_start: usize) -> Option<usize> {
    if from > line.len() || from > last_start {
        return None;
    }
    line[from..]
        .match_indices(query)
        .map(|(i, _)| from + i)
        .take_while(|b| *b <= last_start)
        .find(|b| grapheme::is_boundary(line, *b))
}

/// Clamp `byte` into the line and onto a cluster boundary.
fn snap(line: &str, byte: usize) -> usize {
    let byte = byte.min(line.len());
    if grapheme::is_boundary(line, byte) {
        byte
    } else {
        grapheme::prev_boundary(line, byte)
    }
}

/// The position one cluster after `pos`; the end of the line stays put.
pub fn step_past(doc: &Document, pos: Position) -> Position {
    let line = doc.line_at(pos.line).unwrap_or_default();
    Position::new(pos.line, grapheme::next_boundary(&line, snap(&line, pos.byte)))
}
