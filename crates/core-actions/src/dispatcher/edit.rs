//! Text mutation and line cut/paste.

use super::DispatchResult;
use crate::EditKind;
use core_model::{EditError, EditorSession};
use core_state::StatusMessage;

pub(crate) fn handle_edit(kind: EditKind, session: &mut EditorSession) -> DispatchResult {
    let result = match kind {
        EditKind::InsertChar(c) => session.insert_char(c),
        EditKind::InsertText(text) => {
            tracing::debug!(target: "actions", len = text.len(), "insert_text");
            session.insert_text(&text)
        }
        EditKind::Newline => session.split_line(),
        EditKind::Backspace => session.delete_backward(),
        EditKind::Delete => session.delete_forward(),
    };
    report(session, result)
}

pub(crate) fn handle_cut(session: &mut EditorSession) -> DispatchResult {
    let result = session.cut_line();
    if result.is_ok() {
        session.set_status(StatusMessage::info("Cut line"));
    }
    report(session, result)
}

pub(crate) fn handle_paste(session: &mut EditorSession) -> DispatchResult {
    match session.paste() {
        Ok(true) => {
            session.set_status(StatusMessage::info("Pasted line"));
            DispatchResult::dirty()
        }
        Ok(false) => DispatchResult::dirty(),
        Err(e) => report(session, Err(e)),
    }
}

/// Boundary no-ops stay silent; anything else lands on the message line.
fn report(session: &mut EditorSession, result: Result<(), EditError>) -> DispatchResult {
    match result {
        Ok(()) => {}
        Err(e) if e.is_noop() => {
            tracing::trace!(target: "actions", "edit_noop");
        }
        Err(e) => {
            tracing::warn!(target: "actions", error = %e, "edit_failed");
            session.set_status(StatusMessage::error(e.to_string()));
        }
    }
    DispatchResult::dirty()
}
