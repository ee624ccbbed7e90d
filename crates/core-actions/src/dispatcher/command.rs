//! Prompt handling: write out (^O), where is (^W) and the exit confirmation.
//!
//! A prompt owns the keyboard until it is submitted or cancelled. Submitting
//! the save prompt with an empty answer reuses the current file name; an empty
//! search answer repeats the previous query.

use std::path::PathBuf;

use super::{DispatchResult, UiState};
use crate::{Action, Answer, PromptKind, PromptLine};
use core_model::{EditError, EditorSession, FileStore};
use core_state::{SearchError, StatusMessage};

pub(crate) fn handle_command_action(
    action: Action,
    session: &mut EditorSession,
    ui: &mut UiState,
    store: &dyn FileStore,
) -> DispatchResult {
    match action {
        Action::WriteOut => {
            ui.exit_after_save = false;
            open_save_prompt(session, ui);
            DispatchResult::dirty()
        }
        Action::WhereIs => {
            ui.prompt = Some(PromptLine::new(PromptKind::Search));
            DispatchResult::dirty()
        }
        Action::Exit => {
            if session.is_modified() {
                ui.prompt = Some(PromptLine::new(PromptKind::ConfirmExit));
                DispatchResult::dirty()
            } else {
                quit(session, false)
            }
        }
        Action::PromptChar(c) => {
            if let Some(p) = ui.prompt.as_mut() {
                p.push_char(c);
            }
            DispatchResult::dirty()
        }
        Action::PromptInsert(text) => {
            if let Some(p) = ui.prompt.as_mut() {
                p.push_str(&text);
            }
            DispatchResult::dirty()
        }
        Action::PromptBackspace => {
            if let Some(p) = ui.prompt.as_mut() {
                p.backspace();
            }
            DispatchResult::dirty()
        }
        Action::PromptCancel | Action::Confirm(Answer::Cancel) => cancel(session, ui),
        Action::Confirm(Answer::Yes) => {
            ui.exit_after_save = true;
            open_save_prompt(session, ui);
            DispatchResult::dirty()
        }
        Action::Confirm(Answer::No) => {
            ui.prompt = None;
            quit(session, true)
        }
        Action::PromptSubmit => submit(session, ui, store),
        _ => unreachable!("non-command action routed to command handler"),
    }
}

fn open_save_prompt(session: &EditorSession, ui: &mut UiState) {
    let current = session
        .current_path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    ui.prompt = Some(PromptLine::with_text(PromptKind::SaveAs, &current));
}

fn cancel(session: &mut EditorSession, ui: &mut UiState) -> DispatchResult {
    ui.prompt = None;
    ui.exit_after_save = false;
    session.set_status(StatusMessage::info("Cancelled"));
    DispatchResult::dirty()
}

fn submit(session: &mut EditorSession, ui: &mut UiState, store: &dyn FileStore) -> DispatchResult {
    let Some(prompt) = ui.prompt.take() else {
        return DispatchResult::clean();
    };
    match prompt.kind() {
        PromptKind::SaveAs => {
            let exit_after = std::mem::take(&mut ui.exit_after_save);
            let answer = prompt.into_answer();
            let target = match answer.trim() {
                "" => session.current_path().map(|p| p.to_path_buf()),
                name => Some(PathBuf::from(name)),
            };
            let Some(target) = target else {
                session.set_status(StatusMessage::info("Cancelled"));
                return DispatchResult::dirty();
            };
            if write_out(session, store, target) && exit_after {
                return quit(session, false);
            }
            DispatchResult::dirty()
        }
        PromptKind::Search => {
            let query = prompt.into_answer();
            search(session, &query);
            DispatchResult::dirty()
        }
        // Answered by `Confirm`; Enter alone keeps asking.
        PromptKind::ConfirmExit => {
            ui.prompt = Some(prompt);
            DispatchResult::clean()
        }
    }
}

/// Save to `target`, reporting the outcome. Returns true on success.
fn write_out(session: &mut EditorSession, store: &dyn FileStore, target: PathBuf) -> bool {
    match session.save(store, Some(&target)) {
        Ok(bytes) => {
            tracing::info!(target: "actions", bytes, "write_out");
            let msg = format!(
                "Wrote {} lines to {}",
                session.document().line_count(),
                target.display()
            );
            session.set_status(StatusMessage::success(msg));
            true
        }
        Err(e) => {
            tracing::warn!(target: "actions", error = %e, "write_out_failed");
            let msg = match &e {
                EditError::FileUnwritable { source, .. } => {
                    format!("Error writing {}: {source}", target.display())
                }
                other => format!("Error writing {}: {other}", target.display()),
            };
            session.set_status(StatusMessage::error(msg));
            false
        }
    }
}

fn search(session: &mut EditorSession, query: &str) {
    let (shown, result) = if query.is_empty() {
        let last = session.search_state().last_query().map(str::to_string);
        (last, session.find_next())
    } else {
        (Some(query.to_string()), session.find(query))
    };
    let shown = shown.unwrap_or_default();
    let status = match result {
        Ok(m) if m.wrapped => StatusMessage::success(format!("Found '{shown}' (wrapped)")),
        Ok(_) => StatusMessage::success(format!("Found '{shown}'")),
        Err(EditError::Search(SearchError::NotFound)) => {
            StatusMessage::error(format!("'{shown}' not found"))
        }
        Err(EditError::Search(SearchError::NoActiveQuery | SearchError::InvalidQuery)) => {
            StatusMessage::info("Cancelled")
        }
        Err(e) => StatusMessage::error(e.to_string()),
    };
    session.set_status(status);
}

fn quit(session: &mut EditorSession, discard: bool) -> DispatchResult {
    match session.close(discard) {
        Ok(()) => DispatchResult::quit(),
        Err(e) => {
            session.set_status(StatusMessage::error(e.to_string()));
            DispatchResult::dirty()
        }
    }
}
