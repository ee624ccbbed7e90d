//! Dispatcher applying `Action` to an `EditorSession`.
//!
//! Sub-modules:
//! * `motion`  - cursor movement
//! * `edit`    - text mutation and cut/paste
//! * `command` - prompts (write out, where is, exit confirmation) and help
//!
//! Editing and motion actions clear the status message before running, so a
//! message stays visible until the next command that touches the buffer.

use crate::{Action, InputContext, PromptLine};
use core_model::{EditorSession, FileStore};

mod command;
mod edit;
mod motion;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
        }
    }
}

/// Transient UI state living beside the session: the open prompt, whether
/// the help screen is up, and whether a pending save should end the program.
#[derive(Debug, Default, Clone)]
pub struct UiState {
    prompt: Option<PromptLine>,
    help_visible: bool,
    exit_after_save: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt(&self) -> Option<&PromptLine> {
        self.prompt.as_ref()
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn context(&self) -> InputContext {
        if self.help_visible {
            InputContext::Help
        } else if let Some(p) = &self.prompt {
            InputContext::Prompt(p.kind())
        } else {
            InputContext::Editing
        }
    }
}

/// Apply an action. Returns whether a redraw is needed (`dirty`) or the
/// editor should exit (`quit`).
pub fn dispatch(
    action: Action,
    session: &mut EditorSession,
    ui: &mut UiState,
    store: &dyn FileStore,
) -> DispatchResult {
    tracing::trace!(target: "actions", action = action.label(), "dispatch");
    match action {
        Action::Motion(m) => {
            session.clear_status();
            motion::handle_motion(m, session)
        }
        Action::Edit(kind) => {
            session.clear_status();
            edit::handle_edit(kind, session)
        }
        Action::CutLine => {
            session.clear_status();
            edit::handle_cut(session)
        }
        Action::Paste => {
            session.clear_status();
            edit::handle_paste(session)
        }
        Action::WriteOut
        | Action::WhereIs
        | Action::Exit
        | Action::PromptChar(_)
        | Action::PromptInsert(_)
        | Action::PromptBackspace
        | Action::PromptSubmit
        | Action::PromptCancel
        | Action::Confirm(_) => command::handle_command_action(action, session, ui, store),
        Action::Help => {
            ui.help_visible = true;
            DispatchResult::dirty()
        }
        Action::DismissHelp => {
            ui.help_visible = false;
            DispatchResult::dirty()
        }
    }
}
