//! KeyTranslator: key/paste event -> Action.
//!
//! Translation depends only on the input context (editing, an open prompt, or
//! the help screen) and the configured tab width. Unbound keys yield `None`.

use crate::{Action, Answer, EditKind, Motion, PromptKind};
use core_events::{InputEvent, KeyCode, KeyEvent, KeyModifiers};

/// Which surface currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    Editing,
    Prompt(PromptKind),
    Help,
}

#[derive(Debug, Clone)]
pub struct KeyTranslator {
    tab_width: usize,
}

impl Default for KeyTranslator {
    fn default() -> Self {
        Self::new(4)
    }
}

impl KeyTranslator {
    pub fn new(tab_width: usize) -> Self {
        Self {
            tab_width: tab_width.max(1),
        }
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Resize events are handled by the runtime and translate to `None`.
    pub fn translate_event(&self, ctx: InputContext, event: &InputEvent) -> Option<Action> {
        match event {
            InputEvent::Key(key) => self.translate(ctx, key),
            InputEvent::Paste(text) => translate_paste(ctx, text),
            InputEvent::Resize(..) => None,
        }
    }

    pub fn translate(&self, ctx: InputContext, key: &KeyEvent) -> Option<Action> {
        let action = match ctx {
            InputContext::Help => Some(Action::DismissHelp),
            InputContext::Prompt(PromptKind::ConfirmExit) => confirm_key(key),
            InputContext::Prompt(_) => prompt_key(key),
            InputContext::Editing => self.editing_key(key),
        };
        tracing::trace!(target: "actions", ?ctx, mapped = action.is_some(), "translate");
        action
    }

    fn editing_key(&self, key: &KeyEvent) -> Option<Action> {
        if key.mods.contains(KeyModifiers::CTRL) {
            let KeyCode::Char(c) = key.code else {
                return None;
            };
            return match c {
                'x' => Some(Action::Exit),
                'o' => Some(Action::WriteOut),
                'w' => Some(Action::WhereIs),
                'k' => Some(Action::CutLine),
                'u' => Some(Action::Paste),
                'g' => Some(Action::Help),
                'a' => Some(Action::Motion(Motion::LineStart)),
                'e' => Some(Action::Motion(Motion::LineEnd)),
                _ => None,
            };
        }
        if key.mods.contains(KeyModifiers::ALT) {
            return None;
        }
        let action = match key.code {
            KeyCode::Char(c) if !c.is_control() => Action::Edit(EditKind::InsertChar(c)),
            KeyCode::Char(_) | KeyCode::Esc => return None,
            KeyCode::Enter => Action::Edit(EditKind::Newline),
            KeyCode::Backspace => Action::Edit(EditKind::Backspace),
            KeyCode::Delete => Action::Edit(EditKind::Delete),
            KeyCode::Tab => Action::Edit(EditKind::InsertText(" ".repeat(self.tab_width))),
            KeyCode::Left => Action::Motion(Motion::Left),
            KeyCode::Right => Action::Motion(Motion::Right),
            KeyCode::Up => Action::Motion(Motion::Up),
            KeyCode::Down => Action::Motion(Motion::Down),
            KeyCode::Home => Action::Motion(Motion::LineStart),
            KeyCode::End => Action::Motion(Motion::LineEnd),
            KeyCode::PageUp => Action::Motion(Motion::PageUp),
            KeyCode::PageDown => Action::Motion(Motion::PageDown),
        };
        Some(action)
    }
}

fn prompt_key(key: &KeyEvent) -> Option<Action> {
    if key.mods.contains(KeyModifiers::CTRL) {
        // ^C cancels like nano.
        return matches!(key.code, KeyCode::Char('c')).then_some(Action::PromptCancel);
    }
    match key.code {
        KeyCode::Char(c) if !c.is_control() => Some(Action::PromptChar(c)),
        KeyCode::Enter => Some(Action::PromptSubmit),
        KeyCode::Esc => Some(Action::PromptCancel),
        KeyCode::Backspace => Some(Action::PromptBackspace),
        _ => None,
    }
}

fn confirm_key(key: &KeyEvent) -> Option<Action> {
    if key.mods.contains(KeyModifiers::CTRL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Action::Confirm(Answer::Cancel));
    }
    match key.code {
        KeyCode::Char('y' | 'Y') => Some(Action::Confirm(Answer::Yes)),
        KeyCode::Char('n' | 'N') => Some(Action::Confirm(Answer::No)),
        KeyCode::Char('c' | 'C') | KeyCode::Esc => Some(Action::Confirm(Answer::Cancel)),
        _ => None,
    }
}

fn translate_paste(ctx: InputContext, text: &str) -> Option<Action> {
    if text.is_empty() {
        return None;
    }
    match ctx {
        InputContext::Editing => Some(Action::Edit(EditKind::InsertText(text.to_string()))),
        InputContext::Prompt(kind) if kind.takes_text() => {
            Some(Action::PromptInsert(text.to_string()))
        }
        InputContext::Prompt(_) => None,
        InputContext::Help => Some(Action::DismissHelp),
    }
}
