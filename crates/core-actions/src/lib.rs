//! Actions: the editor's command vocabulary.
//!
//! Input flows `InputEvent -> KeyTranslator -> Action -> dispatch`. The
//! translator is pure with respect to the session; only `dispatch` mutates
//! the `EditorSession` and the transient UI state (prompt, help screen).

pub mod dispatcher;
pub mod key_translator;
pub mod prompt;

pub use core_model::Motion;
pub use dispatcher::{DispatchResult, UiState, dispatch};
pub use key_translator::{InputContext, KeyTranslator};
pub use prompt::{PromptKind, PromptLine};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Motion(Motion),
    Edit(EditKind),
    /// ^K
    CutLine,
    /// ^U
    Paste,
    /// ^O: open the file name prompt.
    WriteOut,
    /// ^W: open the search prompt.
    WhereIs,
    /// ^X: exit, confirming first when the buffer is modified.
    Exit,
    /// ^G
    Help,
    DismissHelp,
    PromptChar(char),
    PromptInsert(String),
    PromptBackspace,
    PromptSubmit,
    PromptCancel,
    /// Answer to "Save modified buffer?".
    Confirm(Answer),
}

impl Action {
    /// Short name for logs; never includes typed or pasted text.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Motion(_) => "motion",
            Action::Edit(_) => "edit",
            Action::CutLine => "cut_line",
            Action::Paste => "paste",
            Action::WriteOut => "write_out",
            Action::WhereIs => "where_is",
            Action::Exit => "exit",
            Action::Help => "help",
            Action::DismissHelp => "dismiss_help",
            Action::PromptChar(_) | Action::PromptInsert(_) => "prompt_input",
            Action::PromptBackspace => "prompt_backspace",
            Action::PromptSubmit => "prompt_submit",
            Action::PromptCancel => "prompt_cancel",
            Action::Confirm(_) => "confirm",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    InsertChar(char),
    /// Text that may contain line breaks (bracketed paste, tab expansion).
    InsertText(String),
    Newline,
    Backspace,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Cancel,
}
