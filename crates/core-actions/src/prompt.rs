//! Single-line prompt shown on the message row.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    SaveAs,
    Search,
    ConfirmExit,
}

impl PromptKind {
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::SaveAs => "File Name to Write: ",
            PromptKind::Search => "Search: ",
            PromptKind::ConfirmExit => "Save modified buffer? (Y/N/C) ",
        }
    }

    /// Whether the prompt collects free text (the exit confirmation takes one key).
    pub fn takes_text(self) -> bool {
        !matches!(self, PromptKind::ConfirmExit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLine {
    kind: PromptKind,
    buf: String,
}

impl PromptLine {
    pub fn new(kind: PromptKind) -> Self {
        Self::with_text(kind, "")
    }

    pub fn with_text(kind: PromptKind, text: &str) -> Self {
        Self {
            kind,
            buf: text.to_string(),
        }
    }

    pub fn kind(&self) -> PromptKind {
        self.kind
    }

    pub fn buffer(&self) -> &str {
        &self.buf
    }

    /// Label followed by the typed answer, as drawn on screen.
    pub fn display(&self) -> String {
        format!("{}{}", self.kind.label(), self.buf)
    }

    pub fn push_char(&mut self, ch: char) {
        if self.kind.takes_text() && !ch.is_control() {
            self.buf.push(ch);
        }
    }

    /// Append pasted text up to its first line break.
    pub fn push_str(&mut self, text: &str) {
        let first = text.split(['\r', '\n']).next().unwrap_or_default();
        for ch in first.chars() {
            self.push_char(ch);
        }
    }

    /// Remove the last grapheme cluster.
    pub fn backspace(&mut self) {
        let cut = core_text::grapheme::prev_boundary(&self.buf, self.buf.len());
        self.buf.truncate(cut);
    }

    pub fn into_answer(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_backspace() {
        let mut p = PromptLine::new(PromptKind::Search);
        p.push_char('a');
        p.push_str("e\u{0301}\nignored");
        assert_eq!(p.buffer(), "ae\u{0301}");
        p.backspace();
        assert_eq!(p.buffer(), "a");
        p.backspace();
        p.backspace();
        assert_eq!(p.buffer(), "");
        assert_eq!(p.display(), "Search: ");
    }

    #[test]
    fn confirm_prompt_ignores_text() {
        let mut p = PromptLine::new(PromptKind::ConfirmExit);
        p.push_char('y');
        assert_eq!(p.buffer(), "");
    }

    #[test]
    fn prefilled_save_prompt() {
        let p = PromptLine::with_text(PromptKind::SaveAs, "notes.txt");
        assert_eq!(p.display(), "File Name to Write: notes.txt");
        assert_eq!(p.into_answer(), "notes.txt");
    }
}
