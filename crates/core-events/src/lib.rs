//! Decoded input events consumed by the dispatcher.
//!
//! Events are produced one at a time by the blocking reader in `core-input`;
//! key presses, resizes and pastes share a single stream, so no two document
//! mutations ever interleave.

use std::fmt;

/// Normalized input events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
    /// Bracketed paste payload. Never logged verbatim; log its length only.
    Paste(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }
}

/// KeyCode enumerates normalized logical key representations consumed by higher layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.contains(KeyModifiers::CTRL) {
            f.write_str("^")?;
        }
        if self.mods.contains(KeyModifiers::ALT) {
            f.write_str("M-")?;
        }
        match self.code {
            KeyCode::Char(c) if self.mods.contains(KeyModifiers::CTRL) => {
                write!(f, "{}", c.to_ascii_uppercase())
            }
            KeyCode::Char(c) => write!(f, "{c}"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_display() {
        assert_eq!(KeyEvent::ctrl('x').to_string(), "^X");
        assert_eq!(KeyEvent::plain(KeyCode::Char('q')).to_string(), "q");
        assert_eq!(KeyEvent::plain(KeyCode::PageDown).to_string(), "PageDown");
        let alt = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT);
        assert_eq!(alt.to_string(), "M-a");
    }

    #[test]
    fn constructors() {
        let k = KeyEvent::ctrl('k');
        assert_eq!(k.code, KeyCode::Char('k'));
        assert!(k.mods.contains(KeyModifiers::CTRL));
        assert!(KeyEvent::plain(KeyCode::Enter).mods.is_empty());
    }
}
