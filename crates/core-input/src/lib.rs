//! Blocking terminal input: reads one crossterm event at a time and maps it to
//! `core_events::InputEvent`.
//!
//! Key releases and keys the editor has no use for (media, lock keys, mouse,
//! focus) are dropped here so the dispatcher only sees actionable input.

use anyhow::Result;
use core_events::{InputEvent, KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{
    self, Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKind,
    KeyModifiers as CMods,
};

/// Block until the next actionable event. `Ok(None)` means the raw event was ignored.
pub fn read_event() -> Result<Option<InputEvent>> {
    let raw = event::read()?;
    Ok(map_event(raw))
}

/// Translate one crossterm event.
pub fn map_event(raw: CEvent) -> Option<InputEvent> {
    match raw {
        CEvent::Key(key) => map_key_event(&key).map(InputEvent::Key),
        CEvent::Resize(cols, rows) => {
            tracing::debug!(target: "input.event", cols, rows, "resize");
            Some(InputEvent::Resize(cols, rows))
        }
        CEvent::Paste(data) => {
            log_paste(&data);
            Some(InputEvent::Paste(data))
        }
        CEvent::FocusGained | CEvent::FocusLost | CEvent::Mouse(_) => None,
    }
}

#[inline]
fn log_paste(data: &str) {
    tracing::trace!(target: "input.paste", len = data.len(), "paste_event");
}

/// Map a key press (or auto-repeat). Releases and unsupported keys yield `None`.
pub fn map_key_event(key: &CKeyEvent) -> Option<KeyEvent> {
    if matches!(key.kind, CKind::Release) {
        return None;
    }
    let code = map_key_code(&key.code)?;
    let mut mods = map_mods(key.modifiers);
    // Shift is already folded into the character itself.
    if matches!(code, KeyCode::Char(_)) && !mods.contains(KeyModifiers::CTRL) {
        mods.remove(KeyModifiers::SHIFT);
    }
    let code = match code {
        KeyCode::Char(c) if mods.contains(KeyModifiers::CTRL) => {
            KeyCode::Char(c.to_ascii_lowercase())
        }
        other => other,
    };
    tracing::trace!(target: "input.event", code = ?code, mods = ?mods, "key");
    Some(KeyEvent { code, mods })
}

pub fn map_key_code(code: &CKeyCode) -> Option<KeyCode> {
    let mapped = match code {
        CKeyCode::Char(c) => KeyCode::Char(*c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Tab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        _ => return None,
    };
    Some(mapped)
}

pub fn map_mods(m: CMods) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CMods::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CMods::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CMods::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}
