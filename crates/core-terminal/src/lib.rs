//! Terminal backend abstraction and crossterm implementation.
//!
//! Entering puts the terminal in raw mode on the alternate screen with
//! bracketed paste enabled; leaving reverses it. `TerminalGuard` leaves
//! on drop so early returns restore the terminal, and `restore` is safe to
//! call from a panic hook.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;

/// Fallback when the size query fails (e.g. output is not a tty).
pub const DEFAULT_SIZE: TerminalSize = TerminalSize { cols: 80, rows: 24 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub cols: u16,
    pub rows: u16,
}

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    fn size(&self) -> TerminalSize;
}

#[derive(Debug, Default)]
pub struct CrosstermBackend {
    entered: bool,
}

/// RAII guard ensuring terminal state restoration even if the caller early-returns.
pub struct TerminalGuard<'a, B: TerminalBackend> {
    backend: &'a mut B,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }
}

/// Enter and return a guard that will leave on drop.
pub fn enter_guard<B: TerminalBackend>(backend: &mut B) -> Result<TerminalGuard<'_, B>> {
    backend.enter()?;
    Ok(TerminalGuard { backend })
}

impl<B: TerminalBackend> TerminalGuard<'_, B> {
    pub fn backend(&mut self) -> &mut B {
        &mut *self.backend
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste, Hide)?;
            self.entered = true;
            tracing::debug!(target: "runtime", "terminal_enter");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
            tracing::debug!(target: "runtime", "terminal_leave");
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    fn size(&self) -> TerminalSize {
        match crossterm::terminal::size() {
            Ok((cols, rows)) => TerminalSize { cols, rows },
            Err(e) => {
                tracing::warn!(target: "runtime", error = %e, "terminal_size_failed");
                DEFAULT_SIZE
            }
        }
    }
}

/// Best-effort restoration for panic paths where no backend is reachable.
pub fn restore() {
    let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl<B: TerminalBackend> Drop for TerminalGuard<'_, B> {
    fn drop(&mut self) {
        let _ = self.backend.leave();
    }
}
