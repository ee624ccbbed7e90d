//! Terminal writer: an ordered list of primitive commands flushed once per frame.
//!
//! Invariants:
//! * Commands preserve ordering; nothing is written before `flush_to`.
//! * Positions are absolute with a (0,0) origin; callers keep them in bounds.
//! * Every styled row ends with a reset so styles never bleed into the next row.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, Colors, Print, ResetColor, SetAttribute, SetColors},
    terminal::{Clear, ClearType},
};
use std::io::{Write, stdout};

use crate::frame::{Frame, RowStyle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    /// Clear the row the cursor is on; always preceded by `MoveTo(0, y)`.
    ClearLine,
    Print(String),
    Style(RowStyle),
    ResetStyle,
    HideCursor,
    ShowCursor,
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    /// Commands for a complete frame: every row is cleared and repainted.
    pub fn for_frame(frame: &Frame) -> Self {
        let mut w = Self::new();
        w.push(Command::HideCursor);
        for (y, row) in frame.rows.iter().enumerate() {
            let Ok(y) = u16::try_from(y) else {
                break;
            };
            w.move_to(0, y);
            w.push(Command::ClearLine);
            if row.style == RowStyle::Plain {
                w.print(row.text.as_str());
            } else {
                w.push(Command::Style(row.style));
                w.print(row.text.as_str());
                w.push(Command::ResetStyle);
            }
        }
        if let Some((x, y)) = frame.cursor {
            w.move_to(x, y);
            w.push(Command::ShowCursor);
        }
        w
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    fn push(&mut self, cmd: Command) {
        self.cmds.push(cmd);
    }

    pub fn flush(self) -> Result<()> {
        let mut out = stdout().lock();
        self.flush_to(&mut out)
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::ClearLine => queue!(out, Clear(ClearType::CurrentLine))?,
                Command::Print(s) => queue!(out, Print(s))?,
                Command::Style(style) => apply_style(out, style)?,
                Command::ResetStyle => {
                    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?
                }
                Command::HideCursor => queue!(out, Hide)?,
                Command::ShowCursor => queue!(out, Show)?,
            }
        }
        out.flush()?;
        Ok(())
    }
}

fn apply_style<W: Write>(out: &mut W, style: RowStyle) -> std::io::Result<()> {
    match style {
        RowStyle::Plain => Ok(()),
        RowStyle::Title => queue!(
            out,
            SetColors(Colors::new(Color::White, Color::Blue)),
            SetAttribute(Attribute::Bold)
        ),
        RowStyle::Bar | RowStyle::Prompt => {
            queue!(out, SetColors(Colors::new(Color::Black, Color::White)))
        }
        RowStyle::Info => queue!(out, SetAttribute(Attribute::Bold)),
        RowStyle::Success => queue!(
            out,
            SetColors(Colors::new(Color::Green, Color::Reset)),
            SetAttribute(Attribute::Bold)
        ),
        RowStyle::Error => queue!(
            out,
            SetColors(Colors::new(Color::Red, Color::Reset)),
            SetAttribute(Attribute::Bold)
        ),
    }
}
