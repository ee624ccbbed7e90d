//! Frame composition: session + UI overlay -> styled screen rows.
//!
//! Composition is pure so frames can be compared as text in tests; the
//! writer turns a frame into terminal commands.

use core_model::EditorSession;
use core_state::MessageKind;
use core_text::grapheme;
use core_text::width::str_width;

use crate::layout::ScreenLayout;
use crate::status::{HELP_SCREEN, fit, help_bar, status_bar, title_bar};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Plain,
    Title,
    Bar,
    Info,
    Success,
    Error,
    Prompt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub text: String,
    pub style: RowStyle,
}

impl Row {
    fn new(text: String, style: RowStyle) -> Self {
        Self { text, style }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<Row>,
    /// Hardware cursor `(col, row)` in screen coordinates; `None` hides it.
    pub cursor: Option<(u16, u16)>,
}

impl Frame {
    pub fn text(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.text.as_str()).collect()
    }
}

/// What the renderer needs besides the session.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub session: &'a EditorSession,
    /// Prompt label plus typed answer, drawn on the message line.
    pub prompt: Option<&'a str>,
    pub help_visible: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(session: &'a EditorSession) -> Self {
        Self {
            session,
            prompt: None,
            help_visible: false,
        }
    }
}

/// Build the rows for one frame. A screen shorter than the full chrome keeps
/// the topmost rows.
pub fn compose_frame(ctx: &RenderContext<'_>, layout: ScreenLayout) -> Frame {
    let width = usize::from(layout.cols());
    let rows = usize::from(layout.rows());
    if ctx.help_visible {
        return help_frame(width, rows);
    }
    let session = ctx.session;
    let doc = session.document();
    let cursor = session.cursor();

    let mut out = Vec::with_capacity(rows.max(usize::from(crate::layout::CHROME_ROWS)));
    out.push(Row::new(
        title_bar(session.current_path(), session.is_modified(), width),
        RowStyle::Title,
    ));

    let text_height = usize::from(layout.text_height());
    let mut visible = session.visible_slice();
    for _ in 0..text_height {
        let line = visible.next().unwrap_or_default();
        out.push(Row::new(line, RowStyle::Plain));
    }

    let message = match (ctx.prompt, session.status()) {
        (Some(p), _) => Row::new(fit(p, width), RowStyle::Prompt),
        (None, Some(msg)) => {
            let style = match msg.kind {
                MessageKind::Info => RowStyle::Info,
                MessageKind::Success => RowStyle::Success,
                MessageKind::Error => RowStyle::Error,
            };
            Row::new(fit(&format!(" {}", msg.text), width), style)
        }
        (None, None) => Row::new(String::new(), RowStyle::Plain),
    };
    out.push(message);

    let line = doc.line_at(cursor.line).unwrap_or_default();
    let col = grapheme::visual_col(&line, cursor.byte);
    out.push(Row::new(
        status_bar(cursor.line, doc.line_count(), col, width),
        RowStyle::Bar,
    ));
    out.push(Row::new(help_bar(width), RowStyle::Bar));
    out.truncate(rows);

    let cursor = match ctx.prompt {
        Some(p) if width > 0 && layout.rows() >= 3 => {
            let col = str_width(p).min(width - 1);
            u16::try_from(col).ok().map(|c| (c, layout.message_row()))
        }
        Some(_) => None,
        None => session
            .cursor_screen_position()
            .map(|(row, col)| (col, row + layout.text_region().y)),
    };
    Frame { rows: out, cursor }
}

fn help_frame(width: usize, rows: usize) -> Frame {
    let rows = (0..rows)
        .map(|i| {
            let text = HELP_SCREEN
                .get(i)
                .map(|l| fit(&format!("  {l}"), width))
                .unwrap_or_default();
            Row::new(text, RowStyle::Plain)
        })
        .collect();
    Frame { rows, cursor: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Document;
    use pretty_assertions::assert_eq;

    fn session(lines: &[&str], layout: ScreenLayout) -> EditorSession {
        EditorSession::with_document(
            Document::from_lines(lines),
            usize::from(layout.text_height()),
            usize::from(layout.cols()),
        )
    }

    #[test]
    fn small_screen_frame() {
        let layout = ScreenLayout::new(24, 7);
        let s = session(&["hello", "world"], layout);
        let frame = compose_frame(&RenderContext::new(&s), layout);
        assert_eq!(
            frame.text(),
            vec![
                "  oxnano                ",
                "hello",
                "world",
                "",
                "",
                " Line 1/2  Col 1        ",
                "  ^X Exit   ^O Save   ^W",
            ]
        );
        assert_eq!(frame.cursor, Some((0, 1)));
    }

    #[test]
    fn prompt_owns_message_line_and_cursor() {
        let layout = ScreenLayout::new(30, 6);
        let s = session(&["x"], layout);
        let ctx = RenderContext {
            session: &s,
            prompt: Some("Search: ab"),
            help_visible: false,
        };
        let frame = compose_frame(&ctx, layout);
        assert_eq!(frame.rows[3].style, RowStyle::Prompt);
        assert!(frame.rows[3].text.starts_with("Search: ab"));
        assert_eq!(frame.cursor, Some((10, 3)));
    }

    #[test]
    fn help_screen_replaces_everything() {
        let layout = ScreenLayout::new(20, 3);
        let s = session(&["x"], layout);
        let ctx = RenderContext {
            session: &s,
            prompt: None,
            help_visible: true,
        };
        let frame = compose_frame(&ctx, layout);
        assert_eq!(frame.text(), vec![
                "  oxnano help       ",
                "                    ",
                "  Main commands:    ",
            ]);
        assert_eq!(frame.cursor, None);
    }

    #[test]
    fn tiny_screen_keeps_top_rows() {
        let layout = ScreenLayout::new(10, 2);
        let s = session(&["x"], layout);
        let frame = compose_frame(&RenderContext::new(&s), layout);
        assert_eq!(frame.rows.len(), 2);
        assert_eq!(frame.rows[0].style, RowStyle::Title);
        assert_eq!(frame.cursor, None);
    }
}
