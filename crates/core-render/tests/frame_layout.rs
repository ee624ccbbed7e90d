//! Frame geometry properties and end-to-end frame text for scrolled sessions.

use core_model::{EditorSession, Motion};
use core_render::{RenderContext, RowStyle, ScreenLayout, compose_frame};
use core_state::StatusMessage;
use core_text::width::str_width;
use core_text::{Document, Position};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn session_for(lines: &[String], layout: ScreenLayout) -> EditorSession {
    EditorSession::with_document(
        Document::from_lines(lines),
        usize::from(layout.text_height()),
        usize::from(layout.cols()),
    )
}

proptest! {
    #[test]
    fn frame_has_one_row_per_screen_row(cols in 0u16..60, rows in 0u16..30, n in 1usize..50, line in 0usize..60) {
        let layout = ScreenLayout::new(cols, rows);
        let lines: Vec<String> = (0..n).map(|i| format!("line number {i}")).collect();
        let mut s = session_for(&lines, layout);
        s.move_cursor(Motion::To(Position::new(line, 0)));
        let frame = compose_frame(&RenderContext::new(&s), layout);
        prop_assert_eq!(frame.rows.len(), usize::from(rows));
        for row in &frame.rows {
            prop_assert!(str_width(&row.text) <= usize::from(cols));
            if row.style != RowStyle::Plain {
                prop_assert_eq!(str_width(&row.text), usize::from(cols));
            }
        }
        if let Some((x, y)) = frame.cursor {
            prop_assert!(x < cols);
            prop_assert!(y >= 1 && y < 1 + layout.text_height());
        }
    }
}

#[test]
fn scrolled_session_shows_cursor_window() {
    let layout = ScreenLayout::new(20, 8);
    let lines: Vec<String> = (0..10).map(|i| format!("row {i}")).collect();
    let mut s = session_for(&lines, layout);
    s.move_cursor(Motion::To(Position::new(7, 2)));
    s.set_status(StatusMessage::success("Found 'w'"));
    let frame = compose_frame(&RenderContext::new(&s), layout);
    assert_eq!(
        frame.text(),
        vec![
            "  oxnano            ",
            "row 4",
            "row 5",
            "row 6",
            "row 7",
            " Found 'w'          ",
            " Line 8/10  Col 3   ",
            "  ^X Exit   ^O Save ",
        ]
    );
    assert_eq!(frame.rows[5].style, RowStyle::Success);
    assert_eq!(frame.cursor, Some((2, 4)));
}

#[test]
fn horizontal_scroll_and_wide_clusters() {
    let layout = ScreenLayout::new(6, 5);
    let lines = vec!["ab\u{6f22}cdefgh".to_string()];
    let mut s = session_for(&lines, layout);
    s.move_cursor(Motion::LineEnd);
    let frame = compose_frame(&RenderContext::new(&s), layout);
    // Cursor sits one cell past the last cluster at display column 10.
    let left = s.viewport().left_col();
    assert_eq!(left, 5);
    assert_eq!(frame.rows[1].text, "defgh");
    assert_eq!(frame.cursor, Some((5, 1)));
    assert_eq!(frame.rows[3].text, " Line 1/1  Col 11 ".chars().take(6).collect::<String>());
}

#[test]
fn modified_named_buffer_title() {
    let layout = ScreenLayout::new(40, 6);
    let path = std::path::Path::new("nx-missing.txt");
    let mut s = EditorSession::open(&core_model::FsStore, path, 2, 40).unwrap();
    s.insert_char('x').unwrap();
    let frame = compose_frame(&RenderContext::new(&s), layout);
    assert!(frame.rows[0].text.contains(" File: nx-missing.txt * "));
    assert_eq!(frame.rows[0].style, RowStyle::Title);
}
