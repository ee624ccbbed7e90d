//! Bar composition: title bar, status bar, help bar and the help screen.
//!
//! Every bar is padded or clipped to exactly the screen width in cells so a
//! reverse-video background spans the whole row.

use std::path::Path;

use core_model::viewport::clip_cells;
use core_text::width::str_width;

pub const PROGRAM_TITLE: &str = "  oxnano";

/// Shortcut legend shown on the help bar.
pub const SHORTCUTS: &[(&str, &str)] = &[
    ("^X", "Exit"),
    ("^O", "Save"),
    ("^W", "Where Is"),
    ("^K", "Cut"),
    ("^U", "Paste"),
    ("^G", "Help"),
];

pub const HELP_SCREEN: &[&str] = &[
    "oxnano help",
    "",
    "Main commands:",
    "  Ctrl+X  Exit (prompts to save if modified)",
    "  Ctrl+O  Save file (Write Out)",
    "  Ctrl+W  Search (Where Is); empty answer repeats the last search",
    "  Ctrl+K  Cut line",
    "  Ctrl+U  Paste line",
    "  Ctrl+G  Show this help",
    "",
    "Navigation:",
    "  Arrow Keys    Move cursor",
    "  Home/Ctrl+A   Beginning of line",
    "  End/Ctrl+E    End of line",
    "  PgUp/PgDn     Scroll page",
    "",
    "Editing:",
    "  Enter      Insert new line",
    "  Backspace  Delete character before cursor",
    "  Delete     Delete character at cursor",
    "  Tab        Insert spaces",
    "",
    "Press any key to continue...",
];

/// Clip `text` to `width` cells and pad the remainder with blanks.
pub fn fit(text: &str, width: usize) -> String {
    let mut s = clip_cells(text, 0, width);
    let used = str_width(&s);
    s.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    s
}

/// Program name on the left; " File: <name> " centered when it fits.
pub fn title_bar(path: Option<&Path>, modified: bool, width: usize) -> String {
    let name = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "[New Buffer]".to_string());
    let marker = if modified { " *" } else { "" };
    let file = format!(" File: {name}{marker} ");
    let file_w = str_width(&file);
    if file_w < width.saturating_sub(str_width(PROGRAM_TITLE)) {
        let x = (width - file_w) / 2;
        let mut s = fit(PROGRAM_TITLE, x);
        s.push_str(&file);
        fit(&s, width)
    } else {
        fit(PROGRAM_TITLE, width)
    }
}

/// " Line l/n  Col c " with 1-based line and display column.
pub fn status_bar(line: usize, line_count: usize, col: usize, width: usize) -> String {
    fit(
        &format!(" Line {}/{}  Col {} ", line + 1, line_count, col + 1),
        width,
    )
}

pub fn help_bar(width: usize) -> String {
    let mut s = String::from("  ");
    for (key, desc) in SHORTCUTS {
        s.push_str(key);
        s.push(' ');
        s.push_str(desc);
        s.push_str("   ");
    }
    fit(&s, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn title_centers_file_name() {
        let t = title_bar(Some(Path::new("a.txt")), true, 40);
        assert_eq!(t, "  oxnano     File: a.txt *              ");
        assert_eq!(str_width(&t), 40);
    }

    #[test]
    fn title_without_room_shows_program_only() {
        let t = title_bar(None, false, 20);
        assert_eq!(t, "  oxnano            ");
    }

    #[test]
    fn status_bar_is_one_based() {
        assert_eq!(status_bar(0, 3, 4, 20), " Line 1/3  Col 5    ");
    }

    #[test]
    fn help_bar_lists_shortcuts_and_clips() {
        let full = help_bar(80);
        assert!(full.starts_with("  ^X Exit   ^O Save   ^W Where Is"));
        assert_eq!(help_bar(6), "  ^X E");
    }

    #[test]
    fn fit_handles_wide_clusters() {
        assert_eq!(fit("\u{6f22}\u{5b57}", 3), "\u{6f22} ");
        assert_eq!(fit("", 2), "  ");
    }
}
