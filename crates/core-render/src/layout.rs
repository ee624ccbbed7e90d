//! Screen geometry.
//!
//! Rows from the top: title bar, text area, then three bottom rows (message
//! line, status bar, help bar). Coordinates are terminal cells (`u16`).
//!
//! Invariants:
//! * `text_height() == rows - CHROME_ROWS` when the screen has room, else 0.
//! * The text area starts at row 1 and column 0.
//! * Bottom rows are always the last three screen rows.

/// Rows not available to the text area.
pub const CHROME_ROWS: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl LayoutRegion {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    cols: u16,
    rows: u16,
}

impl ScreenLayout {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn text_height(&self) -> u16 {
        self.rows.saturating_sub(CHROME_ROWS)
    }

    pub fn text_region(&self) -> LayoutRegion {
        LayoutRegion::new(0, 1, self.cols, self.text_height())
    }

    pub fn title_row(&self) -> u16 {
        0
    }

    pub fn message_row(&self) -> u16 {
        self.rows.saturating_sub(3)
    }

    pub fn status_row(&self) -> u16 {
        self.rows.saturating_sub(2)
    }

    pub fn help_row(&self) -> u16 {
        self.rows.saturating_sub(1)
    }
}
