//! Full-frame renderer.
//!
//! Each frame is composed from the session (`compose_frame`), translated into
//! writer commands, and flushed to the terminal in one write. The text area
//! comes from `EditorSession::visible_slice`, already clipped to the viewport
//! in cells, and the hardware cursor from `cursor_screen_position`.

use std::time::Instant;

use anyhow::Result;

pub mod frame;
pub mod layout;
pub mod status;
pub mod writer;

pub use frame::{Frame, RenderContext, Row, RowStyle, compose_frame};
pub use layout::{CHROME_ROWS, LayoutRegion, ScreenLayout};
pub use writer::{Command, Writer};

#[derive(Debug, Default)]
pub struct Renderer {
    frames: u64,
    last_render_ns: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Duration of the most recent `render` call.
    pub fn last_render_ns(&self) -> u64 {
        self.last_render_ns
    }

    pub fn render(&mut self, ctx: &RenderContext<'_>, layout: ScreenLayout) -> Result<()> {
        let started = Instant::now();
        let frame = compose_frame(ctx, layout);
        Writer::for_frame(&frame).flush()?;
        self.frames += 1;
        self.last_render_ns = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);
        tracing::trace!(
            target: "render",
            frame = self.frames,
            rows = frame.rows.len(),
            ns = self.last_render_ns,
            "frame"
        );
        Ok(())
    }
}
