//! Cursor movement.

use super::DispatchResult;
use crate::Motion;
use core_model::EditorSession;

pub(crate) fn handle_motion(motion: Motion, session: &mut EditorSession) -> DispatchResult {
    let before = session.viewport().top_line();
    let moved = session.move_cursor(motion);
    tracing::trace!(
        target: "actions",
        ?motion,
        moved,
        scrolled = session.viewport().top_line() != before,
        "motion"
    );
    // Redraw regardless: the status message was just cleared.
    DispatchResult::dirty()
}
