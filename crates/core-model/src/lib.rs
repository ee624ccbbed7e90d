//! Editor model: the viewport engine and the session that orchestrates the
//! document, cursor, clipboard and search state.
//!
//! Data flow for one input event:
//! dispatcher -> `EditorSession` operation -> document / cursor / clipboard
//! mutation -> cursor reclamp -> `Viewport::ensure_visible` -> renderer reads
//! `visible_slice` and `cursor_screen_position`.
//!
//! Core invariants (must hold after every public call):
//! * the document has at least one line.
//! * the cursor names an existing line and a grapheme boundary within it.
//! * with a non-degenerate viewport the cursor projects inside it.
//! * the modified flag is cleared only by a successful save.

mod error;
pub mod io_ops;
pub mod session;
pub mod viewport;

pub use error::EditError;
pub use io_ops::{FileStore, FsStore, Loaded, load_document, save_document, serialize};
pub use session::{EditorSession, Motion, SessionState};
pub use viewport::{Viewport, VisibleLines, compute_scroll_intent};
