//! Editor state pieces that sit directly on top of a `Document`: the cursor,
//! the single-slot line clipboard, the search engine, and status messages.
//!
//! None of these own the document. `core-model::EditorSession` holds the
//! document and threads it through each call, so the borrow rules keep every
//! mutation going through one place.

pub mod clipboard;
pub mod cursor;
pub mod search;
pub mod status;

pub use clipboard::Clipboard;
pub use cursor::Cursor;
pub use search::{SearchError, SearchMatch, SearchState, find, step_past};
pub use status::{MessageKind, StatusMessage};
