use std::path::PathBuf;

use core_state::SearchError;
use core_text::TextError;
use thiserror::Error;

/// Everything an `EditorSession` operation can report.
///
/// `NoOp` and `NotFound` (inside `Text` / `Search`) are expected outcomes that the
/// UI turns into status messages; `OutOfRange` signals a broken invariant.
#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Text(#[from] TextError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("cannot read {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    FileUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no file name")]
    NoFileName,
    #[error("buffer has unsaved changes")]
    UnsavedChanges,
}

impl EditError {
    /// True for outcomes that changed nothing and are not failures.
    pub fn is_noop(&self) -> bool {
        matches!(self, EditError::Text(TextError::NoOp))
    }
}
