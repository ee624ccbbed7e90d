//! File I/O collaborator.
//!
//! The session never touches the filesystem directly; it goes through a
//! `FileStore`, so tests can swap in an in-memory store that fails on demand.
//! Loading normalizes line endings to LF and remembers the original style and
//! trailing-newline convention; saving expands them back.

use std::io;
use std::path::{Path, PathBuf};

use core_text::line_ending::expand_line_endings;
use core_text::{Document, LineEnding, normalize_line_endings};

use crate::EditError;

pub trait FileStore {
    /// Read a whole file as UTF-8. A missing file is `Ok(None)`.
    fn read(&self, path: &Path) -> io::Result<Option<String>>;
    /// Replace the file content.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// `FileStore` backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl FileStore for FsStore {
    fn read(&self, path: &Path) -> io::Result<Option<String>> {
        match std::fs::read(path) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

/// A document read from disk with the conventions needed to write it back.
pub struct Loaded {
    pub document: Document,
    pub line_ending: LineEnding,
    pub had_trailing_newline: bool,
    pub mixed_line_endings: bool,
    /// False when the path did not exist and an empty document was produced.
    pub existed: bool,
}

impl std::fmt::Debug for Loaded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loaded")
            .field("lines", &self.document.line_count())
            .field("line_ending", &self.line_ending)
            .field("had_trailing_newline", &self.had_trailing_newline)
            .field("mixed_line_endings", &self.mixed_line_endings)
            .field("existed", &self.existed)
            .finish()
    }
}

/// Read `path` into a document. A missing path yields an empty one-line document.
pub fn load_document(store: &dyn FileStore, path: &Path) -> Result<Loaded, EditError> {
    let content = store.read(path).map_err(|source| {
        tracing::error!(target: "io", path = %path.display(), error = %source, "file_read_error");
        EditError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let Some(content) = content else {
        tracing::info!(target: "io", path = %path.display(), "new_file");
        return Ok(Loaded {
            document: Document::new(),
            line_ending: LineEnding::platform(),
            had_trailing_newline: true,
            mixed_line_endings: false,
            existed: false,
        });
    };
    let norm = normalize_line_endings(&content);
    let document = Document::from_str(norm.document_text());
    tracing::info!(
        target: "io",
        path = %path.display(),
        bytes = content.len(),
        lines = document.line_count(),
        line_ending = ?norm.original,
        mixed = norm.mixed,
        "file_loaded"
    );
    Ok(Loaded {
        document,
        line_ending: norm.original,
        had_trailing_newline: norm.had_trailing_newline,
        mixed_line_endings: norm.mixed,
        existed: true,
    })
}

/// Serialize `doc` with the given conventions.
pub fn serialize(doc: &Document, ending: LineEnding, trailing_newline: bool) -> String {
    expand_line_endings(&doc.text(), ending, trailing_newline)
}

/// Write `doc` to `path`. Returns the number of bytes written.
pub fn save_document(
    store: &dyn FileStore,
    path: &Path,
    doc: &Document,
    ending: LineEnding,
    trailing_newline: bool,
) -> Result<usize, EditError> {
    let contents = serialize(doc, ending, trailing_newline);
    store.write(path, &contents).map_err(|source| {
        tracing::error!(target: "io", path = %path.display(), error = %source, "file_write_error");
        EditError::FileUnwritable {
            path: PathBuf::from(path),
            source,
        }
    })?;
    tracing::info!(target: "io", path = %path.display(), bytes = contents.len(), "file_written");
    Ok(contents.len())
}
