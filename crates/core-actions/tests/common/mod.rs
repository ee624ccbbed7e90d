#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use core_actions::{DispatchResult, KeyTranslator, UiState, dispatch};
use core_events::{InputEvent, KeyCode, KeyEvent};
use core_model::{EditorSession, FileStore};
use core_text::Document;

/// In-memory `FileStore` that can be told to reject writes.
#[derive(Default)]
pub struct MemStore {
    pub files: RefCell<HashMap<PathBuf, String>>,
    pub fail_writes: bool,
}

impl MemStore {
    pub fn with_file(path: &str, contents: &str) -> Self {
        let store = Self::default();
        store
            .files
            .borrow_mut()
            .insert(PathBuf::from(path), contents.to_string());
        store
    }

    pub fn contents(&self, path: &str) -> Option<String> {
        self.files.borrow().get(Path::new(path)).cloned()
    }
}

impl FileStore for MemStore {
    fn read(&self, path: &Path) -> io::Result<Option<String>> {
        Ok(self.files.borrow().get(path).cloned())
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

/// Drives events through the translator and dispatcher like the runtime loop.
pub struct Harness {
    pub session: EditorSession,
    pub ui: UiState,
    pub store: MemStore,
    pub translator: KeyTranslator,
    pub quit: bool,
}

impl Harness {
    pub fn new(lines: &[&str]) -> Self {
        Self::with_session(
            EditorSession::with_document(Document::from_lines(lines), 10, 40),
            MemStore::default(),
        )
    }

    pub fn open(store: MemStore, path: &str) -> Self {
        let session = EditorSession::open(&store, Path::new(path), 10, 40).unwrap();
        Self::with_session(session, store)
    }

    pub fn with_session(session: EditorSession, store: MemStore) -> Self {
        Self {
            session,
            ui: UiState::new(),
            store,
            translator: KeyTranslator::new(4),
            quit: false,
        }
    }

    pub fn event(&mut self, event: InputEvent) -> Option<DispatchResult> {
        let action = self.translator.translate_event(self.ui.context(), &event)?;
        let result = dispatch(action, &mut self.session, &mut self.ui, &self.store);
        self.quit |= result.quit;
        Some(result)
    }

    pub fn key(&mut self, key: KeyEvent) -> Option<DispatchResult> {
        self.event(InputEvent::Key(key))
    }

    pub fn code(&mut self, code: KeyCode) -> Option<DispatchResult> {
        self.key(KeyEvent::plain(code))
    }

    pub fn ctrl(&mut self, c: char) -> Option<DispatchResult> {
        self.key(KeyEvent::ctrl(c))
    }

    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.code(KeyCode::Char(c));
        }
    }

    pub fn status_text(&self) -> Option<&str> {
        self.session.status().map(|m| m.text.as_str())
    }

    pub fn lines(&self) -> Vec<String> {
        self.session.document().lines()
    }
}
